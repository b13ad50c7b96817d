//! Hashes into the scalar field.
//!
//! BLAKE3 in key-derivation mode gives each use its own context string; the
//! 64-byte XOF output is reduced modulo the field order so the result is
//! statistically uniform.

use blake3::Hasher;

use crate::{BackendError, CurvePoint, FieldElement, PairingBackend, TargetGroup};

/// Context for H3, the GT-to-scalar hash that masks encapsulations.
pub const TARGET_HASH_CONTEXT: &str = "edgematch 2024-06 H3 target to scalar";
/// Context for the one-way digest of a node private key.
pub const KEY_FINGERPRINT_CONTEXT: &str = "edgematch 2024-06 private key fingerprint";
/// Context for the digest of the master public key.
pub const SYSTEM_FINGERPRINT_CONTEXT: &str = "edgematch 2024-06 system fingerprint";

/// Hashes `bytes` to a scalar under the BLAKE3 derive-key `context`.
pub fn hash_to_scalar<F: FieldElement>(context: &str, bytes: &[u8]) -> F {
    let mut hasher = Hasher::new_derive_key(context);
    hasher.update(bytes);
    let mut wide = [0u8; 64];
    hasher.finalize_xof().fill(&mut wide);
    F::from_uniform_bytes(&wide)
}

/// H3: maps a pairing output to a scalar.
pub fn hash_target<B: PairingBackend>(target: &B::Target) -> Result<B::Scalar, BackendError> {
    let repr = target.to_repr()?;
    Ok(hash_to_scalar(TARGET_HASH_CONTEXT, repr.as_ref()))
}

/// One-way digest of a G1 point (used for private-key fingerprints).
pub fn fingerprint_g1<B: PairingBackend>(point: &B::G1) -> B::Scalar {
    hash_to_scalar(KEY_FINGERPRINT_CONTEXT, point.to_repr().as_ref())
}

/// One-way digest of a G2 point (used for the master public key).
pub fn fingerprint_g2<B: PairingBackend>(point: &B::G2) -> B::Scalar {
    hash_to_scalar(SYSTEM_FINGERPRINT_CONTEXT, point.to_repr().as_ref())
}
