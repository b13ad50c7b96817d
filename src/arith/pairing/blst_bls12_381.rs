use blstrs::G1Projective;
use group::Curve;

use crate::{Fr, Gt, PairingBackend, G1, G2};

/// Pairing engine implementation for the blst BLS12-381 backend.
#[derive(Debug)]
pub struct PairingEngine;

/// blst-backed `PairingBackend` implementation for BLS12-381.
///
/// Hashing onto G1 uses the IETF hash-to-curve suite that blst implements
/// (`BLS12381G1_XMD:SHA-256_SSWU_RO_`), keyed by the caller's tag.
impl PairingBackend for PairingEngine {
    type Scalar = Fr;
    type G1 = G1;
    type G2 = G2;
    type Target = Gt;

    fn pairing(g1: &Self::G1, g2: &Self::G2) -> Self::Target {
        blstrs::pairing(&g1.to_affine(), &g2.to_affine())
    }

    fn hash_to_g1(msg: &[u8], dst: &[u8]) -> Self::G1 {
        G1Projective::hash_to_curve(msg, dst, &[])
    }
}
