use core::fmt;

use rand_core::RngCore;

use crate::{CurvePoint, FieldElement, PairingBackend};

/// System parameters held by the trusted authority.
///
/// Created once by setup and immutable afterwards. The master secret never
/// leaves the crate; callers only ever see [`PublicParameters`].
///
/// # Fields
///
/// - `generator`: uniformly sampled base point `P` in G2
/// - `master_secret`: nonzero scalar `s`
/// - `master_public`: `Ppub = s·P`
pub struct SystemParameters<B: PairingBackend> {
    pub(crate) generator: B::G2,
    pub(crate) master_secret: B::Scalar,
    pub(crate) master_public: B::G2,
}

impl<B: PairingBackend> SystemParameters<B> {
    /// Samples `P` and a nonzero `s`, then derives `Ppub = s·P`.
    pub(crate) fn generate<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let generator = loop {
            let candidate = B::G2::random(rng);
            if !candidate.is_identity() {
                break candidate;
            }
        };
        let master_secret = B::Scalar::random_nonzero(rng);
        let master_public = generator.mul_scalar(&master_secret);
        Self {
            generator,
            master_secret,
            master_public,
        }
    }

    /// Public half of the parameters.
    pub fn public(&self) -> PublicParameters<B> {
        PublicParameters {
            generator: self.generator,
            master_public: self.master_public,
        }
    }
}

impl<B: PairingBackend> fmt::Debug for SystemParameters<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemParameters")
            .field("generator", &self.generator)
            .field("master_secret", &"<redacted>")
            .field("master_public", &self.master_public)
            .finish()
    }
}

/// Publicly shareable system parameters `(P, Ppub)`.
#[derive(Debug)]
pub struct PublicParameters<B: PairingBackend> {
    pub generator: B::G2,
    pub master_public: B::G2,
}

impl<B: PairingBackend> Clone for PublicParameters<B> {
    fn clone(&self) -> Self {
        Self {
            generator: self.generator,
            master_public: self.master_public,
        }
    }
}

impl<B: PairingBackend> PartialEq for PublicParameters<B> {
    fn eq(&self, other: &Self) -> bool {
        self.generator == other.generator && self.master_public == other.master_public
    }
}
