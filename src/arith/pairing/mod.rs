use std::fmt::Debug;

#[cfg(feature = "blst")]
mod blst_bls12_381;
#[cfg(feature = "blst")]
pub use blst_bls12_381::PairingEngine;

use crate::{CurvePoint, FieldElement, TargetGroup};

/// Main backend trait that ties together all primitive operations.
///
/// The search scheme needs exactly three things from the curve library
/// beyond group arithmetic: the pairing itself, a hash onto G1 with a
/// domain-separation tag, and a canonical encoding of GT (see
/// [`TargetGroup::to_repr`]) so pairing outputs can be hashed into scalars.
///
/// # Type Parameters
///
/// - `Scalar`: The scalar field type (Fr)
/// - `G1`: Group holding identity hashes, private keys and trapdoors
/// - `G2`: Group holding the generator and all public aggregates
/// - `Target`: The pairing target group (GT)
///
/// # Example
///
/// ```rust,no_run
/// use edgematch::{CurvePoint, PairingBackend, PairingEngine};
///
/// let q = PairingEngine::hash_to_g1(b"node-7", b"EDGEMATCH-H1");
/// let p = <PairingEngine as PairingBackend>::G2::random(&mut rand::thread_rng());
/// let gt = PairingEngine::pairing(&q, &p);
/// println!("{:?}", gt);
/// ```
pub trait PairingBackend: Send + Sync + Debug + Sized + 'static {
    /// Scalar field type (Fr).
    type Scalar: FieldElement;
    /// First curve group (G1).
    type G1: CurvePoint<Self::Scalar>;
    /// Second curve group (G2).
    type G2: CurvePoint<Self::Scalar>;
    /// Pairing target group (GT).
    type Target: TargetGroup<Scalar = Self::Scalar>;

    /// Computes the bilinear pairing: `e(g1, g2) -> GT`.
    ///
    /// The pairing satisfies bilinearity: `e(a*P, b*Q) = e(P, Q)^(ab)`.
    fn pairing(g1: &Self::G1, g2: &Self::G2) -> Self::Target;

    /// Hashes `msg` onto G1 under the domain-separation tag `dst`.
    fn hash_to_g1(msg: &[u8], dst: &[u8]) -> Self::G1;
}
