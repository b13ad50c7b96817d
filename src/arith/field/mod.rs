use std::fmt::Debug;

use rand_core::RngCore;

use crate::BackendError;

#[cfg(feature = "blst")]
mod blst_bls12_381;
#[cfg(feature = "blst")]
pub use blst_bls12_381::Fr;

/// Field element abstraction for scalar field operations.
///
/// This trait abstracts over the scalar field Fr of the curve: the master
/// secret, the per-node blinding values and the per-encapsulation randomness
/// are all elements of this field.
///
/// # Example
///
/// ```rust,no_run
/// use rand::thread_rng;
/// use edgematch::{FieldElement, Fr};
///
/// let mut rng = thread_rng();
/// let a = Fr::random_nonzero(&mut rng);
/// assert!(!a.is_zero());
///
/// // Serialization
/// let bytes = a.to_repr();
/// let recovered = Fr::from_repr(&bytes).expect("valid repr");
/// assert_eq!(a, recovered);
/// ```
pub trait FieldElement: Clone + Send + Sync + Debug + PartialEq + 'static + Copy {
    /// Big-endian byte representation.
    type Repr: AsRef<[u8]> + AsMut<[u8]> + Default + Debug + Send + Sync + Clone + 'static;

    /// Returns the additive identity (zero) element.
    fn zero() -> Self;

    /// Generates a uniformly random field element.
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self;

    /// Returns `true` for the additive identity.
    fn is_zero(&self) -> bool;

    /// Generates a uniformly random element of the multiplicative group.
    fn random_nonzero<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        loop {
            let candidate = Self::random(rng);
            if !candidate.is_zero() {
                return candidate;
            }
        }
    }

    /// Serializes this field element to big-endian bytes.
    fn to_repr(&self) -> Self::Repr;

    /// Deserializes a field element from big-endian bytes.
    ///
    /// Returns an error if the representation is not reduced modulo the field order.
    fn from_repr(repr: &Self::Repr) -> Result<Self, BackendError>;

    /// Reduces 512 uniformly distributed bits (big-endian) modulo the field order.
    fn from_uniform_bytes(bytes: &[u8; 64]) -> Self;
}
