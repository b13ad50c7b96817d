use std::fmt::Debug;

use rand_core::RngCore;

use crate::{BackendError, FieldElement};

#[cfg(feature = "blst")]
mod blst_bls12_381;
#[cfg(feature = "blst")]
pub use blst_bls12_381::{Gt, G1, G2};

/// Elliptic curve point abstraction for G1 and G2 groups.
///
/// Points are kept in projective coordinates; the affine form is only needed
/// at the pairing boundary.
///
/// # Example
///
/// ```rust,no_run
/// use edgematch::{CurvePoint, FieldElement, PairingBackend, PairingEngine};
/// use rand::thread_rng;
///
/// type G1 = <PairingEngine as PairingBackend>::G1;
/// type Scalar = <PairingEngine as PairingBackend>::Scalar;
///
/// let mut rng = thread_rng();
/// let scalar = Scalar::random(&mut rng);
///
/// let g = G1::random(&mut rng);
/// let point = g.mul_scalar(&scalar);
/// let sum = point.add(&G1::identity());
/// assert_eq!(sum, point);
/// ```
pub trait CurvePoint<F: FieldElement>:
    Clone + Send + Sync + Debug + PartialEq + 'static + Copy
{
    /// Associated affine representation.
    type Affine: Clone + Debug + Send + Sync + 'static + Copy;
    /// Compressed byte representation.
    type Repr: AsRef<[u8]> + Debug + Send + Sync + Clone + 'static;

    /// Returns the point at infinity (identity element).
    fn identity() -> Self;

    /// Samples a uniformly random group element.
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self;

    /// Checks if this point is the identity element.
    fn is_identity(&self) -> bool;

    /// Converts from projective to affine coordinates.
    fn to_affine(&self) -> Self::Affine;

    /// Performs elliptic curve point addition.
    fn add(&self, other: &Self) -> Self;

    /// Performs scalar multiplication: returns `scalar * self`.
    fn mul_scalar(&self, scalar: &F) -> Self;

    /// Serializes the point in compressed form.
    fn to_repr(&self) -> Self::Repr;
}

/// Pairing target group (GT) abstraction.
///
/// GT is written multiplicatively here: `combine` is the group operation and
/// `mul_scalar` is exponentiation.
pub trait TargetGroup: Clone + Send + Sync + Debug + PartialEq + 'static {
    /// Scalar field type for exponentiation.
    type Scalar: FieldElement + Copy;
    /// Byte representation for hashing.
    type Repr: AsRef<[u8]> + Debug + Send + Sync + Clone + 'static;

    /// Raises this element to `scalar`.
    fn mul_scalar(&self, scalar: &Self::Scalar) -> Self;

    /// Combines (multiplies) two target group elements.
    fn combine(&self, other: &Self) -> Self;

    /// Serializes this element to its compressed byte representation.
    fn to_repr(&self) -> Result<Self::Repr, BackendError>;
}
