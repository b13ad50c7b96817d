//! blst-backed curve groups for BLS12-381.
//!
//! Implements [`CurvePoint`] for `G1Projective`/`G2Projective` and
//! [`TargetGroup`] for `Gt` using the `blstrs` crate.
//!
//! # Feature
//!
//! Compiled when the Cargo feature `blst` is enabled.

use blstrs::{Compress, G1Affine, G1Projective, G2Affine, G2Projective, Gt as BlstGt, Scalar};
use group::{Group, GroupEncoding};
use rand_core::RngCore;

use crate::{BackendError, CurvePoint, TargetGroup};

pub type G1 = G1Projective;
pub type G2 = G2Projective;
pub type Gt = BlstGt;

/// Compressed GT elements are 288 bytes.
const GT_COMPRESSED_LEN: usize = 288;

impl CurvePoint<Scalar> for G1 {
    type Affine = G1Affine;
    type Repr = Vec<u8>;

    fn identity() -> Self {
        <G1Projective as Group>::identity()
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        <G1Projective as Group>::random(rng)
    }

    fn is_identity(&self) -> bool {
        <Self as Group>::is_identity(self).into()
    }

    fn to_affine(&self) -> Self::Affine {
        self.into()
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn mul_scalar(&self, scalar: &Scalar) -> Self {
        self * scalar
    }

    fn to_repr(&self) -> Self::Repr {
        GroupEncoding::to_bytes(self).as_ref().to_vec()
    }
}

impl CurvePoint<Scalar> for G2 {
    type Affine = G2Affine;
    type Repr = Vec<u8>;

    fn identity() -> Self {
        <G2Projective as Group>::identity()
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        <G2Projective as Group>::random(rng)
    }

    fn is_identity(&self) -> bool {
        <Self as Group>::is_identity(self).into()
    }

    fn to_affine(&self) -> Self::Affine {
        self.into()
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn mul_scalar(&self, scalar: &Scalar) -> Self {
        self * scalar
    }

    fn to_repr(&self) -> Self::Repr {
        GroupEncoding::to_bytes(self).as_ref().to_vec()
    }
}

impl TargetGroup for Gt {
    type Scalar = Scalar;
    type Repr = Vec<u8>;

    fn mul_scalar(&self, scalar: &Self::Scalar) -> Self {
        self * scalar
    }

    fn combine(&self, other: &Self) -> Self {
        self + other
    }

    fn to_repr(&self) -> Result<Self::Repr, BackendError> {
        let mut bytes = Vec::with_capacity(GT_COMPRESSED_LEN);
        self.write_compressed(&mut bytes)
            .map_err(|_| BackendError::Serialization("gt serialization failure"))?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldElement;
    use rand::{rngs::StdRng, SeedableRng};

    fn affine_pair(g1: &G1, g2: &G2) -> Gt {
        blstrs::pairing(
            &CurvePoint::<Scalar>::to_affine(g1),
            &CurvePoint::<Scalar>::to_affine(g2),
        )
    }

    #[test]
    fn compressed_lengths() {
        let mut rng = StdRng::seed_from_u64(3);
        let g1 = <G1 as CurvePoint<Scalar>>::random(&mut rng);
        let g2 = <G2 as CurvePoint<Scalar>>::random(&mut rng);
        assert_eq!(CurvePoint::<Scalar>::to_repr(&g1).len(), 48);
        assert_eq!(CurvePoint::<Scalar>::to_repr(&g2).len(), 96);

        let gt = affine_pair(&g1, &g2);
        assert_eq!(TargetGroup::to_repr(&gt).unwrap().len(), GT_COMPRESSED_LEN);
    }

    #[test]
    fn target_exponent_distributes_over_combine() {
        let mut rng = StdRng::seed_from_u64(5);
        let h = <G2 as Group>::generator();
        let a = affine_pair(&<G1 as CurvePoint<Scalar>>::random(&mut rng), &h);
        let b = affine_pair(&<G1 as Group>::generator(), &h);
        let y = Scalar::random_nonzero(&mut rng);

        let lhs = a.combine(&b).mul_scalar(&y);
        let rhs = a.mul_scalar(&y).combine(&b.mul_scalar(&y));
        assert_eq!(lhs, rhs);
        assert_eq!(<Gt as Group>::identity().combine(&a), a);
    }
}
