//! Pairing primitive abstractions and the blstrs implementation.
//!
//! The scheme layer never touches `blstrs` directly. It is written against the
//! traits in this module so the curve library stays behind one seam.
//!
//! # Architecture
//!
//! - **[`field`]**: Scalar field operations (Fr) - sampling, encoding, wide reduction
//! - **[`group`]**: Elliptic curve point operations (G1, G2, GT) - addition, scalar multiplication
//! - **[`pairing`]**: Bilinear pairing `e(G1, G2) -> GT` and hash-to-G1
//! - **[`hash`]**: Domain-separated hashes from bytes, points and GT elements into the scalar field
//!
//! # Group placement
//!
//! BLS12-381 is an asymmetric pairing. Identity and keyword hashes, node
//! private keys and trapdoors live in G1; the generator, master public key,
//! group aggregate `R` and the encapsulation point `X` live in G2.
//!
//! # Example
//!
//! ```rust
//! use rand::thread_rng;
//! use edgematch::{CurvePoint, FieldElement, PairingBackend, PairingEngine};
//!
//! let mut rng = thread_rng();
//! let scalar = <PairingEngine as PairingBackend>::Scalar::random_nonzero(&mut rng);
//!
//! let g1 = <PairingEngine as PairingBackend>::G1::random(&mut rng);
//! let g2 = <PairingEngine as PairingBackend>::G2::random(&mut rng);
//!
//! // e(a*g1, g2) == e(g1, a*g2)
//! let lhs = PairingEngine::pairing(&g1.mul_scalar(&scalar), &g2);
//! let rhs = PairingEngine::pairing(&g1, &g2.mul_scalar(&scalar));
//! assert_eq!(lhs, rhs);
//! ```

mod field;
pub use field::*;

mod group;
pub use self::group::*;

mod pairing;
pub use pairing::*;

pub mod hash;
