//! Keyword encapsulations and search trapdoors.
//!
//! - [`Encapsulation`]: the pair `(X, Y)` produced for a keyword against a group
//! - [`Trapdoor`]: the aggregated search token `T` for a keyword and a group
//!
//! # Matching
//!
//! With `h = H2(GID ‖ keyword)`, `X = y·P` and `T = Σ (si + xi·h)`:
//!
//! ```text
//! e(T, X) = e(Σ qi, P)^(s·y) · e(h, P)^(y·Σ xi) = (Φ · e(h, R))^y
//! ```
//!
//! so `H3(e(T, X)) = Y` exactly when trapdoor and encapsulation were built
//! for the same group domain and the same keyword.

use crate::PairingBackend;

/// Encapsulated keyword.
///
/// # Fields
///
/// - `x`: `X = y·P` in G2
/// - `y`: `Y = H3((e(h, R) · Φ)^y)`
///
/// The randomness `y` is dropped as soon as `X` and `Y` are computed.
#[derive(Debug)]
pub struct Encapsulation<B: PairingBackend> {
    pub x: B::G2,
    pub y: B::Scalar,
}

impl<B: PairingBackend> Clone for Encapsulation<B> {
    fn clone(&self) -> Self {
        Self {
            x: self.x,
            y: self.y,
        }
    }
}

/// Aggregated trapdoor `T = Σ (si + xi·h)` in G1.
#[derive(Debug)]
pub struct Trapdoor<B: PairingBackend> {
    pub t: B::G1,
}

impl<B: PairingBackend> Clone for Trapdoor<B> {
    fn clone(&self) -> Self {
        Self { t: self.t }
    }
}
