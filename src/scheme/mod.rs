//! Group keyword-search protocol.
//!
//! This module implements the pairing-based protocol itself, free of any
//! engine state: every function takes the key material it needs as
//! arguments and returns fresh values.
//!
//! # Protocol Overview
//!
//! 1. **Setup** ([`GroupKeywordSearch::setup`]): sample `P`, master secret `s`, publish `Ppub = s·P`.
//!
//! 2. **Registration** ([`GroupKeywordSearch::register`]): derive `qi = H1(id)`, `si = s·qi`
//!    and a blinding scalar `xi` for a node.
//!
//! 3. **Group Generation** ([`GroupKeywordSearch::aggregate_group`]): combine members into
//!    `R = Σ xi·P` and `Φ = e(Σ qi, Ppub)`, fixing the member order and the group domain.
//!
//! 4. **Encapsulation** ([`GroupKeywordSearch::encapsulate`]): `X = y·P`,
//!    `Y = H3((e(H2(GID ‖ w), R) · Φ)^y)`.
//!
//! 5. **Trapdoor** ([`GroupKeywordSearch::trapdoor`]): `T = Σ (si + xi·H2(GID ‖ w))`.
//!
//! 6. **Test** ([`GroupKeywordSearch::test`]): `Y == H3(e(T, X))`.

use core::fmt::Debug;

use rand_core::RngCore;

use crate::{errors::Error, PairingBackend};

#[allow(clippy::module_inception)]
mod scheme;
pub use scheme::GroupSearchScheme;

mod keys;
pub use keys::{group_domain, GroupKey, NodeKeyMaterial};

mod params;
pub use params::{PublicParameters, SystemParameters};

mod ciphertext;
pub use ciphertext::{Encapsulation, Trapdoor};

/// High-level group keyword-search interface.
///
/// This trait defines the complete protocol, from setup through registration
/// and group aggregation to encapsulation, trapdoor generation and testing.
pub trait GroupKeywordSearch<B: PairingBackend>: Debug + Send + Sync + 'static {
    /// Generates fresh system parameters.
    fn setup<R: RngCore + ?Sized>(&self, rng: &mut R) -> SystemParameters<B>;

    /// Derives key material for `node_id`.
    fn register<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        params: &SystemParameters<B>,
        node_id: &str,
    ) -> Result<NodeKeyMaterial<B>, Error>;

    /// Aggregates the given members, in order, into a group key.
    fn aggregate_group(
        &self,
        params: &SystemParameters<B>,
        members: &[&NodeKeyMaterial<B>],
    ) -> Result<GroupKey<B>, Error>;

    /// Encapsulates `keyword` against `group`.
    fn encapsulate<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        params: &SystemParameters<B>,
        group: &GroupKey<B>,
        keyword: &str,
    ) -> Result<Encapsulation<B>, Error>;

    /// Builds the trapdoor for `keyword` from the contributions of `members`.
    ///
    /// `members` should be the full member set of `group`; a trapdoor built
    /// from a partial set never matches.
    fn trapdoor(
        &self,
        group: &GroupKey<B>,
        members: &[&NodeKeyMaterial<B>],
        keyword: &str,
    ) -> Trapdoor<B>;

    /// Tests whether `trapdoor` and `encapsulation` carry the same keyword
    /// for the same group.
    fn test(&self, trapdoor: &Trapdoor<B>, encapsulation: &Encapsulation<B>)
        -> Result<bool, Error>;
}
