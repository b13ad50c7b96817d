//! # edgematch: group keyword search over pairings
//!
//! edgematch is a group-oriented, identity-based searchable-encryption engine
//! built on the BLS12-381 pairing. A trusted authority issues identity-derived
//! keys to nodes, aggregates nodes into groups with a joint public key,
//! encapsulates keywords against a group, and tests trapdoors issued for that
//! group against the encapsulations without revealing the keyword. A
//! dispatcher uses the match result to route keyword-tagged work to edge
//! nodes.
//!
//! ## Architecture
//!
//! - **arith** (re-exported at the root): Backend-agnostic traits for the
//!   scalar field, G1/G2/GT and the pairing ([`FieldElement`], [`CurvePoint`],
//!   [`TargetGroup`], [`PairingBackend`]) implemented over `blstrs`, plus the
//!   [`hash`] functions into the scalar field.
//!
//! - **[`scheme`]**: The stateless protocol: [`GroupKeywordSearch`] and its
//!   implementation [`GroupSearchScheme`], with [`SystemParameters`],
//!   [`NodeKeyMaterial`], [`GroupKey`], [`Encapsulation`] and [`Trapdoor`].
//!
//! - **[`engine`]**: [`SearchEngine`], the thread-safe facade that owns all
//!   key material and caches and speaks the string wire formats.
//!
//! - **[`config`]**: [`EngineConfig`], [`BackendConfig`], [`CurveId`] and
//!   [`BackendId`].
//!
//! - **[`errors`]**: [`Error`] and [`BackendError`].
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "blst")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use edgematch::engine::Engine;
//!
//! let engine = Engine::new();
//! engine.setup(128)?;
//!
//! for id in ["0", "1", "2", "3", "4"] {
//!     engine.register(id)?;
//! }
//! let group = engine.create_group(&["0", "1", "2", "3", "4"])?;
//!
//! // Work items tagged with encapsulated keywords
//! let e1 = engine.encapsulate("observe", &group)?.to_json()?;
//! let e2 = engine.encapsulate("patrol", &group)?.to_json()?;
//!
//! // A searcher holding the trapdoor for "observe" is routed to edgeB
//! let trapdoor = engine.generate_trapdoor("observe", &group)?;
//! let node = engine.allocate(&trapdoor, &[e2, e1], &["edgeA", "edgeB"])?;
//! assert_eq!(node.as_deref(), Some("edgeB"));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "blst"))]
//! # fn main() {}
//! ```
//!
//! ## Feature Flags
//!
//! - **`blst`** (default): blstrs backend for BLS12-381
//!
//! ## Protocol Workflow
//!
//! 1. **Setup**: sample `P ∈ G2` and `s`, publish `Ppub = s·P`.
//! 2. **Registration**: `qi = H1(id) ∈ G1`, `si = s·qi`, blinding `xi`.
//! 3. **Group Generation**: `R = Σ xi·P`, `Φ = e(Σ qi, Ppub)`, GID = ids concatenated.
//! 4. **Encapsulation**: `X = y·P`, `Y = H3((e(H2(GID ‖ w), R) · Φ)^y)`.
//! 5. **Trapdoor**: `T = Σ (si + xi·H2(GID ‖ w))`.
//! 6. **Match**: `Y == H3(e(T, X))`.
//!
//! ## Performance
//!
//! Per-member contributions to `R` and `T`, and the per-record pairings of an
//! allocation, run on Rayon's pool inside the engine's critical section.
//!
//! ## Security Considerations
//!
//! - **Trusted Authority**: whoever holds the engine holds the master secret
//!   and every node key.
//! - **Keyword privacy**: records and trapdoor tokens carry the keyword in the
//!   clear for bookkeeping; only the matching step is keyword-blind.

mod arith;
pub mod config;
pub mod engine;
pub mod errors;
pub mod scheme;
pub mod serde_impl;

pub use arith::*;
pub use config::*;
pub use engine::{
    EncapsulationRecord, EngineStats, GroupSummary, Registration, SearchEngine, TrapdoorToken,
};
pub use errors::*;
pub use scheme::*;
