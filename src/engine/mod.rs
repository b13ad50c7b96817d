//! Thread-safe search engine facade.
//!
//! [`SearchEngine`] owns the system parameters and every table (identities,
//! groups, cached encapsulations and trapdoors) behind a single mutex. Each
//! public operation holds the lock for its whole body, so calls from many
//! threads are serialized and never observe a half-written table. Tables
//! are written only after all computation of a call has succeeded.
//!
//! Callers only receive identifiers, [`EncapsulationRecord`]s, trapdoor
//! tokens and public values; private keys never leave the engine.
//!
//! # Example
//!
//! ```rust,no_run
//! use edgematch::engine::Engine;
//!
//! # fn main() -> Result<(), edgematch::errors::Error> {
//! let engine = Engine::new();
//! engine.setup(128)?;
//! for id in ["0", "1", "2"] {
//!     engine.register(id)?;
//! }
//! let group = engine.create_group(&["0", "1", "2"])?;
//!
//! let observe = engine.encapsulate("observe", &group)?.to_json()?;
//! let patrol = engine.encapsulate("patrol", &group)?.to_json()?;
//! let trapdoor = engine.generate_trapdoor("observe", &group)?;
//!
//! assert!(engine.verify_match(&trapdoor, &observe)?);
//! let chosen = engine.allocate(&trapdoor, &[patrol, observe], &["edgeA", "edgeB"])?;
//! assert_eq!(chosen.as_deref(), Some("edgeB"));
//! # Ok(())
//! # }
//! ```

use std::sync::{Mutex, MutexGuard};

use rand::{rngs::StdRng, SeedableRng};
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};

use crate::{
    config::{BackendConfig, CurveId, EngineConfig},
    errors::Error,
    hash::fingerprint_g2,
    serde_impl::decimal,
    FieldElement, GroupKeywordSearch, GroupSearchScheme, PairingBackend, PublicParameters,
};

mod ids;
use ids::fresh_id;

mod records;
pub use records::{parse_encapsulation_id, EncapsulationRecord, TrapdoorToken, TOKEN_SEPARATOR};

mod state;
use state::EngineState;

/// Outcome of a node registration.
///
/// `fingerprint` is a one-way digest of the node private key in decimal; it
/// identifies the key without revealing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub node_id: String,
    pub fingerprint: String,
}

/// Public view of a stored group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub group_id: String,
    /// Member ids in canonical order.
    pub members: Vec<String>,
}

/// Table sizes, available before setup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineStats {
    pub initialized: bool,
    pub nodes: usize,
    pub groups: usize,
    pub encapsulations: usize,
    pub trapdoors: usize,
}

/// Group keyword-search engine over the pairing backend `B`.
///
/// Group aggregation, trapdoor generation and allocation fan out onto the
/// current Rayon pool while the engine lock is held. The parallel closures
/// never touch the lock, but a pool worker that holds it may pick up another
/// queued task while it waits. Do not fan engine calls out over a Rayon pool;
/// share the engine across plain threads instead.
pub struct SearchEngine<B: PairingBackend> {
    scheme: GroupSearchScheme<B>,
    config: EngineConfig,
    state: Mutex<EngineState<B>>,
}

/// Engine over the blstrs BLS12-381 backend.
#[cfg(feature = "blst")]
pub type Engine = SearchEngine<crate::PairingEngine>;

impl<B: PairingBackend> SearchEngine<B> {
    /// Creates an engine with the default configuration and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates an engine with the default configuration drawing all
    /// randomness from `rng`.
    pub fn with_rng(rng: StdRng) -> Self {
        Self::build(EngineConfig::default(), rng)
    }

    /// Creates an engine from a validated configuration.
    pub fn with_config(config: EngineConfig, rng: StdRng) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    fn build(config: EngineConfig, rng: StdRng) -> Self {
        Self {
            scheme: GroupSearchScheme::from_config(&config),
            config,
            state: Mutex::new(EngineState::new(rng)),
        }
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn lock(&self) -> Result<MutexGuard<'_, EngineState<B>>, Error> {
        self.state.lock().map_err(|_| {
            warn!("engine state lock poisoned");
            Error::LockPoisoned
        })
    }

    /// Runs `op` under the engine lock and logs its failure.
    fn locked<T>(
        &self,
        name: &'static str,
        op: impl FnOnce(&mut EngineState<B>) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let mut state = self.lock()?;
        op(&mut *state).inspect_err(|err| warn!(op = name, error = %err, "operation failed"))
    }

    /// Generates the system parameters `(P, s, Ppub)`.
    ///
    /// Only the first successful call has an effect; once initialized,
    /// every later call returns `Ok(())` without looking at
    /// `security_level`. Before that, `security_level` is in bits and must be
    /// satisfiable by a compiled-in curve.
    #[instrument(level = "info", skip_all, fields(security_level = security_level))]
    pub fn setup(&self, security_level: u32) -> Result<(), Error> {
        self.locked("setup", |state| {
            if state.params.is_some() {
                debug!("already initialized, keeping existing parameters");
                return Ok(());
            }
            let curve = CurveId::for_security_level(security_level)?;
            BackendConfig::new(self.config.backend.backend, curve).ensure_supported()?;

            state.params = Some(self.scheme.setup(&mut state.rng));
            info!(curve = ?curve, "system parameters generated");
            Ok(())
        })
    }

    /// Issues key material for `node_id`, replacing any earlier key of the
    /// same node.
    #[instrument(level = "info", skip_all, fields(node_id = %node_id))]
    pub fn register(&self, node_id: &str) -> Result<Registration, Error> {
        self.locked("register", |state| {
            let params = state.params.as_ref().ok_or(Error::Uninitialized)?;
            let material = self.scheme.register(&mut state.rng, params, node_id)?;
            let fingerprint = decimal::to_string(&material.fingerprint());

            if state
                .identities
                .insert(node_id.to_owned(), material)
                .is_some()
            {
                debug!("replaced existing key material");
            }
            Ok(Registration {
                node_id: node_id.to_owned(),
                fingerprint,
            })
        })
    }

    /// Creates a group over `node_ids`, in that order, and returns its id.
    ///
    /// All ids must be registered. Duplicates are kept and contribute once
    /// per occurrence.
    #[instrument(level = "info", skip_all, fields(num_members = node_ids.len()))]
    pub fn create_group<S: AsRef<str>>(&self, node_ids: &[S]) -> Result<String, Error> {
        self.locked("create_group", |state| {
            let params = state.params.as_ref().ok_or(Error::Uninitialized)?;
            if node_ids.is_empty() {
                return Err(Error::MalformedInput("group needs at least one member".into()));
            }

            let members = node_ids
                .iter()
                .map(|id| {
                    let id = id.as_ref();
                    state
                        .identities
                        .get(id)
                        .ok_or_else(|| Error::UnknownIdentity(id.to_owned()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            let group = self.scheme.aggregate_group(params, &members)?;

            let group_id = fresh_id(&mut state.rng, "", &state.groups);
            debug!(group_id = %group_id, "group created");
            state.groups.insert(group_id.clone(), group);
            Ok(group_id)
        })
    }

    /// Encapsulates `keyword` for the group `group_id`.
    ///
    /// `(X, Y)` is cached under the new record id for later matching.
    #[instrument(level = "info", skip_all, fields(group_id = %group_id))]
    pub fn encapsulate(&self, keyword: &str, group_id: &str) -> Result<EncapsulationRecord, Error> {
        self.locked("encapsulate", |state| {
            let params = state.params.as_ref().ok_or(Error::Uninitialized)?;
            let group = state
                .groups
                .get(group_id)
                .ok_or_else(|| Error::UnknownGroup(group_id.to_owned()))?;
            let encapsulation = self
                .scheme
                .encapsulate(&mut state.rng, params, group, keyword)?;

            let id = fresh_id(
                &mut state.rng,
                &self.config.encapsulation_prefix,
                &state.encapsulations,
            );
            let record = EncapsulationRecord::new(id.clone(), group_id, keyword, &encapsulation.y);
            trace!(enc_id = %id, "encapsulation cached");
            state.encapsulations.insert(id, encapsulation);
            Ok(record)
        })
    }

    /// Builds the trapdoor for `keyword` over the stored members of
    /// `group_id` and returns its token.
    ///
    /// A member whose key material is missing is skipped with a warning;
    /// the resulting trapdoor then matches nothing.
    #[instrument(level = "info", skip_all, fields(group_id = %group_id))]
    pub fn generate_trapdoor(&self, keyword: &str, group_id: &str) -> Result<String, Error> {
        self.locked("generate_trapdoor", |state| {
            if state.params.is_none() {
                return Err(Error::Uninitialized);
            }
            if keyword.contains(TOKEN_SEPARATOR) {
                return Err(Error::MalformedInput(format!(
                    "keyword must not contain '{TOKEN_SEPARATOR}'"
                )));
            }
            let group = state
                .groups
                .get(group_id)
                .ok_or_else(|| Error::UnknownGroup(group_id.to_owned()))?;

            let mut members = Vec::with_capacity(group.members.len());
            for id in &group.members {
                match state.identities.get(id) {
                    Some(material) => members.push(material),
                    None => warn!(node_id = %id, "member has no key material, skipping"),
                }
            }
            let trapdoor = self.scheme.trapdoor(group, &members, keyword);

            let id = fresh_id(&mut state.rng, &self.config.trapdoor_prefix, &state.trapdoors);
            let token = TrapdoorToken::format(&id, group_id, keyword);
            trace!(trapdoor_id = %id, "trapdoor cached");
            state.trapdoors.insert(id, trapdoor);
            Ok(token)
        })
    }

    /// Tests whether `trapdoor` matches the encapsulation behind `record`.
    ///
    /// `Ok(false)` is a well-formed non-match; unreadable input and unknown
    /// ids are errors.
    #[instrument(level = "debug", skip_all)]
    pub fn verify_match(&self, trapdoor: &str, record: &str) -> Result<bool, Error> {
        self.locked("verify_match", |state| {
            if state.params.is_none() {
                return Err(Error::Uninitialized);
            }
            let token = TrapdoorToken::parse(trapdoor)?;
            self.verify_locked(state, &token, record)
        })
    }

    /// Matching core shared by [`Self::verify_match`] and [`Self::allocate`].
    /// The caller holds the lock.
    fn verify_locked(
        &self,
        state: &EngineState<B>,
        token: &TrapdoorToken<'_>,
        record: &str,
    ) -> Result<bool, Error> {
        let enc_id = parse_encapsulation_id(record)?;
        let trapdoor = state
            .trapdoors
            .get(token.trapdoor_id)
            .ok_or_else(|| Error::CacheMiss(format!("trapdoor {}", token.trapdoor_id)))?;
        let encapsulation = state
            .encapsulations
            .get(enc_id)
            .ok_or_else(|| Error::CacheMiss(format!("encapsulation {enc_id}")))?;
        self.scheme.test(trapdoor, encapsulation)
    }

    /// Returns the edge node paired with the first record matching
    /// `trapdoor`.
    ///
    /// `records[i]` is served by `edge_node_ids[i]`. A record that cannot be
    /// read or is not cached counts as a non-match. `None` when nothing
    /// matches or the first match has no edge node.
    #[instrument(level = "info", skip_all, fields(num_records = records.len()))]
    pub fn allocate<S, E>(
        &self,
        trapdoor: &str,
        records: &[S],
        edge_node_ids: &[E],
    ) -> Result<Option<String>, Error>
    where
        S: AsRef<str> + Sync,
        E: AsRef<str>,
    {
        self.locked("allocate", |state| {
            if state.params.is_none() {
                return Err(Error::Uninitialized);
            }
            let token = TrapdoorToken::parse(trapdoor)?;
            let state = &*state;

            let first = records.par_iter().position_first(|record| {
                match self.verify_locked(state, &token, record.as_ref()) {
                    Ok(matched) => matched,
                    Err(err) => {
                        debug!(error = %err, "record skipped");
                        false
                    }
                }
            });

            let chosen = first.and_then(|i| edge_node_ids.get(i).map(|e| e.as_ref().to_owned()));
            debug!(matched_index = ?first, chosen = ?chosen, "allocation finished");
            Ok(chosen)
        })
    }

    /// Draws a random keyword: a fresh uniform scalar in decimal.
    #[instrument(level = "debug", skip_all)]
    pub fn generate_keyword(&self) -> Result<String, Error> {
        self.locked("generate_keyword", |state| {
            if state.params.is_none() {
                return Err(Error::Uninitialized);
            }
            Ok(decimal::to_string(&B::Scalar::random(&mut state.rng)))
        })
    }

    /// Registered nodes with their key fingerprints, sorted by node id.
    pub fn registered_nodes(&self) -> Result<Vec<Registration>, Error> {
        self.locked("registered_nodes", |state| {
            if state.params.is_none() {
                return Err(Error::Uninitialized);
            }
            let mut nodes: Vec<_> = state
                .identities
                .values()
                .map(|material| Registration {
                    node_id: material.node_id.clone(),
                    fingerprint: decimal::to_string(&material.fingerprint()),
                })
                .collect();
            nodes.sort_by(|a, b| a.node_id.cmp(&b.node_id));
            Ok(nodes)
        })
    }

    /// Stored groups with their canonical member order, sorted by group id.
    pub fn groups(&self) -> Result<Vec<GroupSummary>, Error> {
        self.locked("groups", |state| {
            if state.params.is_none() {
                return Err(Error::Uninitialized);
            }
            let mut groups: Vec<_> = state
                .groups
                .iter()
                .map(|(group_id, group)| GroupSummary {
                    group_id: group_id.clone(),
                    members: group.members.clone(),
                })
                .collect();
            groups.sort_by(|a, b| a.group_id.cmp(&b.group_id));
            Ok(groups)
        })
    }

    pub fn stats(&self) -> Result<EngineStats, Error> {
        Ok(self.lock()?.stats())
    }

    /// `(P, Ppub)`.
    pub fn public_parameters(&self) -> Result<PublicParameters<B>, Error> {
        self.locked("public_parameters", |state| {
            state
                .params
                .as_ref()
                .map(|params| params.public())
                .ok_or(Error::Uninitialized)
        })
    }

    /// Decimal digest of `Ppub`, printable as the system public key.
    pub fn system_fingerprint(&self) -> Result<String, Error> {
        let public = self.public_parameters()?;
        Ok(decimal::to_string(&fingerprint_g2::<B>(&public.master_public)))
    }
}

impl<B: PairingBackend> Default for SearchEngine<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: PairingBackend> core::fmt::Debug for SearchEngine<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(all(test, feature = "blst"))]
mod tests {
    use super::*;

    fn engine(seed: u64) -> Engine {
        Engine::with_rng(StdRng::seed_from_u64(seed))
    }

    fn ready(seed: u64, ids: &[&str]) -> (Engine, String) {
        let engine = engine(seed);
        engine.setup(128).unwrap();
        for id in ids {
            engine.register(id).unwrap();
        }
        let group = engine.create_group(ids).unwrap();
        (engine, group)
    }

    #[test]
    fn everything_requires_setup() {
        let engine = engine(1);
        assert!(matches!(engine.register("0"), Err(Error::Uninitialized)));
        assert!(matches!(engine.create_group(&["0"]), Err(Error::Uninitialized)));
        assert!(matches!(engine.encapsulate("k", "g"), Err(Error::Uninitialized)));
        assert!(matches!(engine.generate_trapdoor("k", "g"), Err(Error::Uninitialized)));
        assert!(matches!(engine.verify_match("a|b|c", "{}"), Err(Error::Uninitialized)));
        assert!(matches!(
            engine.allocate("a|b|c", &["{}"], &["e"]),
            Err(Error::Uninitialized)
        ));
        assert!(matches!(engine.generate_keyword(), Err(Error::Uninitialized)));
        assert!(matches!(engine.system_fingerprint(), Err(Error::Uninitialized)));
        assert!(!engine.stats().unwrap().initialized);
    }

    #[test]
    fn setup_is_idempotent_and_checks_level() {
        let engine = engine(2);
        assert!(matches!(engine.setup(0), Err(Error::InvalidConfig(_))));
        assert!(matches!(engine.setup(256), Err(Error::Backend(_))));
        assert!(!engine.stats().unwrap().initialized);

        engine.setup(80).unwrap();
        let first = engine.public_parameters().unwrap();
        let digest = engine.system_fingerprint().unwrap();
        engine.setup(128).unwrap();
        assert_eq!(engine.public_parameters().unwrap(), first);
        assert_eq!(engine.system_fingerprint().unwrap(), digest);
    }

    #[test]
    fn setup_after_init_ignores_level() {
        let engine = engine(13);
        engine.setup(128).unwrap();
        let first = engine.public_parameters().unwrap();

        engine.setup(0).unwrap();
        engine.setup(256).unwrap();
        assert_eq!(engine.public_parameters().unwrap(), first);
        assert!(engine.stats().unwrap().initialized);
    }

    #[test]
    fn reregistration_replaces_key() {
        let engine = engine(3);
        engine.setup(128).unwrap();
        let a = engine.register("n").unwrap();
        let b = engine.register("n").unwrap();
        // si depends only on the id and s
        assert_eq!(a, b);
        assert_eq!(engine.stats().unwrap().nodes, 1);
        assert!(matches!(engine.register(""), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn group_creation_is_atomic() {
        let engine = engine(4);
        engine.setup(128).unwrap();
        engine.register("a").unwrap();
        let empty: [&str; 0] = [];
        assert!(matches!(engine.create_group(&empty), Err(Error::MalformedInput(_))));
        assert!(matches!(
            engine.create_group(&["a", "ghost"]),
            Err(Error::UnknownIdentity(id)) if id == "ghost"
        ));
        assert_eq!(engine.stats().unwrap().groups, 0);

        let g1 = engine.create_group(&["a", "a"]).unwrap();
        let g2 = engine.create_group(&["a"]).unwrap();
        assert_ne!(g1, g2);
        let groups = engine.groups().unwrap();
        assert_eq!(groups.len(), 2);
        let dup = groups.iter().find(|g| g.group_id == g1).unwrap();
        assert_eq!(dup.members, vec!["a", "a"]);
    }

    #[test]
    fn duplicate_members_still_match() {
        let (engine, group) = ready(5, &["a", "a", "b"]);
        let record = engine.encapsulate("k", &group).unwrap().to_json().unwrap();
        let td = engine.generate_trapdoor("k", &group).unwrap();
        assert!(engine.verify_match(&td, &record).unwrap());
    }

    #[test]
    fn unknown_ids_and_bad_keywords() {
        let (engine, group) = ready(6, &["a"]);
        assert!(matches!(engine.encapsulate("k", "nope"), Err(Error::UnknownGroup(_))));
        assert!(matches!(engine.generate_trapdoor("k", "nope"), Err(Error::UnknownGroup(_))));
        assert!(matches!(
            engine.generate_trapdoor("a|b", &group),
            Err(Error::MalformedInput(_))
        ));

        let record = engine.encapsulate("k", &group).unwrap().to_json().unwrap();
        let td = engine.generate_trapdoor("k", &group).unwrap();
        assert!(matches!(
            engine.verify_match("td_missing|g|k", &record),
            Err(Error::CacheMiss(_))
        ));
        assert!(matches!(
            engine.verify_match(&td, r#"{"id":"enc_missing"}"#),
            Err(Error::CacheMiss(_))
        ));
        assert!(matches!(
            engine.verify_match("not-a-trapdoor", &record),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn missing_member_yields_dead_trapdoor() {
        let (engine, group) = ready(7, &["a", "b"]);
        let record = engine.encapsulate("k", &group).unwrap().to_json().unwrap();
        engine.state.lock().unwrap().identities.remove("b");

        let td = engine.generate_trapdoor("k", &group).unwrap();
        assert!(!engine.verify_match(&td, &record).unwrap());
    }

    #[test]
    fn allocation_skips_unreadable_records() {
        let (engine, group) = ready(8, &["a", "b"]);
        let hit = engine.encapsulate("k", &group).unwrap().to_json().unwrap();
        let td = engine.generate_trapdoor("k", &group).unwrap();

        let records = ["garbage".to_owned(), r#"{"id":"enc_0"}"#.to_owned(), hit.clone()];
        assert_eq!(
            engine.allocate(&td, &records, &["x", "y", "z"]).unwrap().as_deref(),
            Some("z")
        );
        // first match beyond the edge list
        assert_eq!(engine.allocate(&td, &records, &["x"]).unwrap(), None);
        assert!(matches!(
            engine.allocate("bad", &records, &["x"]),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn listings_and_stats() {
        let (engine, group) = ready(9, &["b", "a"]);
        engine.encapsulate("k", &group).unwrap();
        engine.generate_trapdoor("k", &group).unwrap();

        let nodes = engine.registered_nodes().unwrap();
        assert_eq!(
            nodes.iter().map(|n| n.node_id.as_str()).collect::<Vec<_>>(),
            ["a", "b"]
        );
        assert_eq!(
            engine.stats().unwrap(),
            EngineStats {
                initialized: true,
                nodes: 2,
                groups: 1,
                encapsulations: 1,
                trapdoors: 1,
            }
        );
        let keyword = engine.generate_keyword().unwrap();
        assert!(keyword.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn config_prefixes_flow_into_ids() {
        let config = EngineConfig {
            encapsulation_prefix: "meta-".into(),
            trapdoor_prefix: "search-".into(),
            ..EngineConfig::default()
        };
        let engine = Engine::with_config(config, StdRng::seed_from_u64(10)).unwrap();
        engine.setup(128).unwrap();
        engine.register("a").unwrap();
        let group = engine.create_group(&["a"]).unwrap();
        assert!(engine.encapsulate("k", &group).unwrap().id.starts_with("meta-"));
        assert!(engine.generate_trapdoor("k", &group).unwrap().starts_with("search-"));

        let bad = EngineConfig {
            trapdoor_prefix: "enc_".into(),
            ..EngineConfig::default()
        };
        assert!(Engine::with_config(bad, StdRng::seed_from_u64(0)).is_err());
    }
}
