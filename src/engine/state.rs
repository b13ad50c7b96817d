use std::collections::HashMap;

use rand::rngs::StdRng;

use crate::{
    Encapsulation, EngineStats, GroupKey, NodeKeyMaterial, PairingBackend, SystemParameters,
    Trapdoor,
};

/// Everything the engine owns. Lives behind the engine mutex and is never
/// handed out.
///
/// # Fields
///
/// - `params`: `None` until setup succeeds, then fixed
/// - `identities`: node id to key material
/// - `groups`: group id to aggregated group key
/// - `encapsulations`: encapsulation id to `(X, Y)`
/// - `trapdoors`: trapdoor id to `T`
/// - `rng`: source of every fresh scalar, point and id
pub(crate) struct EngineState<B: PairingBackend> {
    pub(crate) params: Option<SystemParameters<B>>,
    pub(crate) identities: HashMap<String, NodeKeyMaterial<B>>,
    pub(crate) groups: HashMap<String, GroupKey<B>>,
    pub(crate) encapsulations: HashMap<String, Encapsulation<B>>,
    pub(crate) trapdoors: HashMap<String, Trapdoor<B>>,
    pub(crate) rng: StdRng,
}

impl<B: PairingBackend> EngineState<B> {
    pub(crate) fn new(rng: StdRng) -> Self {
        Self {
            params: None,
            identities: HashMap::new(),
            groups: HashMap::new(),
            encapsulations: HashMap::new(),
            trapdoors: HashMap::new(),
            rng,
        }
    }

    pub(crate) fn stats(&self) -> EngineStats {
        EngineStats {
            initialized: self.params.is_some(),
            nodes: self.identities.len(),
            groups: self.groups.len(),
            encapsulations: self.encapsulations.len(),
            trapdoors: self.trapdoors.len(),
        }
    }
}
