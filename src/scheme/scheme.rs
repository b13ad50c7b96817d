use core::marker::PhantomData;

use rand_core::RngCore;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::instrument;

use crate::{
    config::{EngineConfig, DEFAULT_IDENTITY_TAG, DEFAULT_KEYWORD_TAG},
    errors::Error,
    hash::hash_target,
    CurvePoint, Encapsulation, FieldElement, GroupKey, GroupKeywordSearch, NodeKeyMaterial,
    PairingBackend, SystemParameters, TargetGroup, Trapdoor,
};

/// The group keyword-search scheme.
///
/// Holds the hash-to-curve tags for H1 and H2; parties that must agree on
/// matches have to use the same tags.
#[derive(Debug)]
pub struct GroupSearchScheme<B: PairingBackend> {
    _phantom: PhantomData<B>,
    identity_tag: Vec<u8>,
    keyword_tag: Vec<u8>,
}

impl<B: PairingBackend> GroupSearchScheme<B> {
    /// Creates a scheme with the default domain-separation tags.
    pub fn new() -> Self {
        Self::with_tags(DEFAULT_IDENTITY_TAG.as_bytes(), DEFAULT_KEYWORD_TAG.as_bytes())
    }

    /// Creates a scheme with custom H1/H2 tags.
    pub fn with_tags(identity_tag: &[u8], keyword_tag: &[u8]) -> Self {
        Self {
            _phantom: PhantomData,
            identity_tag: identity_tag.to_vec(),
            keyword_tag: keyword_tag.to_vec(),
        }
    }

    /// Creates a scheme using the tags of `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_tags(config.identity_tag.as_bytes(), config.keyword_tag.as_bytes())
    }

    /// `H2(GID ‖ keyword)`.
    fn keyword_point(&self, group: &GroupKey<B>, keyword: &str) -> B::G1 {
        B::hash_to_g1(&group.keyword_message(keyword), &self.keyword_tag)
    }
}

impl<B: PairingBackend> Default for GroupSearchScheme<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: PairingBackend> GroupKeywordSearch<B> for GroupSearchScheme<B> {
    #[instrument(level = "info", skip_all)]
    fn setup<R: RngCore + ?Sized>(&self, rng: &mut R) -> SystemParameters<B> {
        SystemParameters::generate(rng)
    }

    #[instrument(level = "debug", skip_all, fields(node_id = %node_id))]
    fn register<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        params: &SystemParameters<B>,
        node_id: &str,
    ) -> Result<NodeKeyMaterial<B>, Error> {
        if node_id.is_empty() {
            return Err(Error::MalformedInput("node id must not be empty".into()));
        }
        Ok(NodeKeyMaterial::derive(
            rng,
            params,
            node_id,
            &self.identity_tag,
        ))
    }

    #[instrument(level = "info", skip_all, fields(num_members = members.len()))]
    fn aggregate_group(
        &self,
        params: &SystemParameters<B>,
        members: &[&NodeKeyMaterial<B>],
    ) -> Result<GroupKey<B>, Error> {
        GroupKey::aggregate(params, members)
    }

    #[instrument(level = "debug", skip_all, fields(keyword_len = keyword.len()))]
    fn encapsulate<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        params: &SystemParameters<B>,
        group: &GroupKey<B>,
        keyword: &str,
    ) -> Result<Encapsulation<B>, Error> {
        let y = B::Scalar::random_nonzero(rng);
        let h = self.keyword_point(group, keyword);

        // (e(h, R) · Φ)^y
        let combined = B::pairing(&h, &group.aggregate_r).combine(&group.aggregate_phi);
        let masked = hash_target::<B>(&combined.mul_scalar(&y))?;

        Ok(Encapsulation {
            x: params.generator.mul_scalar(&y),
            y: masked,
        })
    }

    #[instrument(level = "debug", skip_all, fields(num_members = members.len()))]
    fn trapdoor(
        &self,
        group: &GroupKey<B>,
        members: &[&NodeKeyMaterial<B>],
        keyword: &str,
    ) -> Trapdoor<B> {
        let h = self.keyword_point(group, keyword);
        let t = members
            .par_iter()
            .map(|node| node.partial_trapdoor(&h))
            .reduce(B::G1::identity, |acc, wi| acc.add(&wi));
        Trapdoor { t }
    }

    #[instrument(level = "trace", skip_all)]
    fn test(
        &self,
        trapdoor: &Trapdoor<B>,
        encapsulation: &Encapsulation<B>,
    ) -> Result<bool, Error> {
        let expected = hash_target::<B>(&B::pairing(&trapdoor.t, &encapsulation.x))?;
        Ok(expected == encapsulation.y)
    }
}

#[cfg(all(test, feature = "blst"))]
mod tests {
    use super::*;
    use crate::PairingEngine;
    use rand::{rngs::StdRng, SeedableRng};

    type Scheme = GroupSearchScheme<PairingEngine>;

    fn register_all(
        scheme: &Scheme,
        rng: &mut StdRng,
        params: &SystemParameters<PairingEngine>,
        ids: &[&str],
    ) -> Vec<NodeKeyMaterial<PairingEngine>> {
        ids.iter()
            .map(|id| scheme.register(rng, params, id).expect("register"))
            .collect()
    }

    #[test]
    fn matching_keyword_tests_true() {
        let mut rng = StdRng::seed_from_u64(1);
        let scheme = Scheme::new();
        let params = scheme.setup(&mut rng);
        let nodes = register_all(&scheme, &mut rng, &params, &["0", "1", "2", "3", "4"]);
        let refs: Vec<_> = nodes.iter().collect();
        let group = scheme.aggregate_group(&params, &refs).expect("group");
        assert_eq!(group.domain, "01234");

        let td = scheme.trapdoor(&group, &refs, "observe");
        for _ in 0..8 {
            let enc = scheme
                .encapsulate(&mut rng, &params, &group, "observe")
                .expect("encapsulate");
            assert!(scheme.test(&td, &enc).expect("test"));
        }
    }

    #[test]
    fn different_keyword_tests_false() {
        let mut rng = StdRng::seed_from_u64(2);
        let scheme = Scheme::new();
        let params = scheme.setup(&mut rng);
        let nodes = register_all(&scheme, &mut rng, &params, &["a", "b"]);
        let refs: Vec<_> = nodes.iter().collect();
        let group = scheme.aggregate_group(&params, &refs).expect("group");

        let td = scheme.trapdoor(&group, &refs, "observe");
        let enc = scheme
            .encapsulate(&mut rng, &params, &group, "patrol")
            .expect("encapsulate");
        assert!(!scheme.test(&td, &enc).expect("test"));
    }

    #[test]
    fn partial_member_set_never_matches() {
        let mut rng = StdRng::seed_from_u64(3);
        let scheme = Scheme::new();
        let params = scheme.setup(&mut rng);
        let nodes = register_all(&scheme, &mut rng, &params, &["a", "b", "c"]);
        let refs: Vec<_> = nodes.iter().collect();
        let group = scheme.aggregate_group(&params, &refs).expect("group");

        let td = scheme.trapdoor(&group, &refs[..2], "observe");
        let enc = scheme
            .encapsulate(&mut rng, &params, &group, "observe")
            .expect("encapsulate");
        assert!(!scheme.test(&td, &enc).expect("test"));
    }

    #[test]
    fn keyword_tag_must_agree() {
        let mut rng = StdRng::seed_from_u64(4);
        let scheme = Scheme::new();
        let other = Scheme::with_tags(DEFAULT_IDENTITY_TAG.as_bytes(), b"OTHER-H2");
        let params = scheme.setup(&mut rng);
        let nodes = register_all(&scheme, &mut rng, &params, &["a", "b"]);
        let refs: Vec<_> = nodes.iter().collect();
        let group = scheme.aggregate_group(&params, &refs).expect("group");

        let td = other.trapdoor(&group, &refs, "observe");
        let enc = scheme
            .encapsulate(&mut rng, &params, &group, "observe")
            .expect("encapsulate");
        assert!(!scheme.test(&td, &enc).expect("test"));
    }

    #[test]
    fn rejects_empty_inputs() {
        let mut rng = StdRng::seed_from_u64(5);
        let scheme = Scheme::new();
        let params = scheme.setup(&mut rng);
        assert!(matches!(
            scheme.register(&mut rng, &params, ""),
            Err(Error::MalformedInput(_))
        ));
        assert!(matches!(
            scheme.aggregate_group(&params, &[]),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn fingerprint_is_stable_and_not_the_key() {
        let mut rng = StdRng::seed_from_u64(6);
        let scheme = Scheme::new();
        let params = scheme.setup(&mut rng);
        let node = scheme.register(&mut rng, &params, "7").expect("register");
        assert_eq!(node.fingerprint(), node.fingerprint());
        assert_eq!(
            node.public_point,
            PairingEngine::hash_to_g1(b"7", DEFAULT_IDENTITY_TAG.as_bytes())
        );
        assert_eq!(
            node.private_key,
            node.public_point.mul_scalar(&params.master_secret)
        );
    }
}
