use core::fmt;

use rand_core::RngCore;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{instrument, trace};

use crate::{
    errors::Error,
    hash::fingerprint_g1,
    CurvePoint, FieldElement, PairingBackend, SystemParameters,
};

/// Identity-derived key material for one node.
///
/// # Fields
///
/// - `node_id`: the identity string the keys are bound to
/// - `public_point`: `qi = H1(node_id)` in G1
/// - `private_key`: `si = s·qi`, derivable only with the master secret
/// - `blinding`: nonzero scalar `xi` used when the node joins a group
///
/// Only `node_id` and `public_point` are visible outside the crate.
pub struct NodeKeyMaterial<B: PairingBackend> {
    pub node_id: String,
    pub public_point: B::G1,
    pub(crate) private_key: B::G1,
    pub(crate) blinding: B::Scalar,
}

impl<B: PairingBackend> NodeKeyMaterial<B> {
    #[instrument(level = "trace", skip_all, fields(node_id = %node_id))]
    pub(crate) fn derive<R: RngCore + ?Sized>(
        rng: &mut R,
        params: &SystemParameters<B>,
        node_id: &str,
        identity_tag: &[u8],
    ) -> Self {
        let public_point = B::hash_to_g1(node_id.as_bytes(), identity_tag);
        let private_key = public_point.mul_scalar(&params.master_secret);
        let blinding = B::Scalar::random_nonzero(rng);
        Self {
            node_id: node_id.to_owned(),
            public_point,
            private_key,
            blinding,
        }
    }

    /// One-way digest of the private key. Safe to hand out; it does not
    /// allow recovering `si`.
    pub fn fingerprint(&self) -> B::Scalar {
        fingerprint_g1::<B>(&self.private_key)
    }

    /// Partial trapdoor `wi = si + xi·h` for a keyword point `h`.
    pub(crate) fn partial_trapdoor(&self, keyword_point: &B::G1) -> B::G1 {
        self.private_key.add(&keyword_point.mul_scalar(&self.blinding))
    }
}

impl<B: PairingBackend> fmt::Debug for NodeKeyMaterial<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeKeyMaterial")
            .field("node_id", &self.node_id)
            .field("public_point", &self.public_point)
            .finish_non_exhaustive()
    }
}

/// Concatenates member ids in order, without separators, into the group
/// domain string (GID) fed into H2.
///
/// ```rust
/// use edgematch::scheme::group_domain;
///
/// assert_eq!(group_domain(&["0", "1", "2"]), "012");
/// assert_ne!(group_domain(&["ab", "c"]), group_domain(&["c", "ab"]));
/// ```
pub fn group_domain<S: AsRef<str>>(members: &[S]) -> String {
    let mut domain = String::with_capacity(members.iter().map(|m| m.as_ref().len()).sum());
    for member in members {
        domain.push_str(member.as_ref());
    }
    domain
}

/// Aggregated public key of a group.
///
/// # Fields
///
/// - `members`: member ids in the canonical order fixed at creation
/// - `domain`: the GID, i.e. `members` concatenated in that order
/// - `aggregate_r`: `R = Σ xi·P`
/// - `aggregate_phi`: `Φ = e(Σ qi, Ppub)`
#[derive(Debug)]
pub struct GroupKey<B: PairingBackend> {
    pub members: Vec<String>,
    pub domain: String,
    pub aggregate_r: B::G2,
    pub aggregate_phi: B::Target,
}

impl<B: PairingBackend> Clone for GroupKey<B> {
    fn clone(&self) -> Self {
        Self {
            members: self.members.clone(),
            domain: self.domain.clone(),
            aggregate_r: self.aggregate_r,
            aggregate_phi: self.aggregate_phi.clone(),
        }
    }
}

impl<B: PairingBackend> GroupKey<B> {
    #[instrument(level = "info", skip_all, fields(num_members = members.len()))]
    pub(crate) fn aggregate(
        params: &SystemParameters<B>,
        members: &[&NodeKeyMaterial<B>],
    ) -> Result<GroupKey<B>, Error> {
        if members.is_empty() {
            return Err(Error::InvalidConfig(
                "cannot aggregate an empty member set".into(),
            ));
        }

        let aggregate_r = members
            .par_iter()
            .map(|node| params.generator.mul_scalar(&node.blinding))
            .reduce(B::G2::identity, |acc, ri| acc.add(&ri));

        let mut q_sum = B::G1::identity();
        for node in members {
            q_sum = q_sum.add(&node.public_point);
        }
        let aggregate_phi = B::pairing(&q_sum, &params.master_public);

        let ids: Vec<String> = members.iter().map(|node| node.node_id.clone()).collect();
        let domain = group_domain(&ids);
        trace!(domain_len = domain.len(), "group key aggregated");

        Ok(GroupKey {
            members: ids,
            domain,
            aggregate_r,
            aggregate_phi,
        })
    }

    /// H2 input: the group domain followed directly by the keyword.
    pub(crate) fn keyword_message(&self, keyword: &str) -> Vec<u8> {
        let mut message = Vec::with_capacity(self.domain.len() + keyword.len());
        message.extend_from_slice(self.domain.as_bytes());
        message.extend_from_slice(keyword.as_bytes());
        message
    }
}
