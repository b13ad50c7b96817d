use std::{
    collections::HashMap,
    time::{SystemTime, UNIX_EPOCH},
};

use rand_core::RngCore;

/// Unix seconds followed by a random non-negative 31-bit number, both in decimal.
pub(crate) fn unique_id<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("{secs}{}", rng.next_u32() >> 1)
}

/// `prefix` + [`unique_id`], redrawn until it is not a key of `taken`.
pub(crate) fn fresh_id<R, V>(rng: &mut R, prefix: &str, taken: &HashMap<String, V>) -> String
where
    R: RngCore + ?Sized,
{
    loop {
        let id = format!("{prefix}{}", unique_id(rng));
        if !taken.contains_key(&id) {
            return id;
        }
    }
}
