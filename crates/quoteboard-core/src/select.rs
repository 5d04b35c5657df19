//! # Random Pick
//!
//! Uniform selection over the quotes that pass a [`CategoryFilter`].
//! The RNG is supplied by the caller; nothing here needs to be
//! cryptographically strong.

use rand::Rng;

use crate::types::{CategoryFilter, Collection, Quote};

/// Picks one quote uniformly at random among those matching `filter`.
///
/// Returns `None` when no quote matches.
pub fn pick_random<'a, R>(
    collection: &'a Collection,
    filter: &CategoryFilter,
    rng: &mut R,
) -> Option<&'a Quote>
where
    R: Rng + ?Sized,
{
    let candidates = collection.filtered(filter);
    if candidates.is_empty() {
        return None;
    }
    let index = rng.random_range(0..candidates.len());
    Some(candidates[index])
}
