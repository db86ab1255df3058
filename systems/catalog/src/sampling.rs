//! Random helpers used by procedural levels.

use rand::{seq::index, seq::SliceRandom, Rng};

use crate::CatalogError;

/// Picks `k` distinct elements without replacement, in random order.
///
/// Fails with [`CatalogError::SampleTooLarge`] when `k` exceeds the number of
/// elements available.
pub fn choose_n<T, R>(items: &[T], k: usize, rng: &mut R) -> Result<Vec<T>, CatalogError>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if k > items.len() {
        return Err(CatalogError::SampleTooLarge {
            requested: k,
            available: items.len(),
        });
    }
    Ok(index::sample(rng, items.len(), k)
        .into_iter()
        .map(|position| items[position].clone())
        .collect())
}

/// Shuffles the slice in place.
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    items.shuffle(rng);
}
