//! Global popularity ranking.

use barback_core::CatalogEntry;

/// Order entries by popularity, most favourited first.
///
/// The sort is stable: equally popular entries keep their input order.
/// Review counts are carried along but never used as a key.
///
/// # Examples
/// ```
/// use barback_core::{CatalogEntry, Cocktail, Ingredients};
/// use barback_scorer::rank_by_popularity;
///
/// let entry = |id: &str, popularity| CatalogEntry {
///     cocktail: Cocktail::new(id, id, Ingredients::default()),
///     popularity,
///     review_count: 0,
/// };
/// let ranked = rank_by_popularity([entry("a", 1), entry("b", 3), entry("c", 1)]);
/// let ids: Vec<_> = ranked.iter().map(|e| e.cocktail.id.as_str()).collect();
/// assert_eq!(ids, vec!["b", "a", "c"]);
/// ```
#[must_use]
pub fn rank_by_popularity<I>(entries: I) -> Vec<CatalogEntry>
where
    I: IntoIterator<Item = CatalogEntry>,
{
    let mut ranked: Vec<CatalogEntry> = entries.into_iter().collect();
    ranked.sort_by(|left, right| right.popularity.cmp(&left.popularity));
    ranked
}
