//! Favourite edges between users and cocktails.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::CocktailId;

/// Identifier of a user who bookmarks cocktails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct UserId(String);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A user's bookmark of a cocktail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FavouriteEdge {
    /// User owning the bookmark.
    pub user: UserId,
    /// Bookmarked cocktail.
    pub cocktail: CocktailId,
}

impl FavouriteEdge {
    /// Construct an edge.
    #[must_use]
    pub fn new(user: impl Into<UserId>, cocktail: impl Into<CocktailId>) -> Self {
        Self {
            user: user.into(),
            cocktail: cocktail.into(),
        }
    }
}

/// Set of favourite edges holding at most one edge per (user, cocktail).
///
/// # Examples
/// ```
/// use barback_core::{CocktailId, FavouriteEdge, FavouriteSet};
///
/// let mut favourites = FavouriteSet::new();
/// assert!(favourites.insert(FavouriteEdge::new("ada", "11007")));
/// assert!(!favourites.insert(FavouriteEdge::new("ada", "11007")));
/// assert!(favourites.insert(FavouriteEdge::new("bob", "11007")));
///
/// let counts = favourites.popularity_counts();
/// assert_eq!(counts.get(&CocktailId::new("11007")), Some(&2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavouriteSet {
    edges: BTreeSet<FavouriteEdge>,
}

impl FavouriteSet {
    /// Construct an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an edge, returning `false` when it was already present.
    pub fn insert(&mut self, edge: FavouriteEdge) -> bool {
        self.edges.insert(edge)
    }

    /// Remove an edge, returning `false` when it was absent.
    pub fn remove(&mut self, edge: &FavouriteEdge) -> bool {
        self.edges.remove(edge)
    }

    /// Report whether the edge exists.
    #[must_use]
    pub fn contains(&self, edge: &FavouriteEdge) -> bool {
        self.edges.contains(edge)
    }

    /// Number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Report whether the set holds no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate all edges ordered by user then cocktail.
    pub fn iter(&self) -> impl Iterator<Item = &FavouriteEdge> + '_ {
        self.edges.iter()
    }

    /// Iterate the cocktails bookmarked by `user`.
    pub fn cocktails_of<'a>(&'a self, user: &'a UserId) -> impl Iterator<Item = &'a CocktailId> {
        self.edges
            .iter()
            .filter(move |edge| &edge.user == user)
            .map(|edge| &edge.cocktail)
    }

    /// Count distinct users per bookmarked cocktail.
    ///
    /// Cocktails nobody bookmarked are absent from the map.
    #[must_use]
    pub fn popularity_counts(&self) -> HashMap<CocktailId, u32> {
        let mut counts: HashMap<CocktailId, u32> = HashMap::new();
        for edge in &self.edges {
            let count = counts.entry(edge.cocktail.clone()).or_default();
            *count = count.saturating_add(1);
        }
        counts
    }
}

impl FromIterator<FavouriteEdge> for FavouriteSet {
    fn from_iter<I: IntoIterator<Item = FavouriteEdge>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn favourites() -> FavouriteSet {
        [
            FavouriteEdge::new("ada", "1"),
            FavouriteEdge::new("ada", "2"),
            FavouriteEdge::new("bob", "1"),
        ]
        .into_iter()
        .collect()
    }

    #[rstest]
    fn duplicate_edges_collapse(mut favourites: FavouriteSet) {
        assert!(!favourites.insert(FavouriteEdge::new("bob", "1")));
        assert_eq!(favourites.len(), 3);
    }

    #[rstest]
    fn cocktails_of_filters_by_user(favourites: FavouriteSet) {
        let ada = UserId::new("ada");
        let ids: Vec<_> = favourites.cocktails_of(&ada).map(CocktailId::as_str).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[rstest]
    fn unknown_user_has_no_favourites(favourites: FavouriteSet) {
        let nobody = UserId::new("nobody");
        assert_eq!(favourites.cocktails_of(&nobody).count(), 0);
    }

    #[rstest]
    fn removing_edge_updates_counts(mut favourites: FavouriteSet) {
        assert!(favourites.remove(&FavouriteEdge::new("ada", "1")));
        assert!(!favourites.remove(&FavouriteEdge::new("ada", "1")));
        let counts = favourites.popularity_counts();
        assert_eq!(counts.get(&CocktailId::new("1")), Some(&1));
        assert_eq!(counts.get(&CocktailId::new("2")), Some(&1));
    }
}
