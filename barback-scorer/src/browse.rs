//! Catalogue browsing: free-text filtering and ordering.

use std::collections::HashSet;

use barback_core::{CatalogEntry, CatalogStore, Cocktail, CocktailId, UserId};

/// Sort key applied by [`CatalogQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum BrowseOrder {
    /// Name ascending, ignoring case.
    #[default]
    Name,
    /// Most favourited first.
    Popularity,
    /// Most reviewed first.
    Reviews,
}

/// Filter and ordering applied to a catalogue snapshot.
///
/// # Examples
/// ```
/// use barback_core::{Catalog, Cocktail, Ingredients};
/// use barback_scorer::{BrowseOrder, CatalogQuery};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut catalog = Catalog::new();
/// catalog.upsert_cocktail(Cocktail::new("1", "Mojito", Ingredients::from_names(["White rum", "Mint"])?));
/// catalog.upsert_cocktail(Cocktail::new("2", "Daiquiri", Ingredients::from_names(["White rum", "Lime"])?));
/// catalog.upsert_cocktail(Cocktail::new("3", "Martini", Ingredients::from_names(["Gin"])?));
///
/// let found = CatalogQuery::new().matching("RUM").ordered_by(BrowseOrder::Name).run(&catalog);
/// let names: Vec<_> = found.iter().map(|e| e.cocktail.name.as_str()).collect();
/// assert_eq!(names, vec!["Daiquiri", "Mojito"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    text: Option<String>,
    favourites_of: Option<UserId>,
    order: BrowseOrder,
}

impl CatalogQuery {
    /// Match every entry, ordered by name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep entries whose name, category, glass or any ingredient contains
    /// `text`, ignoring case. Blank text matches everything.
    #[must_use]
    pub fn matching(mut self, text: impl Into<String>) -> Self {
        let needle = text.into().trim().to_lowercase();
        self.text = (!needle.is_empty()).then_some(needle);
        self
    }

    /// Keep only cocktails bookmarked by `user`.
    #[must_use]
    pub fn favourites_of(mut self, user: UserId) -> Self {
        self.favourites_of = Some(user);
        self
    }

    /// Choose the sort key.
    #[must_use]
    pub const fn ordered_by(mut self, order: BrowseOrder) -> Self {
        self.order = order;
        self
    }

    /// Apply the query to a snapshot.
    #[must_use]
    pub fn run<S>(&self, store: &S) -> Vec<CatalogEntry>
    where
        S: CatalogStore + ?Sized,
    {
        let allowed: Option<HashSet<CocktailId>> = self
            .favourites_of
            .as_ref()
            .map(|user| store.favourites_of(user).map(|cocktail| cocktail.id).collect());

        let mut found: Vec<CatalogEntry> = store
            .entries()
            .filter(|entry| {
                allowed
                    .as_ref()
                    .is_none_or(|ids| ids.contains(&entry.cocktail.id))
            })
            .filter(|entry| {
                self.text
                    .as_deref()
                    .is_none_or(|needle| mentions(&entry.cocktail, needle))
            })
            .collect();

        match self.order {
            BrowseOrder::Name => {
                found.sort_by_cached_key(|entry| entry.cocktail.name.to_lowercase());
            }
            BrowseOrder::Popularity => {
                found.sort_by(|left, right| right.popularity.cmp(&left.popularity));
            }
            BrowseOrder::Reviews => {
                found.sort_by(|left, right| right.review_count.cmp(&left.review_count));
            }
        }
        found
    }
}

fn mentions(cocktail: &Cocktail, needle: &str) -> bool {
    let contains = |value: &str| value.to_lowercase().contains(needle);
    contains(&cocktail.name)
        || cocktail.category.as_deref().is_some_and(contains)
        || cocktail.glass.as_deref().is_some_and(contains)
        || cocktail.ingredients.present().any(contains)
}
