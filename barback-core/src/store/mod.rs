//! Data access traits for catalogue snapshots.
//!
//! The `CatalogStore` trait defines a read-only interface over cocktails,
//! favourite edges, places and reviews. Rankers consume it without knowing
//! whether the data lives in memory or in a SQLite file.

use crate::{Catalog, CatalogEntry, Cocktail, CocktailId, Place, PlaceId, Review, UserId};

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{CATALOG_SCHEMA, SqliteCatalogStore, SqliteCatalogStoreError};

/// Read-only access to a catalogue snapshot.
///
/// Entries are yielded in catalogue order with popularity and review counts
/// derived from the snapshot's edges.
///
/// # Examples
///
/// ```rust
/// use barback_core::{Catalog, CatalogStore, Cocktail, FavouriteEdge, Ingredients, UserId};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut catalog = Catalog::new();
/// catalog.upsert_cocktail(Cocktail::new("1", "Gimlet", Ingredients::from_names(["Gin"])?));
/// catalog.add_favourite(FavouriteEdge::new("ada", "1"))?;
///
/// let store: &dyn CatalogStore = &catalog;
/// let favourites: Vec<_> = store.favourites_of(&UserId::new("ada")).collect();
/// assert_eq!(favourites.len(), 1);
/// assert_eq!(store.entries().count(), 1);
/// # Ok(())
/// # }
/// ```
pub trait CatalogStore {
    /// Return every cocktail with its derived counters.
    fn entries(&self) -> Box<dyn Iterator<Item = CatalogEntry> + Send + '_>;

    /// Look up a single cocktail.
    fn cocktail(&self, id: &CocktailId) -> Option<Cocktail>;

    /// Return the cocktails bookmarked by `user`.
    ///
    /// Unknown users yield an empty iterator.
    fn favourites_of(&self, user: &UserId) -> Box<dyn Iterator<Item = Cocktail> + Send + '_>;

    /// Return every review ordered by identifier.
    fn reviews(&self) -> Box<dyn Iterator<Item = Review> + Send + '_>;

    /// Look up a place.
    fn place(&self, id: PlaceId) -> Option<Place>;
}

impl CatalogStore for Catalog {
    fn entries(&self) -> Box<dyn Iterator<Item = CatalogEntry> + Send + '_> {
        Box::new(Self::entries(self).into_iter())
    }

    fn cocktail(&self, id: &CocktailId) -> Option<Cocktail> {
        Self::cocktail(self, id).cloned()
    }

    fn favourites_of(&self, user: &UserId) -> Box<dyn Iterator<Item = Cocktail> + Send + '_> {
        let ids: Vec<CocktailId> = self.favourites().cocktails_of(user).cloned().collect();
        Box::new(
            ids.into_iter()
                .filter_map(move |id| Self::cocktail(self, &id).cloned()),
        )
    }

    fn reviews(&self) -> Box<dyn Iterator<Item = Review> + Send + '_> {
        Box::new(Self::reviews(self).cloned())
    }

    fn place(&self, id: PlaceId) -> Option<Place> {
        Self::place(self, id).cloned()
    }
}
