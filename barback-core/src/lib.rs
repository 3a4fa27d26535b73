//! Core domain types for the Barback engine.
//!
//! The crate models the cocktail catalogue, users' favourite edges and
//! place-level reviews. Constructors return `Result` where input can be
//! invalid, and [`Catalog`] recomputes derived counters whenever a snapshot
//! is read. Rankers consume snapshots through the [`CatalogStore`] trait.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod catalog;
mod cocktail;
mod favourite;
mod place;
mod review;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use catalog::{Catalog, CatalogEntry, CatalogError, NewReview};
pub use cocktail::{Cocktail, CocktailId, Ingredients, IngredientsError, MAX_INGREDIENT_SLOTS};
pub use favourite::{FavouriteEdge, FavouriteSet, UserId};
pub use place::{Place, PlaceId};
pub use review::{Rating, RatingError, Review, ReviewId};
pub use store::CatalogStore;

#[cfg(feature = "store-sqlite")]
pub use store::{CATALOG_SCHEMA, SqliteCatalogStore, SqliteCatalogStoreError};
