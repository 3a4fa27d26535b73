//! SQLite-backed catalogue store.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use geo::Coord;
use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

use crate::{
    Catalog, CatalogEntry, CatalogError, Cocktail, CocktailId, FavouriteEdge, Ingredients,
    IngredientsError, Place, PlaceId, Rating, RatingError, Review, ReviewId, UserId,
};

use super::CatalogStore;

/// Tables backing a persisted catalogue.
///
/// Every statement is idempotent so writers may run it against an existing
/// database before inserting rows.
pub const CATALOG_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS cocktails (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    thumbnail TEXT,
    category TEXT,
    alcoholic TEXT,
    glass TEXT,
    instructions TEXT,
    ingredients TEXT NOT NULL DEFAULT '[]'
);
CREATE TABLE IF NOT EXISTS favourites (
    user_id TEXT NOT NULL,
    cocktail_id TEXT NOT NULL REFERENCES cocktails(id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, cocktail_id)
) WITHOUT ROWID;
CREATE TABLE IF NOT EXISTS places (
    id INTEGER PRIMARY KEY,
    google_place_id TEXT NOT NULL UNIQUE,
    lon REAL,
    lat REAL
);
CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY,
    user_id TEXT NOT NULL,
    cocktail_id TEXT NOT NULL REFERENCES cocktails(id) ON DELETE CASCADE,
    place_id INTEGER NOT NULL REFERENCES places(id) ON DELETE CASCADE,
    rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
    comment TEXT
);
CREATE INDEX IF NOT EXISTS idx_reviews_cocktail ON reviews(cocktail_id, place_id);
";

/// Error raised when reading or validating a persisted catalogue.
#[derive(Debug, Error)]
pub enum SqliteCatalogStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// The stored ingredient payload was not valid JSON.
    #[error("failed to parse ingredients for cocktail {id}: {source}")]
    InvalidIngredients {
        /// Identifier of the cocktail whose ingredients failed to parse.
        id: CocktailId,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The stored ingredient payload held too many slots.
    #[error("cocktail {id} has invalid ingredient slots: {source}")]
    IngredientSlots {
        /// Identifier of the offending cocktail.
        id: CocktailId,
        /// Validation failure.
        #[source]
        source: IngredientsError,
    },
    /// A stored rating was outside the star range.
    #[error("review {id} has an invalid rating: {source}")]
    InvalidRating {
        /// Identifier of the offending review.
        id: i64,
        /// Validation failure.
        #[source]
        source: RatingError,
    },
    /// A stored row identifier could not be represented.
    #[error("{table} row id {id} is negative")]
    IdOutOfRange {
        /// Table holding the row.
        table: &'static str,
        /// Raw identifier.
        id: i64,
    },
    /// The rows violated catalogue invariants, e.g. a dangling reference.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Generic SQLite error when reading rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Read-only catalogue store loaded from SQLite into memory.
///
/// # Examples
/// ```no_run
/// use barback_core::{CatalogStore, SqliteCatalogStore};
///
/// # fn main() -> Result<(), barback_core::SqliteCatalogStoreError> {
/// let store = SqliteCatalogStore::open("catalog.db")?;
/// for entry in store.entries() {
///     println!("{} ({} favourites)", entry.cocktail.name, entry.popularity);
/// }
/// # Ok(())
/// # }
/// ```
pub struct SqliteCatalogStore {
    catalog: Catalog,
}

impl fmt::Debug for SqliteCatalogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCatalogStore")
            .field("cocktails", &self.catalog.len())
            .field("favourites", &self.catalog.favourites().len())
            .finish_non_exhaustive()
    }
}

impl SqliteCatalogStore {
    /// Open a store backed by the provided SQLite database.
    ///
    /// # Errors
    /// Returns [`SqliteCatalogStoreError`] when the file cannot be opened or a
    /// row fails validation.
    pub fn open<P: AsRef<Path>>(database_path: P) -> Result<Self, SqliteCatalogStoreError> {
        let database_path = database_path.as_ref();
        let connection =
            Connection::open_with_flags(database_path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
                |source| SqliteCatalogStoreError::OpenDatabase {
                    path: database_path.to_path_buf(),
                    source,
                },
            )?;

        let mut catalog = Catalog::new();
        load_cocktails(&connection, &mut catalog)?;
        load_favourites(&connection, &mut catalog)?;
        load_places(&connection, &mut catalog)?;
        load_reviews(&connection, &mut catalog)?;
        log::debug!(
            "loaded {} cocktails and {} favourite edges from {}",
            catalog.len(),
            catalog.favourites().len(),
            database_path.display()
        );

        Ok(Self { catalog })
    }

    /// Borrow the loaded snapshot.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Take ownership of the loaded snapshot.
    #[must_use]
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn entries(&self) -> Box<dyn Iterator<Item = CatalogEntry> + Send + '_> {
        CatalogStore::entries(&self.catalog)
    }

    fn cocktail(&self, id: &CocktailId) -> Option<Cocktail> {
        CatalogStore::cocktail(&self.catalog, id)
    }

    fn favourites_of(&self, user: &UserId) -> Box<dyn Iterator<Item = Cocktail> + Send + '_> {
        CatalogStore::favourites_of(&self.catalog, user)
    }

    fn reviews(&self) -> Box<dyn Iterator<Item = Review> + Send + '_> {
        CatalogStore::reviews(&self.catalog)
    }

    fn place(&self, id: PlaceId) -> Option<Place> {
        CatalogStore::place(&self.catalog, id)
    }
}

fn load_cocktails(
    connection: &Connection,
    catalog: &mut Catalog,
) -> Result<(), SqliteCatalogStoreError> {
    let mut statement = connection.prepare(
        "SELECT id, name, thumbnail, category, alcoholic, glass, instructions, ingredients
         FROM cocktails ORDER BY rowid",
    )?;
    let mut rows = statement.query([])?;
    while let Some(row) = rows.next()? {
        let id = CocktailId::new(row.get::<_, String>(0)?);
        let ingredients_json: String = row.get(7)?;
        let slots: Vec<Option<String>> =
            serde_json::from_str(&ingredients_json).map_err(|source| {
                SqliteCatalogStoreError::InvalidIngredients {
                    id: id.clone(),
                    source,
                }
            })?;
        let ingredients = Ingredients::from_slots(slots).map_err(|source| {
            SqliteCatalogStoreError::IngredientSlots {
                id: id.clone(),
                source,
            }
        })?;
        catalog.upsert_cocktail(Cocktail {
            id,
            name: row.get(1)?,
            thumbnail: row.get(2)?,
            category: row.get(3)?,
            alcoholic: row.get(4)?,
            glass: row.get(5)?,
            instructions: row.get(6)?,
            ingredients,
        });
    }
    Ok(())
}

fn load_favourites(
    connection: &Connection,
    catalog: &mut Catalog,
) -> Result<(), SqliteCatalogStoreError> {
    let mut statement = connection.prepare("SELECT user_id, cocktail_id FROM favourites")?;
    let mut rows = statement.query([])?;
    while let Some(row) = rows.next()? {
        let user: String = row.get(0)?;
        let cocktail: String = row.get(1)?;
        catalog.add_favourite(FavouriteEdge::new(user, cocktail))?;
    }
    Ok(())
}

fn load_places(
    connection: &Connection,
    catalog: &mut Catalog,
) -> Result<(), SqliteCatalogStoreError> {
    let mut statement =
        connection.prepare("SELECT id, google_place_id, lon, lat FROM places ORDER BY id")?;
    let mut rows = statement.query([])?;
    while let Some(row) = rows.next()? {
        let id = row_id("places", row.get(0)?)?;
        let external_id: String = row.get(1)?;
        let lon: Option<f64> = row.get(2)?;
        let lat: Option<f64> = row.get(3)?;
        let mut place = Place::new(PlaceId::new(id), external_id);
        if let (Some(x), Some(y)) = (lon, lat) {
            place = place.with_location(Coord { x, y });
        }
        catalog.insert_place(place)?;
    }
    Ok(())
}

fn load_reviews(
    connection: &Connection,
    catalog: &mut Catalog,
) -> Result<(), SqliteCatalogStoreError> {
    let mut statement = connection.prepare(
        "SELECT id, user_id, cocktail_id, place_id, rating, comment FROM reviews ORDER BY id",
    )?;
    let mut rows = statement.query([])?;
    while let Some(row) = rows.next()? {
        let raw_id: i64 = row.get(0)?;
        let raw_rating: u8 = row.get(4)?;
        let rating = Rating::new(raw_rating)
            .map_err(|source| SqliteCatalogStoreError::InvalidRating { id: raw_id, source })?;
        catalog.insert_review(Review {
            id: ReviewId::new(row_id("reviews", raw_id)?),
            user: UserId::new(row.get::<_, String>(1)?),
            cocktail: CocktailId::new(row.get::<_, String>(2)?),
            place: PlaceId::new(row_id("places", row.get(3)?)?),
            rating,
            comment: row.get(5)?,
        })?;
    }
    Ok(())
}

fn row_id(table: &'static str, id: i64) -> Result<u64, SqliteCatalogStoreError> {
    u64::try_from(id).map_err(|_| SqliteCatalogStoreError::IdOutOfRange { table, id })
}
