//! SQLite persistence for imported cocktails, favourites and reviews.
//!
//! Every writer opens the database, applies [`CATALOG_SCHEMA`] and performs
//! its work inside a single transaction, so the file read by
//! [`barback_core::SqliteCatalogStore`] is never left half written.

use barback_core::{
    CATALOG_SCHEMA, Cocktail, CocktailId, FavouriteEdge, NewReview, Rating, ReviewId, UserId,
};
use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use rusqlite::{Connection, Error as SqliteError, OptionalExtension, Transaction};
use thiserror::Error;

/// Errors raised when writing the catalogue database.
#[derive(Debug, Error)]
pub enum PersistCatalogError {
    /// Failed to create the parent directory for the database file.
    #[error("failed to create parent directory for {path}")]
    CreateDirectory {
        /// Database path whose parent could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}")]
    Open {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Enabling SQLite foreign keys failed.
    #[error("failed to enable SQLite foreign keys")]
    ForeignKeys {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Creating the catalogue tables failed.
    #[error("failed to create catalogue schema")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Serialising a cocktail's ingredient slots failed.
    #[error("failed to serialise ingredients for cocktail {id}")]
    SerializeIngredients {
        /// Cocktail whose ingredients failed to serialise.
        id: CocktailId,
        /// Source error produced by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// A favourite or review referenced a cocktail that is not stored.
    #[error("cocktail {id} is not in the catalogue")]
    UnknownCocktail {
        /// Identifier that failed to resolve.
        id: CocktailId,
    },
    /// The referenced review is not stored.
    #[error("review {id} does not exist")]
    UnknownReview {
        /// Identifier that failed to resolve.
        id: ReviewId,
    },
    /// A user tried to change a review somebody else wrote.
    #[error("review {id} was not written by {user}")]
    NotReviewAuthor {
        /// Review being changed.
        id: ReviewId,
        /// User attempting the change.
        user: UserId,
    },
    /// SQLite produced a row identifier that does not fit the domain type.
    #[error("{table} row id {id} is out of range")]
    IdOutOfRange {
        /// Table that produced the identifier.
        table: &'static str,
        /// Offending row identifier.
        id: i64,
    },
    /// A statement failed.
    #[error("SQLite operation failed: {operation}")]
    Sqlite {
        /// Operation being performed.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}

/// Upsert cocktails into the catalogue database at `path`.
///
/// Parent directories and tables are created when missing. Re-importing an
/// existing identifier updates its row in place, so catalogue order and any
/// favourites or reviews pointing at it survive. Returns the number of
/// cocktails written.
///
/// # Errors
/// Returns [`PersistCatalogError`] when the file cannot be prepared or any
/// row fails to persist; the transaction is rolled back in that case.
pub fn persist_catalog_to_sqlite(
    path: &Utf8Path,
    cocktails: &[Cocktail],
) -> Result<usize, PersistCatalogError> {
    let mut connection = open_catalog(path)?;
    let transaction = begin(&mut connection)?;
    {
        let mut statement = transaction
            .prepare(
                "INSERT INTO cocktails
                    (id, name, thumbnail, category, alcoholic, glass, instructions, ingredients)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    thumbnail = excluded.thumbnail,
                    category = excluded.category,
                    alcoholic = excluded.alcoholic,
                    glass = excluded.glass,
                    instructions = excluded.instructions,
                    ingredients = excluded.ingredients",
            )
            .map_err(|source| PersistCatalogError::Sqlite {
                operation: "prepare cocktail upsert",
                source,
            })?;

        for cocktail in cocktails {
            let ingredients =
                serde_json::to_string(cocktail.ingredients.slots()).map_err(|source| {
                    PersistCatalogError::SerializeIngredients {
                        id: cocktail.id.clone(),
                        source,
                    }
                })?;
            statement
                .execute((
                    cocktail.id.as_str(),
                    cocktail.name.as_str(),
                    cocktail.thumbnail.as_deref(),
                    cocktail.category.as_deref(),
                    cocktail.alcoholic.as_deref(),
                    cocktail.glass.as_deref(),
                    cocktail.instructions.as_deref(),
                    ingredients,
                ))
                .map_err(|source| PersistCatalogError::Sqlite {
                    operation: "upsert cocktail",
                    source,
                })?;
        }
    }
    commit(transaction)?;
    log::info!("persisted {} cocktails to {path}", cocktails.len());
    Ok(cocktails.len())
}

/// Record that a user bookmarked a cocktail.
///
/// Returns `true` when the edge is new and `false` when it was already
/// stored.
///
/// # Errors
/// Returns [`PersistCatalogError::UnknownCocktail`] when the cocktail is not
/// in the catalogue, or a database error.
pub fn add_favourite(path: &Utf8Path, edge: &FavouriteEdge) -> Result<bool, PersistCatalogError> {
    let mut connection = open_catalog(path)?;
    let transaction = begin(&mut connection)?;
    require_cocktail(&transaction, &edge.cocktail)?;
    let inserted = transaction
        .execute(
            "INSERT OR IGNORE INTO favourites (user_id, cocktail_id) VALUES (?1, ?2)",
            (edge.user.as_str(), edge.cocktail.as_str()),
        )
        .map_err(|source| PersistCatalogError::Sqlite {
            operation: "insert favourite",
            source,
        })?;
    commit(transaction)?;
    Ok(inserted > 0)
}

/// Remove a bookmark. Returns `true` when an edge was deleted.
///
/// # Errors
/// Returns a database error when the file cannot be opened or written.
pub fn remove_favourite(
    path: &Utf8Path,
    edge: &FavouriteEdge,
) -> Result<bool, PersistCatalogError> {
    let connection = open_catalog(path)?;
    let removed = connection
        .execute(
            "DELETE FROM favourites WHERE user_id = ?1 AND cocktail_id = ?2",
            (edge.user.as_str(), edge.cocktail.as_str()),
        )
        .map_err(|source| PersistCatalogError::Sqlite {
            operation: "delete favourite",
            source,
        })?;
    Ok(removed > 0)
}

/// Store a review, creating its place on first sight.
///
/// Places are keyed by their external identifier. A location is recorded
/// the first time one is supplied and is never overwritten afterwards.
/// Non-finite coordinates are ignored.
///
/// # Errors
/// Returns [`PersistCatalogError::UnknownCocktail`] when the reviewed
/// cocktail is not in the catalogue, or a database error.
pub fn add_review(path: &Utf8Path, review: &NewReview) -> Result<ReviewId, PersistCatalogError> {
    let mut connection = open_catalog(path)?;
    let transaction = begin(&mut connection)?;
    require_cocktail(&transaction, &review.cocktail)?;

    let location = review
        .location
        .filter(|coord| coord.x.is_finite() && coord.y.is_finite());
    let place_id = find_or_create_place(&transaction, &review.place_external_id, location)?;

    transaction
        .execute(
            "INSERT INTO reviews (user_id, cocktail_id, place_id, rating, comment)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                review.user.as_str(),
                review.cocktail.as_str(),
                place_id,
                review.rating.get(),
                review.comment.as_deref(),
            ),
        )
        .map_err(|source| PersistCatalogError::Sqlite {
            operation: "insert review",
            source,
        })?;
    let row_id = transaction.last_insert_rowid();
    commit(transaction)?;

    let id = u64::try_from(row_id).map_err(|_| PersistCatalogError::IdOutOfRange {
        table: "reviews",
        id: row_id,
    })?;
    log::debug!(
        "stored review {id} of {} at {}",
        review.cocktail,
        review.place_external_id
    );
    Ok(ReviewId::new(id))
}

/// Change the rating and/or comment of a review written by `user`.
///
/// A blank comment leaves the stored comment unchanged.
///
/// # Errors
/// Returns [`PersistCatalogError::UnknownReview`] when no review has `id`,
/// [`PersistCatalogError::NotReviewAuthor`] when `user` did not write it, or
/// a database error.
pub fn update_review(
    path: &Utf8Path,
    id: ReviewId,
    user: &UserId,
    rating: Option<Rating>,
    comment: Option<&str>,
) -> Result<(), PersistCatalogError> {
    let mut connection = open_catalog(path)?;
    let transaction = begin(&mut connection)?;
    let row_id = require_author(&transaction, id, user)?;
    transaction
        .execute(
            "UPDATE reviews SET
                rating = COALESCE(?1, rating),
                comment = COALESCE(?2, comment)
             WHERE id = ?3",
            (
                rating.map(Rating::get),
                comment.filter(|text| !text.trim().is_empty()),
                row_id,
            ),
        )
        .map_err(|source| PersistCatalogError::Sqlite {
            operation: "update review",
            source,
        })?;
    commit(transaction)?;
    log::debug!("updated review {id} for {user}");
    Ok(())
}

/// Delete a review written by `user`.
///
/// # Errors
/// Returns [`PersistCatalogError::UnknownReview`] when no review has `id`,
/// [`PersistCatalogError::NotReviewAuthor`] when `user` did not write it, or
/// a database error.
pub fn remove_review(
    path: &Utf8Path,
    id: ReviewId,
    user: &UserId,
) -> Result<(), PersistCatalogError> {
    let mut connection = open_catalog(path)?;
    let transaction = begin(&mut connection)?;
    let row_id = require_author(&transaction, id, user)?;
    transaction
        .execute("DELETE FROM reviews WHERE id = ?1", [row_id])
        .map_err(|source| PersistCatalogError::Sqlite {
            operation: "delete review",
            source,
        })?;
    commit(transaction)?;
    log::debug!("removed review {id} for {user}");
    Ok(())
}

fn open_catalog(path: &Utf8Path) -> Result<Connection, PersistCatalogError> {
    barback_fs::ensure_parent_dir(path).map_err(|source| PersistCatalogError::CreateDirectory {
        path: path.to_path_buf(),
        source,
    })?;
    let connection =
        Connection::open(path.as_std_path()).map_err(|source| PersistCatalogError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    connection
        .pragma_update(None, "foreign_keys", true)
        .map_err(|source| PersistCatalogError::ForeignKeys { source })?;
    connection
        .execute_batch(CATALOG_SCHEMA)
        .map_err(|source| PersistCatalogError::CreateSchema { source })?;
    Ok(connection)
}

fn begin(connection: &mut Connection) -> Result<Transaction<'_>, PersistCatalogError> {
    connection
        .transaction()
        .map_err(|source| PersistCatalogError::Sqlite {
            operation: "begin transaction",
            source,
        })
}

fn commit(transaction: Transaction<'_>) -> Result<(), PersistCatalogError> {
    transaction
        .commit()
        .map_err(|source| PersistCatalogError::Sqlite {
            operation: "commit transaction",
            source,
        })
}

fn require_cocktail(
    transaction: &Transaction<'_>,
    id: &CocktailId,
) -> Result<(), PersistCatalogError> {
    let exists: bool = transaction
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM cocktails WHERE id = ?1)",
            [id.as_str()],
            |row| row.get(0),
        )
        .map_err(|source| PersistCatalogError::Sqlite {
            operation: "look up cocktail",
            source,
        })?;
    if exists {
        Ok(())
    } else {
        Err(PersistCatalogError::UnknownCocktail { id: id.clone() })
    }
}

fn require_author(
    transaction: &Transaction<'_>,
    id: ReviewId,
    user: &UserId,
) -> Result<i64, PersistCatalogError> {
    let unknown = || PersistCatalogError::UnknownReview { id };
    let row_id = i64::try_from(id.get()).map_err(|_| unknown())?;
    let author: Option<String> = transaction
        .query_row(
            "SELECT user_id FROM reviews WHERE id = ?1",
            [row_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|source| PersistCatalogError::Sqlite {
            operation: "look up review",
            source,
        })?;
    match author {
        None => Err(unknown()),
        Some(author) if author == user.as_str() => Ok(row_id),
        Some(_) => Err(PersistCatalogError::NotReviewAuthor {
            id,
            user: user.clone(),
        }),
    }
}

fn find_or_create_place(
    transaction: &Transaction<'_>,
    external_id: &str,
    location: Option<Coord<f64>>,
) -> Result<i64, PersistCatalogError> {
    let existing: Option<(i64, bool)> = transaction
        .query_row(
            "SELECT id, lon IS NOT NULL AND lat IS NOT NULL FROM places WHERE google_place_id = ?1",
            [external_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()
        .map_err(|source| PersistCatalogError::Sqlite {
            operation: "look up place",
            source,
        })?;

    match (existing, location) {
        (Some((id, false)), Some(coord)) => {
            transaction
                .execute(
                    "UPDATE places SET lon = ?1, lat = ?2 WHERE id = ?3",
                    (coord.x, coord.y, id),
                )
                .map_err(|source| PersistCatalogError::Sqlite {
                    operation: "locate place",
                    source,
                })?;
            Ok(id)
        }
        (Some((id, _)), _) => Ok(id),
        (None, _) => {
            transaction
                .execute(
                    "INSERT INTO places (google_place_id, lon, lat) VALUES (?1, ?2, ?3)",
                    (
                        external_id,
                        location.map(|coord| coord.x),
                        location.map(|coord| coord.y),
                    ),
                )
                .map_err(|source| PersistCatalogError::Sqlite {
                    operation: "insert place",
                    source,
                })?;
            Ok(transaction.last_insert_rowid())
        }
    }
}
