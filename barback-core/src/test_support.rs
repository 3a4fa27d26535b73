//! Fixtures shared by unit and behaviour tests.

use crate::{Catalog, Cocktail, FavouriteEdge, Ingredients, MAX_INGREDIENT_SLOTS};

/// Build a cocktail named after its identifier with the given ingredients.
///
/// Names beyond the slot limit are dropped.
#[must_use]
pub fn cocktail(id: &str, ingredients: &[&str]) -> Cocktail {
    let names = ingredients.iter().take(MAX_INGREDIENT_SLOTS).copied();
    Cocktail::new(
        id,
        format!("Cocktail {id}"),
        Ingredients::from_names(names).unwrap_or_default(),
    )
}

/// Build a catalogue from cocktails and favourite edges.
///
/// Edges referencing unknown cocktails are ignored.
#[must_use]
pub fn catalog_with(cocktails: Vec<Cocktail>, favourites: &[FavouriteEdge]) -> Catalog {
    let mut catalog = Catalog::new();
    for item in cocktails {
        catalog.upsert_cocktail(item);
    }
    for edge in favourites {
        let _ignored = catalog.add_favourite(edge.clone());
    }
    catalog
}

/// Persist a catalogue snapshot into a fresh SQLite database.
///
/// # Errors
/// Returns the underlying `rusqlite` error when the file cannot be written.
#[cfg(feature = "store-sqlite")]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub fn write_sqlite_catalog(
    path: &std::path::Path,
    catalog: &Catalog,
) -> Result<(), rusqlite::Error> {
    let mut connection = rusqlite::Connection::open(path)?;
    connection.execute_batch(crate::store::CATALOG_SCHEMA)?;
    let transaction = connection.transaction()?;
    {
        let mut insert_cocktail = transaction.prepare(
            "INSERT INTO cocktails
                (id, name, thumbnail, category, alcoholic, glass, instructions, ingredients)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for item in catalog.cocktails() {
            let ingredients = serde_json::to_string(item.ingredients.slots())
                .map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))?;
            insert_cocktail.execute((
                item.id.as_str(),
                item.name.as_str(),
                item.thumbnail.as_deref(),
                item.category.as_deref(),
                item.alcoholic.as_deref(),
                item.glass.as_deref(),
                item.instructions.as_deref(),
                ingredients,
            ))?;
        }

        let mut insert_favourite =
            transaction.prepare("INSERT INTO favourites (user_id, cocktail_id) VALUES (?1, ?2)")?;
        for edge in catalog.favourites().iter() {
            insert_favourite.execute((edge.user.as_str(), edge.cocktail.as_str()))?;
        }

        let mut insert_place = transaction
            .prepare("INSERT INTO places (id, google_place_id, lon, lat) VALUES (?1, ?2, ?3, ?4)")?;
        for place in catalog.places() {
            insert_place.execute((
                place.id.get(),
                place.external_id.as_str(),
                place.location.map(|c| c.x),
                place.location.map(|c| c.y),
            ))?;
        }

        let mut insert_review = transaction.prepare(
            "INSERT INTO reviews (id, user_id, cocktail_id, place_id, rating, comment)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for review in catalog.reviews() {
            insert_review.execute((
                review.id.get(),
                review.user.as_str(),
                review.cocktail.as_str(),
                review.place.get(),
                review.rating.get(),
                review.comment.as_deref(),
            ))?;
        }
    }
    transaction.commit()
}
