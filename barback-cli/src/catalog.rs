//! Shared resolution of catalogue paths and coordinates.

use barback_core::{Place, SqliteCatalogStore};
use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;

use crate::{ARG_CATALOG_DB, ARG_LAT, ARG_LNG, CliError, DEFAULT_CATALOG_DB};

/// Resolve `--catalog-db`, falling back to `barback.db` in the working
/// directory.
pub(crate) fn catalog_db_or_default(path: Option<Utf8PathBuf>) -> Utf8PathBuf {
    path.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CATALOG_DB))
}

pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match barback_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Open the catalogue snapshot, insisting the database already exists so a
/// typo never yields an empty catalogue.
pub(crate) fn open_catalog(path: &Utf8Path) -> Result<SqliteCatalogStore, CliError> {
    require_existing(path, ARG_CATALOG_DB)?;
    Ok(SqliteCatalogStore::open(path.as_std_path())?)
}

/// Find a stored place by its external identifier.
pub(crate) fn resolve_place(store: &SqliteCatalogStore, external_id: &str) -> Result<Place, CliError> {
    store
        .catalog()
        .place_by_external(external_id)
        .cloned()
        .ok_or_else(|| CliError::UnknownPlace {
            external_id: external_id.to_owned(),
        })
}

fn checked(field: &'static str, value: f64, bound: f64) -> Result<f64, CliError> {
    if value.is_finite() && (-bound..=bound).contains(&value) {
        Ok(value)
    } else {
        Err(CliError::CoordinateOutOfRange {
            field,
            value,
            min: -bound,
            max: bound,
        })
    }
}

/// Build a WGS84 coordinate (`x = longitude`, `y = latitude`).
pub(crate) fn coordinate(lat: f64, lng: f64) -> Result<Coord<f64>, CliError> {
    Ok(Coord {
        x: checked(ARG_LNG, lng, 180.0)?,
        y: checked(ARG_LAT, lat, 90.0)?,
    })
}

/// Resolve an optional location where both halves must be present together.
pub(crate) fn optional_coordinate(
    lat: Option<f64>,
    lng: Option<f64>,
) -> Result<Option<Coord<f64>>, CliError> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => coordinate(lat, lng).map(Some),
        (None, None) => Ok(None),
        _ => Err(CliError::IncompleteLocation),
    }
}
