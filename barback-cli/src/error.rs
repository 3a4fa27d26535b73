//! Error types emitted by the Barback CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use barback_core::{RatingError, SqliteCatalogStoreError};
use barback_data::{ImportError, PersistCatalogError};
use barback_scorer::RecommendationError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors emitted by the Barback CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A coordinate fell outside its valid WGS84 range.
    #[error("{field} {value} is outside {min}..={max}")]
    CoordinateOutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// Only one half of a coordinate pair was supplied.
    #[error("--lat and --lng must be given together")]
    IncompleteLocation,
    /// The supplied star rating is invalid.
    #[error(transparent)]
    InvalidRating(#[from] RatingError),
    /// Reading the drinks export failed.
    #[error("failed to import drinks from {path:?}: {source}")]
    Import {
        path: Utf8PathBuf,
        #[source]
        source: ImportError,
    },
    /// Writing to the catalogue database failed.
    #[error("failed to update catalogue {path:?}: {source}")]
    PersistCatalog {
        path: Utf8PathBuf,
        #[source]
        source: PersistCatalogError,
    },
    /// No review has ever mentioned the requested place.
    #[error("place {external_id:?} has not been reviewed")]
    UnknownPlace { external_id: String },
    /// Loading the catalogue snapshot failed.
    #[error(transparent)]
    OpenCatalog(#[from] SqliteCatalogStoreError),
    /// Constructing the recommendation scorer failed.
    #[error(transparent)]
    BuildScorer(#[from] RecommendationError),
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
