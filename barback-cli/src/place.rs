//! Place command implementation for the Barback CLI.

use barback_core::Place;
use barback_scorer::{CocktailReviewSummary, summarise_cocktails_at};
use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::catalog::{catalog_db_or_default, open_catalog, resolve_place};
use crate::output::write_json;
use crate::{ARG_CATALOG_DB, ARG_PLACE, CliError, ENV_PLACE_PLACE};

/// CLI arguments for the `place` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Summarise the cocktails reviewed at a place")]
#[ortho_config(prefix = "BARBACK")]
pub(crate) struct PlaceArgs {
    /// External (Google) identifier of the place.
    #[arg(long = ARG_PLACE, value_name = "external-id")]
    #[serde(default)]
    pub(crate) place: Option<String>,
    /// Path to the SQLite catalogue database.
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
}

impl PlaceArgs {
    fn into_config(self) -> Result<PlaceConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlaceConfig::try_from(merged)
    }
}

/// Resolved `place` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlaceConfig {
    pub(crate) external_id: String,
    pub(crate) catalog_db: Utf8PathBuf,
}

impl TryFrom<PlaceArgs> for PlaceConfig {
    type Error = CliError;

    fn try_from(args: PlaceArgs) -> Result<Self, Self::Error> {
        let external_id = args.place.ok_or(CliError::MissingArgument {
            field: ARG_PLACE,
            env: ENV_PLACE_PLACE,
        })?;
        Ok(Self {
            external_id,
            catalog_db: catalog_db_or_default(args.catalog_db),
        })
    }
}

/// A place together with the averaged ratings of every cocktail reviewed
/// there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlaceReport {
    pub(crate) place: Place,
    pub(crate) cocktails: Vec<CocktailReviewSummary>,
}

pub(crate) fn run_place_with(args: PlaceArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store = open_catalog(&config.catalog_db)?;
    let place = resolve_place(&store, &config.external_id)?;
    let cocktails = summarise_cocktails_at(&store, place.id);
    write_json(writer, &PlaceReport { place, cocktails })
}
