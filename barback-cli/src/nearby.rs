//! Nearby command implementation for the Barback CLI.

use barback_core::CocktailId;
use barback_scorer::{nearest_places, summarise_places};
use camino::Utf8PathBuf;
use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::catalog::{catalog_db_or_default, coordinate, open_catalog};
use crate::output::write_json;
use crate::{
    ARG_CATALOG_DB, ARG_COCKTAIL, ARG_LAT, ARG_LNG, CliError, ENV_NEARBY_COCKTAIL, ENV_NEARBY_LAT,
    ENV_NEARBY_LNG,
};

/// CLI arguments for the `nearby` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Summarise the reviews of a cocktail per place and list the \
                 twenty places nearest to the given WGS84 position by \
                 great-circle distance. Places without a known location are \
                 left out.",
    about = "List reviewed places near a position"
)]
#[ortho_config(prefix = "BARBACK")]
pub(crate) struct NearbyArgs {
    /// Cocktail whose reviews should be summarised.
    #[arg(long = ARG_COCKTAIL, value_name = "id")]
    #[serde(default)]
    pub(crate) cocktail: Option<String>,
    /// Latitude of the origin in degrees.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the origin in degrees.
    #[arg(long = ARG_LNG, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lng: Option<f64>,
    /// Path to the SQLite catalogue database.
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
}

impl NearbyArgs {
    fn into_config(self) -> Result<NearbyConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        NearbyConfig::try_from(merged)
    }
}

/// Resolved `nearby` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NearbyConfig {
    pub(crate) cocktail: CocktailId,
    pub(crate) origin: Coord<f64>,
    pub(crate) catalog_db: Utf8PathBuf,
}

impl TryFrom<NearbyArgs> for NearbyConfig {
    type Error = CliError;

    fn try_from(args: NearbyArgs) -> Result<Self, Self::Error> {
        let cocktail = args.cocktail.ok_or(CliError::MissingArgument {
            field: ARG_COCKTAIL,
            env: ENV_NEARBY_COCKTAIL,
        })?;
        let lat = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_LAT,
            env: ENV_NEARBY_LAT,
        })?;
        let lng = args.lng.ok_or(CliError::MissingArgument {
            field: ARG_LNG,
            env: ENV_NEARBY_LNG,
        })?;
        Ok(Self {
            cocktail: CocktailId::new(cocktail),
            origin: coordinate(lat, lng)?,
            catalog_db: catalog_db_or_default(args.catalog_db),
        })
    }
}

pub(crate) fn run_nearby_with(args: NearbyArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store = open_catalog(&config.catalog_db)?;
    let nearby = nearest_places(config.origin, summarise_places(&store, &config.cocktail));
    write_json(writer, &nearby)
}
