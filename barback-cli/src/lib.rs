//! Command-line interface for the Barback catalogue.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::io::Write;

mod browse;
mod catalog;
mod error;
mod favourite;
mod import;
mod nearby;
mod output;
mod place;
mod recommend;
mod review;

pub use error::CliError;

use browse::BrowseArgs;
use favourite::{FavouriteAction, FavouriteCommand};
use import::ImportArgs;
use nearby::NearbyArgs;
use recommend::RecommendArgs;
use place::PlaceArgs;
use review::ReviewCommand;

pub(crate) const ARG_CATALOG_DB: &str = "catalog-db";
pub(crate) const ARG_DRINKS: &str = "drinks";
pub(crate) const ARG_USER: &str = "user";
pub(crate) const ARG_COCKTAIL: &str = "cocktail";
pub(crate) const ARG_PLACE: &str = "place";
pub(crate) const ARG_RATING: &str = "rating";
pub(crate) const ARG_COMMENT: &str = "comment";
pub(crate) const ARG_LAT: &str = "lat";
pub(crate) const ARG_LNG: &str = "lng";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ARG_NO_PERSONALISATION: &str = "no-personalisation";
pub(crate) const ARG_SEARCH: &str = "search";
pub(crate) const ARG_ORDER: &str = "order";
pub(crate) const ARG_REVIEW: &str = "review";

pub(crate) const ENV_IMPORT_DRINKS: &str = "BARBACK_CMDS_IMPORT_DRINKS";
pub(crate) const ENV_FAVOURITE_USER: &str = "BARBACK_CMDS_FAVOURITE_USER";
pub(crate) const ENV_FAVOURITE_COCKTAIL: &str = "BARBACK_CMDS_FAVOURITE_COCKTAIL";
pub(crate) const ENV_RECOMMEND_USER: &str = "BARBACK_CMDS_RECOMMEND_USER";
pub(crate) const ENV_NEARBY_COCKTAIL: &str = "BARBACK_CMDS_NEARBY_COCKTAIL";
pub(crate) const ENV_NEARBY_LAT: &str = "BARBACK_CMDS_NEARBY_LAT";
pub(crate) const ENV_NEARBY_LNG: &str = "BARBACK_CMDS_NEARBY_LNG";
pub(crate) const ENV_REVIEW_USER: &str = "BARBACK_CMDS_REVIEW_USER";
pub(crate) const ENV_REVIEW_COCKTAIL: &str = "BARBACK_CMDS_REVIEW_COCKTAIL";
pub(crate) const ENV_REVIEW_PLACE: &str = "BARBACK_CMDS_REVIEW_PLACE";
pub(crate) const ENV_REVIEW_RATING: &str = "BARBACK_CMDS_REVIEW_RATING";
pub(crate) const ENV_REVIEW_ID: &str = "BARBACK_CMDS_REVIEW_REVIEW";
pub(crate) const ENV_PLACE_PLACE: &str = "BARBACK_CMDS_PLACE_PLACE";

/// Catalogue database used when `--catalog-db` is not configured.
pub(crate) const DEFAULT_CATALOG_DB: &str = "barback.db";

/// Run the Barback CLI with the current process arguments and environment.
///
/// Command output is written to stdout as pretty-printed JSON.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration merging or the
/// selected command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Import(args) => import::run_import_with(args, writer),
        Command::Favourite(FavouriteCommand::Add(args)) => {
            favourite::run_favourite_with(FavouriteAction::Add, args, writer)
        }
        Command::Favourite(FavouriteCommand::Remove(args)) => {
            favourite::run_favourite_with(FavouriteAction::Remove, args, writer)
        }
        Command::Recommend(args) => recommend::run_recommend_with(args, writer),
        Command::Nearby(args) => nearby::run_nearby_with(args, writer),
        Command::Review(ReviewCommand::Add(args)) => review::run_review_with(args, writer),
        Command::Review(ReviewCommand::Update(args)) => {
            review::run_review_update_with(args, writer)
        }
        Command::Review(ReviewCommand::Remove(args)) => {
            review::run_review_remove_with(args, writer)
        }
        Command::Review(ReviewCommand::List(args)) => review::run_review_list_with(args, writer),
        Command::Place(args) => place::run_place_with(args, writer),
        Command::Browse(args) => browse::run_browse_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "barback",
    about = "Cocktail catalogue, recommendation and review tooling",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a TheCocktailDB drinks export into the catalogue database.
    Import(ImportArgs),
    /// Add or remove a user's bookmarked cocktail.
    #[command(subcommand)]
    Favourite(FavouriteCommand),
    /// Recommend cocktails sharing ingredients with a user's favourites.
    Recommend(RecommendArgs),
    /// List the nearest places where a cocktail was reviewed.
    Nearby(NearbyArgs),
    /// Add, change, remove or list reviews.
    #[command(subcommand)]
    Review(ReviewCommand),
    /// Summarise the cocktails reviewed at a place.
    Place(PlaceArgs),
    /// Search and sort the catalogue.
    Browse(BrowseArgs),
}

#[cfg(test)]
mod tests;
