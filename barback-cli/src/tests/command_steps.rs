//! Behaviour-driven step definitions driving the catalogue CLI scenarios.

use super::helpers::{Workspace, run_cli, seed_catalogue};
use super::*;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use std::cell::RefCell;

#[derive(Debug)]
struct CommandWorld {
    workspace: Workspace,
    stdout: RefCell<String>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CommandWorld {
    fn new() -> Self {
        Self {
            workspace: Workspace::new(),
            stdout: RefCell::new(String::new()),
            result: RefCell::new(None),
        }
    }

    fn run(&self, argv: &[&str]) {
        let mut invocation: Vec<String> = argv.iter().map(|arg| (*arg).to_owned()).collect();
        invocation.extend([
            format!("--{ARG_CATALOG_DB}"),
            self.workspace.catalog_db().to_string(),
        ]);
        let (outcome, stdout) = run_cli(invocation);
        self.stdout.replace(stdout);
        self.result.replace(Some(outcome));
    }

    fn run_ok(&self, argv: &[&str]) {
        self.run(argv);
        let borrowed = self.result.borrow();
        if let Some(Err(err)) = borrowed.as_ref() {
            panic!("command {argv:?} failed: {err}");
        }
    }

    fn json_output(&self) -> Value {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        result.as_ref().expect("expected success");
        serde_json::from_str(&self.stdout.borrow()).expect("output should be JSON")
    }
}

fn cocktail_names(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("array of cocktails")
        .iter()
        .filter_map(|entry| entry["cocktail"]["name"].as_str().map(str::to_owned))
        .collect()
}

#[fixture]
fn world() -> CommandWorld {
    CommandWorld::new()
}

#[given("the sample drinks export has been imported")]
fn sample_imported(#[from(world)] world: &CommandWorld) {
    seed_catalogue(&world.workspace);
}

#[given("no catalogue database exists")]
fn no_catalogue(#[from(world)] world: &CommandWorld) {
    assert!(
        !world.workspace.catalog_db().as_std_path().exists(),
        "workspace should start empty"
    );
}

#[when("ada bookmarks the gimlet")]
fn ada_bookmarks_gimlet(#[from(world)] world: &CommandWorld) {
    world.run_ok(&["favourite", "add", "--user", "ada", "--cocktail", "1"]);
}

#[when("I ask for recommendations for ada")]
fn recommend_for_ada(#[from(world)] world: &CommandWorld) {
    world.run(&["recommend", "--user", "ada"]);
}

#[when("the gimlet is reviewed at a bar in Paris and a bar in Milan")]
fn gimlet_reviewed(#[from(world)] world: &CommandWorld) {
    world.run_ok(&[
        "review", "add", "--user", "ada", "--cocktail", "1", "--place", "paris-bar", "--rating", "3",
        "--lat", "48.8566", "--lng", "2.3522",
    ]);
    world.run_ok(&[
        "review", "add", "--user", "bob", "--cocktail", "1", "--place", "milan-bar", "--rating", "5",
        "--lat", "45.4642", "--lng", "9.19",
    ]);
}

#[when("I ask for places near Milan serving the gimlet")]
fn places_near_milan(#[from(world)] world: &CommandWorld) {
    world.run(&["nearby", "--cocktail", "1", "--lat", "45.47", "--lng", "9.18"]);
}

#[when("the margarita is reviewed at the Milan bar")]
fn margarita_reviewed(#[from(world)] world: &CommandWorld) {
    world.run_ok(&[
        "review", "add", "--user", "ada", "--cocktail", "4", "--place", "milan-bar", "--rating",
        "2",
    ]);
}

#[when("I ask for the Milan bar summary")]
fn milan_summary(#[from(world)] world: &CommandWorld) {
    world.run(&["place", "--place", "milan-bar"]);
}

#[when("bob tries to delete ada's Paris review")]
fn bob_deletes_review(#[from(world)] world: &CommandWorld) {
    world.run(&["review", "remove", "--review", "1", "--user", "bob"]);
}

#[when("ada changes the Paris review to four stars")]
fn ada_updates_review(#[from(world)] world: &CommandWorld) {
    world.run_ok(&[
        "review", "update", "--review", "1", "--user", "ada", "--rating", "4", "--comment",
        "Crisp",
    ]);
}

#[when("I list ada's reviews")]
fn list_ada_reviews(#[from(world)] world: &CommandWorld) {
    world.run(&["review", "list", "--user", "ada"]);
}

#[then("the command succeeds with personalised gin and lime cocktails")]
fn personalised_output(#[from(world)] world: &CommandWorld) {
    let output = world.json_output();
    assert_eq!(output["kind"], "personalised");
    assert_eq!(
        cocktail_names(&output["cocktails"]),
        vec!["Gimlet", "Gin Tonic", "Margarita"]
    );
    assert_eq!(output["cocktails"][0]["match_count"], 2);
}

#[then("the command succeeds with every cocktail ranked by popularity")]
fn popular_output(#[from(world)] world: &CommandWorld) {
    let output = world.json_output();
    assert_eq!(output["kind"], "popular");
    assert_eq!(
        cocktail_names(&output["cocktails"]),
        vec!["Gimlet", "Gin Tonic", "Screwdriver", "Margarita"]
    );
}

#[then("the Milan bar is listed before the Paris bar")]
fn milan_first(#[from(world)] world: &CommandWorld) {
    let output = world.json_output();
    let places: Vec<&str> = output
        .as_array()
        .expect("array of places")
        .iter()
        .filter_map(|place| place["external_id"].as_str())
        .collect();
    assert_eq!(places, vec!["milan-bar", "paris-bar"]);
    assert_eq!(output[0]["average_rating"], 5.0);
}

#[then("the command fails because the catalogue database is missing")]
fn missing_catalogue(#[from(world)] world: &CommandWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingSourceFile { field, .. } => assert_eq!(*field, ARG_CATALOG_DB),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[then("the summary lists the gimlet and the margarita with their ratings")]
fn milan_summary_output(#[from(world)] world: &CommandWorld) {
    let output = world.json_output();
    assert_eq!(output["place"]["external_id"], "milan-bar");
    let seen: Vec<(String, f64)> = output["cocktails"]
        .as_array()
        .expect("array of cocktails")
        .iter()
        .filter_map(|entry| {
            Some((
                entry["name"].as_str()?.to_owned(),
                entry["average_rating"].as_f64()?,
            ))
        })
        .collect();
    assert_eq!(
        seen,
        vec![("Gimlet".to_owned(), 5.0), ("Margarita".to_owned(), 2.0)]
    );
}

#[then("the command fails because bob did not write the review")]
fn not_the_author(#[from(world)] world: &CommandWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::PersistCatalog {
            source: barback_data::PersistCatalogError::NotReviewAuthor { user, .. },
            ..
        } => assert_eq!(user.as_str(), "bob"),
        other => panic!("expected NotReviewAuthor, found {other:?}"),
    }
}

#[then("ada's Paris review has four stars and the new comment")]
fn updated_review_listed(#[from(world)] world: &CommandWorld) {
    let output = world.json_output();
    let reviews = output.as_array().expect("array of reviews");
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["rating"], 4);
    assert_eq!(reviews[0]["comment"], "Crisp");
}

macro_rules! register_command_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/catalogue_commands.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CommandWorld) {
            let _ = world;
        }
    };
}

register_command_scenario!(recommend_after_import, "recommending after an import");
register_command_scenario!(recommend_fallback, "falling back to popular cocktails");
register_command_scenario!(nearby_places, "finding reviewed places nearby");
register_command_scenario!(missing_catalogue_db, "rejecting a missing catalogue");
register_command_scenario!(place_summary, "summarising the cocktails reviewed at a place");
register_command_scenario!(review_authorship, "only the author may change a review");
