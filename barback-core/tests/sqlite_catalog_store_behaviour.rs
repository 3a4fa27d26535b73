//! Behavioural tests for `SqliteCatalogStore` using rstest-bdd.

use std::{cell::RefCell, path::PathBuf};

use barback_core::{
    CatalogStore, FavouriteEdge, SqliteCatalogStore, SqliteCatalogStoreError,
    test_support::{catalog_with, cocktail, write_sqlite_catalog},
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

/// Shared state for SQLite store scenarios.
#[derive(Debug)]
struct StoreWorld {
    temp_dir: TempDir,
    path: RefCell<Option<PathBuf>>,
    store: RefCell<Option<SqliteCatalogStore>>,
    error: RefCell<Option<SqliteCatalogStoreError>>,
}

impl StoreWorld {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("create temp dir"),
            path: RefCell::new(None),
            store: RefCell::new(None),
            error: RefCell::new(None),
        }
    }

    fn db_path(&self) -> PathBuf {
        self.temp_dir.path().join("catalog.db")
    }
}

#[fixture]
fn world() -> StoreWorld {
    StoreWorld::new()
}

#[given("a persisted catalogue with two cocktails and one favourite")]
fn given_persisted(world: &StoreWorld) {
    let catalog = catalog_with(
        vec![cocktail("12", &["Rum", "Mint"]), cocktail("3", &["Gin"])],
        &[FavouriteEdge::new("ada", "3")],
    );
    let path = world.db_path();
    write_sqlite_catalog(&path, &catalog).expect("persist catalogue");
    world.path.replace(Some(path));
}

#[given("a path to a database that does not exist")]
fn given_missing(world: &StoreWorld) {
    world.path.replace(Some(world.db_path()));
}

#[when("I open the SQLite catalogue store")]
fn open_store(world: &StoreWorld) {
    let path = world
        .path
        .borrow()
        .clone()
        .expect("path should be initialised before opening the store");
    match SqliteCatalogStore::open(&path) {
        Ok(store) => {
            world.store.replace(Some(store));
        }
        Err(err) => {
            world.error.replace(Some(err));
        }
    }
}

#[then("the store lists two cocktails in catalogue order")]
fn lists_two(world: &StoreWorld) {
    assert!(world.error.borrow().is_none(), "unexpected store error");
    let binding = world.store.borrow();
    let store = binding.as_ref().expect("store should be open");
    let ids: Vec<_> = store
        .entries()
        .map(|entry| entry.cocktail.id.to_string())
        .collect();
    assert_eq!(ids, vec!["12", "3"]);
}

#[then("the favourited cocktail has a popularity of one")]
fn favourited_popularity(world: &StoreWorld) {
    let binding = world.store.borrow();
    let store = binding.as_ref().expect("store should be open");
    let popularity: Vec<_> = store.entries().map(|entry| entry.popularity).collect();
    assert_eq!(popularity, vec![0, 1]);
}

#[then("opening the SQLite store fails with an open database error")]
fn open_error(world: &StoreWorld) {
    let binding = world.error.borrow();
    let error = binding.as_ref().expect("an error should be recorded");
    assert!(matches!(error, SqliteCatalogStoreError::OpenDatabase { .. }));
}

#[scenario(path = "tests/features/sqlite_catalog_store.feature", index = 0)]
fn persisted_catalogue(world: StoreWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/sqlite_catalog_store.feature", index = 1)]
fn missing_database(world: StoreWorld) {
    let _ = world;
}
