//! Behavioural coverage for ordering reviewed places by distance.

use std::cell::RefCell;

use barback_core::{
    Catalog, CocktailId, NewReview, Rating, UserId,
    test_support::cocktail,
};
use barback_scorer::{NearbyPlace, nearest_places, summarise_places};
use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Default)]
struct NearbyWorld {
    catalog: RefCell<Catalog>,
    nearby: RefCell<Vec<NearbyPlace>>,
}

#[fixture]
fn world() -> NearbyWorld {
    NearbyWorld::default()
}

fn review_at(catalog: &mut Catalog, place: &str, location: Option<Coord<f64>>) {
    catalog
        .add_review(NewReview {
            user: UserId::new("ada"),
            cocktail: CocktailId::new("negroni"),
            place_external_id: place.to_owned(),
            location,
            rating: Rating::new(5).expect("valid rating"),
            comment: None,
        })
        .expect("review should be stored");
}

#[given("a Negroni reviewed in Milan, Paris and at a bar without coordinates")]
fn given_reviews(world: &NearbyWorld) {
    let mut catalog = world.catalog.borrow_mut();
    catalog.upsert_cocktail(cocktail("negroni", &["Gin", "Campari", "Vermouth"]));
    review_at(&mut catalog, "paris-bar", Some(Coord { x: 2.3522, y: 48.8566 }));
    review_at(&mut catalog, "mystery-bar", None);
    review_at(&mut catalog, "milan-bar", Some(Coord { x: 9.1859, y: 45.4654 }));
}

#[when("I look for Negroni places near the Duomo")]
fn look_near_duomo(world: &NearbyWorld) {
    let catalog = world.catalog.borrow();
    let summaries = summarise_places(&*catalog, &CocktailId::new("negroni"));
    let duomo = Coord { x: 9.1900, y: 45.4642 };
    world.nearby.replace(nearest_places(duomo, summaries));
}

#[then("the Milan bar comes first")]
fn milan_first(world: &NearbyWorld) {
    let nearby = world.nearby.borrow();
    let first = nearby.first().map(|place| place.summary.external_id.as_str());
    assert_eq!(first, Some("milan-bar"));
}

#[then("the Paris bar comes second")]
fn paris_second(world: &NearbyWorld) {
    let nearby = world.nearby.borrow();
    let second = nearby.get(1).map(|place| place.summary.external_id.as_str());
    assert_eq!(second, Some("paris-bar"));
}

#[then("the bar without coordinates is omitted")]
fn mystery_omitted(world: &NearbyWorld) {
    let nearby = world.nearby.borrow();
    assert_eq!(nearby.len(), 2);
    assert!(nearby.iter().all(|place| place.summary.external_id != "mystery-bar"));
}

#[scenario(path = "tests/features/nearby_places.feature", index = 0)]
fn places_by_distance(world: NearbyWorld) {
    let _ = world;
}
