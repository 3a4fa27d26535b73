//! Behavioural coverage for ingredient-based recommendations.

use std::cell::RefCell;

use barback_core::{
    Catalog, FavouriteEdge, UserId,
    test_support::cocktail,
};
use barback_scorer::{Personalisation, RecommendationScorer, Recommendations};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Default)]
struct RecommendationWorld {
    catalog: RefCell<Catalog>,
    outcome: RefCell<Option<Recommendations>>,
}

impl RecommendationWorld {
    fn favourite(&self, user: &str, cocktail: &str) {
        self.catalog
            .borrow_mut()
            .add_favourite(FavouriteEdge::new(user, cocktail))
            .expect("cocktail should be in the catalogue");
    }

    fn ask(&self, user: &str, personalisation: Personalisation) {
        let outcome = RecommendationScorer::new().recommend_or_popular(
            &UserId::new(user),
            &*self.catalog.borrow(),
            personalisation,
        );
        self.outcome.replace(Some(outcome));
    }

    fn personalised(&self) -> Vec<(String, u32)> {
        match self.outcome.borrow().as_ref() {
            Some(Recommendations::Personalised(items)) => items
                .iter()
                .map(|scored| (scored.entry.cocktail.id.to_string(), scored.match_count))
                .collect(),
            other => panic!("expected personalised recommendations, got {other:?}"),
        }
    }
}

#[fixture]
fn world() -> RecommendationWorld {
    RecommendationWorld::default()
}

#[given("a catalogue of a Gimlet, a Gin and Tonic, a Screwdriver and a Gin Rickey")]
fn given_catalogue(world: &RecommendationWorld) {
    let mut catalog = world.catalog.borrow_mut();
    catalog.upsert_cocktail(cocktail("gimlet", &["Gin", "Lime"]));
    catalog.upsert_cocktail(cocktail("gin-tonic", &["Gin", "Tonic"]));
    catalog.upsert_cocktail(cocktail("screwdriver", &["Vodka", "Orange juice"]));
    catalog.upsert_cocktail(cocktail("rickey", &["Lime", "Gin", "Soda"]));
}

#[given("Ada has favourited the Gimlet")]
fn ada_favourites(world: &RecommendationWorld) {
    world.favourite("ada", "gimlet");
}

#[given("Bob has favourited the Screwdriver")]
fn bob_favourites(world: &RecommendationWorld) {
    world.favourite("bob", "screwdriver");
}

#[when("I ask for recommendations for Ada")]
fn ask_for_ada(world: &RecommendationWorld) {
    world.ask("ada", Personalisation::Enabled);
}

#[when("I ask for recommendations for a new user")]
fn ask_for_new_user(world: &RecommendationWorld) {
    world.ask("newcomer", Personalisation::Enabled);
}

#[when("I ask for unpersonalised recommendations for Ada")]
fn ask_unpersonalised(world: &RecommendationWorld) {
    world.ask("ada", Personalisation::Disabled);
}

#[then("the list is personalised")]
fn is_personalised(world: &RecommendationWorld) {
    let binding = world.outcome.borrow();
    let outcome = binding.as_ref().expect("recommendations should be recorded");
    assert!(outcome.is_personalised());
}

#[then("the Gimlet and the Gin Rickey lead with two matches")]
fn two_match_leaders(world: &RecommendationWorld) {
    let ranked = world.personalised();
    let leaders: Vec<_> = ranked.iter().take(2).cloned().collect();
    assert_eq!(
        leaders,
        vec![("gimlet".to_owned(), 2), ("rickey".to_owned(), 2)]
    );
}

#[then("the Gin and Tonic follows with one match")]
fn one_match_follower(world: &RecommendationWorld) {
    let ranked = world.personalised();
    assert_eq!(ranked.get(2), Some(&("gin-tonic".to_owned(), 1)));
}

#[then("the Screwdriver is not recommended")]
fn screwdriver_excluded(world: &RecommendationWorld) {
    assert!(world.personalised().iter().all(|(id, _)| id != "screwdriver"));
}

#[then("the popular list is returned")]
fn popular_list(world: &RecommendationWorld) {
    let binding = world.outcome.borrow();
    let outcome = binding.as_ref().expect("recommendations should be recorded");
    assert!(matches!(outcome, Recommendations::Popular(entries) if entries.len() == 4));
}

#[then("the Screwdriver leads the popular list")]
fn screwdriver_leads(world: &RecommendationWorld) {
    let binding = world.outcome.borrow();
    let Some(Recommendations::Popular(entries)) = binding.as_ref() else {
        panic!("expected the popular list");
    };
    let first = entries.first().map(|entry| entry.cocktail.id.as_str());
    assert_eq!(first, Some("screwdriver"));
}

#[scenario(path = "tests/features/recommendations.feature", index = 0)]
fn overlapping_cocktails(world: RecommendationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/recommendations.feature", index = 1)]
fn new_user_fallback(world: RecommendationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/recommendations.feature", index = 2)]
fn personalisation_disabled(world: RecommendationWorld) {
    let _ = world;
}
