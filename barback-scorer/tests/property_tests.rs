//! Property-based tests for the rankers.
//!
//! # Invariants tested
//!
//! - **Counted slots are liked:** every counted slot appears among the
//!   favourites' ingredients, so `match_count` equals a recount.
//! - **Bounded output:** recommendations never exceed the scorer limit and
//!   nearest places never exceed [`NEAREST_PLACES_LIMIT`].
//! - **Ordering:** match counts never increase down the list and, among equal
//!   match counts, popularity never increases.
//! - **Idempotence:** repeated calls on one snapshot agree.

use std::collections::HashSet;

use barback_core::test_support::{catalog_with, cocktail};
use barback_core::{Catalog, FavouriteEdge, PlaceId, UserId};
use barback_scorer::{
    NEAREST_PLACES_LIMIT, PlaceReviewSummary, RecommendationScorer, nearest_places,
};
use geo::Coord;
use proptest::prelude::*;

const INGREDIENTS: [&str; 6] = ["Gin", "Rum", "Lime", "Mint", "Tonic", "Vodka"];

fn catalogue_strategy() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::vec(0..INGREDIENTS.len(), 0..=6), 0..40)
}

fn build_catalog(recipes: &[Vec<usize>], favourites: &[(u8, usize)]) -> Catalog {
    let cocktails = recipes
        .iter()
        .enumerate()
        .map(|(index, recipe)| {
            let names: Vec<&str> = recipe
                .iter()
                .filter_map(|&slot| INGREDIENTS.get(slot).copied())
                .collect();
            cocktail(&index.to_string(), &names)
        })
        .collect();
    let edges: Vec<FavouriteEdge> = favourites
        .iter()
        .map(|&(user, index)| FavouriteEdge::new(format!("user-{user}"), index.to_string()))
        .collect();
    catalog_with(cocktails, &edges)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: match counts equal a recount against the liked ingredients.
    #[test]
    fn match_counts_only_count_liked_slots(
        recipes in catalogue_strategy(),
        favourites in prop::collection::vec((0_u8..4, 0_usize..40), 0..20),
    ) {
        let catalog = build_catalog(&recipes, &favourites);
        let user = UserId::new("user-0");
        let liked: HashSet<String> = catalog
            .favourites()
            .cocktails_of(&user)
            .filter_map(|id| catalog.cocktail(id))
            .flat_map(|c| c.ingredients.present().map(str::to_owned).collect::<Vec<_>>())
            .collect();

        let ranked = RecommendationScorer::new().recommend(&user, &catalog);
        for scored in &ranked {
            let recount = scored
                .entry
                .cocktail
                .ingredients
                .present()
                .filter(|slot| liked.contains(*slot))
                .count();
            prop_assert_eq!(usize::try_from(scored.match_count).ok(), Some(recount));
            prop_assert!(scored.match_count > 0);
        }
        if liked.is_empty() {
            prop_assert!(ranked.is_empty());
        }
    }

    /// Property: output respects the limit and the documented ordering.
    #[test]
    fn recommendations_are_bounded_and_ordered(
        recipes in catalogue_strategy(),
        favourites in prop::collection::vec((0_u8..4, 0_usize..40), 0..20),
        limit in 1_usize..20,
    ) {
        let catalog = build_catalog(&recipes, &favourites);
        let scorer = RecommendationScorer::with_limit(limit).expect("non-zero limit");
        let ranked = scorer.recommend(&UserId::new("user-1"), &catalog);

        prop_assert!(ranked.len() <= limit);
        for pair in ranked.windows(2) {
            let [first, second] = pair else { continue };
            prop_assert!(first.match_count >= second.match_count);
            if first.match_count == second.match_count {
                prop_assert!(first.entry.popularity >= second.entry.popularity);
            }
        }
        prop_assert_eq!(&ranked, &scorer.recommend(&UserId::new("user-1"), &catalog));
    }

    /// Property: nearest places are capped, sorted, and drawn from located input.
    #[test]
    fn nearest_places_are_bounded_and_sorted(
        points in prop::collection::vec(
            prop::option::of((-180.0_f64..180.0, -90.0_f64..90.0)),
            0..60,
        ),
        origin in (-180.0_f64..180.0, -90.0_f64..90.0),
    ) {
        let located = points.iter().filter(|point| point.is_some()).count();
        let summaries = points.into_iter().enumerate().map(|(index, point)| PlaceReviewSummary {
            place: PlaceId::new(u64::try_from(index).unwrap_or(u64::MAX)),
            external_id: format!("place-{index}"),
            location: point.map(|(x, y)| Coord { x, y }),
            average_rating: 4.0,
            review_count: 1,
        });

        let nearby = nearest_places(Coord { x: origin.0, y: origin.1 }, summaries);
        prop_assert_eq!(nearby.len(), located.min(NEAREST_PLACES_LIMIT));
        for pair in nearby.windows(2) {
            let [first, second] = pair else { continue };
            prop_assert!(first.distance_metres <= second.distance_metres);
        }
    }
}
