//! Engine behaviour through the public API: matching, resolving and
//! validating a catalog the way a batch caller uses them.

use price_sniper::catalog::{Catalog, RegionPriceMap, parse_catalog};
use price_sniper::engine::{MatchResult, match_product, resolve, validate};
use price_sniper::model::{ConfigError, PriceRule, Violation};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

fn sneaker_catalog() -> Catalog {
    parse_catalog(
        r#"{
            "samba": {"hk": 450, "sg": [60, 70, 5]},
            "samba og": {"hk": [550, 580, 10], "sg": 88},
            "nike": {"hk": 700, "sg": 95, "my": [50, 60, 10]}
        }"#,
    )
    .unwrap()
}

#[test]
fn more_specific_keyword_wins() {
    let catalog = sneaker_catalog();
    let MatchResult::Matched { keyword, regions } = match_product(&catalog, "Adidas Samba OG") else {
        panic!("expected a match");
    };
    assert_eq!(keyword, "samba og");
    assert_eq!(regions.get("sg"), Some(&PriceRule::Fixed(88)));
}

#[test]
fn unmatched_name_is_not_an_error() {
    let catalog = sneaker_catalog();
    assert_eq!(match_product(&catalog, "Puma Suede"), MatchResult::NoMatch);
}

#[test]
fn matched_rules_resolve_for_each_region() {
    let catalog = sneaker_catalog();
    let mut rng = StdRng::seed_from_u64(99);
    let MatchResult::Matched { keyword, regions } = match_product(&catalog, "NIKE AIR FORCE 1") else {
        panic!("expected a match");
    };

    assert_eq!(resolve(keyword, regions, "HK", &mut rng), Ok(700));
    let my = resolve(keyword, regions, "my", &mut rng).unwrap();
    assert!(my == 50 || my == 60);
    assert_eq!(
        resolve(keyword, regions, "jp", &mut rng),
        Err(ConfigError::MissingRegionConfig {
            keyword: "nike".into(),
            region: "jp".into(),
        })
    );
}

#[test]
fn validation_reports_every_bad_rule_before_processing() {
    let catalog = parse_catalog(
        r#"{
            "x": {"hk": [500, 603, 10], "sg": [5, 10, 5]},
            "y": {"hk": [100, 50, 10]},
            "z": {"hk": 10}
        }"#,
    )
    .unwrap();

    let errors = validate(&catalog);
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].keyword, "x");
    assert_eq!(errors[0].region, "hk");
    assert_eq!(errors[0].violation, Violation::SpanOffGrid { min: 500, max: 603, step: 10 });
    assert_eq!(errors[1].violation, Violation::MinAboveMax { min: 100, max: 50 });
    assert_eq!(
        errors[0].to_string(),
        "keyword 'x', region 'hk': max - min (603 - 500) is not a multiple of step 10"
    );
}

#[test]
fn workers_share_the_catalog_with_their_own_generators() {
    let catalog = Arc::new(sneaker_catalog());
    let names = ["Samba OG White", "Adidas Samba", "Nike Dunk", "Samba OG Black"];

    let run = |seed: u64| {
        let handles: Vec<_> = (0..4u64)
            .map(|worker| {
                let catalog = Arc::clone(&catalog);
                thread::spawn(move || {
                    let mut rng = StdRng::seed_from_u64(seed + worker);
                    names
                        .iter()
                        .map(|name| match match_product(&catalog, name) {
                            MatchResult::Matched { keyword, regions } => {
                                resolve(keyword, regions, "hk", &mut rng).unwrap()
                            }
                            MatchResult::NoMatch => panic!("no match for {}", name),
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    };

    let first = run(5);
    assert_eq!(first, run(5));

    let grid: HashSet<i64> = [550, 560, 570, 580].into_iter().collect();
    for prices in &first {
        assert!(grid.contains(&prices[0]));
        assert_eq!(prices[1], 450);
        assert_eq!(prices[2], 700);
        assert!(grid.contains(&prices[3]));
    }
}

#[test]
fn catalog_built_in_code_matches_parsed_one() {
    let mut built = Catalog::new();
    let samba: RegionPriceMap = [("hk", PriceRule::Fixed(450)), ("sg", PriceRule::range(60, 70, 5))]
        .into_iter()
        .collect();
    built.insert("samba", samba).unwrap();

    let parsed = parse_catalog(r#"{"samba": {"HK": 450, "sg": [60, 70, 5]}}"#).unwrap();
    assert_eq!(built, parsed);
}
