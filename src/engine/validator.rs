use crate::catalog::Catalog;
use crate::model::{Price, PriceRule, ValidationError, Violation};

/// Checks every range rule in the catalog and returns all problems found.
///
/// Each malformed rule is reported once, with the first condition it breaks.
/// An empty catalog is valid.
pub fn validate(catalog: &Catalog) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for entry in catalog.iter() {
        for (region, rule) in entry.regions().iter() {
            if let PriceRule::Range { min, max, step } = *rule {
                if let Some(violation) = check_range(min, max, step) {
                    errors.push(ValidationError {
                        keyword: entry.keyword().to_string(),
                        region: region.to_string(),
                        violation,
                    });
                }
            }
        }
    }
    errors
}

/// First violated condition of a `[min, max, step]` range, if any.
///
/// A range that passes has `max - min` representable, so grid arithmetic
/// inside it cannot overflow.
pub fn check_range(min: Price, max: Price, step: Price) -> Option<Violation> {
    if min > max {
        return Some(Violation::MinAboveMax { min, max });
    }
    if step <= 0 {
        return Some(Violation::NonPositiveStep { step });
    }
    let Some(span) = max.checked_sub(min) else {
        return Some(Violation::SpanOverflow { min, max });
    };
    if span % step != 0 {
        return Some(Violation::SpanOffGrid { min, max, step });
    }
    if min % step != 0 {
        return Some(Violation::MinOffGrid { min, step });
    }
    None
}

/// Requested regions a catalog entry has no rule for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageGap {
    pub keyword: String,
    pub missing: Vec<String>,
}

/// Lists, per keyword, the requested regions without a price rule.
pub fn coverage(catalog: &Catalog, regions: &[String]) -> Vec<CoverageGap> {
    catalog
        .iter()
        .filter_map(|entry| {
            let missing: Vec<String> = regions
                .iter()
                .filter(|region| !entry.regions().contains(region))
                .cloned()
                .collect();
            (!missing.is_empty()).then(|| CoverageGap {
                keyword: entry.keyword().to_string(),
                missing,
            })
        })
        .collect()
}
