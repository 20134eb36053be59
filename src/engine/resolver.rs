use crate::catalog::RegionPriceMap;
use crate::engine::validator::check_range;
use crate::model::{ConfigError, Price, PriceRule};
use rand::Rng;

/// Turns the rule configured for `region` into a concrete price.
///
/// `keyword` is only used to name the entry in errors. Ranges draw uniformly
/// from their step grid using `rng`; fixed prices come back unchanged.
pub fn resolve<R: Rng + ?Sized>(
    keyword: &str,
    regions: &RegionPriceMap,
    region: &str,
    rng: &mut R,
) -> Result<Price, ConfigError> {
    let rule = regions
        .get(region)
        .ok_or_else(|| ConfigError::MissingRegionConfig {
            keyword: keyword.to_string(),
            region: region.to_string(),
        })?;

    match *rule {
        PriceRule::Fixed(value) => Ok(value),
        PriceRule::Range { min, max, step } => {
            if let Some(violation) = check_range(min, max, step) {
                return Err(ConfigError::InvalidRange {
                    keyword: keyword.to_string(),
                    region: region.to_string(),
                    violation,
                });
            }
            // check_range guarantees max - min fits, and every grid point is <= max
            let slots = (max - min) / step;
            Ok(min + rng.random_range(0..=slots) * step)
        }
    }
}
