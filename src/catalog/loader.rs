// Catalog file loading: JSON object of keyword -> { region: price | [min, max, step] }
use crate::catalog::{Catalog, RegionPriceMap};
use crate::model::{CatalogError, Price, PriceRule};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Starter catalog written when no catalog file exists yet.
pub fn default_catalog_json() -> Value {
    json!({
        "Nike Air Force 1": {
            "hk": [550, 580, 10],
            "sg": [70, 85, 5],
            "my": [50, 60, 10]
        },
        "New Balance 327": {
            "hk": [480, 510, 10],
            "sg": [75, 90, 5],
            "my": [60, 70, 10]
        }
    })
}

pub fn default_catalog() -> Result<Catalog, CatalogError> {
    from_value(&default_catalog_json())
}

/// Loads the catalog at `path`. A missing file or an empty object is replaced
/// by the default catalog, which is written back to `path`.
pub fn load_or_create(path: &Path) -> Result<Catalog, CatalogError> {
    if !path.exists() {
        warn!("Catalog {} not found, writing default catalog", path.display());
        return write_default(path);
    }

    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    if value.as_object().is_some_and(|m| m.is_empty()) {
        warn!("Catalog {} is empty, writing default catalog", path.display());
        return write_default(path);
    }

    let catalog = from_value(&value)?;
    info!("Loaded {} catalog entries from {}", catalog.len(), path.display());
    Ok(catalog)
}

fn write_default(path: &Path) -> Result<Catalog, CatalogError> {
    let value = default_catalog_json();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(&value)?)?;
    info!("Default catalog written to {}", path.display());
    from_value(&value)
}

pub fn parse_catalog(content: &str) -> Result<Catalog, CatalogError> {
    let value: Value = serde_json::from_str(content)?;
    from_value(&value)
}

/// Converts parsed JSON into a catalog, checking the shape of every rule.
pub fn from_value(value: &Value) -> Result<Catalog, CatalogError> {
    let root = value
        .as_object()
        .ok_or_else(|| CatalogError::NotAnObject(json_kind(value).to_string()))?;

    let mut catalog = Catalog::new();
    for (keyword, regions) in root {
        let regions = regions
            .as_object()
            .ok_or_else(|| CatalogError::EntryNotAnObject(keyword.clone()))?;

        let mut map = RegionPriceMap::new();
        for (region, rule) in regions {
            if region.trim().is_empty() {
                return Err(CatalogError::EmptyRegion(keyword.clone()));
            }
            let rule = parse_rule(rule).map_err(|reason| CatalogError::InvalidRule {
                keyword: keyword.clone(),
                region: region.clone(),
                reason,
            })?;
            if map.insert(region, rule).is_some() {
                return Err(CatalogError::DuplicateRegion {
                    keyword: keyword.clone(),
                    region: region.clone(),
                });
            }
        }
        catalog.insert(keyword, map)?;
    }
    Ok(catalog)
}

fn parse_rule(value: &Value) -> Result<PriceRule, String> {
    match value {
        Value::Number(_) => whole_number(value).map(PriceRule::Fixed),
        Value::Array(items) if items.len() == 3 => {
            let min = whole_number(&items[0])?;
            let max = whole_number(&items[1])?;
            let step = whole_number(&items[2])?;
            Ok(PriceRule::range(min, max, step))
        }
        Value::Array(items) => Err(format!(
            "price range must be [min, max, step], got {} element(s)",
            items.len()
        )),
        other => Err(format!(
            "expected a price or [min, max, step], got {}",
            json_kind(other)
        )),
    }
}

fn whole_number(value: &Value) -> Result<Price, String> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as Price),
        Some(f) => Err(format!("price {} is not a whole number", f)),
        None => Err(format!("expected a number, got {}", json_kind(value))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
