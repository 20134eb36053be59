// Catalog module: keyword-indexed price rules.

pub mod loader;

pub use loader::{default_catalog, from_value, load_or_create, parse_catalog};

use crate::model::{CatalogError, PriceRule};
use crate::normalizer::{fold, normalize_region};
use std::collections::{BTreeMap, BTreeSet};

/// Region code -> price rule for one keyword. Region codes are stored lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionPriceMap {
    rules: BTreeMap<String, PriceRule>,
}

impl RegionPriceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, region: &str, rule: PriceRule) -> Option<PriceRule> {
        self.rules.insert(normalize_region(region), rule)
    }

    pub fn get(&self, region: &str) -> Option<&PriceRule> {
        self.rules.get(&normalize_region(region))
    }

    pub fn contains(&self, region: &str) -> bool {
        self.get(region).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PriceRule)> {
        self.rules.iter().map(|(region, rule)| (region.as_str(), rule))
    }
}

impl<'a> FromIterator<(&'a str, PriceRule)> for RegionPriceMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, PriceRule)>>(iter: I) -> Self {
        let mut map = RegionPriceMap::new();
        for (region, rule) in iter {
            map.insert(region, rule);
        }
        map
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    keyword: String,
    folded: String,
    regions: RegionPriceMap,
}

impl CatalogEntry {
    /// Keyword in its original casing.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn folded(&self) -> &str {
        &self.folded
    }

    pub fn regions(&self) -> &RegionPriceMap {
        &self.regions
    }

    /// Keyword length in characters.
    pub fn char_len(&self) -> usize {
        self.keyword.chars().count()
    }
}

/// Keyword -> region prices, kept in insertion order.
///
/// Insertion order only matters when two matching keywords have the same
/// length: the earlier one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. Keywords are unique case-insensitively and must not be empty.
    pub fn insert(&mut self, keyword: &str, regions: RegionPriceMap) -> Result<(), CatalogError> {
        if keyword.trim().is_empty() {
            return Err(CatalogError::EmptyKeyword);
        }
        let folded = fold(keyword);
        if self.entries.iter().any(|e| e.folded == folded) {
            return Err(CatalogError::DuplicateKeyword(keyword.to_string()));
        }
        self.entries.push(CatalogEntry {
            keyword: keyword.to_string(),
            folded,
            regions,
        });
        Ok(())
    }

    pub fn get(&self, keyword: &str) -> Option<&RegionPriceMap> {
        let folded = fold(keyword);
        self.entries
            .iter()
            .find(|e| e.folded == folded)
            .map(|e| &e.regions)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every region code configured by at least one entry.
    pub fn regions(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .flat_map(|e| e.regions.iter().map(|(region, _)| region.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn fixed(region: &str, price: i64) -> RegionPriceMap {
        [(region, PriceRule::Fixed(price))].into_iter().collect()
    }

    #[test]
    fn test_insert_rejects_case_insensitive_duplicates() {
        let mut catalog = Catalog::new();
        catalog.insert("Samba OG", fixed("hk", 1)).unwrap();
        assert_matches!(
            catalog.insert("samba og", fixed("hk", 2)),
            Err(CatalogError::DuplicateKeyword(k)) if k == "samba og"
        );
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_insert_rejects_blank_keyword() {
        let mut catalog = Catalog::new();
        assert_matches!(catalog.insert("  ", fixed("hk", 1)), Err(CatalogError::EmptyKeyword));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_region_codes_are_case_insensitive() {
        let map = fixed("HK", 100);
        assert_eq!(map.get("hk"), Some(&PriceRule::Fixed(100)));
        assert!(map.contains("Hk"));
        assert!(!map.contains("sg"));
    }

    #[test]
    fn test_regions_union() {
        let mut catalog = Catalog::new();
        catalog.insert("a", fixed("hk", 1)).unwrap();
        catalog
            .insert("b", [("SG", PriceRule::Fixed(2)), ("hk", PriceRule::Fixed(3))].into_iter().collect())
            .unwrap();
        let regions: Vec<_> = catalog.regions().into_iter().collect();
        assert_eq!(regions, vec!["hk".to_string(), "sg".to_string()]);
    }

    #[test]
    fn test_get_keeps_original_casing_of_keyword() {
        let mut catalog = Catalog::new();
        catalog.insert("Nike Air Force 1", fixed("hk", 1)).unwrap();
        assert!(catalog.get("NIKE AIR FORCE 1").is_some());
        assert_eq!(catalog.iter().next().map(|e| e.keyword()), Some("Nike Air Force 1"));
    }
}
