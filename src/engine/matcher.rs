use crate::catalog::{Catalog, CatalogEntry, RegionPriceMap};
use crate::normalizer::fold;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult<'a> {
    Matched {
        keyword: &'a str,
        regions: &'a RegionPriceMap,
    },
    NoMatch,
}

impl<'a> MatchResult<'a> {
    pub fn keyword(&self) -> Option<&'a str> {
        match *self {
            MatchResult::Matched { keyword, .. } => Some(keyword),
            MatchResult::NoMatch => None,
        }
    }
}

/// Finds the catalog keyword contained in `product_name`.
///
/// Keywords are compared literally and case-insensitively. When several
/// keywords occur in the name the longest one wins, so "samba og" beats
/// "samba" for "Adidas Samba OG". Equal lengths go to the keyword inserted
/// first.
pub fn match_product<'a>(catalog: &'a Catalog, product_name: &str) -> MatchResult<'a> {
    let name = fold(product_name);

    let mut best: Option<&CatalogEntry> = None;
    for entry in catalog.iter() {
        if !name.contains(entry.folded()) {
            continue;
        }
        // strictly longer only: earlier entries keep ties
        if best.is_none_or(|b| entry.char_len() > b.char_len()) {
            best = Some(entry);
        }
    }

    match best {
        Some(entry) => MatchResult::Matched {
            keyword: entry.keyword(),
            regions: entry.regions(),
        },
        None => MatchResult::NoMatch,
    }
}
