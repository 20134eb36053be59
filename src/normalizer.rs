use serde_json::Value;

/// Case-folds text for keyword comparison.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

pub fn normalize_region(code: &str) -> String {
    code.trim().to_lowercase()
}

/// Normalizes the requested region codes, dropping blanks and repeats.
pub fn normalize_regions<S: AsRef<str>>(codes: &[S]) -> Vec<String> {
    let mut regions: Vec<String> = Vec::new();
    for code in codes {
        let region = normalize_region(code.as_ref());
        if !region.is_empty() && !regions.contains(&region) {
            regions.push(region);
        }
    }
    regions
}

/// Product name of a record cell, as written. Blank and null cells have no name.
pub fn product_name(cell: &Value) -> Option<String> {
    let name = match cell {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!name.trim().is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fold_is_case_insensitive() {
        assert_eq!(fold("NIKE Air"), "nike air");
        assert_eq!(fold("Ärmel"), "ärmel");
    }

    #[test]
    fn test_normalize_regions() {
        assert_eq!(normalize_regions(&[" HK", "sg", "hk", ""]), vec!["hk", "sg"]);
    }

    #[test]
    fn test_product_name_from_cells() {
        assert_eq!(product_name(&json!("  Samba OG ")), Some("  Samba OG ".to_string()));
        assert_eq!(product_name(&json!(327)), Some("327".to_string()));
        assert_eq!(product_name(&json!("   ")), None);
        assert_eq!(product_name(&Value::Null), None);
    }
}
