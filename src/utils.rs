// Utility functions
use std::path::{Path, PathBuf};

/// Column holding the price for `region`, e.g. `hk` -> `HKPrice`.
pub fn price_column(region: &str) -> String {
    format!("{}Price", region.trim().to_uppercase())
}

/// `dir/name.json` + `_updated` -> `dir/name_updated.json`.
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };
    input.with_file_name(file_name)
}
