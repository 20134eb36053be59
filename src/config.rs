use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,
    #[serde(default = "default_product_column")]
    pub product_column: String,
    /// Region codes to price, e.g. `["hk", "sg"]`.
    pub regions: Vec<String>,
    /// JSON record files to update.
    pub inputs: Vec<String>,
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,
    /// Fixed seed for reproducible range prices; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Skip writing a file when any of its products matched nothing.
    #[serde(default = "default_fail_on_unmatched")]
    pub fail_on_unmatched: bool,
}

fn default_catalog_path() -> String {
    "catalog.json".into()
}

fn default_product_column() -> String {
    "ProductNameCn".into()
}

fn default_output_suffix() -> String {
    "_updated".into()
}

fn default_fail_on_unmatched() -> bool {
    true
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
