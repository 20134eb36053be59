// Batch runner: prices every row of every input file against one catalog.
use crate::catalog::{self, Catalog};
use crate::config::AppConfig;
use crate::engine::{MatchResult, coverage, match_product, resolve, validate};
use crate::model::{BatchError, ConfigError};
use crate::normalizer::{normalize_regions, product_name};
use crate::storage::{Record, RecordFile};
use crate::utils::{output_path, price_column};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// How many unmatched product names are spelled out in the log.
const UNMATCHED_SHOWN: usize = 10;

#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub product_column: String,
    /// Normalized (lower-case) region codes.
    pub regions: Vec<String>,
    pub output_suffix: String,
    pub fail_on_unmatched: bool,
}

/// A configuration problem hit while pricing one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    pub row: usize,
    pub error: ConfigError,
}

/// Per-file outcome of pricing its rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSummary {
    pub rows: usize,
    pub matched: usize,
    /// Unique unmatched product names, in order of first appearance.
    pub unmatched: Vec<String>,
    pub unmatched_rows: usize,
    pub issues: Vec<RowIssue>,
}

impl RowSummary {
    pub fn missing_configs(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i.error, ConfigError::MissingRegionConfig { .. }))
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub summary: RowSummary,
    pub processed_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<FileReport>,
    pub failures: Vec<(String, BatchError)>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.reports.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// A validated catalog plus the settings for one run.
#[derive(Debug)]
pub struct Batch {
    catalog: Catalog,
    settings: BatchSettings,
    seed: Option<u64>,
}

impl Batch {
    /// Loads the configured catalog (creating the default one if needed) and
    /// checks it against the requested regions.
    pub fn prepare(config: &AppConfig) -> Result<Self, BatchError> {
        let catalog = catalog::load_or_create(Path::new(&config.catalog_path))?;
        Self::new(catalog, config)
    }

    /// Validates `catalog` and the requested regions. All invalid rules are
    /// logged before the run is refused.
    pub fn new(catalog: Catalog, config: &AppConfig) -> Result<Self, BatchError> {
        let errors = validate(&catalog);
        if !errors.is_empty() {
            for e in &errors {
                error!("Invalid price rule: {}", e);
            }
            return Err(BatchError::InvalidCatalog(errors.len()));
        }

        let regions = normalize_regions(&config.regions);
        if regions.is_empty() {
            return Err(BatchError::NoRegions);
        }
        let known = catalog.regions();
        let unknown: Vec<String> = regions
            .iter()
            .filter(|r| !known.contains(*r))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(BatchError::UnknownRegions(unknown));
        }

        for gap in coverage(&catalog, &regions) {
            warn!(
                "Keyword '{}' has no price for region(s): {}",
                gap.keyword,
                gap.missing.join(", ")
            );
        }

        info!(
            "Catalog ready: {} keywords, regions {}",
            catalog.len(),
            regions.join(", ")
        );

        Ok(Self {
            catalog,
            settings: BatchSettings {
                product_column: config.product_column.clone(),
                regions,
                output_suffix: config.output_suffix.clone(),
                fail_on_unmatched: config.fail_on_unmatched,
            },
            seed: config.seed,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &BatchSettings {
        &self.settings
    }

    /// Processes all inputs concurrently, one generator per file.
    pub async fn run(&self, inputs: &[String]) -> RunSummary {
        let tasks: Vec<_> = inputs
            .iter()
            .enumerate()
            .map(|(index, input)| async move {
                let mut rng = rng_for(self.seed, index);
                let result =
                    process_file(Path::new(input), &self.catalog, &self.settings, &mut rng).await;
                (input, result)
            })
            .collect();

        let mut summary = RunSummary::default();
        for (input, result) in join_all(tasks).await {
            match result {
                Ok(report) => summary.reports.push(report),
                Err(e) => {
                    error!("Failed to process {}: {}", input, e);
                    summary.failures.push((input.clone(), e));
                }
            }
        }
        summary
    }
}

/// Seeded generators are offset by file index so files do not share a sequence.
pub fn rng_for(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
        None => StdRng::from_os_rng(),
    }
}

/// Prices one record file and writes `<stem><suffix><ext>` next to it.
pub async fn process_file(
    input: &Path,
    catalog: &Catalog,
    settings: &BatchSettings,
    rng: &mut StdRng,
) -> Result<FileReport, BatchError> {
    info!("Processing: {}", input.display());
    let mut file = RecordFile::open(input).await?;
    check_columns(&file, settings)?;

    let summary = price_rows(file.records_mut(), catalog, settings, rng);
    info!(
        "{}: {} rows, {} matched, {} unmatched, {} missing region configs",
        input.display(),
        summary.rows,
        summary.matched,
        summary.unmatched_rows,
        summary.missing_configs()
    );
    for issue in &summary.issues {
        warn!("Row {}: {}", issue.row + 1, issue.error);
    }

    if !summary.unmatched.is_empty() {
        warn!("No catalog keyword matched these products:");
        for name in summary.unmatched.iter().take(UNMATCHED_SHOWN) {
            warn!("  - {}", name);
        }
        if summary.unmatched.len() > UNMATCHED_SHOWN {
            warn!("  ... and {} more", summary.unmatched.len() - UNMATCHED_SHOWN);
        }
        if settings.fail_on_unmatched {
            return Err(BatchError::Unmatched(summary.unmatched.len()));
        }
    }

    let output = output_path(input, &settings.output_suffix);
    file.save_to(&output).await?;
    info!("Saved {} updated rows to {}", summary.matched, output.display());

    Ok(FileReport {
        input: file.path().to_path_buf(),
        output,
        summary,
        processed_at: Utc::now(),
    })
}

/// The product column and every requested price column must exist.
fn check_columns(file: &RecordFile, settings: &BatchSettings) -> Result<(), BatchError> {
    if file.records().is_empty() {
        return Ok(());
    }
    if !file.has_column(&settings.product_column) {
        return Err(BatchError::MissingColumn(settings.product_column.clone()));
    }
    let missing: Vec<String> = settings
        .regions
        .iter()
        .map(|r| price_column(r))
        .filter(|column| !file.has_column(column))
        .collect();
    if !missing.is_empty() {
        return Err(BatchError::MissingPriceColumns(missing));
    }
    Ok(())
}

/// Matches and prices every record in place. Never stops early: unmatched
/// rows and missing region configs are collected into the summary.
pub fn price_rows<R: Rng + ?Sized>(
    records: &mut [Record],
    catalog: &Catalog,
    settings: &BatchSettings,
    rng: &mut R,
) -> RowSummary {
    let mut summary = RowSummary {
        rows: records.len(),
        ..RowSummary::default()
    };

    for (row, record) in records.iter_mut().enumerate() {
        let name = record.get(&settings.product_column).and_then(product_name);
        let found = match &name {
            Some(name) => match_product(catalog, name),
            None => MatchResult::NoMatch,
        };

        let MatchResult::Matched { keyword, regions } = found else {
            let name = name.unwrap_or_else(|| "(empty)".to_string());
            if !summary.unmatched.contains(&name) {
                summary.unmatched.push(name);
            }
            summary.unmatched_rows += 1;
            continue;
        };

        summary.matched += 1;
        for region in &settings.regions {
            match resolve(keyword, regions, region, rng) {
                Ok(price) => {
                    record.insert(price_column(region), Value::from(price));
                }
                Err(error) => summary.issues.push(RowIssue { row, error }),
            }
        }
    }
    summary
}
