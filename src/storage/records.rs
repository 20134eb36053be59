use crate::model::BatchError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;

/// One product row: column name -> cell.
pub type Record = Map<String, Value>;

/// A JSON array of records held in memory.
#[derive(Debug)]
pub struct RecordFile {
    path: PathBuf,
    records: Vec<Record>,
}

impl RecordFile {
    /// Reads `path`, which must hold a JSON array of objects.
    pub async fn open(path: &Path) -> Result<Self, BatchError> {
        let content = fs::read_to_string(path).await?;
        let records = parse_records(&content)?;
        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    /// True when any record carries `column`.
    pub fn has_column(&self, column: &str) -> bool {
        self.records.iter().any(|r| r.contains_key(column))
    }

    /// Writes the records as pretty JSON, keeping column order.
    pub async fn save_to(&self, path: &Path) -> Result<(), BatchError> {
        let content = serde_json::to_string_pretty(&self.records)?;
        fs::write(path, content).await?;
        Ok(())
    }
}

fn parse_records(content: &str) -> Result<Vec<Record>, BatchError> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(items) = value else {
        return Err(BatchError::NotRecords);
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(record) => Ok(record),
            _ => Err(BatchError::NotRecords),
        })
        .collect()
}
