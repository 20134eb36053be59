// Storage module: JSON record files read and written by the batch runner.

pub mod records;

pub use records::{Record, RecordFile};
