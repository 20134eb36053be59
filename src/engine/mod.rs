// Engine module: validation, matching and price resolution over a catalog.

pub mod matcher;
pub mod resolver;
pub mod validator;

pub use matcher::{MatchResult, match_product};
pub use resolver::resolve;
pub use validator::{CoverageGap, coverage, validate};
