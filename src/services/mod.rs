//! Business logic services.

mod report;
mod seed;

pub use report::{ReportService, DEFAULT_LOOKAHEAD_DAYS};
pub use seed::{SeedOptions, SeedReport, SeedService, DEFAULT_COLLECTION};
