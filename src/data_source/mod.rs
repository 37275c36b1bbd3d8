//! Data source module - Abstraction for fetching syllable records
//!
//! This module provides a trait-based abstraction for loading per-bird
//! syllable records from multiple sources (records files, mock data).

use crate::{Config, Result};
use async_trait::async_trait;
use std::path::PathBuf;

pub mod file;
pub mod mock;
pub mod models;

// Re-export models
use crate::cli::DataSourceType;
pub use models::{BirdRecord, RecordsFile};

/// Data source trait for fetching syllable records
///
/// Implementations provide different backends:
/// - `FileDataSource`: Reads a TOML or JSON records file
/// - `MockDataSource`: Provides a hardcoded sample bird
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch a single bird's record by id
    async fn get_record(&self, id: &str) -> Result<BirdRecord>;

    /// Fetch every record the source holds
    async fn list_records(&self) -> Result<Vec<BirdRecord>>;
}

/// Create a data source instance based on type and configuration
pub async fn create_data_source(
    source_type: DataSourceType,
    config: &Config,
    input: Option<PathBuf>,
) -> Result<Box<dyn DataSource>> {
    match source_type {
        DataSourceType::Mock => Ok(Box::new(mock::MockDataSource::new())),
        DataSourceType::File => {
            let path = config.records_path(input)?;
            Ok(Box::new(file::FileDataSource::open(path).await?))
        }
    }
}
