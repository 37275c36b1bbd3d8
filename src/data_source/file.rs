//! Records file data source
//!
//! Reads bird records from a TOML file (`[[bird]]` tables) or a JSON file
//! (an array of records, or an object with a `bird` array).

use super::{BirdRecord, DataSource, RecordsFile};
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordsFormat {
    Toml,
    Json,
}

impl RecordsFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            other => Err(Error::data_source(format!(
                "Unsupported records file extension {:?} for {:?} (expected .toml or .json)",
                other, path
            ))),
        }
    }
}

/// Data source backed by a records file, read once on open
#[derive(Debug, Clone)]
pub struct FileDataSource {
    path: PathBuf,
    records: Vec<BirdRecord>,
}

impl FileDataSource {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = RecordsFormat::from_path(&path)?;
        let contents = fs::read_to_string(&path).await?;

        let records = parse_records(&contents, format).map_err(|message| Error::RecordsParse {
            file: path.clone(),
            message,
        })?;
        tracing::info!("Loaded {} record(s) from {:?}", records.len(), path);

        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse_records(contents: &str, format: RecordsFormat) -> std::result::Result<Vec<BirdRecord>, String> {
    match format {
        RecordsFormat::Toml => toml::from_str::<RecordsFile>(contents)
            .map(|file| file.birds)
            .map_err(|e| e.to_string()),
        RecordsFormat::Json => {
            let value: serde_json::Value = serde_json::from_str(contents).map_err(|e| e.to_string())?;
            let records = if value.is_array() {
                serde_json::from_value::<Vec<BirdRecord>>(value)
            } else {
                serde_json::from_value::<RecordsFile>(value).map(|file| file.birds)
            };
            records.map_err(|e| e.to_string())
        }
    }
}

#[async_trait]
impl DataSource for FileDataSource {
    async fn get_record(&self, id: &str) -> Result<BirdRecord> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| Error::RecordNotFound(format!("{} in {:?}", id, self.path)))
    }

    async fn list_records(&self) -> Result<Vec<BirdRecord>> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_open_toml_records() {
        let file = write_file(
            ".toml",
            r#"
[[bird]]
id = "b70r38"
intro_notes = "i"
song_notes = "abcd"
calls = "k"
sequence = "iiabcd*kiabcd*"

[[bird]]
id = "g20r5"
song_notes = "xyz"
"#,
        );

        let source = FileDataSource::open(file.path()).await.unwrap();
        let records = source.list_records().await.unwrap();
        assert_eq!(records.len(), 2);

        let bird = source.get_record("g20r5").await.unwrap();
        assert_eq!(bird.song_notes, "xyz");
        assert!(bird.calls.is_empty());
        assert!(bird.sequence.is_empty());
    }

    #[tokio::test]
    async fn test_open_json_records() {
        let file = write_file(
            ".json",
            r#"[{"id": "b1", "song_notes": "ab", "sequence": "ab*ab*"}]"#,
        );

        let source = FileDataSource::open(file.path()).await.unwrap();
        let bird = source.get_record("b1").await.unwrap();
        assert_eq!(bird.sequence, "ab*ab*");
        assert!(matches!(
            source.get_record("missing").await,
            Err(Error::RecordNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_records_file() {
        let file = write_file(".toml", "[[bird]]\nid = 3\n");
        let err = FileDataSource::open(file.path()).await.unwrap_err();
        assert!(matches!(err, Error::RecordsParse { .. }));

        let file = write_file(".csv", "id,song_notes\n");
        assert!(FileDataSource::open(file.path()).await.is_err());
    }
}
