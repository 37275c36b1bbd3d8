//! Mock data source for testing and development
//!
//! Provides one sample zebra finch recording: intro notes `i`, a motif
//! `abcdj`, calls `k` and `m`.

use super::{BirdRecord, DataSource};
use crate::{Error, Result};
use async_trait::async_trait;

/// Identifier of the built-in sample bird
pub const MOCK_BIRD_ID: &str = "mock";

const MOCK_SEQUENCE: &str = "kiiiiabcdjiabcdjiabcd*iiiabcdk*iiii*iiiabcdjiabcdk*kiiiiiabcdjia*\
kiiiiiabcdjjabcd*iiiiabcd*iiiiabcdk*iiiiab*k*iiiiabcdk*iiiabcdjiabcd*iiiabcd*iiiabcdjiabcdk*\
iiabcd*iiiiiabcdjiabcd*iiiiabcd*iiiiiabcdjiabcdk*k*iiiabcdjiak*iiiabcdjiaj*kmmiiiabcdjiabcd*\
iiiiabcdjiabcd*iiiiiabcdk*iiiiabcdjiabcd*iiiiabcd*";

/// Mock data source providing a hardcoded sample record
pub struct MockDataSource {
    record: BirdRecord,
}

impl Default for MockDataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDataSource {
    pub fn new() -> Self {
        Self {
            record: BirdRecord {
                id: MOCK_BIRD_ID.to_string(),
                intro_notes: "i".to_string(),
                song_notes: "abcdj".to_string(),
                calls: "km".to_string(),
                sequence: MOCK_SEQUENCE.to_string(),
            },
        }
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn get_record(&self, id: &str) -> Result<BirdRecord> {
        if id == self.record.id {
            Ok(self.record.clone())
        } else {
            Err(Error::RecordNotFound(format!(
                "{} (the mock source only provides '{}')",
                id, MOCK_BIRD_ID
            )))
        }
    }

    async fn list_records(&self) -> Result<Vec<BirdRecord>> {
        Ok(vec![self.record.clone()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::analyze;

    #[tokio::test]
    async fn test_mock_record() {
        let source = MockDataSource::new();
        let bird = source.get_record(MOCK_BIRD_ID).await.unwrap();
        assert_eq!(bird.note_sequence('*'), "iabcdjkm*");
        assert!(source.get_record("other").await.is_err());
    }

    #[tokio::test]
    async fn test_mock_record_analysis() {
        let bird = MockDataSource::new().get_record(MOCK_BIRD_ID).await.unwrap();
        let alphabet = bird.alphabet('*').unwrap();
        let analysis = analyze(&bird.syllables(), &alphabet).unwrap();

        // Every symbol of the sample belongs to the alphabet
        assert_eq!(analysis.stats.unknown_pairs, 0);
        // c -> d is fully stereotyped
        assert_eq!(analysis.matrix.row(3), &[0, 0, 0, 0, 33, 0, 0, 0, 0]);
        assert_eq!(analysis.edges.len(), 22);

        let m = analysis.metrics;
        assert!((m.transition_entropy - 0.793_393_397_966_830_7).abs() < 1e-9);
        assert!((m.sequence_linearity - 8.0 / 22.0).abs() < 1e-12);
        assert!((m.sequence_consistency - 7.0 / 22.0).abs() < 1e-12);
        assert!((m.song_stereotypy - 15.0 / 44.0).abs() < 1e-12);
    }
}
