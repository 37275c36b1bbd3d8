//! Output formatting module
//!
//! This module handles formatting analysis reports for different output formats.

use crate::{
    Result,
    network::{NetworkAnalysis, ProbabilityMatrix, TopologyReport},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything the analyze command reports for one sequence
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Bird id, when the sequence came from a data source
    pub bird: Option<String>,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub analysis: NetworkAnalysis,
    pub topology: TopologyReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<ProbabilityMatrix>,
    /// Song notes present in each bout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub song_notes_per_bout: Option<Vec<usize>>,
}

/// Output a report as JSON
pub fn output_json(w: &mut impl std::io::Write, report: &AnalysisReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, report)?;
    writeln!(w)?; // Add trailing newline
    Ok(())
}

/// Output a report as text tables
pub fn output_table(w: &mut impl std::io::Write, report: &AnalysisReport) -> Result<()> {
    let analysis = &report.analysis;

    writeln!(w, "Syllable Network - Analysis Results")?;
    writeln!(w, "{}", "=".repeat(60))?;
    writeln!(w)?;

    writeln!(w, "Summary:")?;
    if let Some(bird) = &report.bird {
        writeln!(w, "  Bird:                 {}", bird)?;
    }
    writeln!(w, "  Alphabet:             {}", analysis.alphabet.join(" "))?;
    writeln!(w, "  Sequence Length:      {}", analysis.stats.length)?;
    writeln!(w, "  Counted Transitions:  {}", analysis.stats.counted_pairs)?;
    writeln!(w, "  Skipped (unknown):    {}", analysis.stats.unknown_pairs)?;
    writeln!(w, "  Skipped (from stop):  {}", analysis.stats.terminal_pairs)?;
    writeln!(w, "  Transition Types:     {}", analysis.edges.len())?;
    writeln!(w, "  Pattern:              {}", report.topology.pattern.display_name())?;
    if !report.topology.repeated_syllables.is_empty() {
        writeln!(
            w,
            "  Repeated Syllables:   {}",
            report.topology.repeated_syllables.join(" ")
        )?;
    }
    writeln!(w)?;

    let m = &analysis.metrics;
    writeln!(w, "Metrics:")?;
    writeln!(w, "  Transition Entropy:   {:.4}", m.transition_entropy)?;
    writeln!(w, "  Sequence Linearity:   {:.4}", m.sequence_linearity)?;
    writeln!(w, "  Sequence Consistency: {:.4}", m.sequence_consistency)?;
    writeln!(w, "  Song Stereotypy:      {:.4}", m.song_stereotypy)?;
    writeln!(w)?;

    writeln!(w, "Transition Matrix (row = from, column = to):")?;
    write_matrix(&mut *w, &analysis.alphabet, analysis.matrix.rows(), |c| c.to_string())?;

    if let Some(probabilities) = &report.probabilities {
        writeln!(w, "Probability Matrix:")?;
        write_matrix(&mut *w, &analysis.alphabet, probabilities.rows(), |p| format!("{:.3}", p))?;
    }

    if let Some(per_bout) = &report.song_notes_per_bout {
        writeln!(w, "Song Notes per Bout:")?;
        let counts: Vec<String> = per_bout.iter().map(ToString::to_string).collect();
        writeln!(w, "  {}", counts.join(" "))?;
        writeln!(w)?;
    }

    Ok(())
}

fn write_matrix<T>(
    w: &mut impl std::io::Write,
    labels: &[String],
    rows: &[Vec<T>],
    fmt_cell: impl Fn(&T) -> String,
) -> Result<()> {
    write!(w, "{:>4}", "")?;
    for label in labels {
        write!(w, " {:>6}", label)?;
    }
    writeln!(w)?;
    writeln!(w, "{:-<1$}", "", 4 + labels.len() * 7)?;

    for (label, row) in labels.iter().zip(rows) {
        write!(w, "{:>4}", label)?;
        for cell in row {
            write!(w, " {:>6}", fmt_cell(cell))?;
        }
        writeln!(w)?;
    }
    writeln!(w)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{analyze, detect_pattern, SyllableGraph};
    use crate::config::ColorConfig;
    use crate::sequence::{Alphabet, SyllableColors};

    fn create_test_report() -> AnalysisReport {
        let alphabet = Alphabet::from_chars("iab*").unwrap();
        let sequence: Vec<char> = "iiab*iab*".chars().collect();
        let analysis = analyze(&sequence, &alphabet).unwrap();
        let colors = SyllableColors::for_alphabet(&alphabet, &ColorConfig::default());
        let graph = SyllableGraph::build(&alphabet, &analysis.edges, &colors).unwrap();

        AnalysisReport {
            bird: Some("b1".to_string()),
            generated_at: Utc::now(),
            probabilities: Some(analysis.matrix.normalize().unwrap()),
            topology: detect_pattern(&graph),
            analysis,
            song_notes_per_bout: Some(vec![2, 2]),
        }
    }

    #[test]
    fn test_output_json() {
        let report = create_test_report();

        let mut output = Vec::new();
        output_json(&mut output, &report).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["bird"], "b1");
        assert_eq!(value["alphabet"], serde_json::json!(["i", "a", "b", "*"]));
        assert_eq!(value["topology"]["pattern"], "Cyclic");
        assert!(value["metrics"]["song_stereotypy"].is_number());
        assert!(value["probabilities"]["rows"].is_array());
    }

    #[test]
    fn test_output_table() {
        let report = create_test_report();

        let mut output = Vec::new();
        output_table(&mut output, &report).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Bird:                 b1"));
        assert!(text.contains("Song Stereotypy:"));
        assert!(text.contains("Probability Matrix:"));
        assert!(text.contains("Repeated Syllables:   i"));
    }
}
