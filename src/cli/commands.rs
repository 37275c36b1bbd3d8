//! CLI command implementations
//!
//! This module contains the implementation for each CLI command.

use crate::{Config, Result, cli::Cli};
use std::io::Write;
use std::path::PathBuf;

/// Open the output destination: a file if given, stdout otherwise
fn open_output(out: Option<PathBuf>) -> Result<Box<dyn Write>> {
    match out {
        Some(path) => {
            tracing::info!("Writing output to {:?}", path);
            Ok(Box::new(std::fs::File::create(path)?))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}

/// Analyze command implementation
pub mod analyze {
    use super::*;
    use crate::cli::output::{AnalysisReport, output_json, output_table};
    use crate::cli::{Commands, DataSourceType, OutputFormat};
    use crate::data_source::{create_data_source, mock::MOCK_BIRD_ID};
    use crate::network::{CountMatrix, SyllableGraph, analyze, detect_pattern, extract_network};
    use crate::sequence::{Alphabet, SyllableColors, count_song_notes_in_bout};
    use crate::{Error, bail};
    use clap::ValueEnum;

    /// Execute the analyze command
    pub async fn execute(args: Cli, config: Config) -> Result<()> {
        // Extract command-specific arguments
        let (bird, source, input, sequence, alphabet, output_format, normalize, out) =
            match args.command {
                Commands::Analyze {
                    bird,
                    source,
                    input,
                    sequence,
                    alphabet,
                    output,
                    normalize,
                    out,
                } => (bird, source, input, sequence, alphabet, output, normalize, out),
                _ => unreachable!("analyze::execute called with wrong command"),
            };
        let normalize = normalize || config.analysis.normalize;
        let stop_symbol = config.analysis.stop_symbol;

        let (record, symbols, alphabet) = if let (Some(sequence), Some(alphabet)) =
            (sequence, alphabet)
        {
            tracing::info!("Analyzing ad-hoc sequence over alphabet {}", alphabet);
            let alphabet = Alphabet::from_chars(&alphabet)?;
            (None, sequence.chars().collect::<Vec<char>>(), alphabet)
        } else {
            let source = match source {
                Some(source) => source,
                None => DataSourceType::from_str(&config.default.source, true)
                    .map_err(|e| Error::Config(format!("Invalid default.source: {}", e)))?,
            };
            tracing::debug!("Using data source: {:?}", source);

            let bird_id = match (bird, source) {
                (Some(id), _) => id,
                (None, DataSourceType::Mock) => MOCK_BIRD_ID.to_string(),
                (None, DataSourceType::File) => {
                    bail!("--bird is required when reading from a records file")
                }
            };

            let data_source = create_data_source(source, &config, input).await?;
            tracing::info!("Loading record for bird {}", bird_id);
            let record = data_source.get_record(&bird_id).await?;
            let alphabet = record.alphabet(stop_symbol)?;
            let symbols = record.syllables();
            (Some(record), symbols, alphabet)
        };

        let colors = match &record {
            Some(record) => SyllableColors::from_categories(&alphabet, &config.colors, |c| {
                record.category_of(*c)
            }),
            None => SyllableColors::for_alphabet(&alphabet, &config.colors),
        };
        let mut writer = open_output(out)?;

        // Rendering needs only the edge list; an empty network still draws.
        if output_format == OutputFormat::Dot {
            let edges = extract_network(&CountMatrix::from_sequence(&symbols, &alphabet));
            tracing::info!("Rendering {} transition type(s) as DOT", edges.len());
            let graph = SyllableGraph::build(&alphabet, &edges, &colors)?;
            write!(writer, "{}", graph.to_dot(&config.render))?;
            return Ok(());
        }

        tracing::info!(
            "Building transition network over {} symbols",
            alphabet.len()
        );
        let analysis = analyze(&symbols, &alphabet)?;
        let graph = SyllableGraph::build(&alphabet, &analysis.edges, &colors)?;

        let probabilities = if normalize {
            Some(analysis.matrix.normalize()?)
        } else {
            None
        };
        let song_notes_per_bout: Option<Vec<usize>> = record.as_ref().map(|r| {
            r.bouts(stop_symbol)
                .map(|bout| count_song_notes_in_bout(&r.song_notes, bout))
                .collect()
        });

        let report = AnalysisReport {
            bird: record.map(|r| r.id),
            generated_at: chrono::Utc::now(),
            topology: detect_pattern(&graph),
            analysis,
            probabilities,
            song_notes_per_bout,
        };

        match output_format {
            OutputFormat::Json => output_json(&mut writer, &report)?,
            OutputFormat::Table => output_table(&mut writer, &report)?,
            OutputFormat::Dot => unreachable!("DOT output handled above"),
        }

        Ok(())
    }
}

/// Records validate command implementation
pub mod validate {
    use super::*;
    use crate::data_source::{DataSource, file::FileDataSource};
    use crate::sequence::validate_symbols;

    /// Execute the validate command
    pub async fn execute(input: PathBuf, config: &Config) -> Result<()> {
        tracing::info!("Validating records: {:?}", input);
        let stop_symbol = config.analysis.stop_symbol;

        let source = match FileDataSource::open(&input).await {
            Ok(s) => s,
            Err(e) => {
                eprintln!("❌ Failed to load records: {}", e);
                return Err(e);
            }
        };
        let records = source.list_records().await?;

        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if records.is_empty() {
            errors.push("File contains no records".to_string());
        }
        let mut ids = std::collections::HashSet::new();
        for record in &records {
            if !ids.insert(&record.id) {
                errors.push(format!("Duplicate bird id {}", record.id));
            }

            let notes: Vec<char> = record.note_sequence(stop_symbol).chars().collect();
            match validate_symbols(&notes) {
                Ok(duplicates) if !duplicates.is_empty() => warnings.push(format!(
                    "{}: duplicate syllables {:?} (first occurrence wins)",
                    record.id, duplicates
                )),
                Ok(_) => {}
                Err(e) => errors.push(format!("{}: {}", record.id, e)),
            }
            if let Err(e) = record.alphabet(stop_symbol) {
                errors.push(format!("{}: {}", record.id, e));
            }

            if record.song_notes.is_empty() {
                warnings.push(format!("{}: no song notes", record.id));
            }
            if record.sequence.is_empty() {
                warnings.push(format!("{}: empty sequence", record.id));
            } else {
                let unknown = record
                    .sequence
                    .chars()
                    .filter(|c| !notes.contains(c))
                    .count();
                if unknown > 0 {
                    warnings.push(format!(
                        "{}: {} syllable(s) outside the alphabet will be skipped",
                        record.id, unknown
                    ));
                }
            }
        }

        // Print validation report
        println!("📋 Records Validation Report");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("File: {:?}", source.path());
        println!("Records: {}", records.len());
        for record in &records {
            println!(
                "    - {} (alphabet {}, {} syllables)",
                record.id,
                record.note_sequence(stop_symbol),
                record.sequence.chars().count()
            );
        }
        println!();

        if !errors.is_empty() {
            println!("❌ Errors:");
            for error in &errors {
                println!("   {}", error);
            }
            println!();
        }

        if !warnings.is_empty() {
            println!("⚠️  Warnings:");
            for warning in &warnings {
                println!("   {}", warning);
            }
            println!();
        }

        if errors.is_empty() {
            println!("✅ Records are valid!");
            Ok(())
        } else {
            println!("❌ Validation failed with {} error(s)", errors.len());
            Err(crate::Error::custom("Records validation failed"))
        }
    }
}
