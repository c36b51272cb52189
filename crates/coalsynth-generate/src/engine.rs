use std::io::{BufRead, Write};
use std::time::Instant;

use tracing::{info, warn};

use coalsynth_core::{InsertStatement, Section};

use crate::errors::GenerationError;
use crate::lines::LineSource;
use crate::model::{GenerateOptions, GenerationReport, SchemaPolicy, SectionStatus};
use crate::output::sql::StatementSink;
use crate::synth::{MovementSynthesizer, parse_date_stamp};
use crate::transcribe::{transcribe_blend, transcribe_movements, transcribe_stockpile};
use crate::trucks::{RandomPicker, TruckPicker, TruckRoster};

/// Position of the driver in the fixed header sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    ExpectStockpileHeader,
    ExpectBlendHeader,
    ExpectMovementHeader,
    Done,
}

impl DriverState {
    pub fn section(self) -> Option<Section> {
        match self {
            DriverState::ExpectStockpileHeader => Some(Section::Stockpile),
            DriverState::ExpectBlendHeader => Some(Section::Blend),
            DriverState::ExpectMovementHeader => Some(Section::Movements),
            DriverState::Done => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            DriverState::ExpectStockpileHeader => DriverState::ExpectBlendHeader,
            DriverState::ExpectBlendHeader => DriverState::ExpectMovementHeader,
            DriverState::ExpectMovementHeader | DriverState::Done => DriverState::Done,
        }
    }
}

/// Result of a generation run.
#[derive(Debug)]
pub struct GenerationResult<W> {
    pub output: W,
    pub report: GenerationReport,
}

/// Drives one input file through the three sections.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    /// Run with a ChaCha picker seeded from the options, or from a fresh
    /// random seed that is recorded in the report.
    pub fn run<R: BufRead, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> Result<GenerationResult<W>, GenerationError> {
        let seed = self.options.seed.unwrap_or_else(rand::random);
        let mut picker = RandomPicker::seeded(seed);
        let mut result = self.run_with_picker(input, output, &mut picker)?;
        result.report.seed = Some(seed);
        Ok(result)
    }

    pub fn run_with_picker<R: BufRead, W: Write>(
        &self,
        input: R,
        output: W,
        picker: &mut dyn TruckPicker,
    ) -> Result<GenerationResult<W>, GenerationError> {
        let start = Instant::now();
        let synth = MovementSynthesizer::new(self.options.unit_size)?;
        let roster = TruckRoster::numbered(self.options.truck_count)?;
        let policy = self.options.schema_policy;

        let run_id = uuid::Uuid::new_v4().to_string();
        let mut report = GenerationReport::new(run_id.clone());
        let mut source = LineSource::new(input);
        let mut sink = StatementSink::new(output);

        info!(
            run_id = %run_id,
            policy = ?policy,
            unit_size = synth.unit_size(),
            trucks = roster.len(),
            "generation started"
        );

        let mut state = DriverState::ExpectStockpileHeader;
        let mut date: Option<String> = None;

        while let Some(section) = state.section() {
            let header = source.next_line()?;
            let header_line = source.line_number();
            let matched = header.as_deref().is_some_and(|line| section.matches(line));

            if !matched && policy == SchemaPolicy::Strict {
                return Err(GenerationError::HeaderMismatch {
                    section,
                    line: header_line,
                    expected: section.header(),
                    found: header,
                });
            }

            // The date line follows the first header whether or not it matched.
            if section == Section::Stockpile {
                date = Some(source.next_line()?.ok_or(GenerationError::MissingDate)?);
            }
            let date_text = date.as_deref().ok_or(GenerationError::MissingDate)?;

            if !matched {
                warn!(
                    section = %section,
                    line = header_line,
                    found = ?header,
                    "header mismatch, section skipped"
                );
                report.record_warning(
                    "header_mismatch",
                    format!("{section} header not found; section skipped"),
                    header_line,
                );
                report.record_section(section, SectionStatus::Skipped, header_line, 0);
                state = state.next();
                continue;
            }

            let statements = match section {
                Section::Stockpile => {
                    vec![transcribe_stockpile(&mut source, date_text, policy)?]
                }
                Section::Blend => vec![transcribe_blend(&mut source, date_text, policy)?],
                Section::Movements => {
                    let start_at = parse_date_stamp(date_text)
                        .ok_or_else(|| GenerationError::InvalidDate(date_text.to_string()))?;
                    let batch =
                        transcribe_movements(&mut source, start_at, &synth, &roster, picker)?;
                    report.movements_generated += batch.movement_count();
                    report.coals.extend(batch.entries);
                    batch.statements
                }
            };

            check_arity(&statements, section, header_line, &mut report);
            for statement in &statements {
                sink.write_statement(statement)?;
            }
            report.record_section(
                section,
                SectionStatus::Written,
                header_line,
                statements.len() as u64,
            );
            info!(
                section = %section,
                statements = statements.len(),
                "section written"
            );

            state = state.next();
        }

        report.statements_written = sink.statements_written();
        let (output, bytes_written) = sink.finish()?;
        report.bytes_written = bytes_written;
        report.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            run_id = %run_id,
            statements = report.statements_written,
            movements = report.movements_generated,
            skipped = report.skipped_sections().len(),
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult { output, report })
    }
}

fn check_arity(
    statements: &[InsertStatement],
    section: Section,
    header_line: usize,
    report: &mut GenerationReport,
) {
    for statement in statements.iter().filter(|s| !s.has_expected_arity()) {
        let layout = statement.layout();
        warn!(
            section = %section,
            table = layout.name,
            expected = layout.expected_values(),
            found = statement.values().len(),
            "value count does not match table columns"
        );
        report.record_warning(
            "column_count",
            format!(
                "{} expects {} values, found {}",
                layout.name,
                layout.expected_values(),
                statement.values().len()
            ),
            header_line,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_advance_in_header_order() {
        let mut state = DriverState::ExpectStockpileHeader;
        let mut sections = Vec::new();
        while let Some(section) = state.section() {
            sections.push(section);
            state = state.next();
        }
        assert_eq!(sections, Section::ORDER);
        assert_eq!(state, DriverState::Done);
        assert_eq!(DriverState::Done.next(), DriverState::Done);
    }
}
