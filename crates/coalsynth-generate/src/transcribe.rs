use std::io::BufRead;

use chrono::NaiveDateTime;
use tracing::debug;

use coalsynth_core::{
    BLEND_TABLE, InsertStatement, SENTINEL, STOCKPILE_TABLE, Section, SqlValue, TableLayout,
};

use crate::errors::GenerationError;
use crate::lines::LineSource;
use crate::model::{CoalReport, SchemaPolicy};
use crate::synth::MovementSynthesizer;
use crate::trucks::{TruckPicker, TruckRoster};

/// Stockpile block: priority line, value lines, `END`.
pub fn transcribe_stockpile<R: BufRead>(
    source: &mut LineSource<R>,
    date: &str,
    policy: SchemaPolicy,
) -> Result<InsertStatement, GenerationError> {
    transcribe_value_block(source, Section::Stockpile, &STOCKPILE_TABLE, date, policy)
}

/// Blend block: priority line, value lines, `END`.
pub fn transcribe_blend<R: BufRead>(
    source: &mut LineSource<R>,
    date: &str,
    policy: SchemaPolicy,
) -> Result<InsertStatement, GenerationError> {
    transcribe_value_block(source, Section::Blend, &BLEND_TABLE, date, policy)
}

fn transcribe_value_block<R: BufRead>(
    source: &mut LineSource<R>,
    section: Section,
    layout: &'static TableLayout,
    date: &str,
    policy: SchemaPolicy,
) -> Result<InsertStatement, GenerationError> {
    let priority = required_line(source, section)?;
    let mut values = vec![SqlValue::text(date), SqlValue::raw(priority)];
    loop {
        let line = required_line(source, section)?;
        if line == SENTINEL {
            break;
        }
        values.push(SqlValue::from_cell(&line));
    }

    match policy {
        SchemaPolicy::Strict => Ok(InsertStatement::checked(layout, values)?),
        SchemaPolicy::Lenient => Ok(InsertStatement::new(layout, values)),
    }
}

fn required_line<R: BufRead>(
    source: &mut LineSource<R>,
    section: Section,
) -> Result<String, GenerationError> {
    let line = source.next_line()?;
    line.ok_or_else(|| GenerationError::UnterminatedBlock {
        section,
        line: source.line_number(),
    })
}

/// A coal type and the tonnes of it mined on the day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoalEntry {
    pub name: String,
    pub tonnage: u32,
}

/// Read the next (name, tonnage) pair.
///
/// `None` ends the movement block: input ran out, the name line is `END`,
/// or the tonnage line is not a non-negative 32-bit signed integer (which
/// covers an `END` in tonnage position).
pub fn read_coal_entry<R: BufRead>(
    source: &mut LineSource<R>,
) -> Result<Option<CoalEntry>, GenerationError> {
    let Some(name) = source.next_line()? else {
        return Ok(None);
    };
    if name == SENTINEL {
        return Ok(None);
    }
    let Some(tonnage_line) = source.next_line()? else {
        return Ok(None);
    };
    let tonnage = tonnage_line
        .trim()
        .parse::<i32>()
        .ok()
        .and_then(|value| u32::try_from(value).ok());
    match tonnage {
        Some(tonnage) => Ok(Some(CoalEntry { name, tonnage })),
        None => {
            debug!(
                line = source.line_number(),
                value = %tonnage_line,
                "movement block ended"
            );
            Ok(None)
        }
    }
}

/// All statements produced by a movement block.
#[derive(Debug, Clone, Default)]
pub struct MovementBatch {
    pub entries: Vec<CoalReport>,
    pub statements: Vec<InsertStatement>,
}

impl MovementBatch {
    pub fn movement_count(&self) -> u64 {
        self.statements.len() as u64
    }
}

/// Movement block: repeated (name, tonnage) pairs until the block ends.
pub fn transcribe_movements<R: BufRead>(
    source: &mut LineSource<R>,
    start: NaiveDateTime,
    synth: &MovementSynthesizer,
    roster: &TruckRoster,
    picker: &mut dyn TruckPicker,
) -> Result<MovementBatch, GenerationError> {
    let mut batch = MovementBatch::default();
    while let Some(entry) = read_coal_entry(source)? {
        let movements = synth.synthesize(start, &entry.name, entry.tonnage, roster, picker)?;
        debug!(
            coal = %entry.name,
            tonnage = entry.tonnage,
            movements = movements.len(),
            "coal entry synthesized"
        );
        batch.entries.push(CoalReport {
            coal: entry.name,
            tonnage: entry.tonnage,
            movements: movements.len() as u64,
        });
        batch
            .statements
            .extend(movements.iter().map(|movement| movement.to_statement()));
    }
    Ok(batch)
}
