use serde::{Deserialize, Serialize};

use coalsynth_core::Section;

use crate::synth::DEFAULT_UNIT_SIZE;
use crate::trucks::DEFAULT_TRUCK_COUNT;

/// How schema deviations in the input are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaPolicy {
    /// A mismatched header skips its section; a value block with the wrong
    /// number of values is written as-is with a warning.
    #[default]
    Lenient,
    /// Any mismatch aborts the run.
    Strict,
}

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    pub schema_policy: SchemaPolicy,
    /// Tonnes per truck movement.
    pub unit_size: u32,
    /// Size of the `Truck1..TruckN` roster.
    pub truck_count: usize,
    /// Seed for truck assignment; drawn at random when absent.
    pub seed: Option<u64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            schema_policy: SchemaPolicy::Lenient,
            unit_size: DEFAULT_UNIT_SIZE,
            truck_count: DEFAULT_TRUCK_COUNT,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    Written,
    Skipped,
}

/// Outcome of one input section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionReport {
    pub section: Section,
    pub status: SectionStatus,
    /// Line number of the header that was checked.
    pub header_line: usize,
    pub statements: u64,
}

/// Movements generated for one coal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoalReport {
    pub coal: String,
    pub tonnage: u32,
    pub movements: u64,
}

/// Non-fatal schema issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationWarning {
    pub code: String,
    pub message: String,
    pub line: usize,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: Option<u64>,
    pub sections: Vec<SectionReport>,
    pub coals: Vec<CoalReport>,
    pub movements_generated: u64,
    pub statements_written: u64,
    pub bytes_written: u64,
    pub duration_ms: u64,
    pub warnings: Vec<GenerationWarning>,
}

impl GenerationReport {
    pub fn new(run_id: String) -> Self {
        Self {
            run_id,
            seed: None,
            sections: Vec::new(),
            coals: Vec::new(),
            movements_generated: 0,
            statements_written: 0,
            bytes_written: 0,
            duration_ms: 0,
            warnings: Vec::new(),
        }
    }

    pub fn record_section(
        &mut self,
        section: Section,
        status: SectionStatus,
        header_line: usize,
        statements: u64,
    ) {
        self.sections.push(SectionReport {
            section,
            status,
            header_line,
            statements,
        });
    }

    pub fn record_warning(&mut self, code: &str, message: String, line: usize) {
        self.warnings.push(GenerationWarning {
            code: code.to_string(),
            message,
            line,
        });
    }

    pub fn section_status(&self, section: Section) -> Option<SectionStatus> {
        self.sections
            .iter()
            .find(|report| report.section == section)
            .map(|report| report.status)
    }

    pub fn skipped_sections(&self) -> Vec<Section> {
        self.sections
            .iter()
            .filter(|report| report.status == SectionStatus::Skipped)
            .map(|report| report.section)
            .collect()
    }
}
