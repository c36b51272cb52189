//! Statement generation for coalsynth.
//!
//! Reads the fixed three-section input (stockpiles, blend, coal movements)
//! line by line and writes one SQL `INSERT` statement per output line. Coal
//! movements are synthesized from daily tonnage: one truck load per
//! [`DEFAULT_UNIT_SIZE`] tonnes, spread evenly over the day and assigned to a
//! truck chosen by an injected [`TruckPicker`].

pub mod engine;
pub mod errors;
pub mod lines;
pub mod model;
pub mod output;
pub mod synth;
pub mod transcribe;
pub mod trucks;

pub use engine::{DriverState, GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use lines::LineSource;
pub use model::{
    CoalReport, GenerateOptions, GenerationReport, GenerationWarning, SchemaPolicy,
    SectionReport, SectionStatus,
};
pub use output::sql::StatementSink;
pub use synth::{
    ARRIVAL_FORMAT, DEFAULT_UNIT_SIZE, MovementRecord, MovementSynthesizer, SECONDS_PER_DAY,
    parse_date_stamp,
};
pub use transcribe::{
    CoalEntry, MovementBatch, read_coal_entry, transcribe_blend, transcribe_movements,
    transcribe_stockpile,
};
pub use trucks::{DEFAULT_TRUCK_COUNT, RandomPicker, SequencePicker, TruckPicker, TruckRoster};
