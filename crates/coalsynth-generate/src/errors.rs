use thiserror::Error;

use coalsynth_core::Section;

/// Errors emitted while turning an input file into statements.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error("line {line}: expected the {section} header, found {found:?}")]
    HeaderMismatch {
        section: Section,
        line: usize,
        expected: &'static str,
        found: Option<String>,
    },
    #[error("input ended before the date line")]
    MissingDate,
    #[error("invalid date stamp: {0:?}")]
    InvalidDate(String),
    #[error("{section} block is not closed by END (input ended after line {line})")]
    UnterminatedBlock { section: Section, line: usize },
    #[error("core error: {0}")]
    Core(#[from] coalsynth_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
