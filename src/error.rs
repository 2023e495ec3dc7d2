use thiserror::Error;

/// Parsing failures. Only `MissingCaseNumber` is fatal for a page; person
/// extraction failures are caught per decedent and accumulated as strings
/// alongside the results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No case-number pattern anywhere in the input. The page is not a
    /// fatality report and parsing aborts.
    #[error("no case number found in page content")]
    MissingCaseNumber,

    /// A decedent descriptor matched none of the known identity grammars.
    #[error("unrecognized person descriptor: {0:?}")]
    UnrecognizedPersonFormat(String),
}
