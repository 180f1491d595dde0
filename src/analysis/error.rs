use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AnalysisError {
    #[error("need at least {needed} points to fit a line, got {got}")]
    TooFewPoints { needed: usize, got: usize },

    /// Every x value is the same (or the fit produced a non-finite slope).
    #[error("cannot fit a line: x values have no spread")]
    DegenerateFit,
}
