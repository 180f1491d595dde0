mod error;
mod histogram;
mod series_aligner;
mod term_structure;
mod trend;

pub use error::AnalysisError;
pub use histogram::{AxisTick, Bucket, Histogram, TailShare, histogram, histogram_of_values};
pub use series_aligner::align;
pub use term_structure::{
    CurveShape, TermStructureSummary, illustrative_curve, summarize, synthesize_contracts,
};
pub use trend::{TrendPoint, TrendSegment, fit_line, try_fit_line};
