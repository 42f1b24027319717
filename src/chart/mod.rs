//! Chart logic independent of any rendering framework
//!
//! - [`selection`] - Bounded parameter selection with total transitions
//! - [`series`] - Series descriptors, alert coloring and reference lines
//! - [`stats`] - Summary statistics over derived series

pub mod selection;
pub mod series;
pub mod stats;

pub use selection::{SelectionState, MAX_SELECTED_PARAMETERS};
pub use series::{
    derive_series, reference_lines, ChartThresholds, ReferenceLine, SeriesDescriptor,
    SeriesPoint,
};
pub use stats::SeriesStatistics;
