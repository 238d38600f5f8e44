//! Non-invasive metabolic estimates derived from the same physiological
//! observation the deviation engine consumes.
//!
//! Two entry points:
//! - [`MetabolicMirror::non_invasive_metabolic_analysis`] is stateless.
//! - [`MetabolicMirror::analyze_metabolic_state`] compares against the
//!   metabolic baseline captured at session initialization.

pub mod estimate;
pub mod mirror;


pub use physio_core::MetabolicConfig;
pub use estimate::{GlucoseTrend, MetabolicEstimate, TrendDirection};
pub use mirror::{MetabolicClass, MetabolicMirror, MetabolicState};
