//! Tectonic regime classification.
//!
//! The engine runs, for one hypocenter:
//! - Tensor selection (given, fetched by event ID, or composite)
//! - Regionalization and depth-band subtype
//! - Slab geometry lookup
//! - Focal mechanism classification
//! - Subduction tests and the subtype decision table inside subduction domains

mod assessment;
mod config;
mod decision;
mod engine;

pub use assessment::{EventInput, Hypocenter, TectonicAssessment, TensorType};
pub use config::StrecConfig;
pub use decision::{
    decide, DepthZone, RegimeDecision, TensorEvidence, WARNING_ABOVE_INTERFACE, WARNING_NEAR_BELOW_INTERFACE,
    WARNING_NO_FOCAL_MECHANISM,
};
pub use engine::{ClassifyError, RegimeEngine};
