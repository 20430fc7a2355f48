pub mod types;
pub mod registry;
pub mod command;
pub mod error;
pub mod selection;
pub mod inference;
pub mod satisfy;
pub mod pruner;
pub mod synthesizer;

pub use command::Command;
pub use error::SynthesisError;
pub use pruner::{remove_all_matching, PruneTarget};
pub use registry::{describe, short_name_for_code};
pub use satisfy::{MeasuredSatisfier, Satisfier};
pub use selection::{Selected, SelectionSummary};
pub use synthesizer::{add_constraint, constrain, constrain_coincident, Action, ConstraintPlan, ConstraintSynthesizer};
pub use types::{Constraint, ConstraintDisplay, ConstraintKind};

#[cfg(test)]
mod tests_inference;
