use super::command::Command;
use thiserror::Error;

/// A selection the user can fix. Raised before anything is mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error("{}", .0.bad_selection_message())]
    BadSelection(Command),
    #[error("Must be locked in to workplane when constraining symmetric without an explicit symmetry plane.")]
    SymmetricNeedsWorkplane,
    #[error("Select workplane before constraining horiz/vert.")]
    HorizVertNeedsWorkplane,
    #[error(
        "The tangent arc and line segment must share an endpoint. Constrain them with \
         Constrain -> On Point before constraining tangent."
    )]
    ArcTangentNeedsSharedEndpoint,
    #[error(
        "The tangent cubic and line segment must share an endpoint. Constrain them with \
         Constrain -> On Point before constraining tangent."
    )]
    CubicTangentNeedsSharedEndpoint,
}
