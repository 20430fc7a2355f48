//! Catalog of constraint kinds: short names, numeric codes and labels.

use super::types::{Constraint, ConstraintKind};
use strum::IntoEnumIterator;

/// Token used for a code that names no known kind.
pub const UNKNOWN_SHORT_NAME: &str = "???";

impl ConstraintKind {
    pub fn short_name(self) -> &'static str {
        match self {
            ConstraintKind::PointsCoincident => "pts-coincident",
            ConstraintKind::PtPtDistance => "pt-pt-distance",
            ConstraintKind::PtLineDistance => "pt-line-distance",
            ConstraintKind::PtPlaneDistance => "pt-plane-distance",
            ConstraintKind::PtFaceDistance => "pt-face-distance",
            ConstraintKind::PtInPlane => "pt-in-plane",
            ConstraintKind::PtOnLine => "pt-on-line",
            ConstraintKind::PtOnFace => "pt-on-face",
            ConstraintKind::EqualLengthLines => "eq-length",
            ConstraintKind::EqLenPtLineD => "eq-length-and-pt-ln-dist",
            ConstraintKind::EqPtLnDistances => "eq-pt-line-distances",
            ConstraintKind::LengthRatio => "length-ratio",
            ConstraintKind::Symmetric => "symmetric",
            ConstraintKind::SymmetricHoriz => "symmetric-h",
            ConstraintKind::SymmetricVert => "symmetric-v",
            ConstraintKind::SymmetricLine => "symmetric-line",
            ConstraintKind::AtMidpoint => "at-midpoint",
            ConstraintKind::Horizontal => "horizontal",
            ConstraintKind::Vertical => "vertical",
            ConstraintKind::Diameter => "diameter",
            ConstraintKind::PtOnCircle => "pt-on-circle",
            ConstraintKind::SameOrientation => "same-orientation",
            ConstraintKind::Angle => "angle",
            ConstraintKind::Parallel => "parallel",
            ConstraintKind::ArcLineTangent => "arc-line-tangent",
            ConstraintKind::CubicLineTangent => "cubic-line-tangent",
            ConstraintKind::Perpendicular => "perpendicular",
            ConstraintKind::EqualRadius => "eq-radius",
            ConstraintKind::EqualAngle => "eq-angle",
            ConstraintKind::Comment => "comment",
        }
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::iter().find(|k| k.code() == code)
    }

    /// Kinds drawn with a user-visible label (dimensions and comments).
    pub fn has_label(self) -> bool {
        matches!(
            self,
            ConstraintKind::PtPtDistance
                | ConstraintKind::PtPlaneDistance
                | ConstraintKind::PtLineDistance
                | ConstraintKind::PtFaceDistance
                | ConstraintKind::Diameter
                | ConstraintKind::LengthRatio
                | ConstraintKind::Angle
                | ConstraintKind::Comment
        )
    }
}

/// Short name for a raw kind code, or [`UNKNOWN_SHORT_NAME`].
pub fn short_name_for_code(code: u32) -> &'static str {
    ConstraintKind::from_code(code).map_or(UNKNOWN_SHORT_NAME, ConstraintKind::short_name)
}

/// `c<handle-hex>-<short-name>`, used in logs and tooltips.
pub fn describe(c: &Constraint) -> String {
    format!("c{:03x}-{}", c.handle.0, c.kind.short_name())
}
