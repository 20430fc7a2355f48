use crate::geometry::Vector3;
use crate::sketch::{ConstraintHandle, EntityHandle, GroupHandle};
use crate::store::Handled;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Every kind of constraint the sketch understands.
///
/// The discriminants are the stable numeric codes used to identify a kind
/// outside the process (see [`ConstraintKind::from_code`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
#[repr(u32)]
pub enum ConstraintKind {
    PointsCoincident = 20,
    PtPtDistance = 30,
    PtPlaneDistance = 31,
    PtLineDistance = 32,
    PtFaceDistance = 33,
    PtInPlane = 41,
    PtOnLine = 42,
    PtOnFace = 43,
    EqualLengthLines = 50,
    LengthRatio = 51,
    EqLenPtLineD = 52,
    EqPtLnDistances = 53,
    EqualAngle = 54,
    EqualRadius = 55,
    Symmetric = 60,
    SymmetricHoriz = 61,
    SymmetricVert = 62,
    SymmetricLine = 63,
    AtMidpoint = 70,
    Horizontal = 80,
    Vertical = 81,
    Diameter = 90,
    PtOnCircle = 100,
    SameOrientation = 110,
    Angle = 120,
    Parallel = 121,
    Perpendicular = 122,
    ArcLineTangent = 123,
    CubicLineTangent = 124,
    Comment = 1000,
}

/// Display-only placement data; never part of the solved system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintDisplay {
    pub offset: Vector3,
}

impl Default for ConstraintDisplay {
    fn default() -> Self {
        Self { offset: Vector3::zeros() }
    }
}

/// A geometric constraint between sketch entities.
///
/// Exactly the fields relevant to `kind` are meaningful; unused point and
/// entity references hold [`EntityHandle::NONE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub handle: ConstraintHandle,
    pub kind: ConstraintKind,
    pub group: GroupHandle,
    /// Workplane the constraint is interpreted in; `None` is free in 3D.
    pub workplane: Option<EntityHandle>,

    pub val_a: f64,
    pub pt_a: EntityHandle,
    pub pt_b: EntityHandle,
    pub entity_a: EntityHandle,
    pub entity_b: EntityHandle,
    pub entity_c: EntityHandle,
    pub entity_d: EntityHandle,

    /// Selects between two geometrically valid interpretations.
    pub other: bool,
    pub other2: bool,
    /// Non-driving annotation.
    pub reference: bool,

    pub disp: ConstraintDisplay,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,

    #[serde(skip)]
    pub tag: i32,
}

impl Constraint {
    /// A blank constraint of `kind` with every reference unset.
    pub fn new(kind: ConstraintKind, group: GroupHandle, workplane: Option<EntityHandle>) -> Self {
        Self {
            handle: ConstraintHandle::NONE,
            kind,
            group,
            workplane,
            val_a: 0.0,
            pt_a: EntityHandle::NONE,
            pt_b: EntityHandle::NONE,
            entity_a: EntityHandle::NONE,
            entity_b: EntityHandle::NONE,
            entity_c: EntityHandle::NONE,
            entity_d: EntityHandle::NONE,
            other: false,
            other2: false,
            reference: false,
            disp: ConstraintDisplay::default(),
            comment: String::new(),
            tag: 0,
        }
    }
}

impl Handled for Constraint {
    type Handle = ConstraintHandle;

    fn handle(&self) -> ConstraintHandle {
        self.handle
    }
    fn set_handle(&mut self, h: ConstraintHandle) {
        self.handle = h;
    }
    fn tag(&self) -> i32 {
        self.tag
    }
    fn set_tag(&mut self, tag: i32) {
        self.tag = tag;
    }
}
