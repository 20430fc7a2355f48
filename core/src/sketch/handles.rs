use crate::store::RawHandle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of an [`Entity`](super::Entity). `EntityHandle::NONE` marks an
/// unused reference field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityHandle(pub u32);

impl EntityHandle {
    pub const NONE: EntityHandle = EntityHandle(0);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl RawHandle for EntityHandle {
    fn from_raw(v: u32) -> Self {
        Self(v)
    }
    fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{:03x}", self.0)
    }
}

/// Handle of a [`Constraint`](crate::constraint::Constraint).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConstraintHandle(pub u32);

impl ConstraintHandle {
    pub const NONE: ConstraintHandle = ConstraintHandle(0);
}

impl RawHandle for ConstraintHandle {
    fn from_raw(v: u32) -> Self {
        Self(v)
    }
    fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ConstraintHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{:03x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupHandle(pub u32);

impl RawHandle for GroupHandle {
    fn from_raw(v: u32) -> Self {
        Self(v)
    }
    fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for GroupHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{:03x}", self.0)
    }
}
