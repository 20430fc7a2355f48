pub mod handles;
pub mod entity;
pub mod context;
pub mod undo;

pub use context::{Group, Hover, Later, Sketch, ViewState};
pub use entity::{Entity, EntityKind};
pub use handles::{ConstraintHandle, EntityHandle, GroupHandle};
pub use undo::{UndoStack, UndoState};
