use super::context::Group;
use super::entity::Entity;
use super::handles::GroupHandle;
use crate::constraint::Constraint;
use crate::store::HandleStore;

/// Everything needed to put the sketch back the way it was.
#[derive(Debug, Clone, Default)]
pub struct UndoState {
    pub entities: HandleStore<Entity>,
    pub constraints: HandleStore<Constraint>,
    pub groups: HandleStore<Group>,
    pub active_group: GroupHandle,
}

/// Bounded stack of snapshots; the oldest is dropped once `max_depth` is hit.
#[derive(Debug, Clone)]
pub struct UndoStack {
    states: Vec<UndoState>,
    max_depth: usize,
}

impl UndoStack {
    pub fn new(max_depth: usize) -> Self {
        Self { states: Vec::new(), max_depth }
    }

    pub fn push(&mut self, state: UndoState) {
        if self.max_depth == 0 {
            return;
        }
        if self.states.len() >= self.max_depth {
            self.states.remove(0);
        }
        self.states.push(state);
    }

    pub fn pop(&mut self) -> Option<UndoState> {
        self.states.pop()
    }

    pub fn depth(&self) -> usize {
        self.states.len()
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(16)
    }
}
