//! Auto-removal of constraints made redundant by a new one.

use super::types::ConstraintKind;
use crate::sketch::{EntityHandle, Sketch};
use tracing::debug;

/// The `(kind, entityA, ptA)` triple a prune matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PruneTarget {
    pub kind: ConstraintKind,
    pub entity_a: EntityHandle,
    pub pt_a: EntityHandle,
}

/// Delete every constraint whose kind, `entity_a` and `pt_a` all equal the
/// given ones, comparing handles. Returns how many were removed.
///
/// Nothing ever refers to a constraint, so the only other state to fix up is
/// the hover, in case it pointed at a removed constraint.
pub fn remove_all_matching(sketch: &mut Sketch, kind: ConstraintKind, entity_a: EntityHandle, pt_a: EntityHandle) -> usize {
    sketch.constraints.clear_tags();
    for c in sketch.constraints.iter_mut() {
        if c.kind == kind && c.entity_a == entity_a && c.pt_a == pt_a {
            c.tag = 1;
        }
    }
    let removed = sketch.constraints.remove_tagged();
    sketch.hover.clear();
    debug!(
        "pruned {} redundant {} constraint(s) on {} / {}",
        removed,
        kind.short_name(),
        entity_a,
        pt_a
    );
    removed
}

pub fn prune(sketch: &mut Sketch, target: &PruneTarget) -> usize {
    remove_all_matching(sketch, target.kind, target.entity_a, target.pt_a)
}
