//! Shape flattening.
//!
//! Expands group shapes into a single pre-order sequence: each group comes
//! first, followed by its children in stored order. Traversal uses an
//! explicit worklist, so nesting depth is bounded only by memory.

use crate::types::{ShapeId, Slide};

/// Flatten every shape reachable from the slide's top-level shapes.
pub fn flatten(slide: &Slide) -> Vec<ShapeId> {
    flatten_from(slide, slide.roots())
}

/// Flatten the given shapes (and everything nested under them).
///
/// Ids that don't resolve in `slide` are skipped.
pub fn flatten_from(slide: &Slide, roots: &[ShapeId]) -> Vec<ShapeId> {
    let mut out = Vec::with_capacity(roots.len());
    let mut stack: Vec<ShapeId> = roots.iter().rev().copied().collect();

    while let Some(id) = stack.pop() {
        let Some(shape) = slide.shape(id) else {
            continue;
        };
        out.push(id);
        stack.extend(shape.children().iter().rev().copied());
    }

    out
}
