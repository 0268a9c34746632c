//! Debug overlays.
//!
//! Each node can be outlined by a non-interactive, bordered view that fills
//! its guide. Colors come from a caller-supplied RNG so snapshots stay
//! reproducible with a seeded generator.

use crate::anchor::Item;
use crate::constraint::{Constraint, Priority, fill};
use crate::geometry::Color;
use crate::node::NodeId;
use crate::view::{View, ViewHandle};

#[derive(Debug, Clone)]
pub struct DebugOverlay {
    /// Node being outlined.
    pub node: NodeId,
    /// The overlay view itself; it has no intrinsic size.
    pub view: ViewHandle,
    /// Type name of the node ("Row", "Spacer", ...).
    pub tag: &'static str,
    pub border_color: Color,
    pub border_width: f32,
    /// Always false: overlays never take input.
    pub interactive: bool,
    constraints: Vec<Constraint>,
}

impl DebugOverlay {
    pub(crate) fn new(node: NodeId, tag: &'static str, border_color: Color) -> Self {
        let view = View::new(tag);
        let constraints = fill(view.item(), Item::Guide(node), Priority::REQUIRED);
        Self {
            node,
            view,
            tag,
            border_color,
            border_width: 1.0,
            interactive: false,
            constraints,
        }
    }

    /// Constraints pinning the overlay to its node.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}
