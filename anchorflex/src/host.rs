//! The host contract.
//!
//! A host owns the real view hierarchy and the constraint solver. The engine
//! only registers rectangles with it and hands it constraints; solving
//! happens on the host's own layout pass.

use crate::constraint::{Constraint, ConstraintId};
use crate::debug::DebugOverlay;
use crate::node::NodeId;
use crate::view::ViewHandle;

pub trait Host {
    /// Register the invisible guide of a layout node.
    fn add_guide(&mut self, guide: NodeId, label: &'static str);

    /// Add a view as a content child of the host rectangle.
    fn add_view(&mut self, view: &ViewHandle);

    /// Activate constraints. Activating an already active constraint is a no-op.
    fn activate(&mut self, constraints: &[Constraint]);

    /// Deactivate and forget constraints. Unknown IDs are ignored.
    fn deactivate(&mut self, ids: &[ConstraintId]);

    /// Update the constant of an active constraint in place.
    fn set_constant(&mut self, id: ConstraintId, constant: f32);

    /// Add a diagnostic overlay. Purely visual.
    fn add_debug_overlay(&mut self, overlay: &DebugOverlay);

    /// Something changed; schedule a layout pass.
    fn set_needs_layout(&mut self);
}

impl<H: Host + ?Sized> Host for &mut H {
    fn add_guide(&mut self, guide: NodeId, label: &'static str) {
        (**self).add_guide(guide, label);
    }

    fn add_view(&mut self, view: &ViewHandle) {
        (**self).add_view(view);
    }

    fn activate(&mut self, constraints: &[Constraint]) {
        (**self).activate(constraints);
    }

    fn deactivate(&mut self, ids: &[ConstraintId]) {
        (**self).deactivate(ids);
    }

    fn set_constant(&mut self, id: ConstraintId, constant: f32) {
        (**self).set_constant(id, constant);
    }

    fn add_debug_overlay(&mut self, overlay: &DebugOverlay) {
        (**self).add_debug_overlay(overlay);
    }

    fn set_needs_layout(&mut self) {
        (**self).set_needs_layout();
    }
}
