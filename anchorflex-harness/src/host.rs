//! In-memory host backed by [`solve`].

use anchorflex::{Constraint, ConstraintId, DebugOverlay, Host, Item, NodeId, Rect, ViewHandle, ViewId};
use indexmap::IndexMap;

use crate::config::HostConfig;
use crate::error::HarnessError;
use crate::solver::{Solution, solve};

/// A host that keeps the active constraint set in memory and solves it on demand.
#[derive(Debug, Default)]
pub struct SolverHost {
    config: HostConfig,
    guides: IndexMap<NodeId, &'static str>,
    views: IndexMap<ViewId, ViewHandle>,
    constraints: IndexMap<ConstraintId, Constraint>,
    overlays: IndexMap<NodeId, DebugOverlay>,
    needs_layout: bool,
    passes: usize,
    solution: Option<Solution>,
}

impl SolverHost {
    pub fn new(config: HostConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Resize the host rectangle. Takes effect on the next layout pass.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.bounds = (width, height).into();
        self.needs_layout = true;
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Number of layout passes run so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Run a layout pass if anything changed since the last one.
    pub fn layout_if_needed(&mut self) -> &Solution {
        if self.needs_layout || self.solution.is_none() {
            self.layout_pass();
        }
        self.solution.get_or_insert_with(Solution::default)
    }

    /// Solve the active constraints plus the intrinsic sizes of every view.
    pub fn layout_pass(&mut self) -> &Solution {
        let priority = self.config.intrinsic_priority();
        let intrinsic: Vec<Constraint> = self
            .views
            .values()
            .chain(self.overlays.values().map(|o| &o.view))
            .filter_map(|view| view.intrinsic_size().map(|size| (view.item(), size)))
            .flat_map(|(item, size)| {
                [
                    item.width().equal_to_constant(size.width).with_priority(priority),
                    item.height().equal_to_constant(size.height).with_priority(priority),
                ]
            })
            .collect();

        let items = self
            .guides
            .keys()
            .map(|&id| Item::Guide(id))
            .chain(self.views.values().map(|view| view.item()));
        let solution = solve(
            items,
            self.constraints.values().chain(&intrinsic),
            self.config.bounds,
            self.config.tolerance,
        );

        self.passes += 1;
        self.needs_layout = false;
        tracing::info!(
            pass = self.passes,
            constraints = self.constraints.len(),
            conflicts = solution.conflicts.len(),
            "layout pass"
        );
        self.solution.insert(solution)
    }

    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    pub fn frame(&self, item: Item) -> Result<Rect, HarnessError> {
        self.solution
            .as_ref()
            .and_then(|solution| solution.frame(item))
            .ok_or(HarnessError::UnknownItem(item))
    }

    pub fn guide_frame(&self, id: NodeId) -> Result<Rect, HarnessError> {
        self.frame(Item::Guide(id))
    }

    pub fn view_frame(&self, view: &ViewHandle) -> Result<Rect, HarnessError> {
        self.frame(view.item())
    }

    pub fn guide_label(&self, id: NodeId) -> Option<&'static str> {
        self.guides.get(&id).copied()
    }

    pub fn guides(&self) -> impl Iterator<Item = (NodeId, &'static str)> + '_ {
        self.guides.iter().map(|(&id, &label)| (id, label))
    }

    pub fn views(&self) -> impl Iterator<Item = &ViewHandle> {
        self.views.values()
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint> {
        self.constraints.get(&id)
    }

    /// Active constraints in activation order.
    pub fn active_constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.values()
    }

    pub fn overlays(&self) -> impl Iterator<Item = &DebugOverlay> {
        self.overlays.values()
    }
}

impl Host for SolverHost {
    fn add_guide(&mut self, guide: NodeId, label: &'static str) {
        self.guides.insert(guide, label);
    }

    fn add_view(&mut self, view: &ViewHandle) {
        self.views.insert(view.id(), view.clone());
    }

    fn activate(&mut self, constraints: &[Constraint]) {
        for constraint in constraints {
            self.constraints.insert(constraint.id(), constraint.clone());
        }
    }

    fn deactivate(&mut self, ids: &[ConstraintId]) {
        for id in ids {
            self.constraints.shift_remove(id);
        }
    }

    fn set_constant(&mut self, id: ConstraintId, constant: f32) {
        match self.constraints.get_mut(&id) {
            Some(constraint) => *constraint = constraint.clone().with_constant(constant),
            None => tracing::warn!(constraint = id.raw(), "set_constant on an inactive constraint"),
        }
    }

    fn add_debug_overlay(&mut self, overlay: &DebugOverlay) {
        self.overlays.insert(overlay.node, overlay.clone());
    }

    fn set_needs_layout(&mut self) {
        self.needs_layout = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchorflex::{FlexLayout, Node, View, column, flex};

    #[test]
    fn test_unsolved_frame_is_an_error() {
        let host = SolverHost::default();
        let id = NodeId::from_raw(1);
        assert!(matches!(host.guide_frame(id), Err(HarnessError::UnknownItem(_))));
    }

    #[test]
    fn test_layout_if_needed_skips_clean_passes() {
        let mut layout = FlexLayout::new(column([flex(1.0)])).unwrap();
        layout.set_root_view(SolverHost::default()).unwrap();
        let host = layout.host_mut().unwrap();
        assert!(host.needs_layout());
        host.layout_if_needed();
        host.layout_if_needed();
        assert_eq!(host.passes(), 1);
        host.resize(100.0, 100.0);
        host.layout_if_needed();
        assert_eq!(host.passes(), 2);
    }

    #[test]
    fn test_root_fills_host_bounds() {
        let tree = Node::new();
        let root = tree.id();
        let mut layout = FlexLayout::new(tree).unwrap();
        let config = HostConfig::default().with_bounds((320.0, 480.0));
        layout.set_root_view(SolverHost::new(config)).unwrap();
        let host = layout.host_mut().unwrap();
        host.layout_if_needed();
        assert_eq!(host.guide_frame(root).unwrap(), Rect::new(0.0, 0.0, 320.0, 480.0));
        assert_eq!(host.guide_label(root), Some("Flex"));
    }

    #[test]
    fn test_intrinsic_size_applies_to_fitting_views() {
        let label = View::with_intrinsic_size("title", (80.0, 20.0).into());
        let tree = column([Node::new().view(label.clone()), flex(1.0)]);
        let mut layout = FlexLayout::new(tree).unwrap();
        layout.set_root_view(SolverHost::default()).unwrap();
        let host = layout.host_mut().unwrap();
        host.layout_if_needed();
        let frame = host.view_frame(&label).unwrap();
        // stretched across the column, natural height
        assert!((frame.width - 375.0).abs() < 1e-3);
        assert!((frame.height - 20.0).abs() < 1e-3);
        assert!(host.solution().unwrap().is_consistent());
    }
}
