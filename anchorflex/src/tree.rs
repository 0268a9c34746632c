//! The materialized layout tree.
//!
//! [`FlexLayout`] turns a [`Node`] expression into an arena of layout nodes,
//! each owning the constraints it generated. Constraints stay inert until
//! [`FlexLayout::set_root_view`] hands them to a [`Host`]; afterwards every
//! mutation (flex weight, fixed size, active flag) is pushed to the host
//! immediately and the host is asked for a layout pass.
//!
//! # Directional containers
//!
//! ```text
//!  no child grows:   [s0][c0][s1][c1][s2]      s = synthesized spacer
//!  some child grows: [c0][c1]
//!
//!  chain:     c[0].start == self.start,  c[i].start == c[i-1].end   (required)
//!  cross:     stretch -> space == self.space @999, start == self.start
//!             center  -> center == self.center @999
//!  alignment: start         -> s_last.end == self.end                @900
//!             center        -> s0.space == s_last.space              @900
//!             space-between -> s0.space == 0, s_last.space == 0,
//!                              s_i.space == s1.space                  @900
//!  closing:   self.end == c_last.end                                 @888
//!  hugging:   s_i.space == 0            interior @250, outer @50
//! ```
//!
//! Growth ties between flexible children are kept in a separate list so they
//! can be regenerated whenever a weight changes.

use std::collections::HashSet;

use indexmap::IndexMap;
use rand::Rng;

use crate::anchor::{AnchorPair, Direction, Item};
use crate::constraint::{Constraint, ConstraintId, Priority, fill};
use crate::debug::DebugOverlay;
use crate::error::LayoutError;
use crate::geometry::Color;
use crate::host::Host;
use crate::node::{CrossAxisAlignment, MainAxisAlignment, Node, NodeId, NodeKind};
use crate::view::ViewHandle;

/// Identifier of a node's fixed-width constraint.
pub const WIDTH_CONSTRAINT_ID: &str = "Flex-Width";
/// Identifier of a node's fixed-height constraint.
pub const HEIGHT_CONSTRAINT_ID: &str = "Flex-Height";

/// A node after materialization.
#[derive(Debug)]
struct LayoutNode {
    kind: NodeKind,
    label: &'static str,
    key: Option<String>,
    flex: f32,
    view: Option<ViewHandle>,
    /// Effective children: for containers without growth this includes spacers.
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    /// Container to notify when `flex` changes.
    flex_observer: Option<NodeId>,
    synthesized: bool,
    constraints: Vec<Constraint>,
    /// Subset of `constraints` regenerated by `recompute_flex`.
    flex_constraints: Vec<ConstraintId>,
    /// `width == 0`, `height == 0`; active while the node is inactive.
    zero_constraints: [Constraint; 2],
    active: bool,
    overlay: Option<DebugOverlay>,
}

impl LayoutNode {
    fn tagged(&self, identifier: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.identifier() == Some(identifier))
    }
}

/// A layout tree plus, once attached, the host it drives.
#[derive(Debug)]
pub struct FlexLayout<H> {
    /// Arena in pre-order.
    nodes: IndexMap<NodeId, LayoutNode>,
    root: NodeId,
    root_fill: Vec<Constraint>,
    host: Option<H>,
}

impl<H: Host> FlexLayout<H> {
    /// Materialize `root` and every descendant into constraints.
    ///
    /// Nothing is sent to a host yet.
    pub fn new(root: Node) -> Result<Self, LayoutError> {
        validate(&root, &mut HashSet::new())?;
        let mut layout = Self {
            nodes: IndexMap::new(),
            root: root.id,
            root_fill: Vec::new(),
            host: None,
        };
        layout.insert(root, None);
        tracing::debug!(
            nodes = layout.nodes.len(),
            constraints = layout.all_constraints().count(),
            "materialized layout tree"
        );
        Ok(layout)
    }

    fn insert(&mut self, node: Node, parent: Option<NodeId>) -> NodeId {
        let Node {
            id,
            kind,
            label,
            key,
            flex,
            width,
            height,
            view,
            children,
            main_alignment,
            cross_alignment,
        } = node;

        let guide = Item::Guide(id);
        let mut constraints = Vec::new();
        if width != 0.0 {
            constraints.push(guide.width().equal_to_constant(width).with_identifier(WIDTH_CONSTRAINT_ID));
        }
        if height != 0.0 {
            constraints.push(guide.height().equal_to_constant(height).with_identifier(HEIGHT_CONSTRAINT_ID));
        }
        if let Some(view) = &view {
            let item = view.item();
            if flex == 0.0 && width == 0.0 && height == 0.0 {
                // Fit to the view's natural size.
                constraints.push(item.top().equal_to(guide.top()));
                constraints.push(item.left().equal_to(guide.left()));
                constraints.push(guide.height().equal_to(item.height()).with_identifier(HEIGHT_CONSTRAINT_ID));
                constraints.push(guide.width().equal_to(item.width()).with_identifier(WIDTH_CONSTRAINT_ID));
            } else {
                constraints.extend(fill(item, guide, Priority::REQUIRED));
            }
        }

        self.nodes.insert(
            id,
            LayoutNode {
                kind,
                label,
                key,
                flex,
                view,
                children: Vec::new(),
                parent,
                flex_observer: None,
                synthesized: false,
                constraints,
                flex_constraints: Vec::new(),
                zero_constraints: [guide.width().equal_to_constant(0.0), guide.height().equal_to_constant(0.0)],
                active: true,
                overlay: None,
            },
        );

        match kind.direction() {
            Some(direction) => {
                self.build_directional(id, direction, children, main_alignment, cross_alignment);
            }
            None => {
                for child in children {
                    let child_id = self.insert(child, Some(id));
                    let fills = fill(Item::Guide(child_id), guide, Priority::REQUIRED);
                    let node = &mut self.nodes[&id];
                    node.children.push(child_id);
                    node.constraints.extend(fills);
                }
            }
        }
        id
    }

    fn insert_spacer(&mut self, parent: NodeId) -> NodeId {
        let id = self.insert(Node::new(), Some(parent));
        self.nodes[&id].synthesized = true;
        id
    }

    /// Wire a row or column. A container without children gets no spacers
    /// (zero effective children) and no chain, alignment or closing constraint.
    fn build_directional(
        &mut self,
        id: NodeId,
        direction: Direction,
        children: Vec<Node>,
        main_alignment: MainAxisAlignment,
        cross_alignment: CrossAxisAlignment,
    ) {
        let has_flex = children.iter().any(|c| c.flex > 0.0);

        let mut spacers = Vec::new();
        let mut effective = Vec::with_capacity(children.len() * 2 + 1);
        if has_flex {
            for child in children {
                effective.push(self.insert(child, Some(id)));
            }
        } else if !children.is_empty() {
            let leading = self.insert_spacer(id);
            effective.push(leading);
            spacers.push(leading);
            for child in children {
                effective.push(self.insert(child, Some(id)));
                let spacer = self.insert_spacer(id);
                effective.push(spacer);
                spacers.push(spacer);
            }
        }

        let container = self.anchor_pair(id, direction);
        let mut constraints = Vec::new();
        for (index, &child) in effective.iter().enumerate() {
            self.nodes[&child].flex_observer = Some(id);
            let anchors = self.anchor_pair(child, direction);

            match cross_alignment {
                CrossAxisAlignment::Stretch => {
                    constraints.push(
                        anchors
                            .cross
                            .space
                            .equal_to(container.cross.space)
                            .with_priority(Priority::CROSS_ALIGNMENT),
                    );
                    constraints.push(anchors.cross.start.equal_to(container.cross.start));
                }
                CrossAxisAlignment::Center => {
                    constraints.push(
                        anchors
                            .cross
                            .center
                            .equal_to(container.cross.center)
                            .with_priority(Priority::CROSS_ALIGNMENT),
                    );
                }
            }

            if index == 0 {
                constraints.push(anchors.main.start.equal_to(container.main.start));
            } else {
                let previous = self.anchor_pair(effective[index - 1], direction);
                constraints.push(anchors.main.start.equal_to(previous.main.end));
            }
        }

        // Spacers are zero-size unless alignment claims their slack. Outer
        // spacers give way first so leftover slack lands at the edges.
        let outer = [spacers.first().copied(), spacers.last().copied()];
        for &spacer in &spacers {
            let priority = if outer.contains(&Some(spacer)) {
                Priority::FITTING
            } else {
                Priority::LOW
            };
            let space = self.anchor_pair(spacer, direction).main.space;
            constraints.push(space.equal_to_constant(0.0).with_priority(priority));
        }

        let label = {
            let node = &mut self.nodes[&id];
            node.children = effective.clone();
            node.constraints.append(&mut constraints);
            node.label
        };
        self.redistribute(id, direction);

        if has_flex {
            if main_alignment != MainAxisAlignment::Start {
                tracing::warn!(
                    container = %id,
                    ?main_alignment,
                    "main axis alignment has no effect when a child has flex"
                );
            }
        } else if let (Some(&leading), Some(&trailing)) = (spacers.first(), spacers.last()) {
            let leading = self.anchor_pair(leading, direction).main;
            let trailing = self.anchor_pair(trailing, direction).main;
            let alignment = match main_alignment {
                MainAxisAlignment::Start => vec![trailing.end.equal_to(container.main.end)],
                MainAxisAlignment::Center => vec![leading.space.equal_to(trailing.space)],
                MainAxisAlignment::SpaceBetween => {
                    let mut gaps = vec![
                        leading.space.equal_to_constant(0.0),
                        trailing.space.equal_to_constant(0.0),
                    ];
                    if spacers.len() > 2 {
                        let first_gap = self.anchor_pair(spacers[1], direction).main.space;
                        for &spacer in &spacers[2..spacers.len() - 1] {
                            let gap = self.anchor_pair(spacer, direction).main.space;
                            gaps.push(gap.equal_to(first_gap));
                        }
                    }
                    gaps
                }
            };
            constraints.extend(
                alignment
                    .into_iter()
                    .map(|c| c.with_priority(Priority::MAIN_ALIGNMENT)),
            );
        }

        if let Some(&last) = effective.last() {
            let last = self.anchor_pair(last, direction);
            constraints.push(
                container
                    .main
                    .end
                    .equal_to(last.main.end)
                    .with_priority(Priority::CONTENT_FIT)
                    .with_identifier(format!("{label}.end")),
            );
        }

        self.nodes[&id].constraints.append(&mut constraints);
    }

    /// Regenerate the proportional growth constraints of `container`.
    ///
    /// Runs automatically whenever a child's flex weight changes; calling it
    /// again with unchanged weights yields an equivalent constraint set.
    pub fn recompute_flex(&mut self, container: NodeId) -> Result<(), LayoutError> {
        let node = self.nodes.get(&container).ok_or(LayoutError::UnknownNode(container))?;
        let direction = node.kind.direction().ok_or(LayoutError::NotAContainer(container))?;
        self.redistribute(container, direction);
        Ok(())
    }

    fn redistribute(&mut self, container: NodeId, direction: Direction) {
        let node = &mut self.nodes[&container];
        let stale = std::mem::take(&mut node.flex_constraints);
        node.constraints.retain(|c| !stale.contains(&c.id()));
        let children = node.children.clone();

        let mut base: Option<(NodeId, f32)> = None;
        let mut fresh = Vec::new();
        for child in children {
            let flex = self.nodes[&child].flex;
            if flex <= 0.0 {
                continue;
            }
            match base {
                None => base = Some((child, flex)),
                Some((base_id, base_flex)) => {
                    let space = self.anchor_pair(child, direction).main.space;
                    let base_space = self.anchor_pair(base_id, direction).main.space;
                    fresh.push(space.equal_to_multiplied(base_space, flex / base_flex));
                }
            }
        }

        tracing::debug!(
            %container,
            removed = stale.len(),
            added = fresh.len(),
            "redistributed flex"
        );

        let node = &mut self.nodes[&container];
        node.flex_constraints = fresh.iter().map(Constraint::id).collect();
        node.constraints.extend(fresh.iter().cloned());

        if let Some(host) = &mut self.host {
            if !stale.is_empty() {
                host.deactivate(&stale);
            }
            host.activate(&fresh);
            host.set_needs_layout();
        }
    }

    /// Attach the tree to `host` and pin the root to the host rectangle.
    ///
    /// Registers every guide and view, activates every constraint, then
    /// activates four required edge constraints on the root. Attachment is
    /// permanent.
    pub fn set_root_view(&mut self, mut host: H) -> Result<(), LayoutError> {
        if self.host.is_some() {
            return Err(LayoutError::AlreadyAttached);
        }
        self.attach_to_host(self.root, &mut host);
        for node in self.nodes.values() {
            host.activate(&node.constraints);
        }
        self.root_fill = fill(Item::Guide(self.root), Item::Host, Priority::REQUIRED);
        host.activate(&self.root_fill);
        host.set_needs_layout();
        tracing::info!(
            root = %self.root,
            nodes = self.nodes.len(),
            constraints = self.all_constraints().count(),
            "attached layout to host"
        );
        self.host = Some(host);
        Ok(())
    }

    fn attach_to_host(&self, id: NodeId, host: &mut H) {
        let node = &self.nodes[&id];
        host.add_guide(id, node.label);
        for &child in &node.children {
            self.attach_to_host(child, host);
        }
        if let Some(view) = &node.view {
            host.add_view(view);
        }
    }

    /// Outline every node with a bordered overlay.
    ///
    /// Overlays are created on the first call (with a color from `rng`) and
    /// re-added on later calls. No-op while unattached.
    pub fn debug_draw<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let Some(host) = &mut self.host else {
            tracing::warn!("debug_draw on an unattached layout has no effect");
            return;
        };
        for (&id, node) in &mut self.nodes {
            let label = node.label;
            let overlay = node
                .overlay
                .get_or_insert_with(|| DebugOverlay::new(id, label, Color::random(&mut *rng)));
            host.add_debug_overlay(overlay);
            host.activate(overlay.constraints());
        }
        host.set_needs_layout();
    }

    fn node(&self, id: NodeId) -> Result<&LayoutNode, LayoutError> {
        self.nodes.get(&id).ok_or(LayoutError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut LayoutNode, LayoutError> {
        self.nodes.get_mut(&id).ok_or(LayoutError::UnknownNode(id))
    }

    fn anchor_pair(&self, id: NodeId, direction: Direction) -> AnchorPair {
        let node = &self.nodes[&id];
        AnchorPair::for_direction(
            Item::Guide(id),
            direction,
            node.tagged(WIDTH_CONSTRAINT_ID).map(Constraint::id),
            node.tagged(HEIGHT_CONSTRAINT_ID).map(Constraint::id),
        )
    }

    /// Main/cross anchors of a node's guide for `direction`.
    pub fn anchors(&self, id: NodeId, direction: Direction) -> Result<AnchorPair, LayoutError> {
        self.node(id)?;
        Ok(self.anchor_pair(id, direction))
    }

    pub fn flex(&self, id: NodeId) -> Result<f32, LayoutError> {
        Ok(self.node(id)?.flex)
    }

    /// Change a node's growth weight and let its container redistribute.
    pub fn set_flex(&mut self, id: NodeId, flex: f32) -> Result<(), LayoutError> {
        if !flex.is_finite() || flex < 0.0 {
            return Err(LayoutError::InvalidFlex(flex));
        }
        let node = self.node_mut(id)?;
        node.flex = flex;
        if let Some(observer) = node.flex_observer {
            self.recompute_flex(observer)?;
        }
        Ok(())
    }

    /// Live constant of the node's `Flex-Width` constraint, 0 when there is none.
    pub fn width(&self, id: NodeId) -> Result<f32, LayoutError> {
        Ok(self.node(id)?.tagged(WIDTH_CONSTRAINT_ID).map_or(0.0, Constraint::constant))
    }

    pub fn set_width(&mut self, id: NodeId, width: f32) -> Result<(), LayoutError> {
        self.set_tagged_constant(id, WIDTH_CONSTRAINT_ID, width)
    }

    /// Live constant of the node's `Flex-Height` constraint, 0 when there is none.
    pub fn height(&self, id: NodeId) -> Result<f32, LayoutError> {
        Ok(self.node(id)?.tagged(HEIGHT_CONSTRAINT_ID).map_or(0.0, Constraint::constant))
    }

    pub fn set_height(&mut self, id: NodeId, height: f32) -> Result<(), LayoutError> {
        self.set_tagged_constant(id, HEIGHT_CONSTRAINT_ID, height)
    }

    fn set_tagged_constant(&mut self, id: NodeId, identifier: &str, value: f32) -> Result<(), LayoutError> {
        let node = self.nodes.get_mut(&id).ok_or(LayoutError::UnknownNode(id))?;
        let Some(constraint) = node
            .constraints
            .iter_mut()
            .find(|c| c.identifier() == Some(identifier))
        else {
            tracing::debug!(node = %id, identifier, "no fixed-size constraint to update");
            return Ok(());
        };
        constraint.constant = value;
        let constraint_id = constraint.id();
        // Fixed sizes of an inactive node are parked; reactivation sends the new constant.
        let parked = !node.active && constraint.second().is_none();
        if let Some(host) = self.host.as_mut().filter(|_| !parked) {
            host.set_constant(constraint_id, value);
            host.set_needs_layout();
        }
        Ok(())
    }

    pub fn is_active(&self, id: NodeId) -> Result<bool, LayoutError> {
        Ok(self.node(id)?.active)
    }

    /// Take a node out of the flow (collapse it to zero size) or put it back.
    ///
    /// While inactive the node's fixed width/height constraints are withdrawn
    /// from the host. Has no effect until the layout is attached.
    pub fn set_active(&mut self, id: NodeId, active: bool) -> Result<(), LayoutError> {
        let node = self.nodes.get_mut(&id).ok_or(LayoutError::UnknownNode(id))?;
        let Some(host) = &mut self.host else {
            tracing::warn!(node = %id, "setting active on an unattached layout has no effect");
            return Ok(());
        };
        if node.active == active {
            return Ok(());
        }
        node.active = active;
        // Fixed sizes would fight the zero pair, so they sit out while collapsed.
        let fixed: Vec<Constraint> = node
            .constraints
            .iter()
            .filter(|c| c.second().is_none() && is_size_tag(c.identifier()))
            .cloned()
            .collect();
        let zero_ids: Vec<_> = node.zero_constraints.iter().map(Constraint::id).collect();
        if active {
            host.deactivate(&zero_ids);
            host.activate(&fixed);
        } else {
            let fixed_ids: Vec<_> = fixed.iter().map(Constraint::id).collect();
            host.deactivate(&fixed_ids);
            host.activate(&node.zero_constraints);
        }
        host.set_needs_layout();
        Ok(())
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look a node up by the key given with [`Node::key`].
    pub fn find(&self, key: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.key.as_deref() == Some(key))
            .map(|(&id, _)| id)
    }

    /// Effective children, including synthesized spacers.
    pub fn effective_children(&self, id: NodeId) -> Result<&[NodeId], LayoutError> {
        Ok(&self.node(id)?.children)
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, LayoutError> {
        Ok(self.node(id)?.parent)
    }

    pub fn kind(&self, id: NodeId) -> Result<NodeKind, LayoutError> {
        Ok(self.node(id)?.kind)
    }

    /// Type name used for overlays and closing-constraint identifiers.
    pub fn label(&self, id: NodeId) -> Result<&'static str, LayoutError> {
        Ok(self.node(id)?.label)
    }

    /// Whether the node is a spacer inserted by its container.
    pub fn is_synthesized(&self, id: NodeId) -> Result<bool, LayoutError> {
        Ok(self.node(id)?.synthesized)
    }

    pub fn view(&self, id: NodeId) -> Result<Option<&ViewHandle>, LayoutError> {
        Ok(self.node(id)?.view.as_ref())
    }

    /// Constraints owned by a node (not counting its inactive zero-size pair).
    pub fn constraints(&self, id: NodeId) -> Result<&[Constraint], LayoutError> {
        Ok(&self.node(id)?.constraints)
    }

    /// Current proportional growth constraints of a container.
    pub fn flex_constraints(&self, id: NodeId) -> Result<Vec<&Constraint>, LayoutError> {
        let node = self.node(id)?;
        Ok(node
            .constraints
            .iter()
            .filter(|c| node.flex_constraints.contains(&c.id()))
            .collect())
    }

    /// Every constraint owned by the tree, in pre-order.
    pub fn all_constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.nodes
            .values()
            .flat_map(|node| node.constraints.iter())
            .chain(self.root_fill.iter())
    }

    /// Constraints carrying `identifier`.
    pub fn constraints_tagged<'a>(&'a self, identifier: &'a str) -> impl Iterator<Item = &'a Constraint> + 'a {
        self.all_constraints().filter(move |c| c.identifier() == Some(identifier))
    }

    /// Node IDs in pre-order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_attached(&self) -> bool {
        self.host.is_some()
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }
}

/// Reject bad weights and subtrees that appear twice (cloned nodes keep their id).
fn validate(node: &Node, seen: &mut HashSet<NodeId>) -> Result<(), LayoutError> {
    if !seen.insert(node.id) {
        return Err(LayoutError::DuplicateNode(node.id));
    }
    if !node.flex.is_finite() || node.flex < 0.0 {
        return Err(LayoutError::InvalidFlex(node.flex));
    }
    node.children.iter().try_for_each(|child| validate(child, seen))
}

fn is_size_tag(identifier: Option<&str>) -> bool {
    matches!(identifier, Some(WIDTH_CONSTRAINT_ID | HEIGHT_CONSTRAINT_ID))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{column, flex, row, spacer};
    use crate::geometry::Size;
    use crate::host::recording::{Call, RecordingHost};
    use crate::view::View;

    type Layout = FlexLayout<RecordingHost>;

    fn count_tagged(layout: &Layout, identifier: &str) -> usize {
        layout.constraints_tagged(identifier).count()
    }

    #[test]
    fn test_fixed_size_constraints() {
        let node = Node::new().width(40.0).height(20.0);
        let id = node.id();
        let layout = Layout::new(node).unwrap();
        assert_eq!(layout.width(id).unwrap(), 40.0);
        assert_eq!(layout.height(id).unwrap(), 20.0);
        assert_eq!(layout.constraints(id).unwrap().len(), 2);
    }

    #[test]
    fn test_unset_size_reads_zero() {
        let node = Node::new().flex(1.0);
        let id = node.id();
        let layout = Layout::new(node).unwrap();
        assert_eq!(layout.width(id).unwrap(), 0.0);
        assert_eq!(layout.height(id).unwrap(), 0.0);
    }

    #[test]
    fn test_view_fits_intrinsic_size_when_unsized() {
        let label = View::with_intrinsic_size("label", Size::new(80.0, 20.0));
        let node = Node::new().view(label.clone());
        let id = node.id();
        let layout = Layout::new(node).unwrap();

        let constraints = layout.constraints(id).unwrap();
        assert_eq!(constraints.len(), 4);
        let width = layout.constraints_tagged(WIDTH_CONSTRAINT_ID).next().unwrap();
        assert_eq!(width.first(), Item::Guide(id).width());
        assert_eq!(width.second(), Some(label.item().width()));
        assert!(constraints.iter().any(|c| c.first() == label.item().top()));
        assert!(constraints.iter().any(|c| c.first() == label.item().left()));
    }

    #[test]
    fn test_view_fills_sized_node() {
        let view = View::new("button");
        let node = Node::new().flex(1.0).view(view.clone());
        let id = node.id();
        let layout = Layout::new(node).unwrap();
        let constraints = layout.constraints(id).unwrap();
        assert_eq!(constraints.len(), 4);
        assert!(constraints.iter().all(|c| c.first().item == view.item()));
        assert_eq!(count_tagged(&layout, WIDTH_CONSTRAINT_ID), 0);
    }

    #[test]
    fn test_plain_child_fills_parent() {
        let child = Node::new();
        let child_id = child.id();
        let parent = Node::new().child(child);
        let parent_id = parent.id();
        let layout = Layout::new(parent).unwrap();
        assert_eq!(layout.effective_children(parent_id).unwrap(), &[child_id]);
        assert_eq!(layout.parent(child_id).unwrap(), Some(parent_id));
        let constraints = layout.constraints(parent_id).unwrap();
        assert_eq!(constraints.len(), 4);
        assert!(constraints.iter().all(|c| c.involves(Item::Guide(child_id))));
    }

    #[test]
    fn test_no_flex_interleaves_spacers() {
        let tree = row([Node::new().width(44.0), Node::new().width(44.0), Node::new().width(44.0)]);
        let id = tree.id();
        let layout = Layout::new(tree).unwrap();
        let children = layout.effective_children(id).unwrap();
        assert_eq!(children.len(), 7);
        for (index, &child) in children.iter().enumerate() {
            assert_eq!(layout.is_synthesized(child).unwrap(), index % 2 == 0);
        }
        let first = children[0];
        let last = children[6];
        assert_eq!(layout.width(first).unwrap(), 0.0);
        assert_eq!(layout.height(first).unwrap(), 0.0);
        assert_eq!(layout.width(last).unwrap(), 0.0);
        assert_eq!(layout.height(last).unwrap(), 0.0);
    }

    #[test]
    fn test_flex_children_used_verbatim() {
        let tree = column([flex(1.0), Node::new().height(10.0), flex(2.0)]);
        let id = tree.id();
        let layout = Layout::new(tree).unwrap();
        assert_eq!(layout.effective_children(id).unwrap().len(), 3);
        assert!(!layout.effective_children(id).unwrap().iter().any(|&c| layout.is_synthesized(c).unwrap()));
    }

    #[test]
    fn test_empty_container_is_degenerate() {
        let tree = row([]).width(100.0);
        let id = tree.id();
        let layout = Layout::new(tree).unwrap();
        assert!(layout.effective_children(id).unwrap().is_empty());
        assert_eq!(layout.constraints(id).unwrap().len(), 1);
        assert_eq!(count_tagged(&layout, "Row.end"), 0);
    }

    #[test]
    fn test_chain_links_adjacent_children() {
        let tree = row([flex(1.0), flex(1.0)]);
        let id = tree.id();
        let layout = Layout::new(tree).unwrap();
        let children = layout.effective_children(id).unwrap();
        let constraints = layout.constraints(id).unwrap();

        let leading = constraints
            .iter()
            .find(|c| c.first() == Item::Guide(children[0]).left())
            .unwrap();
        assert_eq!(leading.second(), Some(Item::Guide(id).left()));
        assert!(leading.priority().is_required());

        let link = constraints
            .iter()
            .find(|c| c.first() == Item::Guide(children[1]).left())
            .unwrap();
        assert_eq!(link.second(), Some(Item::Guide(children[0]).right()));
    }

    #[test]
    fn test_stretch_and_center_cross_constraints() {
        let stretched = column([Node::new().height(10.0)]);
        let id = stretched.id();
        let layout = Layout::new(stretched).unwrap();
        let cross: Vec<_> = layout
            .constraints(id)
            .unwrap()
            .iter()
            .filter(|c| c.priority() == Priority::CROSS_ALIGNMENT)
            .collect();
        assert_eq!(cross.len(), 3);
        assert!(cross.iter().all(|c| c.second() == Some(Item::Guide(id).width())));

        let centered = column([Node::new().height(10.0)]).cross_alignment(CrossAxisAlignment::Center);
        let id = centered.id();
        let layout = Layout::new(centered).unwrap();
        let cross: Vec<_> = layout
            .constraints(id)
            .unwrap()
            .iter()
            .filter(|c| c.priority() == Priority::CROSS_ALIGNMENT)
            .collect();
        assert_eq!(cross.len(), 3);
        assert!(cross.iter().all(|c| c.second() == Some(Item::Guide(id).center_x())));
    }

    #[test]
    fn test_alignment_constraints_per_policy() {
        let alignment_count = |alignment| {
            let tree = row([Node::new().width(10.0), Node::new().width(10.0), Node::new().width(10.0)])
                .main_alignment(alignment);
            let id = tree.id();
            let layout = Layout::new(tree).unwrap();
            layout
                .constraints(id)
                .unwrap()
                .iter()
                .filter(|c| c.priority() == Priority::MAIN_ALIGNMENT)
                .count()
        };
        assert_eq!(alignment_count(MainAxisAlignment::Start), 1);
        assert_eq!(alignment_count(MainAxisAlignment::Center), 1);
        // leading, trailing, plus spacers[2] tied to spacers[1]
        assert_eq!(alignment_count(MainAxisAlignment::SpaceBetween), 3);
    }

    #[test]
    fn test_alignment_skipped_with_flex() {
        let tree = row([flex(1.0), Node::new().width(10.0)]).main_alignment(MainAxisAlignment::SpaceBetween);
        let id = tree.id();
        let layout = Layout::new(tree).unwrap();
        assert!(
            !layout
                .constraints(id)
                .unwrap()
                .iter()
                .any(|c| c.priority() == Priority::MAIN_ALIGNMENT)
        );
    }

    #[test]
    fn test_closing_constraint_identifier() {
        let tree = column([row([spacer(10.0)])]);
        let layout = Layout::new(tree).unwrap();
        let closing: Vec<_> = layout.constraints_tagged("Column.end").collect();
        assert_eq!(closing.len(), 1);
        assert_eq!(closing[0].priority(), Priority::CONTENT_FIT);
        assert_eq!(count_tagged(&layout, "Row.end"), 1);
    }

    #[test]
    fn test_flex_ties_relative_to_first_flexible_child() {
        let a = flex(1.0);
        let b = flex(2.0);
        let c = flex(3.0);
        let (a_id, b_id, c_id) = (a.id(), b.id(), c.id());
        let tree = row([a, Node::new().width(10.0), b, c]);
        let id = tree.id();
        let layout = Layout::new(tree).unwrap();

        let ties = layout.flex_constraints(id).unwrap();
        assert_eq!(ties.len(), 2);
        assert_eq!(ties[0].first(), Item::Guide(b_id).width());
        assert_eq!(ties[0].second(), Some(Item::Guide(a_id).width()));
        assert_eq!(ties[0].multiplier(), 2.0);
        assert_eq!(ties[1].first(), Item::Guide(c_id).width());
        assert_eq!(ties[1].multiplier(), 3.0);
        assert!(ties.iter().all(|t| t.priority().is_required()));
    }

    #[test]
    fn test_set_flex_replaces_ties_before_attach() {
        let a = flex(1.0);
        let b = flex(1.0);
        let b_id = b.id();
        let tree = row([a, b]);
        let id = tree.id();
        let mut layout = Layout::new(tree).unwrap();
        let before = layout.flex_constraints(id).unwrap()[0].id();

        layout.set_flex(b_id, 2.0).unwrap();
        let ties = layout.flex_constraints(id).unwrap();
        assert_eq!(ties.len(), 1);
        assert_eq!(ties[0].multiplier(), 2.0);
        assert_ne!(ties[0].id(), before);
        assert!(!layout.all_constraints().any(|c| c.id() == before));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let b = flex(1.0);
        let b_id = b.id();
        let tree = row([flex(1.0), b]);
        let id = tree.id();
        let mut layout = Layout::new(tree).unwrap();
        layout.set_flex(b_id, 3.0).unwrap();
        let total = layout.all_constraints().count();
        layout.set_flex(b_id, 3.0).unwrap();
        layout.recompute_flex(id).unwrap();
        assert_eq!(layout.all_constraints().count(), total);
        assert_eq!(layout.flex_constraints(id).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_flex_rejected() {
        let b = flex(1.0);
        let b_id = b.id();
        let mut layout = Layout::new(row([b])).unwrap();
        assert_eq!(layout.set_flex(b_id, -1.0), Err(LayoutError::InvalidFlex(-1.0)));
        assert!(matches!(
            Layout::new(row([flex(f32::NAN)])),
            Err(LayoutError::InvalidFlex(_))
        ));
    }

    #[test]
    fn test_cloned_subtree_rejected() {
        let gap = spacer(10.0);
        let gap_id = gap.id();
        assert!(matches!(
            Layout::new(column([gap.clone(), flex(1.0), gap])),
            Err(LayoutError::DuplicateNode(id)) if id == gap_id
        ));

        let inner = row([flex(1.0)]);
        assert!(matches!(
            Layout::new(column([inner.clone(), inner])),
            Err(LayoutError::DuplicateNode(_))
        ));
    }

    #[test]
    fn test_unknown_node_and_non_container() {
        let node = Node::new();
        let id = node.id();
        let mut layout = Layout::new(node).unwrap();
        let stranger = NodeId::new();
        assert_eq!(layout.flex(stranger), Err(LayoutError::UnknownNode(stranger)));
        assert_eq!(layout.recompute_flex(id), Err(LayoutError::NotAContainer(id)));
    }

    #[test]
    fn test_attach_registers_and_activates_everything() {
        let view = View::new("label");
        let tree = column([Node::new().height(20.0).view(view.clone()), flex(1.0)]);
        let mut layout = Layout::new(tree).unwrap();
        let expected = layout.all_constraints().count();
        layout.set_root_view(RecordingHost::default()).unwrap();

        let host = layout.host().unwrap();
        assert_eq!(host.guides.len(), layout.len());
        assert_eq!(host.guides[0], layout.root());
        assert_eq!(host.views, vec![view.id()]);
        // root fill is included once attached
        assert_eq!(host.active.len(), expected + 4);
        assert!(host.calls.last() == Some(&Call::NeedsLayout));
        assert_eq!(layout.set_root_view(RecordingHost::default()), Err(LayoutError::AlreadyAttached));
    }

    #[test]
    fn test_set_flex_after_attach_swaps_host_constraints() {
        let b = flex(1.0);
        let b_id = b.id();
        let tree = row([flex(1.0), b]);
        let id = tree.id();
        let mut layout = Layout::new(tree).unwrap();
        layout.set_root_view(RecordingHost::default()).unwrap();
        let stale = layout.flex_constraints(id).unwrap()[0].id();

        layout.set_flex(b_id, 2.0).unwrap();
        let fresh = layout.flex_constraints(id).unwrap()[0].id();
        let host = layout.host().unwrap();
        assert!(!host.active.contains_key(&stale));
        assert_eq!(host.active[&fresh].multiplier(), 2.0);
    }

    #[test]
    fn test_set_width_updates_live_constant() {
        let node = Node::new().width(10.0);
        let id = node.id();
        let mut layout = Layout::new(row([node])).unwrap();
        layout.set_root_view(RecordingHost::default()).unwrap();
        layout.set_width(id, 44.0).unwrap();
        assert_eq!(layout.width(id).unwrap(), 44.0);
        let constraint = layout.constraints_tagged(WIDTH_CONSTRAINT_ID).next().unwrap().id();
        assert_eq!(layout.host().unwrap().active[&constraint].constant(), 44.0);
    }

    #[test]
    fn test_set_height_without_constraint_is_noop() {
        let node = row([flex(1.0)]);
        let id = node.id();
        let mut layout = Layout::new(node).unwrap();
        layout.set_height(id, 44.0).unwrap();
        assert_eq!(layout.height(id).unwrap(), 0.0);
    }

    #[test]
    fn test_set_active_requires_attachment() {
        let node = Node::new();
        let id = node.id();
        let mut layout = Layout::new(column([node])).unwrap();
        layout.set_active(id, false).unwrap();
        assert!(layout.is_active(id).unwrap());

        layout.set_root_view(RecordingHost::default()).unwrap();
        let before = layout.host().unwrap().active.len();
        layout.set_active(id, false).unwrap();
        assert!(!layout.is_active(id).unwrap());
        assert_eq!(layout.host().unwrap().active.len(), before + 2);
        layout.set_active(id, true).unwrap();
        assert_eq!(layout.host().unwrap().active.len(), before);
    }

    #[test]
    fn test_inactive_node_withdraws_fixed_size() {
        let gap = spacer(10.0);
        let id = gap.id();
        let mut layout = Layout::new(column([gap, flex(1.0)])).unwrap();
        layout.set_root_view(RecordingHost::default()).unwrap();
        let fixed: Vec<ConstraintId> = layout
            .node(id)
            .unwrap()
            .constraints
            .iter()
            .filter(|c| is_size_tag(c.identifier()))
            .map(Constraint::id)
            .collect();
        assert_eq!(fixed.len(), 2);

        layout.set_active(id, false).unwrap();
        let host = layout.host().unwrap();
        assert!(fixed.iter().all(|c| !host.active.contains_key(c)));

        // Resizing while collapsed is remembered but not pushed.
        layout.set_width(id, 24.0).unwrap();
        assert_eq!(layout.width(id).unwrap(), 24.0);
        assert!(!layout
            .host()
            .unwrap()
            .calls
            .iter()
            .any(|call| matches!(call, Call::SetConstant(..))));

        // A repeated toggle is a no-op.
        let calls = layout.host().unwrap().calls.len();
        layout.set_active(id, false).unwrap();
        assert_eq!(layout.host().unwrap().calls.len(), calls);

        layout.set_active(id, true).unwrap();
        let host = layout.host().unwrap();
        assert!(fixed.iter().all(|c| host.active.contains_key(c)));
        assert_eq!(host.active[&fixed[0]].constant(), 24.0);
    }

    #[test]
    fn test_find_by_key() {
        let tree = row([flex(1.0).key("blue"), flex(1.0)]);
        let layout = Layout::new(tree).unwrap();
        let blue = layout.find("blue").unwrap();
        assert_eq!(layout.flex(blue).unwrap(), 1.0);
        assert!(layout.find("pink").is_none());
    }

    #[test]
    fn test_debug_draw_tags_every_node() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let tree = column([spacer(10.0), row([flex(1.0)])]);
        let mut layout = Layout::new(tree).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        layout.debug_draw(&mut rng);
        layout.set_root_view(RecordingHost::default()).unwrap();
        layout.debug_draw(&mut rng);

        let host = layout.host().unwrap();
        assert_eq!(host.overlays.len(), layout.len());
        assert_eq!(host.overlays[0].tag, "Column");
        assert!(host.overlays.iter().any(|o| o.tag == "Spacer"));
        assert!(host.overlays.iter().any(|o| o.tag == "Row"));

        let first_colors: Vec<_> = host.overlays.iter().map(|o| o.border_color).collect();
        layout.debug_draw(&mut rng);
        let host = layout.host().unwrap();
        let again: Vec<_> = host.overlays[first_colors.len()..].iter().map(|o| o.border_color).collect();
        assert_eq!(first_colors, again);
    }
}
