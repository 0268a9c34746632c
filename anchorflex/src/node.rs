//! Declarative layout nodes.
//!
//! A [`Node`] is a plain value describing one rectangle of the layout tree.
//! Trees are written bottom-up as nested builder expressions and only turn
//! into constraints when handed to [`FlexLayout`](crate::FlexLayout).
//!
//! ```
//! use anchorflex::{row, flex, Node, MainAxisAlignment};
//!
//! let grow = flex(2.0);
//! let grow_id = grow.id(); // capture before nesting
//! let tree = row([flex(1.0), grow, Node::new().width(44.0)])
//!     .main_alignment(MainAxisAlignment::Start)
//!     .height(44.0);
//! assert_eq!(tree.children().len(), 3);
//! # let _ = grow_id;
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::anchor::Direction;
use crate::view::ViewHandle;

static NODE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identity of a layout node (and of its guide rectangle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub fn new() -> Self {
        Self(NODE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// What a node does with its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Every child fills the node.
    Plain,
    /// Children laid out left to right.
    Row,
    /// Children laid out top to bottom.
    Column,
}

impl NodeKind {
    pub fn direction(self) -> Option<Direction> {
        match self {
            NodeKind::Plain => None,
            NodeKind::Row => Some(Direction::Row),
            NodeKind::Column => Some(Direction::Column),
        }
    }

    fn from_direction(direction: Direction) -> Self {
        match direction {
            Direction::Row => NodeKind::Row,
            Direction::Column => NodeKind::Column,
        }
    }

    fn default_label(self) -> &'static str {
        match self {
            NodeKind::Plain => "Flex",
            NodeKind::Row => "Row",
            NodeKind::Column => "Column",
        }
    }
}

/// Placement along the main axis when no child grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MainAxisAlignment {
    /// Pack children at the start, slack at the end.
    #[default]
    Start,
    /// Equal slack before the first and after the last child.
    Center,
    /// No outer slack, equal gaps between children.
    SpaceBetween,
}

/// Placement across the main axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CrossAxisAlignment {
    /// Center each child on the container's cross axis.
    Center,
    /// Stretch each child to the container's cross extent.
    #[default]
    Stretch,
}

/// Builder value for one layout node.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) kind: NodeKind,
    pub(crate) label: &'static str,
    pub(crate) key: Option<String>,
    pub(crate) flex: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) view: Option<ViewHandle>,
    pub(crate) children: Vec<Node>,
    pub(crate) main_alignment: MainAxisAlignment,
    pub(crate) cross_alignment: CrossAxisAlignment,
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    /// A plain node: no growth, no fixed size, no view, no children.
    pub fn new() -> Self {
        Self::with_kind(NodeKind::Plain)
    }

    /// A row or column container over `children`.
    pub fn directional(direction: Direction, children: impl IntoIterator<Item = Node>) -> Self {
        let mut node = Self::with_kind(NodeKind::from_direction(direction));
        node.children = children.into_iter().collect();
        node
    }

    fn with_kind(kind: NodeKind) -> Self {
        Self {
            id: NodeId::new(),
            kind,
            label: kind.default_label(),
            key: None,
            flex: 0.0,
            width: 0.0,
            height: 0.0,
            view: None,
            children: Vec::new(),
            main_alignment: MainAxisAlignment::default(),
            cross_alignment: CrossAxisAlignment::default(),
        }
    }

    pub(crate) fn labelled(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// Growth weight. 0 means "do not grow".
    pub fn flex(mut self, flex: f32) -> Self {
        self.flex = flex;
        self
    }

    /// Fixed width. 0 leaves the width unset.
    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Fixed height. 0 leaves the height unset.
    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Position `view` with this node.
    ///
    /// If flex, width and height are all zero the node takes the view's
    /// intrinsic size; otherwise the view fills the node.
    pub fn view(mut self, view: ViewHandle) -> Self {
        self.view = Some(view);
        self
    }

    /// Append a child. Children of a plain node fill it; children of a
    /// row or column are laid out along its axis.
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Name for lookup with [`FlexLayout::find`](crate::FlexLayout::find).
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn main_alignment(mut self, alignment: MainAxisAlignment) -> Self {
        self.main_alignment = alignment;
        self
    }

    pub fn cross_alignment(mut self, alignment: CrossAxisAlignment) -> Self {
        self.cross_alignment = alignment;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn flex_weight(&self) -> f32 {
        self.flex
    }
}
