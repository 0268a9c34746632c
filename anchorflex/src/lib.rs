//! Anchorflex: declarative row/column layout over anchor constraints.
//!
//! A layout is described as a tree of [`Node`] values (rows, columns, fixed
//! sizes, growth weights, shared views). [`FlexLayout`] compiles that tree into
//! prioritized linear equalities between rectangle anchors and hands them to a
//! [`Host`], which owns the solver and the real view hierarchy.
//!
//! # Usage
//!
//! ```ignore
//! use anchorflex::{FlexLayout, MainAxisAlignment, View, column, flex, row};
//!
//! let button = View::new("sign in");
//! let pink = flex(1.0).view(button);
//! let pink_id = pink.id();
//!
//! let tree = column([
//!     row([pink, flex(1.0)]).height(44.0),
//!     flex(1.0),
//! ]);
//!
//! let mut layout = FlexLayout::new(tree)?;
//! layout.set_root_view(&mut host)?;
//! layout.set_flex(pink_id, 2.0)?;
//! ```

// Geometry and identities
pub mod geometry;
pub mod anchor;
pub mod constraint;
pub mod view;

// Tree description
pub mod node;
pub mod builders;

// Materialization
pub mod host;
pub mod debug;
pub mod error;
pub mod tree;

pub use anchor::{Anchor, AnchorKind, AnchorPair, Attribute, AxisAnchors, Direction, Item};
pub use builders::{center, column, flex, row, spacer};
pub use constraint::{Constraint, ConstraintId, Priority, fill};
pub use debug::DebugOverlay;
pub use error::LayoutError;
pub use geometry::{Color, Point, Rect, Size};
pub use host::Host;
pub use node::{CrossAxisAlignment, MainAxisAlignment, Node, NodeId, NodeKind};
pub use tree::{FlexLayout, HEIGHT_CONSTRAINT_ID, WIDTH_CONSTRAINT_ID};
pub use view::{View, ViewHandle, ViewId};
