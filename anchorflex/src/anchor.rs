//! Anchor abstraction.
//!
//! Every rectangle the engine talks about (a node's guide, a shared view, or
//! the host rectangle itself) exposes the same eight anchors. [`AnchorPair`]
//! re-labels them as main/cross axes so the directional wiring is written
//! once and works for rows and columns alike.

use std::fmt;

use crate::constraint::{Constraint, ConstraintId};
use crate::node::NodeId;
use crate::view::ViewId;

/// A rectangle known to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Item {
    /// The rectangle the root layout is pinned to.
    Host,
    /// The invisible guide owned by a layout node.
    Guide(NodeId),
    /// A shared view positioned by a layout node.
    View(ViewId),
}

impl Item {
    #[inline]
    pub fn anchor(self, attribute: Attribute) -> Anchor {
        Anchor { item: self, attribute }
    }

    pub fn left(self) -> Anchor {
        self.anchor(Attribute::Left)
    }

    pub fn right(self) -> Anchor {
        self.anchor(Attribute::Right)
    }

    pub fn top(self) -> Anchor {
        self.anchor(Attribute::Top)
    }

    pub fn bottom(self) -> Anchor {
        self.anchor(Attribute::Bottom)
    }

    pub fn center_x(self) -> Anchor {
        self.anchor(Attribute::CenterX)
    }

    pub fn center_y(self) -> Anchor {
        self.anchor(Attribute::CenterY)
    }

    pub fn width(self) -> Anchor {
        self.anchor(Attribute::Width)
    }

    pub fn height(self) -> Anchor {
        self.anchor(Attribute::Height)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Host => write!(f, "host"),
            Item::Guide(id) => write!(f, "guide#{}", id.raw()),
            Item::View(id) => write!(f, "view#{}", id.raw()),
        }
    }
}

/// One reference line or dimension of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Left,
    Right,
    Top,
    Bottom,
    CenterX,
    CenterY,
    Width,
    Height,
}

/// Anchors may only be related to anchors of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    /// x positions (left, right, center-x).
    Horizontal,
    /// y positions (top, bottom, center-y).
    Vertical,
    /// Extents (width, height).
    Dimension,
}

impl Attribute {
    pub fn kind(self) -> AnchorKind {
        match self {
            Attribute::Left | Attribute::Right | Attribute::CenterX => AnchorKind::Horizontal,
            Attribute::Top | Attribute::Bottom | Attribute::CenterY => AnchorKind::Vertical,
            Attribute::Width | Attribute::Height => AnchorKind::Dimension,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Attribute::Left => "left",
            Attribute::Right => "right",
            Attribute::Top => "top",
            Attribute::Bottom => "bottom",
            Attribute::CenterX => "centerX",
            Attribute::CenterY => "centerY",
            Attribute::Width => "width",
            Attribute::Height => "height",
        }
    }
}

/// An attribute of a specific rectangle, usable on either side of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub item: Item,
    pub attribute: Attribute,
}

impl Anchor {
    #[inline]
    pub fn kind(&self) -> AnchorKind {
        self.attribute.kind()
    }

    /// `self == other`, required.
    pub fn equal_to(self, other: Anchor) -> Constraint {
        Constraint::relating(self, other, 1.0)
    }

    /// `self == other * multiplier`, required. Only meaningful between dimensions.
    pub fn equal_to_multiplied(self, other: Anchor, multiplier: f32) -> Constraint {
        debug_assert_eq!(self.kind(), AnchorKind::Dimension, "multiplier on a position anchor");
        Constraint::relating(self, other, multiplier)
    }

    /// `self == constant`, required. Only meaningful for dimensions.
    pub fn equal_to_constant(self, constant: f32) -> Constraint {
        debug_assert_eq!(self.kind(), AnchorKind::Dimension, "constant on a position anchor");
        Constraint::fixed(self, constant)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.item, self.attribute.name())
    }
}

/// Direction a container lays its children out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left to right; main axis horizontal.
    Row,
    /// Top to bottom; main axis vertical.
    Column,
}

/// The four reference anchors of one axis of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAnchors {
    pub start: Anchor,
    pub end: Anchor,
    pub center: Anchor,
    pub space: Anchor,
    /// Fixed-size constraint currently installed for `space`, if any.
    pub space_constraint: Option<ConstraintId>,
}

impl AxisAnchors {
    pub fn horizontal(item: Item, space_constraint: Option<ConstraintId>) -> Self {
        Self {
            start: item.left(),
            end: item.right(),
            center: item.center_x(),
            space: item.width(),
            space_constraint,
        }
    }

    pub fn vertical(item: Item, space_constraint: Option<ConstraintId>) -> Self {
        Self {
            start: item.top(),
            end: item.bottom(),
            center: item.center_y(),
            space: item.height(),
            space_constraint,
        }
    }
}

/// Main and cross axis anchors of a rectangle for a given direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPair {
    pub main: AxisAnchors,
    pub cross: AxisAnchors,
}

impl AnchorPair {
    /// Pure mapping from direction to physical anchors.
    pub fn for_direction(
        item: Item,
        direction: Direction,
        width_constraint: Option<ConstraintId>,
        height_constraint: Option<ConstraintId>,
    ) -> Self {
        let h = AxisAnchors::horizontal(item, width_constraint);
        let v = AxisAnchors::vertical(item, height_constraint);
        match direction {
            Direction::Row => Self { main: h, cross: v },
            Direction::Column => Self { main: v, cross: h },
        }
    }
}
