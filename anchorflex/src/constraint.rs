//! Linear constraints between anchors.
//!
//! A constraint is always an equality, either
//! `first == second * multiplier + constant` or `first == constant`.
//! Priorities are tiered; the host relaxes lower tiers first.

use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::anchor::{Anchor, Item};

/// Counter for generating unique constraint IDs.
static CONSTRAINT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identity of a constraint, stable across constant edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(u64);

impl ConstraintId {
    fn next() -> Self {
        Self(CONSTRAINT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

/// Solver priority, 1-1000. 1000 is required.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Priority(pub f32);

impl Priority {
    pub const REQUIRED: Self = Self(1000.0);
    /// Cross-axis stretch/center.
    pub const CROSS_ALIGNMENT: Self = Self(999.0);
    /// Main-axis alignment through spacers.
    pub const MAIN_ALIGNMENT: Self = Self(900.0);
    /// Soft "container ends where its content ends" fallback.
    pub const CONTENT_FIT: Self = Self(888.0);
    pub const HIGH: Self = Self(750.0);
    pub const LOW: Self = Self(250.0);
    /// Spacers collapse to zero unless something else claims the slack.
    pub const FITTING: Self = Self(50.0);

    #[inline]
    pub fn is_required(&self) -> bool {
        self.0 >= Self::REQUIRED.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::REQUIRED
    }
}

/// A prioritized linear equality between two anchors (or an anchor and a constant).
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    id: ConstraintId,
    first: Anchor,
    second: Option<Anchor>,
    multiplier: f32,
    pub(crate) constant: f32,
    priority: Priority,
    identifier: Option<Cow<'static, str>>,
}

impl Constraint {
    pub(crate) fn relating(first: Anchor, second: Anchor, multiplier: f32) -> Self {
        debug_assert_eq!(
            first.kind(),
            second.kind(),
            "cannot relate {first} to {second}"
        );
        Self {
            id: ConstraintId::next(),
            first,
            second: Some(second),
            multiplier,
            constant: 0.0,
            priority: Priority::REQUIRED,
            identifier: None,
        }
    }

    pub(crate) fn fixed(first: Anchor, constant: f32) -> Self {
        Self {
            id: ConstraintId::next(),
            first,
            second: None,
            multiplier: 0.0,
            constant,
            priority: Priority::REQUIRED,
            identifier: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<Cow<'static, str>>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_constant(mut self, constant: f32) -> Self {
        self.constant = constant;
        self
    }

    pub fn id(&self) -> ConstraintId {
        self.id
    }

    pub fn first(&self) -> Anchor {
        self.first
    }

    pub fn second(&self) -> Option<Anchor> {
        self.second
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    pub fn constant(&self) -> f32 {
        self.constant
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Whether either side of the constraint refers to `item`.
    pub fn involves(&self, item: Item) -> bool {
        self.first.item == item || self.second.is_some_and(|s| s.item == item)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(identifier) = &self.identifier {
            write!(f, "[{identifier}] ")?;
        }
        write!(f, "{} == ", self.first)?;
        match self.second {
            Some(second) if self.multiplier == 1.0 => write!(f, "{second}")?,
            Some(second) => write!(f, "{second} * {}", self.multiplier)?,
            None => write!(f, "{}", self.constant)?,
        }
        if self.second.is_some() && self.constant != 0.0 {
            write!(f, " + {}", self.constant)?;
        }
        write!(f, " @{}", self.priority.0)
    }
}

/// Pin the four edges of `item` to those of `target`.
pub fn fill(item: Item, target: Item, priority: Priority) -> Vec<Constraint> {
    vec![
        item.top().equal_to(target.top()).with_priority(priority),
        item.left().equal_to(target.left()).with_priority(priority),
        item.bottom().equal_to(target.bottom()).with_priority(priority),
        item.right().equal_to(target.right()).with_priority(priority),
    ]
}
