//! Opaque views positioned by the layout.
//!
//! The engine never looks inside a view. It only needs an identity to build
//! anchors from and, for fit-to-content nodes, the intrinsic size the host
//! will honour.

use std::borrow::Cow;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::anchor::Item;
use crate::geometry::Size;

static VIEW_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    pub fn new() -> Self {
        Self(VIEW_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared reference to a view. Nodes position views, they do not own them.
pub type ViewHandle = Rc<View>;

/// A rectangle with an optional natural size.
#[derive(Debug)]
pub struct View {
    id: ViewId,
    name: Cow<'static, str>,
    intrinsic_size: Cell<Option<Size>>,
}

impl View {
    /// A view with no intrinsic size (sized entirely by constraints).
    pub fn new(name: impl Into<Cow<'static, str>>) -> ViewHandle {
        Rc::new(Self {
            id: ViewId::new(),
            name: name.into(),
            intrinsic_size: Cell::new(None),
        })
    }

    /// A view with a natural size, like a label or a button.
    pub fn with_intrinsic_size(name: impl Into<Cow<'static, str>>, size: Size) -> ViewHandle {
        Rc::new(Self {
            id: ViewId::new(),
            name: name.into(),
            intrinsic_size: Cell::new(Some(size)),
        })
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn item(&self) -> Item {
        Item::View(self.id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn intrinsic_size(&self) -> Option<Size> {
        self.intrinsic_size.get()
    }

    /// Content changed. The host picks the new size up on its next layout pass.
    pub fn set_intrinsic_size(&self, size: Option<Size>) {
        self.intrinsic_size.set(size);
    }
}
