//! The element abstraction the layout passes consume.

use crate::types::Size;

/// A positionable element owned by the host.
///
/// The layout engine only asks an item for its size and whether it takes
/// part in layout; it never mutates or renders it.
pub trait FlowItem {
    /// Measure the item given the width available to one row.
    fn measure(&self, max_width: f64) -> Size;

    /// Hidden items are skipped entirely: no line, no box, no height.
    fn is_visible(&self) -> bool {
        true
    }
}

impl FlowItem for Size {
    fn measure(&self, _max_width: f64) -> Size {
        *self
    }
}

impl<T: FlowItem + ?Sized> FlowItem for &T {
    fn measure(&self, max_width: f64) -> Size {
        (**self).measure(max_width)
    }

    fn is_visible(&self) -> bool {
        (**self).is_visible()
    }
}

impl<T: FlowItem + ?Sized> FlowItem for Box<T> {
    fn measure(&self, max_width: f64) -> Size {
        (**self).measure(max_width)
    }

    fn is_visible(&self) -> bool {
        (**self).is_visible()
    }
}

/// An item with a fixed size and a visibility flag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedItem {
    pub size: Size,
    pub visible: bool,
}

impl FixedItem {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            visible: true,
        }
    }

    /// An item that takes no part in layout.
    pub fn hidden(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            visible: false,
        }
    }
}

impl FlowItem for FixedItem {
    fn measure(&self, _max_width: f64) -> Size {
        self.size
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
