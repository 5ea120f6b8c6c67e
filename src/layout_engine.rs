//! Named layout algorithms and the registry that cycles between them.
//!
//! A layout function receives the output's usable geometry and the tiled
//! views in stacking order, and is expected to push a position and size for
//! each through the backend's geometry setter. It must not reorder the
//! stacking list; the router owns stacking.

pub mod builtin;

use tracing::{info, warn};

use crate::sys::backend::{Backend, Direction, ViewHandle};
use crate::sys::geometry::Geometry;

/// Signature the extension host must declare for layout functions.
pub const LAYOUT_SIGNATURE: &str = "v(*,h[],sz)|1";

pub type LayoutFn = fn(&mut dyn Backend, &Geometry, &[ViewHandle]);

pub struct Layout {
    pub name: String,
    pub function: LayoutFn,
}

/// There is exactly one active layout per process, or none at all when the
/// registry is empty (views then float under the fixed relayout rules).
#[derive(Default)]
pub struct LayoutRegistry {
    layouts: Vec<Layout>,
    index: usize,
}

impl LayoutRegistry {
    /// Register a layout under a unique name. The first successful
    /// registration becomes the active layout.
    pub fn add(&mut self, name: &str, function: LayoutFn, signature: &str) -> bool {
        if signature != LAYOUT_SIGNATURE {
            warn!(
                "wrong signature provided for '{name} layout' function ({LAYOUT_SIGNATURE} != {signature})"
            );
            return false;
        }

        if self.layouts.iter().any(|l| l.name == name) {
            warn!("layout with name '{name}' already exists");
            return false;
        }

        self.layouts.push(Layout {
            name: name.to_owned(),
            function,
        });
        info!("added layout: {name}");
        true
    }

    /// Remove a layout by name, repairing the active index so it keeps
    /// pointing at a live layout: removing below the active slot shifts it
    /// down, removing the active tail slot retreats to the new tail.
    pub fn remove(&mut self, name: &str) {
        let Some(pos) = self.layouts.iter().position(|l| l.name == name) else {
            return;
        };
        self.layouts.remove(pos);
        info!("removed layout: {name}");

        if self.layouts.is_empty() {
            self.index = 0;
        } else if pos < self.index {
            self.index -= 1;
        } else if self.index >= self.layouts.len() {
            self.index = self.layouts.len() - 1;
        }
    }

    /// Advance the active layout by one in either direction, wrapping at
    /// both ends. No-op while the registry is empty.
    pub fn cycle(&mut self, direction: Direction) {
        let len = self.layouts.len();
        if len == 0 {
            return;
        }
        self.index = match direction {
            Direction::Next => (self.index + 1) % len,
            Direction::Prev => (self.index + len - 1) % len,
        };
    }

    pub fn active(&self) -> Option<&Layout> { self.layouts.get(self.index) }

    pub fn get(&self, name: &str) -> Option<&Layout> {
        self.layouts.iter().find(|l| l.name == name)
    }

    pub fn is_empty(&self) -> bool { self.layouts.is_empty() }

    pub fn len(&self) -> usize { self.layouts.len() }
}
