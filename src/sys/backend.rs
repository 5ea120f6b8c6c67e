//! The seam between the policy core and the compositor backend.
//!
//! The backend owns the Wayland protocol, rendering, input devices, and the
//! lifecycles of every view and output. The core only ever sees the opaque
//! handles defined here and mutates visible state through the trait's
//! setters, which are authoritative and take effect immediately. Setters
//! must not re-enter the core: backends that want to report a change back
//! (focus, output moves) deliver it as a fresh event after the current core
//! call returns.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::sys::geometry::{Geometry, Size};

/// Handle to a view (application window). Allocated by the backend,
/// starting from 1; the core never frees one.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewHandle(pub u64);

/// Handle to an output (monitor).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutputHandle(pub u64);

bitflags! {
    /// What kind of surface a view is. All bits but `LAUNCHER` are assigned
    /// by the backend; `LAUNCHER` is stamped by the core on the
    /// single-instance launcher utility.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ViewType: u32 {
        const UNMANAGED = 1 << 0;
        const POPUP = 1 << 1;
        const SPLASH = 1 << 2;
        const MODAL = 1 << 3;
        const OVERRIDE_REDIRECT = 1 << 4;
        const LAUNCHER = 1 << 5;
    }
}

bitflags! {
    /// Mutable per-view state bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ViewState: u32 {
        const ACTIVATED = 1 << 0;
        const FULLSCREEN = 1 << 1;
        const MAXIMIZED = 1 << 2;
        const RESIZING = 1 << 3;
        const MOVING = 1 << 4;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Cycling direction for focus, view and output rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Accessors and mutators the compositor backend provides to the core.
///
/// Stacking orders are bottom-to-top. The core reorders them only through
/// `view_bring_to_front`/`view_send_to_back` and the router's adjacent
/// `output_swap_views`.
pub trait Backend {
    fn view_geometry(&self, view: ViewHandle) -> Geometry;
    fn view_set_geometry(&mut self, view: ViewHandle, geometry: Geometry);

    fn view_type(&self, view: ViewHandle) -> ViewType;
    fn view_set_type(&mut self, view: ViewHandle, bits: ViewType, set: bool);

    fn view_state(&self, view: ViewHandle) -> ViewState;
    fn view_set_state(&mut self, view: ViewHandle, bits: ViewState, set: bool);

    fn view_parent(&self, view: ViewHandle) -> Option<ViewHandle>;
    fn view_set_parent(&mut self, view: ViewHandle, parent: Option<ViewHandle>);

    /// Workspace membership bitset.
    fn view_mask(&self, view: ViewHandle) -> u32;
    fn view_set_mask(&mut self, view: ViewHandle, mask: u32);

    fn view_output(&self, view: ViewHandle) -> OutputHandle;
    /// Reassign the view to `output`, placing it on top of the destination
    /// stacking order. Does not notify the core.
    fn view_set_output(&mut self, view: ViewHandle, output: OutputHandle);

    /// Window class as advertised by the client, if any.
    fn view_class(&self, view: ViewHandle) -> Option<String>;

    fn view_bring_to_front(&mut self, view: ViewHandle);
    fn view_send_to_back(&mut self, view: ViewHandle);

    /// Give keyboard focus to `view`, or clear focus entirely. The backend
    /// reports the resulting per-view focus flips back through the
    /// view-focus-changed event.
    fn view_focus(&mut self, view: Option<ViewHandle>);
    fn view_close(&mut self, view: ViewHandle);

    /// `None` while the output has not been modeset yet.
    fn output_resolution(&self, output: OutputHandle) -> Option<Size>;

    /// Currently displayed workspace; exactly one bit set.
    fn output_mask(&self, output: OutputHandle) -> u32;
    fn output_set_mask(&mut self, output: OutputHandle, mask: u32);

    /// Stacking order of the output, bottom-to-top.
    fn output_views(&self, output: OutputHandle) -> Vec<ViewHandle>;
    /// Swap two stacking positions in place.
    fn output_swap_views(&mut self, output: OutputHandle, a: usize, b: usize);

    fn output_focus(&mut self, output: OutputHandle);

    /// All known outputs in positional order.
    fn outputs(&self) -> Vec<OutputHandle>;
    fn focused_output(&self) -> Option<OutputHandle>;

    /// Ask the backend to wind down its event loop.
    fn terminate(&mut self);
}
