//! The window manager core.
//!
//! One explicit state struct owns the backend handle, the keybind and
//! layout registries, and the single active view. The backend drives it
//! through the synchronous event entry points below and every mutation of
//! visible state flows back out through the backend's setters; there is no
//! other channel and no internal concurrency.

mod defaults;
mod focus;
mod relayout;
mod router;
#[cfg(test)]
pub(crate) mod testing;

use tracing::{debug, info};

use crate::common::config::Config;
use crate::keybind::KeybindRegistry;
use crate::layout_engine::LayoutRegistry;
use crate::sys::backend::{
    Backend, ButtonState, KeyState, OutputHandle, ViewHandle, ViewState, ViewType,
};
use crate::sys::geometry::{Geometry, Size};
use crate::sys::keysym::{Keysym, Modifiers};

pub struct WindowManager {
    backend: Box<dyn Backend>,
    keybinds: KeybindRegistry,
    layouts: LayoutRegistry,
    active_view: Option<ViewHandle>,
    config: Config,
}

/// A view the backend fully manages: not a tooltip/dnd surface, popup or
/// splash.
pub(crate) fn is_managed(backend: &dyn Backend, view: ViewHandle) -> bool {
    !backend
        .view_type(view)
        .intersects(ViewType::UNMANAGED | ViewType::POPUP | ViewType::SPLASH)
}

/// Views that sit on top of everything and never participate in tiling.
pub(crate) fn is_or(backend: &dyn Backend, view: ViewHandle) -> bool {
    backend
        .view_type(view)
        .intersects(ViewType::OVERRIDE_REDIRECT | ViewType::LAUNCHER)
}

pub(crate) fn is_modal(backend: &dyn Backend, view: ViewHandle) -> bool {
    backend.view_type(view).contains(ViewType::MODAL)
}

/// Eligible for automatic layout.
pub(crate) fn is_tiled(backend: &dyn Backend, view: ViewHandle) -> bool {
    !backend.view_state(view).contains(ViewState::FULLSCREEN)
        && backend.view_parent(view).is_none()
        && is_managed(backend, view)
        && !is_or(backend, view)
        && !is_modal(backend, view)
}

impl WindowManager {
    pub fn new(backend: Box<dyn Backend>, config: Config) -> Self {
        let prefix = config.prefix_modifiers();
        Self {
            backend,
            keybinds: KeybindRegistry::new(prefix),
            layouts: LayoutRegistry::default(),
            active_view: None,
            config,
        }
    }

    pub fn active_view(&self) -> Option<ViewHandle> { self.active_view }

    pub fn config(&self) -> &Config { &self.config }

    pub fn backend(&self) -> &dyn Backend { self.backend.as_ref() }

    pub fn backend_mut(&mut self) -> &mut dyn Backend { self.backend.as_mut() }

    pub fn keybinds(&self) -> &KeybindRegistry { &self.keybinds }

    /// Extension surface: named keybind registration and removal.
    pub fn keybinds_mut(&mut self) -> &mut KeybindRegistry { &mut self.keybinds }

    pub fn layouts(&self) -> &LayoutRegistry { &self.layouts }

    /// Extension surface: named layout registration and removal.
    pub fn layouts_mut(&mut self) -> &mut LayoutRegistry { &mut self.layouts }

    /// A new view appeared. Returns whether the core accepts it; a second
    /// instance of the launcher utility is rejected and the backend must
    /// not finalize it.
    pub fn view_created(&mut self, view: ViewHandle) -> bool {
        if self.backend.view_class(view).as_deref() == Some(self.config.launcher_class.as_str()) {
            let launcher_open = self
                .active_view
                .is_some_and(|active| self.backend.view_type(active).contains(ViewType::LAUNCHER));
            if launcher_open {
                info!(?view, "refusing second launcher instance");
                return false;
            }
            self.backend.view_set_type(view, ViewType::LAUNCHER, true);
        }

        if self.should_focus_on_create(view) {
            self.focus(Some(view));
        }

        let output = self.backend.view_output(view);
        self.relayout(output);
        info!(?view, parent = ?self.backend.view_parent(view), "new view");
        true
    }

    // Do not let unmanaged views (tooltips, dnds, ..) steal focus, nor
    // parented views whose parent is not the view currently active.
    fn should_focus_on_create(&self, view: ViewHandle) -> bool {
        if self.backend.view_type(view).contains(ViewType::UNMANAGED) {
            return false;
        }
        match (self.active_view, self.backend.view_parent(view)) {
            (Some(active), Some(parent)) => parent == active,
            _ => true,
        }
    }

    /// A view is gone. The backend has already dropped it from the
    /// stacking order; its attributes stay readable for the duration of
    /// this call.
    pub fn view_destroyed(&mut self, view: ViewHandle) {
        if self.active_view == Some(view) {
            self.active_view = None;

            if let Some(parent) = self.backend.view_parent(view) {
                // Detach first so focusing the parent cannot walk back into
                // the dying view.
                self.backend.view_set_parent(view, None);
                self.focus(Some(parent));
            } else {
                let output = self.backend.view_output(view);
                self.focus_topmost(output);
            }
        }

        let output = self.backend.view_output(view);
        self.relayout(output);
        info!(?view, "view destroyed");
    }

    /// Keyboard focus changed on the backend side. Mirror it into the
    /// view's activated state, but only for views on the focused output.
    pub fn view_focus_changed(&mut self, view: ViewHandle, focused: bool) {
        if Some(self.backend.view_output(view)) == self.backend.focused_output() {
            self.backend.view_set_state(view, ViewState::ACTIVATED, focused);
        }
    }

    /// The backend moved a view between outputs.
    pub fn view_moved_to_output(&mut self, view: ViewHandle, from: OutputHandle, to: OutputHandle) {
        self.focus_topmost(from);
        self.relayout(from);
        self.relayout(to);
        info!(?view, ?from, ?to, "view moved between outputs");

        // Keep exactly one view on the destination carrying the activated
        // flag.
        if self.backend.view_state(view).contains(ViewState::ACTIVATED) {
            let active = self.active_view;
            for v in self.backend.output_views(to) {
                self.backend.view_set_state(v, ViewState::ACTIVATED, Some(v) == active);
            }
        }
    }

    /// The client asked for a geometry of its own choosing.
    pub fn view_geometry_requested(&mut self, view: ViewHandle, geometry: Geometry) {
        let state = self.backend.view_state(view);
        let tiled = is_tiled(self.backend.as_ref(), view);
        let interactive = state.intersects(ViewState::RESIZING | ViewState::MOVING);

        // Tiled views do not get to pick their own geometry unless the
        // user is dragging them.
        if tiled && !interactive {
            return;
        }
        if tiled {
            self.backend.view_set_state(view, ViewState::MAXIMIZED, false);
        }

        if state.contains(ViewState::FULLSCREEN)
            || self.backend.view_type(view).contains(ViewType::SPLASH)
        {
            return;
        }

        if is_managed(self.backend.as_ref(), view) && !is_or(self.backend.as_ref(), view) {
            if let Some(parent) = self.backend.view_parent(view) {
                self.layout_parent(view, parent, geometry.size);
                return;
            }
        }

        self.backend.view_set_geometry(view, geometry);
    }

    /// The client asked to toggle a state bit.
    pub fn view_state_requested(&mut self, view: ViewHandle, bit: ViewState, toggle: bool) {
        debug!(?view, ?bit, toggle, "state request");
        self.backend.view_set_state(view, bit, toggle);

        if (bit == ViewState::MAXIMIZED && toggle) || bit == ViewState::FULLSCREEN {
            let output = self.backend.view_output(view);
            self.relayout(output);
        }
    }

    /// Pointer button over `view` (or the background when `None`).
    /// Click-to-focus happens on press; the button always reaches the
    /// client, so this never consumes.
    pub fn pointer_button(
        &mut self,
        view: Option<ViewHandle>,
        _time: u32,
        _mods: Modifiers,
        _button: u32,
        state: ButtonState,
    ) -> bool {
        if state == ButtonState::Pressed {
            self.focus(view);
        }
        false
    }

    /// Keyboard input. Returns whether the key was consumed by a keybind;
    /// unconsumed input must be forwarded to the focused client.
    pub fn keyboard_key(
        &mut self,
        view: Option<ViewHandle>,
        time: u32,
        mods: Modifiers,
        sym: Keysym,
        state: KeyState,
    ) -> bool {
        let Some((function, arg)) = self.keybinds.lookup(mods, sym) else {
            return false;
        };

        if state == KeyState::Pressed {
            function(self, view, time, arg);
        }
        true
    }

    /// An output was modeset or resized.
    pub fn output_resolution_changed(&mut self, output: OutputHandle, from: Size, to: Size) {
        debug!(?output, ?from, ?to, "resolution changed");
        self.relayout(output);
    }
}
