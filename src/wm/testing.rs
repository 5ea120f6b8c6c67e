//! Scripted backend double for exercising the core without a compositor.
//!
//! `FakeBackend` keeps the view/output model the real backend would own
//! and queues focus flips instead of delivering them re-entrantly, the way
//! a compositor reports them after the current event returns. `TestWm`
//! wires one to a `WindowManager` and pumps that queue.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use slotmap::{DefaultKey, Key, KeyData, SlotMap};

use super::WindowManager;
use crate::common::config::Config;
use crate::sys::backend::{
    Backend, OutputHandle, ViewHandle, ViewState, ViewType,
};
use crate::sys::geometry::{Geometry, Size};

#[derive(Debug, Clone)]
struct FakeView {
    class: Option<String>,
    ty: ViewType,
    state: ViewState,
    parent: Option<ViewHandle>,
    mask: u32,
    geometry: Geometry,
    output: OutputHandle,
}

#[derive(Debug, Clone, Default)]
struct FakeOutput {
    resolution: Option<Size>,
    mask: u32,
    views: Vec<ViewHandle>,
}

#[derive(Default)]
struct FakeState {
    views: SlotMap<DefaultKey, FakeView>,
    outputs: SlotMap<DefaultKey, FakeOutput>,
    output_order: Vec<OutputHandle>,
    focused_view: Option<ViewHandle>,
    focused_output: Option<OutputHandle>,
    focus_events: VecDeque<(ViewHandle, bool)>,
    closed: Vec<ViewHandle>,
    terminated: bool,
}

fn view_key(handle: ViewHandle) -> DefaultKey { KeyData::from_ffi(handle.0).into() }

fn output_key(handle: OutputHandle) -> DefaultKey { KeyData::from_ffi(handle.0).into() }

#[derive(Clone)]
pub(crate) struct FakeBackend {
    state: Rc<RefCell<FakeState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(FakeState::default())),
        }
    }

    pub fn add_output(&self, w: u32, h: u32) -> OutputHandle {
        self.insert_output(Some(Size::new(w, h)))
    }

    /// An output that has not been modeset yet.
    pub fn add_unready_output(&self) -> OutputHandle { self.insert_output(None) }

    fn insert_output(&self, resolution: Option<Size>) -> OutputHandle {
        let mut s = self.state.borrow_mut();
        let key = s.outputs.insert(FakeOutput {
            resolution,
            mask: 1,
            views: Vec::new(),
        });
        let handle = OutputHandle(key.data().as_ffi());
        s.output_order.push(handle);
        if s.focused_output.is_none() {
            s.focused_output = Some(handle);
        }
        handle
    }

    /// Add a view on top of `output`'s stacking order, as a compositor
    /// does right before announcing it.
    pub fn add_view(&self, output: OutputHandle) -> ViewHandle {
        self.insert_view(output, None)
    }

    pub fn add_view_with_class(&self, output: OutputHandle, class: &str) -> ViewHandle {
        self.insert_view(output, Some(class.to_owned()))
    }

    fn insert_view(&self, output: OutputHandle, class: Option<String>) -> ViewHandle {
        let mut s = self.state.borrow_mut();
        let key = s.views.insert(FakeView {
            class,
            ty: ViewType::empty(),
            state: ViewState::empty(),
            parent: None,
            mask: 1,
            geometry: Geometry::new(0, 0, 100, 100),
            output,
        });
        let handle = ViewHandle(key.data().as_ffi());
        s.outputs[output_key(output)].views.push(handle);
        handle
    }

    /// Drop a view from its output's stacking order while keeping its
    /// attributes readable, mirroring the window of time in which the
    /// destroyed event is delivered.
    pub fn remove_from_stacking(&self, view: ViewHandle) {
        let mut s = self.state.borrow_mut();
        let output = s.views[view_key(view)].output;
        s.outputs[output_key(output)].views.retain(|&v| v != view);
        if s.focused_view == Some(view) {
            s.focused_view = None;
        }
    }

    pub fn delete_view(&self, view: ViewHandle) {
        self.state.borrow_mut().views.remove(view_key(view));
    }

    pub fn take_focus_event(&self) -> Option<(ViewHandle, bool)> {
        self.state.borrow_mut().focus_events.pop_front()
    }

    pub fn focused_view(&self) -> Option<ViewHandle> { self.state.borrow().focused_view }

    pub fn focused_output(&self) -> Option<OutputHandle> { self.state.borrow().focused_output }

    pub fn closed(&self) -> Vec<ViewHandle> { self.state.borrow().closed.clone() }

    pub fn terminated(&self) -> bool { self.state.borrow().terminated }
}

impl Backend for FakeBackend {
    fn view_geometry(&self, view: ViewHandle) -> Geometry {
        self.state.borrow().views[view_key(view)].geometry
    }

    fn view_set_geometry(&mut self, view: ViewHandle, geometry: Geometry) {
        self.state.borrow_mut().views[view_key(view)].geometry = geometry;
    }

    fn view_type(&self, view: ViewHandle) -> ViewType {
        self.state.borrow().views[view_key(view)].ty
    }

    fn view_set_type(&mut self, view: ViewHandle, bits: ViewType, set: bool) {
        let mut s = self.state.borrow_mut();
        let ty = &mut s.views[view_key(view)].ty;
        ty.set(bits, set);
    }

    fn view_state(&self, view: ViewHandle) -> ViewState {
        self.state.borrow().views[view_key(view)].state
    }

    fn view_set_state(&mut self, view: ViewHandle, bits: ViewState, set: bool) {
        let mut s = self.state.borrow_mut();
        let state = &mut s.views[view_key(view)].state;
        state.set(bits, set);
    }

    fn view_parent(&self, view: ViewHandle) -> Option<ViewHandle> {
        self.state.borrow().views[view_key(view)].parent
    }

    fn view_set_parent(&mut self, view: ViewHandle, parent: Option<ViewHandle>) {
        self.state.borrow_mut().views[view_key(view)].parent = parent;
    }

    fn view_mask(&self, view: ViewHandle) -> u32 {
        self.state.borrow().views[view_key(view)].mask
    }

    fn view_set_mask(&mut self, view: ViewHandle, mask: u32) {
        self.state.borrow_mut().views[view_key(view)].mask = mask;
    }

    fn view_output(&self, view: ViewHandle) -> OutputHandle {
        self.state.borrow().views[view_key(view)].output
    }

    fn view_set_output(&mut self, view: ViewHandle, output: OutputHandle) {
        let mut s = self.state.borrow_mut();
        let old = s.views[view_key(view)].output;
        if old == output {
            return;
        }
        s.outputs[output_key(old)].views.retain(|&v| v != view);
        s.outputs[output_key(output)].views.push(view);
        s.views[view_key(view)].output = output;
    }

    fn view_class(&self, view: ViewHandle) -> Option<String> {
        self.state.borrow().views[view_key(view)].class.clone()
    }

    fn view_bring_to_front(&mut self, view: ViewHandle) {
        let mut s = self.state.borrow_mut();
        let output = s.views[view_key(view)].output;
        let views = &mut s.outputs[output_key(output)].views;
        views.retain(|&v| v != view);
        views.push(view);
    }

    fn view_send_to_back(&mut self, view: ViewHandle) {
        let mut s = self.state.borrow_mut();
        let output = s.views[view_key(view)].output;
        let views = &mut s.outputs[output_key(output)].views;
        views.retain(|&v| v != view);
        views.insert(0, view);
    }

    fn view_focus(&mut self, view: Option<ViewHandle>) {
        let mut s = self.state.borrow_mut();
        let old = s.focused_view;
        if old == view {
            return;
        }
        if let Some(old) = old {
            s.focus_events.push_back((old, false));
        }
        if let Some(new) = view {
            s.focus_events.push_back((new, true));
        }
        s.focused_view = view;
    }

    fn view_close(&mut self, view: ViewHandle) {
        self.state.borrow_mut().closed.push(view);
    }

    fn output_resolution(&self, output: OutputHandle) -> Option<Size> {
        self.state.borrow().outputs[output_key(output)].resolution
    }

    fn output_mask(&self, output: OutputHandle) -> u32 {
        self.state.borrow().outputs[output_key(output)].mask
    }

    fn output_set_mask(&mut self, output: OutputHandle, mask: u32) {
        self.state.borrow_mut().outputs[output_key(output)].mask = mask;
    }

    fn output_views(&self, output: OutputHandle) -> Vec<ViewHandle> {
        self.state.borrow().outputs[output_key(output)].views.clone()
    }

    fn output_swap_views(&mut self, output: OutputHandle, a: usize, b: usize) {
        self.state.borrow_mut().outputs[output_key(output)].views.swap(a, b);
    }

    fn output_focus(&mut self, output: OutputHandle) {
        self.state.borrow_mut().focused_output = Some(output);
    }

    fn outputs(&self) -> Vec<OutputHandle> { self.state.borrow().output_order.clone() }

    fn focused_output(&self) -> Option<OutputHandle> { self.state.borrow().focused_output }

    fn terminate(&mut self) {
        self.state.borrow_mut().terminated = true;
    }
}

pub(crate) struct TestWm {
    pub wm: WindowManager,
    pub fake: FakeBackend,
}

impl TestWm {
    pub fn new() -> Self {
        let fake = FakeBackend::new();
        // Pin the prefix so the environment (DISPLAY) cannot skew tests.
        let config = Config {
            prefix: "logo".into(),
            terminal: "true".into(),
            menu: "true".into(),
            launcher_class: "bemenu".into(),
        };
        let wm = WindowManager::new(Box::new(fake.clone()), config);
        Self { wm, fake }
    }

    pub fn add_output(&mut self, w: u32, h: u32) -> OutputHandle { self.fake.add_output(w, h) }

    /// Announce an already-added view to the core and deliver the focus
    /// events that follow. Rejected views leave the stacking order, as the
    /// backend would destroy them.
    pub fn create(&mut self, view: ViewHandle) -> bool {
        let accepted = self.wm.view_created(view);
        if !accepted {
            self.fake.remove_from_stacking(view);
        }
        self.pump();
        accepted
    }

    /// Add and announce a plain view on `output`.
    pub fn open(&mut self, output: OutputHandle) -> ViewHandle {
        let view = self.fake.add_view(output);
        assert!(self.create(view));
        view
    }

    /// Tear a view down the way a backend does: out of the stacking order
    /// first, attributes alive for the duration of the event.
    pub fn destroy(&mut self, view: ViewHandle) {
        self.fake.remove_from_stacking(view);
        self.wm.view_destroyed(view);
        self.fake.delete_view(view);
        self.pump();
    }

    /// Deliver queued focus flips to the core.
    pub fn pump(&mut self) {
        while let Some((view, focused)) = self.fake.take_focus_event() {
            self.wm.view_focus_changed(view, focused);
        }
    }

    pub fn top_view(&self, output: OutputHandle) -> Option<ViewHandle> {
        self.wm.backend().output_views(output).last().copied()
    }
}
