//! Stock layouts and the traditional default keybind set. Hosts call the
//! installers after constructing the manager; an extension host can remove
//! or shadow any of these by name afterwards.

use super::WindowManager;
use crate::keybind::{KEYBIND_SIGNATURE, KeybindFn};
use crate::layout_engine::{LAYOUT_SIGNATURE, LayoutFn, builtin};
use crate::sys::backend::{Direction, ViewHandle, ViewState};
use crate::sys::process;

impl WindowManager {
    pub fn install_default_layouts(&mut self) {
        let layouts: [(&str, LayoutFn); 3] = [
            ("vstack", builtin::vstack),
            ("grid", builtin::grid),
            ("monocle", builtin::monocle),
        ];
        for (name, function) in layouts {
            self.layouts.add(name, function, LAYOUT_SIGNATURE);
        }
    }

    pub fn install_default_keybinds(&mut self) {
        let binds: &[(&str, &[&str], KeybindFn, isize)] = &[
            ("exit", &["<P-Escape>"], key_cb_exit, 0),
            ("close client", &["<P-q>"], key_cb_close_client, 0),
            ("spawn terminal", &["<P-Return>"], key_cb_spawn_terminal, 0),
            ("spawn menu", &["<P-p>"], key_cb_spawn_menu, 0),
            ("toggle fullscreen", &["<P-f>"], key_cb_toggle_fullscreen, 0),
            ("cycle clients", &["<P-h>"], key_cb_cycle_clients, 0),
            ("focus next output", &["<P-l>"], key_cb_focus_next_output, 0),
            ("focus next client", &["<P-k>"], key_cb_focus_next_client, 0),
            ("focus previous client", &["<P-j>"], key_cb_focus_previous_client, 0),
            ("focus space 0", &["<P-1>", "<P-KP_1>"], key_cb_focus_space, 0),
            ("focus space 1", &["<P-2>", "<P-KP_2>"], key_cb_focus_space, 1),
            ("focus space 2", &["<P-3>", "<P-KP_3>"], key_cb_focus_space, 2),
            ("focus space 3", &["<P-4>", "<P-KP_4>"], key_cb_focus_space, 3),
            ("focus space 4", &["<P-5>", "<P-KP_5>"], key_cb_focus_space, 4),
            ("focus space 5", &["<P-6>", "<P-KP_6>"], key_cb_focus_space, 5),
            ("focus space 6", &["<P-7>", "<P-KP_7>"], key_cb_focus_space, 6),
            ("focus space 7", &["<P-8>", "<P-KP_8>"], key_cb_focus_space, 7),
            ("focus space 8", &["<P-9>", "<P-KP_9>"], key_cb_focus_space, 8),
            ("focus space 9", &["<P-0>", "<P-KP_0>"], key_cb_focus_space, 9),
            ("move to space 0", &["<P-F1>"], key_cb_move_to_space, 0),
            ("move to space 1", &["<P-F2>"], key_cb_move_to_space, 1),
            ("move to space 2", &["<P-F3>"], key_cb_move_to_space, 2),
            ("move to space 3", &["<P-F4>"], key_cb_move_to_space, 3),
            ("move to space 4", &["<P-F5>"], key_cb_move_to_space, 4),
            ("move to space 5", &["<P-F6>"], key_cb_move_to_space, 5),
            ("move to space 6", &["<P-F7>"], key_cb_move_to_space, 6),
            ("move to space 7", &["<P-F8>"], key_cb_move_to_space, 7),
            ("move to space 8", &["<P-F9>"], key_cb_move_to_space, 8),
            ("move to space 9", &["<P-F10>"], key_cb_move_to_space, 9),
            ("move to output 0", &["<P-z>"], key_cb_move_to_output, 0),
            ("move to output 1", &["<P-x>"], key_cb_move_to_output, 1),
            ("move to output 2", &["<P-c>"], key_cb_move_to_output, 2),
            ("next layout", &["<P-w>"], key_cb_next_layout, 0),
        ];

        for &(name, syntaxes, function, arg) in binds {
            self.keybinds.add(name, syntaxes, function, arg, KEYBIND_SIGNATURE);
        }
    }
}

fn key_cb_exit(wm: &mut WindowManager, _view: Option<ViewHandle>, _time: u32, _arg: isize) {
    wm.backend.terminate();
}

fn key_cb_close_client(wm: &mut WindowManager, view: Option<ViewHandle>, _time: u32, _arg: isize) {
    if let Some(view) = view {
        wm.backend.view_close(view);
    }
}

fn key_cb_spawn_terminal(
    wm: &mut WindowManager,
    _view: Option<ViewHandle>,
    _time: u32,
    _arg: isize,
) {
    process::spawn(&wm.config.terminal);
}

fn key_cb_spawn_menu(wm: &mut WindowManager, _view: Option<ViewHandle>, _time: u32, _arg: isize) {
    process::spawn(&wm.config.menu);
}

fn key_cb_toggle_fullscreen(
    wm: &mut WindowManager,
    view: Option<ViewHandle>,
    _time: u32,
    _arg: isize,
) {
    let Some(view) = view else {
        return;
    };
    let fullscreen = wm.backend.view_state(view).contains(ViewState::FULLSCREEN);
    wm.backend.view_set_state(view, ViewState::FULLSCREEN, !fullscreen);
    let output = wm.backend.view_output(view);
    wm.relayout(output);
}

fn key_cb_cycle_clients(wm: &mut WindowManager, _view: Option<ViewHandle>, _time: u32, _arg: isize) {
    wm.cycle_output_views(Direction::Next);
}

fn key_cb_focus_space(wm: &mut WindowManager, _view: Option<ViewHandle>, _time: u32, arg: isize) {
    wm.focus_space(arg as u32);
}

fn key_cb_move_to_space(wm: &mut WindowManager, view: Option<ViewHandle>, _time: u32, arg: isize) {
    if let Some(view) = view {
        wm.move_to_space(view, arg as u32);
    }
}

fn key_cb_move_to_output(wm: &mut WindowManager, view: Option<ViewHandle>, _time: u32, arg: isize) {
    if let Some(view) = view {
        wm.move_to_output(view, arg as usize);
    }
}

fn key_cb_focus_next_output(
    wm: &mut WindowManager,
    _view: Option<ViewHandle>,
    _time: u32,
    _arg: isize,
) {
    wm.cycle_output_focus(Direction::Next);
}

fn key_cb_focus_next_client(
    wm: &mut WindowManager,
    view: Option<ViewHandle>,
    _time: u32,
    _arg: isize,
) {
    if view.is_some() {
        wm.cycle_focus(Direction::Next);
    }
}

fn key_cb_focus_previous_client(
    wm: &mut WindowManager,
    view: Option<ViewHandle>,
    _time: u32,
    _arg: isize,
) {
    if view.is_some() {
        wm.cycle_focus(Direction::Prev);
    }
}

fn key_cb_next_layout(wm: &mut WindowManager, _view: Option<ViewHandle>, _time: u32, _arg: isize) {
    wm.layouts.cycle(Direction::Next);
    if let Some(output) = wm.backend.focused_output() {
        wm.relayout(output);
    }
}
