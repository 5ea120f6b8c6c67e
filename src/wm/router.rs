//! Routing views across workspaces ("spaces", one bit each) and outputs.

use tracing::debug;

use super::{WindowManager, is_tiled};
use crate::sys::backend::{Direction, OutputHandle, ViewHandle};

impl WindowManager {
    /// Display space `index` on the focused output and focus its topmost
    /// view.
    pub fn focus_space(&mut self, index: u32) {
        let Some(output) = self.backend.focused_output() else {
            return;
        };
        debug!(index, "focus space");
        self.backend.output_set_mask(output, 1 << index);
        self.focus_topmost(output);
        self.relayout(output);
    }

    /// Move `view` to space `index` and follow it there.
    pub fn move_to_space(&mut self, view: ViewHandle, index: u32) {
        self.backend.view_set_mask(view, 1 << index);
        self.focus_space(index);
    }

    /// Move `view` to the output at positional `index`. Out-of-range
    /// indices are a no-op.
    pub fn move_to_output(&mut self, view: ViewHandle, index: usize) {
        let Some(output) = self.backend.outputs().get(index).copied() else {
            return;
        };
        let from = self.backend.view_output(view);

        self.backend.view_set_mask(view, self.backend.output_mask(output));
        self.backend.view_set_output(view, output);
        self.view_moved_to_output(view, from, output);
        self.focus_output(output);
    }

    /// Rotate the tiled, mask-matching views of the focused output by one
    /// position, leaving everything else (fullscreen views, dialogs, the
    /// launcher) in place.
    pub fn cycle_output_views(&mut self, direction: Direction) {
        let Some(output) = self.backend.focused_output() else {
            return;
        };
        let views = self.backend.output_views(output);
        if views.len() < 2 {
            return;
        }

        let mask = self.backend.output_mask(output);
        let tiled: Vec<usize> = views
            .iter()
            .enumerate()
            .filter(|&(_, &v)| {
                is_tiled(self.backend.as_ref(), v) && self.backend.view_mask(v) == mask
            })
            .map(|(i, _)| i)
            .collect();

        // A chain of adjacent swaps along the tiled subsequence.
        let mut last: Option<usize> = None;
        match direction {
            Direction::Next => {
                for &i in &tiled {
                    if let Some(l) = last {
                        self.backend.output_swap_views(output, l, i);
                    }
                    last = Some(i);
                }
            }
            Direction::Prev => {
                for &i in tiled.iter().rev() {
                    if let Some(l) = last {
                        self.backend.output_swap_views(output, l, i);
                    }
                    last = Some(i);
                }
            }
        }

        self.relayout(output);
    }

    /// Walk the active view's output stacking order circularly and focus
    /// the next view whose mask matches the displayed space. Safe no-op
    /// when there is nothing else to focus.
    pub fn cycle_focus(&mut self, direction: Direction) {
        let Some(view) = self.active_view else {
            return;
        };
        let output = self.backend.view_output(view);
        let views = self.backend.output_views(output);
        let len = views.len();
        if len < 2 {
            return;
        }
        let Some(start) = views.iter().position(|&v| v == view) else {
            return;
        };

        let mask = self.backend.output_mask(output);
        for step in 1..len {
            let idx = match direction {
                Direction::Next => (start + step) % len,
                Direction::Prev => (start + len - step) % len,
            };
            let candidate = views[idx];
            if candidate != view && self.backend.view_mask(candidate) == mask {
                self.focus(Some(candidate));
                return;
            }
        }
    }

    /// Focus the next output in the global list, then its topmost view.
    pub fn cycle_output_focus(&mut self, direction: Direction) {
        let outputs = self.backend.outputs();
        if outputs.is_empty() {
            return;
        }
        let start = self
            .backend
            .focused_output()
            .and_then(|current| outputs.iter().position(|&o| o == current))
            .unwrap_or(0);
        let next = match direction {
            Direction::Next => (start + 1) % outputs.len(),
            Direction::Prev => (start + outputs.len() - 1) % outputs.len(),
        };
        self.focus_output(outputs[next]);
    }

    pub(crate) fn focus_output(&mut self, output: OutputHandle) {
        self.backend.output_focus(output);
        self.focus_topmost(output);
        self.relayout(output);
    }
}
