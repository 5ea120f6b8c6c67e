//! Focus and stacking. A single view is active at a time; raising honors
//! the view hierarchy, fullscreen peek, and the launcher's focus priority.

use super::{WindowManager, is_managed, is_or};
use crate::common::collections::HashSet;
use crate::sys::backend::{OutputHandle, ViewHandle, ViewState, ViewType};

impl WindowManager {
    /// Give focus to `view`, or clear focus entirely with `None`.
    ///
    /// While the launcher is open it keeps focus no matter what is asked
    /// for; the request collapses into re-raising it. A parent with
    /// visible children redirects focus to its topmost descendant.
    pub fn focus(&mut self, view: Option<ViewHandle>) {
        if self.active_view == view {
            return;
        }

        if let Some(active) = self.active_view {
            if self.backend.view_type(active).contains(ViewType::LAUNCHER) {
                self.backend.view_bring_to_front(active);
                return;
            }
        }

        let target = view.map(|v| self.topmost_descendant(v));
        if target.is_some() && self.active_view == target {
            return;
        }

        if let Some(view) = target {
            let output = self.backend.view_output(view);

            if is_managed(self.backend.as_ref(), view) && !is_or(self.backend.as_ref(), view) {
                // Raise the topmost fullscreen view first, so the focused
                // view ends up just above it while the fullscreen view
                // still covers every other view ("peek").
                let views = self.backend.output_views(output);
                if let Some(&fs) = views
                    .iter()
                    .rev()
                    .find(|&&v| self.backend.view_state(v).contains(ViewState::FULLSCREEN))
                {
                    self.backend.view_bring_to_front(fs);
                }
            }

            self.raise_all(view);

            // The launcher stays above everything whenever it exists.
            let views = self.backend.output_views(output);
            if let Some(&launcher) = views
                .iter()
                .rev()
                .find(|&&v| self.backend.view_type(v).contains(ViewType::LAUNCHER))
            {
                self.backend.view_bring_to_front(launcher);
            }
        }

        self.backend.view_focus(target);
        self.active_view = target;
    }

    /// Walk down the view hierarchy to the child currently stacked
    /// topmost, transitively. Parents never retain focus once they have
    /// visible children.
    fn topmost_descendant(&self, view: ViewHandle) -> ViewHandle {
        let mut target = view;
        let mut seen = HashSet::default();
        seen.insert(target);

        loop {
            let views = self.backend.output_views(self.backend.view_output(target));
            let child = views
                .iter()
                .rev()
                .copied()
                .find(|&v| v != target && self.backend.view_parent(v) == Some(target));
            match child {
                // A malformed parent loop ends the walk rather than hanging it.
                Some(child) if seen.insert(child) => target = child,
                _ => return target,
            }
        }
    }

    /// Raise `view` and all related views, honoring the stacking order:
    /// ancestors root-to-leaf, each level's siblings keeping their
    /// relative order, `view` itself on top.
    fn raise_all(&mut self, view: ViewHandle) {
        let mut chain = vec![view];
        let mut seen = HashSet::default();
        seen.insert(view);
        let mut cursor = view;
        while let Some(parent) = self.backend.view_parent(cursor) {
            // Treat a parent cycle as no parent.
            if !seen.insert(parent) {
                break;
            }
            chain.push(parent);
            cursor = parent;
        }

        for i in (0..chain.len()).rev() {
            let node = chain[i];
            if let Some(&parent) = chain.get(i + 1) {
                let views = self.backend.output_views(self.backend.view_output(node));
                for v in views {
                    if v != node && self.backend.view_parent(v) == Some(parent) {
                        self.backend.view_bring_to_front(v);
                    }
                }
            }
            self.backend.view_bring_to_front(node);
        }
    }

    /// Focus the topmost view on `output` whose mask matches the output's
    /// displayed workspace. Leaves focus untouched when nothing matches.
    pub(crate) fn focus_topmost(&mut self, output: OutputHandle) {
        let mask = self.backend.output_mask(output);
        let views = self.backend.output_views(output);
        if let Some(&view) = views.iter().rev().find(|&&v| self.backend.view_mask(v) == mask) {
            self.focus(Some(view));
        }
    }
}
