//! Geometry recomputation for one output: fixed rules first (launcher pin,
//! fullscreen fill, splash centering, parent-fit), then the active layout
//! for whatever tiles.

use super::{WindowManager, is_managed, is_or, is_tiled};
use crate::common::collections::HashSet;
use crate::sys::backend::{OutputHandle, ViewHandle, ViewState, ViewType};
use crate::sys::geometry::{Geometry, Point, Size};

impl WindowManager {
    pub fn relayout(&mut self, output: OutputHandle) {
        // Output not modeset yet; nothing sensible to compute.
        let Some(resolution) = self.backend.output_resolution(output) else {
            return;
        };

        let mask = self.backend.output_mask(output);
        let frame = Geometry::from_size(resolution);
        let views = self.backend.output_views(output);

        for &view in &views {
            if self.backend.view_mask(view) != mask {
                continue;
            }

            let ty = self.backend.view_type(view);

            if ty.contains(ViewType::LAUNCHER) {
                let mut g = self.backend.view_geometry(view);
                g.origin = Point::ZERO;
                self.backend.view_set_geometry(view, g);
            }

            if self.backend.view_state(view).contains(ViewState::FULLSCREEN) {
                self.backend.view_set_geometry(view, frame);
            }

            if ty.contains(ViewType::SPLASH) {
                let size = self.backend.view_geometry(view).size;
                self.backend.view_set_geometry(view, Geometry::centered_in(size, &frame));
            }

            if is_managed(self.backend.as_ref(), view) && !is_or(self.backend.as_ref(), view) {
                if let Some(parent) = self.backend.view_parent(view) {
                    let size = self.backend.view_geometry(view).size;
                    self.layout_parent(view, parent, size);
                }
            }
        }

        let Some(function) = self.layouts.active().map(|l| l.function) else {
            return;
        };

        let tiled: Vec<ViewHandle> = views
            .iter()
            .copied()
            .filter(|&v| is_tiled(self.backend.as_ref(), v) && self.backend.view_mask(v) == mask)
            .collect();

        for &view in &tiled {
            self.backend.view_set_state(view, ViewState::MAXIMIZED, true);
        }
        function(self.backend.as_mut(), &frame, &tiled);
    }

    /// Constrain a transient view against its ancestry: between 60% and
    /// 80% of the undermost ancestor's size in each dimension (clamped
    /// against `requested`), centered within the immediate parent.
    pub(crate) fn layout_parent(&mut self, view: ViewHandle, parent: ViewHandle, requested: Size) {
        let mut under = parent;
        let mut seen = HashSet::default();
        seen.insert(view);
        seen.insert(parent);
        while let Some(p) = self.backend.view_parent(under) {
            // A parent cycle ends the walk.
            if !seen.insert(p) {
                break;
            }
            under = p;
        }

        let u = self.backend.view_geometry(under);
        let p = self.backend.view_geometry(parent);

        let cw = (requested.w as f64).max(u.size.w as f64 * 0.6);
        let ch = (requested.h as f64).max(u.size.h as f64 * 0.6);
        let size = Size::new(
            cw.min(u.size.w as f64 * 0.8) as u32,
            ch.min(u.size.h as f64 * 0.8) as u32,
        );

        self.backend.view_set_geometry(view, Geometry::centered_in(size, &p));
    }
}
