//! Stock layout functions registered by
//! [`WindowManager::install_default_layouts`](crate::wm::WindowManager::install_default_layouts).

use crate::sys::backend::{Backend, ViewHandle};
use crate::sys::geometry::{Geometry, Size};

/// Master/stack split: the first view fills the left half at full height
/// (the whole frame when alone), the rest stack top-to-bottom on the right
/// half.
pub fn vstack(backend: &mut dyn Backend, frame: &Geometry, views: &[ViewHandle]) {
    let count = views.len() as u32;
    if count == 0 {
        return;
    }

    let height = frame.size.h / if count > 1 { count - 1 } else { 1 };
    let master_width = if count > 1 { frame.size.w / 2 } else { frame.size.w };

    let mut y = frame.origin.y;
    for (i, &view) in views.iter().enumerate() {
        if i == 0 {
            backend.view_set_geometry(view, Geometry {
                origin: frame.origin,
                size: Size::new(master_width, frame.size.h),
            });
        } else {
            backend.view_set_geometry(
                view,
                Geometry::new(
                    frame.origin.x + (frame.size.w / 2) as i32,
                    y,
                    frame.size.w / 2,
                    height,
                ),
            );
            y += height as i32;
        }
    }
}

/// Near-square grid, filled left-to-right, top-to-bottom. Columns in the
/// last row stretch to cover the remainder.
pub fn grid(backend: &mut dyn Backend, frame: &Geometry, views: &[ViewHandle]) {
    let count = views.len() as u32;
    if count == 0 {
        return;
    }

    let cols = (count as f64).sqrt().ceil() as u32;
    let rows = count.div_ceil(cols);
    let row_height = frame.size.h / rows;

    for (i, &view) in views.iter().enumerate() {
        let i = i as u32;
        let row = i / cols;
        let col = i % cols;
        let cols_in_row = if row == rows - 1 { count - row * cols } else { cols };
        let col_width = frame.size.w / cols_in_row;

        backend.view_set_geometry(
            view,
            Geometry::new(
                frame.origin.x + (col * col_width) as i32,
                frame.origin.y + (row * row_height) as i32,
                col_width,
                row_height,
            ),
        );
    }
}

/// Every view gets the whole frame.
pub fn monocle(backend: &mut dyn Backend, frame: &Geometry, views: &[ViewHandle]) {
    for &view in views {
        backend.view_set_geometry(view, *frame);
    }
}
