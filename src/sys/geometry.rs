use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self { Self { x, y } }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn new(w: u32, h: u32) -> Self { Self { w, h } }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Geometry {
    pub origin: Point,
    pub size: Size,
}

impl Geometry {
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(w, h),
        }
    }

    /// A geometry of `size` anchored at the coordinate origin.
    pub fn from_size(size: Size) -> Self {
        Self { origin: Point::ZERO, size }
    }

    /// Center `size` within `container`. The result may poke out of the
    /// container when `size` is larger; callers clamp beforehand if that
    /// matters to them.
    pub fn centered_in(size: Size, container: &Geometry) -> Geometry {
        Geometry {
            origin: Point::new(
                container.origin.x + (container.size.w as i32 - size.w as i32) / 2,
                container.origin.y + (container.size.h as i32 - size.h as i32) / 2,
            ),
            size,
        }
    }
}
