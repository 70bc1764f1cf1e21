use std::fmt;

use crate::error::{LayoutError, LayoutResult};

/// Axis-aligned integer box in canvas coordinates. Width and height are
/// always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> LayoutResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(LayoutError::InvalidGeometry { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// `[x_min, y_min, x_max, y_max]`
    pub fn bbox(&self) -> [i32; 4] {
        [self.x, self.y, self.right(), self.bottom()]
    }

    /// Closed containment: touching edges still fit.
    pub fn contains(&self, other: &Bounds) -> bool {
        self.x <= other.x
            && other.right() <= self.right()
            && self.y <= other.y
            && other.bottom() <= self.bottom()
    }

    /// Half-open intersection: boxes sharing only an edge do not overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={}, y={}, {}x{}",
            self.x, self.y, self.width, self.height
        )
    }
}
