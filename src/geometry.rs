//! Axis-aligned box geometry and overlap.

/// Axis-aligned rectangle in corner form.
///
/// `x`/`y` is the top-left corner in target image coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Box width.
    pub width: f32,
    /// Box height.
    pub height: f32,
}

impl BoundingBox {
    /// Creates a box from its top-left corner and size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a box from center coordinates and size.
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    /// Right edge.
    pub fn x_max(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn y_max(&self) -> f32 {
        self.y + self.height
    }

    /// Signed area; negative or zero for degenerate boxes.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Intersection-over-union with `other`.
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        iou(self, other)
    }
}

/// Intersection-over-union of two boxes.
///
/// Returns 0 when either box has non-positive area, so zero-size boxes never
/// produce NaN.
pub fn iou(a: &BoundingBox, b: &BoundingBox) -> f32 {
    let area_a = a.area();
    let area_b = b.area();
    if area_a <= 0.0 || area_b <= 0.0 {
        return 0.0;
    }

    let inter_w = (a.x_max().min(b.x_max()) - a.x.max(b.x)).max(0.0);
    let inter_h = (a.y_max().min(b.y_max()) - a.y.max(b.y)).max(0.0);
    let inter = inter_w * inter_h;

    inter / (area_a + area_b - inter)
}
