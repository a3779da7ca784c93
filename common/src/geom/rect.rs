use super::point::Point;

/// Axis-aligned integer rectangle, half-open on both axes: `min` is inside,
/// `max` is the first coordinate outside.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rect {
    pub min: Point<i64>,
    pub max: Point<i64>,
}

impl Rect {
    pub fn new(min: Point<i64>, max: Point<i64>) -> Self {
        Self { min, max }
    }

    pub fn of_gate(origin: Point<i64>, width: i64, height: i64) -> Self {
        Self::new(origin, Point::new(origin.x + width, origin.y + height))
    }

    pub fn width(&self) -> i64 {
        self.max.x - self.min.x
    }
    pub fn height(&self) -> i64 {
        self.max.y - self.min.y
    }

    /// Interiors intersect on both axes. Rectangles that only share a
    /// boundary edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_are_not_overlap() {
        let a = Rect::of_gate(Point::new(0, 0), 10, 5);
        let b = Rect::of_gate(Point::new(10, 0), 10, 5);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn interior_intersection_is_overlap() {
        let a = Rect::of_gate(Point::new(0, 0), 10, 5);
        let b = Rect::of_gate(Point::new(9, 4), 10, 5);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn disjoint_on_one_axis_is_legal() {
        let a = Rect::of_gate(Point::new(0, 0), 10, 5);
        let b = Rect::of_gate(Point::new(0, 5), 10, 5);
        assert!(!a.overlaps(&b));
    }
}
