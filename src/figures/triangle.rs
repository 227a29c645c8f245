//! A triangle figure: apex at the top-center of the display box

use crate::attributes::AttributeMap;
use crate::geometry::{Point, Rect};
use crate::store::{StoreError, TokenReader, TokenWriter};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleFigure {
    display_box: Rect,
    pub attributes: AttributeMap,
}

impl TriangleFigure {
    /// Build from two corner points, in any order
    pub fn new(origin: Point, corner: Point) -> Self {
        Self {
            display_box: Rect::from_points(origin, corner),
            attributes: AttributeMap::new(),
        }
    }

    pub fn display_box(&self) -> Rect {
        self.display_box
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.display_box.translate(dx, dy);
    }

    /// Polygon vertices: apex, bottom-left, bottom-right
    pub fn outline(&self) -> Vec<Point> {
        let r = self.display_box;
        vec![
            Point::new(r.x + r.width / 2, r.y),
            Point::new(r.x, r.bottom()),
            Point::new(r.right(), r.bottom()),
        ]
    }

    /// Exact integer point-in-triangle test via cross-product signs, in
    /// doubled coordinates so the apex needs no division
    pub fn contains(&self, point: Point) -> bool {
        let r = self.display_box;
        let a = (2 * r.x + r.width, 2 * r.y);
        let b = (2 * r.x, 2 * r.bottom());
        let c = (2 * r.right(), 2 * r.bottom());
        let p = (2 * point.x, 2 * point.y);

        let sides = [cross(a, b, p), cross(b, c, p), cross(c, a, p)];
        let has_positive = sides.iter().any(|s| *s > 0);
        let has_negative = sides.iter().any(|s| *s < 0);
        !(has_positive && has_negative)
    }

    pub(crate) fn write_body(&self, w: &mut TokenWriter) {
        self.attributes.write_to(w);
        w.write_int(self.display_box.x);
        w.write_int(self.display_box.y);
        w.write_int(self.display_box.width);
        w.write_int(self.display_box.height);
    }

    pub(crate) fn read_body(r: &mut TokenReader) -> Result<TriangleFigure, StoreError> {
        let attributes = AttributeMap::read_from(r)?;
        let display_box = Rect::new(
            r.read_int()?,
            r.read_int()?,
            r.read_int()?,
            r.read_int()?,
        );
        Ok(TriangleFigure {
            display_box,
            attributes,
        })
    }
}

fn cross(o: (i32, i32), a: (i32, i32), b: (i32, i32)) -> i64 {
    let (ox, oy) = (o.0 as i64, o.1 as i64);
    let (ax, ay) = (a.0 as i64, a.1 as i64);
    let (bx, by) = (b.0 as i64, b.1 as i64);
    (ax - ox) * (by - oy) - (ay - oy) * (bx - ox)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> TriangleFigure {
        TriangleFigure::new(Point::new(0, 0), Point::new(10, 10))
    }

    #[test]
    fn test_outline_vertices() {
        assert_eq!(
            unit_triangle().outline(),
            vec![Point::new(5, 0), Point::new(0, 10), Point::new(10, 10)]
        );
    }

    #[test]
    fn test_contains_interior_and_edges() {
        let t = unit_triangle();
        assert!(t.contains(Point::new(5, 5)));
        assert!(t.contains(Point::new(5, 0)));
        assert!(t.contains(Point::new(5, 10)));
        assert!(t.contains(Point::new(0, 10)));
    }

    #[test]
    fn test_top_corners_are_outside() {
        let t = unit_triangle();
        assert!(!t.contains(Point::new(0, 0)));
        assert!(!t.contains(Point::new(10, 0)));
    }

    #[test]
    fn test_round_trip_body() {
        let original = unit_triangle();
        let mut w = TokenWriter::new();
        original.write_body(&mut w);
        let text = w.into_string();
        let mut r = TokenReader::new(&text);
        assert_eq!(TriangleFigure::read_body(&mut r).unwrap(), original);
    }
}
