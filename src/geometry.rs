//! Integer geometry primitives shared by figures and connection routing

/// A 2D point in drawing coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle, the display box of a figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-sized rectangle at the origin
    pub fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Build the smallest rectangle spanning two corner points, in any order
    pub fn from_points(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Center point, with coordinates truncated toward zero
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Move the rectangle in place
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Expand to include a point
    pub fn expand_to_include(&self, point: Point) -> Rect {
        let x = self.x.min(point.x);
        let y = self.y.min(point.y);
        let right = self.right().max(point.x);
        let bottom = self.bottom().max(point.y);
        Rect::new(x, y, right - x, bottom - y)
    }
}

/// Connection clearance around a figure, half the box in each direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Insets {
    pub fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

/// Cardinal direction between two figures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Classify the vector from `a` to `b` as one of the four cardinal
    /// directions.
    ///
    /// Vertical separation wins ties: `|dy| >= |dx|` classifies as North
    /// (dy negative) or South, so an exactly diagonal offset routes
    /// vertically. The zero vector is South.
    pub fn between(a: Point, b: Point) -> Direction {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        if dy.abs() >= dx.abs() {
            if dy < 0 {
                Direction::North
            } else {
                Direction::South
            }
        } else if dx > 0 {
            Direction::East
        } else {
            Direction::West
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// True for North and South
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }
}

/// Midpoint of the rectangle edge facing the given direction
pub fn attachment_point(rect: &Rect, direction: Direction) -> Point {
    match direction {
        Direction::North => Point::new(rect.x + rect.width / 2, rect.y),
        Direction::South => Point::new(rect.x + rect.width / 2, rect.bottom()),
        Direction::East => Point::new(rect.right(), rect.y + rect.height / 2),
        Direction::West => Point::new(rect.x, rect.y + rect.height / 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_points_normalizes() {
        let r = Rect::from_points(Point::new(50, 40), Point::new(10, 90));
        assert_eq!(r, Rect::new(10, 40, 40, 50));
    }

    #[test]
    fn test_rect_center_truncates() {
        let r = Rect::new(0, 0, 5, 5);
        assert_eq!(r.center(), Point::new(2, 2));
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(0, 0, 50, 50);
        let b = Rect::new(100, 100, 50, 50);
        assert_eq!(a.union(&b), Rect::new(0, 0, 150, 150));
    }

    #[test]
    fn test_direction_horizontal() {
        let d = Direction::between(Point::new(0, 0), Point::new(100, 10));
        assert_eq!(d, Direction::East);
        let d = Direction::between(Point::new(0, 0), Point::new(-100, 10));
        assert_eq!(d, Direction::West);
    }

    #[test]
    fn test_direction_vertical() {
        let d = Direction::between(Point::new(0, 0), Point::new(10, 100));
        assert_eq!(d, Direction::South);
        let d = Direction::between(Point::new(0, 0), Point::new(10, -100));
        assert_eq!(d, Direction::North);
    }

    #[test]
    fn test_direction_diagonal_prefers_vertical() {
        assert_eq!(
            Direction::between(Point::new(0, 0), Point::new(40, 40)),
            Direction::South
        );
        assert_eq!(
            Direction::between(Point::new(0, 0), Point::new(-40, -40)),
            Direction::North
        );
    }

    #[test]
    fn test_direction_zero_vector() {
        assert_eq!(
            Direction::between(Point::new(7, 7), Point::new(7, 7)),
            Direction::South
        );
    }

    #[test]
    fn test_attachment_points() {
        let r = Rect::new(0, 0, 100, 50);
        assert_eq!(attachment_point(&r, Direction::North), Point::new(50, 0));
        assert_eq!(attachment_point(&r, Direction::South), Point::new(50, 50));
        assert_eq!(attachment_point(&r, Direction::East), Point::new(100, 25));
        assert_eq!(attachment_point(&r, Direction::West), Point::new(0, 25));
    }

    #[test]
    fn test_contains_is_edge_inclusive() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(10, 10)));
        assert!(!r.contains(Point::new(11, 5)));
    }
}
