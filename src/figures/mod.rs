//! Concrete figure shapes
//!
//! Each figure owns a display box and an attribute map. The set of shapes is
//! closed; [`Figure`] dispatches the common operations.

pub mod diamond;
pub mod triangle;

pub use diamond::DiamondFigure;
pub use triangle::TriangleFigure;

use crate::attributes::AttributeMap;
use crate::geometry::{attachment_point, Direction, Insets, Point, Rect};
use crate::store::{StoreError, TokenReader, TokenWriter};

/// A drawable, movable, connectable shape
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Diamond(DiamondFigure),
    Triangle(TriangleFigure),
}

impl Figure {
    /// A copy of the figure's display box
    pub fn display_box(&self) -> Rect {
        match self {
            Figure::Diamond(f) => f.display_box(),
            Figure::Triangle(f) => f.display_box(),
        }
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        match self {
            Figure::Diamond(f) => f.move_by(dx, dy),
            Figure::Triangle(f) => f.move_by(dx, dy),
        }
    }

    /// Exact hit test against the shape's outline polygon
    pub fn contains(&self, point: Point) -> bool {
        match self {
            Figure::Diamond(f) => f.contains(point),
            Figure::Triangle(f) => f.contains(point),
        }
    }

    /// The shape's polygon vertices
    pub fn outline(&self) -> Vec<Point> {
        match self {
            Figure::Diamond(f) => f.outline(),
            Figure::Triangle(f) => f.outline(),
        }
    }

    /// Clearance a connection should keep around this figure
    pub fn connection_insets(&self) -> Insets {
        let rect = self.display_box();
        Insets::new(
            rect.height / 2,
            rect.width / 2,
            rect.height / 2,
            rect.width / 2,
        )
    }

    /// Point where a connection leaving in `direction` attaches
    pub fn connector_point(&self, direction: Direction) -> Point {
        attachment_point(&self.display_box(), direction)
    }

    pub fn attributes(&self) -> &AttributeMap {
        match self {
            Figure::Diamond(f) => &f.attributes,
            Figure::Triangle(f) => &f.attributes,
        }
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeMap {
        match self {
            Figure::Diamond(f) => &mut f.attributes,
            Figure::Triangle(f) => &mut f.attributes,
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Figure::Diamond(_) => "diamond",
            Figure::Triangle(_) => "triangle",
        }
    }

    /// Serialize as a kind word followed by the figure body
    pub fn write_to(&self, w: &mut TokenWriter) {
        w.write_string(self.kind_name());
        match self {
            Figure::Diamond(f) => f.write_body(w),
            Figure::Triangle(f) => f.write_body(w),
        }
    }

    /// Decode a figure, dispatching on the kind word
    pub fn read_from(r: &mut TokenReader) -> Result<Figure, StoreError> {
        let kind = r.read_string()?;
        match kind.as_str() {
            "diamond" => Ok(Figure::Diamond(DiamondFigure::read_body(r)?)),
            "triangle" => Ok(Figure::Triangle(TriangleFigure::read_body(r)?)),
            _ => Err(StoreError::UnknownType {
                name: kind,
                span: r.last_span(),
            }),
        }
    }
}
