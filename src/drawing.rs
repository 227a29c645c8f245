//! The drawing: a container of figures and the elbow connections between them
//!
//! The drawing is the trigger side of route recomputation: moving a figure
//! recomputes every route touching it, and loading a drawing recomputes all
//! routes, since a route is a pure function of current geometry and is never
//! persisted.

use crate::figures::Figure;
use crate::geometry::{attachment_point, Direction, Point};
use crate::routing::{elbow_route, ListenerId, Route, RouteEvent, RouteListener, RouteListeners};
use crate::store::{StoreError, TokenReader, TokenWriter};
use crate::theme::Theme;

/// Marker opening a serialized drawing
const MARKER: &str = "drawing";

/// An elbow connection between two figures, identified by index
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
    route: Route,
}

impl Connection {
    pub fn route(&self) -> &Route {
        &self.route
    }
}

#[derive(Debug, Default)]
pub struct Drawing {
    figures: Vec<Figure>,
    connections: Vec<Connection>,
    listeners: RouteListeners,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a drawing from a file on disk
    pub fn from_file(path: &std::path::Path) -> Result<Drawing, StoreError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Decode a drawing and recompute its routes
    pub fn from_str(source: &str) -> Result<Drawing, StoreError> {
        let mut r = TokenReader::new(source);
        let mut drawing = Self::read_from(&mut r)?;
        drawing.update_routes();
        Ok(drawing)
    }

    /// Add a figure, returning its index
    pub fn add_figure(&mut self, figure: Figure) -> usize {
        self.figures.push(figure);
        self.figures.len() - 1
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn figure(&self, index: usize) -> Option<&Figure> {
        self.figures.get(index)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Connect two figures with an elbow connection, returning the
    /// connection index. The route is computed immediately.
    pub fn connect(&mut self, from: usize, to: usize) -> Result<usize, StoreError> {
        self.check_index(from, None)?;
        self.check_index(to, None)?;
        self.connections.push(Connection {
            from,
            to,
            route: Route::default(),
        });
        let index = self.connections.len() - 1;
        self.recompute_route(index);
        Ok(index)
    }

    fn check_index(&self, index: usize, span: Option<crate::store::Span>) -> Result<(), StoreError> {
        if index >= self.figures.len() {
            return Err(StoreError::BadFigureIndex {
                index,
                count: self.figures.len(),
                span,
            });
        }
        Ok(())
    }

    /// Translate a figure and recompute every route touching it
    pub fn move_figure(&mut self, index: usize, dx: i32, dy: i32) -> Result<(), StoreError> {
        self.check_index(index, None)?;
        self.figures[index].move_by(dx, dy);
        for connection in 0..self.connections.len() {
            let c = &self.connections[connection];
            if c.from == index || c.to == index {
                self.recompute_route(connection);
            }
        }
        Ok(())
    }

    /// Recompute every route, used after loading
    pub fn update_routes(&mut self) {
        for connection in 0..self.connections.len() {
            self.recompute_route(connection);
        }
    }

    /// Pick the connection endpoints for a figure pair: the start figure
    /// attaches on the edge facing the target's center, the end figure on
    /// the opposite edge
    fn endpoints(&self, from: usize, to: usize) -> (Point, Point) {
        let from_box = self.figures[from].display_box();
        let to_box = self.figures[to].display_box();
        let direction = Direction::between(from_box.center(), to_box.center());
        (
            attachment_point(&from_box, direction),
            attachment_point(&to_box, direction.opposite()),
        )
    }

    fn recompute_route(&mut self, connection: usize) {
        let (from, to) = {
            let c = &self.connections[connection];
            (c.from, c.to)
        };
        let (start, end) = self.endpoints(from, to);
        let from_box = self.figures[from].display_box();
        let to_box = self.figures[to].display_box();

        let old_bounds = self.connections[connection].route.bounds();
        self.listeners.notify_changing(&RouteEvent {
            connection,
            invalidated: old_bounds,
        });

        self.connections[connection].route = elbow_route(start, end, &from_box, &to_box);

        let new_bounds = self.connections[connection].route.bounds();
        self.listeners.notify_changed(&RouteEvent {
            connection,
            invalidated: new_bounds,
        });
    }

    pub fn add_listener(&mut self, listener: Box<dyn RouteListener>) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Fill in theme defaults on every figure, keeping explicit values
    pub fn apply_theme(&mut self, theme: &Theme) {
        for figure in &mut self.figures {
            theme.apply_defaults(figure.attributes_mut());
        }
    }

    /// Serialize the drawing: marker, figures, then connections
    pub fn write_to(&self, w: &mut TokenWriter) {
        w.write_string(MARKER);
        w.write_int(self.figures.len() as i32);
        w.newline();
        for figure in &self.figures {
            figure.write_to(w);
            w.newline();
        }
        w.write_int(self.connections.len() as i32);
        w.newline();
        for connection in &self.connections {
            w.write_string("elbow");
            w.write_int(connection.from as i32);
            w.write_int(connection.to as i32);
            w.newline();
        }
    }

    /// Serialized text form
    pub fn serialize(&self) -> String {
        let mut w = TokenWriter::new();
        self.write_to(&mut w);
        w.into_string()
    }

    fn read_from(r: &mut TokenReader) -> Result<Drawing, StoreError> {
        let marker = r.read_string()?;
        if !marker.eq_ignore_ascii_case(MARKER) {
            return Err(StoreError::BadMarker {
                expected: MARKER,
                found: marker,
                span: r.last_span(),
            });
        }

        let mut drawing = Drawing::new();
        let figure_count = r.read_int()?;
        for _ in 0..figure_count {
            let figure = Figure::read_from(r)?;
            drawing.figures.push(figure);
        }

        let connection_count = r.read_int()?;
        for _ in 0..connection_count {
            let kind = r.read_string()?;
            if kind != "elbow" {
                return Err(StoreError::UnknownType {
                    name: kind,
                    span: r.last_span(),
                });
            }
            let from = read_index(r, drawing.figures.len())?;
            let to = read_index(r, drawing.figures.len())?;
            drawing.connections.push(Connection {
                from,
                to,
                route: Route::default(),
            });
        }
        Ok(drawing)
    }
}

fn read_index(r: &mut TokenReader, count: usize) -> Result<usize, StoreError> {
    let raw = r.read_int()?;
    let index = usize::try_from(raw).ok().filter(|i| *i < count);
    index.ok_or_else(|| StoreError::BadFigureIndex {
        index: raw.max(0) as usize,
        count,
        span: Some(r.last_span()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figures::{DiamondFigure, TriangleFigure};
    use crate::geometry::Rect;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn two_figure_drawing() -> Drawing {
        let mut drawing = Drawing::new();
        drawing.add_figure(Figure::Diamond(DiamondFigure::new(
            Point::new(0, 0),
            Point::new(40, 30),
        )));
        drawing.add_figure(Figure::Triangle(TriangleFigure::new(
            Point::new(100, 80),
            Point::new(140, 110),
        )));
        drawing
    }

    #[test]
    fn test_connect_computes_route() {
        let mut drawing = two_figure_drawing();
        let c = drawing.connect(0, 1).unwrap();
        let route = drawing.connections()[c].route();
        // Centers (20,15) -> (120,95): horizontal dominant, so the diamond
        // attaches east and the triangle west, bending at mid x.
        assert_eq!(
            route.points(),
            &[
                Point::new(40, 15),
                Point::new(70, 15),
                Point::new(70, 95),
                Point::new(100, 95)
            ]
        );
    }

    #[test]
    fn test_connect_rejects_bad_index() {
        let mut drawing = two_figure_drawing();
        let err = drawing.connect(0, 5).unwrap_err();
        assert!(matches!(err, StoreError::BadFigureIndex { .. }));
    }

    #[test]
    fn test_move_figure_recomputes_touching_routes() {
        let mut drawing = two_figure_drawing();
        drawing.connect(0, 1).unwrap();
        // Align the triangle's center column with the diamond's: route
        // becomes vertical dominant.
        drawing.move_figure(1, -100, 0).unwrap();
        let route = drawing.connections()[0].route();
        assert!(route.is_orthogonal());
        assert_eq!(route.start(), Some(Point::new(20, 30)));
        assert_eq!(route.end(), Some(Point::new(20, 80)));
    }

    struct CountingListener {
        events: Rc<RefCell<Vec<(&'static str, usize, Rect)>>>,
    }

    impl RouteListener for CountingListener {
        fn route_changing(&mut self, event: &RouteEvent) {
            self.events
                .borrow_mut()
                .push(("changing", event.connection, event.invalidated));
        }

        fn route_changed(&mut self, event: &RouteEvent) {
            self.events
                .borrow_mut()
                .push(("changed", event.connection, event.invalidated));
        }
    }

    #[test]
    fn test_changing_fires_before_changed_with_old_then_new_bounds() {
        let mut drawing = two_figure_drawing();
        drawing.connect(0, 1).unwrap();
        let events = Rc::new(RefCell::new(Vec::new()));
        drawing.add_listener(Box::new(CountingListener {
            events: events.clone(),
        }));

        drawing.move_figure(0, 0, 10).unwrap();

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, "changing");
        assert_eq!(events[1].0, "changed");
        // The changing event carries the bounds of the route being replaced
        assert_eq!(events[0].2, Rect::new(40, 15, 60, 80));
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut drawing = two_figure_drawing();
        drawing.connect(0, 1).unwrap();

        let text = drawing.serialize();
        let reread = Drawing::from_str(&text).unwrap();
        assert_eq!(reread.figures(), drawing.figures());
        assert_eq!(reread.connections(), drawing.connections());
    }

    #[test]
    fn test_bad_marker() {
        let err = Drawing::from_str("\"doodle\" 0 0").unwrap_err();
        assert!(matches!(err, StoreError::BadMarker { .. }));
    }

    #[test]
    fn test_out_of_range_connection_index() {
        let source = "\"drawing\" 0\n1\n\"elbow\" 0 1\n";
        let err = Drawing::from_str(source).unwrap_err();
        assert!(matches!(err, StoreError::BadFigureIndex { .. }));
    }
}
