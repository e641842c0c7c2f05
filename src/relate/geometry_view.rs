//! Flattens an arbitrary `geo_types::Geometry` into the point/line/area
//! buckets the predicate engine's [`crate::relate::topology::TopologyComputer`]
//! walks (spec.md §4.7, SPEC_FULL.md §F.2).
//!
//! geo builds one `GeometryGraph` per input by walking every
//! component and inserting its edges (`relate/geomgraph/geometry_graph.rs`);
//! this is the same walk, but collects components into flat buckets instead
//! of building a graph directly, since our noder already builds the graph
//! generically from whatever edges it's handed.

use geo_types::{Coord, Geometry, GeometryCollection, LineString, Polygon};

use crate::GeoFloat;

/// A geometry decomposed into its 0-, 1- and 2-dimensional components.
///
/// `Rect` and `Triangle` are normalised to `Polygon` on the way in so the
/// rest of the predicate engine only ever deals with three component kinds,
/// the same simplification `geo`'s own algorithms make when they delegate
/// `Rect`/`Triangle` behavior to the `Polygon` impl.
#[derive(Debug, Clone)]
pub struct GeometryView<T: GeoFloat> {
    pub points: Vec<Coord<T>>,
    pub lines: Vec<LineString<T>>,
    pub areas: Vec<Polygon<T>>,
}

/// The highest dimension present in a [`GeometryView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Dimension {
    Point,
    Line,
    Area,
}

impl<T: GeoFloat> GeometryView<T> {
    pub fn empty() -> Self {
        GeometryView {
            points: Vec::new(),
            lines: Vec::new(),
            areas: Vec::new(),
        }
    }

    pub fn from_geometry(geometry: &Geometry<T>) -> Self {
        let mut view = Self::empty();
        view.push_geometry(geometry);
        view
    }

    fn push_geometry(&mut self, geometry: &Geometry<T>) {
        match geometry {
            Geometry::Point(p) => self.points.push(p.0),
            Geometry::Line(l) => self.lines.push(LineString::new(vec![l.start, l.end])),
            Geometry::LineString(ls) => self.lines.push(ls.clone()),
            Geometry::Polygon(poly) => self.areas.push(poly.clone()),
            Geometry::MultiPoint(mp) => self.points.extend(mp.iter().map(|p| p.0)),
            Geometry::MultiLineString(mls) => self.lines.extend(mls.iter().cloned()),
            Geometry::MultiPolygon(mpoly) => self.areas.extend(mpoly.iter().cloned()),
            Geometry::GeometryCollection(gc) => self.push_collection(gc),
            Geometry::Rect(rect) => self.areas.push(rect.to_polygon()),
            Geometry::Triangle(tri) => self.areas.push(tri.to_polygon()),
        }
    }

    fn push_collection(&mut self, collection: &GeometryCollection<T>) {
        for geometry in collection.iter() {
            self.push_geometry(geometry);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.lines.is_empty() && self.areas.is_empty()
    }

    /// `None` when the view has no components at all.
    ///
    /// The predicate engine uses this to pick the default exterior location
    /// for points that never get touched by any visit (spec.md §4.7:
    /// untouched components of the lower-dimensional side default to
    /// Exterior, but an empty geometry has no interior/boundary at all).
    pub fn max_dimension(&self) -> Option<Dimension> {
        if !self.areas.is_empty() {
            Some(Dimension::Area)
        } else if !self.lines.is_empty() {
            Some(Dimension::Line)
        } else if !self.points.is_empty() {
            Some(Dimension::Point)
        } else {
            None
        }
    }
}
