//! Thin views over `geo_types::Geometry` (spec.md §6 "Consumed from the
//! geometry model"). The geometry model itself is an external collaborator
//! out of scope for this kernel; this module is the small seam of helpers
//! the overlay/relate/validate entry points need to walk one.

use geo_types::{Coord, Geometry, GeometryCollection, LineString, Polygon};

use crate::GeoFloat;

/// One ring of a polygon together with its role, the unit the noder/edge
/// builder actually consumes (spec.md §4.3).
pub struct RingRef<'a, T: GeoFloat> {
    pub coords: &'a LineString<T>,
    pub is_hole: bool,
}

/// Every ring of every polygon in `geometry`, flattened, in traversal order
/// (spec.md §6: `getExteriorRing`/`getInteriorRingN`).
pub fn polygon_rings<T: GeoFloat>(geometry: &Geometry<T>) -> Vec<RingRef<'_, T>> {
    let mut out = Vec::new();
    visit_polygons(geometry, &mut |polygon| {
        out.push(RingRef {
            coords: polygon.exterior(),
            is_hole: false,
        });
        for hole in polygon.interiors() {
            out.push(RingRef {
                coords: hole,
                is_hole: true,
            });
        }
    });
    out
}

fn visit_polygons<'a, T: GeoFloat>(geometry: &'a Geometry<T>, f: &mut impl FnMut(&'a Polygon<T>)) {
    match geometry {
        Geometry::Polygon(p) => f(p),
        Geometry::MultiPolygon(mp) => mp.0.iter().for_each(|p| f(p)),
        // `Rect`/`Triangle` have no borrowable `Polygon` field; owning callers
        // that need to walk their rings go through `owned_polygons` instead.
        Geometry::Rect(_) | Geometry::Triangle(_) => {}
        Geometry::GeometryCollection(gc) => gc.0.iter().for_each(|g| visit_polygons(g, f)),
        _ => {}
    }
}

/// Every polygon in `geometry`, owned, with `Rect`/`Triangle` normalised to
/// their `Polygon` form first (spec.md §6: curved/derived shapes expose a
/// coordinate-sequence view the same way an ordinary polygon does).
pub fn owned_polygons<T: GeoFloat>(geometry: &Geometry<T>) -> Vec<Polygon<T>> {
    fn visit<T: GeoFloat>(g: &Geometry<T>, out: &mut Vec<Polygon<T>>) {
        match g {
            Geometry::Polygon(p) => out.push(p.clone()),
            Geometry::MultiPolygon(mp) => out.extend(mp.0.iter().cloned()),
            Geometry::Rect(r) => out.push(r.to_polygon()),
            Geometry::Triangle(t) => out.push(t.to_polygon()),
            Geometry::GeometryCollection(gc) => gc.0.iter().for_each(|g| visit(g, out)),
            _ => {}
        }
    }
    let mut out = Vec::new();
    visit(geometry, &mut out);
    out
}

/// Every ring of every polygon in `geometry`, `Rect`/`Triangle` included
/// (spec.md §6 traversal, generalized over [`polygon_rings`] to cover the
/// two derived-shape variants it can't borrow through).
pub fn all_rings<T: GeoFloat>(geometry: &Geometry<T>) -> Vec<(LineString<T>, bool)> {
    fn push_polygon<T: GeoFloat>(p: &Polygon<T>, out: &mut Vec<(LineString<T>, bool)>) {
        out.push((p.exterior().clone(), false));
        for hole in p.interiors() {
            out.push((hole.clone(), true));
        }
    }
    fn visit<T: GeoFloat>(g: &Geometry<T>, out: &mut Vec<(LineString<T>, bool)>) {
        match g {
            Geometry::Polygon(p) => push_polygon(p, out),
            Geometry::MultiPolygon(mp) => mp.0.iter().for_each(|p| push_polygon(p, out)),
            Geometry::Rect(r) => push_polygon(&r.to_polygon(), out),
            Geometry::Triangle(t) => push_polygon(&t.to_polygon(), out),
            Geometry::GeometryCollection(gc) => gc.0.iter().for_each(|g| visit(g, out)),
            _ => {}
        }
    }
    let mut out = Vec::new();
    visit(geometry, &mut out);
    out
}

/// Every linestring in `geometry` that isn't a polygon ring (spec.md §6
/// traversal over `LineString`/`MultiLineString`/`Line` members).
pub fn line_strings<T: GeoFloat>(geometry: &Geometry<T>) -> Vec<LineString<T>> {
    let mut out = Vec::new();
    visit_lines(geometry, &mut out);
    out
}

fn visit_lines<T: GeoFloat>(geometry: &Geometry<T>, out: &mut Vec<LineString<T>>) {
    match geometry {
        Geometry::LineString(ls) => out.push(ls.clone()),
        Geometry::Line(l) => out.push(LineString::new(vec![l.start, l.end])),
        Geometry::MultiLineString(mls) => out.extend(mls.0.iter().cloned()),
        Geometry::GeometryCollection(gc) => gc.0.iter().for_each(|g| visit_lines(g, out)),
        _ => {}
    }
}

/// Every point coordinate in `geometry` (spec.md §6 `MultiPoint`/`Point`).
pub fn points<T: GeoFloat>(geometry: &Geometry<T>) -> Vec<Coord<T>> {
    let mut out = Vec::new();
    visit_points(geometry, &mut out);
    out
}

fn visit_points<T: GeoFloat>(geometry: &Geometry<T>, out: &mut Vec<Coord<T>>) {
    match geometry {
        Geometry::Point(p) => out.push(p.0),
        Geometry::MultiPoint(mp) => out.extend(mp.0.iter().map(|p| p.0)),
        Geometry::GeometryCollection(gc) => gc.0.iter().for_each(|g| visit_points(g, out)),
        _ => {}
    }
}

/// `getDimension()` (spec.md §6): 0 for points, 1 for curves, 2 for
/// surfaces; a heterogeneous collection takes its maximum member dimension.
pub fn dimension<T: GeoFloat>(geometry: &Geometry<T>) -> usize {
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => 0,
        Geometry::Line(_) | Geometry::LineString(_) | Geometry::MultiLineString(_) => 1,
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => 2,
        Geometry::GeometryCollection(gc) => gc.0.iter().map(dimension).max().unwrap_or(0),
    }
}

/// `isEmpty()` (spec.md §6).
pub fn is_empty<T: GeoFloat>(geometry: &Geometry<T>) -> bool {
    match geometry {
        Geometry::Point(_) | Geometry::Line(_) | Geometry::Rect(_) | Geometry::Triangle(_) => false,
        Geometry::LineString(ls) => ls.0.is_empty(),
        Geometry::Polygon(p) => p.exterior().0.is_empty(),
        Geometry::MultiPoint(mp) => mp.0.is_empty(),
        Geometry::MultiLineString(mls) => mls.0.iter().all(|ls| ls.0.is_empty()),
        Geometry::MultiPolygon(mp) => mp.0.iter().all(|p| p.exterior().0.is_empty()),
        Geometry::GeometryCollection(gc) => gc.0.iter().all(is_empty),
    }
}

/// Whether `geometry` consists only of `Point`/`MultiPoint` members
/// (overlay pipeline step 2/3, spec.md §4.6).
pub fn is_point_type<T: GeoFloat>(geometry: &Geometry<T>) -> bool {
    matches!(geometry, Geometry::Point(_) | Geometry::MultiPoint(_))
        || is_empty(geometry)
}

/// Builds an empty geometry matching a predicted dimension (spec.md §4.6
/// step 1).
pub fn empty_of_dimension<T: GeoFloat>(dim: usize) -> Geometry<T> {
    match dim {
        0 => Geometry::MultiPoint(geo_types::MultiPoint::new(Vec::new())),
        1 => Geometry::MultiLineString(geo_types::MultiLineString::new(Vec::new())),
        _ => Geometry::GeometryCollection(GeometryCollection::new_from(Vec::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{line_string, point, polygon, MultiPolygon};

    #[test]
    fn all_rings_flattens_rect_into_a_single_shell() {
        let rect = geo_types::Rect::new(coord_f(0.0, 0.0), coord_f(4.0, 4.0));
        let geometry: Geometry<f64> = rect.into();
        let rings = all_rings(&geometry);
        assert_eq!(rings.len(), 1);
        assert!(!rings[0].1);
    }

    #[test]
    fn polygon_rings_reports_holes() {
        let poly = polygon![
            exterior: [(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0), (x: 0.0, y: 0.0)],
            interiors: [[(x: 2.0, y: 2.0), (x: 2.0, y: 4.0), (x: 4.0, y: 4.0), (x: 4.0, y: 2.0), (x: 2.0, y: 2.0)]],
        ];
        let geometry: Geometry<f64> = poly.into();
        let rings = polygon_rings(&geometry);
        assert_eq!(rings.len(), 2);
        assert!(!rings[0].is_hole);
        assert!(rings[1].is_hole);
    }

    #[test]
    fn is_point_type_true_for_multipoint_and_empty() {
        let mp: Geometry<f64> = Geometry::from(geo_types::MultiPoint::new(vec![point! { x: 0.0, y: 0.0 }]));
        assert!(is_point_type(&mp));
        let empty_lines: Geometry<f64> =
            Geometry::from(geo_types::MultiLineString::new(Vec::<geo_types::LineString<f64>>::new()));
        assert!(is_point_type(&empty_lines));
    }

    #[test]
    fn dimension_of_collection_is_its_maximum_member() {
        let poly = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 0.0)];
        let collection = GeometryCollection::new_from(vec![
            Geometry::from(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]),
            Geometry::from(MultiPolygon::new(vec![poly])),
        ]);
        let geometry = Geometry::GeometryCollection(collection);
        assert_eq!(dimension(&geometry), 2);
    }

    fn coord_f(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }
}
