//! `pointInRing` (spec.md §4.1): classify a point against a closed ring as
//! Interior, Boundary or Exterior.
//!
//! Grounded on geo's `algorithm::coordinate_position` /
//! `algorithm::contains` ray-crossing logic, rewritten against this crate's
//! own `orientation_index` so the whole kernel shares one robust predicate,
//! and returning `crate::location::Location` directly rather than a
//! boolean, since the labeller (spec.md §4.5) needs the boundary case kept
//! distinct from both interior and exterior.

use geo_types::{Coord, LineString};

use super::{orientation_index, Orientation};
use crate::location::Location;
use crate::GeoFloat;

/// Ray-crossing test: is `point` Interior, Boundary or Exterior to `ring`?
///
/// `ring` is assumed closed (`ring.0[0] == ring.0[last]`); callers that have
/// already classified `point` as coincident with a ring vertex or edge can
/// skip straight to `Location::Boundary` without calling this.
pub fn point_in_ring<T: GeoFloat>(point: Coord<T>, ring: &LineString<T>) -> Location {
    locate_point_in_ring(point, ring)
}

/// Same predicate, named to match spec.md's `locatePointInRing` callers in
/// the overlay result extractor (point-in-polygon classification of a
/// candidate shell against a sibling ring).
pub fn locate_point_in_ring<T: GeoFloat>(point: Coord<T>, ring: &LineString<T>) -> Location {
    let coords = ring.0.as_slice();
    if coords.len() < 4 {
        // Degenerate ring: everything outside it.
        return Location::Exterior;
    }

    let mut is_inside = false;

    for window in coords.windows(2) {
        let (p1, p2) = (window[0], window[1]);

        if on_segment(point, p1, p2) {
            return Location::Boundary;
        }

        // Standard even-odd ray crossing toward +x, counting an edge only
        // when it straddles the point's y-coordinate (half-open at one end
        // to avoid double-counting a ray that passes exactly through a
        // shared vertex).
        if (p1.y > point.y) != (p2.y > point.y) {
            let orientation = orientation_index(p1, p2, point);
            let crosses_to_the_right = match orientation {
                Orientation::CounterClockwise => p2.y > p1.y,
                Orientation::Clockwise => p1.y > p2.y,
                Orientation::Collinear => false,
            };
            if crosses_to_the_right {
                is_inside = !is_inside;
            }
        }
    }

    if is_inside {
        Location::Interior
    } else {
        Location::Exterior
    }
}

fn on_segment<T: GeoFloat>(point: Coord<T>, a: Coord<T>, b: Coord<T>) -> bool {
    if orientation_index(a, b, point) != Orientation::Collinear {
        return false;
    }
    let (min_x, max_x) = if a.x <= b.x { (a.x, b.x) } else { (b.x, a.x) };
    let (min_y, max_y) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };
    point.x >= min_x && point.x <= max_x && point.y >= min_y && point.y <= max_y
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::line_string;

    fn square() -> LineString<f64> {
        line_string![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 10.0),
            (x: 0.0, y: 10.0),
            (x: 0.0, y: 0.0),
        ]
    }

    #[test]
    fn interior_point() {
        let ring = square();
        assert_eq!(
            point_in_ring(Coord { x: 5.0, y: 5.0 }, &ring),
            Location::Interior
        );
    }

    #[test]
    fn exterior_point() {
        let ring = square();
        assert_eq!(
            point_in_ring(Coord { x: 20.0, y: 5.0 }, &ring),
            Location::Exterior
        );
    }

    #[test]
    fn vertex_is_boundary() {
        let ring = square();
        assert_eq!(
            point_in_ring(Coord { x: 0.0, y: 0.0 }, &ring),
            Location::Boundary
        );
    }

    #[test]
    fn edge_midpoint_is_boundary() {
        let ring = square();
        assert_eq!(
            point_in_ring(Coord { x: 5.0, y: 0.0 }, &ring),
            Location::Boundary
        );
    }

    #[test]
    fn point_outside_bbox_is_exterior() {
        let ring = square();
        assert_eq!(
            point_in_ring(Coord { x: -5.0, y: -5.0 }, &ring),
            Location::Exterior
        );
    }

    #[test]
    fn concave_ring_classifies_notch_as_exterior() {
        let ring = line_string![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 10.0),
            (x: 5.0, y: 5.0),
            (x: 0.0, y: 10.0),
            (x: 0.0, y: 0.0),
        ];
        assert_eq!(
            point_in_ring(Coord { x: 5.0, y: 8.0 }, &ring),
            Location::Exterior
        );
        assert_eq!(
            point_in_ring(Coord { x: 2.0, y: 2.0 }, &ring),
            Location::Interior
        );
    }
}
