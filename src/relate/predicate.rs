//! Named DE-9IM predicates (spec.md §4.7 "Named predicates") plus the
//! envelope short-circuits spec.md calls out explicitly.
//!
//! Grounded on geo's `algorithm::relate::Relate` trait (which exposes
//! `relate`/`intersects`/etc. over the same `IntersectionMatrix`), generalized
//! to also accept a caller-supplied [`BoundaryNodeRule`] and a raw pattern
//! string, per spec.md §4.7/SPEC_FULL §F.1/§F.4.

use geo_types::{Coord, Geometry};

use crate::error::GeoTopologyError;
use crate::geometry;
use crate::relate::boundary::{BoundaryNodeRule, Mod2BoundaryNodeRule};
use crate::relate::geometry_view::GeometryView;
use crate::relate::matrix::{IntersectionMatrix, Pattern};
use crate::relate::topology::compute_matrix;
use crate::GeoFloat;

/// Computes the full DE-9IM matrix between `a` and `b` under the default
/// (mod-2) boundary node rule.
pub fn relate<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>) -> IntersectionMatrix {
    relate_with(a, b, &Mod2BoundaryNodeRule)
}

/// `relate` with a caller-chosen [`BoundaryNodeRule`] (SPEC_FULL §F.1).
pub fn relate_with<T: GeoFloat>(
    a: &Geometry<T>,
    b: &Geometry<T>,
    rule: &dyn BoundaryNodeRule,
) -> IntersectionMatrix {
    let view_a = GeometryView::from_geometry(a);
    let view_b = GeometryView::from_geometry(b);
    compute_matrix(&view_a, &view_b, rule)
}

/// Matches `relate(a, b)` against a DE-9IM pattern string (spec.md §4.7:
/// "user-supplied DE-9IM pattern strings ... compiled to a matrix template").
pub fn relate_matches<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>, pattern: &str) -> Result<bool, GeoTopologyError<T>> {
    let compiled = Pattern::compile(pattern).map_err(GeoTopologyError::InvalidArgument)?;
    Ok(relate(a, b).matches(&compiled))
}

/// Axis-aligned bounding box of every coordinate in `geometry`, or `None` if
/// it has none (spec.md §4.7 "short-circuit: envelope disjointness").
fn envelope<T: GeoFloat>(geometry: &Geometry<T>) -> Option<(Coord<T>, Coord<T>)> {
    let mut coords = geometry::points(geometry);
    coords.extend(geometry::line_strings(geometry).into_iter().flat_map(|l| l.0));
    coords.extend(geometry::all_rings(geometry).into_iter().flat_map(|(r, _)| r.0));

    let first = *coords.first()?;
    let (mut min, mut max) = (first, first);
    for c in coords {
        min.x = min.x.min(c.x);
        min.y = min.y.min(c.y);
        max.x = max.x.max(c.x);
        max.y = max.y.max(c.y);
    }
    Some((min, max))
}

fn envelopes_disjoint<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>) -> bool {
    match (envelope(a), envelope(b)) {
        (Some((amin, amax)), Some((bmin, bmax))) => {
            amax.x < bmin.x || bmax.x < amin.x || amax.y < bmin.y || bmax.y < amin.y
        }
        _ => true,
    }
}

fn envelope_contains<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>) -> bool {
    match (envelope(a), envelope(b)) {
        (Some((amin, amax)), Some((bmin, bmax))) => {
            amin.x <= bmin.x && amin.y <= bmin.y && amax.x >= bmax.x && amax.y >= bmax.y
        }
        _ => false,
    }
}

/// `intersects` (spec.md §4.7 short-circuit: "envelope disjointness proves
/// `disjoint`").
pub fn intersects<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>) -> bool {
    if envelopes_disjoint(a, b) {
        return false;
    }
    relate(a, b).is_intersects()
}

pub fn disjoint<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>) -> bool {
    !intersects(a, b)
}

/// `contains`: every point of B is in A, and their interiors intersect
/// (excludes cases where B lies entirely on A's exterior or the two only
/// share a boundary). Envelope containment is necessary but not sufficient
/// (spec.md §4.7), so it only short-circuits the negative case.
pub fn contains<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>) -> bool {
    if !envelope_contains(a, b) {
        return false;
    }
    relate_matches(a, b, "T*****FF*").unwrap_or(false)
}

pub fn within<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>) -> bool {
    contains(b, a)
}

pub fn covers<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>) -> bool {
    if !envelope_contains(a, b) {
        return false;
    }
    let m = relate(a, b);
    m.matches_str("T*****FF*").unwrap_or(false)
        || m.matches_str("*T****FF*").unwrap_or(false)
        || m.matches_str("***T**FF*").unwrap_or(false)
        || m.matches_str("****T*FF*").unwrap_or(false)
}

pub fn covered_by<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>) -> bool {
    covers(b, a)
}

pub fn touches<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>) -> bool {
    if envelopes_disjoint(a, b) {
        return false;
    }
    let m = relate(a, b);
    m.matches_str("FT*******").unwrap_or(false)
        || m.matches_str("F**T*****").unwrap_or(false)
        || m.matches_str("F***T****").unwrap_or(false)
}

/// `crosses`: only meaningful between inputs of differing dimension, or
/// between two lines (spec.md §4.7: "dimension comparisons cut off e.g.
/// `crosses` between equal-dimension [area] inputs").
pub fn crosses<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>) -> bool {
    let da = geometry::dimension(a);
    let db = geometry::dimension(b);
    if da == 2 && db == 2 {
        return false;
    }
    if envelopes_disjoint(a, b) {
        return false;
    }
    let m = relate(a, b);
    match (da, db) {
        (0, 1) | (0, 2) => m.matches_str("T*F**F***").unwrap_or(false),
        (1, 0) | (2, 0) => m.matches_str("T*****FF*").unwrap_or(false),
        (1, 1) => m.matches_str("0********").unwrap_or(false),
        _ => m.matches_str("T*T******").unwrap_or(false) || m.matches_str("T*****T**").unwrap_or(false),
    }
}

pub fn overlaps<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>) -> bool {
    if envelopes_disjoint(a, b) {
        return false;
    }
    let da = geometry::dimension(a);
    let db = geometry::dimension(b);
    if da != db {
        return false;
    }
    let m = relate(a, b);
    if da == 2 {
        m.matches_str("T*T***T**").unwrap_or(false)
    } else {
        m.matches_str("1*T***T**").unwrap_or(false)
    }
}

pub fn equals_topo<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>) -> bool {
    if envelope(a) != envelope(b) {
        return false;
    }
    relate_matches(a, b, "T*F**FFF*").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{line_string, point, polygon};

    #[test]
    fn disjoint_polygons_are_disjoint_and_not_intersecting() {
        let a: Geometry<f64> = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 0.0)].into();
        let b: Geometry<f64> = polygon![(x: 5.0, y: 5.0), (x: 6.0, y: 5.0), (x: 6.0, y: 6.0), (x: 5.0, y: 5.0)].into();
        assert!(disjoint(&a, &b));
        assert!(!intersects(&a, &b));
    }

    #[test]
    fn contains_point_inside_polygon() {
        let poly: Geometry<f64> =
            polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0), (x: 0.0, y: 0.0)].into();
        let p: Geometry<f64> = Geometry::from(point! { x: 5.0, y: 5.0 });
        assert!(contains(&poly, &p));
        assert!(within(&p, &poly));
    }

    #[test]
    fn crossing_lines_match_crosses_predicate() {
        let a: Geometry<f64> = line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 10.0)].into();
        let b: Geometry<f64> = line_string![(x: 0.0, y: 10.0), (x: 10.0, y: 0.0)].into();
        assert!(crosses(&a, &b));
    }

    #[test]
    fn identical_polygons_are_topologically_equal() {
        let a: Geometry<f64> =
            polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0), (x: 0.0, y: 0.0)].into();
        let b = a.clone();
        assert!(equals_topo(&a, &b));
    }

    #[test]
    fn touching_squares_touch_but_do_not_overlap() {
        let a: Geometry<f64> =
            polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0), (x: 0.0, y: 0.0)].into();
        let b: Geometry<f64> =
            polygon![(x: 1.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 1.0), (x: 1.0, y: 1.0), (x: 1.0, y: 0.0)].into();
        assert!(touches(&a, &b));
        assert!(!overlaps(&a, &b));
    }
}
