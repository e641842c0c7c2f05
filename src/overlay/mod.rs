//! The overlay pipeline (spec.md §4.6 "Operation pipeline for overlay").

mod op;

pub use op::OverlayOp;

use geo_types::{Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};

use crate::edge::builder::build_edges;
use crate::error::{checkpoint, GeoTopologyError, Interrupt, NeverInterrupt};
use crate::extract::{build_polygons, extract_result_points, mark_result_area_edges, mark_result_line_edges};
use crate::geometry;
use crate::graph::OverlayGraph;
use crate::labeller;
use crate::location::Location;
use crate::precision::PrecisionModel;
use crate::GeoFloat;

/// Maximum number of fixed-precision retries spec.md §4.6's `SnapIfNeeded`
/// fallback takes before surfacing the original topology exception.
const MAX_SNAP_ATTEMPTS: u32 = 5;

/// Runs `op` over `a`/`b` at floating precision (spec.md §4.6 step 4).
pub fn overlay<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>, op: OverlayOp) -> Result<Geometry<T>, GeoTopologyError<T>> {
    overlay_with(a, b, op, &PrecisionModel::Floating, &NeverInterrupt)
}

/// `overlay` plus a caller-chosen precision model and cancellation hook, and
/// the `SnapIfNeeded` robustness fallback (spec.md §4.6) when `precision` is
/// `Floating` and the first attempt raises a topology exception.
pub fn overlay_with<T: GeoFloat>(
    a: &Geometry<T>,
    b: &Geometry<T>,
    op: OverlayOp,
    precision: &PrecisionModel<T>,
    interrupt: &dyn Interrupt,
) -> Result<Geometry<T>, GeoTopologyError<T>> {
    if let Some(result) = empty_input_shortcut(a, b, op) {
        return Ok(result);
    }
    if geometry::is_point_type(a) && geometry::is_point_type(b) {
        return Ok(point_only_overlay(a, b, op));
    }
    if geometry::is_point_type(a) || geometry::is_point_type(b) {
        return Ok(mixed_point_overlay(a, b, op));
    }

    match run_once(a, b, op, precision, interrupt) {
        Ok(result) => Ok(result),
        Err(GeoTopologyError::TopologyException { witness, .. }) if matches!(precision, PrecisionModel::Floating) => {
            snap_if_needed(a, b, op, witness, interrupt)
        }
        Err(err) => Err(err),
    }
}

/// Step 1: an empty input short-circuits to an empty result of the
/// predicted dimension.
fn empty_input_shortcut<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>, op: OverlayOp) -> Option<Geometry<T>> {
    let a_empty = geometry::is_empty(a);
    let b_empty = geometry::is_empty(b);
    if !a_empty && !b_empty {
        return None;
    }
    let dim = op.empty_input_result_dimension(geometry::dimension(a), geometry::dimension(b));
    Some(geometry::empty_of_dimension(dim))
}

/// Step 2: both inputs are point-type; the operation reduces to a set
/// operation over coordinate multisets (spec.md §4.6).
fn point_only_overlay<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>, op: OverlayOp) -> Geometry<T> {
    let pa = geometry::points(a);
    let pb = geometry::points(b);
    let in_b = |c: &Coord<T>| pb.iter().any(|p| p == c);
    let in_a = |c: &Coord<T>| pa.iter().any(|p| p == c);

    let mut out: Vec<Coord<T>> = match op {
        OverlayOp::Intersection => pa.iter().filter(|c| in_b(c)).copied().collect(),
        OverlayOp::Difference => pa.iter().filter(|c| !in_b(c)).copied().collect(),
        OverlayOp::Union => {
            let mut v = pa.clone();
            v.extend(pb.iter().filter(|c| !in_a(c)).copied());
            v
        }
        OverlayOp::SymmetricDifference => {
            let mut v: Vec<Coord<T>> = pa.iter().filter(|c| !in_b(c)).copied().collect();
            v.extend(pb.iter().filter(|c| !in_a(c)).copied());
            v
        }
    };
    dedup_coords(&mut out);
    points_to_geometry(out)
}

/// Step 3: exactly one input is point-type; resolved with point-in-area
/// tests against the other (non-point) input, no graph needed.
fn mixed_point_overlay<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>, op: OverlayOp) -> Geometry<T> {
    let (points, points_are_a, other) = if geometry::is_point_type(a) {
        (geometry::points(a), true, b)
    } else {
        (geometry::points(b), false, a)
    };

    let inside_other = |c: &Coord<T>| {
        matches!(locate_point_in_geometry(*c, other), Location::Interior | Location::Boundary)
    };

    // Every points/other pairing reduces to "which points count, and does
    // `other` pass through untouched", driven by which operand the points
    // actually are (spec.md §4.6 step 3's "point-in-area tests only").
    let points_in_result: Vec<Coord<T>> = match (op, points_are_a) {
        (OverlayOp::Intersection, _) => points.iter().filter(|c| inside_other(c)).copied().collect(),
        (OverlayOp::Difference, true) => points.iter().filter(|c| !inside_other(c)).copied().collect(),
        (OverlayOp::Difference, false) => Vec::new(),
        (OverlayOp::Union, _) => points.iter().filter(|c| !inside_other(c)).copied().collect(),
        (OverlayOp::SymmetricDifference, _) => points.iter().filter(|c| !inside_other(c)).copied().collect(),
    };

    let other_passes_through = matches!(op, OverlayOp::Union | OverlayOp::SymmetricDifference)
        || (op == OverlayOp::Difference && !points_are_a);

    let mut pts = points_in_result;
    dedup_coords(&mut pts);

    match (other_passes_through, pts.is_empty()) {
        (false, _) => points_to_geometry(pts),
        (true, true) => other.clone(),
        (true, false) => Geometry::GeometryCollection(GeometryCollection::new_from(vec![
            other.clone(),
            points_to_geometry(pts),
        ])),
    }
}

/// Locates `point` against `geometry`'s area (spec.md §4.6 step 3's
/// "point-in-area tests"), folding over every polygon component and their
/// holes.
fn locate_point_in_geometry<T: GeoFloat>(point: Coord<T>, geometry: &Geometry<T>) -> Location {
    for polygon in geometry::owned_polygons(geometry) {
        let mut loc = crate::kernel::point_in_ring(point, polygon.exterior());
        if loc == Location::Boundary {
            return Location::Boundary;
        }
        if loc == Location::Interior {
            for hole in polygon.interiors() {
                let hole_loc = crate::kernel::point_in_ring(point, hole);
                if hole_loc == Location::Boundary {
                    return Location::Boundary;
                }
                if hole_loc == Location::Interior {
                    loc = Location::Exterior;
                    break;
                }
            }
            if loc == Location::Interior {
                return Location::Interior;
            }
        }
    }
    // `geometry` has no area component (or the point sits outside every
    // polygon's shell): fall back to a point-on-segment test against its
    // linework, which is what lets a mixed point/line overlay (spec.md §8
    // scenario 6: a point exactly on one of a linestring's segments)
    // resolve to something other than unconditionally Exterior.
    for line in geometry::line_strings(geometry) {
        if point_on_line_string(point, &line) {
            return Location::Boundary;
        }
    }
    Location::Exterior
}

/// Whether `point` lies on any segment of `line` (collinear and within the
/// segment's bounding box), used by [`locate_point_in_geometry`]'s linework
/// fallback.
fn point_on_line_string<T: GeoFloat>(point: Coord<T>, line: &LineString<T>) -> bool {
    line.lines().any(|segment| {
        if crate::kernel::orientation_index(segment.start, segment.end, point) != crate::kernel::Orientation::Collinear {
            return false;
        }
        let min_x = segment.start.x.min(segment.end.x);
        let max_x = segment.start.x.max(segment.end.x);
        let min_y = segment.start.y.min(segment.end.y);
        let max_y = segment.start.y.max(segment.end.y);
        point.x >= min_x && point.x <= max_x && point.y >= min_y && point.y <= max_y
    })
}

/// Step 4: the full noder/graph/labeller/extractor pipeline.
fn run_once<T: GeoFloat>(
    a: &Geometry<T>,
    b: &Geometry<T>,
    op: OverlayOp,
    precision: &PrecisionModel<T>,
    interrupt: &dyn Interrupt,
) -> Result<Geometry<T>, GeoTopologyError<T>> {
    checkpoint(interrupt)?;

    let built = build_edges(a, b, precision)?;

    let mut graph = OverlayGraph::new();
    for edge in &built.edges {
        graph.add_edge(edge);
    }

    let is_input_area = [is_area_geometry(a), is_area_geometry(b)];
    let inputs = [a.clone(), b.clone()];
    labeller::label(&mut graph, is_input_area, |coord, input| {
        locate_point_in_geometry(coord, &inputs[input])
    })?;

    checkpoint(interrupt)?;

    mark_result_area_edges(&mut graph, op);
    mark_result_line_edges(&mut graph, op, true);

    let polygons = build_polygons(&mut graph)?;
    let lines = build_result_lines(&mut graph);
    let points = extract_result_points(&built.points[0], &built.points[1], op);

    checkpoint(interrupt)?;

    Ok(assemble_result(polygons, lines, points, precision))
}

fn is_area_geometry<T: GeoFloat>(geometry: &Geometry<T>) -> bool {
    geometry::dimension(geometry) == 2 && !geometry::is_empty(geometry)
}

/// Self-nodes `geometry` and rebuilds its area/line components the same way
/// [`run_once`] rebuilds a two-input overlay, but against an absent second
/// input (spec.md §4.8 MakeValid: "fully noded boundary -> area from
/// BuildArea polygonisation -> residual cut edges ... recombined"). Returns
/// the rebuilt polygons and any leftover linework that never closed into an
/// area (a self-touching spike, a dangling boundary segment).
pub(crate) fn build_area_from_self<T: GeoFloat>(
    geometry: &Geometry<T>,
    precision: &PrecisionModel<T>,
) -> Result<(Vec<crate::extract::BuiltPolygon<T>>, Vec<LineString<T>>), GeoTopologyError<T>> {
    let empty = geometry::empty_of_dimension::<T>(2);
    let built = build_edges(geometry, &empty, precision)?;

    let mut graph = OverlayGraph::new();
    for edge in &built.edges {
        graph.add_edge(edge);
    }

    labeller::label(&mut graph, [true, false], |coord, input| {
        if input == 0 {
            locate_point_in_geometry(coord, geometry)
        } else {
            Location::Exterior
        }
    })?;

    mark_result_area_edges(&mut graph, OverlayOp::Union);
    mark_result_line_edges(&mut graph, OverlayOp::Union, true);

    let polygons = build_polygons(&mut graph)?;
    let lines = build_result_lines(&mut graph);
    Ok((polygons, lines))
}

/// Line build (spec.md §4.6): strings marked-line half-edges end-to-end at
/// degree-2 nodes.
fn build_result_lines<T: GeoFloat>(graph: &mut OverlayGraph<T>) -> Vec<LineString<T>> {
    let ids: Vec<_> = graph
        .half_edge_ids()
        .filter(|&id| graph.half_edge(id).is_in_result_line)
        .collect();
    for &id in &ids {
        graph.half_edge_mut(id).is_visited = false;
    }

    let mut result = Vec::new();
    for &start in &ids {
        if graph.half_edge(start).is_visited {
            continue;
        }
        let mut coords = vec![graph.half_edge(start).origin];
        let mut current = start;
        loop {
            graph.half_edge_mut(current).is_visited = true;
            graph.half_edge_mut(current.sym()).is_visited = true;
            coords.push(graph.half_edge(current).direction_point);
            let arrival = current.sym();
            let around = graph.edges_around_node(arrival);
            let degree = around.iter().filter(|&&id| graph.half_edge(id).is_in_result_line).count();
            if degree != 2 {
                break;
            }
            let pos = around.iter().position(|&x| x == arrival).unwrap_or(0);
            let next = around
                .iter()
                .cycle()
                .skip(pos + 1)
                .take(around.len())
                .copied()
                .find(|&x| graph.half_edge(x).is_in_result_line && !graph.half_edge(x).is_visited);
            match next {
                Some(next) => current = next,
                None => break,
            }
        }
        if coords.len() >= 2 {
            result.push(LineString::new(coords));
        }
    }
    result
}

fn assemble_result<T: GeoFloat>(
    polygons: Vec<crate::extract::BuiltPolygon<T>>,
    lines: Vec<LineString<T>>,
    points: Vec<Coord<T>>,
    precision: &PrecisionModel<T>,
) -> Geometry<T> {
    let polygons: Vec<Polygon<T>> = polygons
        .into_iter()
        .map(|built| {
            let exterior = round_ring(built.shell.into_line_string(), precision);
            let interiors = built
                .holes
                .into_iter()
                .map(|h| round_ring(h.into_line_string(), precision))
                .collect();
            Polygon::new(exterior, interiors)
        })
        .collect();

    let mut members = Vec::new();
    if !polygons.is_empty() {
        members.push(Geometry::MultiPolygon(MultiPolygon::new(polygons)));
    }
    if !lines.is_empty() {
        members.push(Geometry::MultiLineString(MultiLineString::new(lines)));
    }
    if !points.is_empty() {
        members.push(points_to_geometry(points));
    }

    match members.len() {
        0 => geometry::empty_of_dimension(0),
        1 => members.into_iter().next().unwrap(),
        _ => Geometry::GeometryCollection(GeometryCollection::new_from(members)),
    }
}

fn round_ring<T: GeoFloat>(ring: LineString<T>, precision: &PrecisionModel<T>) -> LineString<T> {
    LineString::new(ring.0.into_iter().map(|c| precision.make_precise(c)).collect())
}

fn points_to_geometry<T: GeoFloat>(coords: Vec<Coord<T>>) -> Geometry<T> {
    if coords.len() == 1 {
        Geometry::Point(Point(coords[0]))
    } else {
        Geometry::MultiPoint(MultiPoint::new(coords.into_iter().map(Point).collect()))
    }
}

fn dedup_coords<T: GeoFloat>(coords: &mut Vec<Coord<T>>) {
    let mut out: Vec<Coord<T>> = Vec::with_capacity(coords.len());
    for &c in coords.iter() {
        if !out.iter().any(|o| *o == c) {
            out.push(c);
        }
    }
    *coords = out;
}

/// `SnapIfNeeded` (spec.md §4.6): on a topology exception at floating
/// precision, retry at a fixed scale derived from the inputs' magnitude,
/// halving the scale on each further failure up to a bounded attempt count.
fn snap_if_needed<T: GeoFloat>(
    a: &Geometry<T>,
    b: &Geometry<T>,
    op: OverlayOp,
    witness: Coord<T>,
    interrupt: &dyn Interrupt,
) -> Result<Geometry<T>, GeoTopologyError<T>> {
    let mut scale = initial_snap_scale(a, b);
    let mut last_err = GeoTopologyError::topology_exception("overlay failed at floating precision", witness);

    for _ in 0..MAX_SNAP_ATTEMPTS {
        let precision = PrecisionModel::Fixed { scale };
        match run_once(a, b, op, &precision, interrupt) {
            Ok(result) => return Ok(result),
            Err(err) => {
                last_err = err;
                scale = scale / (T::one() + T::one());
                if scale <= T::zero() {
                    break;
                }
            }
        }
    }
    Err(last_err)
}

fn initial_snap_scale<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>) -> T {
    let magnitude = [a, b]
        .into_iter()
        .flat_map(|g| geometry::points(g).into_iter().chain(geometry::line_strings(g).into_iter().flat_map(|l| l.0)))
        .chain(geometry::all_rings(a).into_iter().chain(geometry::all_rings(b).into_iter()).flat_map(|(r, _)| r.0))
        .fold(T::one(), |acc, c| acc.max(c.x.abs()).max(c.y.abs()));

    // A scale of 1e8 relative to the largest ordinate magnitude keeps ~8
    // significant digits, matching GEOS's `CommonBitsRemover`-free snap
    // heuristic for a "start generous, then tighten" retry loop.
    let hundred_million = num_traits::cast(1e8f64).unwrap_or_else(T::one);
    hundred_million / magnitude.max(T::one())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::polygon;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Geometry<f64> {
        Geometry::from(polygon![(x: x0, y: y0), (x: x1, y: y0), (x: x1, y: y1), (x: x0, y: y1), (x: x0, y: y0)])
    }

    #[test]
    fn disjoint_squares_union_keeps_both() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(5.0, 5.0, 6.0, 6.0);
        let result = overlay(&a, &b, OverlayOp::Union).unwrap();
        match result {
            Geometry::MultiPolygon(mp) => assert_eq!(mp.0.len(), 2),
            other => panic!("expected a MultiPolygon, got {other:?}"),
        }
    }

    #[test]
    fn overlapping_squares_intersection_is_nonempty() {
        let a = square(0.0, 0.0, 2.0, 2.0);
        let b = square(1.0, 1.0, 3.0, 3.0);
        let result = overlay(&a, &b, OverlayOp::Intersection).unwrap();
        assert!(!geometry::is_empty(&result));
    }

    #[test]
    fn empty_input_short_circuits() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let empty = geometry::empty_of_dimension::<f64>(2);
        let result = overlay(&a, &empty, OverlayOp::Intersection).unwrap();
        assert!(geometry::is_empty(&result));
    }

    #[test]
    fn point_only_intersection_keeps_shared_points() {
        let a = Geometry::from(MultiPoint::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]));
        let b = Geometry::from(MultiPoint::new(vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]));
        let result = overlay(&a, &b, OverlayOp::Intersection).unwrap();
        match result {
            Geometry::Point(p) => assert_eq!(p.0, Coord { x: 1.0, y: 1.0 }),
            other => panic!("expected a single Point, got {other:?}"),
        }
    }

    #[test]
    fn point_on_linestring_segment_intersects_to_that_point() {
        let line = Geometry::from(LineString::new(vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 0.0, y: 60.0 },
            Coord { x: 50.0, y: 60.0 },
            Coord { x: 50.0, y: 20.0 },
            Coord { x: -20.0, y: 20.0 },
        ]));
        let point = Geometry::from(Point::new(0.0, 20.0));
        let result = overlay(&line, &point, OverlayOp::Intersection).unwrap();
        match result {
            Geometry::Point(p) => assert_eq!(p.0, Coord { x: 0.0, y: 20.0 }),
            other => panic!("expected POINT(0 20), got {other:?}"),
        }
    }

    #[test]
    fn point_off_linestring_does_not_intersect() {
        let line = Geometry::from(LineString::new(vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 10.0, y: 0.0 },
        ]));
        let point = Geometry::from(Point::new(5.0, 5.0));
        let result = overlay(&line, &point, OverlayOp::Intersection).unwrap();
        assert!(geometry::is_empty(&result));
    }
}
