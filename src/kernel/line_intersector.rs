//! The robust line intersector (spec.md §4.1 `lineIntersector`).
//!
//! Ported from geo's `algorithm::line_intersection::line_intersection`
//! (itself "strongly inspired by, and meant to produce the same results as,
//! JTS's RobustLineIntersector"), generalized to spec.md §4.1's three-way
//! classification {none, point, collinear} and renamed to its
//! vocabulary. The orientation calls go through our own `orientation_index`
//! rather than geo's `RobustKernel::orient2d` directly, but it is the
//! same underlying `robust` crate predicate.

use geo_types::{coord, Coord, Line};

use super::orientation_index;
use super::Orientation::{Clockwise, Collinear, CounterClockwise};
use crate::GeoFloat;

/// Classification of how two closed segments intersect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineIntersection<T: GeoFloat> {
    /// The segments share exactly one point.
    SinglePoint {
        intersection: Coord<T>,
        /// `true` if the point lies in the interior of *both* segments.
        is_proper: bool,
    },
    /// The segments are collinear and overlap along a sub-segment.
    ///
    /// Endpoints are ordered canonically: `start` is lexicographically
    /// less-than-or-equal to `end` by (x, then y).
    Collinear { intersection: Line<T> },
}

impl<T: GeoFloat> LineIntersection<T> {
    pub fn is_proper(&self) -> bool {
        matches!(
            self,
            LineIntersection::SinglePoint {
                is_proper: true,
                ..
            }
        )
    }
}

fn canonical<T: GeoFloat>(a: Coord<T>, b: Coord<T>) -> Line<T> {
    if (a.x, a.y) <= (b.x, b.y) {
        Line::new(a, b)
    } else {
        Line::new(b, a)
    }
}

fn bounds_intersect<T: GeoFloat>(p: Line<T>, q: Line<T>) -> bool {
    let (p_min_x, p_max_x) = minmax(p.start.x, p.end.x);
    let (p_min_y, p_max_y) = minmax(p.start.y, p.end.y);
    let (q_min_x, q_max_x) = minmax(q.start.x, q.end.x);
    let (q_min_y, q_max_y) = minmax(q.start.y, q.end.y);
    p_min_x <= q_max_x && q_min_x <= p_max_x && p_min_y <= q_max_y && q_min_y <= p_max_y
}

fn minmax<T: GeoFloat>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn point_in_bounds<T: GeoFloat>(line: Line<T>, p: Coord<T>) -> bool {
    let (min_x, max_x) = minmax(line.start.x, line.end.x);
    let (min_y, max_y) = minmax(line.start.y, line.end.y);
    p.x >= min_x && p.x <= max_x && p.y >= min_y && p.y <= max_y
}

/// Classifies the intersection of two closed segments `p` and `q`.
///
/// Returns `None` if the segments do not intersect at all.
pub fn line_intersection<T: GeoFloat>(p: Line<T>, q: Line<T>) -> Option<LineIntersection<T>> {
    if !bounds_intersect(p, q) {
        return None;
    }

    let p_q1 = orientation_index(p.start, p.end, q.start);
    let p_q2 = orientation_index(p.start, p.end, q.end);
    if matches!(
        (p_q1, p_q2),
        (Clockwise, Clockwise) | (CounterClockwise, CounterClockwise)
    ) {
        return None;
    }

    let q_p1 = orientation_index(q.start, q.end, p.start);
    let q_p2 = orientation_index(q.start, q.end, p.end);
    if matches!(
        (q_p1, q_p2),
        (Clockwise, Clockwise) | (CounterClockwise, CounterClockwise)
    ) {
        return None;
    }

    if matches!((p_q1, p_q2, q_p1, q_p2), (Collinear, Collinear, Collinear, Collinear)) {
        return collinear_intersection(p, q);
    }

    if p_q1 == Collinear || p_q2 == Collinear || q_p1 == Collinear || q_p2 == Collinear {
        // One endpoint lies exactly on the other segment (or the segments
        // share an endpoint) -- copy the known coordinate rather than
        // recomputing it, for exactness.
        let intersection = if p.start == q.start || p.start == q.end {
            p.start
        } else if p.end == q.start || p.end == q.end {
            p.end
        } else if p_q1 == Collinear {
            q.start
        } else if p_q2 == Collinear {
            q.end
        } else if q_p1 == Collinear {
            p.start
        } else {
            p.end
        };
        Some(LineIntersection::SinglePoint {
            intersection,
            is_proper: false,
        })
    } else {
        let intersection = proper_intersection(p, q);
        Some(LineIntersection::SinglePoint {
            intersection,
            is_proper: true,
        })
    }
}

fn collinear_intersection<T: GeoFloat>(p: Line<T>, q: Line<T>) -> Option<LineIntersection<T>> {
    let improper = |c: Coord<T>| {
        Some(LineIntersection::SinglePoint {
            intersection: c,
            is_proper: false,
        })
    };
    let collinear = |a: Coord<T>, b: Coord<T>| Some(LineIntersection::Collinear {
        intersection: canonical(a, b),
    });

    match (
        point_in_bounds(p, q.start),
        point_in_bounds(p, q.end),
        point_in_bounds(q, p.start),
        point_in_bounds(q, p.end),
    ) {
        (true, true, _, _) => collinear(q.start, q.end),
        (_, _, true, true) => collinear(p.start, p.end),
        (true, false, true, false) if q.start == p.start => improper(q.start),
        (true, _, true, _) => collinear(q.start, p.start),
        (true, false, false, true) if q.start == p.end => improper(q.start),
        (true, _, _, true) => collinear(q.start, p.end),
        (false, true, true, false) if q.end == p.start => improper(q.end),
        (_, true, true, _) => collinear(q.end, p.start),
        (false, true, false, true) if q.end == p.end => improper(q.end),
        (_, true, _, true) => collinear(q.end, p.end),
        _ => None,
    }
}

/// Finds the endpoint of `p`/`q` nearest to the other segment: the fallback
/// used when the homogeneous-coordinate computation degrades numerically.
fn nearest_endpoint<T: GeoFloat>(p: Line<T>, q: Line<T>) -> Coord<T> {
    let mut nearest = p.start;
    let mut min_dist = point_segment_distance(p.start, q);
    for candidate in [p.end, q.start, q.end] {
        let (seg, pt) = if candidate == q.start || candidate == q.end {
            (p, candidate)
        } else {
            (q, candidate)
        };
        let dist = point_segment_distance(pt, seg);
        if dist < min_dist {
            min_dist = dist;
            nearest = pt;
        }
    }
    nearest
}

fn point_segment_distance<T: GeoFloat>(p: Coord<T>, seg: Line<T>) -> T {
    let (a, b) = (seg.start, seg.end);
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;
    if len2 == T::zero() {
        return ((p.x - a.x).powi(2) + (p.y - a.y).powi(2)).sqrt();
    }
    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len2;
    let t = t.max(T::zero()).min(T::one());
    let proj_x = a.x + t * dx;
    let proj_y = a.y + t * dy;
    ((p.x - proj_x).powi(2) + (p.y - proj_y).powi(2)).sqrt()
}

/// Computes the genuine intersection point via homogeneous coordinates,
/// normalising around the overlap midpoint to retain precision the way
/// `geo`'s `raw_line_intersection`/`proper_intersection` do.
fn proper_intersection<T: GeoFloat>(p: Line<T>, q: Line<T>) -> Coord<T> {
    let mut int_pt = raw_line_intersection(p, q).unwrap_or_else(|| nearest_endpoint(p, q));
    if !(point_in_bounds(p, int_pt) && point_in_bounds(q, int_pt)) {
        int_pt = nearest_endpoint(p, q);
    }
    int_pt
}

fn raw_line_intersection<T: GeoFloat>(p: Line<T>, q: Line<T>) -> Option<Coord<T>> {
    let (p_min_x, p_max_x) = minmax(p.start.x, p.end.x);
    let (p_min_y, p_max_y) = minmax(p.start.y, p.end.y);
    let (q_min_x, q_max_x) = minmax(q.start.x, q.end.x);
    let (q_min_y, q_max_y) = minmax(q.start.y, q.end.y);

    let int_min_x = p_min_x.max(q_min_x);
    let int_max_x = p_max_x.min(q_max_x);
    let int_min_y = p_min_y.max(q_min_y);
    let int_max_y = p_max_y.min(q_max_y);

    let two = T::one() + T::one();
    let mid_x = (int_min_x + int_max_x) / two;
    let mid_y = (int_min_y + int_max_y) / two;

    let p1x = p.start.x - mid_x;
    let p1y = p.start.y - mid_y;
    let p2x = p.end.x - mid_x;
    let p2y = p.end.y - mid_y;
    let q1x = q.start.x - mid_x;
    let q1y = q.start.y - mid_y;
    let q2x = q.end.x - mid_x;
    let q2y = q.end.y - mid_y;

    let px = p1y - p2y;
    let py = p2x - p1x;
    let pw = p1x * p2y - p2x * p1y;

    let qx = q1y - q2y;
    let qy = q2x - q1x;
    let qw = q1x * q2y - q2x * q1y;

    let xw = py * qw - qy * pw;
    let yw = qx * pw - px * qw;
    let w = px * qy - qx * py;

    let x_int = xw / w;
    let y_int = yw / w;

    if x_int.is_nan() || x_int.is_infinite() || y_int.is_nan() || y_int.is_infinite() {
        None
    } else {
        Some(coord! { x: x_int + mid_x, y: y_int + mid_y })
    }
}

/// Robust "edge distance" of a point known to lie on `line`, used to order
/// intersections along an edge (spec.md §4.2's noder relies on this via the
/// edge model). Ported from `geo`'s
/// `RobustLineIntersector::compute_edge_distance`.
pub fn edge_distance<T: GeoFloat>(point: Coord<T>, line: Line<T>) -> T {
    let dx = (line.end.x - line.start.x).abs();
    let dy = (line.end.y - line.start.y).abs();

    if point == line.start {
        T::zero()
    } else if point == line.end {
        if dx > dy {
            dx
        } else {
            dy
        }
    } else {
        let idx = (point.x - line.start.x).abs();
        let idy = (point.y - line.start.y).abs();
        let mut dist = if dx > dy { idx } else { idy };
        if dist == T::zero() {
            dist = idx.max(idy);
        }
        dist
    }
}
