//! The result extractor (spec.md §4.6): mark step, polygon/line/point build.

mod edge_ring;
mod polygon_builder;

pub use edge_ring::EdgeRing;
pub use polygon_builder::{build_polygons, BuiltPolygon};

use geo_types::Coord;

use crate::graph::{HalfEdgeId, OverlayGraph};
use crate::location::Location;
use crate::overlay::op::OverlayOp;
use crate::GeoFloat;

/// Marks every half-edge as `is_in_result_area` according to spec.md §4.6's
/// inclusion rules, folding Boundary into Interior first. "Both halves
/// marked" (a dimensional collapse) results in both being unmarked.
pub fn mark_result_area_edges<T: GeoFloat>(graph: &mut OverlayGraph<T>, op: OverlayOp) {
    let ids: Vec<HalfEdgeId> = graph.half_edge_ids().collect();
    let mut marks = vec![false; ids.len()];

    for &id in &ids {
        let label = graph.half_edge(id).label;
        let right_a = label.for_input(0).loc_right.as_interior_or_exterior();
        let right_b = label.for_input(1).loc_right.as_interior_or_exterior();
        marks[id.0] = op.includes_edge(right_a, right_b);
    }

    for &id in &ids {
        let sym = id.sym();
        if marks[id.0] && marks[sym.0] {
            marks[id.0] = false;
            marks[sym.0] = false;
        }
    }

    for &id in &ids {
        graph.half_edge_mut(id).is_in_result_area = marks[id.0];
    }
}

/// Marks half-edges that belong in the result's linear component: those
/// whose line-location in at least one linear input is Interior/Boundary,
/// excluding any half-edge already claimed by a result area (spec.md §4.6
/// "Line build": "never part of result areas").
///
/// When `strict` is set, a marked line edge is dropped if it would lie
/// inside the result area (its right side is Interior for the winning
/// operation); non-strict mode retains it regardless.
pub fn mark_result_line_edges<T: GeoFloat>(graph: &mut OverlayGraph<T>, op: OverlayOp, strict: bool) {
    let ids: Vec<HalfEdgeId> = graph.half_edge_ids().collect();
    for id in ids {
        if graph.half_edge(id).is_in_result_area || graph.half_edge(id.sym()).is_in_result_area {
            continue;
        }
        let label = graph.half_edge(id).label;
        let a = label.for_input(0);
        let b = label.for_input(1);
        let line_present = (a.dimension == crate::edge::Dimension::Line && a.loc_line != Location::Exterior)
            || (b.dimension == crate::edge::Dimension::Line && b.loc_line != Location::Exterior);
        if !line_present {
            continue;
        }
        if strict {
            let right_a = a.loc_right.as_interior_or_exterior();
            let right_b = b.loc_right.as_interior_or_exterior();
            if op.includes_edge(right_a, right_b) {
                continue;
            }
        }
        graph.half_edge_mut(id).is_in_result_line = true;
    }
}

/// Point build (spec.md §4.6): for `Intersection` only, node coordinates
/// where both inputs contribute a point, or a line crosses a point, are
/// emitted. Implemented directly over the node set rather than the graph,
/// since isolated points never acquire half-edges.
pub fn extract_result_points<T: GeoFloat>(
    points_a: &[Coord<T>],
    points_b: &[Coord<T>],
    op: OverlayOp,
) -> Vec<Coord<T>> {
    if op != OverlayOp::Intersection {
        return Vec::new();
    }
    points_a
        .iter()
        .filter(|a| points_b.iter().any(|b| *a == b))
        .copied()
        .collect()
}
