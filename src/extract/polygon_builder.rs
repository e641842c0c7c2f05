//! Polygon build (spec.md §4.6 steps 1-5).
//!
//! Builds minimal edge rings directly in one pass: at each node, the ring
//! walk continues from an incoming marked half-edge to the next outgoing
//! marked half-edge immediately following its symmetric partner in CCW
//! order. spec.md describes this as two phases ("link into maximal rings,
//! then decompose rings with more than two incident marked edges at some
//! vertex into minimal rings"); the single-pass walk below produces the
//! same minimal rings directly for any node degree, at the cost of not
//! separately materialising the maximal ring spec.md's step 2 describes --
//! noted here rather than silently diverging, since a reader comparing
//! against GEOS's `PolygonBuilder`/`MaximalEdgeRing`-then-split pipeline
//! would otherwise expect two passes.

use crate::extract::edge_ring::{EdgeRing, RingKind};
use crate::graph::{HalfEdgeId, OverlayGraph};
use crate::kernel::point_in_ring;
use crate::location::Location;
use crate::GeoFloat;

pub struct BuiltPolygon<T: GeoFloat> {
    pub shell: EdgeRing<T>,
    pub holes: Vec<EdgeRing<T>>,
}

/// Links marked half-edges into rings, classifies them, assigns holes to
/// their enclosing shells, and returns the built polygons.
pub fn build_polygons<T: GeoFloat>(
    graph: &mut OverlayGraph<T>,
) -> Result<Vec<BuiltPolygon<T>>, crate::error::GeoTopologyError<T>> {
    let rings = link_rings(graph);

    let mut shells = Vec::new();
    let mut holes = Vec::new();
    for ring in rings {
        let classified = ring.classify_by_orientation();
        match classified.kind {
            RingKind::Shell => shells.push(classified),
            RingKind::Hole => holes.push(classified),
        }
    }

    let mut polygons: Vec<BuiltPolygon<T>> = shells
        .into_iter()
        .map(|shell| BuiltPolygon { shell, holes: Vec::new() })
        .collect();

    'hole: for hole in holes {
        let probe = hole.coords[0];
        let (hmin, hmax) = hole.envelope();
        let mut candidates: Vec<usize> = Vec::new();
        for (i, poly) in polygons.iter().enumerate() {
            let (smin, smax) = poly.shell.envelope();
            if smin.x <= hmin.x && smin.y <= hmin.y && smax.x >= hmax.x && smax.y >= hmax.y {
                candidates.push(i);
            }
        }
        // Smallest enclosing shell by area, among those that actually
        // contain the probe point (spec.md §4.6 step 4).
        candidates.sort_by(|&a, &b| {
            polygons[a]
                .shell
                .signed_area()
                .abs()
                .partial_cmp(&polygons[b].shell.signed_area().abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for i in candidates {
            let ls = geo_types::LineString::new(polygons[i].shell.coords.clone());
            if matches!(
                point_in_ring(probe, &ls),
                Location::Interior | Location::Boundary
            ) {
                polygons[i].holes.push(hole);
                continue 'hole;
            }
        }
        return Err(crate::error::GeoTopologyError::topology_exception(
            "hole could not be attached to any enclosing shell",
            probe,
        ));
    }

    Ok(polygons)
}

fn link_rings<T: GeoFloat>(graph: &mut OverlayGraph<T>) -> Vec<EdgeRing<T>> {
    let ids: Vec<HalfEdgeId> = graph.half_edge_ids().filter(|&id| graph.half_edge(id).is_in_result_area).collect();
    for &id in &ids {
        graph.half_edge_mut(id).is_visited = false;
    }

    let mut rings = Vec::new();
    for &start in &ids {
        if graph.half_edge(start).is_visited {
            continue;
        }
        let mut coords = Vec::new();
        let mut current = start;
        loop {
            graph.half_edge_mut(current).is_visited = true;
            coords.push(graph.half_edge(current).origin);

            let arrival = current.sym();
            let around = graph.edges_around_node(arrival);
            let pos = around.iter().position(|&x| x == arrival).unwrap_or(0);
            let next = around
                .iter()
                .cycle()
                .skip(pos + 1)
                .take(around.len())
                .copied()
                .find(|&x| graph.half_edge(x).is_in_result_area && !graph.half_edge(x).is_visited)
                .unwrap_or(start);

            if next == start {
                break;
            }
            current = next;
        }
        coords.push(coords[0]);
        if coords.len() >= 4 {
            rings.push(EdgeRing {
                coords,
                kind: RingKind::Shell,
                parent_shell: None,
            });
        }
    }
    rings
}
