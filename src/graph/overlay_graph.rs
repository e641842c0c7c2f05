//! `OverlayGraph` (spec.md §3/§4.4): the half-edge graph built from merged
//! edges, with all half-edges at a node threaded in CCW order.

use std::collections::HashMap;

use geo_types::Coord;

use super::overlay_edge::{HalfEdgeId, OverlayEdge};
use crate::edge::Edge;
use crate::GeoFloat;

fn coord_key<T: GeoFloat>(c: Coord<T>) -> (i64, i64) {
    let to_f64 = |v: T| <f64 as num_traits::NumCast>::from(v).unwrap_or(0.0);
    let scale = 1e9;
    ((to_f64(c.x) * scale).round() as i64, (to_f64(c.y) * scale).round() as i64)
}

/// A half-edge arena plus the node map (origin coordinate -> first incident
/// half-edge) spec.md §3 describes.
pub struct OverlayGraph<T: GeoFloat> {
    half_edges: Vec<OverlayEdge<T>>,
    /// Each full edge's coordinate sequence, indexed by `edge_index`.
    edge_coords: Vec<Vec<Coord<T>>>,
    nodes: HashMap<(i64, i64), HalfEdgeId>,
}

impl<T: GeoFloat> OverlayGraph<T> {
    pub fn new() -> Self {
        OverlayGraph {
            half_edges: Vec::new(),
            edge_coords: Vec::new(),
            nodes: HashMap::new(),
        }
    }

    pub fn half_edge(&self, id: HalfEdgeId) -> &OverlayEdge<T> {
        &self.half_edges[id.0]
    }

    pub fn half_edge_mut(&mut self, id: HalfEdgeId) -> &mut OverlayEdge<T> {
        &mut self.half_edges[id.0]
    }

    pub fn half_edge_ids(&self) -> impl Iterator<Item = HalfEdgeId> {
        (0..self.half_edges.len()).map(HalfEdgeId)
    }

    pub fn edge_coords(&self, edge_index: usize) -> &[Coord<T>] {
        &self.edge_coords[edge_index]
    }

    /// Allocates the forward/symmetric half-edge pair for a merged `edge`
    /// (spec.md §4.4: "for each merged edge two half-edges are allocated").
    /// Returns the forward half-edge's id.
    pub fn add_edge(&mut self, edge: &Edge<T>) -> HalfEdgeId {
        let coords = edge.coords().to_vec();
        let edge_index = self.edge_coords.len();
        self.edge_coords.push(coords.clone());

        let forward_id = HalfEdgeId(self.half_edges.len());
        let sym_id = HalfEdgeId(self.half_edges.len() + 1);

        let mut sym_label = *edge.label();
        sym_label.flip();

        self.half_edges.push(OverlayEdge {
            origin: coords[0],
            direction_point: coords[1],
            edge_index,
            next_ccw: forward_id, // patched below once all edges are inserted
            label: *edge.label(),
            is_in_result_area: false,
            is_in_result_line: false,
            is_visited: false,
            ring: None,
        });
        self.half_edges.push(OverlayEdge {
            origin: *coords.last().unwrap(),
            direction_point: coords[coords.len() - 2],
            edge_index,
            next_ccw: sym_id,
            label: sym_label,
            is_in_result_area: false,
            is_in_result_line: false,
            is_visited: false,
            ring: None,
        });

        self.link_at_node(forward_id);
        self.link_at_node(sym_id);

        forward_id
    }

    /// Inserts `id` into the CCW ring of half-edges sharing its origin,
    /// maintaining the invariant that `next_ccw` is a permutation whose
    /// cycles are exactly the vertex stars (spec.md §4.4).
    fn link_at_node(&mut self, id: HalfEdgeId) {
        let key = coord_key(self.half_edges[id.0].origin);
        match self.nodes.get(&key).copied() {
            None => {
                self.nodes.insert(key, id);
                self.half_edges[id.0].next_ccw = id;
            }
            Some(first) => {
                // Walk the existing ring to find the correct CCW insertion
                // point, then splice `id` in.
                let mut prev = first;
                loop {
                    let next = self.half_edges[prev.0].next_ccw;
                    let insert_here = {
                        let cur = &self.half_edges[id.0];
                        let prev_edge = &self.half_edges[prev.0];
                        let next_edge = &self.half_edges[next.0];
                        if next == first {
                            // Closing the loop: `id` goes after `prev` no
                            // matter what if we've scanned the whole ring.
                            prev_edge.compare_direction(cur) == std::cmp::Ordering::Less
                                || cur.compare_direction(next_edge) == std::cmp::Ordering::Less
                        } else {
                            prev_edge.compare_direction(cur) == std::cmp::Ordering::Less
                                && cur.compare_direction(next_edge) == std::cmp::Ordering::Less
                        }
                    };
                    if insert_here || next == first {
                        self.half_edges[prev.0].next_ccw = id;
                        self.half_edges[id.0].next_ccw = next;
                        break;
                    }
                    prev = next;
                }
            }
        }
    }

    /// All half-edges sharing an origin, in CCW order, starting from `id`.
    pub fn edges_around_node(&self, id: HalfEdgeId) -> Vec<HalfEdgeId> {
        let mut result = vec![id];
        let mut cur = self.half_edges[id.0].next_ccw;
        while cur != id {
            result.push(cur);
            cur = self.half_edges[cur.0].next_ccw;
        }
        result
    }

    /// `prev = sym.next_ccw.sym`, the standard half-edge algebra identity
    /// (spec.md §4.4 invariants).
    pub fn prev(&self, id: HalfEdgeId) -> HalfEdgeId {
        let sym = id.sym();
        self.half_edges[sym.0].next_ccw.sym()
    }

    pub fn len(&self) -> usize {
        self.half_edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.half_edges.is_empty()
    }
}

impl<T: GeoFloat> Default for OverlayGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{InputLabel, TopologyLabel};
    use crate::location::Location;
    use geo_types::coord;

    fn test_edge(coords: Vec<Coord<f64>>) -> Edge<f64> {
        Edge::new(
            0,
            coords,
            TopologyLabel::new(
                InputLabel::area(Location::Interior, Location::Exterior, false),
                InputLabel::absent(),
            ),
        )
    }

    #[test]
    fn add_edge_creates_symmetric_pair() {
        let mut graph = OverlayGraph::new();
        let fwd = graph.add_edge(&test_edge(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 0.0 },
        ]));
        let sym = fwd.sym();
        assert_eq!(graph.half_edge(fwd).origin, coord! { x: 0.0, y: 0.0 });
        assert_eq!(graph.half_edge(sym).origin, coord! { x: 1.0, y: 0.0 });
        assert_eq!(sym.sym(), fwd);
    }

    #[test]
    fn prev_identity_holds() {
        let mut graph = OverlayGraph::new();
        let fwd = graph.add_edge(&test_edge(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 0.0 },
        ]));
        assert_eq!(graph.prev(fwd), graph.half_edge(fwd.sym()).next_ccw.sym());
    }

    #[test]
    fn shared_node_threads_multiple_edges() {
        let mut graph = OverlayGraph::new();
        graph.add_edge(&test_edge(vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }]));
        let second = graph.add_edge(&test_edge(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 0.0, y: 1.0 },
        ]));
        let around = graph.edges_around_node(second);
        assert_eq!(around.len(), 2);
    }
}
