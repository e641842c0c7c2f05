//! The labeller (spec.md §4.5): assigns a complete Location to every
//! half-edge side, for both inputs, in four steps.

use std::collections::VecDeque;

use crate::error::GeoTopologyError;
use crate::graph::{HalfEdgeId, OverlayGraph};
use crate::location::Location;
use crate::GeoFloat;

/// Runs Steps A-D over every node of `graph`, mutating each half-edge's
/// label in place.
///
/// `locate_in_input` answers Step D's "locate the edge's origin point in the
/// corresponding input area with an indexed point-in-area locator" for edges
/// that never got a location from propagation; `is_input_area` tells the
/// labeller whether a given input is an area at all (non-area inputs label
/// their disconnected line edges Exterior directly, per spec.md §4.5).
pub fn label<T: GeoFloat>(
    graph: &mut OverlayGraph<T>,
    is_input_area: [bool; 2],
    locate_in_input: impl Fn(geo_types::Coord<T>, usize) -> Location,
) -> Result<(), GeoTopologyError<T>> {
    step_a_propagate_area_locations(graph)?;
    step_b_label_collapsed_edges(graph);
    step_c_propagate_line_locations(graph);
    step_d_label_disconnected_edges(graph, is_input_area, locate_in_input);
    Ok(())
}

/// Step A: for each input that contributes area edges, walk each node's CCW
/// ring, flipping the "current location" across area edges and stamping
/// line/unknown edges with it.
fn step_a_propagate_area_locations<T: GeoFloat>(
    graph: &mut OverlayGraph<T>,
) -> Result<(), GeoTopologyError<T>> {
    let node_starts = distinct_node_starts(graph);

    for input in 0..2 {
        for &start in &node_starts {
            let ring = graph.edges_around_node(start);
            let Some(seed_position) = ring
                .iter()
                .position(|&id| graph.half_edge(id).label.for_input(input).dimension.is_area())
            else {
                continue;
            };

            let mut current = graph.half_edge(ring[seed_position]).label.for_input(input).loc_left;
            for offset in 0..ring.len() {
                let id = ring[(seed_position + offset) % ring.len()];
                let mut input_label = graph.half_edge(id).label.for_input(input);
                if input_label.dimension.is_area() {
                    if input_label.loc_left.is_known() && input_label.loc_left != current {
                        return Err(GeoTopologyError::topology_exception(
                            "side location conflict while propagating area locations",
                            graph.half_edge(id).origin,
                        ));
                    }
                    input_label.loc_left = current;
                    current = current.flip_interior_exterior();
                    input_label.loc_right = current;
                } else if !input_label.loc_line.is_known() {
                    input_label.loc_line = current;
                }
                graph.half_edge_mut(id).label.set_input(input, input_label);
            }
        }
    }
    Ok(())
}

/// Step B: a collapsed ring edge's location comes from its parent ring's
/// role; the edge/merger already recorded that via `is_hole` when it
/// downgraded the edge's dimension to Line, so this step only needs to fill
/// in `loc_line` for any collapsed edge that propagation skipped.
fn step_b_label_collapsed_edges<T: GeoFloat>(graph: &mut OverlayGraph<T>) {
    for id in graph.half_edge_ids() {
        for input in 0..2 {
            let mut label = graph.half_edge(id).label.for_input(input);
            if label.dimension == crate::edge::Dimension::Line && !label.loc_line.is_known() {
                label.loc_line = if label.is_hole {
                    Location::Exterior
                } else {
                    Location::Interior
                };
                graph.half_edge_mut(id).label.set_input(input, label);
            }
        }
    }
}

/// Step C: BFS from every edge whose line location is already known,
/// spreading that location to unknown-line-location half-edges sharing a
/// node.
fn step_c_propagate_line_locations<T: GeoFloat>(graph: &mut OverlayGraph<T>) {
    for input in 0..2 {
        let mut queue: VecDeque<HalfEdgeId> = graph
            .half_edge_ids()
            .filter(|&id| {
                let label = graph.half_edge(id).label.for_input(input);
                label.dimension != crate::edge::Dimension::None && label.loc_line.is_known()
            })
            .collect();

        while let Some(id) = queue.pop_front() {
            let loc = graph.half_edge(id).label.for_input(input).loc_line;
            for sibling in graph.edges_around_node(id) {
                let mut label = graph.half_edge(sibling).label.for_input(input);
                if label.dimension != crate::edge::Dimension::None && !label.loc_line.is_known() {
                    label.loc_line = loc;
                    graph.half_edge_mut(sibling).label.set_input(input, label);
                    queue.push_back(sibling.sym());
                }
            }
        }
    }
}

/// Step D: anything still unknown gets located directly against the input
/// area (or Exterior, for non-area inputs).
fn step_d_label_disconnected_edges<T: GeoFloat>(
    graph: &mut OverlayGraph<T>,
    is_input_area: [bool; 2],
    locate_in_input: impl Fn(geo_types::Coord<T>, usize) -> Location,
) {
    for id in graph.half_edge_ids() {
        for input in 0..2 {
            let mut label = graph.half_edge(id).label.for_input(input);
            if label.dimension == crate::edge::Dimension::None {
                continue;
            }
            let needs_line = !label.loc_line.is_known() && label.dimension != crate::edge::Dimension::Area;
            let needs_sides = label.dimension == crate::edge::Dimension::Area
                && (!label.loc_left.is_known() || !label.loc_right.is_known());
            if !needs_line && !needs_sides {
                continue;
            }
            let origin = graph.half_edge(id).origin;
            let located = if is_input_area[input] {
                locate_in_input(origin, input)
            } else {
                Location::Exterior
            };
            if needs_line {
                label.loc_line = located;
            }
            if needs_sides {
                if !label.loc_left.is_known() {
                    label.loc_left = located;
                }
                if !label.loc_right.is_known() {
                    label.loc_right = located;
                }
            }
            graph.half_edge_mut(id).label.set_input(input, label);
        }
    }
}

fn distinct_node_starts<T: GeoFloat>(graph: &OverlayGraph<T>) -> Vec<HalfEdgeId> {
    let mut seen = std::collections::HashSet::new();
    let mut starts = Vec::new();
    for id in graph.half_edge_ids() {
        let key = origin_key(graph, id);
        if seen.insert(key) {
            starts.push(id);
        }
    }
    starts
}

fn origin_key<T: GeoFloat>(graph: &OverlayGraph<T>, id: HalfEdgeId) -> (i64, i64) {
    let c = graph.half_edge(id).origin;
    let to_f64 = |v: T| <f64 as num_traits::NumCast>::from(v).unwrap_or(0.0);
    ((to_f64(c.x) * 1e9).round() as i64, (to_f64(c.y) * 1e9).round() as i64)
}

trait FlipInteriorExterior {
    fn flip_interior_exterior(self) -> Self;
}

impl FlipInteriorExterior for Location {
    fn flip_interior_exterior(self) -> Self {
        match self {
            Location::Interior => Location::Exterior,
            Location::Exterior => Location::Interior,
            other => other,
        }
    }
}
