//! The floating MCIndex noder (spec.md §4.2).
//!
//! "MCIndex" (spec.md §4.2) is JTS/GEOS's term for a monotone-chain index; here
//! it's built directly with an `rstar::RTree` over individual segments, the
//! same shortcut geo takes in `RstarEdgeSetIntersector` ("each
//! segment of each edge becomes one indexed object" rather than grouping
//! segments into monotone runs first) -- geo's own doc comment notes
//! this trades a little index bulk for a much simpler implementation, which
//! is the right trade here too since our segment counts are modest compared
//! to e.g. a rendering engine's.

use geo_types::Coord;
use rstar::{RTree, RTreeObject, AABB};

use super::segment_string::NodedSegmentString;
use crate::kernel::{line_intersection, LineIntersection};
use crate::GeoFloat;

#[derive(Clone, Copy)]
struct IndexedSegment {
    string_index: usize,
    segment_index: usize,
    p1: (f64, f64),
    p2: (f64, f64),
}

impl RTreeObject for IndexedSegment {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let (min_x, max_x) = if self.p1.0 <= self.p2.0 {
            (self.p1.0, self.p2.0)
        } else {
            (self.p2.0, self.p1.0)
        };
        let (min_y, max_y) = if self.p1.1 <= self.p2.1 {
            (self.p1.1, self.p2.1)
        } else {
            (self.p2.1, self.p1.1)
        };
        AABB::from_corners([min_x, min_y], [max_x, max_y])
    }
}

/// Nodes every segment string in `strings` against every other (and against
/// itself for self-intersections), recording a node wherever two segments
/// meet at an interior point, per spec.md §4.2's floating MCIndex noder.
///
/// `strings` are mutated in place; call [`NodedSegmentString::split`] on each
/// afterward to obtain the noded substrings.
pub fn node_floating<T: GeoFloat, D>(strings: &mut [NodedSegmentString<T, D>]) {
    let mut indexed = Vec::new();
    for (string_index, string) in strings.iter().enumerate() {
        for segment_index in 0..string.segment_count() {
            let (a, b) = string.segment(segment_index);
            indexed.push(IndexedSegment {
                string_index,
                segment_index,
                p1: (to_f64(a.x), to_f64(a.y)),
                p2: (to_f64(b.x), to_f64(b.y)),
            });
        }
    }

    if indexed.is_empty() {
        return;
    }

    let tree = RTree::bulk_load(indexed);

    let candidate_pairs: Vec<(IndexedSegment, IndexedSegment)> = tree
        .intersection_candidates_with_other_tree(&tree)
        .filter(|(seg_a, seg_b)| {
            if seg_a.string_index == seg_b.string_index && seg_a.segment_index == seg_b.segment_index {
                return false;
            }
            // Each unordered pair surfaces twice (a,b) and (b,a); only
            // process the canonical ordering once.
            (seg_a.string_index, seg_a.segment_index) <= (seg_b.string_index, seg_b.segment_index)
        })
        .map(|(a, b)| (*a, *b))
        .collect();

    let pending = find_pending_nodes(strings, &candidate_pairs);

    for (string_index, segment_index, fraction, coord) in pending {
        strings[string_index].add_node(segment_index, fraction, coord);
    }
}

/// spec.md §4.2's "for each chain pair whose envelopes intersect, invoke a
/// segment intersector" step, run over the whole candidate-pair list at
/// once so the multithreaded build (SPEC_FULL.md §D) can fan it out with
/// `rayon` -- each pair's intersection test only reads `strings`.
#[cfg(feature = "multithreading")]
fn find_pending_nodes<T: GeoFloat + Send + Sync, D: Sync>(
    strings: &[NodedSegmentString<T, D>],
    candidate_pairs: &[(IndexedSegment, IndexedSegment)],
) -> Vec<(usize, usize, T, Coord<T>)> {
    use rayon::prelude::*;
    candidate_pairs
        .par_iter()
        .flat_map_iter(|&(seg_a, seg_b)| pending_nodes_for_pair(strings, seg_a, seg_b))
        .collect()
}

#[cfg(not(feature = "multithreading"))]
fn find_pending_nodes<T: GeoFloat, D>(
    strings: &[NodedSegmentString<T, D>],
    candidate_pairs: &[(IndexedSegment, IndexedSegment)],
) -> Vec<(usize, usize, T, Coord<T>)> {
    candidate_pairs
        .iter()
        .flat_map(|&(seg_a, seg_b)| pending_nodes_for_pair(strings, seg_a, seg_b))
        .collect()
}

fn pending_nodes_for_pair<T: GeoFloat, D>(
    strings: &[NodedSegmentString<T, D>],
    seg_a: IndexedSegment,
    seg_b: IndexedSegment,
) -> Vec<(usize, usize, T, Coord<T>)> {
    let mut pending = Vec::new();
    let (p1, p2) = strings[seg_a.string_index].segment(seg_a.segment_index);
    let (q1, q2) = strings[seg_b.string_index].segment(seg_b.segment_index);

    let line_p = geo_types::Line::new(p1, p2);
    let line_q = geo_types::Line::new(q1, q2);

    match line_intersection(line_p, line_q) {
        None => {}
        Some(LineIntersection::SinglePoint { intersection, .. }) => {
            if let Some(fraction) = fraction_along(line_p, intersection) {
                pending.push((seg_a.string_index, seg_a.segment_index, fraction, intersection));
            }
            if let Some(fraction) = fraction_along(line_q, intersection) {
                pending.push((seg_b.string_index, seg_b.segment_index, fraction, intersection));
            }
        }
        Some(LineIntersection::Collinear { intersection }) => {
            for (idx, seg_idx, line) in [
                (seg_a.string_index, seg_a.segment_index, line_p),
                (seg_b.string_index, seg_b.segment_index, line_q),
            ] {
                for endpoint in [intersection.start, intersection.end] {
                    if let Some(fraction) = fraction_along(line, endpoint) {
                        pending.push((idx, seg_idx, fraction, endpoint));
                    }
                }
            }
        }
    }
    pending
}

fn fraction_along<T: GeoFloat>(line: geo_types::Line<T>, point: Coord<T>) -> Option<T> {
    let dx = line.end.x - line.start.x;
    let dy = line.end.y - line.start.y;
    let len2 = dx * dx + dy * dy;
    if len2 == T::zero() {
        return None;
    }
    let t = ((point.x - line.start.x) * dx + (point.y - line.start.y) * dy) / len2;
    let t = t.max(T::zero()).min(T::one());
    if t == T::zero() || t == T::one() {
        None
    } else {
        Some(t)
    }
}

fn to_f64<T: GeoFloat>(v: T) -> f64 {
    <f64 as num_traits::NumCast>::from(v).expect("coordinate ordinate must cast to f64")
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    #[test]
    fn crossing_strings_get_nodes_on_both() {
        let mut strings = vec![
            NodedSegmentString::new(
                vec![coord! { x: 0.0, y: 5.0 }, coord! { x: 10.0, y: 5.0 }],
                (),
            ),
            NodedSegmentString::new(
                vec![coord! { x: 5.0, y: 0.0 }, coord! { x: 5.0, y: 10.0 }],
                (),
            ),
        ];
        node_floating(&mut strings);
        let parts: Vec<_> = strings.into_iter().flat_map(|s| s.split()).collect();
        // Each original 1-segment string should split into two.
        assert_eq!(parts.len(), 4);
        assert!(parts
            .iter()
            .any(|(_, coords)| coords.contains(&coord! { x: 5.0, y: 5.0 })));
    }

    #[test]
    fn disjoint_strings_get_no_nodes() {
        let mut strings = vec![
            NodedSegmentString::new(
                vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }],
                (),
            ),
            NodedSegmentString::new(
                vec![coord! { x: 10.0, y: 10.0 }, coord! { x: 11.0, y: 10.0 }],
                (),
            ),
        ];
        node_floating(&mut strings);
        let parts: Vec<_> = strings.into_iter().flat_map(|s| s.split()).collect();
        assert_eq!(parts.len(), 2);
    }
}
