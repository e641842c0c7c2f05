//! The noder (spec.md §4.2): turns raw input segment strings into a set of
//! substrings whose interiors are pairwise disjoint.

mod mc_index_noder;
mod segment_string;
mod snap_rounding;
mod validating_noder;

pub use mc_index_noder::node_floating;
pub use segment_string::{NodedSegmentString, SegmentNode};
pub use snap_rounding::{node_snap_rounded, HotPixel};
pub use validating_noder::validate_noding;

use crate::error::GeoTopologyError;
use crate::precision::PrecisionModel;
use crate::GeoFloat;

/// Nodes `strings` in place, choosing the floating MCIndex noder or the
/// fixed-precision snap-rounding noder based on `precision` (spec.md §4.2:
/// "chosen by the overlay based on the precision model"), then splits every
/// string into its noded substrings.
///
/// When `validate` is set, the result is brute-force re-checked and a
/// [`GeoTopologyError::TopologyException`] is raised if any proper
/// intersection survived.
pub fn node<T: GeoFloat, D: Clone>(
    mut strings: Vec<NodedSegmentString<T, D>>,
    precision: &PrecisionModel<T>,
    validate: bool,
) -> Result<Vec<(D, Vec<geo_types::Coord<T>>)>, GeoTopologyError<T>> {
    // Zero-length input segments are dropped before indexing (spec.md §4.2
    // contract): collapse any string down to its de-duplicated vertex run.
    for s in &mut strings {
        // Rounding to the precision model happens here so hot pixels and
        // noded output agree on vertex locations from the start.
        let rounded: Vec<_> = s.coords().iter().map(|&c| precision.make_precise(c)).collect();
        *s = NodedSegmentString::new(dedup_consecutive(rounded), s.data.clone());
    }
    strings.retain(|s| s.segment_count() > 0);

    if precision.is_floating() {
        node_floating(&mut strings);
    } else {
        node_snap_rounded(&mut strings, precision);
    }

    let substrings: Vec<(D, Vec<geo_types::Coord<T>>)> =
        strings.into_iter().flat_map(|s| s.split()).collect();

    if validate {
        let just_coords: Vec<Vec<geo_types::Coord<T>>> =
            substrings.iter().map(|(_, c)| c.clone()).collect();
        validate_noding(&just_coords)?;
    }

    Ok(substrings)
}

fn dedup_consecutive<T: GeoFloat>(coords: Vec<geo_types::Coord<T>>) -> Vec<geo_types::Coord<T>> {
    let mut out: Vec<geo_types::Coord<T>> = Vec::with_capacity(coords.len());
    for c in coords {
        if out.last() != Some(&c) {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    #[test]
    fn node_floating_splits_crossing_segments() {
        let strings = vec![
            NodedSegmentString::new(vec![coord! { x: 0.0, y: 5.0 }, coord! { x: 10.0, y: 5.0 }], 0usize),
            NodedSegmentString::new(vec![coord! { x: 5.0, y: 0.0 }, coord! { x: 5.0, y: 10.0 }], 1usize),
        ];
        let result = node(strings, &PrecisionModel::Floating, true).unwrap();
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn node_drops_zero_length_segments() {
        let strings = vec![NodedSegmentString::new(
            vec![
                coord! { x: 0.0, y: 0.0 },
                coord! { x: 0.0, y: 0.0 },
                coord! { x: 1.0, y: 0.0 },
            ],
            0usize,
        )];
        let result = node(strings, &PrecisionModel::Floating, true).unwrap();
        assert_eq!(result.len(), 1);
    }
}
