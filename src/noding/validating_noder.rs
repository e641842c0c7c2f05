//! Validation mode (spec.md §4.2): "An optional wrapping noder re-checks all
//! emitted substrings with a brute-force segment intersector and reports any
//! residual proper intersection as a topology failure."

use geo_types::Coord;

use crate::error::GeoTopologyError;
use crate::kernel::{line_intersection, LineIntersection};
use crate::GeoFloat;

/// Brute-force re-check of a noded set: every pair of substrings from
/// different input strings (or the same string, non-adjacent) must meet, if
/// at all, only at a shared endpoint.
pub fn validate_noding<T: GeoFloat>(
    substrings: &[Vec<Coord<T>>],
) -> Result<(), GeoTopologyError<T>> {
    for i in 0..substrings.len() {
        for j in (i + 1)..substrings.len() {
            let a = &substrings[i];
            let b = &substrings[j];
            for wa in a.windows(2) {
                for wb in b.windows(2) {
                    let line_a = geo_types::Line::new(wa[0], wa[1]);
                    let line_b = geo_types::Line::new(wb[0], wb[1]);
                    match line_intersection(line_a, line_b) {
                        Some(LineIntersection::SinglePoint {
                            is_proper: true,
                            intersection,
                        }) => {
                            return Err(GeoTopologyError::topology_exception(
                                "residual proper intersection survived noding",
                                intersection,
                            ));
                        }
                        Some(LineIntersection::Collinear { intersection }) => {
                            // A collinear overlap that isn't just a shared
                            // endpoint is also a noding failure.
                            if intersection.start != intersection.end {
                                let shares_endpoint = [wa[0], wa[1]].contains(&intersection.start)
                                    && [wa[0], wa[1]].contains(&intersection.end)
                                    && [wb[0], wb[1]].contains(&intersection.start)
                                    && [wb[0], wb[1]].contains(&intersection.end);
                                if !shares_endpoint {
                                    return Err(GeoTopologyError::topology_exception(
                                        "residual collinear overlap survived noding",
                                        intersection.start,
                                    ));
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    #[test]
    fn noded_substrings_meeting_only_at_shared_vertex_pass() {
        let substrings = vec![
            vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 5.0, y: 5.0 }],
            vec![coord! { x: 5.0, y: 5.0 }, coord! { x: 10.0, y: 0.0 }],
        ];
        assert!(validate_noding(&substrings).is_ok());
    }

    #[test]
    fn unresolved_crossing_fails() {
        let substrings = vec![
            vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 10.0 }],
            vec![coord! { x: 0.0, y: 10.0 }, coord! { x: 10.0, y: 0.0 }],
        ];
        assert!(validate_noding(&substrings).is_err());
    }
}
