//! The snap-rounding noder (spec.md §4.2, fixed-precision branch).

mod hot_pixel;

pub use hot_pixel::HotPixel;

use std::collections::HashMap;

use geo_types::Coord;

use super::segment_string::NodedSegmentString;
use crate::precision::PrecisionModel;
use crate::GeoFloat;

/// Hashes a rounded coordinate to deduplicate hot pixels sharing a center.
fn pixel_key<T: GeoFloat>(c: Coord<T>) -> (i64, i64) {
    let scale = 1e9;
    let to_f64 = |v: T| <f64 as num_traits::NumCast>::from(v).unwrap_or(0.0);
    (
        (to_f64(c.x) * scale).round() as i64,
        (to_f64(c.y) * scale).round() as i64,
    )
}

/// Nodes every segment string against the hot pixel set derived from every
/// vertex in `strings` (spec.md §4.2). After this, every string's vertices
/// should be re-snapped to their nearest pixel center; that final pass is
/// done by the caller via [`NodedSegmentString::add_node`] plus rounding each
/// endpoint through `precision.make_precise` before constructing the strings
/// in the first place, so the only work left here is inserting interior
/// nodes wherever a segment crosses a pixel it doesn't already touch at an
/// endpoint.
pub fn node_snap_rounded<T: GeoFloat, D>(
    strings: &mut [NodedSegmentString<T, D>],
    precision: &PrecisionModel<T>,
) {
    let mut pixels: HashMap<(i64, i64), HotPixel<T>> = HashMap::new();
    for string in strings.iter() {
        for &c in string.coords() {
            let pixel = HotPixel::new(c, precision);
            pixels.entry(pixel_key(pixel.center)).or_insert(pixel);
        }
    }
    let pixels: Vec<HotPixel<T>> = pixels.into_values().collect();

    for string in strings.iter_mut() {
        for segment_index in 0..string.segment_count() {
            let (p0, p1) = string.segment(segment_index);
            for pixel in &pixels {
                if pixel.center == p0 || pixel.center == p1 {
                    continue;
                }
                if pixel.intersects(p0, p1) {
                    if let Some(fraction) = fraction_along(p0, p1, pixel.center) {
                        string.add_node(segment_index, fraction, pixel.center);
                    }
                }
            }
        }
    }
}

fn fraction_along<T: GeoFloat>(p0: Coord<T>, p1: Coord<T>, target: Coord<T>) -> Option<T> {
    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;
    let len2 = dx * dx + dy * dy;
    if len2 == T::zero() {
        return None;
    }
    let t = ((target.x - p0.x) * dx + (target.y - p0.y) * dy) / len2;
    let t = t.max(T::zero()).min(T::one());
    if t == T::zero() || t == T::one() {
        None
    } else {
        Some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    #[test]
    fn segment_passing_near_a_vertex_gets_snapped() {
        let pm = PrecisionModel::fixed(1.0);
        let mut strings = vec![
            NodedSegmentString::new(vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.3 }], ()),
            NodedSegmentString::new(vec![coord! { x: 5.0, y: 0.0 }, coord! { x: 5.0, y: 5.0 }], ()),
        ];
        node_snap_rounded(&mut strings, &pm);
        let parts: Vec<_> = strings.into_iter().flat_map(|s| s.split()).collect();
        assert!(parts.len() >= 2);
    }
}
