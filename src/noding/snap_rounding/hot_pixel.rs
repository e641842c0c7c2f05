//! Hot pixels (spec.md §3): "a square of side 1/scale centred on a
//! scale-rounded point", the core primitive of the snap-rounding noder.
//!
//! Grounded on GEOS's `noding::snapround::HotPixel`
//! (`original_source` lists the snap-rounding noder family under
//! `operation/overlayng`/`noding::snapround`, though the `.cpp`/`.h` pair
//! itself isn't in the retrieval pack -- the segment/pixel-side intersection
//! test below follows the edge-inclusion convention spec.md §4.2 spells out
//! explicitly: "whose specified closed sides (top and right) the segment
//! touches at non-corner points").

use geo_types::Coord;

use crate::kernel::{line_intersection, LineIntersection};
use crate::precision::PrecisionModel;
use crate::GeoFloat;

/// A single snap-rounding pixel centred on `center`, with a side length of
/// one grid unit (`1 / scale`).
#[derive(Debug, Clone, Copy)]
pub struct HotPixel<T: GeoFloat> {
    pub center: Coord<T>,
    half_width: T,
}

impl<T: GeoFloat> HotPixel<T> {
    pub fn new(original: Coord<T>, precision: &PrecisionModel<T>) -> Self {
        let center = precision.make_precise(original);
        let grid_size = precision.grid_size().unwrap_or_else(T::epsilon);
        HotPixel {
            center,
            half_width: grid_size / (T::one() + T::one()),
        }
    }

    fn min_x(&self) -> T {
        self.center.x - self.half_width
    }
    fn max_x(&self) -> T {
        self.center.x + self.half_width
    }
    fn min_y(&self) -> T {
        self.center.y - self.half_width
    }
    fn max_y(&self) -> T {
        self.center.y + self.half_width
    }

    /// Does `segment` intersect this pixel's interior, or its closed
    /// top/right sides at a non-corner point?
    ///
    /// Implemented by intersecting the segment against the four pixel edges
    /// through the shared robust line intersector, rather than a bespoke
    /// box-crossing test, so the pixel test and the rest of the noder agree
    /// on what "touching" a boundary point means.
    pub fn intersects(&self, p0: Coord<T>, p1: Coord<T>) -> bool {
        if self.contains_strictly(p0) || self.contains_strictly(p1) {
            return true;
        }
        if self.on_closed_side(p0) || self.on_closed_side(p1) {
            return true;
        }

        let seg = geo_types::Line::new(p0, p1);
        let edges = [
            // bottom, left: open sides, excluded from "closed" inclusion but
            // still geometrically tested for interior crossings
            (
                Coord { x: self.min_x(), y: self.min_y() },
                Coord { x: self.max_x(), y: self.min_y() },
            ),
            (
                Coord { x: self.min_x(), y: self.min_y() },
                Coord { x: self.min_x(), y: self.max_y() },
            ),
            // top, right: closed sides
            (
                Coord { x: self.min_x(), y: self.max_y() },
                Coord { x: self.max_x(), y: self.max_y() },
            ),
            (
                Coord { x: self.max_x(), y: self.min_y() },
                Coord { x: self.max_x(), y: self.max_y() },
            ),
        ];

        for (a, b) in edges {
            if matches!(line_intersection(seg, geo_types::Line::new(a, b)), Some(_)) {
                return true;
            }
        }
        false
    }

    fn contains_strictly(&self, p: Coord<T>) -> bool {
        p.x > self.min_x() && p.x < self.max_x() && p.y > self.min_y() && p.y < self.max_y()
    }

    /// Top and right edges are closed; bottom and left are open, the usual
    /// half-open tiling convention so adjacent pixels don't double-claim a
    /// shared edge.
    fn on_closed_side(&self, p: Coord<T>) -> bool {
        let on_top = p.y == self.max_y() && p.x >= self.min_x() && p.x <= self.max_x();
        let on_right = p.x == self.max_x() && p.y >= self.min_y() && p.y <= self.max_y();
        on_top || on_right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    #[test]
    fn pixel_centered_on_rounded_point() {
        let pm = PrecisionModel::fixed(1.0);
        let pixel = HotPixel::new(coord! { x: 2.4, y: 2.6 }, &pm);
        assert_eq!(pixel.center, coord! { x: 2.0, y: 3.0 });
    }

    #[test]
    fn segment_through_interior_intersects() {
        let pm = PrecisionModel::fixed(1.0);
        let pixel = HotPixel::new(coord! { x: 5.0, y: 5.0 }, &pm);
        assert!(pixel.intersects(coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 10.0 }));
    }

    #[test]
    fn segment_far_away_does_not_intersect() {
        let pm = PrecisionModel::fixed(1.0);
        let pixel = HotPixel::new(coord! { x: 5.0, y: 5.0 }, &pm);
        assert!(!pixel.intersects(coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }));
    }
}
