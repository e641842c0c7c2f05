//! `EdgeRing` (spec.md §3): a cyclic chain of half-edges bounding one face.

use geo_types::{Coord, LineString};

use crate::GeoFloat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingKind {
    Shell,
    Hole,
}

/// A closed ring extracted from the marked half-edge set, plus its
/// classification and (if a hole) the shell it was assigned to.
#[derive(Debug, Clone)]
pub struct EdgeRing<T: GeoFloat> {
    pub coords: Vec<Coord<T>>,
    pub kind: RingKind,
    /// Index into the shell list this hole belongs to; `None` for shells
    /// and for not-yet-assigned holes.
    pub parent_shell: Option<usize>,
}

impl<T: GeoFloat> EdgeRing<T> {
    pub fn into_line_string(self) -> LineString<T> {
        LineString::new(self.coords)
    }

    pub fn signed_area(&self) -> T {
        let mut area = T::zero();
        for w in self.coords.windows(2) {
            area = area + (w[0].x * w[1].y - w[1].x * w[0].y);
        }
        area / (T::one() + T::one())
    }

    /// Shells are CCW, holes CW, per spec.md §4.6's chosen canonical
    /// orientation (applied uniformly across the extractor).
    pub fn classify_by_orientation(mut self) -> Self {
        let is_ccw = self.signed_area() > T::zero();
        self.kind = if is_ccw { RingKind::Shell } else { RingKind::Hole };
        self
    }

    pub fn envelope(&self) -> (Coord<T>, Coord<T>) {
        let mut min = self.coords[0];
        let mut max = self.coords[0];
        for &c in &self.coords[1..] {
            if c.x < min.x {
                min.x = c.x;
            }
            if c.y < min.y {
                min.y = c.y;
            }
            if c.x > max.x {
                max.x = c.x;
            }
            if c.y > max.y {
                max.y = c.y;
            }
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    fn ring(coords: Vec<Coord<f64>>) -> EdgeRing<f64> {
        EdgeRing {
            coords,
            kind: RingKind::Shell,
            parent_shell: None,
        }
    }

    #[test]
    fn ccw_square_is_shell() {
        let r = ring(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 10.0, y: 0.0 },
            coord! { x: 10.0, y: 10.0 },
            coord! { x: 0.0, y: 10.0 },
            coord! { x: 0.0, y: 0.0 },
        ]);
        assert_eq!(r.classify_by_orientation().kind, RingKind::Shell);
    }

    #[test]
    fn cw_square_is_hole() {
        let r = ring(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 0.0, y: 10.0 },
            coord! { x: 10.0, y: 10.0 },
            coord! { x: 10.0, y: 0.0 },
            coord! { x: 0.0, y: 0.0 },
        ]);
        assert_eq!(r.classify_by_orientation().kind, RingKind::Hole);
    }
}
