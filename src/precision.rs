//! `PrecisionModel` (spec.md §3): the grid a noder snaps coordinates to.
//!
//! Has no equivalent in geo (`geo_types::Coord` ordinates are
//! always taken at face value). Ported from GEOS's `geom::PrecisionModel`
//! (`original_source/source/geom/PrecisionModel.cpp`), trimmed to the three
//! variants spec.md actually calls out and to drop offset support, which
//! GEOS itself dead-codes (`setScale`/`getOffsetX` are private and no public
//! constructor ever sets a nonzero offset).

use geo_types::Coord;

use crate::GeoFloat;

/// The grid coordinates are rounded onto before any topology computation.
///
/// `Floating` performs no rounding at all: the default, and the only variant
/// under which an overlay's output scale matches its input scale exactly.
/// `Fixed` rounds every ordinate to a multiple of `1.0 / scale`, trading
/// precision for the snap-rounding noder's termination guarantee (spec.md
/// §4.2).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PrecisionModel<T: GeoFloat> {
    /// Full double precision, no rounding.
    Floating,
    /// Rounded to the nearest representable `f32`, then widened back.
    FloatingSingle,
    /// Rounded to a multiple of `1.0 / scale`. `scale` must be nonzero.
    Fixed { scale: T },
}

impl<T: GeoFloat> Default for PrecisionModel<T> {
    fn default() -> Self {
        PrecisionModel::Floating
    }
}

impl<T: GeoFloat> PrecisionModel<T> {
    /// A fixed model with the given scale (`1.0 / scale` is the grid size).
    ///
    /// Panics if `scale` is zero, matching GEOS's `setScale` guard.
    pub fn fixed(scale: T) -> Self {
        assert!(scale != T::zero(), "PrecisionModel scale cannot be 0");
        PrecisionModel::Fixed { scale }
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, PrecisionModel::Floating | PrecisionModel::FloatingSingle)
    }

    pub fn grid_size(&self) -> Option<T> {
        match self {
            PrecisionModel::Fixed { scale } => Some(T::one() / *scale),
            _ => None,
        }
    }

    /// Rounds a single ordinate onto this model's grid.
    pub fn make_precise_ordinate(&self, val: T) -> T {
        match self {
            PrecisionModel::Floating => val,
            PrecisionModel::FloatingSingle => {
                let narrowed: f32 = num_traits::NumCast::from(val).unwrap_or(0.0_f32);
                T::from(narrowed as f64).expect("f32 round-trips through f64")
            }
            PrecisionModel::Fixed { scale } => sym_round(val * *scale) / *scale,
        }
    }

    /// Rounds both ordinates of `coord` onto this model's grid.
    pub fn make_precise(&self, coord: Coord<T>) -> Coord<T> {
        if matches!(self, PrecisionModel::Floating) {
            return coord;
        }
        Coord {
            x: self.make_precise_ordinate(coord.x),
            y: self.make_precise_ordinate(coord.y),
        }
    }

    /// `compareTo` from GEOS: a `Fixed` model is "greater" (more precise) the
    /// larger its scale; `Floating`/`FloatingSingle` are maximally precise.
    pub fn precision_rank(&self) -> T {
        match self {
            PrecisionModel::Floating => T::infinity(),
            PrecisionModel::FloatingSingle => T::max_value(),
            PrecisionModel::Fixed { scale } => *scale,
        }
    }
}

/// Symmetric round-half-away-from-zero, matching GEOS's `util::sym_round`
/// (`floor(d + 0.5)` for `d >= 0`, its mirror image otherwise) rather than
/// `f64::round`'s ties-away-from-zero-on-magnitude behavior, which happens to
/// coincide for positive values but GEOS spells out explicitly for negatives.
fn sym_round<T: GeoFloat>(d: T) -> T {
    if d >= T::zero() {
        (d + T::from(0.5).unwrap()).floor()
    } else {
        -((-d + T::from(0.5).unwrap()).floor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    #[test]
    fn floating_does_not_round() {
        let pm = PrecisionModel::<f64>::Floating;
        let c = coord! { x: 1.23456789, y: -9.87654321 };
        assert_eq!(pm.make_precise(c), c);
    }

    #[test]
    fn fixed_rounds_to_grid() {
        let pm = PrecisionModel::fixed(10.0); // grid size 0.1
        let c = coord! { x: 1.24, y: -1.25 };
        let rounded = pm.make_precise(c);
        assert_eq!(rounded.x, 1.2);
        assert_eq!(rounded.y, -1.3);
    }

    #[test]
    fn fixed_unit_scale_rounds_to_integers() {
        let pm = PrecisionModel::fixed(1.0);
        assert_eq!(pm.make_precise_ordinate(2.5), 3.0);
        assert_eq!(pm.make_precise_ordinate(-2.5), -3.0);
        assert_eq!(pm.make_precise_ordinate(2.4), 2.0);
    }

    #[test]
    #[should_panic(expected = "scale cannot be 0")]
    fn fixed_zero_scale_panics() {
        PrecisionModel::fixed(0.0);
    }

    #[test]
    fn is_floating_covers_both_floating_variants() {
        assert!(PrecisionModel::<f64>::Floating.is_floating());
        assert!(PrecisionModel::<f64>::FloatingSingle.is_floating());
        assert!(!PrecisionModel::fixed(1.0).is_floating());
    }
}
