//! The DE-9IM `IntersectionMatrix` and pattern compiler (spec.md §6, §4.7;
//! SPEC_FULL.md §F.4).
//!
//! Grounded on geo's `relate::geomgraph::IntersectionMatrix`, which
//! is itself "heavily based on JTS's IntersectionMatrix". Rows/columns are
//! addressed by [`Location`] (Interior, Boundary, Exterior) via
//! [`crate::location::location_index`] so the matrix and the labeller share
//! one indexing convention.

use std::fmt;

use crate::location::{location_index, Dimensions, Location};

/// A 3x3 matrix of [`Dimensions`], one cell per (Interior, Boundary,
/// Exterior) pair of A x B.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntersectionMatrix {
    cells: [[Dimensions; 3]; 3],
}

impl Default for IntersectionMatrix {
    fn default() -> Self {
        Self::empty()
    }
}

impl IntersectionMatrix {
    /// All cells `Empty` (the identity for `set_at_least`).
    pub fn empty() -> Self {
        IntersectionMatrix {
            cells: [[Dimensions::Empty; 3]; 3],
        }
    }

    pub fn get(&self, row: Location, col: Location) -> Dimensions {
        self.cells[location_index(row)][location_index(col)]
    }

    pub fn set(&mut self, row: Location, col: Location, dim: Dimensions) {
        self.cells[location_index(row)][location_index(col)] = dim;
    }

    /// Raises a cell to `dim` if it isn't already at least that large
    /// (spec.md §4.7: "updates the matrix" after every visit).
    pub fn set_at_least(&mut self, row: Location, col: Location, dim: Dimensions) {
        let cell = &mut self.cells[location_index(row)][location_index(col)];
        if *cell < dim {
            *cell = dim;
        }
    }

    /// Applies `set_at_least` for every non-`*` cell of a 9-character
    /// pattern in row-major (II, IB, IE, BI, BB, BE, EI, EB, EE) order, the
    /// same shortcut geo's `set_at_least_from_string` uses to seed
    /// a matrix from a hardcoded dimension-rule string.
    pub fn set_at_least_from_string(&mut self, pattern: &str) -> Result<(), String> {
        if pattern.len() != 9 {
            return Err(format!(
                "expected a 9-character DE-9IM pattern, got {} characters",
                pattern.len()
            ));
        }
        let locations = [
            Location::Interior,
            Location::Boundary,
            Location::Exterior,
        ];
        for (i, ch) in pattern.chars().enumerate() {
            let row = locations[i / 3];
            let col = locations[i % 3];
            match ch {
                '*' => {}
                'F' => {}
                '0' => self.set_at_least(row, col, Dimensions::ZeroDimensional),
                '1' => self.set_at_least(row, col, Dimensions::OneDimensional),
                '2' => self.set_at_least(row, col, Dimensions::TwoDimensional),
                _ => return Err(format!("invalid DE-9IM pattern character '{ch}'")),
            }
        }
        Ok(())
    }

    /// `A.relate(B)` transposed is `B.relate(A)`: swap rows and columns.
    pub fn transpose(&self) -> IntersectionMatrix {
        let mut out = IntersectionMatrix::empty();
        for r in 0..3 {
            for c in 0..3 {
                out.cells[c][r] = self.cells[r][c];
            }
        }
        out
    }

    /// Whether any interior/boundary cell of either geometry intersects the
    /// other's interior/boundary (i.e. `!disjoint`).
    pub fn is_intersects(&self) -> bool {
        for row in [Location::Interior, Location::Boundary] {
            for col in [Location::Interior, Location::Boundary] {
                if self.get(row, col) != Dimensions::Empty {
                    return true;
                }
            }
        }
        false
    }

    /// Matches `self` against a compiled [`Pattern`].
    pub fn matches(&self, pattern: &Pattern) -> bool {
        pattern.matches(self)
    }

    /// Matches `self` against a DE-9IM pattern string directly, compiling it
    /// first. Prefer [`Pattern::compile`] + [`IntersectionMatrix::matches`]
    /// when matching the same pattern repeatedly.
    pub fn matches_str(&self, pattern: &str) -> Result<bool, String> {
        Ok(self.matches(&Pattern::compile(pattern)?))
    }
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell.char_code())?;
            }
        }
        Ok(())
    }
}

/// One cell of a compiled DE-9IM pattern (spec.md §6 grammar).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternCell {
    /// `T`: cell must be >= 0-dimensional (non-empty).
    True,
    /// `F`: cell must be empty.
    False,
    /// An exact dimension.
    Exact(Dimensions),
    /// `*`: matches anything.
    Any,
}

impl PatternCell {
    fn matches(self, dim: Dimensions) -> bool {
        match self {
            PatternCell::True => dim != Dimensions::Empty,
            PatternCell::False => dim == Dimensions::Empty,
            PatternCell::Exact(expected) => dim == expected,
            PatternCell::Any => true,
        }
    }
}

/// A DE-9IM pattern string compiled once into nine cells, so repeated
/// matching (e.g. from [`crate::relate::PreparedGeometry`]) doesn't re-parse
/// the string (SPEC_FULL.md §F.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    cells: [PatternCell; 9],
}

impl Pattern {
    pub fn compile(pattern: &str) -> Result<Pattern, String> {
        if pattern.len() != 9 {
            return Err(format!(
                "expected a 9-character DE-9IM pattern, got {} characters",
                pattern.len()
            ));
        }
        let mut cells = [PatternCell::Any; 9];
        for (i, ch) in pattern.chars().enumerate() {
            cells[i] = match ch {
                'T' => PatternCell::True,
                'F' => PatternCell::False,
                '0' => PatternCell::Exact(Dimensions::ZeroDimensional),
                '1' => PatternCell::Exact(Dimensions::OneDimensional),
                '2' => PatternCell::Exact(Dimensions::TwoDimensional),
                '*' => PatternCell::Any,
                _ => return Err(format!("invalid DE-9IM pattern character '{ch}'")),
            };
        }
        Ok(Pattern { cells })
    }

    pub fn matches(&self, matrix: &IntersectionMatrix) -> bool {
        let locations = [
            Location::Interior,
            Location::Boundary,
            Location::Exterior,
        ];
        for (i, cell) in self.cells.iter().enumerate() {
            let row = locations[i / 3];
            let col = locations[i % 3];
            if !cell.matches(matrix.get(row, col)) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_at_least_never_lowers_a_cell() {
        let mut m = IntersectionMatrix::empty();
        m.set(Location::Interior, Location::Interior, Dimensions::TwoDimensional);
        m.set_at_least(Location::Interior, Location::Interior, Dimensions::ZeroDimensional);
        assert_eq!(
            m.get(Location::Interior, Location::Interior),
            Dimensions::TwoDimensional
        );
    }

    #[test]
    fn to_string_round_trips_through_pattern() {
        let mut m = IntersectionMatrix::empty();
        m.set_at_least_from_string("0F1FF0102").unwrap();
        assert_eq!(m.to_string(), "0F1FF0102");
    }

    #[test]
    fn pattern_t_matches_any_nonempty() {
        let pattern = Pattern::compile("T********").unwrap();
        let mut m = IntersectionMatrix::empty();
        assert!(!pattern.matches(&m));
        m.set(Location::Interior, Location::Interior, Dimensions::ZeroDimensional);
        assert!(pattern.matches(&m));
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let mut m = IntersectionMatrix::empty();
        m.set(Location::Interior, Location::Boundary, Dimensions::OneDimensional);
        let t = m.transpose();
        assert_eq!(t.get(Location::Boundary, Location::Interior), Dimensions::OneDimensional);
    }

    #[test]
    fn rejects_wrong_length_pattern() {
        assert!(Pattern::compile("T*F").is_err());
    }
}
