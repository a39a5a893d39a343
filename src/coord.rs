// This file is part of the arbiter library.
// Copyright (C) 2026 The arbiter developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Square addressing.
//!
//! A [`Coord`] is a `(row, col)` pair. Row 0 is the eighth rank (black's
//! back rank), row 7 the first rank. Column 0 is the a-file.
//!
//! # Examples
//!
//! ```
//! use arbiter::Coord;
//!
//! let e4: Coord = "E4".parse()?;
//! assert_eq!(e4, Coord::E4);
//! assert_eq!((e4.row(), e4.col()), (4, 4));
//! assert_eq!(e4.to_string(), "e4");
//! # Ok::<_, arbiter::ParseCoordError>(())
//! ```

use std::{error::Error, fmt, hash, str::FromStr};

/// A square on the 8x8 grid.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Gets the square at `row` and `col`, or `None` if either is out of
    /// the range `0..8`.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Coord> {
        if row < 8 && col < 8 {
            Some(Coord { row, col })
        } else {
            None
        }
    }

    #[inline]
    pub(crate) const fn new_unchecked(row: u8, col: u8) -> Coord {
        debug_assert!(row < 8 && col < 8);
        Coord { row, col }
    }

    /// Like [`Coord::new()`], but for signed arithmetic results.
    #[inline]
    pub fn from_signed(row: i32, col: i32) -> Option<Coord> {
        match (u8::try_from(row), u8::try_from(col)) {
            (Ok(row), Ok(col)) => Coord::new(row, col),
            _ => None,
        }
    }

    /// Gets the square with the given index in `0..64`, counting row by row
    /// from a8.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Coord> {
        if index < 64 {
            Some(Coord::new_unchecked((index / 8) as u8, (index % 8) as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Index in `0..64`, counting row by row from a8.
    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    /// Steps by the given row and column deltas, or `None` when leaving
    /// the board.
    #[inline]
    pub fn offset(self, drow: i8, dcol: i8) -> Option<Coord> {
        Coord::from_signed(
            i32::from(self.row) + i32::from(drow),
            i32::from(self.col) + i32::from(dcol),
        )
    }

    /// Dark squares are those with an odd `row + col` (a8 is light).
    #[inline]
    pub const fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// Tests if both squares have the same color.
    #[inline]
    pub const fn is_same_shade(self, other: Coord) -> bool {
        self.is_dark() == other.is_dark()
    }

    /// File letter, `a` to `h`.
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    /// Rank digit, `1` to `8`.
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'8' - self.row) as char
    }

    /// Parses a square name like `e4`, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`ParseCoordError`] if `s` is not exactly a file letter
    /// followed by a rank digit.
    pub fn from_ascii(s: &[u8]) -> Result<Coord, ParseCoordError> {
        match *s {
            [file, rank] => {
                let file = file.to_ascii_lowercase();
                if (b'a'..=b'h').contains(&file) && (b'1'..=b'8').contains(&rank) {
                    Ok(Coord::new_unchecked(b'8' - rank, file - b'a'))
                } else {
                    Err(ParseCoordError)
                }
            }
            _ => Err(ParseCoordError),
        }
    }

    /// All 64 squares, row by row from a8.
    pub fn all() -> impl DoubleEndedIterator<Item = Coord> + ExactSizeIterator {
        (0..64).map(|index| Coord::new_unchecked(index / 8, index % 8))
    }

    /// Distance in king steps.
    pub fn distance(self, other: Coord) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    pub const A8: Coord = Coord::new_unchecked(0, 0);
    pub const B8: Coord = Coord::new_unchecked(0, 1);
    pub const C8: Coord = Coord::new_unchecked(0, 2);
    pub const D8: Coord = Coord::new_unchecked(0, 3);
    pub const E8: Coord = Coord::new_unchecked(0, 4);
    pub const F8: Coord = Coord::new_unchecked(0, 5);
    pub const G8: Coord = Coord::new_unchecked(0, 6);
    pub const H8: Coord = Coord::new_unchecked(0, 7);
    pub const A7: Coord = Coord::new_unchecked(1, 0);
    pub const B7: Coord = Coord::new_unchecked(1, 1);
    pub const C7: Coord = Coord::new_unchecked(1, 2);
    pub const D7: Coord = Coord::new_unchecked(1, 3);
    pub const E7: Coord = Coord::new_unchecked(1, 4);
    pub const F7: Coord = Coord::new_unchecked(1, 5);
    pub const G7: Coord = Coord::new_unchecked(1, 6);
    pub const H7: Coord = Coord::new_unchecked(1, 7);
    pub const A6: Coord = Coord::new_unchecked(2, 0);
    pub const B6: Coord = Coord::new_unchecked(2, 1);
    pub const C6: Coord = Coord::new_unchecked(2, 2);
    pub const D6: Coord = Coord::new_unchecked(2, 3);
    pub const E6: Coord = Coord::new_unchecked(2, 4);
    pub const F6: Coord = Coord::new_unchecked(2, 5);
    pub const G6: Coord = Coord::new_unchecked(2, 6);
    pub const H6: Coord = Coord::new_unchecked(2, 7);
    pub const A5: Coord = Coord::new_unchecked(3, 0);
    pub const B5: Coord = Coord::new_unchecked(3, 1);
    pub const C5: Coord = Coord::new_unchecked(3, 2);
    pub const D5: Coord = Coord::new_unchecked(3, 3);
    pub const E5: Coord = Coord::new_unchecked(3, 4);
    pub const F5: Coord = Coord::new_unchecked(3, 5);
    pub const G5: Coord = Coord::new_unchecked(3, 6);
    pub const H5: Coord = Coord::new_unchecked(3, 7);
    pub const A4: Coord = Coord::new_unchecked(4, 0);
    pub const B4: Coord = Coord::new_unchecked(4, 1);
    pub const C4: Coord = Coord::new_unchecked(4, 2);
    pub const D4: Coord = Coord::new_unchecked(4, 3);
    pub const E4: Coord = Coord::new_unchecked(4, 4);
    pub const F4: Coord = Coord::new_unchecked(4, 5);
    pub const G4: Coord = Coord::new_unchecked(4, 6);
    pub const H4: Coord = Coord::new_unchecked(4, 7);
    pub const A3: Coord = Coord::new_unchecked(5, 0);
    pub const B3: Coord = Coord::new_unchecked(5, 1);
    pub const C3: Coord = Coord::new_unchecked(5, 2);
    pub const D3: Coord = Coord::new_unchecked(5, 3);
    pub const E3: Coord = Coord::new_unchecked(5, 4);
    pub const F3: Coord = Coord::new_unchecked(5, 5);
    pub const G3: Coord = Coord::new_unchecked(5, 6);
    pub const H3: Coord = Coord::new_unchecked(5, 7);
    pub const A2: Coord = Coord::new_unchecked(6, 0);
    pub const B2: Coord = Coord::new_unchecked(6, 1);
    pub const C2: Coord = Coord::new_unchecked(6, 2);
    pub const D2: Coord = Coord::new_unchecked(6, 3);
    pub const E2: Coord = Coord::new_unchecked(6, 4);
    pub const F2: Coord = Coord::new_unchecked(6, 5);
    pub const G2: Coord = Coord::new_unchecked(6, 6);
    pub const H2: Coord = Coord::new_unchecked(6, 7);
    pub const A1: Coord = Coord::new_unchecked(7, 0);
    pub const B1: Coord = Coord::new_unchecked(7, 1);
    pub const C1: Coord = Coord::new_unchecked(7, 2);
    pub const D1: Coord = Coord::new_unchecked(7, 3);
    pub const E1: Coord = Coord::new_unchecked(7, 4);
    pub const F1: Coord = Coord::new_unchecked(7, 5);
    pub const G1: Coord = Coord::new_unchecked(7, 6);
    pub const H1: Coord = Coord::new_unchecked(7, 7);
}

impl hash::Hash for Coord {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        state.write_u8(self.index() as u8);
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.file_char().to_ascii_uppercase(),
            self.rank_char()
        )
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseCoordError;

impl fmt::Display for ParseCoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseCoordError {}

impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Coord, ParseCoordError> {
        Coord::from_ascii(s.as_bytes())
    }
}

impl TryFrom<&str> for Coord {
    type Error = ParseCoordError;

    fn try_from(s: &str) -> Result<Coord, ParseCoordError> {
        s.parse()
    }
}

/// Error when a `(row, col)` pair is outside the board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CoordOutOfBounds;

impl fmt::Display for CoordOutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("row or column out of range 0..8")
    }
}

impl Error for CoordOutOfBounds {}

impl TryFrom<(i32, i32)> for Coord {
    type Error = CoordOutOfBounds;

    fn try_from((row, col): (i32, i32)) -> Result<Coord, CoordOutOfBounds> {
        Coord::from_signed(row, col).ok_or(CoordOutOfBounds)
    }
}

impl From<Coord> for (u8, u8) {
    fn from(coord: Coord) -> (u8, u8) {
        (coord.row, coord.col)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Coord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Coord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct CoordVisitor;

        impl serde::de::Visitor<'_> for CoordVisitor {
            type Value = Coord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("square name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Coord, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(CoordVisitor)
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Coord {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Coord> {
        Ok(Coord::new_unchecked(
            u.int_in_range(0..=7)?,
            u.int_in_range(0..=7)?,
        ))
    }

    fn size_hint(_depth: usize) -> (usize, Option<usize>) {
        (2, Some(2))
    }
}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Coord {}
