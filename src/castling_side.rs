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

use std::fmt;

/// The column a king must stand on to castle.
pub const KING_HOME_COL: u8 = 4;

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    #[inline]
    pub const fn is_queen_side(self) -> bool {
        matches!(self, CastlingSide::QueenSide)
    }

    #[inline]
    pub const fn from_king_side(king_side: bool) -> CastlingSide {
        if king_side {
            CastlingSide::KingSide
        } else {
            CastlingSide::QueenSide
        }
    }

    /// Recognizes a castling king move from its origin and destination
    /// columns: any king move spanning two files.
    pub const fn from_king_move(from_col: u8, to_col: u8) -> Option<CastlingSide> {
        if from_col.abs_diff(to_col) == 2 {
            Some(CastlingSide::from_king_side(to_col > from_col))
        } else {
            None
        }
    }

    /// Corner the castling rook starts from.
    pub const fn rook_from_col(self) -> u8 {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 0,
        }
    }

    pub const fn king_to_col(self) -> u8 {
        match self {
            CastlingSide::KingSide => 6,
            CastlingSide::QueenSide => 2,
        }
    }

    /// Where the rook lands: next to the king, on the side it came from.
    /// This is also the square the king passes through.
    pub const fn rook_to_col(self) -> u8 {
        match self {
            CastlingSide::KingSide => 5,
            CastlingSide::QueenSide => 3,
        }
    }

    /// Columns strictly between the king and the rook.
    pub const fn between_cols(self) -> &'static [u8] {
        match self {
            CastlingSide::KingSide => &[5, 6],
            CastlingSide::QueenSide => &[3, 2, 1],
        }
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

impl fmt::Display for CastlingSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CastlingSide::KingSide => "O-O",
            CastlingSide::QueenSide => "O-O-O",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry() {
        for side in CastlingSide::ALL {
            let (king_to, rook_to) = (side.king_to_col(), side.rook_to_col());
            assert_eq!(king_to.abs_diff(rook_to), 1);
            assert_eq!(king_to.abs_diff(KING_HOME_COL), 2);
            assert!(side.between_cols().contains(&king_to));
            assert!(side.between_cols().contains(&rook_to));
            assert_eq!(side.rook_from_col() == 0, side.is_queen_side());
            assert_eq!(
                CastlingSide::from_king_move(KING_HOME_COL, king_to),
                Some(side)
            );
        }
        assert_eq!(CastlingSide::from_king_move(4, 5), None);
    }
}
