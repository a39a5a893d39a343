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

use std::fmt::{self, Write as _};

use crate::{castling_side::CastlingSide, coord::Coord, role::Role, unit::UnitId};

/// Information about a move.
///
/// The moving and captured units are named by [`UnitId`], so a move
/// generated on one [`Chess`](crate::Chess) can be checked against any
/// clone of it with [`Chess::is_legal()`](crate::Chess::is_legal).
///
/// # Display
///
/// `Move` implements [`Display`](fmt::Display) using long algebraic
/// notation, e.g. `Ng1-f3`, `e5xd6` or `e7-e8=Q`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    /// The acting unit.
    pub unit: UnitId,
    /// Role of the acting unit before the move.
    pub role: Role,
    pub from: Coord,
    pub to: Coord,
    /// The captured unit. For en passant it does not stand on `to`.
    pub capture: Option<UnitId>,
    pub promotion: Option<Role>,
}

impl Move {
    /// Checks if the move is a capture.
    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// Checks if the move resets the fifty-move counter.
    #[inline]
    pub const fn is_zeroing(&self) -> bool {
        self.is_capture() || matches!(self.role, Role::Pawn)
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Gets the castling side if this is a king move spanning two files.
    pub const fn castling_side(&self) -> Option<CastlingSide> {
        match self.role {
            Role::King => CastlingSide::from_king_move(self.from.col(), self.to.col()),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_castle(&self) -> bool {
        self.castling_side().is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(side) = self.castling_side() {
            return fmt::Display::fmt(&side, f);
        }

        if self.role != Role::Pawn {
            f.write_char(self.role.upper_char())?;
        }

        write!(
            f,
            "{}{}{}",
            self.from,
            if self.is_capture() { 'x' } else { '-' },
            self.to
        )?;

        if let Some(p) = self.promotion {
            write!(f, "={}", p.upper_char())?;
        }

        Ok(())
    }
}

/// Moves of one or more units, in generation order.
pub type MoveList = Vec<Move>;
