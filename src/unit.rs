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

//! Units: the physical pieces a [`Board`](crate::Board) creates and tracks.
//!
//! Every unit carries a [`UnitId`] assigned once, at creation, and never
//! reused. Identity survives capture (the unit stays in the roster with no
//! square) and promotion (the pawn's [`Kind`] is replaced, the id is kept).
//! Moves refer to units by id, which is what makes a move computed on one
//! board meaningful on any clone of it.

use std::fmt;

use crate::{color::Color, coord::Coord, role::Role, types::Piece};

/// Stable numeric identity of a unit.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct UnitId(pub u32);

impl UnitId {
    /// Position of the unit in its board's roster.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for UnitId {}

/// Movement pattern of a unit, with the state only that pattern needs.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Kind {
    Pawn {
        /// The last move of this pawn was a double step, and the reply
        /// may capture it en passant.
        just_leaped: bool,
    },
    Knight,
    Bishop,
    Rook {
        has_moved: bool,
    },
    Queen,
    King {
        has_moved: bool,
    },
}

impl Kind {
    /// A kind for a unit that has not moved yet.
    pub const fn fresh(role: Role) -> Kind {
        match role {
            Role::Pawn => Kind::Pawn { just_leaped: false },
            Role::Knight => Kind::Knight,
            Role::Bishop => Kind::Bishop,
            Role::Rook => Kind::Rook { has_moved: false },
            Role::Queen => Kind::Queen,
            Role::King => Kind::King { has_moved: false },
        }
    }

    pub const fn role(self) -> Role {
        match self {
            Kind::Pawn { .. } => Role::Pawn,
            Kind::Knight => Role::Knight,
            Kind::Bishop => Role::Bishop,
            Kind::Rook { .. } => Role::Rook,
            Kind::Queen => Role::Queen,
            Kind::King { .. } => Role::King,
        }
    }

    /// `true` for rooks and kings that have moved. Other kinds do not
    /// track it.
    pub const fn has_moved(self) -> bool {
        matches!(
            self,
            Kind::Rook { has_moved: true } | Kind::King { has_moved: true }
        )
    }

    pub const fn just_leaped(self) -> bool {
        matches!(self, Kind::Pawn { just_leaped: true })
    }
}

/// One physical piece, on the board or captured.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Unit {
    id: UnitId,
    color: Color,
    kind: Kind,
    square: Option<Coord>,
}

impl Unit {
    pub(crate) const fn new(id: UnitId, piece: Piece, square: Coord) -> Unit {
        Unit {
            id,
            color: piece.color,
            kind: Kind::fresh(piece.role),
            square: Some(square),
        }
    }

    #[inline]
    pub const fn id(&self) -> UnitId {
        self.id
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub const fn role(&self) -> Role {
        self.kind.role()
    }

    #[inline]
    pub const fn piece(&self) -> Piece {
        self.role().of(self.color)
    }

    /// The current square, or `None` once captured.
    #[inline]
    pub const fn square(&self) -> Option<Coord> {
        self.square
    }

    #[inline]
    pub const fn is_live(&self) -> bool {
        self.square.is_some()
    }

    pub(crate) fn set_square(&mut self, square: Option<Coord>) {
        self.square = square;
    }

    /// Updates the movement flags after this unit moved `from` → `to`.
    pub(crate) fn mark_moved(&mut self, from: Coord, to: Coord) {
        self.kind = match self.kind {
            Kind::Pawn { .. } => Kind::Pawn {
                just_leaped: from.row().abs_diff(to.row()) == 2,
            },
            Kind::Rook { .. } => Kind::Rook { has_moved: true },
            Kind::King { .. } => Kind::King { has_moved: true },
            kind => kind,
        };
    }

    pub(crate) fn clear_just_leaped(&mut self) {
        if let Kind::Pawn { just_leaped } = &mut self.kind {
            *just_leaped = false;
        }
    }

    /// Replaces the movement pattern, keeping identity, color and square.
    pub(crate) fn promote(&mut self, role: Role) {
        self.kind = Kind::fresh(role);
    }
}
