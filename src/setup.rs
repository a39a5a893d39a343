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

//! Custom starting positions.
//!
//! A [`Setup`] is a plain list of [`Placement`]s plus the side to move and
//! the [`TurnMode`]. It is not validated until it is turned into a
//! [`Chess`](crate::Chess) with [`Chess::from_setup()`](crate::Chess::from_setup).
//!
//! # Examples
//!
//! ```
//! use arbiter::{Chess, Color, Coord, Setup};
//!
//! let setup: Setup = "white king e1; white rook h1; black king e8".parse()?;
//! assert_eq!(setup.placements.len(), 3);
//!
//! let pos = Chess::from_setup(&setup)?;
//! assert_eq!(pos.piece_at(Coord::H1), Some(Color::White.rook()));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{
    board::Board,
    color::Color,
    coord::Coord,
    position::TurnMode,
    role::Role,
    types::Piece,
};

/// A piece to be put on a square.
///
/// # Display
///
/// `white rook d3`. Parsing accepts the same form in any ASCII case.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Placement {
    pub piece: Piece,
    pub at: Coord,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.piece, self.at)
    }
}

/// Error when parsing a [`Placement`] or [`Setup`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum ParsePlacementError {
    /// Not of the form `<color> <piece> <square>`.
    InvalidFormat,
    InvalidColor,
    InvalidRole,
    InvalidCoord,
}

impl fmt::Display for ParsePlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParsePlacementError::InvalidFormat => "expected <color> <piece> <square>",
            ParsePlacementError::InvalidColor => "invalid color in placement",
            ParsePlacementError::InvalidRole => "invalid piece type in placement",
            ParsePlacementError::InvalidCoord => "invalid square in placement",
        })
    }
}

impl Error for ParsePlacementError {}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Placement, ParsePlacementError> {
        let mut words = s.split_ascii_whitespace();
        let (Some(color), Some(role), Some(at), None) =
            (words.next(), words.next(), words.next(), words.next())
        else {
            return Err(ParsePlacementError::InvalidFormat);
        };

        let color: Color = color
            .parse()
            .map_err(|_| ParsePlacementError::InvalidColor)?;
        let role: Role = role.parse().map_err(|_| ParsePlacementError::InvalidRole)?;
        let at: Coord = at.parse().map_err(|_| ParsePlacementError::InvalidCoord)?;

        Ok(Placement {
            piece: role.of(color),
            at,
        })
    }
}

/// A not necessarily legal arrangement of pieces.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Setup {
    /// Pieces in the order their units are created.
    pub placements: Vec<Placement>,
    /// The side to move.
    pub turn: Color,
    pub turn_mode: TurnMode,
}

impl Setup {
    /// No pieces, white to move, turns enforced.
    pub const fn empty() -> Setup {
        Setup {
            placements: Vec::new(),
            turn: Color::White,
            turn_mode: TurnMode::Enforced,
        }
    }

    /// Appends a placement.
    pub fn place(&mut self, piece: Piece, at: Coord) -> &mut Setup {
        self.placements.push(Placement { piece, at });
        self
    }

    /// The piece placed on `sq`, if any. With duplicate placements the
    /// first one wins.
    pub fn piece_at(&self, sq: Coord) -> Option<Piece> {
        self.placements
            .iter()
            .find(|placement| placement.at == sq)
            .map(|placement| placement.piece)
    }
}

impl Default for Setup {
    /// The standard starting position.
    fn default() -> Setup {
        Setup {
            placements: Coord::all()
                .filter_map(|at| Board::standard_piece(at).map(|piece| Placement { piece, at }))
                .collect(),
            ..Setup::empty()
        }
    }
}

impl FromStr for Setup {
    type Err = ParsePlacementError;

    /// Parses placements separated by `;`, e.g.
    /// `white king e1; black king e8`. Blank entries are skipped. The
    /// result has white to move with turns enforced.
    fn from_str(s: &str) -> Result<Setup, ParsePlacementError> {
        let mut setup = Setup::empty();
        for entry in s.split(';').filter(|entry| !entry.trim().is_empty()) {
            setup.placements.push(entry.parse()?);
        }
        Ok(setup)
    }
}

impl fmt::Display for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, placement) in self.placements.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            fmt::Display::fmt(placement, f)?;
        }
        Ok(())
    }
}

/// Error when a [`Setup`] cannot be turned into a position.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum SetupError {
    /// More than one piece was placed on this square.
    Occupied(Coord),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Occupied(sq) => write!(f, "more than one piece placed on {sq}"),
        }
    }
}

impl Error for SetupError {}
