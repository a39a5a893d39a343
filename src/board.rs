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

use crate::{
    color::Color,
    coord::Coord,
    m::{Move, MoveList},
    movegen::{self, Castling, UnitMoves},
    role::Role,
    types::Piece,
    unit::{Unit, UnitId},
};

const BACKRANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// Piece positions on a board, backed by a roster of [`Unit`]s.
///
/// The grid maps each square to at most one live unit. The roster holds
/// every unit ever created, captured ones included, indexed by [`UnitId`].
/// A unit's recorded square and the grid always agree.
///
/// Cloning a board is a deep copy. Moves refer to units by id, so a move
/// can be committed on any clone of the board it was generated on.
///
/// # Examples
///
/// ```
/// use arbiter::{Board, Color, Coord};
///
/// let board = Board::default();
/// assert_eq!(board.piece_at(Coord::E1), Some(Color::White.king()));
/// assert_eq!(board.piece_at(Coord::E5), None);
/// assert_eq!(board.units().len(), 32);
///
/// // r n b q k b n r
/// // p p p p p p p p
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // P P P P P P P P
/// // R N B Q K B N R
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    grid: [Option<UnitId>; 64],
    roster: Vec<Unit>,
}

impl Board {
    /// A board without any units.
    pub const fn empty() -> Board {
        Board {
            grid: [None; 64],
            roster: Vec::new(),
        }
    }

    /// The standard starting layout.
    ///
    /// Units are created square by square from a8, so black owns ids 0 to
    /// 15 and white owns ids 16 to 31.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for sq in Coord::all() {
            if let Some(piece) = Board::standard_piece(sq) {
                board.spawn(piece, sq);
            }
        }
        board
    }

    /// The piece on `sq` in the standard starting layout.
    pub(crate) const fn standard_piece(sq: Coord) -> Option<Piece> {
        match sq.row() {
            0 => Some(BACKRANK[sq.col() as usize].of(Color::Black)),
            1 => Some(Color::Black.pawn()),
            6 => Some(Color::White.pawn()),
            7 => Some(BACKRANK[sq.col() as usize].of(Color::White)),
            _ => None,
        }
    }

    /// Creates a fresh unit on `at` and returns its id.
    ///
    /// The square must be empty.
    pub(crate) fn spawn(&mut self, piece: Piece, at: Coord) -> UnitId {
        debug_assert!(self.grid[at.index()].is_none(), "spawn on occupied {at}");
        let id = UnitId(self.roster.len() as u32);
        self.roster.push(Unit::new(id, piece, at));
        self.grid[at.index()] = Some(id);
        id
    }

    /// Looks up a unit by id.
    ///
    /// # Panics
    ///
    /// Panics if the id was not issued by this board (or the board it
    /// was cloned from).
    #[inline]
    pub fn unit(&self, id: UnitId) -> &Unit {
        match self.roster.get(id.index()) {
            Some(unit) => unit,
            None => panic!("unit {id} not in roster of {} units", self.roster.len()),
        }
    }

    #[inline]
    pub fn get_unit(&self, id: UnitId) -> Option<&Unit> {
        self.roster.get(id.index())
    }

    fn unit_mut(&mut self, id: UnitId) -> &mut Unit {
        let len = self.roster.len();
        match self.roster.get_mut(id.index()) {
            Some(unit) => unit,
            None => panic!("unit {id} not in roster of {len} units"),
        }
    }

    /// The live unit on `sq`, if any.
    #[inline]
    pub fn unit_at(&self, sq: Coord) -> Option<&Unit> {
        self.grid[sq.index()].map(|id| self.unit(id))
    }

    #[inline]
    pub fn piece_at(&self, sq: Coord) -> Option<Piece> {
        self.unit_at(sq).map(Unit::piece)
    }

    /// All units in creation order, including captured ones.
    pub fn units(&self) -> &[Unit] {
        &self.roster
    }

    /// Units currently on the board, in creation order.
    pub fn live_units(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.roster.iter().filter(|unit| unit.is_live())
    }

    /// The first live king of `color` in creation order.
    pub fn king_of(&self, color: Color) -> Option<&Unit> {
        self.live_units()
            .find(|unit| unit.color() == color && unit.role() == Role::King)
    }

    /// Snapshot of the piece arrangement, ignoring identities and
    /// movement flags.
    pub fn signature(&self) -> Signature {
        let mut squares = [None; 64];
        for (slot, sq) in squares.iter_mut().zip(Coord::all()) {
            *slot = self.piece_at(sq);
        }
        Signature(squares)
    }

    /// Pseudo-legal moves of a unit. Empty for captured units.
    pub fn pseudo_moves(&self, id: UnitId, castling: Castling) -> UnitMoves {
        movegen::pseudo_moves(self, self.unit(id), castling)
    }

    /// Checks if any live enemy unit has a pseudo-legal move capturing
    /// the king of `color`. A side without a king is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        let Some(king) = self.king_of(color).map(Unit::id) else {
            return false;
        };
        self.live_units()
            .filter(|unit| unit.color() != color)
            .any(|unit| {
                movegen::pseudo_moves(self, unit, Castling::Excluded)
                    .iter()
                    .any(|m| m.capture == Some(king))
            })
    }

    /// Checks if committing `m` on a copy of this board leaves `color` in
    /// check. The board itself is not modified.
    pub fn leaves_in_check(&self, color: Color, m: &Move) -> bool {
        let mut probe = self.clone();
        probe.commit(m);
        probe.is_in_check(color)
    }

    /// Legal moves of a single unit.
    pub fn legal_moves_of_unit(&self, id: UnitId) -> UnitMoves {
        let color = self.unit(id).color();
        let mut moves = self.pseudo_moves(id, Castling::Included);
        moves.retain(|m| !self.leaves_in_check(color, m));
        moves
    }

    /// Legal moves of every live unit of `color`, in creation order.
    pub fn legal_moves(&self, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        for unit in self.live_units().filter(|unit| unit.color() == color) {
            moves.extend(self.legal_moves_of_unit(unit.id()));
        }
        moves
    }

    /// Like `!legal_moves(color).is_empty()`, but stops at the first
    /// legal move.
    pub fn has_legal_move(&self, color: Color) -> bool {
        self.live_units()
            .filter(|unit| unit.color() == color)
            .any(|unit| {
                self.pseudo_moves(unit.id(), Castling::Included)
                    .iter()
                    .any(|m| !self.leaves_in_check(color, m))
            })
    }

    /// Moves a unit without any legality checks.
    ///
    /// The captured unit, if still live, leaves the board first. Then the
    /// mover is relocated and its movement flags are updated. Castling
    /// rook relocation and promotion are separate steps.
    pub(crate) fn commit(&mut self, m: &Move) {
        if let Some(victim) = m.capture {
            if let Some(sq) = self.unit(victim).square() {
                self.grid[sq.index()] = None;
                self.unit_mut(victim).set_square(None);
            }
        }

        debug_assert_eq!(self.unit(m.unit).square(), Some(m.from), "mover not on {}", m.from);
        debug_assert!(
            self.grid[m.to.index()].is_none(),
            "{} is occupied by a unit that is not captured",
            m.to
        );

        self.grid[m.from.index()] = None;
        self.grid[m.to.index()] = Some(m.unit);
        let unit = self.unit_mut(m.unit);
        unit.set_square(Some(m.to));
        unit.mark_moved(m.from, m.to);
    }

    pub(crate) fn promote(&mut self, id: UnitId, role: Role) {
        self.unit_mut(id).promote(role);
    }

    pub(crate) fn clear_just_leaped(&mut self, id: UnitId) {
        self.unit_mut(id).clear_just_leaped();
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            for col in 0..8 {
                let sq = Coord::new_unchecked(row, col);
                f.write_char(self.piece_at(sq).map_or('.', Piece::char))?;
                f.write_char(if col < 7 { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

/// The piece arrangement of a [`Board`], used to detect repetitions.
///
/// Two boards have equal signatures if the same kinds of pieces of the
/// same colors stand on the same squares. Unit identities, movement flags
/// and the side to move do not matter.
///
/// # Display
///
/// 64 characters from a8 to h1, `-` for empty squares, uppercase for
/// white pieces and lowercase for black.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Signature([Option<Piece>; 64]);

impl Signature {
    pub fn piece_at(&self, sq: Coord) -> Option<Piece> {
        self.0[sq.index()]
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for piece in &self.0 {
            f.write_char(piece.map_or('-', Piece::char))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout() {
        let board = Board::new();
        assert_eq!(board.unit(UnitId(0)).piece(), Color::Black.rook());
        assert_eq!(board.unit(UnitId(4)).square(), Some(Coord::E8));
        assert_eq!(board.unit(UnitId(16)).piece(), Color::White.pawn());
        assert_eq!(board.unit(UnitId(28)).piece(), Color::White.king());
        assert_eq!(board.king_of(Color::White).map(Unit::id), Some(UnitId(28)));
        assert!(board.units()[..16].iter().all(|u| u.color() == Color::Black));
        assert!(board.units()[16..].iter().all(|u| u.color() == Color::White));
    }

    #[test]
    fn test_debug_grid() {
        let board = Board::new();
        let expected = "r n b q k b n r\n\
                        p p p p p p p p\n\
                        . . . . . . . .\n\
                        . . . . . . . .\n\
                        . . . . . . . .\n\
                        . . . . . . . .\n\
                        P P P P P P P P\n\
                        R N B Q K B N R\n";
        assert_eq!(format!("{board:?}"), expected);
    }

    #[test]
    fn test_signature() {
        let board = Board::new();
        assert_eq!(
            board.signature().to_string(),
            "rnbqkbnrpppppppp--------------------------------PPPPPPPPRNBQKBNR"
        );

        let mut other = Board::empty();
        other.spawn(Color::White.king(), Coord::H1);
        assert_ne!(board.signature(), other.signature());
        assert_eq!(other.signature().piece_at(Coord::H1), Some(Color::White.king()));
    }

    #[test]
    fn test_commit_capture() {
        let mut board = Board::empty();
        let rook = board.spawn(Color::White.rook(), Coord::A1);
        let knight = board.spawn(Color::Black.knight(), Coord::A6);
        let m = board
            .pseudo_moves(rook, Castling::Included)
            .into_iter()
            .find(|m| m.to == Coord::A6)
            .unwrap();
        assert_eq!(m.capture, Some(knight));

        board.commit(&m);
        assert_eq!(board.unit(knight).square(), None);
        assert_eq!(board.unit_at(Coord::A6).map(Unit::id), Some(rook));
        assert_eq!(board.unit_at(Coord::A1), None);
        assert!(board.unit(rook).kind().has_moved());
        assert_eq!(board.live_units().count(), 1);
        assert_eq!(board.units().len(), 2);
    }

    #[test]
    fn test_check_and_pins() {
        let mut board = Board::empty();
        board.spawn(Color::White.king(), Coord::E1);
        let bishop = board.spawn(Color::White.bishop(), Coord::E2);
        board.spawn(Color::Black.rook(), Coord::E8);
        assert!(!board.is_in_check(Color::White));
        assert!(!board.is_in_check(Color::Black));

        // the bishop is pinned
        assert!(board.legal_moves_of_unit(bishop).is_empty());
        assert!(board
            .legal_moves(Color::White)
            .iter()
            .all(|m| m.role == Role::King));

        let mut probe = board.clone();
        let escape = probe.pseudo_moves(bishop, Castling::Included)[0];
        probe.commit(&escape);
        assert!(probe.is_in_check(Color::White));
        assert!(!board.is_in_check(Color::White));
    }

    #[test]
    fn test_no_king_no_check() {
        let mut board = Board::empty();
        board.spawn(Color::Black.queen(), Coord::D8);
        board.spawn(Color::White.rook(), Coord::D1);
        assert!(!board.is_in_check(Color::White));
        assert!(!board.is_in_check(Color::Black));
    }

    #[test]
    #[should_panic]
    fn test_unknown_unit() {
        Board::empty().unit(UnitId(3));
    }
}
