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

use std::{error::Error, fmt};

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use crate::{
    board::{Board, Signature},
    color::{ByColor, Color},
    coord::Coord,
    m::{Move, MoveList},
    movegen::Castling,
    role::Role,
    setup::{Setup, SetupError},
    types::Piece,
};

/// Whether [`Chess::apply()`] insists on alternating colors.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum TurnMode {
    /// Only the side to move may move.
    #[default]
    Enforced,
    /// Either side may move at any time. The turn still flips after each
    /// ply, so termination is evaluated for the opponent of the mover.
    Free,
}

impl TurnMode {
    pub const fn is_enforced(self) -> bool {
        matches!(self, TurnMode::Enforced)
    }
}

/// Reason for a drawn game.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Draw {
    Stalemate,
    InsufficientMaterial,
    ThreefoldRepetition,
    FiftyMoves,
}

impl fmt::Display for Draw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Draw::Stalemate => "stalemate",
            Draw::InsufficientMaterial => "insufficient material",
            Draw::ThreefoldRepetition => "threefold repetition",
            Draw::FiftyMoves => "fifty-move rule",
        })
    }
}

/// Outcome of a finished game.
///
/// # Display
///
/// `1-0`, `0-1` or `1/2-1/2`, like in PGN.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Outcome {
    Decisive { winner: Color },
    Draw(Draw),
}

impl Outcome {
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Decisive { winner } => Some(winner),
            Outcome::Draw(_) => None,
        }
    }

    pub const fn is_draw(self) -> bool {
        matches!(self, Outcome::Draw(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Outcome::Decisive {
                winner: Color::White,
            } => "1-0",
            Outcome::Decisive {
                winner: Color::Black,
            } => "0-1",
            Outcome::Draw(_) => "1/2-1/2",
        })
    }
}

/// Error when trying to play an illegal move.
///
/// The position is left unchanged.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum PlayError {
    /// Origin or destination is off the board.
    InvalidSquare,
    /// There is no unit on the origin.
    EmptySquare,
    /// The unit on the origin does not belong to the side to move.
    WrongTurn,
    /// The unit cannot legally go there (with that promotion).
    IllegalMove,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlayError::InvalidSquare => "square out of bounds",
            PlayError::EmptySquare => "no piece on origin square",
            PlayError::WrongTurn => "not this color's turn",
            PlayError::IllegalMove => "illegal move",
        })
    }
}

impl Error for PlayError {}

/// A game of chess: a [`Board`], the side to move, and everything needed
/// to decide how the game ends.
///
/// Cloning is cheap enough to simulate lines of play: a clone shares no
/// state with the original.
///
/// # Examples
///
/// ```
/// use arbiter::{Chess, Color, Coord, PlayError};
///
/// let mut pos = Chess::default();
/// pos.apply("e2", "e4", None)?;
/// assert_eq!(pos.turn(), Color::Black);
/// assert_eq!(pos.piece_at(Coord::E4), Some(Color::White.pawn()));
///
/// assert_eq!(pos.apply("e4", "e5", None), Err(PlayError::WrongTurn));
/// # Ok::<_, PlayError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Chess {
    board: Board,
    turn: Color,
    turn_mode: TurnMode,
    history: Vec<Move>,
    repetitions: Vec<Signature>,
    halfmoves: u32,
    outcome: Option<Outcome>,
}

impl Default for Chess {
    fn default() -> Chess {
        Chess::from_board(Board::new(), Color::White, TurnMode::Enforced)
    }
}

impl Chess {
    fn from_board(board: Board, turn: Color, turn_mode: TurnMode) -> Chess {
        Chess {
            board,
            turn,
            turn_mode,
            history: Vec::new(),
            repetitions: Vec::new(),
            halfmoves: 0,
            outcome: None,
        }
    }

    /// Builds a position from a custom arrangement.
    ///
    /// Units are created in placement order. No termination check is done,
    /// call [`Chess::evaluate()`] to classify the position.
    ///
    /// # Errors
    ///
    /// Fails if two placements share a square.
    pub fn from_setup(setup: &Setup) -> Result<Chess, SetupError> {
        let mut board = Board::empty();
        for placement in &setup.placements {
            if board.unit_at(placement.at).is_some() {
                return Err(SetupError::Occupied(placement.at));
            }
            board.spawn(placement.piece, placement.at);
        }
        Ok(Chess::from_board(board, setup.turn, setup.turn_mode))
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn turn_mode(&self) -> TurnMode {
        self.turn_mode
    }

    /// Plies played so far, oldest first. Castling is a single king move.
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Signatures recorded by the termination evaluator.
    #[inline]
    pub fn repetitions(&self) -> &[Signature] {
        &self.repetitions
    }

    /// The fifty-move counter. `1` after a capture or pawn move, then
    /// counting up by one with each evaluated ply.
    #[inline]
    pub fn halfmove_counter(&self) -> u32 {
        self.halfmoves
    }

    /// The result of the game, or `None` while it is still in progress.
    ///
    /// Once set, the outcome never goes back to `None`.
    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[inline]
    pub fn piece_at(&self, sq: Coord) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    /// Legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        self.board.legal_moves(self.turn)
    }

    /// Legal moves for `color`, regardless of whose turn it is.
    pub fn legal_moves_of(&self, color: Color) -> MoveList {
        self.board.legal_moves(color)
    }

    /// Tests a move for legality, for the color of the unit it names.
    ///
    /// Moves are matched by unit identity, so a move generated on a clone
    /// of this position can be checked here.
    pub fn is_legal(&self, m: &Move) -> bool {
        let Some(unit) = self.board.get_unit(m.unit) else {
            return false;
        };
        unit.is_live()
            && self
                .board
                .pseudo_moves(m.unit, Castling::Included)
                .contains(m)
            && !self.board.leaves_in_check(unit.color(), m)
    }

    /// Drops all moves that are not legal here.
    pub fn retain_legal(&self, moves: &mut MoveList) {
        moves.retain(|m| self.is_legal(m));
    }

    /// Checks if `color` is in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.board.is_in_check(color)
    }

    /// Checks if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.is_in_check(self.turn)
    }

    /// Checks if the side to move is checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.board.has_legal_move(self.turn)
    }

    /// Checks if the side to move has no legal move but is not in check.
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.board.has_legal_move(self.turn)
    }

    /// Checks if neither side can possibly win: king against king,
    /// king and a single minor piece against king, or king and bishop
    /// against king and bishop with both bishops on the same square color.
    pub fn has_insufficient_material(&self) -> bool {
        let mut kings = ByColor::<u32>::default();
        let mut others = ArrayVec::<(Piece, Coord), 2>::new();

        for unit in self.board.live_units() {
            let Some(sq) = unit.square() else {
                continue;
            };
            if unit.role() == Role::King {
                *kings.get_mut(unit.color()) += 1;
            } else if others.try_push((unit.piece(), sq)).is_err() {
                return false;
            }
        }

        if !kings.all(|&count| count == 1) {
            return false;
        }

        match others[..] {
            [] => true,
            [(piece, _)] => piece.role.is_minor(),
            [(a, a_sq), (b, b_sq)] => {
                a.role == Role::Bishop
                    && b.role == Role::Bishop
                    && a.color != b.color
                    && a_sq.is_same_shade(b_sq)
            }
            _ => false,
        }
    }

    /// Plays a move given by its origin and destination.
    ///
    /// Squares can be given as [`Coord`], as algebraic text like `"e2"`,
    /// or as a `(row, col)` pair. `promotion` selects the piece for a pawn
    /// reaching the last rank and must be `None` otherwise.
    ///
    /// On success the termination evaluator runs and may set
    /// [`Chess::outcome()`]. The outcome is not consulted: callers stop
    /// playing once the game is over.
    ///
    /// # Errors
    ///
    /// Checks, in this order, that both squares are on the board, that
    /// the origin holds a unit, that the unit belongs to the side to move
    /// (under [`TurnMode::Enforced`]), and that the move is legal. On error
    /// the position is unchanged.
    pub fn apply<C>(&mut self, from: C, to: C, promotion: Option<Role>) -> Result<(), PlayError>
    where
        C: TryInto<Coord>,
    {
        let (Ok(from), Ok(to)) = (from.try_into(), to.try_into()) else {
            trace!(reason = %PlayError::InvalidSquare, "rejected move");
            return Err(PlayError::InvalidSquare);
        };

        let m = match self.find_move(from, to, promotion) {
            Ok(m) => m,
            Err(err) => {
                trace!(%from, %to, ?promotion, reason = %err, "rejected move");
                return Err(err);
            }
        };

        self.commit_ply(&m);
        self.evaluate();
        self.expire_en_passant();
        Ok(())
    }

    fn find_move(&self, from: Coord, to: Coord, promotion: Option<Role>) -> Result<Move, PlayError> {
        let unit = self.board.unit_at(from).ok_or(PlayError::EmptySquare)?;
        if self.turn_mode.is_enforced() && unit.color() != self.turn {
            return Err(PlayError::WrongTurn);
        }
        self.board
            .legal_moves_of_unit(unit.id())
            .into_iter()
            .find(|m| m.to == to && m.promotion == promotion)
            .ok_or(PlayError::IllegalMove)
    }

    /// Plays a move without checking its legality and without running the
    /// termination evaluator.
    ///
    /// The castling rook, promotion, turn and en passant window are still
    /// handled. Outcome, repetitions and the fifty-move counter are left
    /// alone.
    ///
    /// The move must come from [`Chess::legal_moves()`] (or pass
    /// [`Chess::is_legal()`]) on this position, otherwise the board may end
    /// up in an inconsistent state.
    pub fn play_unchecked(&mut self, m: &Move) {
        self.commit_ply(m);
        self.expire_en_passant();
    }

    fn commit_ply(&mut self, m: &Move) {
        self.board.commit(m);
        self.history.push(*m);

        if let Some(side) = m.castling_side() {
            let row = m.from.row();
            let rook_from = Coord::new_unchecked(row, side.rook_from_col());
            let rook = self
                .board
                .unit_at(rook_from)
                .filter(|unit| unit.role() == Role::Rook)
                .map(|unit| unit.id());
            if let Some(rook) = rook {
                self.board.commit(&Move {
                    unit: rook,
                    role: Role::Rook,
                    from: rook_from,
                    to: Coord::new_unchecked(row, side.rook_to_col()),
                    capture: None,
                    promotion: None,
                });
            }
        }

        if let Some(role) = m.promotion {
            self.board.promote(m.unit, role);
        }

        self.turn = !self.turn;
        debug!(unit = %m.unit, mv = %m, turn = %self.turn, "committed ply");
    }

    /// A pawn that double-stepped can only be taken en passant on the
    /// immediate reply.
    fn expire_en_passant(&mut self) {
        if let Some(prev) = self.history.len().checked_sub(2).map(|i| self.history[i]) {
            if prev.role == Role::Pawn {
                self.board.clear_just_leaped(prev.unit);
            }
        }
    }

    /// Runs the termination checks for the side to move and returns the
    /// resulting outcome.
    ///
    /// Checkmate and stalemate are checked first, then insufficient
    /// material, then threefold repetition, then the fifty-move rule. A
    /// later rule that applies overrides an earlier one.
    ///
    /// Each call records the current signature (unless it already occurred
    /// twice) and advances the fifty-move counter, so it should run once
    /// per ply. [`Chess::apply()`] does that automatically.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbiter::{Chess, Color, Outcome};
    ///
    /// // black rooks on a1 and a2 deliver mate, black has just moved
    /// let setup = "black rook a1; black rook a2; white king h1".parse()?;
    /// let mut pos = Chess::from_setup(&setup)?;
    /// assert_eq!(pos.outcome(), None);
    /// assert_eq!(pos.evaluate(), Some(Outcome::Decisive { winner: Color::Black }));
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn evaluate(&mut self) -> Option<Outcome> {
        let before = self.outcome;
        let us = self.turn;

        if !self.board.has_legal_move(us) {
            self.outcome = Some(if self.board.is_in_check(us) {
                Outcome::Decisive { winner: !us }
            } else {
                Outcome::Draw(Draw::Stalemate)
            });
        }

        if self.has_insufficient_material() {
            self.outcome = Some(Outcome::Draw(Draw::InsufficientMaterial));
        }

        if self.record_repetition() {
            self.outcome = Some(Outcome::Draw(Draw::ThreefoldRepetition));
        }

        if self.advance_halfmoves() == 50 {
            self.outcome = Some(Outcome::Draw(Draw::FiftyMoves));
        }

        if before.is_none() {
            if let Some(outcome) = self.outcome {
                info!(%outcome, plies = self.history.len(), "game over");
            }
        }
        self.outcome
    }

    /// Records the current signature. Returns `true` if it had already
    /// occurred twice, in which case it is not recorded again.
    fn record_repetition(&mut self) -> bool {
        let current = self.board.signature();
        let seen = self.repetitions.iter().filter(|&sig| *sig == current).count();
        trace!(seen, "repetition signature");
        if seen >= 2 {
            true
        } else {
            self.repetitions.push(current);
            false
        }
    }

    fn advance_halfmoves(&mut self) -> u32 {
        self.halfmoves = match self.history.last() {
            Some(m) if !m.is_zeroing() => self.halfmoves + 1,
            _ => 1,
        };
        trace!(halfmoves = self.halfmoves, "fifty-move counter");
        self.halfmoves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{setup::Placement, unit::UnitId};

    fn setup(placements: &[(Piece, Coord)], turn: Color) -> Chess {
        let setup = Setup {
            placements: placements
                .iter()
                .map(|&(piece, at)| Placement { piece, at })
                .collect(),
            turn,
            turn_mode: TurnMode::Free,
        };
        Chess::from_setup(&setup).expect("valid setup")
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Decisive { winner: Color::White }.to_string(), "1-0");
        assert_eq!(Outcome::Decisive { winner: Color::Black }.to_string(), "0-1");
        assert_eq!(Outcome::Draw(Draw::FiftyMoves).to_string(), "1/2-1/2");
        assert_eq!(Draw::ThreefoldRepetition.to_string(), "threefold repetition");
    }

    #[test]
    fn test_default() {
        let pos = Chess::default();
        assert_eq!(pos.turn(), Color::White);
        assert_eq!(pos.turn_mode(), TurnMode::Enforced);
        assert_eq!(pos.legal_moves().len(), 20);
        assert_eq!(pos.legal_moves_of(Color::Black).len(), 20);
        assert!(!pos.is_check());
        assert!(!pos.is_checkmate());
        assert!(!pos.is_stalemate());
        assert!(!pos.has_insufficient_material());
        assert_eq!(pos.outcome(), None);
    }

    #[test]
    fn test_apply_errors_leave_position_unchanged() {
        let mut pos = Chess::default();
        let before = pos.clone();
        assert_eq!(pos.apply((6, 4), (8, 4), None), Err(PlayError::InvalidSquare));
        assert_eq!(pos.apply("e9", "e4", None), Err(PlayError::InvalidSquare));
        assert_eq!(pos.apply("e3", "e4", None), Err(PlayError::EmptySquare));
        assert_eq!(pos.apply("e7", "e5", None), Err(PlayError::WrongTurn));
        assert_eq!(pos.apply("e2", "e5", None), Err(PlayError::IllegalMove));
        assert_eq!(pos.apply("e2", "e4", Some(Role::Queen)), Err(PlayError::IllegalMove));
        assert_eq!(pos.board(), before.board());
        assert_eq!(pos.turn(), before.turn());
        assert!(pos.history().is_empty());
        assert!(pos.repetitions().is_empty());
    }

    #[test]
    fn test_apply_records_ply() {
        let mut pos = Chess::default();
        pos.apply(Coord::G1, Coord::F3, None).unwrap();
        assert_eq!(pos.history().len(), 1);
        assert_eq!(pos.history()[0].to_string(), "Ng1-f3");
        assert_eq!(pos.history()[0].unit, UnitId(30));
        assert_eq!(pos.halfmove_counter(), 1);
        assert_eq!(pos.repetitions().len(), 1);
        assert_eq!(pos.turn(), Color::Black);

        pos.apply(Coord::G8, Coord::F6, None).unwrap();
        assert_eq!(pos.halfmove_counter(), 2);
        pos.apply(Coord::E2, Coord::E4, None).unwrap();
        assert_eq!(pos.halfmove_counter(), 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut pos = Chess::default();
        pos.apply("d2", "d4", None).unwrap();
        let snapshot = pos.clone();
        pos.apply("d7", "d5", None).unwrap();
        assert_eq!(snapshot.piece_at(Coord::D7), Some(Color::Black.pawn()));
        assert_eq!(snapshot.history().len(), 1);
        assert_eq!(snapshot.turn(), Color::Black);
        assert!(snapshot.board().unit_at(Coord::D4).unwrap().kind().just_leaped());
    }

    #[test]
    fn test_is_legal_across_clones() {
        let pos = Chess::default();
        let moves = pos.legal_moves();
        let mut other = pos.clone();
        other.apply("e2", "e4", None).unwrap();
        other.apply("e7", "e5", None).unwrap();

        // the e-pawn has moved, its old moves no longer apply
        let mut filtered = moves.clone();
        other.retain_legal(&mut filtered);
        assert_eq!(filtered.len(), moves.len() - 2);
        assert!(filtered.iter().all(|m| other.is_legal(m)));

        let mut again = filtered.clone();
        other.retain_legal(&mut again);
        assert_eq!(again, filtered);
    }

    #[test]
    fn test_stalemate() {
        let mut pos = setup(
            &[
                (Color::White.king(), Coord::F7),
                (Color::White.queen(), Coord::G6),
                (Color::Black.king(), Coord::H8),
            ],
            Color::Black,
        );
        assert!(pos.is_stalemate());
        assert!(!pos.is_checkmate());
        assert_eq!(pos.evaluate(), Some(Outcome::Draw(Draw::Stalemate)));
    }

    #[test]
    fn test_insufficient_material() {
        let kings = [
            (Color::White.king(), Coord::E1),
            (Color::Black.king(), Coord::E8),
        ];
        assert!(setup(&kings, Color::White).has_insufficient_material());

        let mut minor = kings.to_vec();
        minor.push((Color::White.knight(), Coord::B1));
        assert!(setup(&minor, Color::White).has_insufficient_material());

        let mut rook = kings.to_vec();
        rook.push((Color::Black.rook(), Coord::A8));
        assert!(!setup(&rook, Color::White).has_insufficient_material());

        // c1 and f8 are both dark
        let mut same_shade = kings.to_vec();
        same_shade.push((Color::White.bishop(), Coord::C1));
        same_shade.push((Color::Black.bishop(), Coord::F8));
        assert!(setup(&same_shade, Color::White).has_insufficient_material());

        let mut opposite_shade = kings.to_vec();
        opposite_shade.push((Color::White.bishop(), Coord::C1));
        opposite_shade.push((Color::Black.bishop(), Coord::C8));
        assert!(!setup(&opposite_shade, Color::White).has_insufficient_material());

        let mut same_color = kings.to_vec();
        same_color.push((Color::White.bishop(), Coord::C1));
        same_color.push((Color::White.bishop(), Coord::F8));
        assert!(!setup(&same_color, Color::White).has_insufficient_material());

        let lone = [(Color::White.king(), Coord::E1)];
        assert!(!setup(&lone, Color::White).has_insufficient_material());
    }

    #[test]
    fn test_outcome_is_sticky() {
        let mut pos = setup(
            &[
                (Color::White.king(), Coord::E1),
                (Color::Black.king(), Coord::E8),
            ],
            Color::White,
        );
        let outcome = Some(Outcome::Draw(Draw::InsufficientMaterial));
        assert_eq!(pos.evaluate(), outcome);

        // play on regardless, the outcome stays
        pos.apply("e1", "d1", None).unwrap();
        pos.apply("e8", "d8", None).unwrap();
        assert_eq!(pos.outcome(), outcome);
    }

    #[test]
    fn test_fifty_moves_overrides_checkmate() {
        let mut pos = setup(
            &[
                (Color::White.king(), Coord::G6),
                (Color::White.rook(), Coord::A1),
                (Color::Black.king(), Coord::G8),
            ],
            Color::White,
        );
        pos.halfmoves = 49;
        pos.apply("a1", "a8", None).unwrap();
        assert!(pos.is_checkmate());
        assert_eq!(pos.halfmove_counter(), 50);
        assert_eq!(pos.outcome(), Some(Outcome::Draw(Draw::FiftyMoves)));
    }

    #[test]
    fn test_threefold_overrides_stalemate() {
        let mut pos = setup(
            &[
                (Color::White.king(), Coord::F7),
                (Color::White.queen(), Coord::G6),
                (Color::Black.king(), Coord::H8),
            ],
            Color::Black,
        );
        let current = pos.board().signature();
        pos.repetitions = vec![current.clone(), current];
        assert!(pos.is_stalemate());
        assert_eq!(
            pos.evaluate(),
            Some(Outcome::Draw(Draw::ThreefoldRepetition))
        );
        assert_eq!(pos.repetitions().len(), 2);
    }
}
