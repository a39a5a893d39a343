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

//! Pseudo-legal move generation, one unit at a time.
//!
//! Moves generated here follow each unit's movement pattern and respect
//! occupancy, but do not consider whether the mover's own king is left in
//! check. [`Board::legal_moves_of_unit()`] filters them.
//!
//! Directions are `(row, col)` deltas. Row 0 is the eighth rank, so white
//! pawns move towards decreasing rows.

use arrayvec::ArrayVec;

use crate::{
    board::Board,
    castling_side::{CastlingSide, KING_HOME_COL},
    color::Color,
    coord::Coord,
    m::Move,
    role::Role,
    unit::{Kind, Unit, UnitId},
};

/// Moves of a single unit. A queen in the middle of an empty board has 27,
/// a pawn on the seventh rank at most 12 (three targets, four promotions).
pub type UnitMoves = ArrayVec<Move, 32>;

/// Whether king move generation may include castling.
///
/// Attack scans pass [`Castling::Excluded`]: castling never captures, and
/// its safety probe would otherwise ask the same question again.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Castling {
    Included,
    Excluded,
}

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const ROOK_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const BISHOP_DIRS: [(i8, i8); 4] = [(-1, -1), (1, 1), (1, -1), (-1, 1)];

const QUEEN_DIRS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
];

/// Generates the pseudo-legal moves of `unit` on `board`.
///
/// A captured unit has no moves.
pub(crate) fn pseudo_moves(board: &Board, unit: &Unit, castling: Castling) -> UnitMoves {
    let mut moves = UnitMoves::new();
    let Some(from) = unit.square() else {
        return moves;
    };
    match unit.kind() {
        Kind::Pawn { .. } => gen_pawn(board, unit, from, &mut moves),
        Kind::Knight => gen_steps(board, unit, from, &KNIGHT_DELTAS, &mut moves),
        Kind::Bishop => gen_rays(board, unit, from, &BISHOP_DIRS, &mut moves),
        Kind::Rook { .. } => gen_rays(board, unit, from, &ROOK_DIRS, &mut moves),
        Kind::Queen => gen_rays(board, unit, from, &QUEEN_DIRS, &mut moves),
        Kind::King { has_moved } => {
            gen_king(board, unit, from, &mut moves);
            if castling == Castling::Included && !has_moved {
                gen_castling(board, unit, from, &mut moves);
            }
        }
    }
    moves
}

#[inline]
fn push(moves: &mut UnitMoves, unit: &Unit, from: Coord, to: Coord, capture: Option<UnitId>) {
    moves.push(Move {
        unit: unit.id(),
        role: unit.role(),
        from,
        to,
        capture,
        promotion: None,
    });
}

fn gen_steps(board: &Board, unit: &Unit, from: Coord, deltas: &[(i8, i8)], moves: &mut UnitMoves) {
    for &(drow, dcol) in deltas {
        let Some(to) = from.offset(drow, dcol) else {
            continue;
        };
        match board.unit_at(to) {
            None => push(moves, unit, from, to, None),
            Some(target) if target.color() != unit.color() => {
                push(moves, unit, from, to, Some(target.id()))
            }
            Some(_) => (),
        }
    }
}

fn gen_rays(board: &Board, unit: &Unit, from: Coord, dirs: &[(i8, i8)], moves: &mut UnitMoves) {
    for &(drow, dcol) in dirs {
        let mut to = from;
        while let Some(next) = to.offset(drow, dcol) {
            to = next;
            match board.unit_at(to) {
                None => push(moves, unit, from, to, None),
                Some(target) => {
                    if target.color() != unit.color() {
                        push(moves, unit, from, to, Some(target.id()));
                    }
                    break;
                }
            }
        }
    }
}

fn push_pawn(moves: &mut UnitMoves, unit: &Unit, from: Coord, to: Coord, capture: Option<UnitId>) {
    if to.row() == unit.color().promotion_row() {
        for promotion in Role::PROMOTIONS {
            moves.push(Move {
                unit: unit.id(),
                role: Role::Pawn,
                from,
                to,
                capture,
                promotion: Some(promotion),
            });
        }
    } else {
        push(moves, unit, from, to, capture);
    }
}

fn gen_pawn(board: &Board, unit: &Unit, from: Coord, moves: &mut UnitMoves) {
    let color = unit.color();
    let forward = color.forward();

    if let Some(single) = from.offset(forward, 0).filter(|&sq| board.unit_at(sq).is_none()) {
        push_pawn(moves, unit, from, single, None);

        if from.row() == color.pawn_row() {
            if let Some(double) = from
                .offset(2 * forward, 0)
                .filter(|&sq| board.unit_at(sq).is_none())
            {
                push(moves, unit, from, double, None);
            }
        }
    }

    for dcol in [1, -1] {
        let Some(to) = from.offset(forward, dcol) else {
            continue;
        };
        match board.unit_at(to) {
            Some(target) if target.color() != color => {
                push_pawn(moves, unit, from, to, Some(target.id()))
            }
            Some(_) => (),
            None => {
                // en passant: the victim stands beside us, not on the target
                let victim = from
                    .offset(0, dcol)
                    .and_then(|beside| board.unit_at(beside))
                    .filter(|victim| victim.color() != color && victim.kind().just_leaped());
                if let Some(victim) = victim {
                    push(moves, unit, from, to, Some(victim.id()));
                }
            }
        }
    }
}

/// Squares targeted by any pseudo-legal move of a live `attacker` unit
/// other than a king.
///
/// Pawn pushes count as targets, so a king will not step in front of an
/// enemy pawn.
fn targeted_by(board: &Board, attacker: Color) -> [bool; 64] {
    let mut targeted = [false; 64];
    for unit in board
        .live_units()
        .filter(|u| u.color() == attacker && u.role() != Role::King)
    {
        for m in pseudo_moves(board, unit, Castling::Excluded) {
            targeted[m.to.index()] = true;
        }
    }
    targeted
}

fn gen_king(board: &Board, unit: &Unit, from: Coord, moves: &mut UnitMoves) {
    let targeted = targeted_by(board, !unit.color());
    for drow in -1..=1 {
        for dcol in -1..=1 {
            if drow == 0 && dcol == 0 {
                continue;
            }
            let Some(to) = from.offset(drow, dcol) else {
                continue;
            };
            if targeted[to.index()] {
                continue;
            }
            match board.unit_at(to) {
                None => push(moves, unit, from, to, None),
                Some(target) if target.color() != unit.color() => {
                    push(moves, unit, from, to, Some(target.id()))
                }
                Some(_) => (),
            }
        }
    }
}

fn gen_castling(board: &Board, king: &Unit, from: Coord, moves: &mut UnitMoves) {
    let row = from.row();
    if from.col() != KING_HOME_COL || (row != 0 && row != 7) {
        return;
    }

    for side in CastlingSide::ALL {
        let rook_ready = board
            .unit_at(Coord::new_unchecked(row, side.rook_from_col()))
            .is_some_and(|rook| {
                rook.color() == king.color() && rook.kind() == Kind::Rook { has_moved: false }
            });
        if !rook_ready {
            continue;
        }

        if side
            .between_cols()
            .iter()
            .any(|&col| board.unit_at(Coord::new_unchecked(row, col)).is_some())
        {
            continue;
        }

        // the king may not pass through an attacked square
        let pass = Move {
            unit: king.id(),
            role: Role::King,
            from,
            to: Coord::new_unchecked(row, side.rook_to_col()),
            capture: None,
            promotion: None,
        };
        if board.leaves_in_check(king.color(), &pass) {
            continue;
        }

        push(
            moves,
            king,
            from,
            Coord::new_unchecked(row, side.king_to_col()),
            None,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Piece;

    fn board(pieces: &[(Piece, Coord)]) -> Board {
        let mut board = Board::empty();
        for &(piece, at) in pieces {
            board.spawn(piece, at);
        }
        board
    }

    fn targets(board: &Board, at: Coord, castling: Castling) -> Vec<Coord> {
        let unit = board.unit_at(at).expect("unit on square");
        pseudo_moves(board, unit, castling)
            .into_iter()
            .map(|m| m.to)
            .collect()
    }

    #[test]
    fn test_pawn_double_step() {
        let b = board(&[(Color::White.pawn(), Coord::E2)]);
        assert_eq!(targets(&b, Coord::E2, Castling::Included), [Coord::E3, Coord::E4]);

        let b = board(&[(Color::Black.pawn(), Coord::D7), (Color::White.knight(), Coord::D5)]);
        assert_eq!(targets(&b, Coord::D7, Castling::Included), [Coord::D6]);

        let b = board(&[(Color::Black.pawn(), Coord::D7), (Color::White.knight(), Coord::D6)]);
        assert!(targets(&b, Coord::D7, Castling::Included).is_empty());
    }

    #[test]
    fn test_pawn_promotions() {
        let b = board(&[
            (Color::White.pawn(), Coord::B7),
            (Color::Black.rook(), Coord::A8),
            (Color::Black.rook(), Coord::B8),
        ]);
        let moves = pseudo_moves(&b, b.unit_at(Coord::B7).unwrap(), Castling::Included);
        let promotions: Vec<_> = moves.iter().map(|m| (m.to, m.promotion)).collect();
        assert_eq!(
            promotions,
            [
                (Coord::A8, Some(Role::Queen)),
                (Coord::A8, Some(Role::Rook)),
                (Coord::A8, Some(Role::Bishop)),
                (Coord::A8, Some(Role::Knight)),
            ]
        );
        assert!(moves.iter().all(|m| m.is_capture()));
    }

    #[test]
    fn test_knight_and_sliders() {
        let b = board(&[(Color::White.knight(), Coord::A1)]);
        assert_eq!(targets(&b, Coord::A1, Castling::Included), [Coord::B3, Coord::C2]);

        let b = board(&[(Color::Black.queen(), Coord::D4)]);
        assert_eq!(targets(&b, Coord::D4, Castling::Included).len(), 27);

        let b = board(&[
            (Color::White.rook(), Coord::A1),
            (Color::White.pawn(), Coord::A3),
            (Color::Black.pawn(), Coord::C1),
        ]);
        assert_eq!(
            targets(&b, Coord::A1, Castling::Included),
            [Coord::A2, Coord::B1, Coord::C1]
        );
    }

    #[test]
    fn test_king_avoids_targeted_squares() {
        let b = board(&[
            (Color::White.king(), Coord::E1),
            (Color::Black.rook(), Coord::A2),
        ]);
        assert_eq!(
            targets(&b, Coord::E1, Castling::Included),
            [Coord::D1, Coord::F1]
        );

        // squares next to the enemy king are not excluded by the scan
        let b = board(&[
            (Color::White.king(), Coord::E1),
            (Color::Black.king(), Coord::E3),
        ]);
        assert_eq!(targets(&b, Coord::E1, Castling::Included).len(), 5);
    }

    #[test]
    fn test_castling_generation() {
        let mut b = board(&[
            (Color::White.king(), Coord::E1),
            (Color::White.rook(), Coord::H1),
            (Color::White.rook(), Coord::A1),
            (Color::White.knight(), Coord::B1),
        ]);
        assert!(targets(&b, Coord::E1, Castling::Included).contains(&Coord::G1));
        assert!(!targets(&b, Coord::E1, Castling::Included).contains(&Coord::C1));
        assert!(!targets(&b, Coord::E1, Castling::Excluded).contains(&Coord::G1));

        // a black rook on f8 covers the pass-through square
        b.spawn(Color::Black.rook(), Coord::F8);
        assert!(!targets(&b, Coord::E1, Castling::Included).contains(&Coord::G1));
    }

    #[test]
    fn test_captured_unit_has_no_moves() {
        let mut b = board(&[
            (Color::White.queen(), Coord::D1),
            (Color::Black.knight(), Coord::D8),
        ]);
        let capture = pseudo_moves(&b, b.unit_at(Coord::D1).unwrap(), Castling::Included)
            .into_iter()
            .find(|m| m.to == Coord::D8)
            .unwrap();
        let victim = capture.capture.unwrap();
        b.commit(&capture);
        assert!(pseudo_moves(&b, b.unit(victim), Castling::Included).is_empty());
    }
}
