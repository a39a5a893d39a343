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

//! Count legal move paths.
//!
//! # Examples
//!
//! ```
//! use arbiter::{perft, Chess};
//!
//! let pos = Chess::default();
//! assert_eq!(perft(&pos, 1), 20);
//! assert_eq!(perft(&pos, 2), 400);
//! assert_eq!(perft(&pos, 3), 8902);
//! ```

use crate::{m::Move, position::Chess};

/// Counts legal move paths of a given length.
///
/// Paths ending in mate or stalemate before `depth` contribute nothing.
/// Draw rules are not applied along the way. Useful for comparing, testing
/// and debugging move generation correctness and performance.
pub fn perft(pos: &Chess, depth: u32) -> u64 {
    if depth < 1 {
        1
    } else {
        let moves = pos.legal_moves();

        if depth == 1 {
            moves.len() as u64
        } else {
            moves
                .iter()
                .map(|m| {
                    let mut child = pos.clone();
                    child.play_unchecked(m);
                    perft(&child, depth - 1)
                })
                .sum()
        }
    }
}

/// Like [`perft()`], but reports the count below each legal move, for
/// narrowing down move generation differences.
pub fn perft_divide(pos: &Chess, depth: u32) -> Vec<(Move, u64)> {
    pos.legal_moves()
        .into_iter()
        .map(|m| {
            let mut child = pos.clone();
            child.play_unchecked(&m);
            (m, perft(&child, depth.saturating_sub(1)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{setup::Setup, Coord};

    #[test]
    fn test_divide() {
        let pos = Chess::default();
        let divided = perft_divide(&pos, 2);
        assert_eq!(divided.len(), 20);
        assert!(divided.iter().all(|&(_, nodes)| nodes == 20));
        assert_eq!(divided.iter().map(|&(_, nodes)| nodes).sum::<u64>(), 400);
    }

    #[test]
    fn test_castling_position() {
        // 5 king steps, 2 castles, 10 moves for the a1 rook and 9 for h1
        let setup: Setup = "white king e1; white rook a1; white rook h1; black king e8"
            .parse()
            .unwrap();
        let pos = Chess::from_setup(&setup).unwrap();
        let moves = pos.legal_moves();
        assert!(moves.iter().any(|m| m.is_castle() && m.to == Coord::G1));
        assert!(moves.iter().any(|m| m.is_castle() && m.to == Coord::C1));
        assert_eq!(perft(&pos, 1), 26);
    }
}
