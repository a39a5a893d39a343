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

//! An authoritative chess rules engine with simulatable board state.
//!
//! Pieces are tracked as units with stable identities, so moves generated
//! on one position stay meaningful on any clone of it. Positions are plain
//! values: clone one to play a hypothetical line forward.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use arbiter::Chess;
//!
//! let pos = Chess::default();
//! let legals = pos.legal_moves();
//! assert_eq!(legals.len(), 20);
//! ```
//!
//! Play moves:
//!
//! ```
//! use arbiter::{Chess, Coord, PlayError};
//!
//! let mut pos = Chess::default();
//!
//! // 1. e4 e5 2. Nf3
//! pos.apply("e2", "e4", None)?;
//! pos.apply(Coord::E7, Coord::E5, None)?;
//! pos.apply((7, 6), (5, 5), None)?;
//!
//! assert_eq!(pos.history().len(), 3);
//! assert_eq!(pos.history()[2].to_string(), "Ng1-f3");
//! # Ok::<_, PlayError>(())
//! ```
//!
//! Simulate without touching the game:
//!
//! ```
//! use arbiter::Chess;
//!
//! let pos = Chess::default();
//! for m in pos.legal_moves() {
//!     let mut line = pos.clone();
//!     line.play_unchecked(&m);
//!     assert_eq!(line.legal_moves().len(), 20);
//! }
//! assert!(pos.history().is_empty());
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! use arbiter::{Chess, Draw, Outcome, Setup};
//!
//! let setup: Setup = "white king e1; black king e8; white knight b1".parse()?;
//! let mut pos = Chess::from_setup(&setup)?;
//! assert!(!pos.is_checkmate());
//! assert!(!pos.is_stalemate());
//! assert!(pos.has_insufficient_material());
//! assert_eq!(pos.evaluate(), Some(Outcome::Draw(Draw::InsufficientMaterial)));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! # Coordinates
//!
//! A [`Coord`] is a `(row, col)` pair. Row 0 is the eighth rank (black's
//! back rank) and column 0 is the a-file, so `(7, 4)` is e1.
//!
//! # Logging
//!
//! Committed plies, rejected moves and game endings are reported through
//! [`tracing`](https://docs.rs/tracing) at `debug`, `trace` and `info`
//! level. No subscriber is installed.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations.
//! * `arbitrary`: Implements
//!   [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for fuzzing.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod board;
mod castling_side;
mod color;
mod coord;
mod m;
mod movegen;
mod perft;
mod position;
mod role;
mod setup;
mod types;
mod unit;

pub use board::{Board, Signature};
pub use castling_side::CastlingSide;
pub use color::{ByColor, Color, ParseColorError};
pub use coord::{Coord, CoordOutOfBounds, ParseCoordError};
pub use m::{Move, MoveList};
pub use movegen::{Castling, UnitMoves};
pub use perft::{perft, perft_divide};
pub use position::{Chess, Draw, Outcome, PlayError, TurnMode};
pub use role::{ParseRoleError, Role};
pub use setup::{ParsePlacementError, Placement, Setup, SetupError};
pub use types::Piece;
pub use unit::{Kind, Unit, UnitId};
