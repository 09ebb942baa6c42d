//! A library for the rules of a chess match.
//!
//! [`Game`] holds the full match state: piece placement, whose turn it
//! is, check and checkmate, en passant vulnerability and pending
//! promotions. Moves are validated and executed through a reversible
//! make/undo pair, which is also what checkmate detection replays, so
//! probing and real moves share one implementation.
//!
//! # Examples
//!
//! Play the first moves of a game:
//!
//! ```
//! use xadrez::{Color, Game};
//!
//! let mut game = Game::new();
//! game.play("e2".parse()?, "e4".parse()?)?;
//! game.play("e7".parse()?, "e5".parse()?)?;
//! assert_eq!(game.side_to_move(), Color::White);
//! assert_eq!(game.turn(), 3);
//! assert!(!game.is_check());
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Ask where a piece may go, and render the board:
//!
//! ```
//! use xadrez::{Game, Square};
//!
//! let game = Game::new();
//! let targets = game.possible_moves(Square::B1)?;
//! assert_eq!(targets.collect::<Vec<_>>(), vec![Square::A3, Square::C3]);
//! println!("{}", game.board());
//! # Ok::<_, xadrez::MoveError>(())
//! ```
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations ([`Color`], [`Role`],
//!   [`Square`] and [`SquareSet`]).
//! * `arbitrary`: Implements
//!   [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for the same types.

#![doc(html_root_url = "https://docs.rs/xadrez/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

mod board;
mod color;
mod game;
pub mod movement;
mod piece;
mod role;
mod square;
mod square_set;

pub use crate::{
    board::{Board, PlaceError},
    color::{Color, ParseColorError},
    game::{Game, MoveError, PromoteError},
    movement::MoveContext,
    piece::Piece,
    role::Role,
    square::{ParseSquareError, PositionError, Square},
    square_set::SquareSet,
};
