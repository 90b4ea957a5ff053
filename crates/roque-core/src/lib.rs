//! Core chess types: packed position encoding, FEN, and legal move generation.

mod action;
mod apply;
mod attacks;
mod bitboard;
mod board;
mod color;
mod error;
mod fen;
mod file;
mod movegen;
mod perft;
mod piece;
mod rank;
mod square;

pub use action::Action;
pub use attacks::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks,
};
pub use bitboard::Bitboard;
pub use board::{Board, CastleSide, PrettyBoard, Slot, PACKED_LEN};
pub use color::Color;
pub use error::{ActionParseError, ApplyError, BoardError, FenError};
pub use fen::STARTING_FEN;
pub use file::File;
pub use movegen::{generate, Terminal};
pub use perft::perft;
pub use piece::{PieceKind, Promotion};
pub use rank::Rank;
pub use square::Square;
