//! Error types for FEN parsing, board validation, and move application.

use std::fmt;

use crate::square::Square;

/// Errors that occur when parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// The FEN string does not have between 4 and 6 space-separated fields.
    WrongFieldCount {
        /// Number of fields found.
        found: usize,
    },
    /// The piece placement section does not have exactly 8 ranks.
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },
    /// A rank in the piece placement describes more or fewer than 8 squares.
    BadRankLength {
        /// Zero-based rank index (0 = rank 8 in FEN, 7 = rank 1).
        rank_index: usize,
        /// Number of squares described.
        length: usize,
    },
    /// An unrecognized character appeared in the piece placement.
    InvalidPieceChar {
        /// The invalid character.
        character: char,
    },
    /// One side has more pieces than its roster slots can hold.
    TooManyPieces {
        /// The side with too many pieces ("white" or "black").
        color: &'static str,
    },
    /// The active color field is not "w" or "b".
    InvalidColor {
        /// The invalid color string.
        found: String,
    },
    /// An unrecognized character appeared in the castling rights field.
    InvalidCastlingChar {
        /// The invalid character.
        character: char,
    },
    /// The en passant field is not "-" or a valid algebraic square.
    InvalidEnPassant {
        /// The invalid en passant string.
        found: String,
    },
    /// A move counter (halfmove clock or fullmove number) is not a number.
    InvalidMoveCounter {
        /// The field name ("halfmove clock" or "fullmove number").
        field: &'static str,
        /// The invalid string.
        found: String,
    },
    /// The parsed board fails structural validation.
    InvalidBoard {
        /// The underlying board validation error.
        source: BoardError,
    },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongFieldCount { found } => {
                write!(f, "expected 4 to 6 FEN fields, found {found}")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "expected 8 ranks in piece placement, found {found}")
            }
            FenError::BadRankLength { rank_index, length } => {
                write!(f, "rank {rank_index} describes {length} squares, expected 8")
            }
            FenError::InvalidPieceChar { character } => {
                write!(f, "invalid piece character: '{character}'")
            }
            FenError::TooManyPieces { color } => {
                write!(f, "too many {color} pieces for the roster")
            }
            FenError::InvalidColor { found } => {
                write!(f, "invalid active color: \"{found}\"")
            }
            FenError::InvalidCastlingChar { character } => {
                write!(f, "invalid castling character: '{character}'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant square: \"{found}\"")
            }
            FenError::InvalidMoveCounter { field, found } => {
                write!(f, "invalid {field}: \"{found}\"")
            }
            FenError::InvalidBoard { source } => {
                write!(f, "invalid board: {source}")
            }
        }
    }
}

impl std::error::Error for FenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FenError::InvalidBoard { source } => Some(source),
            _ => None,
        }
    }
}

impl From<BoardError> for FenError {
    fn from(source: BoardError) -> Self {
        FenError::InvalidBoard { source }
    }
}

/// Errors from structural validation of a [`Board`](crate::board::Board).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A side does not have exactly one live king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount {
        /// Which side has the wrong king count.
        color: &'static str,
        /// Number of live kings found.
        count: u32,
    },
    /// Two live pieces claim the same square.
    #[error("two pieces share square {square}")]
    OverlappingPieces {
        /// The contested square.
        square: Square,
    },
}

/// Errors from applying an action to a board.
///
/// The move generator never produces actions that trigger these; they guard
/// against externally supplied moves and internal invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    /// The moving side has no live piece on the action's from-square.
    #[error("no piece of the moving side on {0}")]
    NoPieceAtSource(Square),
    /// The destination holds a piece of the moving side.
    #[error("destination {0} occupied by the moving side")]
    DestinationOccupied(Square),
    /// The action would capture a king.
    #[error("king capture attempted at {0}")]
    KingCaptured(Square),
    /// A promotion was requested for a piece that is not an unpromoted pawn.
    #[error("promotion requested for a non-pawn on {0}")]
    PromotionOfNonPawn(Square),
    /// An en passant capture found no enemy pawn to remove.
    #[error("en passant capture with no victim pawn on {0}")]
    EnPassantVictimMissing(Square),
    /// A castling king move found no rook on the expected corner.
    #[error("castling with no rook on {0}")]
    CastlingRookMissing(Square),
}

/// Errors from parsing the external move text format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionParseError {
    /// The string is too short to hold two squares.
    #[error("move text too short: {0:?}")]
    TooShort(String),
    /// A square was not valid algebraic notation.
    #[error("invalid square in move text: {0:?}")]
    BadSquare(String),
    /// The promotion suffix was not Queen, Rook, Bishop, or Knight.
    #[error("invalid promotion name: {0:?}")]
    BadPromotion(String),
}

#[cfg(test)]
mod tests {
    use super::{BoardError, FenError};
    use crate::square::Square;

    #[test]
    fn fen_error_display() {
        let err = FenError::WrongFieldCount { found: 2 };
        assert_eq!(format!("{err}"), "expected 4 to 6 FEN fields, found 2");
    }

    #[test]
    fn board_error_display() {
        let err = BoardError::OverlappingPieces { square: Square::E4 };
        assert_eq!(format!("{err}"), "two pieces share square e4");
    }

    #[test]
    fn fen_error_from_board_error() {
        let board_err = BoardError::InvalidKingCount { color: "white", count: 0 };
        let fen_err: FenError = board_err.into();
        assert!(matches!(fen_err, FenError::InvalidBoard { .. }));
    }
}
