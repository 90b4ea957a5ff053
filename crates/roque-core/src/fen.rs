//! FEN parsing and serialization for the packed [`Board`].

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, CastleSide, Slot};
use crate::color::Color;
use crate::error::FenError;
use crate::file::File;
use crate::piece::{PieceKind, Promotion};
use crate::rank::Rank;
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

// Running per-color counts used to assign roster slots in parse order. A
// piece beyond its kind's allotment must be a promoted pawn, so it takes the
// next free pawn slot with its promotion bits set.
#[derive(Default)]
struct SlotCounts {
    kings: u8,
    queens: u8,
    rooks: u8,
    bishops: u8,
    knights: u8,
    pawns: u8,
}

impl SlotCounts {
    fn assign(&mut self, kind: PieceKind) -> Option<(Slot, Option<Promotion>)> {
        match kind {
            PieceKind::King => {
                if self.kings < 1 {
                    self.kings += 1;
                    Some((Slot::KING, None))
                } else {
                    None
                }
            }
            PieceKind::Queen => {
                if self.queens < 1 {
                    self.queens += 1;
                    Some((Slot::QUEEN, None))
                } else {
                    self.overflow(Promotion::Queen)
                }
            }
            PieceKind::Rook => {
                if self.rooks < 2 {
                    let slot = if self.rooks == 0 { Slot::ROOK_A } else { Slot::ROOK_B };
                    self.rooks += 1;
                    Some((slot, None))
                } else {
                    self.overflow(Promotion::Rook)
                }
            }
            PieceKind::Bishop => {
                if self.bishops < 2 {
                    let slot = if self.bishops == 0 { Slot::BISHOP_A } else { Slot::BISHOP_B };
                    self.bishops += 1;
                    Some((slot, None))
                } else {
                    self.overflow(Promotion::Bishop)
                }
            }
            PieceKind::Knight => {
                if self.knights < 2 {
                    let slot = if self.knights == 0 { Slot::KNIGHT_A } else { Slot::KNIGHT_B };
                    self.knights += 1;
                    Some((slot, None))
                } else {
                    self.overflow(Promotion::Knight)
                }
            }
            PieceKind::Pawn => self.pawn_slot().map(|slot| (slot, None)),
        }
    }

    fn overflow(&mut self, promotion: Promotion) -> Option<(Slot, Option<Promotion>)> {
        self.pawn_slot().map(|slot| (slot, Some(promotion)))
    }

    fn pawn_slot(&mut self) -> Option<Slot> {
        if self.pawns < 8 {
            let slot = Slot::pawn(self.pawns);
            self.pawns += 1;
            Some(slot)
        } else {
            None
        }
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::WrongFieldCount { found: fields.len() });
        }

        // Piece placement.
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }

        let mut board = Board::blank();
        let mut counts = [SlotCounts::default(), SlotCounts::default()];

        for (rank_index, rank_str) in ranks.iter().enumerate() {
            // FEN ranks run from 8 down to 1.
            let rank = Rank::from_index(7 - rank_index as u8).expect("rank index in range");
            let mut file_index: u8 = 0;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(FenError::InvalidPieceChar { character: c });
                    }
                    file_index += digit as u8;
                } else {
                    let kind = PieceKind::from_fen_char(c)
                        .ok_or(FenError::InvalidPieceChar { character: c })?;
                    let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };

                    if file_index >= 8 {
                        return Err(FenError::BadRankLength {
                            rank_index,
                            length: file_index as usize + 1,
                        });
                    }

                    let file = File::from_index(file_index).expect("file index in range");
                    let sq = Square::new(file, rank);
                    let color_name = match color {
                        Color::White => "white",
                        Color::Black => "black",
                    };
                    let (slot, promotion) = counts[color.index()]
                        .assign(kind)
                        .ok_or(FenError::TooManyPieces { color: color_name })?;
                    board.place(color, slot, sq);
                    if let Some(promotion) = promotion {
                        board.set_promoted(color, slot, promotion);
                    }
                    file_index += 1;
                }
            }

            if file_index != 8 {
                return Err(FenError::BadRankLength {
                    rank_index,
                    length: file_index as usize,
                });
            }
        }

        // Active color.
        match fields[1] {
            "w" => board.set_side_to_move(Color::White),
            "b" => board.set_side_to_move(Color::Black),
            other => {
                return Err(FenError::InvalidColor { found: other.to_string() });
            }
        }

        // Castling availability.
        if fields[2] != "-" {
            for c in fields[2].chars() {
                let (color, side) = match c {
                    'K' => (Color::White, CastleSide::King),
                    'Q' => (Color::White, CastleSide::Queen),
                    'k' => (Color::Black, CastleSide::King),
                    'q' => (Color::Black, CastleSide::Queen),
                    _ => return Err(FenError::InvalidCastlingChar { character: c }),
                };
                board.allow_castle(color, side);
            }
        }

        // En passant target.
        if fields[3] != "-" {
            let sq = Square::from_algebraic(fields[3])
                .ok_or_else(|| FenError::InvalidEnPassant { found: fields[3].to_string() })?;
            board.set_en_passant(Some(sq));
        }

        // Move counters are accepted but ignored; non-numeric text is still
        // a hard error.
        for (i, field_name) in [(4usize, "halfmove clock"), (5, "fullmove number")] {
            if let Some(value) = fields.get(i)
                && value.parse::<u16>().is_err()
            {
                return Err(FenError::InvalidMoveCounter {
                    field: field_name,
                    found: (*value).to_string(),
                });
            }
        }

        board.validate()?;
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank_idx in (0u8..8).rev() {
            let rank = Rank::from_index(rank_idx).expect("rank index in range");
            let mut empty_count = 0u8;

            for file_idx in 0u8..8 {
                let file = File::from_index(file_idx).expect("file index in range");
                let sq = Square::new(file, rank);

                match self.piece_at(sq) {
                    Some((color, slot)) => {
                        if empty_count > 0 {
                            write!(f, "{empty_count}")?;
                            empty_count = 0;
                        }
                        let c = match color {
                            Color::White => self.piece_kind(color, slot).fen_char().to_ascii_uppercase(),
                            Color::Black => self.piece_kind(color, slot).fen_char(),
                        };
                        write!(f, "{c}")?;
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                write!(f, "{empty_count}")?;
            }
            if rank_idx > 0 {
                write!(f, "/")?;
            }
        }

        write!(f, " {}", self.side_to_move())?;

        let mut any_right = false;
        let rights = [
            (Color::White, CastleSide::King, 'K'),
            (Color::White, CastleSide::Queen, 'Q'),
            (Color::Black, CastleSide::King, 'k'),
            (Color::Black, CastleSide::Queen, 'q'),
        ];
        write!(f, " ")?;
        for (color, side, c) in rights {
            if self.can_castle(color, side) {
                write!(f, "{c}")?;
                any_right = true;
            }
        }
        if !any_right {
            write!(f, "-")?;
        }

        match self.en_passant() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }

        // Move counters are not tracked.
        write!(f, " 0 1")
    }
}
