//! Applying an action to a packed board.

use crate::action::Action;
use crate::board::{Board, CastleSide};
use crate::color::Color;
use crate::error::ApplyError;
use crate::file::File;
use crate::piece::PieceKind;
use crate::rank::Rank;
use crate::square::Square;

// Rook home corners whose disturbance revokes a castling right.
const CORNERS: [(Square, Color, CastleSide); 4] = [
    (Square::H1, Color::White, CastleSide::King),
    (Square::A1, Color::White, CastleSide::Queen),
    (Square::H8, Color::Black, CastleSide::King),
    (Square::A8, Color::Black, CastleSide::Queen),
];

impl Board {
    /// Apply `action` for the side to move, mutating the board in place.
    ///
    /// Returns the material gain for the mover: the captured piece's point
    /// value plus the promotion gain (new piece value minus a pawn). Sets
    /// `action.captured` and resolves `action.slot` if it was not supplied.
    pub fn apply(&mut self, action: &mut Action) -> Result<i32, ApplyError> {
        let us = self.side_to_move();
        let them = us.flip();

        let slot = match action.slot {
            Some(slot)
                if !self.is_captured(us, slot) && self.slot_square(us, slot) == action.from =>
            {
                slot
            }
            Some(_) => return Err(ApplyError::NoPieceAtSource(action.from)),
            None => {
                let slot = self
                    .slot_at(us, action.from)
                    .ok_or(ApplyError::NoPieceAtSource(action.from))?;
                action.slot = Some(slot);
                slot
            }
        };
        let kind = self.piece_kind(us, slot);

        if self.slot_at(us, action.to).is_some() {
            return Err(ApplyError::DestinationOccupied(action.to));
        }

        // En passant is valid for a single ply.
        let ep_target = self.en_passant();
        self.set_en_passant(None);

        // Capture.
        let mut gain = 0;
        if let Some(victim) = self.slot_at(them, action.to) {
            if self.piece_kind(them, victim) == PieceKind::King {
                return Err(ApplyError::KingCaptured(action.to));
            }
            gain += self.piece_kind(them, victim).value();
            self.set_captured(them, victim);
            action.captured = true;
        } else if kind == PieceKind::Pawn
            && ep_target == Some(action.to)
            && action.from.file() != action.to.file()
        {
            // The captured pawn sits on the target's file at the capturer's rank.
            let victim_sq = Square::new(action.to.file(), action.from.rank());
            let victim = self
                .slot_at(them, victim_sq)
                .ok_or(ApplyError::EnPassantVictimMissing(victim_sq))?;
            gain += self.piece_kind(them, victim).value();
            self.set_captured(them, victim);
            action.captured = true;
        }

        // Move the piece.
        self.set_slot_square(us, slot, action.to);

        if kind == PieceKind::Pawn {
            let from_rank = action.from.rank().index() as i8;
            let to_rank = action.to.rank().index() as i8;
            if action.from.file() == action.to.file() && (from_rank - to_rank).abs() == 2 {
                let skipped = Rank::from_index(((from_rank + to_rank) / 2) as u8)
                    .expect("midpoint of a double push is on the board");
                self.set_en_passant(Some(Square::new(action.from.file(), skipped)));
            }
            if action.promoted {
                self.set_promoted(us, slot, action.promotion);
                gain += action.promotion_gain();
            }
        } else if action.promoted {
            return Err(ApplyError::PromotionOfNonPawn(action.from));
        }

        // Castling: a king moving two files drags the rook to the crossed square.
        if kind == PieceKind::King {
            let file_delta = action.to.file().index() as i8 - action.from.file().index() as i8;
            if file_delta.abs() == 2 {
                let rank = action.from.rank();
                let (corner_file, crossed_file) = if file_delta > 0 {
                    (File::FileH, File::FileF)
                } else {
                    (File::FileA, File::FileD)
                };
                let corner = Square::new(corner_file, rank);
                let rook = self
                    .slot_at(us, corner)
                    .ok_or(ApplyError::CastlingRookMissing(corner))?;
                self.set_slot_square(us, rook, Square::new(crossed_file, rank));
            }
            self.clear_castle(us, CastleSide::King);
            self.clear_castle(us, CastleSide::Queen);
        }

        // Any move touching a rook corner kills that corner's right, whether
        // the rook moved away or was captured.
        for (corner, color, side) in CORNERS {
            if action.from == corner || action.to == corner {
                self.clear_castle(color, side);
            }
        }

        self.set_side_to_move(them);
        Ok(gain)
    }
}
