//! King move generation, including castling.

use crate::action::Action;
use crate::attacks::king_attacks;
use crate::bitboard::Bitboard;
use crate::board::{Board, CastleSide, Slot};
use crate::color::Color;
use crate::file::File;
use crate::piece::PieceKind;
use crate::rank::Rank;
use crate::square::Square;

use super::scan::Scan;

pub(super) fn gen_king(board: &Board, scan: &Scan, actions: &mut Vec<Action>) {
    let from = scan.king_sq;
    let dests = king_attacks(from) & !scan.my_occ & !scan.their_attacks;
    for to in dests.squares() {
        actions.push(Action::with_slot(from, to, Slot::KING));
    }

    // Castling: right intact, not in check, lane empty, path unattacked.
    if scan.in_check() {
        return;
    }
    let home_rank = match scan.us {
        Color::White => Rank::Rank1,
        Color::Black => Rank::Rank8,
    };
    if from != Square::new(File::FileE, home_rank) {
        return;
    }

    for side in CastleSide::ALL {
        if !board.can_castle(scan.us, side) {
            continue;
        }

        let at = |file: File| Square::new(file, home_rank);
        let (corner, lane, path, dest) = match side {
            CastleSide::King => (
                at(File::FileH),
                at(File::FileF).bitboard() | at(File::FileG).bitboard(),
                at(File::FileF).bitboard() | at(File::FileG).bitboard(),
                at(File::FileG),
            ),
            CastleSide::Queen => (
                at(File::FileA),
                at(File::FileB).bitboard() | at(File::FileC).bitboard() | at(File::FileD).bitboard(),
                at(File::FileD).bitboard() | at(File::FileC).bitboard(),
                at(File::FileC),
            ),
        };

        let rook_present = board
            .slot_at(scan.us, corner)
            .is_some_and(|slot| board.piece_kind(scan.us, slot) == PieceKind::Rook);
        if !rook_present {
            continue;
        }

        let lane_clear = (scan.occ & lane) == Bitboard::EMPTY;
        let path_safe = (scan.their_attacks & path) == Bitboard::EMPTY;
        if lane_clear && path_safe {
            actions.push(Action::with_slot(from, dest, Slot::KING));
        }
    }
}
