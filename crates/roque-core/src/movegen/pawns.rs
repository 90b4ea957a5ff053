//! Pawn move generation: pushes, captures, promotion, en passant.

use tracing::trace;

use crate::action::Action;
use crate::attacks::pawn_attacks;
use crate::bitboard::Bitboard;
use crate::board::{Board, Slot};
use crate::color::Color;
use crate::piece::Promotion;
use crate::rank::Rank;
use crate::square::Square;

use super::scan::{square_attacked, Scan};

pub(super) fn gen_pawn(
    board: &Board,
    scan: &Scan,
    slot: Slot,
    from: Square,
    actions: &mut Vec<Action>,
) {
    let (dir, start_rank, promo_rank) = match scan.us {
        Color::White => (1i8, Rank::Rank2, Rank::Rank8),
        Color::Black => (-1i8, Rank::Rank7, Rank::Rank1),
    };

    let mut dests = Bitboard::EMPTY;

    // Pushes go through empty squares only.
    if let Some(one) = from.offset(0, dir)
        && !scan.occ.contains(one)
    {
        dests = dests.with(one);
        if from.rank() == start_rank
            && let Some(two) = one.offset(0, dir)
            && !scan.occ.contains(two)
        {
            dests = dests.with(two);
        }
    }

    // Diagonal captures require an enemy piece.
    dests |= pawn_attacks(scan.us, from) & scan.their_occ;

    dests &= scan.check_mask & scan.pin_rays[from.index()];

    for to in dests.squares() {
        if to.rank() == promo_rank {
            for promotion in Promotion::ALL {
                actions.push(Action::promotion(from, to, slot, promotion));
            }
        } else {
            actions.push(Action::with_slot(from, to, slot));
        }
    }

    // En passant sidesteps the mask filters: the captured pawn does not sit
    // on the destination, so legality is probed by applying the capture to a
    // scratch board and checking king safety.
    if let Some(target) = board.en_passant()
        && pawn_attacks(scan.us, from).contains(target)
    {
        let mut probe = *board;
        let mut probe_action = Action::with_slot(from, target, slot);
        if probe.apply(&mut probe_action).is_ok()
            && !square_attacked(&probe, probe.king_square(scan.us), scan.them)
        {
            actions.push(Action::with_slot(from, target, slot));
        } else {
            trace!(%from, %target, "en passant capture would expose the king");
        }
    }
}
