//! Queen, rook, and bishop move generation.

use crate::action::Action;
use crate::attacks::{bishop_attacks, queen_attacks, rook_attacks};
use crate::board::Slot;
use crate::piece::PieceKind;
use crate::square::Square;

use super::scan::Scan;

pub(super) fn gen_slider(
    kind: PieceKind,
    scan: &Scan,
    slot: Slot,
    from: Square,
    actions: &mut Vec<Action>,
) {
    let attacks = match kind {
        PieceKind::Queen => queen_attacks(from, scan.occ),
        PieceKind::Rook => rook_attacks(from, scan.occ),
        PieceKind::Bishop => bishop_attacks(from, scan.occ),
        _ => return,
    };
    let dests = attacks & !scan.my_occ & scan.check_mask & scan.pin_rays[from.index()];
    for to in dests.squares() {
        actions.push(Action::with_slot(from, to, slot));
    }
}
