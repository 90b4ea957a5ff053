//! Knight move generation.

use crate::action::Action;
use crate::attacks::knight_attacks;
use crate::board::Slot;
use crate::square::Square;

use super::scan::Scan;

pub(super) fn gen_knight(scan: &Scan, slot: Slot, from: Square, actions: &mut Vec<Action>) {
    let dests =
        knight_attacks(from) & !scan.my_occ & scan.check_mask & scan.pin_rays[from.index()];
    for to in dests.squares() {
        actions.push(Action::with_slot(from, to, slot));
    }
}
