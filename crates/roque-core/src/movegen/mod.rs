//! Legal move generation.

mod king;
mod knights;
mod pawns;
mod scan;
mod sliders;

use crate::action::Action;
use crate::board::{Board, Slot};
use crate::piece::PieceKind;

use self::king::gen_king;
use self::knights::gen_knight;
use self::pawns::gen_pawn;
use self::scan::Scan;
use self::sliders::gen_slider;

/// Why a position has no legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// The side to move is in check with no legal reply.
    Checkmate,
    /// The side to move is not in check but has no legal move.
    Stalemate,
}

/// Enumerate the legal moves for the side to move.
///
/// Moves come back sorted lexicographically by `(from, to, promotion)`;
/// callers wanting a search-oriented order re-sort. When no legal move
/// exists the position is terminal and the reason is returned instead.
pub fn generate(board: &Board) -> Result<Vec<Action>, Terminal> {
    let scan = Scan::of(board);
    let mut actions = Vec::with_capacity(48);

    // Under double check only the king may move.
    if !scan.double_check() {
        for slot in Slot::all() {
            if board.is_captured(scan.us, slot) {
                continue;
            }
            let from = board.slot_square(scan.us, slot);
            match board.piece_kind(scan.us, slot) {
                PieceKind::King => {}
                PieceKind::Pawn => gen_pawn(board, &scan, slot, from, &mut actions),
                PieceKind::Knight => gen_knight(&scan, slot, from, &mut actions),
                kind => gen_slider(kind, &scan, slot, from, &mut actions),
            }
        }
    }
    gen_king(board, &scan, &mut actions);

    if actions.is_empty() {
        return Err(if scan.in_check() {
            Terminal::Checkmate
        } else {
            Terminal::Stalemate
        });
    }

    actions.sort_by_key(|a| (a.from, a.to, a.promotion_index()));
    Ok(actions)
}

#[cfg(test)]
mod tests {
    use super::{generate, Terminal};
    use crate::action::Action;
    use crate::board::Board;
    use crate::piece::PieceKind;
    use crate::square::Square;

    fn moves(fen: &str) -> Vec<Action> {
        let board: Board = fen.parse().unwrap();
        generate(&board).unwrap()
    }

    #[test]
    fn starting_position_has_20_moves() {
        let board = Board::starting_position();
        assert_eq!(generate(&board).unwrap().len(), 20);
    }

    #[test]
    fn emission_order_is_lexicographic() {
        let board = Board::starting_position();
        let actions = generate(&board).unwrap();
        let mut sorted = actions.clone();
        sorted.sort_by_key(|a| (a.from, a.to, a.promotion_index()));
        assert_eq!(actions, sorted);
    }

    #[test]
    fn promotion_expands_to_four_moves() {
        let actions = moves("4k3/P7/8/8/8/8/8/4K3 w - -");
        let promos: Vec<_> = actions
            .iter()
            .filter(|a| a.from == Square::A7 && a.to == Square::A8)
            .collect();
        assert_eq!(promos.len(), 4);
        assert!(promos.iter().all(|a| a.promoted));
    }

    #[test]
    fn en_passant_is_generated() {
        // White's d5 pawn may take the c5 pawn that just pushed past it.
        let actions = moves("rnbqkbnr/pp1p1ppp/4p3/2pP4/8/8/PPP1PPPP/RNBQKBNR w KQkq c6 0 3");
        assert!(actions.contains(&Action::new(Square::D5, Square::C6)));
    }

    #[test]
    fn en_passant_discovered_check_is_rejected() {
        // Capturing en passant would clear the rank between the rook on h5
        // and the king on a5.
        let actions = moves("4k3/8/8/KPp4r/8/8/8/8 w - c6 0 1");
        assert!(!actions.contains(&Action::new(Square::B5, Square::C6)));
    }

    #[test]
    fn pinned_knight_has_no_moves() {
        let actions = moves("4r2k/8/8/8/8/8/4N3/4K3 w - -");
        assert!(actions.iter().all(|a| a.from != Square::E2));
    }

    #[test]
    fn pinned_rook_slides_along_the_pin_ray() {
        // White rook on e4 pinned by the rook on e8 may move along the
        // e-file (including capturing the pinner) but never sideways.
        let actions = moves("4r2k/8/8/8/4R3/8/8/4K3 w - -");
        let rook_moves: Vec<_> = actions.iter().filter(|a| a.from == Square::E4).collect();
        assert!(rook_moves.iter().any(|a| a.to == Square::E8));
        assert!(rook_moves.iter().any(|a| a.to == Square::E7));
        assert!(rook_moves.iter().all(|a| a.to.file() == Square::E4.file()));
    }

    #[test]
    fn double_check_permits_only_king_moves() {
        let board: Board = "4r1k1/8/8/8/8/5n2/8/4K3 w - -".parse().unwrap();
        let actions = generate(&board).unwrap();
        for action in &actions {
            let (_, slot) = board.piece_at(action.from).unwrap();
            assert_eq!(
                board.piece_kind(crate::Color::White, slot),
                PieceKind::King,
                "non-king move {action} generated under double check"
            );
        }
    }

    #[test]
    fn check_requires_capture_block_or_king_move() {
        // Black rook on e8 checks the king on e1; the rook on a4 may only
        // interpose on e4; the king steps aside.
        let board: Board = "4r2k/8/8/8/R7/8/8/4K3 w - -".parse().unwrap();
        let actions = generate(&board).unwrap();
        for action in &actions {
            if action.from == Square::A4 {
                assert_eq!(action.to, Square::E4, "rook must interpose, got {action}");
            }
        }
        assert!(actions.iter().any(|a| a.from == Square::A4));
        assert!(actions.iter().any(|a| a.from == Square::E1));
    }

    #[test]
    fn both_castles_available_on_open_home_rank() {
        let actions = moves("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq -");
        assert!(actions.contains(&Action::new(Square::E1, Square::G1)));
        assert!(actions.contains(&Action::new(Square::E1, Square::C1)));

        let actions = moves("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R b KQkq -");
        assert!(actions.contains(&Action::new(Square::E8, Square::G8)));
        assert!(actions.contains(&Action::new(Square::E8, Square::C8)));
    }

    #[test]
    fn castling_is_blocked_through_an_attacked_square() {
        // The bishop on a6 covers f1, so kingside castling is out;
        // queenside remains.
        let actions = moves("4k3/8/b7/8/8/8/8/R3K2R w KQ -");
        assert!(!actions.contains(&Action::new(Square::E1, Square::G1)));
        assert!(actions.contains(&Action::new(Square::E1, Square::C1)));
    }

    #[test]
    fn castling_requires_empty_lane() {
        let actions = moves("4k3/8/8/8/8/8/8/RN2K1NR w KQ -");
        assert!(!actions.contains(&Action::new(Square::E1, Square::G1)));
        assert!(!actions.contains(&Action::new(Square::E1, Square::C1)));
    }

    #[test]
    fn no_castling_while_in_check() {
        let actions = moves("4r2k/8/8/8/8/8/8/R3K2R w KQ -");
        assert!(!actions.contains(&Action::new(Square::E1, Square::G1)));
        assert!(!actions.contains(&Action::new(Square::E1, Square::C1)));
    }

    #[test]
    fn checkmate_is_terminal() {
        // Queen on g7, guarded by the king on f6, mates the king on h8.
        let board: Board = "7k/6Q1/5K2/8/8/8/8/8 b - -".parse().unwrap();
        assert_eq!(generate(&board), Err(Terminal::Checkmate));
    }

    #[test]
    fn stalemate_is_terminal() {
        let board: Board = "k7/2K5/1Q6/8/8/8/8/8 b - -".parse().unwrap();
        assert_eq!(generate(&board), Err(Terminal::Stalemate));
    }

    #[test]
    fn king_cannot_step_onto_covered_squares() {
        // Kings face off; the white king may not approach.
        let board: Board = "8/8/8/3k4/8/3K4/8/8 w - -".parse().unwrap();
        let actions = generate(&board).unwrap();
        for action in &actions {
            assert!(
                !matches!(action.to, Square::C4 | Square::D4 | Square::E4),
                "king stepped next to the enemy king: {action}"
            );
        }
    }

    #[test]
    fn every_generated_move_leaves_own_king_safe() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "4r2k/8/8/8/R7/8/8/4K3 w - -",
            "rnbqkbnr/pp1p1ppp/4p3/2pP4/8/8/PPP1PPPP/RNBQKBNR w KQkq c6 0 3",
        ] {
            let board: Board = fen.parse().unwrap();
            let us = board.side_to_move();
            for action in generate(&board).unwrap() {
                let mut child = board;
                let mut action = action;
                child.apply(&mut action).unwrap();
                assert!(
                    !super::scan::square_attacked(&child, child.king_square(us), us.flip()),
                    "move {action} leaves the king attacked in {fen}"
                );
            }
        }
    }
}
