//! Search tree nodes: a position plus the path deltas that score it.

use tracing::warn;

use roque_core::{generate, Action, Board, Terminal};

use crate::ordering::MoveOrder;

/// One node of the (ephemeral, depth-first) search tree.
///
/// Nodes carry no parent link; the principal action travels back up through
/// the search's return values instead.
#[derive(Debug, Clone)]
pub struct Node {
    /// The position after this node's action.
    pub board: Board,
    /// The action that produced this node; `None` at the root.
    pub action: Option<Action>,
    /// Plies from the root.
    pub depth: u32,
    /// Signed sum of per-edge capture and promotion gains along the path,
    /// positive when good for the side to move at the root.
    pub material_delta: i32,
    /// Signed sum of legal-move counts seen along the path, a mobility
    /// proxy with the same root-positive orientation.
    pub moves_delta: i32,
}

impl Node {
    /// Create the root node for a search.
    pub fn root(board: Board) -> Node {
        Node {
            board,
            action: None,
            depth: 0,
            material_delta: 0,
            moves_delta: 0,
        }
    }

    /// The sign applied to quantities credited to the player moving at this
    /// node: positive at even depth (the root side).
    #[inline]
    fn mover_sign(&self) -> i32 {
        if self.depth % 2 == 0 { 1 } else { -1 }
    }

    /// A node is quiescent when the move that produced it neither captured
    /// nor promoted. The root counts as quiescent.
    #[inline]
    pub fn quiescent(&self) -> bool {
        self.action
            .map_or(true, |action| !action.captured && !action.promoted)
    }

    /// Expand this node into ordered child nodes.
    ///
    /// Raises `Terminal` when the side to move has no legal action. A child
    /// whose application fails structurally is skipped with a diagnostic so
    /// one corrupt branch cannot poison the rest.
    pub fn successors(&self, order: &mut MoveOrder<'_>) -> Result<Vec<Node>, Terminal> {
        let mut actions = generate(&self.board)?;
        order.order(&mut actions);

        let sign = self.mover_sign();
        let moves_delta = self.moves_delta + actions.len() as i32 * sign;

        let mut children = Vec::with_capacity(actions.len());
        for action in actions {
            let mut board = self.board;
            let mut action = action;
            match board.apply(&mut action) {
                Ok(gain) => children.push(Node {
                    board,
                    action: Some(action),
                    depth: self.depth + 1,
                    material_delta: self.material_delta + gain * sign,
                    moves_delta,
                }),
                Err(error) => {
                    warn!(action = %action, %error, "skipping unappliable action");
                }
            }
        }
        Ok(children)
    }
}
