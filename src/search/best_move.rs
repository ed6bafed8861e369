//! Search result payload shared by the book and the minimax driver.

/// Outcome of searching one position.
///
/// `best_move` is `None` only for terminal positions or for a node whose
/// window had already collided before any child was explored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestMove<M> {
    /// Minimax value, positive favoring Black.
    pub value: i64,
    pub best_move: Option<M>,
    /// The opponent's best answer to `best_move`, as found by the subtree.
    pub best_reply: Option<M>,
    /// Remaining depth the value was computed with.
    pub depth: u32,
    pub boards_explored: u64,
    /// Set when floor met ceiling: `value` is only a bound and must not be
    /// cached.
    pub window_collision: bool,
}

impl<M> BestMove<M> {
    /// A statically evaluated leaf: one board, no move.
    pub fn leaf(value: i64) -> Self {
        Self {
            value,
            best_move: None,
            best_reply: None,
            depth: 0,
            boards_explored: 1,
            window_collision: false,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.best_move.is_none()
    }
}
