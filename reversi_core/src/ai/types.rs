use crate::engine::moves::Move;

/// 合法手の中から1手を選ぶ。
pub trait MoveSelector {
    /// `moves` から1手を選ぶ。`moves` が空なら `None`。
    fn select_move<'moves>(&mut self, moves: &'moves [Move]) -> Option<&'moves Move>;
}
