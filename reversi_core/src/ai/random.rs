use crate::ai::types::MoveSelector;
use crate::engine::moves::Move;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng as _};
use tracing::trace;

/// 合法手から一様ランダムに1手を選択する。
#[derive(Debug, Clone)]
pub struct RandomMoveSelector<R = StdRng> {
    /// 乱数生成器。
    rng: R,
}

impl RandomMoveSelector<StdRng> {
    /// `seed` から決定的に再現できる選択器を作る。
    #[inline]
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomMoveSelector<R> {
    /// 任意の乱数源を使う選択器を作る。
    #[inline]
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MoveSelector for RandomMoveSelector<R> {
    #[inline]
    fn select_move<'moves>(&mut self, moves: &'moves [Move]) -> Option<&'moves Move> {
        if moves.is_empty() {
            return None;
        }

        let index = self.rng.random_range(0..moves.len());
        trace!(index, candidates = moves.len(), "random move chosen");
        moves.get(index)
    }
}
