use core::time::Duration;
use std::time::Instant;

/// 予約済みのボット着手。
///
/// 予約時の世代番号を持ち、発火時に対局の世代番号と一致しなければ破棄される。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ScheduledBotMove {
    /// 発火予定時刻。
    due: Instant,
    /// 予約時の `MatchState` の世代番号。
    epoch: u64,
}

impl ScheduledBotMove {
    /// 発火予定時刻を返す。
    #[inline]
    #[must_use]
    pub const fn due(&self) -> Instant {
        self.due
    }

    /// 予約時の世代番号を返す。
    #[inline]
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// `now` の時点で発火してよいかを返す。
    #[inline]
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    /// `now` から `delay` 後に発火する予約を作る。
    #[inline]
    #[must_use]
    pub fn new(epoch: u64, now: Instant, delay: Duration) -> Self {
        Self {
            due: now.checked_add(delay).unwrap_or(now),
            epoch,
        }
    }

    /// 発火までの残り時間を返す（期限切れなら0）。
    #[inline]
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }
}
