/// ボット着手の予約（遅延タイマー）。
pub mod timer;

use crate::ai::random::RandomMoveSelector;
use crate::ai::types::MoveSelector;
use crate::engine::events::Listener;
use crate::engine::game::{InvalidMoveError, Phase, TurnEngine};
use crate::engine::moves::Move;
use crate::engine::types::{Side, Square};
use core::time::Duration;
use std::time::Instant;
use timer::ScheduledBotMove;
use tracing::{debug, info, warn};

/// ボットが着手するまでの既定の待ち時間。
const DEFAULT_BOT_DELAY: Duration = Duration::from_secs(1);

/// 対局モード。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Mode {
    /// 人間同士。
    Multi,
    /// 人間（`solo_side`）対ランダムボット。
    Solo,
}

/// 対局の設定。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// ボットが着手するまでの待ち時間。
    bot_delay: Duration,
    /// 対局モード。
    mode: Mode,
    /// ソロモードで人間が持つ色。
    solo_side: Side,
    /// 先手。
    starting_side: Side,
}

impl Config {
    /// ボットの待ち時間を返す。
    #[inline]
    #[must_use]
    pub const fn bot_delay(&self) -> Duration {
        self.bot_delay
    }

    /// 対局モードを返す。
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// ソロモードで人間が持つ色を返す。
    #[inline]
    #[must_use]
    pub const fn solo_side(&self) -> Side {
        self.solo_side
    }

    /// 先手を返す。
    #[inline]
    #[must_use]
    pub const fn starting_side(&self) -> Side {
        self.starting_side
    }

    /// ボットの待ち時間を変更する。
    #[inline]
    #[must_use]
    pub const fn with_bot_delay(self, bot_delay: Duration) -> Self {
        Self { bot_delay, ..self }
    }

    /// 対局モードを変更する。
    #[inline]
    #[must_use]
    pub const fn with_mode(self, mode: Mode) -> Self {
        Self { mode, ..self }
    }

    /// 人間が持つ色を変更する。
    #[inline]
    #[must_use]
    pub const fn with_solo_side(self, solo_side: Side) -> Self {
        Self { solo_side, ..self }
    }

    /// 先手を変更する。
    #[inline]
    #[must_use]
    pub const fn with_starting_side(self, starting_side: Side) -> Self {
        Self {
            starting_side,
            ..self
        }
    }
}

impl Default for Config {
    /// ソロ、人間が黒、黒が先手、ボットは1秒待つ。
    #[inline]
    fn default() -> Self {
        Self {
            bot_delay: DEFAULT_BOT_DELAY,
            mode: Mode::Solo,
            solo_side: Side::Black,
            starting_side: Side::Black,
        }
    }
}

/// 進行状態。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum RunState {
    /// 一時停止中（入力もボットも止まる）。
    Paused,
    /// 対局中。
    Playing,
}

/// 人間の入力が受け付けられなかった理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum SessionError {
    /// 着手自体が不正。
    #[error(transparent)]
    InvalidMove(#[from] InvalidMoveError),
    /// ソロモードでボットの手番。
    #[error("it is not the human side's turn")]
    NotHumanTurn,
    /// 一時停止中。
    #[error("the session is paused")]
    NotPlaying,
}

/// 1つの対局を進行させる。
///
/// 人間の入力を手番で絞り込み、ボットの手番では遅延付きの着手を予約する。
/// 予約は `tick` で時刻を渡されたときにだけ発火する。
#[derive(Debug)]
pub struct Session<L: Listener = (), S: MoveSelector = RandomMoveSelector> {
    /// 設定。
    config: Config,
    /// 手番管理。
    engine: TurnEngine<L>,
    /// 予約中のボット着手。
    pending: Option<ScheduledBotMove>,
    /// 進行状態。
    run_state: RunState,
    /// ボットの手選択。
    selector: S,
}

impl<L: Listener, S: MoveSelector> Session<L, S> {
    /// 予約中のボット着手を取り消す。取り消した場合は `true`。
    #[inline]
    pub fn cancel_bot_move(&mut self) -> bool {
        let cancelled = self.pending.take().is_some();
        if cancelled {
            debug!("bot move cancelled");
        }
        cancelled
    }

    /// 設定を返す。
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// 手番管理を返す。
    #[inline]
    #[must_use]
    pub const fn engine(&self) -> &TurnEngine<L> {
        &self.engine
    }

    /// 人間の着手を適用する。
    ///
    /// # Errors
    ///
    /// - `SessionError::NotPlaying`: 一時停止中
    /// - `SessionError::NotHumanTurn`: ソロモードでボットの手番
    /// - `SessionError::InvalidMove`: 着手が不正（状態は変わらない）
    #[inline]
    pub fn human_move(&mut self, column: u8, row: u8, now: Instant) -> Result<Phase, SessionError> {
        if self.run_state != RunState::Playing {
            return Err(SessionError::NotPlaying);
        }
        if self.is_bot_turn() {
            return Err(SessionError::NotHumanTurn);
        }

        let phase = self.engine.apply_move(column, row)?;
        self.schedule_bot_move(now);
        Ok(phase)
    }

    /// ボットの手番かを返す（ソロモードかつ人間側ではない着手待ち）。
    #[inline]
    #[must_use]
    pub fn is_bot_turn(&self) -> bool {
        self.config.mode == Mode::Solo
            && matches!(
                self.engine.phase(),
                Phase::AwaitingMove(side) if side != self.config.solo_side
            )
    }

    /// 人間が入力できる状態かを返す。ヒント表示の出し分けに使う。
    #[inline]
    #[must_use]
    pub fn is_human_turn(&self) -> bool {
        self.run_state == RunState::Playing && !self.engine.is_finished() && !self.is_bot_turn()
    }

    /// 通知先を返す。
    #[inline]
    pub const fn listener(&self) -> &L {
        self.engine.listener()
    }

    /// 通知先を可変で返す。
    #[inline]
    pub const fn listener_mut(&mut self) -> &mut L {
        self.engine.listener_mut()
    }

    /// 一時停止中の対局を作る。
    #[inline]
    pub fn new(config: Config, listener: L, selector: S) -> Self {
        Self {
            config,
            engine: TurnEngine::new(config.starting_side, listener),
            pending: None,
            run_state: RunState::Paused,
            selector,
        }
    }

    /// 一時停止する。予約は残るが、再開するまで発火しない。
    #[inline]
    pub fn pause(&mut self) {
        debug!("session paused");
        self.run_state = RunState::Paused;
    }

    /// 予約中のボット着手を返す。
    #[inline]
    #[must_use]
    pub const fn pending_bot_move(&self) -> Option<ScheduledBotMove> {
        self.pending
    }

    /// 初期局面に戻して一時停止する。予約中のボット着手は破棄する。
    #[inline]
    pub fn reset(&mut self) {
        self.cancel_bot_move();
        self.run_state = RunState::Paused;
        self.engine.reset();
    }

    /// 進行状態を返す。
    #[inline]
    #[must_use]
    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    /// ボットの手番なら着手を予約する（すでに予約があれば置き換える）。
    fn schedule_bot_move(&mut self, now: Instant) {
        if self.run_state != RunState::Playing || !self.is_bot_turn() {
            return;
        }

        let epoch = self.engine.state().epoch();
        let scheduled = ScheduledBotMove::new(epoch, now, self.config.bot_delay);
        debug!(epoch, delay = ?self.config.bot_delay, "bot move scheduled");
        self.pending = Some(scheduled);
    }

    /// 対局モードを切り替える。ボットの手番でなくなれば予約を取り消し、ボットの手番になれば予約する。
    #[inline]
    pub fn set_mode(&mut self, mode: Mode, now: Instant) {
        info!(?mode, "mode changed");
        self.config = self.config.with_mode(mode);
        if !self.is_bot_turn() {
            self.cancel_bot_move();
        } else if self.pending.is_none() {
            self.schedule_bot_move(now);
        }
    }

    /// 対局を開始（再開）する。
    #[inline]
    pub fn start(&mut self, now: Instant) {
        info!(mode = ?self.config.mode, solo_side = %self.config.solo_side, "session started");
        self.run_state = RunState::Playing;
        if self.pending.is_none() {
            self.schedule_bot_move(now);
        }
    }

    /// 時刻を進め、予約が期限に達していればボットが1手打つ。打ったマスを返す。
    ///
    /// 予約後にリセットや別の着手があった場合（世代番号の不一致）は何もせず予約を捨てる。
    #[inline]
    pub fn tick(&mut self, now: Instant) -> Option<Square> {
        let scheduled = self.pending?;
        if self.run_state != RunState::Playing || !scheduled.is_due(now) {
            return None;
        }
        self.pending = None;

        let epoch = self.engine.state().epoch();
        if scheduled.epoch() != epoch || !self.is_bot_turn() {
            debug!(scheduled = scheduled.epoch(), epoch, "stale bot move discarded");
            return None;
        }

        let square = self
            .selector
            .select_move(self.engine.legal_moves())
            .map(Move::square)?;
        if let Err(err) = self.engine.apply_move(square.column(), square.row()) {
            warn!(%square, %err, "bot selected a rejected move");
            return None;
        }
        debug!(%square, "bot move applied");

        // 人間側がパスになった場合はボットが続けて打つ。
        self.schedule_bot_move(now);
        Some(square)
    }

    /// ボット着手までの残り時間を返す。予約が無ければ `None`。
    #[inline]
    #[must_use]
    pub fn time_until_bot_move(&self, now: Instant) -> Option<Duration> {
        self.pending.map(|scheduled| scheduled.remaining(now))
    }
}

impl<L: Listener> Session<L, RandomMoveSelector> {
    /// `seed` で再現可能なランダムボットを持つ対局を作る。
    #[inline]
    pub fn with_seed(config: Config, listener: L, seed: u64) -> Self {
        Self::new(config, listener, RandomMoveSelector::from_seed(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::timer::ScheduledBotMove;
    use super::{Config, Mode, RunState, Session, SessionError};
    use crate::engine::board::BoardState;
    use crate::engine::events::{Event, EventLog};
    use crate::engine::game::{InvalidMoveError, Phase};
    use crate::engine::moves::Move;
    use crate::engine::types::Side;
    use core::time::Duration;
    use std::time::Instant;

    const DELAY: Duration = Duration::from_millis(1000);

    fn solo(human: Side) -> Session<EventLog> {
        let config = Config::default()
            .with_mode(Mode::Solo)
            .with_solo_side(human)
            .with_bot_delay(DELAY);
        Session::with_seed(config, EventLog::new(), 5)
    }

    #[test]
    fn input_rejected_until_started() {
        let mut session = solo(Side::Black);
        let now = Instant::now();

        assert_eq!(session.run_state(), RunState::Paused);
        assert_eq!(session.human_move(2, 3, now), Err(SessionError::NotPlaying));

        session.start(now);
        assert!(session.human_move(2, 3, now).is_ok());
    }

    #[test]
    fn solo_rejects_human_input_on_bot_turn() {
        // 人間は白、ボットの黒が先手。
        let mut session = solo(Side::White);
        let now = Instant::now();
        session.start(now);

        assert!(session.is_bot_turn());
        assert!(!session.is_human_turn());
        assert!(session.pending_bot_move().is_some());
        assert_eq!(session.human_move(2, 3, now), Err(SessionError::NotHumanTurn));
        assert_eq!(session.engine().board(), BoardState::initial());
    }

    #[test]
    fn bot_moves_only_after_delay() {
        let mut session = solo(Side::Black);
        let now = Instant::now();
        session.start(now);
        assert!(session.pending_bot_move().is_none());

        assert_eq!(session.human_move(2, 3, now), Ok(Phase::AwaitingMove(Side::White)));
        assert_eq!(session.time_until_bot_move(now), Some(DELAY));

        assert_eq!(session.tick(now + DELAY / 2), None);
        assert_eq!(session.engine().side(), Side::White);

        let square = session.tick(now + DELAY);
        assert!(square.is_some());
        assert_eq!(session.engine().side(), Side::Black);
        assert_eq!(session.engine().board().occupied().count_ones(), 6);
        assert!(session.pending_bot_move().is_none());
    }

    #[test]
    fn reset_discards_scheduled_bot_move() {
        let mut session = solo(Side::Black);
        let now = Instant::now();
        session.start(now);
        assert!(session.human_move(2, 3, now).is_ok());
        assert!(session.pending_bot_move().is_some());

        session.reset();
        assert_eq!(session.run_state(), RunState::Paused);
        assert!(session.pending_bot_move().is_none());

        session.start(now);
        assert_eq!(session.tick(now + DELAY * 2), None);
        assert_eq!(session.engine().board(), BoardState::initial());
    }

    #[test]
    fn stale_epoch_is_a_no_op() {
        let mut session = solo(Side::Black);
        let now = Instant::now();
        session.start(now);
        let stale_epoch = session.engine().state().epoch();
        assert!(session.human_move(2, 3, now).is_ok());

        // 着手前の世代で予約されたものとして扱う。
        session.pending = Some(ScheduledBotMove::new(stale_epoch, now, DELAY));
        let before = session.engine().state().clone();

        assert_eq!(session.tick(now + DELAY), None);
        assert_eq!(session.engine().state(), &before);
        assert!(session.pending_bot_move().is_none());
    }

    #[test]
    fn pause_holds_bot_until_resumed() {
        let mut session = solo(Side::Black);
        let now = Instant::now();
        session.start(now);
        assert!(session.human_move(2, 3, now).is_ok());

        session.pause();
        assert_eq!(session.tick(now + DELAY * 3), None);
        assert!(session.pending_bot_move().is_some());

        session.start(now + DELAY * 3);
        assert!(session.tick(now + DELAY * 3).is_some());
    }

    #[test]
    fn multi_mode_never_schedules_bot() {
        let config = Config::default().with_mode(Mode::Multi);
        let mut session = Session::with_seed(config, EventLog::new(), 0);
        let now = Instant::now();
        session.start(now);

        assert!(session.human_move(2, 3, now).is_ok());
        assert!(session.pending_bot_move().is_none());
        assert!(session.human_move(2, 2, now).is_ok());
        assert_eq!(session.engine().side(), Side::Black);
    }

    #[test]
    fn switching_to_multi_cancels_pending_bot() {
        let mut session = solo(Side::Black);
        let now = Instant::now();
        session.start(now);
        assert!(session.human_move(2, 3, now).is_ok());

        session.set_mode(Mode::Multi, now);
        assert!(session.pending_bot_move().is_none());
        assert!(session.human_move(2, 2, now).is_ok());

        session.set_mode(Mode::Solo, now);
        assert!(session.pending_bot_move().is_none());
        assert!(session.is_human_turn());
    }

    #[test]
    fn invalid_human_move_is_reported() {
        let mut session = solo(Side::Black);
        let now = Instant::now();
        session.start(now);

        assert!(matches!(
            session.human_move(0, 0, now),
            Err(SessionError::InvalidMove(InvalidMoveError::NoCapture(_)))
        ));
        assert!(session.pending_bot_move().is_none());
    }

    #[test]
    fn solo_game_runs_to_completion() {
        let mut session = solo(Side::Black);
        let mut clock = Instant::now();
        session.start(clock);

        for _ in 0..200 {
            if session.engine().is_finished() {
                break;
            }

            if session.is_human_turn() {
                let square = session.engine().legal_moves().first().map(Move::square);
                let applied = square.map(|sq| session.human_move(sq.column(), sq.row(), clock));
                assert!(matches!(applied, Some(Ok(_))), "human move failed: {applied:?}");
            } else {
                clock += DELAY;
                assert!(session.tick(clock).is_some());
            }

            let score = session.engine().score();
            let occupied = session.engine().board().occupied().count_ones();
            assert_eq!(score.total(), occupied);
        }

        assert!(session.engine().is_finished());
        assert!(matches!(
            session.listener().events().last(),
            Some(Event::GameEnded(_))
        ));
    }
}
