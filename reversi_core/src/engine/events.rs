use crate::engine::board::BoardState;
use crate::engine::game::{GameResult, Score};
use crate::engine::moves::Move;
use crate::engine::types::Side;

/// `TurnEngine` が描画側へ通知するイベントの受け手。
///
/// 既定実装はすべて何もしない。必要なものだけ実装すればよい。
pub trait Listener {
    /// 盤面が変わった。
    #[inline]
    fn on_board_changed(&mut self, _board: &BoardState) {}

    /// 終局した。
    #[inline]
    fn on_game_ended(&mut self, _result: GameResult) {}

    /// 現手番の合法手（ヒント表示用）が変わった。
    #[inline]
    fn on_legal_moves_changed(&mut self, _moves: &[Move]) {}

    /// 石数が変わった。
    #[inline]
    fn on_score_changed(&mut self, _score: Score) {}

    /// 手番が変わった。
    #[inline]
    fn on_turn_changed(&mut self, _side: Side) {}

    /// `side` に合法手が無く、パスになった。
    #[inline]
    fn on_turn_passed(&mut self, _side: Side) {}
}

/// 通知を捨てる。
impl Listener for () {}

/// 記録されたイベント。
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Event {
    /// 盤面更新。
    BoardChanged(BoardState),
    /// 終局。
    GameEnded(GameResult),
    /// 合法手更新。
    LegalMovesChanged(Vec<Move>),
    /// 石数更新。
    ScoreChanged(Score),
    /// 手番交代。
    TurnChanged(Side),
    /// パス。
    TurnPassed(Side),
}

/// 受け取ったイベントを順に記録する `Listener`。
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EventLog {
    /// 記録済みイベント。
    events: Vec<Event>,
}

impl EventLog {
    /// 記録を空にして、それまでのイベントを返す。
    #[inline]
    pub fn drain(&mut self) -> Vec<Event> {
        core::mem::take(&mut self.events)
    }

    /// 記録済みイベントを返す。
    #[inline]
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// 空の記録を作る。
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl Listener for EventLog {
    #[inline]
    fn on_board_changed(&mut self, board: &BoardState) {
        self.events.push(Event::BoardChanged(*board));
    }

    #[inline]
    fn on_game_ended(&mut self, result: GameResult) {
        self.events.push(Event::GameEnded(result));
    }

    #[inline]
    fn on_legal_moves_changed(&mut self, moves: &[Move]) {
        self.events.push(Event::LegalMovesChanged(moves.to_vec()));
    }

    #[inline]
    fn on_score_changed(&mut self, score: Score) {
        self.events.push(Event::ScoreChanged(score));
    }

    #[inline]
    fn on_turn_changed(&mut self, side: Side) {
        self.events.push(Event::TurnChanged(side));
    }

    #[inline]
    fn on_turn_passed(&mut self, side: Side) {
        self.events.push(Event::TurnPassed(side));
    }
}
