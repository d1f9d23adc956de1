//! コアからの通知を受けて、端末向けの盤面テキストを組み立てる。

use core::fmt::{self, Write as _};
use reversi_core::engine;
use reversi_core::engine::events::Listener;

/// 描画に必要な最新状態。
#[derive(Debug)]
pub struct TerminalView {
    /// 盤面。
    board: engine::BoardState,
    /// 現手番の合法手（ヒント）。
    hints: Vec<engine::Square>,
    /// 次の描画で表示するお知らせ。
    notices: Vec<String>,
    /// 終局結果。
    result: Option<engine::GameResult>,
    /// 石数。
    score: engine::Score,
    /// 手番。
    side: engine::Side,
}

impl TerminalView {
    /// 初期状態のビューを作る（実際の内容は `TurnEngine` 生成時の通知で埋まる）。
    pub fn new() -> Self {
        Self {
            board: engine::BoardState::empty(),
            hints: Vec::new(),
            notices: Vec::new(),
            result: None,
            score: engine::Score::default(),
            side: engine::Side::Black,
        }
    }

    /// 盤面とステータス行を描画する。`show_hints` が真なら合法手を `*` で示す。
    ///
    /// # Errors
    ///
    /// 書き込み先の `fmt::Write` が失敗した場合。
    pub fn render(&mut self, show_hints: bool) -> Result<String, fmt::Error> {
        let mut out = String::new();
        for notice in self.notices.drain(..) {
            writeln!(out, "-- {notice}")?;
        }

        writeln!(out, "   0 1 2 3 4 5 6 7")?;
        for row in 0..engine::Square::BOARD_LEN {
            write!(out, "{row} ")?;
            for column in 0..engine::Square::BOARD_LEN {
                let Some(square) = engine::Square::new(column, row) else {
                    continue;
                };
                let symbol = match self.board.cell(square) {
                    engine::Cell::Occupied(engine::Side::Black) => 'X',
                    engine::Cell::Occupied(_) => 'O',
                    _ if show_hints && self.hints.contains(&square) => '*',
                    _ => '.',
                };
                write!(out, " {symbol}")?;
            }
            writeln!(out)?;
        }

        writeln!(out, "{}", self.status_text())?;
        Ok(out)
    }

    /// ステータス行を返す。
    pub fn status_text(&self) -> String {
        let black = self.score.black();
        let white = self.score.white();
        match self.result {
            Some(result) => format!("Game Over: {result}"),
            None => format!("{} to move | B={black} W={white}", self.side),
        }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl Listener for TerminalView {
    fn on_board_changed(&mut self, board: &engine::BoardState) {
        self.board = *board;
        self.result = None;
    }

    fn on_game_ended(&mut self, result: engine::GameResult) {
        self.result = Some(result);
    }

    fn on_legal_moves_changed(&mut self, moves: &[engine::Move]) {
        self.hints = moves.iter().map(engine::Move::square).collect();
    }

    fn on_score_changed(&mut self, score: engine::Score) {
        self.score = score;
    }

    fn on_turn_changed(&mut self, side: engine::Side) {
        self.side = side;
    }

    fn on_turn_passed(&mut self, side: engine::Side) {
        self.notices.push(format!("{side} has no legal move and passes"));
    }
}
