use crate::engine::board::BoardState;
use crate::engine::events::Listener;
use crate::engine::moves::{Move, legal_moves};
use crate::engine::types::{Cell, Side, Square};
use core::fmt;
use tracing::{debug, info};

/// 色ごとの石数。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Score {
    /// 黒の石数。
    black: u32,
    /// 白の石数。
    white: u32,
}

impl Score {
    /// 黒の石数を返す。
    #[inline]
    #[must_use]
    pub const fn black(self) -> u32 {
        self.black
    }

    /// 盤面の石数から生成する。
    #[inline]
    #[must_use]
    pub const fn from_board(board: BoardState) -> Self {
        let (black, white) = board.counts();
        Self { black, white }
    }

    /// 指定色の石数を返す。
    #[inline]
    #[must_use]
    pub const fn get(self, side: Side) -> u32 {
        match side {
            Side::Black => self.black,
            Side::White => self.white,
        }
    }

    /// 石数を指定して生成する。
    #[inline]
    #[must_use]
    pub const fn new(black: u32, white: u32) -> Self {
        Self { black, white }
    }

    /// 合計石数を返す。
    #[inline]
    #[must_use]
    pub const fn total(self) -> u32 {
        self.black.saturating_add(self.white)
    }

    /// `side` が1石置いて `flipped` 石を反転させた後の石数を返す。
    #[must_use]
    const fn after_move(self, side: Side, flipped: u32) -> Self {
        let gained = flipped.saturating_add(1);
        match side {
            Side::Black => Self {
                black: self.black.saturating_add(gained),
                white: self.white.saturating_sub(flipped),
            },
            Side::White => Self {
                black: self.black.saturating_sub(flipped),
                white: self.white.saturating_add(gained),
            },
        }
    }

    /// 白の石数を返す。
    #[inline]
    #[must_use]
    pub const fn white(self) -> u32 {
        self.white
    }
}

/// 終局結果。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct GameResult {
    /// 黒の石数。
    black: u32,
    /// 白の石数。
    white: u32,
}

impl GameResult {
    /// 黒の石数を返す。
    #[inline]
    #[must_use]
    pub const fn black(self) -> u32 {
        self.black
    }

    /// 白の石数を返す。
    #[inline]
    #[must_use]
    pub const fn white(self) -> u32 {
        self.white
    }

    /// 勝者を返す。引き分けなら `None`。
    #[inline]
    #[must_use]
    pub const fn winner(self) -> Option<Side> {
        if self.black > self.white {
            Some(Side::Black)
        } else if self.black < self.white {
            Some(Side::White)
        } else {
            None
        }
    }
}

impl From<Score> for GameResult {
    #[inline]
    fn from(score: Score) -> Self {
        Self {
            black: score.black,
            white: score.white,
        }
    }
}

impl fmt::Display for GameResult {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self.winner() {
            Some(side) => format!("{side} wins"),
            None => String::from("Draw"),
        };
        write!(formatter, "{outcome} | B={} W={}", self.black, self.white)
    }
}

/// 対局の段階。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Phase {
    /// `Side` の着手待ち（合法手が必ず1つ以上ある）。
    AwaitingMove(Side),
    /// 終局（双方に合法手が無い）。
    Finished(GameResult),
}

/// 着手の適用に失敗した理由。状態は変更されない。
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum InvalidMoveError {
    /// すでに終局している。
    #[error("the game is already finished")]
    GameFinished,
    /// 置いても1石も反転しない。
    #[error("{0} does not capture any disc")]
    NoCapture(Square),
    /// すでに石がある。
    #[error("{0} is already occupied")]
    Occupied(Square),
    /// 盤外の座標。
    #[error("({column}, {row}) is outside the board")]
    OutOfRange {
        /// 列。
        column: u8,
        /// 行。
        row: u8,
    },
}

/// 1局ぶんの状態。`TurnEngine` だけが変更する。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchState {
    /// 盤面。
    board: BoardState,
    /// 着手・リセットのたびに進む世代番号。
    epoch: u64,
    /// `side` の合法手（終局時は空）。
    legal_moves: Vec<Move>,
    /// 段階。
    phase: Phase,
    /// 石数。
    score: Score,
    /// 手番。
    side: Side,
}

impl MatchState {
    /// 盤面を返す。
    #[inline]
    #[must_use]
    pub const fn board(&self) -> BoardState {
        self.board
    }

    /// 世代番号を返す。
    #[inline]
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// 終局しているかを返す。
    #[inline]
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// 現手番の合法手を返す。
    #[inline]
    #[must_use]
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    /// 段階を返す。
    #[inline]
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// 石数を返す。
    #[inline]
    #[must_use]
    pub const fn score(&self) -> Score {
        self.score
    }

    /// 手番を返す。
    #[inline]
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// 評価前の状態を作る。`phase` は `TurnEngine::enter` で確定する。
    fn unsettled(board: BoardState, side: Side, epoch: u64) -> Self {
        Self {
            board,
            epoch,
            legal_moves: Vec::new(),
            phase: Phase::AwaitingMove(side),
            score: Score::from_board(board),
            side,
        }
    }
}

/// 手番・パス・終局判定を管理し、変化を `Listener` に通知する。
#[derive(Debug)]
pub struct TurnEngine<L: Listener = ()> {
    /// 通知先。
    listener: L,
    /// リセット時の先手。
    starting_side: Side,
    /// 現在の対局状態。
    state: MatchState,
}

impl<L: Listener> TurnEngine<L> {
    /// 着手待ちの状態を確定して通知する。
    fn await_move(&mut self, side: Side, moves: Vec<Move>) {
        self.state.side = side;
        self.state.legal_moves = moves;
        self.state.phase = Phase::AwaitingMove(side);
        self.listener.on_turn_changed(side);
        self.listener.on_legal_moves_changed(&self.state.legal_moves);
    }

    /// 着手を適用する。
    ///
    /// 成功すると石を置いて反転させ、石数を更新し、相手の手番（必要ならパス・終局）へ進む。
    ///
    /// # Errors
    ///
    /// 盤外、石のあるマス、終局後、反転の無いマスの順に判定し、`InvalidMoveError` を返す。
    /// 失敗時は状態は変わらない。石のあるマスは終局後でも `Occupied` になる。
    #[inline]
    pub fn apply_move(&mut self, column: u8, row: u8) -> Result<Phase, InvalidMoveError> {
        let square = Square::new(column, row).ok_or(InvalidMoveError::OutOfRange { column, row })?;
        if self.state.board.cell(square) != Cell::Empty {
            return Err(InvalidMoveError::Occupied(square));
        }

        let Phase::AwaitingMove(side) = self.state.phase else {
            return Err(InvalidMoveError::GameFinished);
        };

        let index = self
            .state
            .legal_moves
            .iter()
            .position(|mv| mv.square() == square)
            .ok_or(InvalidMoveError::NoCapture(square))?;
        let mv = self.state.legal_moves.swap_remove(index);

        let flipped = u32::try_from(mv.captures().len()).unwrap_or(u32::MAX);
        self.state.board = self.state.board.place(side, square, mv.captures());
        self.state.score = self.state.score.after_move(side, flipped);
        self.state.epoch = self.state.epoch.wrapping_add(1);
        debug!(
            side = %side,
            square = %square,
            flipped,
            black = self.state.score.black(),
            white = self.state.score.white(),
            "move applied"
        );

        self.listener.on_board_changed(&self.state.board);
        self.listener.on_score_changed(self.state.score);
        self.enter(side.opponent());

        Ok(self.state.phase)
    }

    /// 盤面を返す。
    #[inline]
    #[must_use]
    pub const fn board(&self) -> BoardState {
        self.state.board
    }

    /// `side` の着手待ちに入る。合法手が無ければ相手へパスし、双方に無ければ終局する。
    fn enter(&mut self, side: Side) {
        let moves = legal_moves(self.state.board, side);
        if !moves.is_empty() {
            self.await_move(side, moves);
            return;
        }

        let other = side.opponent();
        let other_moves = legal_moves(self.state.board, other);
        if !other_moves.is_empty() {
            debug!(side = %side, "no legal move, turn passes");
            self.listener.on_turn_passed(side);
            self.await_move(other, other_moves);
            return;
        }

        let result = GameResult::from(self.state.score);
        info!(
            black = result.black(),
            white = result.white(),
            winner = ?result.winner(),
            "game finished"
        );
        self.state.side = side;
        self.state.legal_moves.clear();
        self.state.phase = Phase::Finished(result);
        self.listener.on_legal_moves_changed(&[]);
        self.listener.on_game_ended(result);
    }

    /// 任意の盤面から対局を始める。石数は盤面から数える。
    ///
    /// 盤面の妥当性（石が重ならない等）は `BoardState` が保証する。
    #[inline]
    pub fn from_position(board: BoardState, side: Side, listener: L) -> Self {
        let mut engine = Self {
            listener,
            starting_side: side,
            state: MatchState::unsettled(board, side, u64::MIN),
        };
        engine.start();
        engine
    }

    /// 通知先を取り出す。
    #[inline]
    pub fn into_listener(self) -> L {
        self.listener
    }

    /// 対局が終わっているかを返す。
    #[inline]
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// 現手番の合法手を返す。
    #[inline]
    #[must_use]
    pub fn legal_moves(&self) -> &[Move] {
        self.state.legal_moves()
    }

    /// 通知先を返す。
    #[inline]
    pub const fn listener(&self) -> &L {
        &self.listener
    }

    /// 通知先を可変で返す。
    #[inline]
    pub const fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// 初期局面から対局を始める。
    #[inline]
    pub fn new(starting_side: Side, listener: L) -> Self {
        Self::from_position(BoardState::initial(), starting_side, listener)
    }

    /// 段階を返す。
    #[inline]
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.state.phase
    }

    /// 初期局面で対局をやり直す。世代番号は進む。
    #[inline]
    pub fn reset(&mut self) {
        let epoch = self.state.epoch.wrapping_add(1);
        info!(epoch, starting_side = %self.starting_side, "match reset");
        self.state = MatchState::unsettled(BoardState::initial(), self.starting_side, epoch);
        self.start();
    }

    /// 石数を返す。
    #[inline]
    #[must_use]
    pub const fn score(&self) -> Score {
        self.state.score
    }

    /// 手番を返す。
    #[inline]
    #[must_use]
    pub const fn side(&self) -> Side {
        self.state.side
    }

    /// 盤面と石数を通知してから最初の手番に入る。
    fn start(&mut self) {
        self.listener.on_board_changed(&self.state.board);
        self.listener.on_score_changed(self.state.score);
        self.enter(self.state.side);
    }

    /// 対局状態を返す。
    #[inline]
    #[must_use]
    pub const fn state(&self) -> &MatchState {
        &self.state
    }
}
