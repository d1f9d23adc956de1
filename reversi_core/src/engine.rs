/// 盤面（ビットボード）と石の配置。
pub mod board;
/// `TurnEngine` が描画側へ送る通知。
pub mod events;
/// 手番・パス・終局の進行。
pub mod game;
/// 反転判定と合法手の列挙。
pub mod moves;
pub mod types;

pub type BoardState = board::BoardState;
pub type Cell = types::Cell;
pub type Direction = types::Direction;
pub type Event = events::Event;
pub type EventLog = events::EventLog;
pub type GameResult = game::GameResult;
pub type InvalidMoveError = game::InvalidMoveError;
pub type MatchState = game::MatchState;
pub type Move = moves::Move;
pub type ParseBoardError = board::ParseBoardError;
pub type Phase = game::Phase;
pub type Score = game::Score;
pub type Side = types::Side;
pub type Square = types::Square;
