use crate::engine::types::{Cell, Side, Square};
use core::fmt;
use core::str::FromStr;

/// 初期配置（黒）の1つ目: (4, 3)。
const START_BLACK_0: u32 = 28;

/// 初期配置（黒）の2つ目: (3, 4)。
const START_BLACK_1: u32 = 35;

/// 初期配置（白）の1つ目: (3, 3)。
const START_WHITE_0: u32 = 27;

/// 初期配置（白）の2つ目: (4, 4)。
const START_WHITE_1: u32 = 36;

/// `u64` の 1 を表す値。
const U64_ONE: u64 = u64::MIN.wrapping_add(1);

/// 8x8 の盤面。色ごとの占有ビットボードを持ち、両者は重ならない。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct BoardState {
    /// 黒石のビットボード。
    black: u64,
    /// 白石のビットボード。
    white: u64,
}

/// 盤面図の読み込みに失敗した理由。
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseBoardError {
    /// 行数が8ではない。
    #[error("expected 8 rows, found {0}")]
    WrongRowCount(usize),
    /// ある行のマス数が8ではない。
    #[error("row {row} does not have 8 cells")]
    WrongRowLength {
        /// 問題の行（0始まり）。
        row: usize,
    },
    /// 解釈できない記号。
    #[error("unknown board symbol {0:?}")]
    UnknownSymbol(char),
}

impl BoardState {
    /// 黒石のビットボードを返す。
    #[inline]
    #[must_use]
    pub const fn black(self) -> u64 {
        self.black
    }

    /// 指定マスの状態を返す。
    #[inline]
    #[must_use]
    pub fn cell(self, square: Square) -> Cell {
        let mask = square.bit();
        if self.black & mask != u64::MIN {
            Cell::Occupied(Side::Black)
        } else if self.white & mask != u64::MIN {
            Cell::Occupied(Side::White)
        } else {
            Cell::Empty
        }
    }

    /// 指定色の石数を返す。
    #[inline]
    #[must_use]
    pub const fn count(self, side: Side) -> u32 {
        self.stones(side).count_ones()
    }

    /// 石数（黒、白）を返す。
    #[inline]
    #[must_use]
    pub const fn counts(self) -> (u32, u32) {
        (self.black.count_ones(), self.white.count_ones())
    }

    /// 石の無い盤面を返す。
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            black: u64::MIN,
            white: u64::MIN,
        }
    }

    /// 生のビットボードから盤面を生成する。黒白が重なる場合は `None`。
    #[inline]
    #[must_use]
    pub const fn from_raw(black: u64, white: u64) -> Option<Self> {
        if black & white != u64::MIN {
            return None;
        }
        Some(Self { black, white })
    }

    /// 初期局面を返す（中央4マスに斜めに2石ずつ）。
    #[inline]
    #[must_use]
    pub const fn initial() -> Self {
        let b0 = match U64_ONE.checked_shl(START_BLACK_0) {
            Some(value) => value,
            None => u64::MIN,
        };
        let b1 = match U64_ONE.checked_shl(START_BLACK_1) {
            Some(value) => value,
            None => u64::MIN,
        };
        let w0 = match U64_ONE.checked_shl(START_WHITE_0) {
            Some(value) => value,
            None => u64::MIN,
        };
        let w1 = match U64_ONE.checked_shl(START_WHITE_1) {
            Some(value) => value,
            None => u64::MIN,
        };

        Self {
            black: b0 | b1,
            white: w0 | w1,
        }
    }

    /// 盤面の占有ビットボードを返す。
    #[inline]
    #[must_use]
    pub const fn occupied(self) -> u64 {
        self.black | self.white
    }

    /// `side` の石を `square` に置き、`captured` を全て `side` に反転させた盤面を返す。
    ///
    /// 合法性の確認は呼び出し側（`TurnEngine`）の責務。
    #[inline]
    #[must_use]
    pub(crate) fn place(self, side: Side, square: Square, captured: &[Square]) -> Self {
        let flipped = captured
            .iter()
            .fold(u64::MIN, |mask, sq| mask | sq.bit());
        let player = self.stones(side) | square.bit() | flipped;
        let opponent = self.stones(side.opponent()) & !flipped;

        match side {
            Side::Black => Self {
                black: player,
                white: opponent,
            },
            Side::White => Self {
                black: opponent,
                white: player,
            },
        }
    }

    /// 指定色のビットボードを返す。
    #[inline]
    #[must_use]
    pub const fn stones(self, side: Side) -> u64 {
        match side {
            Side::Black => self.black,
            Side::White => self.white,
        }
    }

    /// 白石のビットボードを返す。
    #[inline]
    #[must_use]
    pub const fn white(self) -> u64 {
        self.white
    }
}

impl Default for BoardState {
    #[inline]
    fn default() -> Self {
        Self::initial()
    }
}

/// 8行の盤面図として表示する。`B` が黒、`W` が白、`.` が空き。
impl fmt::Display for BoardState {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in u8::MIN..Square::BOARD_LEN {
            for column in u8::MIN..Square::BOARD_LEN {
                let symbol = match Square::new(column, row).map(|sq| self.cell(sq)) {
                    Some(Cell::Occupied(Side::Black)) => 'B',
                    Some(Cell::Occupied(Side::White)) => 'W',
                    Some(Cell::Empty) | None => '.',
                };
                write!(formatter, "{symbol}")?;
            }
            writeln!(formatter)?;
        }
        Ok(())
    }
}

impl FromStr for BoardState {
    type Err = ParseBoardError;

    /// 8行の盤面図を読み込む。`B`/`X` が黒、`W`/`O` が白、`.` が空き。空白は無視する。
    #[inline]
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != usize::from(Square::BOARD_LEN) {
            return Err(ParseBoardError::WrongRowCount(rows.len()));
        }

        let mut board = Self::empty();
        for (row_index, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|ch| !ch.is_whitespace()).collect();
            if symbols.len() != usize::from(Square::BOARD_LEN) {
                return Err(ParseBoardError::WrongRowLength { row: row_index });
            }

            for (column_index, symbol) in symbols.iter().enumerate() {
                let side = match *symbol {
                    'B' | 'X' => Side::Black,
                    'W' | 'O' => Side::White,
                    '.' => continue,
                    other => return Err(ParseBoardError::UnknownSymbol(other)),
                };
                let square = u8::try_from(column_index)
                    .ok()
                    .zip(u8::try_from(row_index).ok())
                    .and_then(|(column, row)| Square::new(column, row));
                if let Some(sq) = square {
                    match side {
                        Side::Black => board.black |= sq.bit(),
                        Side::White => board.white |= sq.bit(),
                    }
                }
            }
        }

        Ok(board)
    }
}
