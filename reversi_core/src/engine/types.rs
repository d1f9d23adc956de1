use core::fmt;

/// 手番（石の色）。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Side {
    /// 先手側（A）。
    Black,
    /// 後手側（B）。
    White,
}

impl Side {
    /// 相手側の色を返す。
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

impl fmt::Display for Side {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Black => formatter.write_str("Black"),
            Self::White => formatter.write_str("White"),
        }
    }
}

/// 盤面の1マスの状態。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Cell {
    /// 空きマス。
    Empty,
    /// いずれかの石が置かれている。
    Occupied(Side),
}

/// 走査方向。`ALL` は北から時計回り。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Direction {
    /// 東（列 +1）。
    East,
    /// 北（行 -1）。
    North,
    /// 北東。
    NorthEast,
    /// 北西。
    NorthWest,
    /// 南（行 +1）。
    South,
    /// 南東。
    SouthEast,
    /// 南西。
    SouthWest,
    /// 西（列 -1）。
    West,
}

impl Direction {
    /// 捕獲判定で使う走査順（N, NE, E, SE, S, SW, W, NW）。
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// 1歩あたりの（列, 行）の増分。
    #[inline]
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::East => (1, 0),
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::NorthWest => (-1, -1),
            Self::South => (0, 1),
            Self::SouthEast => (1, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
        }
    }
}

/// 盤面上のマス（列, 行）。行0が上端。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Square(
    /// `row * 8 + column` に対応する0..=63の値。
    u8,
);

impl Square {
    /// 盤の一辺の長さ。
    pub const BOARD_LEN: u8 = 8;

    /// 列・行の全マスを列優先（列ごとに行昇順）で返す。
    #[inline]
    pub fn column_major() -> impl Iterator<Item = Self> {
        (u8::MIN..Self::BOARD_LEN).flat_map(|column| {
            (u8::MIN..Self::BOARD_LEN).filter_map(move |row| Self::new(column, row))
        })
    }

    /// そのマスを表すビット（`u64`）を返す。
    #[inline]
    #[must_use]
    pub fn bit(self) -> u64 {
        let one = u64::MIN.wrapping_add(1);
        one.checked_shl(u32::from(self.0)).unwrap_or(u64::MIN)
    }

    /// 列（0..=7）を返す。
    #[inline]
    #[must_use]
    pub const fn column(self) -> u8 {
        match self.0.checked_rem(Self::BOARD_LEN) {
            Some(value) => value,
            None => u8::MIN,
        }
    }

    /// 0..=63 のインデックスを返す。
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// 盤面座標（列, 行）から `Square` を生成する。範囲外なら `None`。
    #[inline]
    #[must_use]
    pub const fn new(column: u8, row: u8) -> Option<Self> {
        if column >= Self::BOARD_LEN || row >= Self::BOARD_LEN {
            return None;
        }

        let base = match row.checked_mul(Self::BOARD_LEN) {
            Some(value) => value,
            None => return None,
        };

        match base.checked_add(column) {
            Some(index) => Some(Self(index)),
            None => None,
        }
    }

    /// 行（0..=7）を返す。
    #[inline]
    #[must_use]
    pub const fn row(self) -> u8 {
        match self.0.checked_div(Self::BOARD_LEN) {
            Some(value) => value,
            None => u8::MIN,
        }
    }

    /// `direction` へ1歩進んだマスを返す。盤外なら `None`。
    #[inline]
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dc, dr) = direction.delta();
        let column = self.column().checked_add_signed(dc)?;
        let row = self.row().checked_add_signed(dr)?;
        Self::new(column, row)
    }
}

impl fmt::Display for Square {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.column(), self.row())
    }
}
