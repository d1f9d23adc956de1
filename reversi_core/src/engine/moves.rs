use crate::engine::board::BoardState;
use crate::engine::types::{Cell, Direction, Side, Square};

/// 合法手（着手マスと、それによって反転する石の列）。
///
/// 反転が1つも無い `Move` は生成できない。
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    /// 反転する石（方向順、方向内は近い順）。
    captures: Vec<Square>,
    /// 着手マス。
    square: Square,
}

impl Move {
    /// 反転する石を返す。
    #[inline]
    #[must_use]
    pub fn captures(&self) -> &[Square] {
        &self.captures
    }

    /// `side` が `square` に置いた場合の手を評価する。空きマスでない、または反転が無ければ `None`。
    #[inline]
    #[must_use]
    pub fn evaluate(board: BoardState, side: Side, square: Square) -> Option<Self> {
        if board.cell(square) != Cell::Empty {
            return None;
        }

        let captured = captures(board, side, square);
        if captured.is_empty() {
            return None;
        }

        Some(Self {
            captures: captured,
            square,
        })
    }

    /// 着手マスを返す。
    #[inline]
    #[must_use]
    pub const fn square(&self) -> Square {
        self.square
    }
}

/// `side` が `square` に石を置いたときに反転する相手の石を返す。
///
/// 8方向（N, NE, E, SE, S, SW, W, NW）の順に走査し、各方向では近い順に並ぶ。
/// 相手の石の連続が自分の石で挟まれた場合だけ、その連続が結果に加わる。
/// 盤端や空きマスで途切れた連続は捨てる。
///
/// `square` が空きマスであることは呼び出し側が保証する。
#[inline]
#[must_use]
pub fn captures(board: BoardState, side: Side, square: Square) -> Vec<Square> {
    let mut captured = Vec::new();
    for direction in Direction::ALL {
        captured.extend(captures_in_dir(board, side, square, direction));
    }
    captured
}

/// 1方向ぶんの反転候補を返す（挟めなければ空）。
fn captures_in_dir(
    board: BoardState,
    side: Side,
    from: Square,
    direction: Direction,
) -> Vec<Square> {
    let mut run = Vec::new();
    let mut cursor = from.step(direction);

    while let Some(square) = cursor {
        match board.cell(square) {
            Cell::Occupied(owner) if owner == side => {
                return run;
            }
            Cell::Occupied(_) => run.push(square),
            Cell::Empty => return Vec::new(),
        }
        cursor = square.step(direction);
    }

    // 盤端に達した。
    Vec::new()
}

/// `side` の合法手があるかを返す（最初の1手で打ち切る）。
#[inline]
#[must_use]
pub fn has_legal_move(board: BoardState, side: Side) -> bool {
    Square::column_major().any(|square| Move::evaluate(board, side, square).is_some())
}

/// `side` の合法手を列優先（列ごとに行昇順）で返す。手番は変更しない。
#[inline]
#[must_use]
pub fn legal_moves(board: BoardState, side: Side) -> Vec<Move> {
    Square::column_major()
        .filter_map(|square| Move::evaluate(board, side, square))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Move, captures, has_legal_move, legal_moves};
    use crate::engine::board::BoardState;
    use crate::engine::types::{Cell, Side, Square};

    fn sq(column: u8, row: u8) -> Square {
        Square::new(column, row).unwrap_or_else(|| panic!("bad square ({column}, {row})"))
    }

    fn board(text: &str) -> BoardState {
        text.parse()
            .unwrap_or_else(|err| panic!("bad board diagram: {err}"))
    }

    #[test]
    fn opening_moves_for_first_side() {
        let moves = legal_moves(BoardState::initial(), Side::Black);
        let squares: Vec<Square> = moves.iter().map(Move::square).collect();
        assert_eq!(squares, vec![sq(2, 3), sq(3, 2), sq(4, 5), sq(5, 4)]);

        for mv in &moves {
            assert_eq!(mv.captures().len(), 1, "opening move {mv:?}");
        }
        assert_eq!(moves.first().map(Move::captures), Some(&[sq(3, 3)][..]));
    }

    #[test]
    fn opening_moves_for_second_side() {
        let squares: Vec<Square> = legal_moves(BoardState::initial(), Side::White)
            .iter()
            .map(Move::square)
            .collect();
        assert_eq!(squares, vec![sq(2, 4), sq(3, 5), sq(4, 2), sq(5, 3)]);
    }

    #[test]
    fn run_reaching_edge_is_not_captured() {
        // 白の連続が東端まで続き、黒で挟めない。
        let position = board(
            "
            ........
            ........
            ........
            .....WWW
            ........
            ........
            ........
            ........
            ",
        );
        assert!(captures(position, Side::Black, sq(4, 3)).is_empty());
        assert!(legal_moves(position, Side::Black).is_empty());
        assert!(!has_legal_move(position, Side::Black));
    }

    #[test]
    fn run_ending_on_empty_is_not_captured() {
        let position = board(
            "
            ........
            ........
            ........
            ..WW.B..
            ........
            ........
            ........
            ........
            ",
        );
        assert!(captures(position, Side::Black, sq(1, 3)).is_empty());
        assert!(Move::evaluate(position, Side::Black, sq(1, 3)).is_none());
    }

    #[test]
    fn captures_follow_direction_then_distance_order() {
        // (3,3) に黒を置くと、北に2石、東に1石、南西に1石を挟む。
        let position = board(
            "
            ...B....
            ...W....
            ...W....
            ....WB..
            ..W.....
            .B......
            ........
            ........
            ",
        );
        let captured = captures(position, Side::Black, sq(3, 3));
        assert_eq!(captured, vec![sq(3, 2), sq(3, 1), sq(4, 3), sq(2, 4)]);
    }

    #[test]
    fn occupied_square_is_never_a_move() {
        let position = BoardState::initial();
        assert!(Move::evaluate(position, Side::Black, sq(3, 3)).is_none());
        assert!(Move::evaluate(position, Side::Black, sq(3, 4)).is_none());
    }

    #[test]
    fn finder_agrees_with_evaluator_on_every_empty_cell() {
        let position = board(
            "
            ........
            ..W.....
            ..WBB...
            ..WWB...
            ..BWW...
            ...B.W..
            ........
            ........
            ",
        );
        for side in [Side::Black, Side::White] {
            let moves = legal_moves(position, side);
            for square in Square::column_major() {
                if position.cell(square) != Cell::Empty {
                    continue;
                }
                let listed = moves.iter().any(|mv| mv.square() == square);
                let capturing = !captures(position, side, square).is_empty();
                assert_eq!(listed, capturing, "{side} at {square}");
            }
            assert_eq!(has_legal_move(position, side), !moves.is_empty());
        }
    }
}
