//! ルール判定で共通して使うヘルパー関数を置くよ。

use crate::components::card::Card;

/// `upper` が `lower` の上に同じスートで1つ小さいランクとして続いているか。
///
/// 場札の列は下から上の順に並んでいるので、K の上に Q、Q の上に J...となる。
pub(crate) fn continues_run(lower: &Card, upper: &Card) -> bool {
    upper.suit() == lower.suit() && upper.rank().is_one_below(lower.rank())
}

/// 列の一番上のカード。空なら None。
pub fn top_card(column: &[Card]) -> Option<&Card> {
    column.last()
}
