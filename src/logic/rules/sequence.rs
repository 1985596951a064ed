//! 完成したシーケンス (K から A まで同じスート) を探すよ。

use crate::components::card::{Card, Rank};
use crate::config::rules::SEQUENCE_LENGTH;
use super::common::continues_run;

/// 列の一番上の13枚が完成シーケンスなら、その開始インデックスを返す。
///
/// 見るのは一番上の13枚だけ。全部表向き・同じスートで、
/// K から A まで1つずつ下がっていれば完成。見つからなければ None。
pub fn find_complete_sequence(column: &[Card]) -> Option<usize> {
    let start = column.len().checked_sub(SEQUENCE_LENGTH)?;
    let run = &column[start..];

    let first = &run[0];
    let last = &run[SEQUENCE_LENGTH - 1];
    if first.rank() != Rank::King || last.rank() != Rank::Ace {
        return None;
    }
    if !run.iter().all(|card| card.is_face_up) {
        return None;
    }
    if !run.windows(2).all(|pair| continues_run(&pair[0], &pair[1])) {
        return None;
    }
    Some(start)
}
