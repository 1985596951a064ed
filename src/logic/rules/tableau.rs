//! 場札 (Tableau) から持ち上げる・置くためのルールを定義するよ。

use crate::components::game_state::GameState;
use crate::config::rules::TABLEAU_COLS;
use super::common::{continues_run, top_card};

/// 列 `col` の `start_index` から上を持ち上げられるかチェックする。
///
/// `start_index` から一番上まで全部表向きで、
/// 同じスート・1ずつ下がる連続した並びになっていないとダメ。
pub fn can_pick_up(state: &GameState, col: usize, start_index: usize) -> bool {
    let Some(column) = state.tableau.get(col) else {
        return false;
    };
    let Some(run) = column.get(start_index..).filter(|run| !run.is_empty()) else {
        return false;
    };

    run.iter().all(|card| card.is_face_up)
        && run.windows(2).all(|pair| continues_run(&pair[0], &pair[1]))
}

/// `source_col` の `start_index` から上の束を `target_col` に置けるかチェックする。
///
/// - 同じ列には置けない。
/// - 空の列には何でも置ける。
/// - それ以外は、移動先の一番上のランクが束の一番下のランク + 1 ならOK。
///   列をまたぐときはスートが違ってもいい (束の中だけ同じスートが必要)。
pub fn can_place(state: &GameState, source_col: usize, start_index: usize, target_col: usize) -> bool {
    if source_col == target_col {
        return false;
    }
    let Some(target) = state.tableau.get(target_col) else {
        return false;
    };
    let Some(moving) = state
        .tableau
        .get(source_col)
        .and_then(|column| column.get(start_index))
    else {
        return false;
    };

    match top_card(target) {
        None => true,
        Some(top) => moving.rank().is_one_below(top.rank()),
    }
}

/// 選択中の束を置ける列をすべて返す (ハイライト表示用)。
pub fn valid_targets(state: &GameState, source_col: usize, start_index: usize) -> Vec<usize> {
    (0..TABLEAU_COLS)
        .filter(|&target| can_place(state, source_col, start_index, target))
        .collect()
}
