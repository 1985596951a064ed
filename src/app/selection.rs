// src/app/selection.rs
//! クリックを「選ぶ・選び直す・外す・移動してみる」のどれかに読み替えるよ！🖱️
//!
//! ゲームのルールはここでは持たない。判定は全部 `logic::rules` に聞く。

use serde::{Deserialize, Serialize};

use crate::components::game_state::GameState;
use crate::logic::rules::{can_pick_up, valid_targets};

/// 今つかんでいる束。列 `col` の `start_index` から上。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub col: usize,
    pub start_index: usize,
}

/// クリックをどう扱うか。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// 何もしない (選択もそのまま)。
    Ignored,
    Selected(Selection),
    Deselected,
    /// 今の選択を `to_col` に動かしてみる。成否にかかわらず選択は外れる。
    MoveAttempt { from_col: usize, start_index: usize, to_col: usize },
}

/// カード `(col, index)` がクリックされたとき。
pub fn resolve_card_click(
    state: &GameState,
    selection: Option<Selection>,
    col: usize,
    index: usize,
) -> ClickOutcome {
    let face_up = state
        .tableau
        .get(col)
        .and_then(|column| column.get(index))
        .is_some_and(|card| card.is_face_up);
    // 裏向きのカードは触れない
    if !face_up {
        return ClickOutcome::Ignored;
    }

    match selection {
        Some(current) if current.col == col => {
            if index != current.start_index && can_pick_up(state, col, index) {
                ClickOutcome::Selected(Selection { col, start_index: index })
            } else {
                ClickOutcome::Deselected
            }
        }
        Some(current) => ClickOutcome::MoveAttempt {
            from_col: current.col,
            start_index: current.start_index,
            to_col: col,
        },
        None if can_pick_up(state, col, index) => ClickOutcome::Selected(Selection { col, start_index: index }),
        None => ClickOutcome::Ignored,
    }
}

/// 列そのもの (空の列やハイライトされた列) がクリックされたとき。
pub fn resolve_column_click(selection: Option<Selection>, col: usize) -> ClickOutcome {
    match selection {
        Some(current) => ClickOutcome::MoveAttempt {
            from_col: current.col,
            start_index: current.start_index,
            to_col: col,
        },
        None => ClickOutcome::Ignored,
    }
}

/// 選択中の束を置ける列 (ハイライト用)。
pub fn highlight_targets(state: &GameState, selection: Option<Selection>) -> Vec<usize> {
    selection.map_or_else(Vec::new, |current| valid_targets(state, current.col, current.start_index))
}
