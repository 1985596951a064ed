// src/systems/transaction.rs
//! ひとつのプレイヤー操作 (移動・配布) をまとめて適用するための仕組みだよ。
//!
//! 移動 → 裏向きカードを表に → 完成チェック → 13枚取り除き → また表に...
//! という連鎖を全部ここで記録して、同じ GroupId の Undo 記録として積む。

use serde::Serialize;

use crate::components::game_state::GameState;
use crate::components::undo::{GroupId, UndoAction};
use crate::config::rules::SEQUENCE_LENGTH;
use crate::logic::rules::find_complete_sequence;

/// 操作の中で実際に起きたことひとつひとつ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Effect {
    /// `count` 枚を `from_col` から `to_col` に移した。
    Transferred { from_col: usize, to_col: usize, count: usize },
    /// 山札から `col` に1枚配った。
    Dealt { col: usize },
    /// `col` の一番上の裏向きカードを表にした。
    Flipped { col: usize },
    /// `col` の完成シーケンスを取り除いた。
    SequenceCompleted { col: usize },
}

/// `move_cards` の結果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResult {
    pub success: bool,
    /// この移動でシーケンスが完成したかどうか。
    pub completed_sequence: bool,
    /// 描き直しが必要な列。
    pub changed_cols: Vec<usize>,
    pub effects: Vec<Effect>,
}

impl MoveResult {
    pub fn rejected() -> Self {
        Self { success: false, completed_sequence: false, changed_cols: Vec::new(), effects: Vec::new() }
    }
}

/// `deal_stock` と `undo_last_action` の結果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub success: bool,
    pub changed_cols: Vec<usize>,
    pub effects: Vec<Effect>,
}

impl ActionResult {
    pub fn rejected() -> Self {
        Self { success: false, changed_cols: Vec::new(), effects: Vec::new() }
    }
}

/// 進行中の操作。GroupId をひとつ確保して、起きたことを順番に覚えておく。
pub(crate) struct Transaction {
    group_id: GroupId,
    effects: Vec<Effect>,
}

impl Transaction {
    /// ルールチェックが通った後にだけ始めること。
    pub(crate) fn begin(state: &mut GameState) -> Self {
        Self { group_id: state.allocate_group_id(), effects: Vec::new() }
    }

    pub(crate) fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub(crate) fn record(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// `col` の一番上が裏向きなら表にする。表にしたら true。
    pub(crate) fn flip_top(&mut self, state: &mut GameState, col: usize) -> bool {
        match state.tableau[col].last_mut() {
            Some(card) if !card.is_face_up => {
                card.is_face_up = true;
                self.effects.push(Effect::Flipped { col });
                true
            }
            _ => false,
        }
    }

    /// `col` の一番上に完成シーケンスがあれば取り除いて Undo 記録を積む。
    ///
    /// 取り除いた13枚はそのまま記録に移すので、盤面には残らない。
    pub(crate) fn collect_completed(&mut self, state: &mut GameState, col: usize) -> bool {
        let Some(start) = find_complete_sequence(&state.tableau[col]) else {
            return false;
        };

        let cards = state.tableau[col].split_off(start);
        debug_assert_eq!(cards.len(), SEQUENCE_LENGTH);
        state.completed_suits += 1;
        self.effects.push(Effect::SequenceCompleted { col });

        let flipped_card_after = self.flip_top(state, col);
        state.undo_stack.push(UndoAction::CompleteSequence {
            group_id: self.group_id,
            col,
            cards,
            flipped_card_after,
        });
        true
    }

    pub(crate) fn completed_any(&self) -> bool {
        self.effects
            .iter()
            .any(|effect| matches!(effect, Effect::SequenceCompleted { .. }))
    }

    pub(crate) fn into_effects(self) -> Vec<Effect> {
        self.effects
    }
}
