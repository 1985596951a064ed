// src/components/undo.rs
//! 元に戻す (Undo) 用の記録だよ。

use serde::{Serialize, Deserialize};

use crate::components::card::Card;
use crate::config::rules::{SEQUENCE_LENGTH, STOCK_DEAL_SIZE, TABLEAU_COLS};

/// ひとつのプレイヤー操作から生まれた記録をまとめる ID。
///
/// 移動や配布が自動完成を引き起こすと、同じ GroupId の記録が複数積まれる。
/// Undo は常にグループ単位でまるごと戻す！
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u32);

/// 配布で1列に置かれたカードの記録。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealtCard {
    pub col: usize,
    pub card: Card,
}

/// Undo ログの1件。種類ごとに必要なフィールドだけを持つよ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum UndoAction {
    /// 列から列へのカード移動。
    Move {
        group_id: GroupId,
        from_col: usize,
        to_col: usize,
        count: usize,
        /// 移動元の新しい一番上を表にしたかどうか。
        flipped_card: bool,
    },
    /// 山札1束の配布。配った順に記録する。
    Deal {
        group_id: GroupId,
        dealt_cards: Vec<DealtCard>,
    },
    /// 完成した13枚の取り除き。
    CompleteSequence {
        group_id: GroupId,
        col: usize,
        cards: Vec<Card>,
        /// 取り除いた後に新しい一番上を表にしたかどうか。
        flipped_card_after: bool,
    },
}

impl UndoAction {
    pub fn group_id(&self) -> GroupId {
        match self {
            UndoAction::Move { group_id, .. }
            | UndoAction::Deal { group_id, .. }
            | UndoAction::CompleteSequence { group_id, .. } => *group_id,
        }
    }

    /// 戻すときに場札の外を指したりカードを取りこぼしたりしない形かどうか。
    ///
    /// 列番号は全部 10 未満、移動は1枚以上、配布は1束ぶん以内、
    /// 完成の記録はちょうど13枚。
    pub fn is_well_formed(&self) -> bool {
        match self {
            UndoAction::Move { from_col, to_col, count, .. } => {
                *from_col < TABLEAU_COLS && *to_col < TABLEAU_COLS && from_col != to_col && *count > 0
            }
            UndoAction::Deal { dealt_cards, .. } => {
                !dealt_cards.is_empty()
                    && dealt_cards.len() <= STOCK_DEAL_SIZE
                    && dealt_cards.iter().all(|dealt| dealt.col < TABLEAU_COLS)
            }
            UndoAction::CompleteSequence { col, cards, .. } => {
                *col < TABLEAU_COLS && cards.len() == SEQUENCE_LENGTH
            }
        }
    }
}
