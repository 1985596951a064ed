// src/systems/undo_system.rs

use itertools::Itertools;
use log::debug;

use crate::components::game_state::GameState;
use crate::components::undo::UndoAction;
use super::transaction::ActionResult;

/// 最後の操作をグループまるごと元に戻すよ！⏪
///
/// 一番上の記録の GroupId を見て、同じ ID の記録を新しい順に全部戻す。
/// 途中で止まることはない。Undo 自体も1手として数える。
/// グループの中に壊れた記録 (存在しない列など) があれば何も変えずに失敗する。
/// `won` には触らないので、クリア表示を消すのは呼び出し側の仕事。
pub fn undo_last_action(state: &mut GameState) -> ActionResult {
    let Some(group_id) = state.undo_stack.last().map(UndoAction::group_id) else {
        return ActionResult::rejected();
    };
    // 場札の外を指す記録が混ざっていたら、途中まで戻したりせずに丸ごと断る
    let group_is_sound = state
        .undo_stack
        .iter()
        .rev()
        .take_while(|action| action.group_id() == group_id)
        .all(UndoAction::is_well_formed);
    if !group_is_sound {
        return ActionResult::rejected();
    }

    let mut touched = Vec::new();
    let mut reversed = 0;
    while state
        .undo_stack
        .last()
        .is_some_and(|action| action.group_id() == group_id)
    {
        let Some(action) = state.undo_stack.pop() else {
            break;
        };
        reverse_action(state, action, &mut touched);
        reversed += 1;
    }

    state.moves += 1;
    debug!("Undid {} record(s) of group {:?}", reversed, group_id);

    ActionResult {
        success: true,
        changed_cols: touched.into_iter().sorted().dedup().collect(),
        effects: Vec::new(),
    }
}

/// 記録ひとつを逆向きに適用する。
fn reverse_action(state: &mut GameState, action: UndoAction, touched: &mut Vec<usize>) {
    match action {
        UndoAction::CompleteSequence { col, cards, flipped_card_after, .. } => {
            if flipped_card_after {
                flip_top_down(state, col);
            }
            state.tableau[col].extend(cards);
            state.completed_suits = state.completed_suits.saturating_sub(1);
            touched.push(col);
        }
        UndoAction::Move { from_col, to_col, count, flipped_card, .. } => {
            if flipped_card {
                flip_top_down(state, from_col);
            }
            let split_at = state.tableau[to_col].len().saturating_sub(count);
            let moved = state.tableau[to_col].split_off(split_at);
            state.tableau[from_col].extend(moved);
            touched.push(from_col);
            touched.push(to_col);
        }
        UndoAction::Deal { dealt_cards, .. } => {
            let mut pile = Vec::with_capacity(dealt_cards.len());
            for dealt in dealt_cards.iter().rev() {
                if let Some(mut card) = state.tableau[dealt.col].pop() {
                    debug_assert_eq!(card.id(), dealt.card.id());
                    card.is_face_up = false;
                    pile.push(card);
                }
                touched.push(dealt.col);
            }
            pile.reverse();
            state.stock.push(pile);
        }
    }
}

fn flip_top_down(state: &mut GameState, col: usize) {
    if let Some(card) = state.tableau[col].last_mut() {
        card.is_face_up = false;
    }
}
