// src/systems/move_card_system.rs

use log::debug;

use crate::components::game_state::GameState;
use crate::components::undo::UndoAction;
use crate::logic::rules::{can_pick_up, can_place};
use super::transaction::{Effect, MoveResult, Transaction};

/// 列 `from_col` の `start_index` から上の束を `to_col` に移動するよ！🖱️💨
///
/// ルール違反なら何も変えずに `success: false` を返す (ログも出さない)。
/// 成功したら:
/// 1. 束を移動先の上に順番どおり積む
/// 2. 移動元の新しい一番上が裏向きなら表にする
/// 3. Undo 記録を積んで、手数を1増やす
/// 4. 移動先だけ完成チェック (移動で完成できるのは移動先だけ)
pub fn move_cards(state: &mut GameState, from_col: usize, start_index: usize, to_col: usize) -> MoveResult {
    if !can_pick_up(state, from_col, start_index) || !can_place(state, from_col, start_index, to_col) {
        return MoveResult::rejected();
    }

    let mut tx = Transaction::begin(state);

    let moved = state.tableau[from_col].split_off(start_index);
    let count = moved.len();
    state.tableau[to_col].extend(moved);
    tx.record(Effect::Transferred { from_col, to_col, count });

    let flipped_card = tx.flip_top(state, from_col);
    state.undo_stack.push(UndoAction::Move {
        group_id: tx.group_id(),
        from_col,
        to_col,
        count,
        flipped_card,
    });
    state.moves += 1;

    tx.collect_completed(state, to_col);

    let completed_sequence = tx.completed_any();
    debug!(
        "Moved {} card(s) from column {} to {} (flipped: {}, completed: {})",
        count, from_col, to_col, flipped_card, completed_sequence
    );

    MoveResult {
        success: true,
        completed_sequence,
        changed_cols: vec![from_col, to_col],
        effects: tx.into_effects(),
    }
}

// --- テスト ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::card::Suit;
    use crate::test_support::{down, run, state_with, up};

    #[test]
    fn illegal_move_changes_nothing() {
        let mut state = state_with(
            vec![(0, vec![up(Suit::Spade, 5)]), (1, vec![up(Suit::Spade, 9)])],
            Vec::new(),
        );
        let before = state.clone();

        let result = move_cards(&mut state, 0, 0, 1);

        assert_eq!(result, MoveResult::rejected());
        assert_eq!(state, before, "ルール違反なら状態は変わらないはず");
    }

    #[test]
    fn picking_up_face_down_is_rejected() {
        let mut state = state_with(vec![(0, vec![down(Suit::Spade, 5), up(Suit::Spade, 4)])], Vec::new());
        let before = state.clone();

        assert!(!move_cards(&mut state, 0, 0, 1).success);
        assert_eq!(state, before);
    }

    #[test]
    fn ace_to_empty_column_flips_source() {
        let mut state = state_with(
            vec![(0, vec![down(Suit::Heart, 9), up(Suit::Spade, 1)])],
            Vec::new(),
        );

        let result = move_cards(&mut state, 0, 1, 3);

        assert!(result.success);
        assert!(!result.completed_sequence);
        assert_eq!(result.changed_cols, vec![0, 3]);
        assert_eq!(state.tableau[3], vec![up(Suit::Spade, 1)]);
        assert!(state.tableau[0][0].is_face_up, "移動元の新しい一番上は表になるはず");
        assert_eq!(state.moves, 1);
        assert!(matches!(
            state.undo_stack.as_slice(),
            [UndoAction::Move { from_col: 0, to_col: 3, count: 1, flipped_card: true, .. }]
        ));
        assert!(result.effects.contains(&Effect::Flipped { col: 0 }));
    }

    #[test]
    fn run_moves_in_order_onto_higher_rank() {
        let mut state = state_with(
            vec![(0, run(Suit::Club, 7, 5)), (1, vec![up(Suit::Diamond, 8)])],
            Vec::new(),
        );

        let result = move_cards(&mut state, 0, 0, 1);

        assert!(result.success);
        assert!(state.tableau[0].is_empty());
        let ranks: Vec<u8> = state.tableau[1].iter().map(|card| card.rank().value()).collect();
        assert_eq!(ranks, vec![8, 7, 6, 5]);
        assert!(matches!(
            state.undo_stack.as_slice(),
            [UndoAction::Move { count: 3, flipped_card: false, .. }]
        ));
    }

    #[test]
    fn completing_a_sequence_removes_it_in_the_same_group() {
        // 移動先: 裏向き + ♠️K..2、移動元: ♠️A
        let mut target = vec![down(Suit::Heart, 3)];
        target.extend(run(Suit::Spade, 13, 2));
        let mut state = state_with(vec![(0, vec![up(Suit::Spade, 1)]), (1, target)], Vec::new());

        let result = move_cards(&mut state, 0, 0, 1);

        assert!(result.success);
        assert!(result.completed_sequence);
        assert_eq!(state.completed_suits, 1);
        assert_eq!(state.tableau[1].len(), 1);
        assert!(state.tableau[1][0].is_face_up, "完成後の新しい一番上は表になるはず");
        assert_eq!(state.moves, 1, "完成は手数に数えない");

        assert_eq!(state.undo_stack.len(), 2);
        assert_eq!(state.undo_stack[0].group_id(), state.undo_stack[1].group_id());
        match &state.undo_stack[1] {
            UndoAction::CompleteSequence { col, cards, flipped_card_after, .. } => {
                assert_eq!(*col, 1);
                assert_eq!(cards.len(), 13);
                assert!(*flipped_card_after);
            }
            other => panic!("完成の記録が積まれていない: {:?}", other),
        }
    }

    #[test]
    fn each_move_gets_a_fresh_group() {
        let mut state = state_with(
            vec![(0, vec![up(Suit::Spade, 1)]), (1, vec![up(Suit::Heart, 1)])],
            Vec::new(),
        );

        assert!(move_cards(&mut state, 0, 0, 5).success);
        assert!(move_cards(&mut state, 1, 0, 6).success);

        assert_ne!(state.undo_stack[0].group_id(), state.undo_stack[1].group_id());
    }
}
