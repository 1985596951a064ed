// src/systems/deal_system.rs

use log::{debug, info};
use rand::Rng;

use crate::components::game_state::{Difficulty, GameState};
use crate::components::undo::{DealtCard, UndoAction};
use crate::config::rules::TABLEAU_COLS;
use crate::logic::dealer::{deal_initial, deal_initial_with, DealResult};
use crate::logic::rules::can_deal;
use super::transaction::{ActionResult, Effect, Transaction};

/// 新しいゲームを作るよ！🎉
///
/// `now` はゲーム開始時刻 (エポックからのミリ秒)。
pub fn create_new_game(difficulty: Difficulty, now: f64) -> GameState {
    start_game(deal_initial(difficulty), difficulty, now)
}

/// 乱数生成器を指定して新しいゲームを作る。
pub fn create_new_game_with<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R, now: f64) -> GameState {
    start_game(deal_initial_with(difficulty, rng), difficulty, now)
}

fn start_game(dealt: DealResult, difficulty: Difficulty, now: f64) -> GameState {
    info!("New {} game dealt ({} stock piles).", difficulty.id(), dealt.stock.len());
    GameState::new(dealt.tableau, dealt.stock, difficulty, now)
}

/// 山札から1束配る。各列に1枚ずつ表向きで置くよ。
///
/// 配れないとき (山札が空、または空の列がある) は何も変えずに失敗を返す。
/// 配った後は全列を左から順に完成チェックする。
/// 同時に複数の列が完成することもあって、その記録は全部この配布と同じグループ。
pub fn deal_stock(state: &mut GameState) -> ActionResult {
    if !can_deal(state) {
        return ActionResult::rejected();
    }
    // 1束は各列に1枚ずつ。空の束や10枚を超える束は配らない
    let pile_fits = state
        .stock
        .last()
        .is_some_and(|pile| (1..=TABLEAU_COLS).contains(&pile.len()));
    if !pile_fits {
        return ActionResult::rejected();
    }
    let Some(pile) = state.stock.pop() else {
        return ActionResult::rejected();
    };

    let mut tx = Transaction::begin(state);
    let mut dealt_cards = Vec::with_capacity(pile.len());

    for (col, mut card) in pile.into_iter().enumerate() {
        dealt_cards.push(DealtCard { col, card: card.clone() });
        card.is_face_up = true;
        state.tableau[col].push(card);
        tx.record(Effect::Dealt { col });
    }

    let dealt_count = dealt_cards.len();
    state.undo_stack.push(UndoAction::Deal { group_id: tx.group_id(), dealt_cards });
    state.moves += 1;

    let mut completed = 0;
    for col in 0..TABLEAU_COLS {
        if tx.collect_completed(state, col) {
            completed += 1;
        }
    }

    debug!(
        "Dealt {} card(s) from stock, {} pile(s) left, {} sequence(s) completed",
        dealt_count,
        state.stock.len(),
        completed
    );

    ActionResult {
        success: true,
        changed_cols: (0..TABLEAU_COLS).collect(),
        effects: tx.into_effects(),
    }
}
