// src/app/session.rs
//! 1回のプレイをまとめて面倒みるよ！🎮
//!
//! ゲームエンジン・タイマー・保存・戦績をつなぐ係。描画は持たないので、
//! 呼び出し側は返ってきた `changed_cols` を見て描き直せばいい。

use log::{debug, info};
use rand::{thread_rng, Rng};

use crate::components::game_state::{Difficulty, GameState};
use crate::logic::rules::is_won;
use crate::systems::deal_system::{create_new_game_with, deal_stock};
use crate::systems::move_card_system::move_cards;
use crate::systems::transaction::{ActionResult, MoveResult};
use crate::systems::undo_system::undo_last_action;
use super::persistence::{
    clear_game_state, load_difficulty, load_game_state, save_difficulty, save_game_state, KeyValueStore,
};
use super::selection::{highlight_targets, resolve_card_click, resolve_column_click, ClickOutcome, Selection};
use super::statistics::{load_stats, record_loss, record_win, AllStats};
use super::timer::GameTimer;

pub struct GameSession<S: KeyValueStore> {
    store: S,
    state: GameState,
    timer: GameTimer,
    selection: Option<Selection>,
}

impl<S: KeyValueStore> GameSession<S> {
    /// 保存されたゲームがあれば続きから、なければ前回の難易度で新しく配る。
    pub fn restore(store: S, now: f64) -> Self {
        Self::restore_with(store, &mut thread_rng(), now)
    }

    pub fn restore_with<R: Rng + ?Sized>(store: S, rng: &mut R, now: f64) -> Self {
        let state = match load_game_state(&store) {
            Some(saved) => saved,
            None => create_new_game_with(load_difficulty(&store), rng, now),
        };

        let mut timer = GameTimer::new();
        // 途中のゲームを復元したときだけタイマーを再開する
        if state.is_in_progress() {
            timer.start(now);
        }

        Self { store, state, timer, selection: None }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn highlights(&self) -> Vec<usize> {
        highlight_targets(&self.state, self.selection)
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn stats(&self) -> AllStats {
        load_stats(&self.store)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// カードのクリック。移動を試したときだけその結果を返す。
    pub fn click_card(&mut self, col: usize, index: usize, now: f64) -> Option<MoveResult> {
        let outcome = resolve_card_click(&self.state, self.selection, col, index);
        self.apply_click(outcome, now)
    }

    /// 列のクリック。
    pub fn click_column(&mut self, col: usize, now: f64) -> Option<MoveResult> {
        let outcome = resolve_column_click(self.selection, col);
        self.apply_click(outcome, now)
    }

    /// 何もないところのクリックは選択を外すだけ。
    pub fn click_background(&mut self) {
        self.selection = None;
    }

    fn apply_click(&mut self, outcome: ClickOutcome, now: f64) -> Option<MoveResult> {
        match outcome {
            ClickOutcome::Ignored => None,
            ClickOutcome::Selected(selection) => {
                self.selection = Some(selection);
                None
            }
            ClickOutcome::Deselected => {
                self.selection = None;
                None
            }
            ClickOutcome::MoveAttempt { from_col, start_index, to_col } => {
                Some(self.try_move(from_col, start_index, to_col, now))
            }
        }
    }

    /// 束を動かしてみる。選択は成否にかかわらず外れる。
    pub fn try_move(&mut self, from_col: usize, start_index: usize, to_col: usize, now: f64) -> MoveResult {
        self.selection = None;
        let was_pre_game = self.state.is_pre_game();

        let result = move_cards(&mut self.state, from_col, start_index, to_col);
        if result.success {
            self.after_action(was_pre_game, now);
        }
        result
    }

    /// 山札から配る。
    pub fn deal(&mut self, now: f64) -> ActionResult {
        self.selection = None;
        let was_pre_game = self.state.is_pre_game();

        let result = deal_stock(&mut self.state);
        if result.success {
            self.after_action(was_pre_game, now);
        }
        result
    }

    /// 1グループ戻す。クリア済みでも戻せて、その場合はクリア表示も消える。
    pub fn undo(&mut self, now: f64) -> ActionResult {
        self.selection = None;

        let result = undo_last_action(&mut self.state);
        if result.success {
            self.state.won = false;
            save_game_state(&self.store, &self.state);
            if !self.timer.is_running() && self.state.moves > 0 {
                self.timer.start(now);
            }
        }
        result
    }

    /// 新しいゲーム。今のゲームが途中 (一手以上動かして未クリア) なら負けを記録する。
    pub fn new_game(&mut self, difficulty: Difficulty, now: f64) {
        self.new_game_with(difficulty, &mut thread_rng(), now);
    }

    pub fn new_game_with<R: Rng + ?Sized>(&mut self, difficulty: Difficulty, rng: &mut R, now: f64) {
        if self.state.is_in_progress() {
            record_loss(&self.store, self.state.difficulty);
            info!("Abandoned {} game after {} moves.", self.state.difficulty.id(), self.state.moves);
        }

        self.timer.pause();
        clear_game_state(&self.store);
        self.state = create_new_game_with(difficulty, rng, now);
        save_difficulty(&self.store, difficulty);
        self.selection = None;
        save_game_state(&self.store, &self.state);
    }

    /// 難易度を変える = その難易度で新しいゲーム。
    pub fn change_difficulty(&mut self, difficulty: Difficulty, now: f64) {
        self.new_game(difficulty, now);
    }

    /// ページが隠れたら止めて、戻ってきたら進行中のときだけ再開。
    pub fn set_hidden(&mut self, hidden: bool, now: f64) {
        if hidden {
            self.timer.tick(now, &mut self.state);
            self.timer.pause();
        } else if self.state.is_in_progress() {
            self.timer.start(now);
        }
    }

    /// アニメーションフレームごとに呼ぶ。
    pub fn tick(&mut self, now: f64) {
        self.timer.tick(now, &mut self.state);
    }

    fn after_action(&mut self, was_pre_game: bool, now: f64) {
        if was_pre_game {
            self.timer.start(now);
        }
        save_game_state(&self.store, &self.state);

        if is_won(&self.state) && !self.state.won {
            self.finish(now);
        }
    }

    /// クリア！🎉 タイマーを止めて保存して、勝ちを記録する。
    fn finish(&mut self, now: f64) {
        self.timer.tick(now, &mut self.state);
        self.timer.pause();
        self.state.won = true;
        save_game_state(&self.store, &self.state);

        record_win(&self.store, self.state.difficulty, self.state.elapsed, self.state.moves);
        info!(
            "Won {} game in {} moves ({} ms).",
            self.state.difficulty.id(),
            self.state.moves,
            self.state.elapsed
        );
        debug!("Undo log holds {} record(s) at win.", self.state.undo_stack.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::persistence::{MemoryStorage, DIFFICULTY_KEY, GAME_STATE_KEY};
    use crate::components::card::Suit;
    use crate::test_support::{run, state_with, up};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fresh(store: MemoryStorage) -> GameSession<MemoryStorage> {
        GameSession::restore_with(store, &mut StdRng::seed_from_u64(99), 0.0)
    }

    /// あと ♠️A を置けばクリアの盤面 (7スート完成済み、5手目)。
    fn almost_won() -> MemoryStorage {
        let mut state = state_with(vec![(0, vec![up(Suit::Spade, 1)]), (1, run(Suit::Spade, 13, 2))], Vec::new());
        state.completed_suits = 7;
        state.moves = 5;
        state.elapsed = 1000.0;
        assert!(state.is_consistent());

        let store = MemoryStorage::new();
        save_game_state(&store, &state);
        store
    }

    #[test]
    fn fresh_start_uses_stored_difficulty() {
        let store = MemoryStorage::new().with_item(DIFFICULTY_KEY, "medium");
        let session = fresh(store);

        assert_eq!(session.state().difficulty, Difficulty::Medium);
        assert!(session.state().is_pre_game());
        assert!(!session.is_timer_running(), "一手目まではタイマーは止まったまま");
    }

    #[test]
    fn first_action_starts_timer_and_saves() {
        let mut session = fresh(MemoryStorage::new());

        assert!(session.deal(100.0).success);
        assert!(session.is_timer_running());
        session.tick(600.0);
        assert_eq!(session.state().elapsed, 500.0);

        let saved = load_game_state(session.store()).expect("保存されているはず");
        assert_eq!(saved.moves, 1);
    }

    #[test]
    fn restored_game_in_progress_resumes_timer() {
        let session = fresh(almost_won());

        assert_eq!(session.state().moves, 5);
        assert!(session.is_timer_running());
    }

    #[test]
    fn winning_records_stats_and_stops_timer() {
        let mut session = fresh(almost_won());

        let result = session.try_move(0, 0, 1, 2000.0);

        assert!(result.success);
        assert!(result.completed_sequence);
        assert!(session.state().won);
        assert!(!session.is_timer_running());
        assert_eq!(session.state().elapsed, 3000.0);

        let stats = session.stats();
        assert_eq!(stats.hard.games_won, 1);
        assert_eq!(stats.hard.minimum_moves, Some(6));
        assert_eq!(stats.hard.fastest_win, Some(3000.0));
        assert!(load_game_state(session.store()).is_some_and(|saved| saved.won));
    }

    #[test]
    fn undo_after_win_clears_won_and_restarts_timer() {
        let mut session = fresh(almost_won());
        assert!(session.try_move(0, 0, 1, 2000.0).success);

        let result = session.undo(2500.0);

        assert!(result.success);
        assert!(!session.state().won);
        assert_eq!(session.state().completed_suits, 7);
        assert!(session.is_timer_running());
        assert_eq!(session.stats().hard.games_won, 1, "勝ちの記録は消えない");
    }

    #[test]
    fn undo_with_nothing_to_undo_changes_nothing() {
        let mut session = fresh(MemoryStorage::new());
        let before = session.state().clone();

        assert!(!session.undo(10.0).success);
        assert_eq!(session.state(), &before);
        assert!(!session.is_timer_running());
    }

    #[test]
    fn abandoning_a_started_game_counts_as_loss() {
        let mut session = fresh(MemoryStorage::new());
        assert!(session.deal(0.0).success);

        session.new_game_with(Difficulty::Hard, &mut StdRng::seed_from_u64(1), 50.0);

        assert_eq!(session.stats().easy.games_lost, 1);
        assert_eq!(session.state().difficulty, Difficulty::Hard);
        assert!(session.state().is_pre_game());
        assert!(!session.is_timer_running());
        assert_eq!(load_difficulty(session.store()), Difficulty::Hard);
        assert!(session.store().contains(GAME_STATE_KEY));
    }

    #[test]
    fn new_game_before_first_move_is_not_a_loss() {
        let mut session = fresh(MemoryStorage::new());

        session.new_game_with(Difficulty::Easy, &mut StdRng::seed_from_u64(2), 0.0);

        assert_eq!(session.stats(), AllStats::default());
    }

    #[test]
    fn new_game_after_win_is_not_a_loss() {
        let mut session = fresh(almost_won());
        assert!(session.try_move(0, 0, 1, 2000.0).success);

        session.new_game_with(Difficulty::Hard, &mut StdRng::seed_from_u64(3), 3000.0);

        assert_eq!(session.stats().hard.games_lost, 0);
        assert_eq!(session.stats().hard.games_won, 1);
    }

    #[test]
    fn hiding_the_page_pauses_the_timer() {
        let mut session = fresh(almost_won());
        session.tick(100.0);

        session.set_hidden(true, 300.0);
        assert!(!session.is_timer_running());
        session.tick(10_000.0);
        assert_eq!(session.state().elapsed, 1300.0);

        session.set_hidden(false, 20_000.0);
        assert!(session.is_timer_running());
        session.tick(20_500.0);
        assert_eq!(session.state().elapsed, 1800.0);
    }

    #[test]
    fn showing_the_page_before_first_move_keeps_timer_stopped() {
        let mut session = fresh(MemoryStorage::new());
        session.set_hidden(false, 10.0);
        assert!(!session.is_timer_running());
    }

    #[test]
    fn clicks_select_then_move() {
        let mut session = fresh(almost_won());

        assert_eq!(session.click_card(0, 0, 500.0), None);
        assert_eq!(session.selection(), Some(Selection { col: 0, start_index: 0 }));
        assert!(session.highlights().contains(&1));

        let moved = session.click_card(1, 11, 600.0).expect("移動を試すはず");
        assert!(moved.success);
        assert_eq!(session.selection(), None);
        assert!(session.state().won);
    }

    #[test]
    fn failed_move_still_clears_selection() {
        let mut session = fresh(almost_won());
        // ♠️K..2 をつかんで ♠️A の上には置けない
        assert_eq!(session.click_card(1, 0, 0.0), None);
        assert!(session.selection().is_some());

        let moved = session.click_card(0, 0, 0.0).expect("移動を試すはず");
        assert!(!moved.success);
        assert_eq!(session.selection(), None);
        assert_eq!(session.state().moves, 5);
    }
}
