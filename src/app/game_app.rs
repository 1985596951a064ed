// src/app/game_app.rs

use log::{error, info};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

use crate::components::game_state::{Difficulty, GameState};
use crate::systems::transaction::MoveResult;
use super::persistence::BrowserStorage;
use super::selection::Selection;
use super::session::GameSession;
use super::statistics::{average_win_time, AllStats};

/// JS に渡す画面用のスナップショット。
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GameView<'a> {
    state: &'a GameState,
    selection: Option<Selection>,
    highlights: Vec<usize>,
    timer_running: bool,
}

/// クリックの結果。移動を試したときだけ `move_result` が入る。
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClickView {
    selection: Option<Selection>,
    highlights: Vec<usize>,
    move_result: Option<MoveResult>,
    won: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsView {
    stats: AllStats,
    /// easy, medium, hard の順。
    average_win_times: Vec<Option<f64>>,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_json::to_string(value)
        .map(|json| JsValue::from_str(&json))
        .map_err(|e| {
            let error_msg = format!("Failed to serialize response: {}", e);
            error!("{}", error_msg);
            JsValue::from_str(&error_msg)
        })
}

fn parse_difficulty(id: &str) -> Result<Difficulty, JsValue> {
    Difficulty::from_id(id).ok_or_else(|| JsValue::from_str(&format!("Unknown difficulty: {}", id)))
}

fn now() -> f64 {
    js_sys::Date::now()
}

/// ブラウザから使うスパイダーソリティアだよ！🕷️🃏
///
/// 保存先は localStorage、時刻は `Date.now()`。
/// 戻り値はどれも JSON 文字列。
#[wasm_bindgen]
pub struct GameApp {
    session: GameSession<BrowserStorage>,
}

#[wasm_bindgen]
impl GameApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let session = GameSession::restore(BrowserStorage, now());
        info!(
            "GameApp ready: {} game, {} moves.",
            session.state().difficulty.id(),
            session.state().moves
        );
        Self { session }
    }

    #[wasm_bindgen]
    pub fn get_state_json(&self) -> Result<JsValue, JsValue> {
        to_js(&GameView {
            state: self.session.state(),
            selection: self.session.selection(),
            highlights: self.session.highlights(),
            timer_running: self.session.is_timer_running(),
        })
    }

    #[wasm_bindgen]
    pub fn get_stats_json(&self) -> Result<JsValue, JsValue> {
        let stats = self.session.stats();
        let average_win_times = Difficulty::ALL
            .iter()
            .map(|&difficulty| average_win_time(stats.get(difficulty)))
            .collect();
        to_js(&StatsView { stats, average_win_times })
    }

    #[wasm_bindgen]
    pub fn click_card(&mut self, col: usize, index: usize) -> Result<JsValue, JsValue> {
        let move_result = self.session.click_card(col, index, now());
        self.click_view(move_result)
    }

    #[wasm_bindgen]
    pub fn click_column(&mut self, col: usize) -> Result<JsValue, JsValue> {
        let move_result = self.session.click_column(col, now());
        self.click_view(move_result)
    }

    #[wasm_bindgen]
    pub fn click_background(&mut self) {
        self.session.click_background();
    }

    #[wasm_bindgen]
    pub fn move_cards(&mut self, from_col: usize, start_index: usize, to_col: usize) -> Result<JsValue, JsValue> {
        let result = self.session.try_move(from_col, start_index, to_col, now());
        to_js(&result)
    }

    #[wasm_bindgen]
    pub fn deal(&mut self) -> Result<JsValue, JsValue> {
        let result = self.session.deal(now());
        to_js(&result)
    }

    #[wasm_bindgen]
    pub fn undo(&mut self) -> Result<JsValue, JsValue> {
        let result = self.session.undo(now());
        to_js(&result)
    }

    /// 今の難易度で新しいゲーム。
    #[wasm_bindgen]
    pub fn new_game(&mut self) {
        let difficulty = self.session.state().difficulty;
        self.session.new_game(difficulty, now());
    }

    /// `"easy"` / `"medium"` / `"hard"`。
    #[wasm_bindgen]
    pub fn change_difficulty(&mut self, difficulty: &str) -> Result<(), JsValue> {
        let difficulty = parse_difficulty(difficulty)?;
        self.session.change_difficulty(difficulty, now());
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_hidden(&mut self, hidden: bool) {
        self.session.set_hidden(hidden, now());
    }

    /// requestAnimationFrame から呼ぶ。経過時間 (ミリ秒) を返す。
    /// rAF のタイムスタンプは時計が違うので使わない。
    #[wasm_bindgen]
    pub fn tick(&mut self) -> f64 {
        self.session.tick(now());
        self.session.state().elapsed
    }
}

impl GameApp {
    fn click_view(&self, move_result: Option<MoveResult>) -> Result<JsValue, JsValue> {
        to_js(&ClickView {
            selection: self.session.selection(),
            highlights: self.session.highlights(),
            move_result,
            won: self.session.state().won,
        })
    }
}

impl Default for GameApp {
    fn default() -> Self {
        Self::new()
    }
}
