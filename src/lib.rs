// src/lib.rs

// WASM と JavaScript を繋ぐための基本！
use wasm_bindgen::prelude::*;

// 自分で作ったモジュールたち！
pub mod config;     // ルールの定数
pub mod components; // カード・Undo 記録・ゲーム状態
pub mod logic;      // デッキ作成、配り方、ルール判定
pub mod systems;    // 移動・配布・Undo の本体
pub mod app;        // 保存、戦績、タイマー、入力、GameApp
pub mod logger;

#[cfg(test)]
mod test_support;

pub use app::GameApp;
pub use components::{Card, Difficulty, GameState, Rank, Suit, UndoAction};
pub use systems::{create_new_game, deal_stock, move_cards, undo_last_action, ActionResult, MoveResult};

// main 関数の代わりに、Wasm がロードされた時に最初に実行される関数だよ。
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    logger::init(level);
    log::info!("Spider solitaire module loaded.");
}
