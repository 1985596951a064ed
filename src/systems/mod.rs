// src/systems/mod.rs
//! ゲーム状態を書き換えるエンジン部分だよ！
//!
//! どの操作も「全部適用する」か「何もしない」のどちらか。
//! 途中で起きる自動めくり・自動完成も全部この中で片付けるから、
//! 呼び出し側は結果の `changed_cols` を見て描き直すだけでOK。

pub mod transaction;
pub mod move_card_system;
pub mod deal_system;
pub mod undo_system;

pub use transaction::{ActionResult, Effect, MoveResult};
pub use move_card_system::move_cards;
pub use deal_system::{create_new_game, create_new_game_with, deal_stock};
pub use undo_system::undo_last_action;
