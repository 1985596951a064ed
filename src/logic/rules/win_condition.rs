//! ゲームの勝利条件判定ロジックを定義するよ。

use crate::components::game_state::GameState;
use crate::config::rules::SUIT_SLOTS;

/// 8組すべて完成したらクリア！🏆
pub fn is_won(state: &GameState) -> bool {
    usize::from(state.completed_suits) >= SUIT_SLOTS
}
