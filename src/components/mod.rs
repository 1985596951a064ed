// src/components/mod.rs

// ゲームのデータ部品たち！カード、Undo 記録、ゲーム全体の状態。
pub mod card;
pub mod undo;
pub mod game_state;

pub use card::{Card, CardId, Rank, Suit, ALL_RANKS, ALL_SUITS};
pub use game_state::{Difficulty, GameState};
pub use undo::{DealtCard, GroupId, UndoAction};
