// src/test_support.rs
//! テスト用の盤面を組み立てるヘルパーだよ。

use crate::components::card::{Card, Rank, Suit};
use crate::components::game_state::{Difficulty, GameState};
use crate::config::rules::TABLEAU_COLS;

/// 表向きのカード。
pub fn up(suit: Suit, rank: u8) -> Card {
    down(suit, rank).face_up()
}

/// 裏向きのカード。
pub fn down(suit: Suit, rank: u8) -> Card {
    let rank = Rank::from_value(rank).expect("rank must be 1..=13");
    Card::new(suit, rank, 0)
}

/// `high` から `low` まで下がっていく表向きの同スートの束 (下から上の順)。
pub fn run(suit: Suit, high: u8, low: u8) -> Vec<Card> {
    (low..=high).rev().map(|rank| up(suit, rank)).collect()
}

/// 指定した列だけ中身を入れて、残りは空にした盤面。
pub fn state_with(columns: Vec<(usize, Vec<Card>)>, stock: Vec<Vec<Card>>) -> GameState {
    let mut tableau: [Vec<Card>; TABLEAU_COLS] = std::array::from_fn(|_| Vec::new());
    for (col, cards) in columns {
        tableau[col] = cards;
    }
    GameState::new(tableau, stock, Difficulty::Hard, 0.0)
}

/// 全列に1枚ずつ表向きのカードがある盤面 (配布テストの土台)。
pub fn filled_state(stock: Vec<Vec<Card>>) -> GameState {
    let columns = (0..TABLEAU_COLS)
        .map(|col| (col, vec![down(Suit::Club, 5), up(Suit::Club, 9)]))
        .collect();
    state_with(columns, stock)
}

/// 10枚の裏向きの束。
pub fn pile(cards: Vec<Card>) -> Vec<Card> {
    cards
        .into_iter()
        .map(|mut card| {
            card.is_face_up = false;
            card
        })
        .collect()
}
