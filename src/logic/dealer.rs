// src/logic/dealer.rs
//! 初期配置 (場札10列と山札の束) を作るよ。

use rand::Rng;

use crate::components::card::Card;
use crate::components::game_state::Difficulty;
use crate::config::rules::{initial_column_size, STOCK_DEAL_SIZE, TABLEAU_COLS};
use crate::logic::deck::{create_deck, shuffle_deck, shuffle_deck_with};

/// 配り終わった結果。
#[derive(Debug, Clone, PartialEq)]
pub struct DealResult {
    pub tableau: [Vec<Card>; TABLEAU_COLS],
    pub stock: Vec<Vec<Card>>,
}

/// シャッフルしたデッキを配る。
pub fn deal_initial(difficulty: Difficulty) -> DealResult {
    let mut deck = create_deck(difficulty);
    shuffle_deck(&mut deck);
    deal_from_deck(deck)
}

/// 乱数生成器を指定して配る。
pub fn deal_initial_with<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> DealResult {
    let mut deck = create_deck(difficulty);
    shuffle_deck_with(&mut deck, rng);
    deal_from_deck(deck)
}

/// 並び順が決まったデッキを先頭から順に配る。
///
/// 0〜3列目に6枚、4〜9列目に5枚 (計54枚)。各列の一番上だけ表向き。
/// 残り50枚はデッキの順番のまま10枚ずつの束にする。
/// 最後に作った束が最初に配られる (山札はスタックとして消費)。
pub fn deal_from_deck(deck: Vec<Card>) -> DealResult {
    let mut cards = deck.into_iter();

    let tableau: [Vec<Card>; TABLEAU_COLS] = std::array::from_fn(|col| {
        let count = initial_column_size(col);
        cards
            .by_ref()
            .take(count)
            .enumerate()
            .map(|(row, mut card)| {
                card.is_face_up = row == count - 1;
                card
            })
            .collect()
    });

    let remaining: Vec<Card> = cards
        .map(|mut card| {
            card.is_face_up = false;
            card
        })
        .collect();
    let stock = remaining
        .chunks(STOCK_DEAL_SIZE)
        .map(<[Card]>::to_vec)
        .collect();

    DealResult { tableau, stock }
}
