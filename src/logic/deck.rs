// src/logic/deck.rs

use rand::{seq::SliceRandom, thread_rng, Rng};

use crate::components::card::{Card, ALL_RANKS};
use crate::components::game_state::Difficulty;
use crate::config::rules::{DECK_SIZE, SUIT_SLOTS};

/// スパイダー用の104枚デッキを作る関数だよ！🃏
///
/// 8つの「スート枠」を、難易度で選んだスートをくり返して埋める。
/// 各枠が A〜K の13枚を1セット出すので、合計 104 枚。
/// コピー番号には枠の番号を使うから、同じスート・ランクでも ID はかぶらない！
/// 作った時点では全部裏向き。
pub fn create_deck(difficulty: Difficulty) -> Vec<Card> {
    let suits = difficulty.suits();
    let mut deck = Vec::with_capacity(DECK_SIZE);

    for copy in 0..SUIT_SLOTS {
        let suit = suits[copy % suits.len()];
        for &rank in ALL_RANKS.iter() {
            deck.push(Card::new(suit, rank, copy as u8));
        }
    }
    deck
}

/// デッキをシャッフルする関数だよ (スレッドローカルな乱数を使う)。
pub fn shuffle_deck(deck: &mut [Card]) {
    let mut rng = thread_rng();
    shuffle_deck_with(deck, &mut rng);
}

/// 乱数生成器を外から渡してシャッフルする。テストではシード固定の rng を渡す。
///
/// `SliceRandom::shuffle` は Fisher-Yates なので、全順列が等確率になる。
pub fn shuffle_deck_with<R: Rng + ?Sized>(deck: &mut [Card], rng: &mut R) {
    deck.shuffle(rng);
}
