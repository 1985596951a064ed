// src/components/card.rs

use std::fmt;

// serde を使う宣言！カード情報を保存したり JS に渡したりする時に使うよ！
use serde::{Serialize, Deserialize};

/// カードのスート（マーク）を表す列挙型だよ！♠️❤️♦️♣️
///
/// スパイダーでは難易度によって使うスートの数が 1 / 2 / 4 と変わるんだ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spade,   // ♠️
    Heart,   // ❤️
    Diamond, // ♦️
    Club,    // ♣️
}

impl Suit {
    /// カード ID に使う1文字の頭文字。
    pub fn initial(self) -> char {
        match self {
            Suit::Spade => 's',
            Suit::Heart => 'h',
            Suit::Diamond => 'd',
            Suit::Club => 'c',
        }
    }
}

/// 全スート。難易度はこの先頭から必要な数だけ使う。
pub const ALL_SUITS: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];

/// カードのランク（数字）を表す列挙型だよ！ A, 2, 3, ..., K
///
/// PartialOrd, Ord も付けて大小比較できるようにしてある。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace = 1, // A は 1
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,  // 11
    Queen, // 12
    King,  // 13
}

/// A から K まで昇順に並べた全ランク。
pub const ALL_RANKS: [Rank; 13] = [
    Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
    Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King,
];

impl Rank {
    /// 数値としてのランク (A=1 ... K=13)。
    pub fn value(self) -> u8 {
        self as u8
    }

    /// 1〜13 の数値からランクに戻す。範囲外なら None。
    pub fn from_value(value: u8) -> Option<Rank> {
        ALL_RANKS.get(usize::from(value).checked_sub(1)?).copied()
    }

    /// ひとつ下のランクかどうか (`self` が `other` より 1 小さい)。
    pub fn is_one_below(self, other: Rank) -> bool {
        self.value() + 1 == other.value()
    }
}

/// カードの一意な ID だよ。
///
/// 104 枚のデッキには同じスート・ランクが最大8枚あるので、
/// 何枚目のコピーか (`copy`) まで含めて区別する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId {
    pub suit: Suit,
    pub rank: Rank,
    pub copy: u8,
}

impl fmt::Display for CardId {
    /// `s-1-0` みたいな形式 (スート頭文字-ランク-コピー番号)。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.suit.initial(), self.rank.value(), self.copy)
    }
}

/// カードそのものだよ！🃏
///
/// スート・ランク・コピー番号は作った後は変わらない。
/// 変わるのは表向きかどうか (`is_face_up`) だけ！
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    suit: Suit,
    rank: Rank,
    copy: u8,
    pub is_face_up: bool,
}

impl Card {
    /// 裏向きの新しいカードを作る。
    pub fn new(suit: Suit, rank: Rank, copy: u8) -> Self {
        Self { suit, rank, copy, is_face_up: false }
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn id(&self) -> CardId {
        CardId { suit: self.suit, rank: self.rank, copy: self.copy }
    }

    /// 表向きの同じカードを返す (テストや配布で便利)。
    pub fn face_up(mut self) -> Self {
        self.is_face_up = true;
        self
    }
}
