// src/config/rules.rs
//! スパイダーソリティアの盤面サイズやカード枚数の定数だよ！
//! 配る枚数とか列の数とか、ルールのあちこちで使う数字はここに集めておく。

/// 場札 (Tableau) の列数。
pub const TABLEAU_COLS: usize = 10;
/// 最初に場札へ配る枚数 (0〜3列目に6枚、4〜9列目に5枚)。
pub const INITIAL_DEAL_COUNT: usize = 54;
/// 山札の1束の枚数。1回の配布で各列に1枚ずつ配る。
pub const STOCK_DEAL_SIZE: usize = 10;
/// 完成するシーケンスの長さ (K から A まで)。
pub const SEQUENCE_LENGTH: usize = 13;
/// デッキを埋める「スート枠」の数。8枠 × 13枚 = 104枚。
pub const SUIT_SLOTS: usize = 8;
/// デッキ全体の枚数。
pub const DECK_SIZE: usize = SUIT_SLOTS * SEQUENCE_LENGTH;

/// 列ごとの初期枚数。最初の4列だけ1枚多い。
pub const fn initial_column_size(col: usize) -> usize {
    if col < 4 { 6 } else { 5 }
}
