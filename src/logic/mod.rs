// src/logic/mod.rs
//! 盤面を変えない純粋なロジック: デッキ作成、初期配布、ルール判定。

pub mod deck;
pub mod dealer;
pub mod rules;
