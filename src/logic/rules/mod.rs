// src/logic/rules/mod.rs
//! スパイダーのルール関連モジュールをまとめるよ！
//! ここにあるのは全部「読むだけ」の判定関数。状態は一切変えない。

pub mod common;
pub mod tableau;
pub mod sequence;
pub mod stock;
pub mod win_condition;


// 各モジュールから公開したい関数をここで再エクスポート！
pub use common::*;
pub use tableau::*;
pub use sequence::*;
pub use stock::*;
pub use win_condition::*;
