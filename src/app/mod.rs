// src/app/mod.rs
//! GameApp の中身を役割ごとに分けて置くモジュールだよ！

pub mod persistence;
pub mod statistics;
pub mod timer;
pub mod selection;
pub mod session;
pub mod game_app;

pub use game_app::GameApp;
pub use session::GameSession;
