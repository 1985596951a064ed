// src/app/timer.rs

use crate::components::game_state::GameState;

/// 経過時間を数えるタイマーだよ！⏱️
///
/// 自分では時計を読まないで、`now` (ミリ秒) を外から渡してもらう。
/// ブラウザでは requestAnimationFrame のたびに `tick` を呼ぶ想定。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GameTimer {
    running: bool,
    last_timestamp: f64,
}

impl GameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// 動かし始める。もう動いていれば何もしない。
    pub fn start(&mut self, now: f64) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_timestamp = now;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// 前回からの差分を `state.elapsed` に足す。止まっている間の tick は無視。
    pub fn tick(&mut self, now: f64, state: &mut GameState) {
        if !self.running {
            return;
        }
        let delta = (now - self.last_timestamp).max(0.0);
        self.last_timestamp = now;
        state.elapsed += delta;
    }
}
