// src/app/statistics.rs
//! 難易度ごとの戦績だよ！📊 勝った回数、負けた回数、最速タイムなど。

use log::warn;
use serde::{Deserialize, Serialize};

use crate::components::game_state::Difficulty;
use super::persistence::{KeyValueStore, STATS_KEY};

/// ひとつの難易度の戦績。時間はミリ秒。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub games_won: u32,
    pub games_lost: u32,
    /// 勝ったゲームの合計時間。
    pub total_time: f64,
    pub fastest_win: Option<f64>,
    pub minimum_moves: Option<u32>,
}

/// 3つの難易度ぶん。保存データに欠けている難易度は空の戦績で埋める。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllStats {
    #[serde(default)]
    pub easy: Stats,
    #[serde(default)]
    pub medium: Stats,
    #[serde(default)]
    pub hard: Stats,
}

impl AllStats {
    pub fn get(&self, difficulty: Difficulty) -> &Stats {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn get_mut(&mut self, difficulty: Difficulty) -> &mut Stats {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }
}

/// 保存されている戦績を読む。無い・壊れているときは全部ゼロから。
pub fn load_stats(store: &dyn KeyValueStore) -> AllStats {
    match store.get_item(STATS_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Discarding corrupt statistics: {}", e);
            AllStats::default()
        }),
        Ok(None) => AllStats::default(),
        Err(e) => {
            warn!("Could not read statistics: {}", e);
            AllStats::default()
        }
    }
}

pub fn save_stats(store: &dyn KeyValueStore, stats: &AllStats) {
    let result = serde_json::to_string(stats)
        .map_err(|e| format!("Failed to serialize statistics: {}", e))
        .and_then(|json| store.set_item(STATS_KEY, &json));
    if let Err(e) = result {
        warn!("Could not save statistics: {}", e);
    }
}

/// 勝ちを記録して、更新後の戦績を返すよ！🏆
pub fn record_win(store: &dyn KeyValueStore, difficulty: Difficulty, elapsed_ms: f64, moves: u32) -> AllStats {
    let mut all = load_stats(store);
    let stats = all.get_mut(difficulty);

    stats.games_won += 1;
    stats.total_time += elapsed_ms;
    if stats.fastest_win.map_or(true, |fastest| elapsed_ms < fastest) {
        stats.fastest_win = Some(elapsed_ms);
    }
    if stats.minimum_moves.map_or(true, |minimum| moves < minimum) {
        stats.minimum_moves = Some(moves);
    }

    save_stats(store, &all);
    all
}

/// 途中で投げたゲームを負けとして記録する。
pub fn record_loss(store: &dyn KeyValueStore, difficulty: Difficulty) -> AllStats {
    let mut all = load_stats(store);
    all.get_mut(difficulty).games_lost += 1;
    save_stats(store, &all);
    all
}

/// 勝ったゲームの平均時間 (ミリ秒、四捨五入)。まだ勝ってなければ None。
pub fn average_win_time(stats: &Stats) -> Option<f64> {
    if stats.games_won == 0 {
        return None;
    }
    Some((stats.total_time / f64::from(stats.games_won)).round())
}
