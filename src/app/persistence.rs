// src/app/persistence.rs
//! ゲームの保存と復元だよ！💾 ブラウザでは localStorage に書く。
//!
//! ここで起きた失敗は全部ここで片付ける。書けなかったらログを出して諦めるし、
//! 読めないデータは「保存なし」として扱う。

use std::cell::RefCell;
use std::collections::HashMap;

use log::{info, warn};

use crate::components::game_state::{Difficulty, GameState};

pub const GAME_STATE_KEY: &str = "spider-solitaire-state";
pub const DIFFICULTY_KEY: &str = "spider-solitaire-difficulty";
pub const STATS_KEY: &str = "spider-solitaire-stats";

/// 文字列のキーと値を出し入れするだけのストレージ。Web Storage API と同じ形。
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove_item(&self, key: &str) -> Result<(), String>;
}

/// `window.localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage(&self) -> Result<web_sys::Storage, String> {
        let window = web_sys::window().ok_or_else(|| "No global window".to_string())?;
        window
            .local_storage()
            .map_err(|e| format!("localStorage unavailable: {:?}", e))?
            .ok_or_else(|| "localStorage disabled".to_string())
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        self.storage()?
            .get_item(key)
            .map_err(|e| format!("Failed to read {}: {:?}", key, e))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| format!("Failed to write {}: {:?}", key, e))
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| format!("Failed to remove {}: {:?}", key, e))
    }
}

/// メモリ上のストレージ。ネイティブでの実行やテスト用。
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 書き込みが必ず失敗するストレージ (容量オーバーのつもり)。
    pub fn read_only() -> Self {
        Self { items: RefCell::default(), read_only: true }
    }

    pub fn with_item(self, key: &str, value: &str) -> Self {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        if self.read_only {
            return Err("QuotaExceededError".to_string());
        }
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        if self.read_only {
            return Err("Storage is read-only".to_string());
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// ゲーム状態をまるごと JSON で保存する。失敗してもログを出すだけ。
pub fn save_game_state(store: &dyn KeyValueStore, state: &GameState) {
    let result = serde_json::to_string(state)
        .map_err(|e| format!("Failed to serialize game state: {}", e))
        .and_then(|json| store.set_item(GAME_STATE_KEY, &json));
    if let Err(e) = result {
        warn!("Could not save game state: {}", e);
    }
}

/// 保存されたゲームを読む。無い・壊れている・ありえない形なら None。
///
/// 場札が10列ちょうどなのはデシリアライズの時点で保証される。
/// それ以外 (枚数、山札の束、裏向きの並び、Undo ログ) は `GameState::is_consistent` で見る。
pub fn load_game_state(store: &dyn KeyValueStore) -> Option<GameState> {
    let raw = match store.get_item(GAME_STATE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Could not read saved game: {}", e);
            return None;
        }
    };

    let state: GameState = match serde_json::from_str(&raw) {
        Ok(state) => state,
        Err(e) => {
            warn!("Discarding corrupt saved game: {}", e);
            return None;
        }
    };

    if !state.is_consistent() {
        warn!("Discarding saved game that fails the consistency check.");
        return None;
    }

    info!("Restored saved {} game ({} moves).", state.difficulty.id(), state.moves);
    Some(state)
}

pub fn clear_game_state(store: &dyn KeyValueStore) {
    if let Err(e) = store.remove_item(GAME_STATE_KEY) {
        warn!("Could not clear saved game: {}", e);
    }
}

pub fn save_difficulty(store: &dyn KeyValueStore, difficulty: Difficulty) {
    if let Err(e) = store.set_item(DIFFICULTY_KEY, difficulty.id()) {
        warn!("Could not save difficulty: {}", e);
    }
}

/// 前回選んだ難易度。なければ easy。
pub fn load_difficulty(store: &dyn KeyValueStore) -> Difficulty {
    match store.get_item(DIFFICULTY_KEY) {
        Ok(Some(id)) => Difficulty::from_id(&id).unwrap_or_default(),
        Ok(None) => Difficulty::default(),
        Err(e) => {
            warn!("Could not read difficulty: {}", e);
            Difficulty::default()
        }
    }
}
