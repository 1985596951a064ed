// src/components/game_state.rs

// serde を使う宣言！ゲーム状態はまるごと保存・復元するよ！
use serde::{Serialize, Deserialize};

use crate::components::card::{Card, Suit, ALL_SUITS};
use crate::components::undo::{GroupId, UndoAction};
use crate::config::rules::{DECK_SIZE, SEQUENCE_LENGTH, STOCK_DEAL_SIZE, SUIT_SLOTS, TABLEAU_COLS};

/// 難易度だよ！使うスートの数が変わる。
///
/// - Easy: ♠️ だけ (8回くり返し)
/// - Medium: ♠️❤️ (4回ずつ)
/// - Hard: 全4スート (2回ずつ)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// この難易度で使うスート。
    pub fn suits(self) -> &'static [Suit] {
        match self {
            Difficulty::Easy => &ALL_SUITS[..1],
            Difficulty::Medium => &ALL_SUITS[..2],
            Difficulty::Hard => &ALL_SUITS[..],
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// ゲーム全体の状態だよ！これが唯一の持ち主。
///
/// カードは場札・山札・Undo ログの間を「移動」するだけで、
/// 2か所から同時に参照されることはない。
/// 新しいゲームのたびに丸ごと作り直して、保存・復元もこの単位でやる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// 10列の場札。下から上の順。
    pub tableau: [Vec<Card>; TABLEAU_COLS],
    /// 山札の束。末尾の束から配る。
    pub stock: Vec<Vec<Card>>,
    pub completed_suits: u8,
    pub moves: u32,
    /// ゲーム開始時刻 (エポックからのミリ秒)。
    pub start_time: f64,
    /// 経過時間 (ミリ秒、一時停止中は含まない)。
    pub elapsed: f64,
    pub difficulty: Difficulty,
    pub undo_stack: Vec<UndoAction>,
    pub won: bool,
    /// 次に割り当てる GroupId。
    #[serde(default)]
    next_group_id: u32,
}

impl GameState {
    /// 配り終わった場札と山札から新しい状態を作る。
    pub fn new(
        tableau: [Vec<Card>; TABLEAU_COLS],
        stock: Vec<Vec<Card>>,
        difficulty: Difficulty,
        start_time: f64,
    ) -> Self {
        Self {
            tableau,
            stock,
            completed_suits: 0,
            moves: 0,
            start_time,
            elapsed: 0.0,
            difficulty,
            undo_stack: Vec::new(),
            won: false,
            next_group_id: 1,
        }
    }

    /// このゲーム内で新しい GroupId を払い出す。
    ///
    /// 復元した状態でカウンタが古くても、ログの一番上とは必ず別の ID になる。
    pub(crate) fn allocate_group_id(&mut self) -> GroupId {
        let after_top = self
            .undo_stack
            .last()
            .map_or(0, |action| action.group_id().0 + 1);
        let id = self.next_group_id.max(after_top);
        self.next_group_id = id + 1;
        GroupId(id)
    }

    /// まだ一手も動かしていない (タイマー未開始) 状態かどうか。
    pub fn is_pre_game(&self) -> bool {
        self.moves == 0
    }

    /// 進行中 (一手以上動かしていて、まだクリアしていない) かどうか。
    pub fn is_in_progress(&self) -> bool {
        self.moves > 0 && !self.won
    }

    /// 場札と山札に残っているカードの枚数。
    pub fn cards_in_play(&self) -> usize {
        let tableau: usize = self.tableau.iter().map(Vec::len).sum();
        let stock: usize = self.stock.iter().map(Vec::len).sum();
        tableau + stock
    }

    /// 復元した状態がこのゲームとしてありえる形かチェックする。
    ///
    /// - 完成済みの束は盤面から消えているので、それも数えて 104 枚になるはず
    /// - 山札の束は 1〜10 枚
    /// - 各列の裏向きカードは下にまとまっている (表の上に裏は来ない)
    /// - Undo ログの記録は全部場札の中を指している
    pub fn is_consistent(&self) -> bool {
        let completed = usize::from(self.completed_suits);
        completed <= SUIT_SLOTS
            && self.cards_in_play() + completed * SEQUENCE_LENGTH == DECK_SIZE
            && self
                .stock
                .iter()
                .all(|pile| !pile.is_empty() && pile.len() <= STOCK_DEAL_SIZE)
            && self.tableau.iter().all(|column| has_face_down_prefix(column))
            && self.undo_stack.iter().all(UndoAction::is_well_formed)
    }
}

/// 裏向きのカードが列の下側にだけ続いているか。
fn has_face_down_prefix(column: &[Card]) -> bool {
    column
        .iter()
        .skip_while(|card| !card.is_face_up)
        .all(|card| card.is_face_up)
}

// --- テスト ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::card::Rank;

    fn empty_state() -> GameState {
        GameState::new(std::array::from_fn(|_| Vec::new()), Vec::new(), Difficulty::Easy, 0.0)
    }

    #[test]
    fn difficulty_suit_counts() {
        assert_eq!(Difficulty::Easy.suits(), &[Suit::Spade]);
        assert_eq!(Difficulty::Medium.suits(), &[Suit::Spade, Suit::Heart]);
        assert_eq!(Difficulty::Hard.suits().len(), 4);
    }

    #[test]
    fn difficulty_ids_round_trip() {
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_id(difficulty.id()), Some(difficulty));
        }
        assert_eq!(Difficulty::from_id("extreme"), None);
    }

    #[test]
    fn group_ids_are_monotonic() {
        let mut state = empty_state();
        let first = state.allocate_group_id();
        let second = state.allocate_group_id();
        assert!(second > first);
    }

    #[test]
    fn group_id_skips_past_restored_log() {
        let mut state = empty_state();
        state.next_group_id = 0;
        state.undo_stack.push(UndoAction::Deal { group_id: GroupId(41), dealt_cards: Vec::new() });

        assert_eq!(state.allocate_group_id(), GroupId(42));
    }

    #[test]
    fn consistency_counts_completed_runs() {
        let mut state = empty_state();
        assert!(!state.is_consistent());

        state.completed_suits = 8;
        assert!(state.is_consistent(), "8 completed runs account for all 104 cards");

        state.tableau[0].push(Card::new(Suit::Spade, Rank::Ace, 0));
        assert!(!state.is_consistent());
    }

    #[test]
    fn consistency_rejects_face_down_above_face_up() {
        let mut state = empty_state();
        state.completed_suits = 7;
        let mut column: Vec<Card> = (0..12)
            .map(|_| Card::new(Suit::Spade, Rank::Two, 0))
            .collect();
        column.push(Card::new(Suit::Spade, Rank::Ace, 0).face_up());
        state.tableau[0] = column;
        assert!(state.is_consistent(), "裏向きが下にまとまっていればOK");

        state.tableau[0][11].is_face_up = true;
        state.tableau[0][12].is_face_up = false;
        assert!(!state.is_consistent(), "表の上に裏が来るのはありえない");
    }

    #[test]
    fn serialized_state_uses_camel_case_keys() {
        let state = empty_state();
        let json = serde_json::to_value(&state).expect("serialize");

        for key in ["completedSuits", "startTime", "undoStack", "nextGroupId"] {
            assert!(json.get(key).is_some(), "{} がない", key);
        }
        assert!(json.get("completed_suits").is_none());
    }

    #[test]
    fn serialized_state_uses_kebab_undo_tags() {
        let mut state = empty_state();
        state.undo_stack.push(UndoAction::Deal { group_id: GroupId(1), dealt_cards: Vec::new() });

        let json = serde_json::to_string(&state).expect("serialize");
        let restored: GameState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, state);
        assert!(json.contains("\"type\":\"deal\""));
        assert!(json.contains("\"difficulty\":\"easy\""));
    }
}
