//! 山札 (Stock) から配れるかのルールだよ。

use crate::components::game_state::GameState;

/// 山札から1束配れるかチェックする。
///
/// 山札が残っていて、しかも場札に空の列がひとつもないときだけ配れる。
/// 空の列があるうちは配れないのがスパイダーの昔からの決まり！
pub fn can_deal(state: &GameState) -> bool {
    !state.stock.is_empty() && state.tableau.iter().all(|column| !column.is_empty())
}
