use serde::{Deserialize, Serialize};

use crate::rank::{rank_progress, Rank};
use crate::unit::SuitStats;
use crate::upgrade::{find_stat, max_affordable_steps, simulate_steps, StatKey, UpgradeStat};

/// 強化インジケーターのブロック総数。
pub const TOTAL_BLOCKS: u32 = 12;

/// ブロック状の強化インジケーター。
/// 強化済み、今回追加予定、残りの強化可能ブロックの3色に塗り分ける。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BlockIndicator {
    pub current: u32,
    pub pending: u32,
    pub empty: u32,
}

impl BlockIndicator {
    pub fn new(current_value: f64, cap: f64, pending_steps: u32, increment: f64) -> Self {
        if !(cap > 0.0) {
            return Self::default();
        }
        let to_blocks = |value: f64| {
            let blocks = (value / cap * f64::from(TOTAL_BLOCKS)).round();
            blocks.clamp(0.0, f64::from(TOTAL_BLOCKS)) as u32
        };
        let after_value = (current_value + f64::from(pending_steps) * increment).min(cap);
        let current = to_blocks(current_value);
        let after = to_blocks(after_value).max(current);
        Self {
            current,
            pending: after - current,
            empty: TOTAL_BLOCKS - after,
        }
    }
}

/// ステータス強化画面の1行分の試算結果。
/// 実際の購入はバックエンドが判定するため、ここでの値は確認用のプレビューに過ぎない。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpgradePreview {
    pub current_value: f64,
    pub final_value: f64,
    pub formatted_current: String,
    pub formatted_final: String,
    pub applied_steps: u32,
    pub total_cost: u64,
    pub max_affordable: u32,
    pub can_afford: bool,
    pub current_rank: Rank,
    pub preview_rank: Rank,
    pub rank_up: bool,
    /// ランク帯内の進捗率。閾値テーブルを持たないステータスは None。
    pub progress: Option<f64>,
    pub preview_progress: Option<f64>,
    pub blocks: BlockIndicator,
}

impl UpgradePreview {
    pub fn new(stat: &UpgradeStat, current_value: f64, steps: u32, credits: i64) -> Self {
        let simulation = simulate_steps(stat, current_value, steps);
        let current_rank = stat.rank_of(current_value);
        let preview_rank = stat.rank_of(simulation.final_value);
        let table = stat.rank_table;

        Self {
            current_value,
            final_value: simulation.final_value,
            formatted_current: stat.format_value(current_value),
            formatted_final: stat.format_value(simulation.final_value),
            applied_steps: simulation.applied_steps,
            total_cost: simulation.total_cost,
            max_affordable: max_affordable_steps(stat, current_value, credits),
            can_afford: u64::try_from(credits).is_ok_and(|c| c >= simulation.total_cost),
            current_rank,
            preview_rank,
            rank_up: simulation.applied_steps > 0 && preview_rank != current_rank,
            progress: table.map(|t| rank_progress(t, current_value)),
            preview_progress: table.map(|t| rank_progress(t, simulation.final_value)),
            blocks: BlockIndicator::new(
                current_value,
                stat.cap,
                simulation.applied_steps,
                stat.increment,
            ),
        }
    }
}

/// 保留中の全ステータス強化をまとめて確定した場合の合計コスト。
/// 各ステータスは機体の現在値から個別に試算する。
pub fn total_pending_cost(suit: &SuitStats, pending: &[(StatKey, u32)]) -> u64 {
    pending
        .iter()
        .filter(|(_, steps)| *steps > 0)
        .filter_map(|&(key, steps)| find_stat(key).map(|stat| (stat, steps)))
        .map(|(stat, steps)| simulate_steps(stat, stat.current_value(suit), steps).total_cost)
        .sum()
}
