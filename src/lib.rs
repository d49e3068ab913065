use std::collections::BTreeMap;

use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

pub mod battle;
pub mod error;
pub mod garage;
pub mod interface;
pub mod preferences;
pub mod rank;
pub mod unit;
pub mod upgrade;
mod utils;

use crate::battle::BattleReplay;
use crate::preferences::{LocalStorageStore, Onboarding};
use crate::rank::RankTable;
use crate::upgrade::{StatKey, UpgradeStat};
use crate::utils::to_js;

static INIT: std::sync::Once = std::sync::Once::new();

fn initialize() {
    INIT.call_once(|| {
        utils::set_panic_hook();
        wasm_logger::init(wasm_logger::Config::default()); // ロガー初期化
        info!("Logger initialized");
    });
}

fn parse<T: DeserializeOwned>(value: JsValue, what: &str) -> Option<T> {
    match serde_wasm_bindgen::from_value::<T>(value) {
        Ok(v) => Some(v),
        Err(err) => {
            error!("Failed to parse {}: {:?}", what, err);
            None
        }
    }
}

fn lookup_stat(stat_key: &str) -> Option<&'static UpgradeStat> {
    let stat = StatKey::from_name(stat_key).and_then(upgrade::find_stat);
    if stat.is_none() {
        warn!("Unknown upgrade stat: {}", stat_key);
    }
    stat
}

// JS の数値は f64 で届くため、クレジットは飽和変換で整数化する
fn credits_from_js(credits: f64) -> i64 {
    credits as i64
}

// -- バトルリプレイ --

/// 受け取ったバトルログを一度だけ正規化して保持するリプレイ。
/// スライダー操作のたびに `snapshot` を呼び出す。
#[wasm_bindgen]
pub struct Replay {
    log: Vec<interface::BattleLogEvent>,
    replay: BattleReplay,
}

#[wasm_bindgen]
impl Replay {
    #[wasm_bindgen(constructor)]
    pub fn new(logs_val: JsValue) -> Replay {
        initialize();
        let log: Vec<interface::BattleLogEvent> = parse(logs_val, "battle logs").unwrap_or_default();
        let replay = BattleReplay::new(&log);
        info!("Replay loaded: {} turns", replay.last_turn());
        Replay { log, replay }
    }

    /// 保存済みの戦闘履歴など、JSON 文字列のままのログから読み込む。
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(text: &str) -> Replay {
        initialize();
        let log: Vec<interface::BattleLogEvent> = match serde_json::from_str(text) {
            Ok(log) => log,
            Err(err) => {
                error!("Failed to parse battle log JSON: {}", err);
                Vec::new()
            }
        };
        let replay = BattleReplay::new(&log);
        Replay { log, replay }
    }

    #[wasm_bindgen(js_name = lastTurn)]
    pub fn last_turn(&self) -> u32 {
        self.replay.last_turn()
    }

    /// 指定機体の `turn` 時点のスナップショット。機体データが読めない場合は null。
    pub fn snapshot(&self, unit_id: &str, initial_val: JsValue, turn: u32) -> JsValue {
        let Some(initial) = parse::<interface::UnitInitialState>(initial_val, "unit") else {
            return JsValue::NULL;
        };
        to_js(&self.replay.snapshot(unit_id, &initial, turn))
    }

    /// 全機体の `turn` 時点のスナップショットを機体IDをキーに返す。
    pub fn snapshots(&self, units_val: JsValue, turn: u32) -> JsValue {
        let units: Vec<interface::UnitInitialState> = parse(units_val, "units").unwrap_or_default();
        to_js(&self.replay.snapshots(&units, turn))
    }

    /// `turn` ちょうどに発生した演出を機体IDをキーに返す。
    pub fn effects(&self, turn: u32) -> JsValue {
        to_js(&battle::turn_effects(&self.log, turn))
    }
}

/// 1回限りのスナップショット再構成。
#[wasm_bindgen]
pub fn reconstruct_snapshot(
    unit_id: &str,
    initial_val: JsValue,
    logs_val: JsValue,
    upto_turn: u32,
) -> JsValue {
    initialize();

    let Some(initial) = parse::<interface::UnitInitialState>(initial_val, "unit") else {
        return JsValue::NULL;
    };
    let Some(log) = parse::<Vec<interface::BattleLogEvent>>(logs_val, "battle logs") else {
        // ログが読めなくても初期状態は表示できる
        return to_js(&interface::UnitSnapshot::initial(&initial));
    };
    debug!("Reconstructing {} at turn {}", unit_id, upto_turn);
    to_js(&battle::reconstruct(unit_id, &initial, &log, upto_turn))
}

#[wasm_bindgen]
pub fn hp_band(current: u32, max: u32) -> JsValue {
    to_js(&interface::HpBand::of(current, max))
}

// -- ステータス強化 --

#[wasm_bindgen]
pub fn upgrade_table() -> JsValue {
    initialize();
    to_js(upgrade::upgrade_stats())
}

/// 1段階分のコスト。未知のステータスは 0。
#[wasm_bindgen]
pub fn step_cost(stat_key: &str, value: f64) -> f64 {
    lookup_stat(stat_key).map_or(0.0, |stat| upgrade::step_cost(stat, value) as f64)
}

#[wasm_bindgen]
pub fn simulate_upgrade(stat_key: &str, current_value: f64, steps: u32) -> JsValue {
    match lookup_stat(stat_key) {
        Some(stat) => to_js(&upgrade::simulate_steps(stat, current_value, steps)),
        None => to_js(&interface::StepSimulation {
            total_cost: 0,
            final_value: current_value,
            applied_steps: 0,
        }),
    }
}

#[wasm_bindgen]
pub fn max_affordable_steps(stat_key: &str, current_value: f64, credits: f64) -> u32 {
    lookup_stat(stat_key).map_or(0, |stat| {
        upgrade::max_affordable_steps(stat, current_value, credits_from_js(credits))
    })
}

/// 機体データ (`SuitStats`) から現在値を読み取り、強化プレビューを返す。
#[wasm_bindgen]
pub fn upgrade_preview(stat_key: &str, suit_val: JsValue, steps: u32, credits: f64) -> JsValue {
    initialize();
    let Some(stat) = lookup_stat(stat_key) else {
        return JsValue::NULL;
    };
    let Some(suit) = parse::<interface::SuitStats>(suit_val, "mobile suit") else {
        return JsValue::NULL;
    };
    to_js(&interface::UpgradePreview::new(
        stat,
        stat.current_value(&suit),
        steps,
        credits_from_js(credits),
    ))
}

/// 保留中の強化 (`{ "hp": 2, "armor": 1 }` の形) をまとめて確定した場合の合計コスト。
/// 未知のステータス名は無視する。
#[wasm_bindgen]
pub fn total_pending_cost(suit_val: JsValue, pending_val: JsValue) -> f64 {
    initialize();
    let Some(suit) = parse::<interface::SuitStats>(suit_val, "mobile suit") else {
        return 0.0;
    };
    let pending: BTreeMap<String, u32> = parse(pending_val, "pending steps").unwrap_or_default();
    let pending: Vec<(StatKey, u32)> = pending
        .iter()
        .filter_map(|(name, &steps)| lookup_stat(name).map(|stat| (stat.key, steps)))
        .collect();
    upgrade::total_pending_cost(&suit, &pending) as f64
}

/// ステッパーの入力値を 0 以上、購入可能な段階数以下に収める。
#[wasm_bindgen]
pub fn clamp_pending_steps(requested: f64, max_affordable: u32) -> u32 {
    upgrade::clamp_pending_steps(requested as i64, max_affordable)
}

// -- ランク --

/// 名前付きの閾値テーブルで格付けする。未知のテーブル名は "C" を返す。
#[wasm_bindgen]
pub fn rank_of(table: &str, value: f64) -> String {
    RankTable::from_name(table).map_or_else(
        || interface::Rank::C.to_string(),
        |t| t.rank_of(value).to_string(),
    )
}

#[wasm_bindgen]
pub fn rank_progress(table: &str, value: f64) -> f64 {
    RankTable::from_name(table).map_or(0.0, |t| rank::rank_progress(t, value))
}

// -- ガレージ --

#[wasm_bindgen]
pub fn weapon_diff(current_val: JsValue, candidate_val: JsValue) -> JsValue {
    let current = if current_val.is_null() || current_val.is_undefined() {
        None
    } else {
        parse::<interface::Weapon>(current_val, "current weapon")
    };
    let Some(candidate) = parse::<interface::Weapon>(candidate_val, "candidate weapon") else {
        return to_js(&interface::WeaponDiff::default());
    };
    to_js(&garage::weapon_diff(current.as_ref(), &candidate))
}

#[wasm_bindgen]
pub fn diff_text(value: f64) -> String {
    garage::diff_text(value)
}

// -- 初回チュートリアル --

fn onboarding() -> Option<Onboarding<LocalStorageStore>> {
    let store = LocalStorageStore::open();
    if store.is_none() {
        warn!("localStorage is not available");
    }
    store.map(Onboarding::new)
}

#[wasm_bindgen]
pub fn onboarding_completed() -> bool {
    onboarding().is_some_and(|o| o.is_completed())
}

#[wasm_bindgen]
pub fn complete_onboarding() {
    if let Some(mut o) = onboarding() {
        o.complete();
    }
}

#[wasm_bindgen]
pub fn reset_onboarding() {
    if let Some(mut o) = onboarding() {
        o.reset();
    }
}
