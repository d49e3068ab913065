use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::battle::canonical::{normalize, CanonicalEvent};
use crate::battle::{BattleLogEvent, Vector3};
use crate::unit::UnitInitialState;

/// ENの残量がこの割合を下回ると EN 不足警告を出す。
pub const EN_WARNING_THRESHOLD: f64 = 0.2;

/// 機体アイコンに表示する警告の種類。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Warning {
    Ammo,
    Energy,
    Cooldown,
}

/// あるターン時点の機体の状態。
/// 毎回「初期状態 + 指定ターン以前の全イベント」から再計算され、ターンをまたいでキャッシュされることはない。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UnitSnapshot {
    position: Vector3,
    hp: u32,
    energy: u32,
    ammo_by_weapon_id: BTreeMap<String, u32>,
    warnings: BTreeSet<Warning>,
}

impl UnitSnapshot {
    /// 戦闘開始時点のスナップショットを作成する。警告は評価しない。
    pub fn initial(unit: &UnitInitialState) -> Self {
        Self {
            position: unit.position(),
            hp: unit.max_hp(),
            energy: unit.max_energy(),
            ammo_by_weapon_id: unit
                .weapons()
                .iter()
                .filter_map(|w| w.max_ammo().map(|ammo| (w.id().to_owned(), ammo)))
                .collect(),
            warnings: BTreeSet::new(),
        }
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }
    pub fn hp(&self) -> u32 {
        self.hp
    }
    pub fn energy(&self) -> u32 {
        self.energy
    }

    /// 武器の残弾数を取得する。弾数制限のない武器は None。
    pub fn ammo(&self, weapon_id: &str) -> Option<u32> {
        self.ammo_by_weapon_id.get(weapon_id).copied()
    }

    pub fn warnings(&self) -> &BTreeSet<Warning> {
        &self.warnings
    }
    pub fn has_warning(&self, warning: Warning) -> bool {
        self.warnings.contains(&warning)
    }
}

/// 正規化済みのバトルログを保持し、任意のターンのスナップショットを再構成する。
///
/// ログはターン昇順であることを前提とし、指定ターンを超えたイベントに到達した時点で走査を打ち切る。
#[derive(Debug, Clone, Default)]
pub struct BattleReplay {
    events: Vec<CanonicalEvent>,
}

impl BattleReplay {
    pub fn new(log: &[BattleLogEvent]) -> Self {
        let events = normalize(log);
        debug!(
            "Normalized {} log lines into {} events",
            log.len(),
            events.len()
        );
        Self { events }
    }

    pub fn events(&self) -> &[CanonicalEvent] {
        &self.events
    }

    /// ログに含まれる最終ターン。スライダーの上限に使う。
    pub fn last_turn(&self) -> u32 {
        self.events.last().map_or(0, |e| e.turn)
    }

    /// `unit_id` の機体の `upto_turn` 時点の状態を再構成する。
    pub fn snapshot(
        &self,
        unit_id: &str,
        initial: &UnitInitialState,
        upto_turn: u32,
    ) -> UnitSnapshot {
        let mut snapshot = UnitSnapshot::initial(initial);
        let mut hp = i64::from(initial.max_hp());
        // 使用武器はログから判別できないため、第1武器とみなす
        let weapon = initial.primary_weapon();

        let mut replayed = 0;
        for event in &self.events {
            if event.turn > upto_turn {
                break;
            }
            replayed += 1;

            if event.subject_id == unit_id {
                if let Some(position) = event.position {
                    snapshot.position = position;
                }
            }

            if let Some(amount) = event.damage_to(unit_id) {
                hp -= i64::from(amount);
            }

            if event.is_fire_by(unit_id) {
                if let Some(weapon) = weapon {
                    snapshot.energy = snapshot.energy.saturating_sub(weapon.energy_cost());
                    if let Some(rounds) = snapshot.ammo_by_weapon_id.get_mut(weapon.id()) {
                        *rounds = rounds.saturating_sub(1);
                    }
                }
            }
        }
        snapshot.hp = u32::try_from(hp.max(0)).unwrap_or(0);

        let last_attack_turn = self.events[..replayed]
            .iter()
            .rev()
            .find(|e| e.is_fire_by(unit_id))
            .map_or(0, |e| e.turn);
        snapshot.warnings = derive_warnings(initial, &snapshot, upto_turn, last_attack_turn);
        snapshot
    }

    /// 全機体のスナップショットをまとめて再構成する。
    pub fn snapshots(
        &self,
        units: &[UnitInitialState],
        upto_turn: u32,
    ) -> BTreeMap<String, UnitSnapshot> {
        units
            .iter()
            .map(|unit| {
                (
                    unit.id().to_owned(),
                    self.snapshot(unit.id(), unit, upto_turn),
                )
            })
            .collect()
    }
}

fn derive_warnings(
    initial: &UnitInitialState,
    snapshot: &UnitSnapshot,
    upto_turn: u32,
    last_attack_turn: u32,
) -> BTreeSet<Warning> {
    let mut warnings = BTreeSet::new();

    let max_energy = initial.max_energy();
    if max_energy > 0 && f64::from(snapshot.energy) / f64::from(max_energy) < EN_WARNING_THRESHOLD
    {
        warnings.insert(Warning::Energy);
    }

    if let Some(weapon) = initial.primary_weapon() {
        if weapon.max_ammo().is_some() && snapshot.ammo(weapon.id()) == Some(0) {
            warnings.insert(Warning::Ammo);
        }

        let cooldown = weapon.cooldown_turns();
        if cooldown > 0 && upto_turn.saturating_sub(last_attack_turn) < cooldown {
            warnings.insert(Warning::Cooldown);
        }
    }

    warnings
}

/// 1回限りの再構成。ログの正規化も毎回行う。
pub fn reconstruct(
    unit_id: &str,
    initial: &UnitInitialState,
    log: &[BattleLogEvent],
    upto_turn: u32,
) -> UnitSnapshot {
    BattleReplay::new(log).snapshot(unit_id, initial, upto_turn)
}
