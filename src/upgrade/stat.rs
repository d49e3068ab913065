use std::sync::OnceLock;

use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::rank::{Rank, RankTable};
use crate::unit::SuitStats;

/// 強化可能なステータスの種類。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatKey {
    Hp,
    Armor,
    Mobility,
    WeaponPower,
    MeleeAptitude,
    ShootingAptitude,
    AccuracyBonus,
    EvasionBonus,
    AccelerationBonus,
    TurningBonus,
}

impl StatKey {
    pub const ALL: [StatKey; 10] = [
        StatKey::Hp,
        StatKey::Armor,
        StatKey::Mobility,
        StatKey::WeaponPower,
        StatKey::MeleeAptitude,
        StatKey::ShootingAptitude,
        StatKey::AccuracyBonus,
        StatKey::EvasionBonus,
        StatKey::AccelerationBonus,
        StatKey::TurningBonus,
    ];

    /// バックエンドの `target_stat` と同じ名前。
    pub fn name(&self) -> &'static str {
        match self {
            StatKey::Hp => "hp",
            StatKey::Armor => "armor",
            StatKey::Mobility => "mobility",
            StatKey::WeaponPower => "weapon_power",
            StatKey::MeleeAptitude => "melee_aptitude",
            StatKey::ShootingAptitude => "shooting_aptitude",
            StatKey::AccuracyBonus => "accuracy_bonus",
            StatKey::EvasionBonus => "evasion_bonus",
            StatKey::AccelerationBonus => "acceleration_bonus",
            StatKey::TurningBonus => "turning_bonus",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// ステータス値の表示形式。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatFormat {
    /// `1200`
    Integer,
    /// `1.25`
    Fixed2,
    /// `×1.25`
    Multiplier,
    /// `+2.5%`
    PercentBonus,
    /// `+0.15`
    SignedFixed2,
}

impl StatFormat {
    pub fn format(&self, value: f64) -> String {
        let sign = if value >= 0.0 { "+" } else { "" };
        match self {
            StatFormat::Integer => format!("{value:.0}"),
            StatFormat::Fixed2 => format!("{value:.2}"),
            StatFormat::Multiplier => format!("×{value:.2}"),
            StatFormat::PercentBonus => format!("{sign}{value:.1}%"),
            StatFormat::SignedFixed2 => format!("{sign}{value:.2}"),
        }
    }
}

/// ステータスごとの強化設定。
/// 1段階ごとに `increment` だけ上昇し、`cap` を超えることはない。
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeStat {
    pub key: StatKey,
    pub label: &'static str,
    pub format: StatFormat,
    pub increment: f64,
    pub cap: f64,
    pub base_cost: f64,
    pub cost_divisor: f64,
    pub rank_table: Option<RankTable>,
}

impl UpgradeStat {
    /// 機体データから現在値を取得する。
    pub fn current_value(&self, suit: &SuitStats) -> f64 {
        match self.key {
            StatKey::Hp => suit.max_hp(),
            StatKey::Armor => suit.armor(),
            StatKey::Mobility => suit.mobility(),
            StatKey::WeaponPower => suit.weapon_power(),
            StatKey::MeleeAptitude => suit.melee_aptitude(),
            StatKey::ShootingAptitude => suit.shooting_aptitude(),
            StatKey::AccuracyBonus => suit.accuracy_bonus(),
            StatKey::EvasionBonus => suit.evasion_bonus(),
            StatKey::AccelerationBonus => suit.acceleration_bonus(),
            StatKey::TurningBonus => suit.turning_bonus(),
        }
    }

    pub fn format_value(&self, value: f64) -> String {
        self.format.format(value)
    }

    /// 値を格付けする。
    /// 名前付きの閾値テーブルを持つステータスはそれに従い、持たないものは上限値に対する割合で判定する。
    pub fn rank_of(&self, value: f64) -> Rank {
        match self.rank_table.filter(RankTable::is_valid) {
            Some(table) => table.rank_of(value),
            None => Rank::by_ratio(value, self.cap),
        }
    }

    pub fn validate(&self) -> Result<(), TableError> {
        let name = self.key.name();
        for (field, value) in [
            ("increment", self.increment),
            ("cap", self.cap),
            ("base_cost", self.base_cost),
            ("cost_divisor", self.cost_divisor),
        ] {
            if !(value > 0.0) {
                return Err(TableError::NonPositive {
                    stat: name,
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

// バックエンドのコスト計算と同じ係数を保つこと
const UPGRADE_STATS: [UpgradeStat; 10] = [
    UpgradeStat {
        key: StatKey::Hp,
        label: "HP",
        format: StatFormat::Integer,
        increment: 10.0,
        cap: 500.0,
        base_cost: 50.0,
        cost_divisor: 200.0,
        rank_table: Some(RankTable::Hp),
    },
    UpgradeStat {
        key: StatKey::Armor,
        label: "装甲",
        format: StatFormat::Integer,
        increment: 1.0,
        cap: 50.0,
        base_cost: 100.0,
        cost_divisor: 10.0,
        rank_table: Some(RankTable::Armor),
    },
    UpgradeStat {
        key: StatKey::Mobility,
        label: "機動性",
        format: StatFormat::Fixed2,
        increment: 0.05,
        cap: 3.0,
        base_cost: 150.0,
        cost_divisor: 2.0,
        rank_table: Some(RankTable::Mobility),
    },
    UpgradeStat {
        key: StatKey::WeaponPower,
        label: "武器威力",
        format: StatFormat::Integer,
        increment: 2.0,
        cap: 200.0,
        base_cost: 80.0,
        cost_divisor: 50.0,
        rank_table: None,
    },
    UpgradeStat {
        key: StatKey::MeleeAptitude,
        label: "格闘適性",
        format: StatFormat::Multiplier,
        increment: 0.05,
        cap: 2.0,
        base_cost: 200.0,
        cost_divisor: 2.0,
        rank_table: None,
    },
    UpgradeStat {
        key: StatKey::ShootingAptitude,
        label: "射撃適性",
        format: StatFormat::Multiplier,
        increment: 0.05,
        cap: 2.0,
        base_cost: 200.0,
        cost_divisor: 2.0,
        rank_table: None,
    },
    UpgradeStat {
        key: StatKey::AccuracyBonus,
        label: "命中補正",
        format: StatFormat::PercentBonus,
        increment: 0.5,
        cap: 10.0,
        base_cost: 120.0,
        cost_divisor: 10.0,
        rank_table: None,
    },
    UpgradeStat {
        key: StatKey::EvasionBonus,
        label: "回避補正",
        format: StatFormat::PercentBonus,
        increment: 0.5,
        cap: 10.0,
        base_cost: 120.0,
        cost_divisor: 10.0,
        rank_table: None,
    },
    UpgradeStat {
        key: StatKey::AccelerationBonus,
        label: "加速補正",
        format: StatFormat::SignedFixed2,
        increment: 0.05,
        cap: 2.0,
        base_cost: 130.0,
        cost_divisor: 2.0,
        rank_table: None,
    },
    UpgradeStat {
        key: StatKey::TurningBonus,
        label: "旋回補正",
        format: StatFormat::SignedFixed2,
        increment: 0.05,
        cap: 2.0,
        base_cost: 130.0,
        cost_divisor: 2.0,
        rank_table: None,
    },
];

/// 検証済みの強化設定テーブル。
/// 初回呼び出し時に一度だけ検証し、不正な設定は取り除いてログに残す。
pub fn upgrade_stats() -> &'static [UpgradeStat] {
    static TABLE: OnceLock<Vec<UpgradeStat>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let table: Vec<UpgradeStat> = UPGRADE_STATS
            .iter()
            .filter(|stat| match stat.validate() {
                Ok(()) => true,
                Err(err) => {
                    error!("Upgrade stat rejected: {}", err);
                    false
                }
            })
            .cloned()
            .collect();
        info!("Upgrade stat table loaded: {} entries", table.len());
        table
    })
}

pub fn find_stat(key: StatKey) -> Option<&'static UpgradeStat> {
    upgrade_stats().iter().find(|stat| stat.key == key)
}
