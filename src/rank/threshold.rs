use std::sync::OnceLock;

use itertools::Itertools;
use log::error;
use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::rank::Rank;

// バックエンドの閾値マスタと同じ値を保つこと
const HP_THRESHOLDS: [(Rank, f64); 6] = [
    (Rank::S, 2000.0),
    (Rank::A, 1500.0),
    (Rank::B, 1000.0),
    (Rank::C, 700.0),
    (Rank::D, 400.0),
    (Rank::E, 0.0),
];
const ARMOR_THRESHOLDS: [(Rank, f64); 6] = [
    (Rank::S, 100.0),
    (Rank::A, 80.0),
    (Rank::B, 60.0),
    (Rank::C, 40.0),
    (Rank::D, 20.0),
    (Rank::E, 0.0),
];
const MOBILITY_THRESHOLDS: [(Rank, f64); 6] = [
    (Rank::S, 2.0),
    (Rank::A, 1.5),
    (Rank::B, 1.2),
    (Rank::C, 0.9),
    (Rank::D, 0.6),
    (Rank::E, 0.0),
];

/// 名前付きの閾値テーブル。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RankTable {
    Hp,
    Armor,
    Mobility,
}

impl RankTable {
    pub const ALL: [RankTable; 3] = [RankTable::Hp, RankTable::Armor, RankTable::Mobility];

    pub fn name(&self) -> &'static str {
        match self {
            RankTable::Hp => "hp",
            RankTable::Armor => "armor",
            RankTable::Mobility => "mobility",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// 高いランクから順に並んだ (ランク, 下限値) の列。
    pub fn thresholds(&self) -> &'static [(Rank, f64)] {
        match self {
            RankTable::Hp => &HP_THRESHOLDS,
            RankTable::Armor => &ARMOR_THRESHOLDS,
            RankTable::Mobility => &MOBILITY_THRESHOLDS,
        }
    }

    pub fn validate(&self) -> Result<(), TableError> {
        let table = self.thresholds();
        for ((_, upper), (_, lower)) in table.iter().tuple_windows() {
            if upper <= lower {
                return Err(TableError::ThresholdOrder {
                    table: self.name(),
                    upper: *upper,
                    lower: *lower,
                });
            }
        }
        match table.last() {
            Some((_, min)) if *min == 0.0 => Ok(()),
            Some((_, min)) => Err(TableError::ThresholdFloor {
                table: self.name(),
                min: *min,
            }),
            None => Err(TableError::ThresholdFloor {
                table: self.name(),
                min: f64::NAN,
            }),
        }
    }

    /// 初回呼び出し時に全テーブルを検証し、その結果を返す。
    pub fn is_valid(&self) -> bool {
        static VALID: OnceLock<[bool; 3]> = OnceLock::new();
        let valid = VALID.get_or_init(|| {
            RankTable::ALL.map(|table| match table.validate() {
                Ok(()) => true,
                Err(err) => {
                    error!("Rank table rejected: {}", err);
                    false
                }
            })
        });
        RankTable::ALL
            .iter()
            .position(|t| t == self)
            .is_some_and(|i| valid[i])
    }

    /// 下限値を満たす最初のランクを高い方から探す。どれも満たさなければ E。
    pub fn rank_of(&self, value: f64) -> Rank {
        self.thresholds()
            .iter()
            .find(|(_, min)| value >= *min)
            .map_or(Rank::E, |(rank, _)| *rank)
    }
}

/// 現在のランク帯の中での進捗率 (0–100)。最高ランクでは常に 100。
pub fn rank_progress(table: RankTable, value: f64) -> f64 {
    let thresholds = table.thresholds();
    let Some((idx, (_, current_min))) = thresholds.iter().find_position(|(_, min)| value >= *min)
    else {
        return 0.0;
    };
    if idx == 0 {
        return 100.0;
    }
    let (_, next_min) = thresholds[idx - 1];
    (((value - current_min) / (next_min - current_min)) * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hp_lookup_scans_from_the_highest_rank() {
        assert_eq!(RankTable::Hp.rank_of(1200.0), Rank::B);
        assert_eq!(RankTable::Hp.rank_of(2000.0), Rank::S);
        assert_eq!(RankTable::Hp.rank_of(399.0), Rank::E);
        assert_eq!(RankTable::Hp.rank_of(-5.0), Rank::E);
    }

    #[test]
    fn armor_and_mobility_tables() {
        assert_eq!(RankTable::Armor.rank_of(80.0), Rank::A);
        assert_eq!(RankTable::Mobility.rank_of(0.95), Rank::C);
        assert_eq!(RankTable::Mobility.rank_of(1.2), Rank::B);
    }

    #[test]
    fn builtin_tables_are_valid() {
        for table in RankTable::ALL {
            assert_eq!(table.validate(), Ok(()));
            assert!(table.is_valid());
        }
    }

    #[test]
    fn progress_within_band() {
        // B帯 (1000–1500) の中間
        assert!((rank_progress(RankTable::Hp, 1250.0) - 50.0).abs() < 1e-9);
        assert!((rank_progress(RankTable::Hp, 2500.0) - 100.0).abs() < 1e-9);
        assert!((rank_progress(RankTable::Armor, 0.0) - 0.0).abs() < 1e-9);
        assert!((rank_progress(RankTable::Hp, -1.0) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn table_names_round_trip() {
        for table in RankTable::ALL {
            assert_eq!(RankTable::from_name(table.name()), Some(table));
        }
        assert_eq!(RankTable::from_name("weapon_power"), None);
    }
}
