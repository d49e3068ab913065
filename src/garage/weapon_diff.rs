use serde::{Deserialize, Serialize};

use crate::unit::Weapon;

/// 武器換装時の性能差分。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WeaponDiff {
    pub power: f64,
    pub range: f64,
    pub accuracy: f64,
}

/// 差分値の向き。表示色の判定に使う。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiffSign {
    Positive,
    Negative,
    Neutral,
}

impl DiffSign {
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            DiffSign::Positive
        } else if value < 0.0 {
            DiffSign::Negative
        } else {
            DiffSign::Neutral
        }
    }
}

/// 現在の武器から候補の武器へ換装した場合の差分を計算する。
/// 空きスロットへの装備は、現在値をすべて 0 として扱う。
pub fn weapon_diff(current: Option<&Weapon>, candidate: &Weapon) -> WeaponDiff {
    let (power, range, accuracy) =
        current.map_or((0.0, 0.0, 0.0), |w| (w.power(), w.range(), w.accuracy()));
    WeaponDiff {
        power: candidate.power() - power,
        range: candidate.range() - range,
        accuracy: candidate.accuracy() - accuracy,
    }
}

/// 差分値の表示文字列。
pub fn diff_text(value: f64) -> String {
    match DiffSign::of(value) {
        DiffSign::Positive => format!("+{value}"),
        DiffSign::Negative => format!("{value}"),
        DiffSign::Neutral => "±0".to_owned(),
    }
}
