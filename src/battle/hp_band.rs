use serde::{Deserialize, Serialize};

/// HPバーの色分けに使う残量帯。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HpBand {
    Safe,
    Caution,
    Danger,
}

impl HpBand {
    pub fn of(current: u32, max: u32) -> Self {
        if max == 0 {
            return HpBand::Danger;
        }
        Self::of_ratio(f64::from(current) / f64::from(max))
    }

    pub fn of_ratio(ratio: f64) -> Self {
        if ratio > 0.5 {
            HpBand::Safe
        } else if ratio > 0.2 {
            HpBand::Caution
        } else {
            HpBand::Danger
        }
    }
}
