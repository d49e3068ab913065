use serde::{Deserialize, Serialize};

use crate::unit::Weapon;

/// ガレージ画面で強化対象となる機体ステータス。
/// 詳細パラメータは古い機体データに存在しないため、未設定時の既定値をゲッターで補う。
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SuitStats {
    id: String,
    max_hp: f64,
    armor: f64,
    mobility: f64,
    weapons: Vec<Weapon>,
    melee_aptitude: Option<f64>,
    shooting_aptitude: Option<f64>,
    accuracy_bonus: Option<f64>,
    evasion_bonus: Option<f64>,
    acceleration_bonus: Option<f64>,
    turning_bonus: Option<f64>,
}

impl SuitStats {
    pub fn new(max_hp: f64, armor: f64, mobility: f64) -> Self {
        Self {
            max_hp,
            armor,
            mobility,
            ..Self::default()
        }
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapons.push(weapon);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn max_hp(&self) -> f64 {
        self.max_hp
    }
    pub fn armor(&self) -> f64 {
        self.armor
    }
    pub fn mobility(&self) -> f64 {
        self.mobility
    }
    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    /// メイン武器の威力。武器を持たない場合は 0。
    pub fn weapon_power(&self) -> f64 {
        self.weapons.first().map_or(0.0, Weapon::power)
    }

    /// 適性は倍率なので未設定時は 1.0。
    pub fn melee_aptitude(&self) -> f64 {
        self.melee_aptitude.unwrap_or(1.0)
    }
    pub fn shooting_aptitude(&self) -> f64 {
        self.shooting_aptitude.unwrap_or(1.0)
    }

    pub fn accuracy_bonus(&self) -> f64 {
        self.accuracy_bonus.unwrap_or(0.0)
    }
    pub fn evasion_bonus(&self) -> f64 {
        self.evasion_bonus.unwrap_or(0.0)
    }
    pub fn acceleration_bonus(&self) -> f64 {
        self.acceleration_bonus.unwrap_or(0.0)
    }
    pub fn turning_bonus(&self) -> f64 {
        self.turning_bonus.unwrap_or(0.0)
    }
}
