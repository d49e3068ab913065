use serde::{Deserialize, Serialize};

use crate::battle::Vector3;
use crate::unit::{Weapon, DEFAULT_MAX_EN};

/// 戦闘開始時点の機体の状態を表す不変の構造体。
/// バトルリプレイ中に変化する情報は `UnitSnapshot` に分離されている。
///
/// バックエンドの機体レスポンスをそのまま受け取るため、表示に使わない項目は無視される。
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct UnitInitialState {
    id: String,
    name: String,
    max_hp: u32,
    max_en: Option<u32>,
    max_propellant: Option<u32>,
    sensor_range: Option<f64>,
    position: Vector3,
    weapons: Vec<Weapon>,
}

impl UnitInitialState {
    pub fn new(id: impl Into<String>, max_hp: u32) -> Self {
        Self {
            id: id.into(),
            max_hp,
            ..Self::default()
        }
    }

    pub fn with_max_en(mut self, max_en: u32) -> Self {
        self.max_en = Some(max_en);
        self
    }

    pub fn with_position(mut self, position: Vector3) -> Self {
        self.position = position;
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapons.push(weapon);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 全回復時のHPを取得する。リプレイは常にこの値から開始する。
    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    /// 最大ENを取得する。未設定または 0 の場合は `DEFAULT_MAX_EN`。
    pub fn max_energy(&self) -> u32 {
        match self.max_en {
            Some(en) if en > 0 => en,
            _ => DEFAULT_MAX_EN,
        }
    }

    pub fn max_propellant(&self) -> u32 {
        self.max_propellant.unwrap_or(0)
    }
    pub fn sensor_range(&self) -> f64 {
        self.sensor_range.unwrap_or(0.0)
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    /// 第1武器 (メイン武器) を取得する。
    /// ログから使用武器を特定できないため、リソース消費はこの武器によるものとみなす。
    pub fn primary_weapon(&self) -> Option<&Weapon> {
        self.weapons.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_payload_with_missing_fields() {
        let json = r#"{
            "id": "ms-1",
            "name": "Zaku II",
            "max_hp": 800,
            "current_hp": 800,
            "armor": 50,
            "position": {"x": 0.0, "y": 10.0, "z": -5.0},
            "weapons": [{"id": "mg", "name": "Zaku Machine Gun", "power": 20, "max_ammo": 30}]
        }"#;
        let unit: UnitInitialState = serde_json::from_str(json).unwrap();

        assert_eq!(unit.max_hp(), 800);
        assert_eq!(unit.max_energy(), DEFAULT_MAX_EN);
        assert_eq!(unit.position(), Vector3::new(0.0, 10.0, -5.0));
        let weapon = unit.primary_weapon().unwrap();
        assert_eq!(weapon.max_ammo(), Some(30));
        assert_eq!(weapon.energy_cost(), 0);
        assert_eq!(weapon.cooldown_turns(), 0);
    }

    #[test]
    fn zero_max_en_falls_back_to_default() {
        let unit = UnitInitialState::new("a", 100).with_max_en(0);
        assert_eq!(unit.max_energy(), DEFAULT_MAX_EN);
    }
}
