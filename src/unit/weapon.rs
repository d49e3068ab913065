use serde::{Deserialize, Serialize};

/// 機体が装備している武器を表す構造体。
/// バックエンドのレスポンスでは省略されうる項目が多いため、数値はゲッターを通じて 0 に補完される。
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Weapon {
    id: String,
    name: Option<String>,
    power: f64,
    range: f64,
    accuracy: f64,
    max_ammo: Option<u32>,
    en_cost: Option<u32>,
    cool_down_turn: Option<u32>,
}

impl Weapon {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_stats(mut self, power: f64, range: f64, accuracy: f64) -> Self {
        self.power = power;
        self.range = range;
        self.accuracy = accuracy;
        self
    }

    pub fn with_max_ammo(mut self, max_ammo: u32) -> Self {
        self.max_ammo = Some(max_ammo);
        self
    }

    pub fn with_en_cost(mut self, en_cost: u32) -> Self {
        self.en_cost = Some(en_cost);
        self
    }

    pub fn with_cooldown(mut self, turns: u32) -> Self {
        self.cool_down_turn = Some(turns);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// 武器名を取得する。未設定の場合はIDを返す。
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub fn power(&self) -> f64 {
        self.power
    }
    pub fn range(&self) -> f64 {
        self.range
    }
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// 最大弾数を取得する。弾数制限のない武器 (ビーム兵器など) は None。
    pub fn max_ammo(&self) -> Option<u32> {
        self.max_ammo
    }

    /// 1回の攻撃で消費するEN。
    pub fn energy_cost(&self) -> u32 {
        self.en_cost.unwrap_or(0)
    }

    /// 攻撃後に再使用可能になるまでのターン数。
    pub fn cooldown_turns(&self) -> u32 {
        self.cool_down_turn.unwrap_or(0)
    }
}
