use serde::{Deserialize, Serialize};

use crate::battle::Vector3;

/// バトルログ1行分の行動種別。
/// 未知の種別は `Other` として受け取り、リプレイでは無視する。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Move,
    Attack,
    Damage,
    Destroyed,
    Miss,
    Detection,
    TargetSelection,
    #[default]
    #[serde(other)]
    Other,
}

/// バックエンドが返すバトルログ1行分。
/// ターン昇順に並んだ追記専用の列として受け取り、フロントエンド側では一切変更しない。
///
/// 欠けた項目はデシリアライズ時に既定値で補完されるため、ゲッターを通じてのみ参照する。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct BattleLogEvent {
    turn: u32,
    actor_id: String,
    action_type: ActionType,
    target_id: Option<String>,
    damage: Option<u32>,
    message: String,
    position_snapshot: Option<Vector3>,
}

impl BattleLogEvent {
    pub fn new(turn: u32, actor_id: impl Into<String>, action_type: ActionType) -> Self {
        Self {
            turn,
            actor_id: actor_id.into(),
            action_type,
            ..Self::default()
        }
    }

    pub fn with_target(mut self, target_id: impl Into<String>) -> Self {
        self.target_id = Some(target_id.into());
        self
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_position(mut self, position: Vector3) -> Self {
        self.position_snapshot = Some(position);
        self
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }
    pub fn actor_id(&self) -> &str {
        &self.actor_id
    }
    pub fn action_type(&self) -> ActionType {
        self.action_type
    }
    pub fn target_id(&self) -> Option<&str> {
        self.target_id.as_deref()
    }

    /// ダメージ量を取得する。未設定の場合は 0。
    pub fn damage(&self) -> u32 {
        self.damage.unwrap_or(0)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
    pub fn position_snapshot(&self) -> Option<Vector3> {
        self.position_snapshot
    }
}
