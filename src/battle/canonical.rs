use crate::battle::{ActionType, BattleLogEvent, Vector3};

/// 正規化済みイベントの種別。
///
/// 生ログでは同じ被弾が `ATTACK` (攻撃側の行) と `DAMAGE` (被弾側の行) の2通りで記録されうるため、
/// 取り込み時に `Hit { attacker_id, victim_id, amount }` へ一本化する。
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Move,
    /// `subject_id` の機体が攻撃を行った。
    Fire {
        /// 再構成では使わない。`BattleReplay::events` の利用側が攻撃の組を辿れるよう保持する。
        target_id: Option<String>,
    },
    /// `victim_id` の機体が `amount` のダメージを受けた。
    Hit {
        /// `DAMAGE` 行由来の被弾では攻撃側が記録されないため None。
        attacker_id: Option<String>,
        victim_id: String,
        amount: u32,
    },
    Destroyed,
    Miss,
    Detection,
    Other,
}

/// 正規化済みのバトルイベント。
/// `position` は `subject_id` の機体のその瞬間の座標を表す。
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalEvent {
    pub turn: u32,
    pub subject_id: String,
    pub position: Option<Vector3>,
    pub kind: EventKind,
}

impl CanonicalEvent {
    fn of(event: &BattleLogEvent, kind: EventKind) -> Self {
        Self {
            turn: event.turn(),
            subject_id: event.actor_id().to_owned(),
            position: event.position_snapshot(),
            kind,
        }
    }

    pub fn is_fire_by(&self, unit_id: &str) -> bool {
        matches!(self.kind, EventKind::Fire { .. }) && self.subject_id == unit_id
    }

    /// `unit_id` の機体が受けたダメージ量。該当しなければ None。
    pub fn damage_to(&self, unit_id: &str) -> Option<u32> {
        match &self.kind {
            EventKind::Hit {
                victim_id, amount, ..
            } if victim_id == unit_id => Some(*amount),
            _ => None,
        }
    }
}

/// 生ログ1行を正規化済みイベントへ変換する。
/// 順序は保たれ、`ATTACK` 行は攻撃 (`Fire`) と被弾 (`Hit`) の2件に展開されうる。
pub fn normalize_event(event: &BattleLogEvent) -> Vec<CanonicalEvent> {
    match event.action_type() {
        ActionType::Attack => {
            let fire = CanonicalEvent::of(
                event,
                EventKind::Fire {
                    target_id: event.target_id().map(str::to_owned),
                },
            );
            match event.target_id() {
                Some(victim_id) if event.damage() > 0 => {
                    let hit = CanonicalEvent {
                        turn: event.turn(),
                        subject_id: victim_id.to_owned(),
                        position: None,
                        kind: EventKind::Hit {
                            attacker_id: Some(event.actor_id().to_owned()),
                            victim_id: victim_id.to_owned(),
                            amount: event.damage(),
                        },
                    };
                    vec![fire, hit]
                }
                _ => vec![fire],
            }
        }
        ActionType::Damage => vec![CanonicalEvent::of(
            event,
            EventKind::Hit {
                attacker_id: None,
                victim_id: event.actor_id().to_owned(),
                amount: event.damage(),
            },
        )],
        ActionType::Move => vec![CanonicalEvent::of(event, EventKind::Move)],
        ActionType::Destroyed => vec![CanonicalEvent::of(event, EventKind::Destroyed)],
        ActionType::Miss => vec![CanonicalEvent::of(event, EventKind::Miss)],
        ActionType::Detection => vec![CanonicalEvent::of(event, EventKind::Detection)],
        ActionType::TargetSelection | ActionType::Other => {
            vec![CanonicalEvent::of(event, EventKind::Other)]
        }
    }
}

/// ログ全体を正規化する。
pub fn normalize(log: &[BattleLogEvent]) -> Vec<CanonicalEvent> {
    log.iter().flat_map(normalize_event).collect()
}
