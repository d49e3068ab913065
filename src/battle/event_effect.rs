use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::battle::{ActionType, BattleLogEvent};

const CRITICAL_MARKER: &str = "クリティカルヒット";
const RESIST_MARKERS: [&str; 2] = ["対ビーム装甲により", "対実弾装甲により"];

fn resist_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // 固定のパターンなのでコンパイルは失敗しない (テストで検証済み)
    PATTERN.get_or_init(|| Regex::new(r"(\d+)%軽減").expect("resist pattern is valid"))
}

/// 機体の頭上に表示するポップアップの種類。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Critical,
    Resist,
    Damage,
}

/// 1ターン分のログから抽出した、機体ごとの演出情報。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventEffect {
    kind: EffectKind,
    text: String,
}

impl EventEffect {
    pub fn kind(&self) -> EffectKind {
        self.kind
    }
    pub fn text(&self) -> &str {
        &self.text
    }

    fn critical() -> Self {
        Self {
            kind: EffectKind::Critical,
            text: "CRITICAL HIT!!".to_owned(),
        }
    }

    fn resist(message: &str) -> Self {
        let percent = resist_pattern()
            .captures(message)
            .and_then(|c| c.get(1))
            .map_or("", |m| m.as_str());
        Self {
            kind: EffectKind::Resist,
            text: format!("RESIST {percent}%"),
        }
    }

    fn damage(amount: u32) -> Self {
        Self {
            kind: EffectKind::Damage,
            text: format!("-{amount}"),
        }
    }
}

/// `turn` ちょうどのログから、機体IDごとの演出を抽出する。
/// 1機体につき最初に見つかった演出のみを採用する。
pub fn turn_effects(log: &[BattleLogEvent], turn: u32) -> BTreeMap<String, EventEffect> {
    let mut effects = BTreeMap::new();

    for event in log.iter().filter(|e| e.turn() == turn) {
        if event.action_type() != ActionType::Attack {
            continue;
        }

        if !event.actor_id().is_empty() && event.message().contains(CRITICAL_MARKER) {
            effects
                .entry(event.actor_id().to_owned())
                .or_insert_with(EventEffect::critical);
        }

        let Some(target_id) = event.target_id() else {
            continue;
        };
        if effects.contains_key(target_id) {
            continue;
        }
        if RESIST_MARKERS.iter().any(|m| event.message().contains(m)) {
            effects.insert(target_id.to_owned(), EventEffect::resist(event.message()));
        } else if event.damage() > 0 {
            effects.insert(target_id.to_owned(), EventEffect::damage(event.damage()));
        }
    }

    effects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resist_pattern_compiles_and_captures_the_percent() {
        let captures = resist_pattern().captures("対ビーム装甲により30%軽減").unwrap();
        assert_eq!(&captures[1], "30");
    }

    #[test]
    fn extracts_critical_resist_and_damage() {
        let log = vec![
            BattleLogEvent::new(2, "A", ActionType::Attack)
                .with_target("B")
                .with_damage(120)
                .with_message("クリティカルヒット！ ガンダムのビームライフルが命中"),
            BattleLogEvent::new(2, "C", ActionType::Attack)
                .with_target("D")
                .with_damage(40)
                .with_message("対ビーム装甲によりダメージ30%軽減"),
            BattleLogEvent::new(3, "D", ActionType::Attack)
                .with_target("C")
                .with_damage(99),
        ];

        let effects = turn_effects(&log, 2);
        assert_eq!(effects.len(), 3);
        assert_eq!(effects["A"].kind(), EffectKind::Critical);
        assert_eq!(effects["B"].text(), "-120");
        assert_eq!(effects["D"].kind(), EffectKind::Resist);
        assert_eq!(effects["D"].text(), "RESIST 30%");
        assert!(!effects.contains_key("C"));
    }

    #[test]
    fn first_effect_per_unit_wins() {
        let log = vec![
            BattleLogEvent::new(1, "A", ActionType::Attack)
                .with_target("B")
                .with_damage(10),
            BattleLogEvent::new(1, "C", ActionType::Attack)
                .with_target("B")
                .with_damage(50),
        ];
        assert_eq!(turn_effects(&log, 1)["B"].text(), "-10");
    }

    #[test]
    fn resist_without_percentage_keeps_an_empty_value() {
        let log = vec![BattleLogEvent::new(1, "A", ActionType::Attack)
            .with_target("B")
            .with_message("対実弾装甲により軽減")];
        assert_eq!(turn_effects(&log, 1)["B"].text(), "RESIST %");
    }

    #[test]
    fn non_attack_lines_are_ignored() {
        let log = vec![BattleLogEvent::new(1, "B", ActionType::Damage).with_damage(10)];
        assert!(turn_effects(&log, 1).is_empty());
    }
}
