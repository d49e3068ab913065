use serde::{Deserialize, Serialize};

use crate::upgrade::UpgradeStat;

/// 複数段階の強化をまとめて適用した結果。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepSimulation {
    pub total_cost: u64,
    pub final_value: f64,
    /// 実際に適用された段階数。上限値に達した場合は要求より少なくなる。
    pub applied_steps: u32,
}

/// 現在値 `value` から1段階強化するためのコスト。
/// `floor(base_cost * (1 + value / cost_divisor))` で、値が大きいほど高くなる。
pub fn step_cost(stat: &UpgradeStat, value: f64) -> u64 {
    let cost = (stat.base_cost * (1.0 + value / stat.cost_divisor)).floor();
    if cost.is_finite() && cost > 0.0 {
        cost as u64
    } else {
        0
    }
}

fn advance(stat: &UpgradeStat, value: f64) -> f64 {
    (value + stat.increment).min(stat.cap)
}

/// `steps` 段階の強化を試算する。上限値に達した時点で打ち切り、それ以降の段階は課金しない。
pub fn simulate_steps(stat: &UpgradeStat, current_value: f64, steps: u32) -> StepSimulation {
    let mut value = current_value;
    let mut total_cost = 0;
    let mut applied_steps = 0;
    for _ in 0..steps {
        if value >= stat.cap {
            break;
        }
        total_cost += step_cost(stat, value);
        value = advance(stat, value);
        applied_steps += 1;
    }
    StepSimulation {
        total_cost,
        final_value: value,
        applied_steps,
    }
}

/// 所持クレジット内で踏める最大の段階数 (上限値まで)。
pub fn max_affordable_steps(stat: &UpgradeStat, current_value: f64, credits: i64) -> u32 {
    // 増分が正でなければ上限値に到達しない
    if !(stat.increment > 0.0) || !current_value.is_finite() {
        return 0;
    }
    let mut remaining = u64::try_from(credits).unwrap_or(0);
    let mut value = current_value;
    let mut steps = 0;
    while value < stat.cap {
        let cost = step_cost(stat, value);
        if remaining < cost {
            break;
        }
        let next = advance(stat, value);
        // 値の桁が大きすぎて増分が消える場合は進めない
        if next <= value {
            break;
        }
        remaining -= cost;
        value = next;
        steps += 1;
    }
    steps
}

/// ステッパーで指定された段階数を購入可能な範囲に収める。
pub fn clamp_pending_steps(requested: i64, max_affordable: u32) -> u32 {
    u32::try_from(requested.max(0))
        .unwrap_or(u32::MAX)
        .min(max_affordable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upgrade::{find_stat, StatKey};

    fn example_stat() -> UpgradeStat {
        let mut stat = find_stat(StatKey::Hp).unwrap().clone();
        stat.base_cost = 50.0;
        stat.cost_divisor = 200.0;
        stat.increment = 10.0;
        stat.cap = 500.0;
        stat
    }

    #[test]
    fn step_cost_follows_the_curve() {
        let stat = example_stat();
        assert_eq!(step_cost(&stat, 0.0), 50);
        assert_eq!(step_cost(&stat, 10.0), 52);
        assert_eq!(step_cost(&stat, 200.0), 100);
    }

    #[test]
    fn step_cost_is_non_decreasing() {
        let stat = example_stat();
        let costs: Vec<u64> = (0..=50).map(|i| step_cost(&stat, f64::from(i) * 10.0)).collect();
        assert!(costs.windows(2).all(|w| w[0] <= w[1]));

        let mobility = find_stat(StatKey::Mobility).unwrap();
        let costs: Vec<u64> = (0..=60)
            .map(|i| step_cost(mobility, f64::from(i) * 0.05))
            .collect();
        assert!(costs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn two_steps_from_zero() {
        let result = simulate_steps(&example_stat(), 0.0, 2);
        assert_eq!(result.total_cost, 102);
        assert_eq!(result.final_value, 20.0);
        assert_eq!(result.applied_steps, 2);
    }

    #[test]
    fn simulation_stops_at_the_cap() {
        let stat = example_stat();
        let result = simulate_steps(&stat, 485.0, 10);
        // 485 -> 495 -> 500 の2段階のみ課金される
        assert_eq!(result.applied_steps, 2);
        assert_eq!(result.final_value, 500.0);
        assert_eq!(
            result.total_cost,
            step_cost(&stat, 485.0) + step_cost(&stat, 495.0)
        );

        let result = simulate_steps(&stat, 500.0, 3);
        assert_eq!(result.total_cost, 0);
        assert_eq!(result.final_value, 500.0);
    }

    #[test]
    fn zero_steps_cost_nothing() {
        let result = simulate_steps(&example_stat(), 120.0, 0);
        assert_eq!(result.total_cost, 0);
        assert_eq!(result.final_value, 120.0);
    }

    #[test]
    fn affordable_steps_are_the_exact_budget_boundary() {
        let stat = example_stat();
        for credits in [0_i64, 49, 50, 101, 102, 1_000, 25_000] {
            let steps = max_affordable_steps(&stat, 0.0, credits);
            let spent = simulate_steps(&stat, 0.0, steps);
            assert!(spent.total_cost <= credits as u64);
            if spent.final_value < stat.cap {
                let remaining = credits as u64 - spent.total_cost;
                assert!(step_cost(&stat, spent.final_value) > remaining);
            }
        }
        assert_eq!(max_affordable_steps(&stat, 0.0, 102), 2);
        assert_eq!(max_affordable_steps(&stat, 0.0, 101), 1);
    }

    #[test]
    fn affordable_steps_never_pass_the_cap() {
        let stat = example_stat();
        assert_eq!(max_affordable_steps(&stat, 490.0, i64::MAX), 1);
        assert_eq!(max_affordable_steps(&stat, 500.0, i64::MAX), 0);
    }

    #[test]
    fn negative_credits_afford_nothing() {
        assert_eq!(max_affordable_steps(&example_stat(), 0.0, -500), 0);
    }

    #[test]
    fn out_of_range_values_afford_nothing() {
        let hp = find_stat(StatKey::Hp).unwrap();
        assert_eq!(max_affordable_steps(hp, -1e20, 0), 0);
        assert_eq!(max_affordable_steps(hp, -1e20, i64::MAX), 0);
        assert_eq!(max_affordable_steps(hp, f64::NEG_INFINITY, 1_000), 0);
        assert_eq!(max_affordable_steps(hp, f64::INFINITY, 1_000), 0);
        assert_eq!(max_affordable_steps(hp, f64::NAN, 1_000), 0);
    }

    #[test]
    fn pending_steps_are_clamped() {
        assert_eq!(clamp_pending_steps(-1, 5), 0);
        assert_eq!(clamp_pending_steps(3, 5), 3);
        assert_eq!(clamp_pending_steps(9, 5), 5);
    }
}
