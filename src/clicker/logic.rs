//! Clicker economy engine: pure functions over `GameState`, fully testable.
//!
//! Every operation that can move `points` or `total_clicks` finishes by
//! calling [`evaluate_achievements`]; nothing relies on the renderer to
//! notice a threshold was crossed.

use super::catalog::{AchievementId, EffectKind, Metric, UpgradeDef, UpgradeId, UPGRADES};
use super::state::GameState;

/// Points one click awards right now.
pub fn click_value(state: &GameState) -> f64 {
    state.points_per_click * state.multiplier
}

/// Manual click. Returns the points awarded, computed before mutation so a
/// floating label shows exactly what was added.
pub fn click(state: &mut GameState) -> f64 {
    let earned = click_value(state);
    state.points += earned;
    state.total_clicks += 1;
    evaluate_achievements(state);
    earned
}

/// Price of buying the level after `level`.
pub fn cost_of(def: &UpgradeDef, level: u32) -> f64 {
    (def.base_cost * def.cost_multiplier.powi(level as i32)).floor()
}

/// Price of the next level of `id` for this state.
pub fn next_cost(state: &GameState, id: UpgradeId) -> f64 {
    cost_of(id.def(), state.level(id))
}

pub fn can_afford(state: &GameState, id: UpgradeId) -> bool {
    state.points >= next_cost(state, id)
}

/// Try to buy one level of an upgrade. Returns true if successful.
///
/// All-or-nothing: with insufficient points the state is left untouched.
pub fn purchase_upgrade(state: &mut GameState, id: UpgradeId) -> bool {
    let def = id.def();
    let level = state.level(id);
    let cost = cost_of(def, level);
    if state.points < cost {
        return false;
    }

    state.points -= cost;
    state.upgrades.insert(id, level + 1);
    match def.kind {
        EffectKind::ClickPower => state.points_per_click += def.effect,
        EffectKind::Multiplier => state.multiplier *= def.effect,
        // Read by tick_auto_accrual through the level.
        EffectKind::AutoAccrual => {}
    }

    evaluate_achievements(state);
    true
}

/// Auto-accrual yield per tick before the multiplier.
fn auto_accrual_base(state: &GameState) -> f64 {
    UPGRADES
        .iter()
        .filter(|u| u.kind == EffectKind::AutoAccrual)
        .map(|u| state.level(u.id) as f64 * u.effect)
        .sum()
}

/// Points per second from auto-accrual at the current multiplier.
pub fn auto_accrual_rate(state: &GameState) -> f64 {
    auto_accrual_base(state) * state.multiplier
}

/// One fire of the 1-second auto-accrual timer. Returns the points added;
/// zero while no auto upgrade has been bought.
pub fn tick_auto_accrual(state: &mut GameState) -> f64 {
    let base = auto_accrual_base(state);
    if base <= 0.0 {
        return 0.0;
    }
    let gain = base * state.multiplier;
    state.points += gain;
    evaluate_achievements(state);
    gain
}

/// Unlock every achievement whose threshold is met. Returns the ids added in
/// this pass; already-unlocked ids are skipped so a second call with the same
/// state returns nothing.
pub fn evaluate_achievements(state: &mut GameState) -> Vec<AchievementId> {
    let mut unlocked = Vec::new();
    for id in AchievementId::all() {
        if state.is_unlocked(*id) {
            continue;
        }
        let def = id.def();
        let reached = match def.metric {
            Metric::TotalClicks => state.total_clicks >= def.requirement,
            Metric::Points => state.points >= def.requirement as f64,
        };
        if reached {
            state.achievements.insert(*id);
            unlocked.push(*id);
        }
    }
    unlocked
}

/// Format a number with thousands separators and at most two decimals.
pub fn format_number(n: f64) -> String {
    let cents = (n.abs() * 100.0).round() as u64;
    let int_part = cents / 100;
    let frac = cents % 100;

    let digits = int_part.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if n < 0.0 && cents > 0 {
        result.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    if frac > 0 {
        let decimals = format!("{:02}", frac);
        result.push('.');
        result.push_str(decimals.trim_end_matches('0'));
    }
    result
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Op {
        Click,
        Buy(usize),
        Tick,
    }

    fn arb_upgrade() -> impl Strategy<Value = UpgradeId> {
        prop_oneof![
            Just(UpgradeId::ClickPower),
            Just(UpgradeId::Multiplier),
            Just(UpgradeId::AutoClicker),
            Just(UpgradeId::MegaBoost),
        ]
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => Just(Op::Click),
            2 => (0usize..4).prop_map(Op::Buy),
            1 => Just(Op::Tick),
        ]
    }

    fn arb_state() -> impl Strategy<Value = GameState> {
        (
            0.0f64..50_000.0,
            1u32..20,
            0u64..500,
            0u32..5,
            0u32..5,
        )
            .prop_map(|(points, ppc, clicks, mult_levels, auto)| {
                let mut s = GameState::new();
                s.points = points;
                s.points_per_click = ppc as f64;
                s.total_clicks = clicks;
                s.multiplier = 1.2f64.powi(mult_levels as i32);
                if mult_levels > 0 {
                    s.upgrades.insert(UpgradeId::Multiplier, mult_levels);
                }
                if auto > 0 {
                    s.upgrades.insert(UpgradeId::AutoClicker, auto);
                }
                s
            })
    }

    proptest! {
        #[test]
        fn prop_click_adds_exact_value(mut state in arb_state()) {
            let before = state.clone();
            let earned = click(&mut state);
            prop_assert_eq!(earned, before.points_per_click * before.multiplier);
            prop_assert_eq!(state.points, before.points + earned);
            prop_assert_eq!(state.total_clicks, before.total_clicks + 1);
            prop_assert_eq!(state.points_per_click, before.points_per_click);
            prop_assert_eq!(state.multiplier, before.multiplier);
            prop_assert_eq!(&state.upgrades, &before.upgrades);
        }

        #[test]
        fn prop_purchase_all_or_nothing(mut state in arb_state(), id in arb_upgrade()) {
            let before = state.clone();
            let cost = next_cost(&before, id);
            if purchase_upgrade(&mut state, id) {
                prop_assert!(before.points >= cost);
                prop_assert_eq!(state.points, before.points - cost);
                prop_assert_eq!(state.level(id), before.level(id) + 1);
                prop_assert!(state.points >= 0.0);
            } else {
                prop_assert!(before.points < cost);
                prop_assert_eq!(state, before);
            }
        }

        #[test]
        fn prop_effect_applied_once(mut state in arb_state(), id in arb_upgrade()) {
            state.points = 1e12;
            let before = state.clone();
            prop_assert!(purchase_upgrade(&mut state, id));
            let def = id.def();
            match def.kind {
                EffectKind::ClickPower => {
                    prop_assert_eq!(state.points_per_click, before.points_per_click + def.effect);
                    prop_assert_eq!(state.multiplier, before.multiplier);
                }
                EffectKind::Multiplier => {
                    prop_assert_eq!(state.multiplier, before.multiplier * def.effect);
                    prop_assert_eq!(state.points_per_click, before.points_per_click);
                }
                EffectKind::AutoAccrual => {
                    prop_assert_eq!(state.multiplier, before.multiplier);
                    prop_assert_eq!(state.points_per_click, before.points_per_click);
                }
            }
        }

        #[test]
        fn prop_evaluate_is_idempotent(mut state in arb_state()) {
            evaluate_achievements(&mut state);
            let once = state.clone();
            let second = evaluate_achievements(&mut state);
            prop_assert!(second.is_empty());
            prop_assert_eq!(state, once);
        }

        #[test]
        fn prop_cost_is_pure(id in arb_upgrade(), level in 0u32..40) {
            let a = cost_of(id.def(), level);
            let b = cost_of(id.def(), level);
            prop_assert_eq!(a, b);
            prop_assert!(cost_of(id.def(), level + 1) >= a);
        }

        #[test]
        fn prop_monotonic_over_sequences(
            mut state in arb_state(),
            ops in proptest::collection::vec(arb_op(), 1..200),
        ) {
            for op in ops {
                let before = state.clone();
                match op {
                    Op::Click => { click(&mut state); }
                    Op::Buy(i) => {
                        if let Some(id) = UpgradeId::from_index(i) {
                            purchase_upgrade(&mut state, id);
                        }
                    }
                    Op::Tick => { tick_auto_accrual(&mut state); }
                }
                prop_assert!(state.points >= 0.0);
                prop_assert!(state.points_per_click >= before.points_per_click);
                prop_assert!(state.multiplier >= before.multiplier);
                prop_assert!(state.total_clicks >= before.total_clicks);
                prop_assert!(state.achievements.is_superset(&before.achievements));
                for id in UpgradeId::all() {
                    prop_assert!(state.level(*id) >= before.level(*id));
                }
            }
        }

        #[test]
        fn prop_format_number_strips_to_integer(n in 0u64..1_000_000_000) {
            let s = format_number(n as f64);
            let stripped: String = s.chars().filter(|c| *c != ',').collect();
            prop_assert_eq!(stripped, n.to_string());
        }
    }
}
