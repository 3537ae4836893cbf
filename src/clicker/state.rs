//! Clicker game state definitions.

use std::collections::{BTreeMap, BTreeSet};

use super::catalog::{AchievementId, UpgradeId};

/// Authoritative economy record. Everything else in the session is
/// presentation state derived from or layered over this.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// Spendable points. Never negative.
    pub points: f64,
    /// Base yield of one click, before the multiplier.
    pub points_per_click: f64,
    pub total_clicks: u64,
    /// Product of every purchased multiplier effect.
    pub multiplier: f64,
    pub achievements: BTreeSet<AchievementId>,
    /// Purchase count per upgrade; a missing key means level 0.
    pub upgrades: BTreeMap<UpgradeId, u32>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            points: 0.0,
            points_per_click: 1.0,
            total_clicks: 0,
            multiplier: 1.0,
            achievements: BTreeSet::new(),
            upgrades: BTreeMap::new(),
        }
    }

    pub fn level(&self, id: UpgradeId) -> u32 {
        self.upgrades.get(&id).copied().unwrap_or(0)
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.achievements.contains(&id)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Sidebar tabs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tab {
    Shop,
    Achievements,
    Leaderboard,
    Settings,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Shop, Tab::Achievements, Tab::Leaderboard, Tab::Settings]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Shop => "ショップ",
            Tab::Achievements => "実績",
            Tab::Leaderboard => "ランキング",
            Tab::Settings => "設定",
        }
    }

    pub fn key(&self) -> char {
        match self {
            Tab::Shop => 'q',
            Tab::Achievements => 'w',
            Tab::Leaderboard => 'e',
            Tab::Settings => 'r',
        }
    }
}

/// "+N" label floating up from where the player clicked.
#[derive(Clone, Debug)]
pub struct FloatingLabel {
    /// Points the click awarded; exactly what was added to the balance.
    pub amount: f64,
    /// Terminal cell of the click, or `None` for keyboard clicks.
    pub origin: Option<(u16, u16)>,
    /// Remaining lifetime in ticks.
    pub ticks_left: u32,
}

/// Message log entry.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}
