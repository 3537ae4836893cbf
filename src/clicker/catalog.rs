//! Static upgrade and achievement catalogs.
//!
//! Both catalogs are closed: every id is an enum variant, so an unknown id
//! cannot reach the engine.

/// Purchasable upgrades, in shop display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UpgradeId {
    ClickPower,
    Multiplier,
    AutoClicker,
    MegaBoost,
}

impl UpgradeId {
    pub fn all() -> &'static [UpgradeId] {
        &[
            UpgradeId::ClickPower,
            UpgradeId::Multiplier,
            UpgradeId::AutoClicker,
            UpgradeId::MegaBoost,
        ]
    }

    /// Stable snake_case identifier.
    #[cfg(test)]
    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeId::ClickPower => "click_power",
            UpgradeId::Multiplier => "multiplier",
            UpgradeId::AutoClicker => "auto_clicker",
            UpgradeId::MegaBoost => "mega_boost",
        }
    }

    /// Position in the catalog (also the shop row).
    pub fn index(&self) -> usize {
        match self {
            UpgradeId::ClickPower => 0,
            UpgradeId::Multiplier => 1,
            UpgradeId::AutoClicker => 2,
            UpgradeId::MegaBoost => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<UpgradeId> {
        UpgradeId::all().get(index).copied()
    }

    /// Keyboard shortcut ('1'..'4').
    pub fn key(&self) -> char {
        (b'1' + self.index() as u8) as char
    }

    pub fn def(&self) -> &'static UpgradeDef {
        &UPGRADES[self.index()]
    }
}

/// Which `GameState` field an upgrade's effect lands on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectKind {
    /// `points_per_click += effect`
    ClickPower,
    /// `multiplier *= effect`
    Multiplier,
    /// Each level yields `effect` points per auto-accrual tick.
    AutoAccrual,
}

#[derive(Debug)]
pub struct UpgradeDef {
    pub id: UpgradeId,
    pub name: &'static str,
    pub description: &'static str,
    pub base_cost: f64,
    /// Geometric growth applied per purchased level.
    pub cost_multiplier: f64,
    pub effect: f64,
    pub kind: EffectKind,
}

pub static UPGRADES: [UpgradeDef; 4] = [
    UpgradeDef {
        id: UpgradeId::ClickPower,
        name: "強化クリック",
        description: "クリック +1",
        base_cost: 25.0,
        cost_multiplier: 1.5,
        effect: 1.0,
        kind: EffectKind::ClickPower,
    },
    UpgradeDef {
        id: UpgradeId::Multiplier,
        name: "倍率アップ",
        description: "全獲得ポイント ×1.2",
        base_cost: 200.0,
        cost_multiplier: 2.2,
        effect: 1.2,
        kind: EffectKind::Multiplier,
    },
    UpgradeDef {
        id: UpgradeId::AutoClicker,
        name: "オートクリッカー",
        description: "毎秒 +1",
        base_cost: 150.0,
        cost_multiplier: 1.8,
        effect: 1.0,
        kind: EffectKind::AutoAccrual,
    },
    UpgradeDef {
        id: UpgradeId::MegaBoost,
        name: "メガブースト",
        description: "クリック +3",
        base_cost: 500.0,
        cost_multiplier: 2.0,
        effect: 3.0,
        kind: EffectKind::ClickPower,
    },
];

/// One-time unlocks, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AchievementId {
    FirstClick,
    HundredClicks,
    ThousandPoints,
    TenThousandPoints,
}

impl AchievementId {
    pub fn all() -> &'static [AchievementId] {
        &[
            AchievementId::FirstClick,
            AchievementId::HundredClicks,
            AchievementId::ThousandPoints,
            AchievementId::TenThousandPoints,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstClick => "first_click",
            AchievementId::HundredClicks => "hundred_clicks",
            AchievementId::ThousandPoints => "thousand_points",
            AchievementId::TenThousandPoints => "ten_thousand_points",
        }
    }

    pub fn def(&self) -> &'static AchievementDef {
        match self {
            AchievementId::FirstClick => &ACHIEVEMENTS[0],
            AchievementId::HundredClicks => &ACHIEVEMENTS[1],
            AchievementId::ThousandPoints => &ACHIEVEMENTS[2],
            AchievementId::TenThousandPoints => &ACHIEVEMENTS[3],
        }
    }
}

/// Counter an achievement threshold is compared against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Metric {
    TotalClicks,
    Points,
}

#[derive(Debug)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub metric: Metric,
    pub requirement: u64,
}

pub static ACHIEVEMENTS: [AchievementDef; 4] = [
    AchievementDef {
        id: AchievementId::FirstClick,
        name: "はじめの一歩",
        description: "初めてクリックする",
        metric: Metric::TotalClicks,
        requirement: 1,
    },
    AchievementDef {
        id: AchievementId::HundredClicks,
        name: "百連打",
        description: "100回クリックする",
        metric: Metric::TotalClicks,
        requirement: 100,
    },
    AchievementDef {
        id: AchievementId::ThousandPoints,
        name: "千ポイント",
        description: "1,000ポイント貯める",
        metric: Metric::Points,
        requirement: 1_000,
    },
    AchievementDef {
        id: AchievementId::TenThousandPoints,
        name: "クリックマスター",
        description: "10,000ポイント貯める",
        metric: Metric::Points,
        requirement: 10_000,
    },
];
