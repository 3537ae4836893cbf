//! Semantic action IDs for clicker click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

// ── Core ────────────────────────────────────────────────────────
pub const CLICK_BUTTON: u16 = 0;

// ── Tabs ────────────────────────────────────────────────────────
pub const TAB_SHOP: u16 = 10;
pub const TAB_ACHIEVEMENTS: u16 = 11;
pub const TAB_LEADERBOARD: u16 = 12;
pub const TAB_SETTINGS: u16 = 13;

// ── Shop (base + catalog index) ─────────────────────────────────
pub const BUY_UPGRADE_BASE: u16 = 100;

// ── Settings ────────────────────────────────────────────────────
pub const TOGGLE_SOUND: u16 = 200;
pub const RESET_PROGRESS: u16 = 201;
