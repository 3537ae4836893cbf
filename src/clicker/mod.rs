//! Clicker: tap for points, buy upgrades, unlock achievements.

pub mod actions;
pub mod catalog;
pub mod leaderboard;
pub mod logic;
pub mod render;
pub mod simulator;
pub mod state;

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::console;
use crate::input::{ClickState, InputEvent};
use crate::sound::SoundCue;
use crate::time::{Interval, TICKS_PER_SEC};

use catalog::{AchievementId, UpgradeId};
use logic::format_number;
use state::{FloatingLabel, GameState, LogEntry, Tab};

/// Auto-accrual fires once per second.
pub const AUTO_ACCRUAL_PERIOD: u32 = TICKS_PER_SEC;
/// Each floating label lives one second from its own creation.
pub const LABEL_LIFETIME: u32 = TICKS_PER_SEC;
const MAX_LABELS: usize = 20;
const MAX_LOG: usize = 50;
const CLICK_FLASH: u32 = 2;
const PURCHASE_FLASH: u32 = 5;

/// One play session: the economy state plus everything the view layers on
/// top of it. Cosmetic state never feeds back into the economy.
pub struct ClickerGame {
    pub state: GameState,
    pub tab: Tab,
    /// UI preference; survives a progress reset.
    pub sound_enabled: bool,
    pub labels: Vec<FloatingLabel>,
    pub log: Vec<LogEntry>,
    pub click_flash: u32,
    pub purchase_flash: u32,
    /// Set by the first reset request; the second one wipes progress.
    pub confirm_reset: bool,
    auto_timer: Interval,
    cues: Vec<SoundCue>,
    unlocks: Vec<AchievementId>,
}

impl ClickerGame {
    pub fn new() -> Self {
        let mut game = Self {
            state: GameState::new(),
            tab: Tab::Shop,
            sound_enabled: true,
            labels: Vec::new(),
            log: Vec::new(),
            click_flash: 0,
            purchase_flash: 0,
            confirm_reset: false,
            auto_timer: Interval::new(AUTO_ACCRUAL_PERIOD),
            cues: Vec::new(),
            unlocks: Vec::new(),
        };
        game.add_log("クリッカーへようこそ！", true);
        game
    }

    /// Handle an input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Click { action, col, row } => {
                self.handle_action(*action, Some((*col, *row)))
            }
        }
    }

    fn handle_key(&mut self, key: char) -> bool {
        let action = match key {
            'c' | 'C' | ' ' => actions::CLICK_BUTTON,
            '1'..='9' => actions::BUY_UPGRADE_BASE + (key as u16 - '1' as u16),
            'm' | 'M' => actions::TOGGLE_SOUND,
            'x' | 'X' => actions::RESET_PROGRESS,
            _ => match Tab::all().iter().find(|t| t.key() == key) {
                Some(tab) => {
                    self.confirm_reset = false;
                    self.tab = *tab;
                    return true;
                }
                None => return false,
            },
        };
        self.handle_action(action, None)
    }

    fn handle_action(&mut self, action: u16, origin: Option<(u16, u16)>) -> bool {
        if action != actions::RESET_PROGRESS {
            self.confirm_reset = false;
        }
        match action {
            actions::CLICK_BUTTON => {
                self.click(origin);
            }
            actions::TAB_SHOP => self.tab = Tab::Shop,
            actions::TAB_ACHIEVEMENTS => self.tab = Tab::Achievements,
            actions::TAB_LEADERBOARD => self.tab = Tab::Leaderboard,
            actions::TAB_SETTINGS => self.tab = Tab::Settings,
            actions::TOGGLE_SOUND => self.toggle_sound(),
            actions::RESET_PROGRESS => self.request_reset(),
            a if a >= actions::BUY_UPGRADE_BASE => {
                match UpgradeId::from_index((a - actions::BUY_UPGRADE_BASE) as usize) {
                    Some(id) => {
                        self.purchase(id);
                    }
                    None => return false,
                }
            }
            _ => return false,
        }
        true
    }

    /// Click the button. Returns the points awarded.
    pub fn click(&mut self, origin: Option<(u16, u16)>) -> f64 {
        let before = self.state.achievements.clone();
        let earned = logic::click(&mut self.state);

        self.labels.push(FloatingLabel {
            amount: earned,
            origin,
            ticks_left: LABEL_LIFETIME,
        });
        if self.labels.len() > MAX_LABELS {
            self.labels.remove(0);
        }
        self.click_flash = CLICK_FLASH;
        self.queue_cue(SoundCue::Click);
        self.note_unlocks(&before);
        earned
    }

    /// Buy one level of `id`. Returns true if successful.
    pub fn purchase(&mut self, id: UpgradeId) -> bool {
        let before = self.state.achievements.clone();
        let cost = logic::next_cost(&self.state, id);
        if !logic::purchase_upgrade(&mut self.state, id) {
            self.add_log(
                &format!("ポイント不足（{} 必要）", format_number(cost)),
                false,
            );
            return false;
        }

        self.purchase_flash = PURCHASE_FLASH;
        self.queue_cue(SoundCue::Purchase);
        self.add_log(
            &format!("{} を購入！ (Lv.{})", id.def().name, self.state.level(id)),
            false,
        );
        self.sync_auto_timer();
        self.note_unlocks(&before);
        true
    }

    /// Advance by `delta_ticks` ticks (10 per second).
    pub fn tick(&mut self, delta_ticks: u32) {
        if delta_ticks == 0 {
            return;
        }

        let fires = self.auto_timer.advance(delta_ticks);
        if fires > 0 {
            let before = self.state.achievements.clone();
            for _ in 0..fires {
                logic::tick_auto_accrual(&mut self.state);
            }
            self.note_unlocks(&before);
        }

        for label in &mut self.labels {
            label.ticks_left = label.ticks_left.saturating_sub(delta_ticks);
        }
        self.labels.retain(|l| l.ticks_left > 0);
        self.click_flash = self.click_flash.saturating_sub(delta_ticks);
        self.purchase_flash = self.purchase_flash.saturating_sub(delta_ticks);
    }

    #[cfg(test)]
    pub fn is_auto_accrual_running(&self) -> bool {
        self.auto_timer.is_running()
    }

    /// Run the auto-accrual timer exactly while there is something to accrue.
    fn sync_auto_timer(&mut self) {
        if logic::auto_accrual_rate(&self.state) > 0.0 {
            if !self.auto_timer.is_running() {
                self.auto_timer.start();
                console::log("auto-accrual started");
            }
        } else {
            self.auto_timer.stop();
        }
    }

    fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
        let text = if self.sound_enabled {
            "サウンド ON"
        } else {
            "サウンド OFF"
        };
        self.add_log(text, false);
    }

    fn request_reset(&mut self) {
        if self.confirm_reset {
            self.reset();
        } else {
            self.confirm_reset = true;
            self.add_log("もう一度押すとリセットします", true);
        }
    }

    /// Reinitialize progress in memory. The sound preference is kept.
    pub fn reset(&mut self) {
        self.auto_timer.stop();
        self.state = GameState::new();
        self.labels.clear();
        self.click_flash = 0;
        self.purchase_flash = 0;
        self.confirm_reset = false;
        self.unlocks.clear();
        self.add_log("進行状況をリセットしました", true);
        console::log("progress reset");
    }

    /// Log and queue every achievement unlocked since `before`.
    fn note_unlocks(&mut self, before: &BTreeSet<AchievementId>) {
        let fresh: Vec<AchievementId> = self
            .state
            .achievements
            .difference(before)
            .copied()
            .collect();
        for id in fresh {
            let def = id.def();
            self.add_log(&format!("★ 実績解除: {}", def.name), true);
            console::log(&format!("achievement unlocked: {}", id.as_str()));
            self.unlocks.push(id);
        }
    }

    fn queue_cue(&mut self, cue: SoundCue) {
        if self.sound_enabled {
            self.cues.push(cue);
        }
    }

    /// Drain sound cues queued since the last call.
    pub fn take_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }

    /// Drain achievements unlocked since the last call.
    pub fn take_unlocks(&mut self) -> Vec<AchievementId> {
        std::mem::take(&mut self.unlocks)
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }
}

impl Default for ClickerGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_click_awards_points() {
        let mut game = ClickerGame::new();
        assert!(game.handle_input(&InputEvent::Key('c')));
        assert_eq!(game.state.points, 1.0);
        assert_eq!(game.state.total_clicks, 1);
        assert_eq!(game.labels.len(), 1);
        assert_eq!(game.labels[0].origin, None);
    }

    #[test]
    fn pointer_click_keeps_origin_for_label() {
        let mut game = ClickerGame::new();
        game.handle_input(&InputEvent::Click {
            action: actions::CLICK_BUTTON,
            col: 12,
            row: 9,
        });
        assert_eq!(game.labels[0].origin, Some((12, 9)));
        assert_eq!(game.labels[0].amount, 1.0);
    }

    #[test]
    fn label_shows_exact_amount_added() {
        let mut game = ClickerGame::new();
        game.state.points_per_click = 3.0;
        game.state.multiplier = 1.2;
        let before = game.state.points;
        let earned = game.click(None);
        assert_eq!(game.labels[0].amount, earned);
        assert_eq!(game.state.points - before, earned);
    }

    #[test]
    fn labels_expire_independently() {
        let mut game = ClickerGame::new();
        game.click(None);
        game.tick(4);
        game.click(None);
        game.tick(6);
        assert_eq!(game.labels.len(), 1);
        assert_eq!(game.labels[0].ticks_left, 4);
        game.tick(4);
        assert!(game.labels.is_empty());
    }

    #[test]
    fn labels_are_capped() {
        let mut game = ClickerGame::new();
        for _ in 0..50 {
            game.click(None);
        }
        assert_eq!(game.labels.len(), MAX_LABELS);
        assert_eq!(game.state.total_clicks, 50);
    }

    #[test]
    fn first_click_queues_unlock() {
        let mut game = ClickerGame::new();
        game.click(None);
        assert_eq!(game.take_unlocks(), vec![AchievementId::FirstClick]);
        game.click(None);
        assert!(game.take_unlocks().is_empty());
    }

    #[test]
    fn digit_keys_buy_upgrades() {
        let mut game = ClickerGame::new();
        game.state.points = 25.0;
        assert!(game.handle_input(&InputEvent::Key('1')));
        assert_eq!(game.state.level(UpgradeId::ClickPower), 1);
        assert_eq!(game.state.points, 0.0);
        assert!(game.purchase_flash > 0);
    }

    #[test]
    fn rejected_purchase_changes_nothing() {
        let mut game = ClickerGame::new();
        game.state.points = 24.0;
        let before = game.state.clone();
        assert!(!game.purchase(UpgradeId::ClickPower));
        assert_eq!(game.state, before);
        assert!(game.take_cues().is_empty());
        assert_eq!(game.purchase_flash, 0);
    }

    #[test]
    fn unknown_upgrade_slot_is_not_consumed() {
        let mut game = ClickerGame::new();
        game.state.points = 1e9;
        assert!(!game.handle_input(&InputEvent::Key('9')));
        assert!(game.state.upgrades.is_empty());
    }

    #[test]
    fn auto_timer_starts_with_first_auto_clicker() {
        let mut game = ClickerGame::new();
        game.tick(30);
        assert!(!game.is_auto_accrual_running());
        assert_eq!(game.state.points, 0.0);

        game.state.points = 150.0;
        assert!(game.purchase(UpgradeId::AutoClicker));
        assert!(game.is_auto_accrual_running());
        game.tick(9);
        assert_eq!(game.state.points, 0.0);
        game.tick(1);
        assert_eq!(game.state.points, 1.0);
        game.tick(20);
        assert_eq!(game.state.points, 3.0);
    }

    #[test]
    fn other_upgrades_do_not_start_timer() {
        let mut game = ClickerGame::new();
        game.state.points = 1_000.0;
        game.purchase(UpgradeId::ClickPower);
        game.purchase(UpgradeId::Multiplier);
        assert!(!game.is_auto_accrual_running());
    }

    #[test]
    fn auto_accrual_unlocks_are_reported() {
        let mut game = ClickerGame::new();
        game.state.points = 999.0 + 150.0;
        game.purchase(UpgradeId::AutoClicker);
        game.take_unlocks();
        game.tick(AUTO_ACCRUAL_PERIOD);
        assert_eq!(game.take_unlocks(), vec![AchievementId::ThousandPoints]);
    }

    #[test]
    fn sound_preference_gates_cues() {
        let mut game = ClickerGame::new();
        game.state.points = 100.0;
        game.click(None);
        game.purchase(UpgradeId::ClickPower);
        assert_eq!(game.take_cues(), vec![SoundCue::Click, SoundCue::Purchase]);

        game.handle_input(&InputEvent::Key('m'));
        assert!(!game.sound_enabled);
        game.click(None);
        assert!(game.take_cues().is_empty());
    }

    #[test]
    fn reset_needs_confirmation() {
        let mut game = ClickerGame::new();
        game.click(None);
        game.handle_input(&InputEvent::Key('x'));
        assert!(game.confirm_reset);
        assert_eq!(game.state.total_clicks, 1);
        game.handle_input(&InputEvent::Key('x'));
        assert!(!game.confirm_reset);
        assert_eq!(game.state, GameState::new());
    }

    #[test]
    fn other_action_disarms_reset() {
        let mut game = ClickerGame::new();
        game.click(None);
        game.handle_input(&InputEvent::Key('x'));
        game.handle_input(&InputEvent::Key('c'));
        assert!(!game.confirm_reset);
        game.handle_input(&InputEvent::Key('x'));
        assert_eq!(game.state.total_clicks, 2);
    }

    #[test]
    fn reset_stops_timer_and_keeps_sound_setting() {
        let mut game = ClickerGame::new();
        game.state.points = 150.0;
        game.purchase(UpgradeId::AutoClicker);
        game.handle_input(&InputEvent::Key('m'));
        game.reset();
        assert!(!game.is_auto_accrual_running());
        assert!(!game.sound_enabled);
        game.tick(50);
        assert_eq!(game.state.points, 0.0);
    }

    #[test]
    fn tab_keys_and_targets_switch_tabs() {
        let mut game = ClickerGame::new();
        assert_eq!(game.tab, Tab::Shop);
        game.handle_input(&InputEvent::Key('w'));
        assert_eq!(game.tab, Tab::Achievements);
        game.handle_input(&InputEvent::Click {
            action: actions::TAB_SETTINGS,
            col: 0,
            row: 0,
        });
        assert_eq!(game.tab, Tab::Settings);
    }

    #[test]
    fn unmapped_key_is_ignored() {
        let mut game = ClickerGame::new();
        assert!(!game.handle_input(&InputEvent::Key('z')));
    }

    #[test]
    fn log_is_capped() {
        let mut game = ClickerGame::new();
        for i in 0..80 {
            game.add_log(&format!("msg {}", i), false);
        }
        assert_eq!(game.log.len(), MAX_LOG);
        assert_eq!(game.log.last().map(|e| e.text.as_str()), Some("msg 79"));
    }
}
