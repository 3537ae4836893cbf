//! Clicker rendering: balance header, click button with floating labels,
//! tabbed sidebar (shop, achievements, leaderboard, settings) and log.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::catalog::{AchievementId, Metric, UpgradeId};
use super::leaderboard;
use super::logic::{self, format_number};
use super::state::{FloatingLabel, Tab};
use super::{ClickerGame, LABEL_LIFETIME};

/// Click button art: idle and pressed.
const BUTTON_ART: &[&str] = &["╭──────────╮", "│  CLICK!  │", "╰──────────╯"];
const BUTTON_PRESSED_ART: &[&str] = &["            ", "╭─ CLICK! ─╮", "╰──────────╯"];

pub fn render(game: &ClickerGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut cs = click_state.borrow_mut();

    if is_narrow_layout(area.width) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(9),
                Constraint::Length(3),
                Constraint::Min(6),
            ])
            .split(area);
        render_header(game, f, chunks[0]);
        render_button(game, f, chunks[1], &mut cs);
        render_tab_bar(game, f, chunks[2], &mut cs);
        render_tab_content(game, f, chunks[3], &mut cs);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(9),
            Constraint::Length(8),
        ])
        .split(columns[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(6)])
        .split(columns[1]);

    render_header(game, f, left[0]);
    render_button(game, f, left[1], &mut cs);
    render_log(game, f, left[2]);
    render_tab_bar(game, f, right[0], &mut cs);
    render_tab_content(game, f, right[1], &mut cs);
}

fn render_header(game: &ClickerGame, f: &mut Frame, area: Rect) {
    let state = &game.state;
    let border_color = if game.purchase_flash > 0 {
        Color::Green
    } else {
        Color::Cyan
    };

    let auto_rate = logic::auto_accrual_rate(state);
    let mut stats = vec![
        Span::styled("クリック ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("+{}", format_number(logic::click_value(state))),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled("  倍率 ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("x{}", format_number(state.multiplier)),
            Style::default().fg(Color::Magenta),
        ),
    ];
    if auto_rate > 0.0 {
        stats.push(Span::styled("  自動 ", Style::default().fg(Color::Gray)));
        stats.push(Span::styled(
            format!("{}/秒", format_number(auto_rate)),
            Style::default().fg(Color::Green),
        ));
    }

    let lines = vec![
        Line::from(Span::styled(
            format!("{} ポイント", format_number(state.points.floor())),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(stats),
        Line::from(Span::styled(
            format!("総クリック数 {}", format_number(state.total_clicks as f64)),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" クリッカー "),
    );
    f.render_widget(widget, area);
}

fn render_button(game: &ClickerGame, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let pressed = game.click_flash > 0;
    let art = if pressed { BUTTON_PRESSED_ART } else { BUTTON_ART };
    let art_style = if pressed {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" [C] クリック ");
    let inner = block.inner(area);

    let pad = inner.height.saturating_sub(art.len() as u16) / 2;
    let mut lines: Vec<Line> = (0..pad).map(|_| Line::from("")).collect();
    lines.extend(
        art.iter()
            .map(|row| Line::from(Span::styled(*row, art_style))),
    );

    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
    cs.add_click_target(area, CLICK_BUTTON);

    for (i, label) in game.labels.iter().enumerate() {
        render_floating_label(f, inner, label, i);
    }
}

/// Draw one "+N" label, rising from its origin as it ages.
fn render_floating_label(f: &mut Frame, inner: Rect, label: &FloatingLabel, index: usize) {
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let text = format!("+{}", format_number(label.amount));
    let width = (text.chars().count() as u16).min(inner.width);
    let age = LABEL_LIFETIME.saturating_sub(label.ticks_left);
    let rise = (age / 3) as u16;

    let (col, row) = label.origin.unwrap_or_else(|| {
        // Keyboard clicks have no origin: fan out around the button.
        let spread = (index % 5) as i32 * 3 - 6;
        let center = inner.x as i32 + inner.width as i32 / 2 + spread;
        (center.max(0) as u16, inner.y + inner.height / 2)
    });

    let max_x = inner.x + inner.width - width;
    let x = col.saturating_sub(width / 2).clamp(inner.x, max_x);
    let y = row
        .saturating_sub(rise + 1)
        .clamp(inner.y, inner.y + inner.height - 1);

    let style = if label.ticks_left <= 3 {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::LightYellow)
            .add_modifier(Modifier::BOLD)
    };
    f.render_widget(
        Paragraph::new(Span::styled(text, style)),
        Rect::new(x, y, width, 1),
    );
}

fn tab_action(tab: Tab) -> u16 {
    match tab {
        Tab::Shop => TAB_SHOP,
        Tab::Achievements => TAB_ACHIEVEMENTS,
        Tab::Leaderboard => TAB_LEADERBOARD,
        Tab::Settings => TAB_SETTINGS,
    }
}

fn render_tab_bar(game: &ClickerGame, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let mut bar = TabBar::new("│").block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    for tab in Tab::all() {
        let style = if *tab == game.tab {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        bar = bar.tab(tab.label(), style, tab_action(*tab));
    }
    bar.render(f, area, cs);
}

fn render_tab_content(game: &ClickerGame, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    match game.tab {
        Tab::Shop => render_shop(game, f, area, cs),
        Tab::Achievements => render_achievements(game, f, area),
        Tab::Leaderboard => render_leaderboard(game, f, area),
        Tab::Settings => render_settings(game, f, area, cs),
    }
}

fn render_shop(game: &ClickerGame, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let state = &game.state;
    let mut cl = ClickableList::new();

    for id in UpgradeId::all() {
        let def = id.def();
        let level = state.level(*id);
        let cost = logic::next_cost(state, *id);
        let affordable = logic::can_afford(state, *id);
        let action = BUY_UPGRADE_BASE + id.index() as u16;

        let (key_style, name_style, cost_style) = if affordable {
            (
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Green),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::Gray),
                Style::default().fg(Color::Red),
            )
        };

        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" [{}] ", id.key()), key_style),
                Span::styled(def.name, name_style),
                Span::styled(format!(" Lv.{}", level), Style::default().fg(Color::Cyan)),
                Span::styled(format!("  {} pt", format_number(cost)), cost_style),
            ]),
            action,
        );
        cl.push_clickable(
            Line::from(Span::styled(
                format!("     {}", def.description),
                Style::default().fg(Color::DarkGray),
            )),
            action,
        );
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" 強化 ");
    cl.register_targets(area, cs, 1, 1);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

/// Current value of the counter an achievement tracks.
fn metric_value(game: &ClickerGame, metric: Metric) -> f64 {
    match metric {
        Metric::TotalClicks => game.state.total_clicks as f64,
        Metric::Points => game.state.points,
    }
}

fn render_achievements(game: &ClickerGame, f: &mut Frame, area: Rect) {
    let mut lines = Vec::new();
    for id in AchievementId::all() {
        let def = id.def();
        if game.state.is_unlocked(*id) {
            lines.push(Line::from(vec![
                Span::styled(" ★ ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    def.name,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        } else {
            let current = metric_value(game, def.metric).min(def.requirement as f64);
            lines.push(Line::from(vec![
                Span::styled(" ☆ ", Style::default().fg(Color::DarkGray)),
                Span::styled(def.name, Style::default().fg(Color::Gray)),
                Span::styled(
                    format!(
                        "  {}/{}",
                        format_number(current.floor()),
                        format_number(def.requirement as f64)
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
        lines.push(Line::from(Span::styled(
            format!("    {}", def.description),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let title = format!(
        " 実績 {}/{} ",
        game.state.achievements.len(),
        AchievementId::all().len()
    );
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(title),
    );
    f.render_widget(widget, area);
}

fn render_leaderboard(game: &ClickerGame, f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = leaderboard::standings(game.state.points)
        .iter()
        .enumerate()
        .map(|(rank, row)| {
            let style = if row.is_player {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(vec![
                Span::styled(format!(" {}. ", rank + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{:<12}", row.name), style),
                Span::styled(format_number(row.score.floor()), style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" ランキング "),
    );
    f.render_widget(widget, area);
}

fn render_settings(game: &ClickerGame, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let mut cl = ClickableList::new();

    let (sound_label, sound_style) = if game.sound_enabled {
        ("ON", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        ("OFF", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    };
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" [M] サウンド ", Style::default().fg(Color::White)),
            Span::styled(sound_label, sound_style),
        ]),
        TOGGLE_SOUND,
    );
    cl.push(Line::from(""));

    let reset_line = if game.confirm_reset {
        Line::from(Span::styled(
            " [X] 本当にリセット？ もう一度押して確定",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ))
    } else {
        Line::from(Span::styled(
            " [X] 進行状況をリセット",
            Style::default().fg(Color::Red),
        ))
    };
    cl.push_clickable(reset_line, RESET_PROGRESS);
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        " C/Space クリック  1-4 購入  Q/W/E/R タブ",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray))
        .title(" 設定 ");
    cl.register_targets(area, cs, 1, 1);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_log(game: &ClickerGame, f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = game.log.len().saturating_sub(visible);

    let lines: Vec<Line> = game.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" ログ "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
