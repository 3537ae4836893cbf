mod clicker;
mod console;
mod input;
mod sound;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use clicker::ClickerGame;
use input::{pixel_to_cell, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::style::Color;
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use tachyonfx::{fx, Duration, Effect, Interpolation};
use time::{GameTime, TICKS_PER_SEC};

/// Convert a mouse position to a terminal cell using the grid container's
/// bounding rect.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    pixel_to_cell(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
        cs.terminal_cols,
        cs.terminal_rows,
    )
}

/// Frame timestamp in milliseconds.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Play cues queued by the last input. Runs inside the input handler so the
/// browser allows audio.
fn play_pending_cues(game: &mut ClickerGame) {
    for cue in game.take_cues() {
        sound::play(cue);
    }
}

/// Brief golden flash over the whole screen when an achievement unlocks.
fn celebration() -> Effect {
    fx::fade_from_fg(Color::Yellow, (800, Interpolation::QuadOut))
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let game = Rc::new(RefCell::new(ClickerGame::new()));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let Some(action) = cs.hit_test(col, row) else {
                return;
            };
            drop(cs);

            let mut g = game.borrow_mut();
            g.handle_input(&InputEvent::Click { action, col, row });
            play_pending_cues(&mut g);
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                let mut g = game.borrow_mut();
                g.handle_input(&InputEvent::Key(c));
                play_pending_cues(&mut g);
            }
        }
    });

    console::log("session started");

    terminal.draw_web({
        let mut clock = GameTime::new(TICKS_PER_SEC);
        let mut effect: Option<Effect> = None;
        move |f| {
            let ticks = clock.update(now_ms());
            let mut g = game.borrow_mut();
            g.tick(ticks);
            if !g.take_unlocks().is_empty() {
                effect = Some(celebration());
            }

            let area = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = area.width;
                cs.terminal_rows = area.height;
                cs.clear_targets();
            }
            g.render(f, area, &click_state);

            if let Some(active) = effect.as_mut() {
                let elapsed = Duration::from_millis(clock.frame_ms().into());
                active.process(elapsed, f.buffer_mut(), area);
                if active.done() {
                    effect = None;
                }
            }
        }
    });

    Ok(())
}
