// Heads-up display
//
// Health bars with their transition after a hit, the round timer, the
// game-over modal and the duel menus. Everything is drawn straight onto the
// canvas after the fighters.

use std::time::Duration;

use glam::Vec2;

use crate::core::math::{clamp, lerp};
use crate::core::Rect;
use crate::engine::renderer::{Canvas, Color, TextAlign};
use crate::game::characters::FighterId;

const MARGIN: f32 = 20.0;
const BAR_Y: f32 = 20.0;
const BAR_HEIGHT: f32 = 30.0;
const TIMER_WIDTH: f32 = 100.0;
const TIMER_HEIGHT: f32 = 50.0;

const BAR_BACK: Color = Color::RED;
const BAR_FILL: Color = Color::rgba(129, 140, 248, 255);
const SHADE: Color = Color::rgba(0, 0, 0, 150);
const PANEL: Color = Color::rgba(20, 20, 20, 235);
const DISABLED: Color = Color::rgba(90, 90, 90, 255);

/// Width of a health bar, as a percentage, easing towards its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthBar {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
}

impl HealthBar {
    pub fn new(percent: f32, duration: Duration) -> Self {
        Self {
            from: percent,
            to: percent,
            elapsed: duration,
            duration,
        }
    }

    /// Start easing from `from` to `to`
    pub fn transition(&mut self, from: f32, to: f32) {
        self.from = from;
        self.to = to;
        self.elapsed = Duration::ZERO;
    }

    /// Jump straight to `percent`
    pub fn set(&mut self, percent: f32) {
        self.from = percent;
        self.to = percent;
        self.elapsed = self.duration;
    }

    pub fn update(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    #[cfg(test)]
    pub fn is_animating(&self) -> bool {
        self.elapsed < self.duration
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Current width in percent
    pub fn percent(&self) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        lerp(self.from, self.to, clamp(t, 0.0, 1.0))
    }
}

/// Modal shown when a round is over
#[derive(Debug, Default)]
pub struct GameOverModal {
    open: bool,
    title: String,
    times_opened: u32,
}

impl GameOverModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the modal with `title`. An open modal is closed first.
    pub fn open(&mut self, title: &str) {
        if self.open {
            self.close();
        }
        self.title = title.to_string();
        self.open = true;
        self.times_opened += 1;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn times_opened(&self) -> u32 {
        self.times_opened
    }
}

/// One of the four duel attack buttons as drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuButton<'a> {
    pub label: &'a str,
    pub enabled: bool,
}

/// Display hooks of a round
#[derive(Debug)]
pub struct Hud {
    bars: [HealthBar; 2],
    modal: GameOverModal,
}

impl Hud {
    pub fn new(tween: Duration) -> Self {
        Self {
            bars: [HealthBar::new(100.0, tween); 2],
            modal: GameOverModal::new(),
        }
    }

    /// Full bars, modal closed
    pub fn reset(&mut self) {
        for bar in &mut self.bars {
            bar.set(100.0);
        }
        self.modal.close();
    }

    pub fn bar(&self, id: FighterId) -> &HealthBar {
        &self.bars[id.index()]
    }

    pub fn bar_mut(&mut self, id: FighterId) -> &mut HealthBar {
        &mut self.bars[id.index()]
    }

    pub fn modal(&self) -> &GameOverModal {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut GameOverModal {
        &mut self.modal
    }

    pub fn update(&mut self, dt: Duration) {
        for bar in &mut self.bars {
            bar.update(dt);
        }
    }

    fn bar_width(canvas: &dyn Canvas) -> f32 {
        let (width, _) = canvas.size();
        ((width as f32 - 2.0 * MARGIN - TIMER_WIDTH) / 2.0).max(0.0)
    }

    /// Both health bars along the top edge; the player's drains towards the
    /// left edge, the enemy's towards the right one
    pub fn draw_bars(&self, canvas: &mut dyn Canvas) {
        let width = Self::bar_width(canvas);
        let player_x = MARGIN;
        let enemy_x = MARGIN + width + TIMER_WIDTH;

        let player = clamp(self.bar(FighterId::Player).percent(), 0.0, 100.0) / 100.0;
        let enemy = clamp(self.bar(FighterId::Enemy).percent(), 0.0, 100.0) / 100.0;

        canvas.fill_rect(Rect::new(player_x, BAR_Y, width, BAR_HEIGHT), BAR_BACK);
        canvas.fill_rect(
            Rect::new(player_x + width * (1.0 - player), BAR_Y, width * player, BAR_HEIGHT),
            BAR_FILL,
        );

        canvas.fill_rect(Rect::new(enemy_x, BAR_Y, width, BAR_HEIGHT), BAR_BACK);
        canvas.fill_rect(Rect::new(enemy_x, BAR_Y, width * enemy, BAR_HEIGHT), BAR_FILL);
    }

    /// Timer box between the bars
    pub fn draw_timer(&self, canvas: &mut dyn Canvas, seconds: u32) {
        let x = MARGIN + Self::bar_width(canvas);
        let frame = Rect::new(x, BAR_Y - 10.0, TIMER_WIDTH, TIMER_HEIGHT);

        canvas.fill_rect(frame, Color::BLACK);
        canvas.stroke_round_rect(frame, 0.0, 3.0, Color::WHITE);
        canvas.fill_text(
            &seconds.to_string(),
            Vec2::new(x + TIMER_WIDTH / 2.0, BAR_Y + 2.0),
            25.0,
            TextAlign::Center,
            Color::WHITE,
        );
    }

    /// Modal with its title and restart button, when open
    pub fn draw_modal(&self, canvas: &mut dyn Canvas) {
        if !self.modal.is_open() {
            return;
        }
        let bounds = canvas.bounds();
        let center = Vec2::new(bounds.width / 2.0, bounds.height / 2.0);

        canvas.fill_rect(bounds, SHADE);

        let panel = Rect::new(center.x - 240.0, center.y - 100.0, 480.0, 200.0);
        canvas.fill_round_rect(panel, 12.0, PANEL);
        canvas.stroke_round_rect(panel, 12.0, 2.0, Color::WHITE);
        canvas.fill_text(
            self.modal.title(),
            Vec2::new(center.x, center.y - 60.0),
            20.0,
            TextAlign::Center,
            Color::WHITE,
        );

        let button = Rect::new(center.x - 110.0, center.y + 10.0, 220.0, 46.0);
        canvas.fill_round_rect(button, 8.0, Color::WHITE);
        canvas.fill_text(
            "Play again",
            Vec2::new(center.x, center.y + 23.0),
            20.0,
            TextAlign::Center,
            Color::BLACK,
        );
        canvas.fill_text(
            "Press Enter",
            Vec2::new(center.x, center.y + 68.0),
            10.0,
            TextAlign::Center,
            Color::GREY,
        );
    }

    /// Main duel menu: a single fight button
    pub fn draw_main_menu(&self, canvas: &mut dyn Canvas) {
        let panel = Self::menu_panel(canvas);
        canvas.fill_round_rect(panel, 8.0, PANEL);
        canvas.stroke_round_rect(panel, 8.0, 2.0, Color::WHITE);
        canvas.fill_text(
            "Fight - Enter",
            Vec2::new(panel.x + panel.width / 2.0, panel.y + 35.0),
            20.0,
            TextAlign::Center,
            Color::WHITE,
        );
    }

    /// Fight menu: one button per attack, greyed out while disabled
    pub fn draw_fight_menu(&self, canvas: &mut dyn Canvas, buttons: &[MenuButton<'_>]) {
        let panel = Self::menu_panel(canvas);
        canvas.fill_round_rect(panel, 8.0, PANEL);
        canvas.stroke_round_rect(panel, 8.0, 2.0, Color::WHITE);

        if buttons.is_empty() {
            return;
        }
        let gap = 10.0;
        let width = (panel.width - gap * (buttons.len() as f32 + 1.0)) / buttons.len() as f32;
        for (index, button) in buttons.iter().enumerate() {
            let rect = Rect::new(
                panel.x + gap + index as f32 * (width + gap),
                panel.y + gap,
                width,
                panel.height - 2.0 * gap,
            );
            let (fill, text) = if button.enabled {
                (Color::WHITE, Color::BLACK)
            } else {
                (DISABLED, Color::GREY)
            };
            canvas.fill_round_rect(rect, 6.0, fill);
            canvas.fill_text(
                &format!("{} {}", index + 1, button.label),
                Vec2::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0 - 7.0),
                15.0,
                TextAlign::Center,
                text,
            );
        }
    }

    fn menu_panel(canvas: &dyn Canvas) -> Rect {
        let bounds = canvas.bounds();
        Rect::new(MARGIN, bounds.height - 100.0, bounds.width - 2.0 * MARGIN, 80.0)
    }
}

/// Banner drawn over a frozen frame while the loop is paused
pub fn draw_paused(canvas: &mut dyn Canvas) {
    let bounds = canvas.bounds();
    canvas.fill_text(
        "Paused",
        Vec2::new(bounds.width / 2.0, bounds.height / 2.0 - 20.0),
        40.0,
        TextAlign::Center,
        Color::WHITE,
    );
}
