// Turn-based duel
//
// The player picks one of four attacks from a menu. The attack lands on its
// connecting frame, the defender's health drains one point per step, and the
// enemy answers with its own attack before the menu comes back. Only one
// attack is ever in flight.

use std::time::Duration;

use glam::Vec2;
use log::{debug, info};
use winit::keyboard::KeyCode;

use crate::engine::input::{InputRouter, InputSource, Routed, UiAction};
use crate::engine::renderer::{Canvas, Color};
use crate::engine::scheduler::{Scheduler, TimerHandle};
use crate::game::arena::{MatchOutcome, TickStatus};
use crate::game::characters::{DamageMode, DrainProgress, Fighter, FighterConfig, FighterId};
use crate::game::config::ArenaConfig;
use crate::game::hud::{Hud, MenuButton};
use crate::game::roster::Roster;
use crate::game::sprite::Sprite;

/// Which menu is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Hidden,
    Main,
    Fight,
}

/// One of the player's four attacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackMove {
    pub name: &'static str,
    pub damage: i32,
}

pub const ATTACK_MOVES: [AttackMove; 4] = [
    AttackMove {
        name: "Slash",
        damage: 10,
    },
    AttackMove {
        name: "Thrust",
        damage: 15,
    },
    AttackMove {
        name: "Cleave",
        damage: 20,
    },
    AttackMove {
        name: "Smite",
        damage: 25,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DuelEvent {
    DrainStep(FighterId),
    EndGame,
}

/// Where the exchange currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    /// Menu enabled, waiting for the player
    Ready,
    /// `attacker` starts its swing as soon as its animation allows
    WindUp { attacker: FighterId, damage: i32 },
    /// Waiting for the connecting frame
    Swinging { attacker: FighterId, damage: i32 },
    Draining { defender: FighterId },
    Finishing(MatchOutcome),
    Over(MatchOutcome),
}

pub struct Duel {
    arena: ArenaConfig,
    roster: Roster,
    fighters: [Fighter; 2],
    background: Sprite,
    hud: Hud,
    scheduler: Scheduler<DuelEvent>,
    router: InputRouter,
    menu: Menu,
    turn: Turn,
    drain: Option<TimerHandle>,
}

impl Duel {
    pub fn new(arena: ArenaConfig, roster: Roster) -> Self {
        let mut duel = Self {
            fighters: Self::spawn(&arena, &roster),
            background: roster.background_sprite(),
            hud: Hud::new(arena.health_tween),
            scheduler: Scheduler::new(),
            router: InputRouter::new(),
            menu: Menu::Main,
            turn: Turn::Ready,
            drain: None,
            arena,
            roster,
        };
        duel.start();
        duel
    }

    /// Both fighters standing on the ground line, facing each other
    fn spawn(arena: &ArenaConfig, roster: &Roster) -> [Fighter; 2] {
        let stand = |config: FighterConfig| {
            let position = Vec2::new(config.position.x, arena.ground_y() - config.size.y);
            FighterConfig { position, ..config }
        };
        [
            Fighter::new(
                FighterId::Player,
                stand(FighterConfig::player().for_duel()),
                roster.player.clone(),
            ),
            Fighter::new(
                FighterId::Enemy,
                stand(FighterConfig::enemy().for_duel()),
                roster.enemy.clone(),
            ),
        ]
    }

    pub fn start(&mut self) {
        self.scheduler.cancel_all();
        self.router.release_all();
        self.drain = None;

        self.fighters = Self::spawn(&self.arena, &self.roster);
        self.hud.reset();
        self.menu = Menu::Main;
        self.turn = Turn::Ready;
        self.router.subscribe_ui();

        info!("Duel started");
    }

    pub fn restart(&mut self) {
        info!("Restarting duel");
        self.start();
    }

    pub fn fighter(&self, id: FighterId) -> &Fighter {
        &self.fighters[id.index()]
    }

    pub fn fighter_mut(&mut self, id: FighterId) -> &mut Fighter {
        &mut self.fighters[id.index()]
    }

    pub fn menu(&self) -> Menu {
        self.menu
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    /// The attack buttons accept a choice
    pub fn is_ready(&self) -> bool {
        self.turn == Turn::Ready
    }

    pub fn is_over(&self) -> bool {
        matches!(self.turn, Turn::Over(_))
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        match self.turn {
            Turn::Finishing(outcome) | Turn::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn subscription_count(&self) -> usize {
        self.router.subscription_count()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_count()
    }

    pub fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        if !pressed {
            return;
        }
        for routed in self.router.route(InputSource::key(code)) {
            if let Routed::Ui(action) = routed {
                self.handle_ui(action);
            }
        }
    }

    fn handle_ui(&mut self, action: UiAction) {
        if self.is_over() {
            if action == UiAction::Confirm {
                self.restart();
            }
            return;
        }

        match (self.menu, action) {
            (Menu::Main, UiAction::Confirm) => self.menu = Menu::Fight,
            (Menu::Fight, UiAction::Back) => self.menu = Menu::Main,
            (Menu::Fight, UiAction::AttackButton(index)) => self.choose(index),
            _ => {}
        }
    }

    /// Queue the player's attack. Ignored while another one is in flight.
    fn choose(&mut self, index: usize) {
        let Some(attack) = ATTACK_MOVES.get(index) else {
            return;
        };
        if !self.is_ready() {
            debug!("Attack {} ignored: an attack is in flight", attack.name);
            return;
        }
        debug!("Player chose {}", attack.name);
        self.turn = Turn::WindUp {
            attacker: FighterId::Player,
            damage: attack.damage,
        };
    }

    pub fn tick(&mut self, dt: Duration, canvas: &mut dyn Canvas) -> TickStatus {
        self.scheduler.advance(dt);
        while let Some(fired) = self.scheduler.pop_due() {
            match fired.event {
                DuelEvent::DrainStep(defender) => self.on_drain_step(defender, fired.due),
                DuelEvent::EndGame => {
                    if let Turn::Finishing(outcome) = self.turn {
                        self.end_game(outcome);
                    }
                }
            }
        }

        self.advance_turn();

        canvas.clear(Color::BLACK);
        self.background.draw(canvas);
        let bounds = canvas.bounds();
        canvas.fill_rect(bounds, self.arena.overlay);

        if self.is_over() {
            for fighter in &mut self.fighters {
                fighter.draw(canvas);
            }
        } else {
            for fighter in &mut self.fighters {
                fighter.update(canvas, None);
            }
        }
        self.draw_menu(canvas);
        self.hud.draw_modal(canvas);

        if self.is_over() {
            TickStatus::Over
        } else {
            TickStatus::Running
        }
    }

    fn advance_turn(&mut self) {
        match self.turn {
            Turn::WindUp { attacker, damage } => {
                if self.fighter_mut(attacker).attack() {
                    self.turn = Turn::Swinging { attacker, damage };
                }
            }
            Turn::Swinging { attacker, damage } => {
                if self.fighter(attacker).can_land_hit() {
                    self.land_hit(attacker, damage);
                }
            }
            _ => {}
        }
    }

    fn land_hit(&mut self, attacker: FighterId, damage: i32) {
        let defender = attacker.opponent();
        self.fighter_mut(attacker).end_attack();
        self.fighter_mut(defender).take_hit(damage);
        debug!(
            "{} hits {} for {}",
            self.fighter(attacker).name(),
            self.fighter(defender).name(),
            damage
        );

        self.turn = Turn::Draining { defender };
        let now = self.scheduler.now();
        self.schedule_drain(defender, now);
    }

    /// Queue the next drain step one `step` after `from`
    fn schedule_drain(&mut self, defender: FighterId, from: Duration) {
        let step = match self.fighter(defender).config().damage_mode {
            DamageMode::Incremental { step } => step,
            DamageMode::Immediate => Duration::ZERO,
        };
        self.drain = Some(
            self.scheduler
                .schedule_at(from + step, DuelEvent::DrainStep(defender)),
        );
    }

    fn on_drain_step(&mut self, defender: FighterId, due: Duration) {
        self.drain = None;
        match self.fighter_mut(defender).drain_step() {
            DrainProgress::Draining { .. } => self.schedule_drain(defender, due),
            DrainProgress::Finished => self.on_drain_finished(defender),
        }
        let percent = self.fighter(defender).health_percent();
        self.hud.bar_mut(defender).set(percent);
    }

    fn on_drain_finished(&mut self, defender: FighterId) {
        if self.fighter(defender).is_dying() {
            let outcome = match defender {
                FighterId::Player => MatchOutcome::EnemyWins,
                FighterId::Enemy => MatchOutcome::PlayerWins,
            };
            info!("{} is down", self.fighter(defender).name());
            self.menu = Menu::Hidden;
            self.scheduler
                .schedule(self.arena.game_over_delay, DuelEvent::EndGame);
            self.turn = Turn::Finishing(outcome);
            return;
        }

        match defender {
            // The enemy answers with its own attack
            FighterId::Enemy => {
                self.turn = Turn::WindUp {
                    attacker: FighterId::Enemy,
                    damage: self.fighter(FighterId::Enemy).damage(),
                };
            }
            FighterId::Player => self.turn = Turn::Ready,
        }
    }

    /// Cancel the drain, release input and show the modal
    fn end_game(&mut self, outcome: MatchOutcome) {
        if let Some(handle) = self.drain.take() {
            self.scheduler.cancel(handle);
        }
        self.scheduler.cancel_all();
        self.router.release_all();

        self.menu = Menu::Hidden;
        self.hud.modal_mut().open(outcome.message());
        self.router.subscribe_ui();
        self.turn = Turn::Over(outcome);

        info!("Game over: {}", outcome.message());
    }

    fn draw_menu(&self, canvas: &mut dyn Canvas) {
        match self.menu {
            Menu::Hidden => {}
            Menu::Main => self.hud.draw_main_menu(canvas),
            Menu::Fight => {
                let enabled = self.is_ready();
                let buttons = ATTACK_MOVES.map(|attack| MenuButton {
                    label: attack.name,
                    enabled,
                });
                self.hud.draw_fight_menu(canvas, &buttons);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::game_loop::FIXED_TIMESTEP_DURATION;
    use crate::engine::renderer::canvas::testing::RecordingCanvas;
    use crate::game::characters::AnimationState;
    use crate::game::config::BASE_ARENA;
    use approx::assert_relative_eq;

    fn new_duel() -> Duel {
        Duel::new(BASE_ARENA, Roster::blank())
    }

    fn press(duel: &mut Duel, code: KeyCode) {
        duel.handle_key(code, true);
        duel.handle_key(code, false);
    }

    /// Tick until `done` holds; panics after a generous bound
    fn run_until(duel: &mut Duel, canvas: &mut RecordingCanvas, done: impl Fn(&Duel) -> bool) {
        for _ in 0..2000 {
            if done(duel) {
                return;
            }
            duel.tick(FIXED_TIMESTEP_DURATION, canvas);
        }
        panic!("duel did not reach the expected state");
    }

    #[test]
    fn test_fighters_stand_on_the_ground() {
        let duel = new_duel();
        for id in FighterId::ALL {
            let fighter = duel.fighter(id);
            assert_relative_eq!(fighter.body().bottom(), BASE_ARENA.ground_y());
            assert!(fighter.config().show_health_bar);
        }
        assert_eq!(duel.subscription_count(), 1);
        assert_eq!(duel.menu(), Menu::Main);
    }

    #[test]
    fn test_menu_navigation() {
        let mut duel = new_duel();

        press(&mut duel, KeyCode::Digit1);
        assert!(duel.is_ready());

        press(&mut duel, KeyCode::Enter);
        assert_eq!(duel.menu(), Menu::Fight);

        press(&mut duel, KeyCode::Escape);
        assert_eq!(duel.menu(), Menu::Main);
    }

    #[test]
    fn test_full_exchange() {
        let mut duel = new_duel();
        let mut canvas = RecordingCanvas::new(1024, 576);

        press(&mut duel, KeyCode::Enter);
        press(&mut duel, KeyCode::Digit1);
        assert!(!duel.is_ready());

        run_until(&mut duel, &mut canvas, |duel| duel.is_ready());

        assert_eq!(duel.fighter(FighterId::Enemy).health(), 90);
        assert_eq!(duel.fighter(FighterId::Player).health(), 80);
        assert_eq!(duel.menu(), Menu::Fight);
        assert_relative_eq!(duel.hud().bar(FighterId::Player).percent(), 80.0);
    }

    #[test]
    fn test_second_attack_ignored_while_in_flight() {
        let mut duel = new_duel();
        let mut canvas = RecordingCanvas::new(1024, 576);

        press(&mut duel, KeyCode::Enter);
        press(&mut duel, KeyCode::Digit1);
        duel.tick(FIXED_TIMESTEP_DURATION, &mut canvas);
        press(&mut duel, KeyCode::Digit4);

        run_until(&mut duel, &mut canvas, |duel| duel.is_ready());
        assert_eq!(duel.fighter(FighterId::Enemy).health(), 90);
    }

    #[test]
    fn test_health_drains_one_point_per_step() {
        let mut duel = new_duel();
        let mut canvas = RecordingCanvas::new(1024, 576);

        press(&mut duel, KeyCode::Enter);
        press(&mut duel, KeyCode::Digit3);
        run_until(&mut duel, &mut canvas, |duel| {
            duel.fighter(FighterId::Enemy).is_draining()
        });
        assert_eq!(duel.fighter(FighterId::Enemy).health(), 100);

        duel.tick(Duration::from_millis(20), &mut canvas);
        assert_eq!(duel.fighter(FighterId::Enemy).health(), 99);
        duel.tick(Duration::from_millis(20), &mut canvas);
        assert_eq!(duel.fighter(FighterId::Enemy).health(), 98);
    }

    #[test]
    fn test_drain_keeps_its_cadence_on_frame_ticks() {
        let mut duel = new_duel();
        let mut canvas = RecordingCanvas::new(1024, 576);

        press(&mut duel, KeyCode::Enter);
        press(&mut duel, KeyCode::Digit3);
        run_until(&mut duel, &mut canvas, |duel| {
            duel.fighter(FighterId::Enemy).is_draining()
        });

        // 20 points at one per 20 ms is 400 ms, or 24 ticks of 16.667 ms
        for _ in 0..23 {
            duel.tick(FIXED_TIMESTEP_DURATION, &mut canvas);
        }
        assert_eq!(duel.fighter(FighterId::Enemy).health(), 81);

        duel.tick(FIXED_TIMESTEP_DURATION, &mut canvas);
        assert_eq!(duel.fighter(FighterId::Enemy).health(), 80);
        assert!(!duel.fighter(FighterId::Enemy).is_draining());
        assert_relative_eq!(duel.hud().bar(FighterId::Enemy).target(), 80.0);
    }

    #[test]
    fn test_knockout_wins_and_restarts() {
        let mut duel = new_duel();
        let mut canvas = RecordingCanvas::new(1024, 576);

        let enemy = duel.fighter_mut(FighterId::Enemy);
        enemy.take_hit(95);
        while enemy.drain_step() != DrainProgress::Finished {}
        assert_eq!(enemy.health(), 5);

        press(&mut duel, KeyCode::Enter);
        press(&mut duel, KeyCode::Digit2);
        run_until(&mut duel, &mut canvas, |duel| duel.outcome().is_some());

        assert_eq!(duel.fighter(FighterId::Enemy).health(), 0);
        assert_eq!(duel.fighter(FighterId::Enemy).state(), AnimationState::Die);
        assert_eq!(duel.menu(), Menu::Hidden);

        duel.tick(Duration::from_secs(3), &mut canvas);
        assert!(duel.is_over());
        assert_eq!(duel.hud().modal().title(), "Game over, you win!");
        assert_eq!(duel.pending_timers(), 0);

        press(&mut duel, KeyCode::Enter);
        assert!(!duel.is_over());
        assert_eq!(duel.fighter(FighterId::Enemy).health(), 100);
        assert_eq!(duel.subscription_count(), 1);
    }

    #[test]
    fn test_restart_cancels_running_drain() {
        let mut duel = new_duel();
        let mut canvas = RecordingCanvas::new(1024, 576);

        press(&mut duel, KeyCode::Enter);
        press(&mut duel, KeyCode::Digit4);
        run_until(&mut duel, &mut canvas, |duel| {
            duel.fighter(FighterId::Enemy).is_draining()
        });
        assert_eq!(duel.pending_timers(), 1);

        duel.restart();
        assert_eq!(duel.pending_timers(), 0);
        for _ in 0..10 {
            duel.tick(Duration::from_millis(20), &mut canvas);
        }
        assert_eq!(duel.fighter(FighterId::Enemy).health(), 100);
    }

    #[test]
    fn test_fight_menu_greys_out_during_attack() {
        let mut duel = new_duel();
        let mut canvas = RecordingCanvas::new(1024, 576);

        press(&mut duel, KeyCode::Enter);
        duel.tick(FIXED_TIMESTEP_DURATION, &mut canvas);
        assert!(canvas.texts().contains(&"1 Slash".to_string()));

        press(&mut duel, KeyCode::Digit1);
        assert!(!duel.is_ready());
    }
}
