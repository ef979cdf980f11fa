// Physics match: two keyboard-driven fighters, a round timer and the
// game-over flow
//
// Every tick runs to completion: scheduled events first, then hit
// detection, walls and facing, then both fighters update and the HUD is
// drawn on top. Knockouts end the round after a delay so the death
// animation plays out; the timer running out ends it at once.

use std::time::Duration;

use log::{debug, info};
use winit::keyboard::KeyCode;

use crate::engine::input::{InputRouter, InputSource, Routed, SubscriptionId, UiAction};
use crate::engine::physics::{overlaps, DebugRenderer, PhysicsWorld};
use crate::engine::renderer::{Canvas, Color};
use crate::engine::scheduler::Scheduler;
use crate::game::characters::{Facing, Fighter, FighterConfig, FighterId};
use crate::game::config::ArenaConfig;
use crate::game::hud::Hud;
use crate::game::roster::Roster;
use crate::game::sprite::Sprite;

/// Delayed work of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    /// One timer unit elapsed
    TimerTick,
    /// Knockout delay elapsed
    EndGame,
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    PlayerWins,
    EnemyWins,
    Draw,
}

impl MatchOutcome {
    /// Title of the game-over modal
    pub fn message(&self) -> &'static str {
        match self {
            MatchOutcome::PlayerWins => "Game over, you win!",
            MatchOutcome::EnemyWins => "Game over, you lose!",
            MatchOutcome::Draw => "Draw, time is up!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running,
    /// A fighter is down; the game-over modal is scheduled
    Finishing(MatchOutcome),
    Over(MatchOutcome),
}

/// Result of a tick, for the host loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    Over,
}

pub struct Match {
    arena: ArenaConfig,
    world: PhysicsWorld,
    roster: Roster,
    fighters: [Fighter; 2],
    background: Sprite,
    hud: Hud,
    scheduler: Scheduler<MatchEvent>,
    router: InputRouter,
    subscriptions: [Option<SubscriptionId>; 2],
    timer: u32,
    phase: Phase,
    debug: DebugRenderer,
}

impl Match {
    pub fn new(arena: ArenaConfig, roster: Roster, debug: bool) -> Self {
        let gravity = FighterConfig::player().physics.gravity;
        let world = PhysicsWorld::new(arena.width_f32(), arena.ground_y(), gravity);

        let mut game = Self {
            world,
            fighters: Self::spawn(&roster),
            background: roster.background_sprite(),
            hud: Hud::new(arena.health_tween),
            scheduler: Scheduler::new(),
            router: InputRouter::new(),
            subscriptions: [None; 2],
            timer: arena.round_seconds,
            phase: Phase::Running,
            debug: DebugRenderer::new(debug),
            arena,
            roster,
        };
        game.start();
        game
    }

    fn spawn(roster: &Roster) -> [Fighter; 2] {
        [
            Fighter::new(
                FighterId::Player,
                FighterConfig::player(),
                roster.player.clone(),
            ),
            Fighter::new(FighterId::Enemy, FighterConfig::enemy(), roster.enemy.clone()),
        ]
    }

    /// Fresh fighters, full timer, new subscriptions
    pub fn start(&mut self) {
        self.scheduler.cancel_all();
        self.router.release_all();

        self.fighters = Self::spawn(&self.roster);
        self.timer = self.arena.round_seconds;
        self.hud.reset();
        self.phase = Phase::Running;

        for fighter in &self.fighters {
            let id = fighter.id();
            self.subscriptions[id.index()] = Some(
                self.router
                    .subscribe_fighter(id.index(), &fighter.config().key_bindings),
            );
        }
        self.router.subscribe_ui();
        self.scheduler
            .schedule(self.arena.timer_step, MatchEvent::TimerTick);

        info!("Round started: {} timer units", self.timer);
    }

    /// Play again after the game-over modal
    pub fn restart(&mut self) {
        info!("Restarting match");
        self.start();
    }

    pub fn fighter(&self, id: FighterId) -> &Fighter {
        &self.fighters[id.index()]
    }

    pub fn fighter_mut(&mut self, id: FighterId) -> &mut Fighter {
        &mut self.fighters[id.index()]
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over(_))
    }

    /// Outcome once decided, including while the knockout delay runs
    pub fn outcome(&self) -> Option<MatchOutcome> {
        match self.phase {
            Phase::Running => None,
            Phase::Finishing(outcome) | Phase::Over(outcome) => Some(outcome),
        }
    }

    pub fn subscription_count(&self) -> usize {
        self.router.subscription_count()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Route a key event to the subscribed fighters and the UI scope
    pub fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        for routed in self.router.route(InputSource::key(code)) {
            match routed {
                Routed::Fighter { index, action } => {
                    if let Some(fighter) = self.fighters.get_mut(index) {
                        fighter.handle_action(action, pressed);
                    }
                }
                Routed::Ui(action) if pressed => self.handle_ui(action),
                Routed::Ui(_) => {}
            }
        }
    }

    fn handle_ui(&mut self, action: UiAction) {
        match action {
            UiAction::Confirm => {
                if self.is_over() {
                    self.restart();
                }
            }
            UiAction::ToggleDebug => self.debug.toggle(),
            UiAction::Back | UiAction::AttackButton(_) => {}
        }
    }

    /// Run one tick of `dt` and draw it
    pub fn tick(&mut self, dt: Duration, canvas: &mut dyn Canvas) -> TickStatus {
        self.scheduler.advance(dt);
        while let Some(fired) = self.scheduler.pop_due() {
            match fired.event {
                MatchEvent::TimerTick => self.on_timer_tick(fired.due),
                MatchEvent::EndGame => {
                    if let Phase::Finishing(outcome) = self.phase {
                        self.end_game(outcome);
                    }
                }
            }
        }

        self.hud.update(dt);

        if self.is_over() {
            self.draw_frozen(canvas);
            return TickStatus::Over;
        }

        for fighter in &mut self.fighters {
            fighter.apply_intent(&self.world);
        }

        canvas.clear(Color::BLACK);
        self.background.draw(canvas);

        self.detect_hits();
        for fighter in &mut self.fighters {
            // Missed swing: the connecting frame passed without contact
            if fighter.can_land_hit() {
                fighter.end_attack();
            }
            self.world.stop_at_walls(fighter.body_mut());
        }
        self.face_each_other();

        let bounds = canvas.bounds();
        canvas.fill_rect(bounds, self.arena.overlay);

        for fighter in &mut self.fighters {
            fighter.update(canvas, Some(&self.world));
        }
        for fighter in &self.fighters {
            self.debug.draw(canvas, fighter.bounds(), fighter.attack_box());
        }
        self.draw_hud(canvas);

        self.check_round_end();

        if self.is_over() {
            TickStatus::Over
        } else {
            TickStatus::Running
        }
    }

    fn on_timer_tick(&mut self, due: Duration) {
        if self.fighters.iter().any(Fighter::is_dying) {
            return;
        }
        self.timer = self.timer.saturating_sub(1);
        if self.timer > 0 {
            self.scheduler
                .schedule_at(due + self.arena.timer_step, MatchEvent::TimerTick);
        }
    }

    fn detect_hits(&mut self) {
        let [player, enemy] = &mut self.fighters;
        Self::resolve_attack(player, enemy, &mut self.hud);
        Self::resolve_attack(enemy, player, &mut self.hud);
    }

    /// Land `attacker`'s swing on `defender` when it is on its connecting
    /// frame and the attack box touches the defender
    fn resolve_attack(attacker: &mut Fighter, defender: &mut Fighter, hud: &mut Hud) -> bool {
        if !attacker.can_land_hit() || !overlaps(&attacker.attack_box(), &defender.bounds()) {
            return false;
        }

        attacker.end_attack();
        let before = defender.health_percent();
        defender.take_hit(attacker.damage());
        hud.bar_mut(defender.id())
            .transition(before, defender.health_percent());

        debug!(
            "{} hits {} for {}, health {}",
            attacker.name(),
            defender.name(),
            attacker.damage(),
            defender.health()
        );
        true
    }

    fn face_each_other(&mut self) {
        let [player, enemy] = &mut self.fighters;
        let (player_facing, enemy_facing) = if player.position().x < enemy.position().x {
            (Facing::Right, Facing::Left)
        } else {
            (Facing::Left, Facing::Right)
        };
        player.set_facing(player_facing);
        enemy.set_facing(enemy_facing);
    }

    fn check_round_end(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        let knockout = if self.fighter(FighterId::Player).is_dying() {
            Some((FighterId::Player, MatchOutcome::EnemyWins))
        } else if self.fighter(FighterId::Enemy).is_dying() {
            Some((FighterId::Enemy, MatchOutcome::PlayerWins))
        } else {
            None
        };

        if let Some((loser, outcome)) = knockout {
            info!("{} is down", self.fighter(loser).name());
            if let Some(id) = self.subscriptions[loser.index()].take() {
                self.router.unsubscribe(id);
            }
            self.fighter_mut(loser).release_input();
            self.scheduler
                .schedule(self.arena.game_over_delay, MatchEvent::EndGame);
            self.phase = Phase::Finishing(outcome);
        } else if self.timer == 0 {
            self.end_game(MatchOutcome::Draw);
        }
    }

    /// Stop timers, drop every input subscription and show the modal. Only
    /// the UI scope is subscribed again so the modal can be confirmed.
    fn end_game(&mut self, outcome: MatchOutcome) {
        self.scheduler.cancel_all();
        self.router.release_all();
        self.subscriptions = [None; 2];
        for fighter in &mut self.fighters {
            fighter.release_input();
        }

        self.hud.modal_mut().open(outcome.message());
        self.router.subscribe_ui();
        self.phase = Phase::Over(outcome);

        info!("Game over: {}", outcome.message());
    }

    fn draw_hud(&self, canvas: &mut dyn Canvas) {
        self.hud.draw_bars(canvas);
        self.hud.draw_timer(canvas, self.timer);
        self.hud.draw_modal(canvas);
    }

    /// The last scene without any movement, under the modal
    fn draw_frozen(&mut self, canvas: &mut dyn Canvas) {
        canvas.clear(Color::BLACK);
        self.background.draw(canvas);
        let bounds = canvas.bounds();
        canvas.fill_rect(bounds, self.arena.overlay);
        for fighter in &mut self.fighters {
            fighter.draw(canvas);
        }
        self.draw_hud(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::canvas::testing::RecordingCanvas;
    use crate::game::characters::AnimationState;
    use crate::game::config::BASE_ARENA;
    use approx::assert_relative_eq;
    use glam::Vec2;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn new_match() -> Match {
        Match::new(BASE_ARENA, Roster::blank(), false)
    }

    fn canvas() -> RecordingCanvas {
        RecordingCanvas::new(1024, 576)
    }

    /// Both fighters on the ground, `gap` pixels between the player's
    /// attack box and the enemy
    fn face_off(game: &mut Match, gap: f32) {
        let ground = BASE_ARENA.ground_y() - 150.0;
        game.fighter_mut(FighterId::Player)
            .set_position(Vec2::new(300.0, ground));
        game.fighter_mut(FighterId::Enemy)
            .set_position(Vec2::new(520.0 + gap, ground));
    }

    fn swing(game: &mut Match) {
        let mut canvas = canvas();
        game.handle_key(KeyCode::Space, true);
        game.handle_key(KeyCode::Space, false);
        for _ in 0..40 {
            game.tick(FRAME, &mut canvas);
        }
    }

    #[test]
    fn test_start_subscribes_both_fighters_and_ui() {
        let game = new_match();
        assert_eq!(game.subscription_count(), 3);
        assert_eq!(game.timer(), 60);
        assert_eq!(game.pending_timers(), 1);
        assert!(!game.hud().modal().is_open());
    }

    #[test]
    fn test_touching_attack_box_connects() {
        let mut game = new_match();
        face_off(&mut game, 0.0);
        swing(&mut game);

        assert_eq!(game.fighter(FighterId::Enemy).health(), 80);
        assert_eq!(game.fighter(FighterId::Enemy).state(), AnimationState::TakeHit);
        assert!(!game.fighter(FighterId::Player).is_attacking());
        assert_relative_eq!(game.hud().bar(FighterId::Enemy).target(), 80.0);
    }

    #[test]
    fn test_one_pixel_gap_misses() {
        let mut game = new_match();
        face_off(&mut game, 1.0);
        swing(&mut game);

        assert_eq!(game.fighter(FighterId::Enemy).health(), 100);
        assert!(!game.fighter(FighterId::Player).is_attacking());
        assert_relative_eq!(game.hud().bar(FighterId::Enemy).percent(), 100.0);
    }

    #[test]
    fn test_wall_stops_fighter() {
        let mut game = new_match();
        let ground = BASE_ARENA.ground_y() - 150.0;
        game.fighter_mut(FighterId::Player)
            .set_position(Vec2::new(0.0, ground));
        game.handle_key(KeyCode::KeyA, true);

        let mut canvas = canvas();
        for _ in 0..10 {
            game.tick(FRAME, &mut canvas);
        }
        assert_relative_eq!(game.fighter(FighterId::Player).position().x, 0.0);
        assert_relative_eq!(game.fighter(FighterId::Player).body().velocity.x, 0.0);

        game.handle_key(KeyCode::KeyA, false);
        game.handle_key(KeyCode::KeyD, true);
        game.tick(FRAME, &mut canvas);
        assert_relative_eq!(game.fighter(FighterId::Player).position().x, 5.0);
    }

    #[test]
    fn test_fighters_turn_when_crossing() {
        let mut game = new_match();
        let ground = BASE_ARENA.ground_y() - 150.0;
        game.fighter_mut(FighterId::Player)
            .set_position(Vec2::new(800.0, ground));
        game.fighter_mut(FighterId::Enemy)
            .set_position(Vec2::new(200.0, ground));

        game.tick(FRAME, &mut canvas());
        assert_eq!(game.fighter(FighterId::Player).facing(), Facing::Left);
        assert!(game.fighter(FighterId::Player).is_flipped());
        assert_eq!(game.fighter(FighterId::Enemy).facing(), Facing::Right);
    }

    #[test]
    fn test_timer_runs_out_as_draw() {
        let mut game = new_match();
        let mut canvas = canvas();

        for _ in 0..59 {
            assert_eq!(game.tick(Duration::from_secs(1), &mut canvas), TickStatus::Running);
        }
        assert_eq!(game.timer(), 1);

        assert_eq!(game.tick(Duration::from_secs(1), &mut canvas), TickStatus::Over);
        assert_eq!(game.timer(), 0);
        assert_eq!(game.outcome(), Some(MatchOutcome::Draw));
        assert_eq!(game.hud().modal().title(), "Draw, time is up!");
        assert_eq!(game.pending_timers(), 0);
    }

    #[test]
    fn test_player_knockout_loses() {
        let mut game = new_match();
        let mut canvas = canvas();
        game.fighter_mut(FighterId::Enemy).take_hit(50);
        game.fighter_mut(FighterId::Player).take_hit(100);

        game.tick(FRAME, &mut canvas);
        assert_eq!(game.outcome(), Some(MatchOutcome::EnemyWins));
        assert!(!game.is_over());
        assert_eq!(game.subscription_count(), 2);

        game.tick(Duration::from_secs(3), &mut canvas);
        assert!(game.is_over());
        assert_eq!(game.hud().modal().title(), "Game over, you lose!");
        assert_eq!(game.subscription_count(), 1);
    }

    #[test]
    fn test_enemy_knockout_wins() {
        let mut game = new_match();
        let mut canvas = canvas();
        game.fighter_mut(FighterId::Player).take_hit(50);
        game.fighter_mut(FighterId::Enemy).take_hit(100);

        game.tick(FRAME, &mut canvas);
        game.tick(Duration::from_secs(3), &mut canvas);
        assert_eq!(game.outcome(), Some(MatchOutcome::PlayerWins));
        assert_eq!(game.hud().modal().title(), "Game over, you win!");
    }

    #[test]
    fn test_timer_freezes_after_knockout() {
        let mut game = new_match();
        let mut canvas = canvas();
        game.fighter_mut(FighterId::Enemy).take_hit(100);

        game.tick(FRAME, &mut canvas);
        game.tick(Duration::from_secs(1), &mut canvas);
        assert_eq!(game.timer(), 60);
    }

    #[test]
    fn test_restart_does_not_duplicate_subscriptions() {
        let mut game = new_match();
        let mut canvas = canvas();

        for _ in 0..3 {
            assert_eq!(game.subscription_count(), 3);
            game.fighter_mut(FighterId::Player).take_hit(100);
            game.tick(FRAME, &mut canvas);
            assert_eq!(game.subscription_count(), 2);
            game.tick(Duration::from_secs(3), &mut canvas);
            assert_eq!(game.subscription_count(), 1);

            game.handle_key(KeyCode::Enter, true);
            assert!(!game.is_over());
        }

        assert_eq!(game.subscription_count(), 3);
        assert_eq!(game.timer(), 60);
        assert_eq!(game.fighter(FighterId::Player).health(), 100);
        assert_eq!(game.router.route(InputSource::key(KeyCode::Space)).len(), 1);
    }

    #[test]
    fn test_enter_ignored_while_running() {
        let mut game = new_match();
        game.fighter_mut(FighterId::Enemy).take_hit(20);
        game.handle_key(KeyCode::Enter, true);
        assert_eq!(game.fighter(FighterId::Enemy).health(), 80);
    }

    #[test]
    fn test_over_phase_keeps_modal_on_screen() {
        let mut game = new_match();
        let mut canvas = canvas();
        game.end_game(MatchOutcome::Draw);

        canvas.clear_calls();
        assert_eq!(game.tick(FRAME, &mut canvas), TickStatus::Over);
        assert!(canvas.texts().contains(&"Draw, time is up!".to_string()));
    }
}
