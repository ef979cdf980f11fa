// The running game, whichever variant was selected at startup

use std::time::Duration;

use log::info;
use winit::keyboard::KeyCode;

use crate::engine::renderer::Canvas;
use crate::game::arena::{Match, TickStatus};
use crate::game::config::{GameMode, GameSettings};
use crate::game::duel::Duel;
use crate::game::roster::Roster;

pub enum Session {
    Arena(Match),
    Duel(Duel),
}

impl Session {
    pub fn new(settings: &GameSettings, roster: Roster) -> Self {
        info!("Starting {:?} session", settings.mode);
        match settings.mode {
            GameMode::Arena => {
                Session::Arena(Match::new(settings.arena.clone(), roster, settings.debug))
            }
            GameMode::Duel => Session::Duel(Duel::new(settings.arena.clone(), roster)),
        }
    }

    pub fn tick(&mut self, dt: Duration, canvas: &mut dyn Canvas) -> TickStatus {
        match self {
            Session::Arena(game) => game.tick(dt, canvas),
            Session::Duel(duel) => duel.tick(dt, canvas),
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        match self {
            Session::Arena(game) => game.handle_key(code, pressed),
            Session::Duel(duel) => duel.handle_key(code, pressed),
        }
    }

    pub fn subscription_count(&self) -> usize {
        match self {
            Session::Arena(game) => game.subscription_count(),
            Session::Duel(duel) => duel.subscription_count(),
        }
    }

    pub fn mode(&self) -> GameMode {
        match self {
            Session::Arena(_) => GameMode::Arena,
            Session::Duel(_) => GameMode::Duel,
        }
    }
}
