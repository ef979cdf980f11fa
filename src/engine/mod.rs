// Engine modules: rendering, physics, input, assets, timing

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
pub mod scheduler;
