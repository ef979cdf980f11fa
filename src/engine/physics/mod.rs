// Arena physics: per-tick velocity integration, vertical gravity,
// side walls and axis-aligned overlap tests

pub mod body;
pub mod collision;
mod debug;
mod world;

pub use body::Body;
pub use collision::overlaps;
pub use debug::DebugRenderer;
pub use world::PhysicsWorld;
