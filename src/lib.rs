pub mod config;
pub mod events;
pub mod gesture;
pub mod life;
pub mod patterns;
pub mod rule_set;
pub mod session;
pub mod vec2;
pub mod viewport;
pub mod world;

pub type WorldOffset = i128;
