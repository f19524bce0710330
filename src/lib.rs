//! Six Door Maze — a top-down maze crawl across six looping levels.
//!
//! The simulation is fixed-timestep and single-threaded: `app` drives one
//! tick at a time, `ecs::systems` runs every active monster's attack state
//! machine against the player, and `overlay` flattens the result into draw
//! primitives for whatever frontend is attached.

pub mod anim;
pub mod app;
pub mod body;
pub mod config;
pub mod ecs;
pub mod level;
pub mod overlay;
pub mod player;
pub mod projectile;
