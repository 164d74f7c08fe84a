#[path = "../common/mod.rs"]
mod common;

mod casts;
mod config;
mod content;
mod correlation;
mod identity;
mod markers;
mod missiles;
