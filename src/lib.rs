pub mod boss;
pub mod bullet;
pub mod collision;
pub mod compute;
pub mod config;
pub mod context;
pub mod effect;
pub mod entities;
pub mod error;
pub mod input;
pub mod obstacle;
pub mod player;
pub mod power_up;
pub mod render;
