pub mod animation;
pub mod audio;
pub mod combat;
pub mod components;
pub mod enemy;
pub mod hud;
pub mod input;
pub mod player;
pub mod render;
pub mod spawn;
pub mod stage;
