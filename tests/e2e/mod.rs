pub mod export;
pub mod fullscreen;
pub mod viewer;
