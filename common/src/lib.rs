pub mod collision;
pub mod config;
pub mod constants;
pub mod cutscene;
pub mod gallery;
pub mod input;
pub mod interaction;
pub mod lightning;
pub mod motion;
pub mod proximity;
pub mod sequence;
