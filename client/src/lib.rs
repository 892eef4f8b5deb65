pub mod constants;
pub mod links;
pub mod markers;
pub mod messages;
pub mod resources;
pub mod systems;
