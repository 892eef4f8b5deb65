mod machine;
mod state;

pub use machine::{Effect, InteractionMachine};
pub use state::{InteractionCommand, InteractionState, Overlay, OverlaySlot, ScriptedClip, transition};
