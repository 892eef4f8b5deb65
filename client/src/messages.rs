use bevy::prelude::*;

use room_common::interaction::{Effect, ScriptedClip};

// ============================================================================
// Client Messages
// ============================================================================

// Raised by the cutscene player exactly once per finished clip
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipFinished(pub ScriptedClip);

// Side effect requested by the interaction machine or a one-shot sequence
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct InteractionEffect(pub Effect);
