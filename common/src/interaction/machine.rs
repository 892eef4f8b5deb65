use bevy_ecs::prelude::*;
use bevy_log::{debug, warn};

use super::state::{InteractionCommand, InteractionState, Overlay, ScriptedClip, transition};
use crate::{gallery::PortfolioGallery, input::Key};

// ============================================================================
// Effects
// ============================================================================

/// Side effects for the presentation layer, applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SetMovementEnabled(bool),
    // Show the cutscene surface and play the clip from its first frame. Hides the overlay.
    PlayClip(ScriptedClip),
    // Pause the cutscene surface on the clip's last frame
    Freeze(ScriptedClip),
    HideVideo,
    ClearOverlay,
    ShowOverlay(Overlay),
    ShowGallery { image: String },
    HideGallery,
    OpenLink(String),
}

// What happens when the outstanding clip finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    AfterSit,
    FreezeChoice,
    FreezeResume,
    OpenGallery,
    ReturnToChoice,
    LeaveInteraction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingClip {
    clip: ScriptedClip,
    then: Continuation,
}

// ============================================================================
// Interaction Machine
// ============================================================================

/// Drives the sit / choose / resume / portfolio sequence. The cutscene surface,
/// the overlay and the gallery cursor are only changed through the effects
/// returned from its methods.
///
/// At most one clip is outstanding. While it plays, key commands are refused;
/// only the matching completion moves the sequence on.
#[derive(Resource, Debug, Clone)]
pub struct InteractionMachine {
    state: InteractionState,
    pending: Option<PendingClip>,
    skip_choice_clip: bool,
    gallery: PortfolioGallery,
}

impl InteractionMachine {
    #[must_use]
    pub const fn new(gallery: PortfolioGallery) -> Self {
        Self {
            state: InteractionState::Idle,
            pending: None,
            skip_choice_clip: false,
            gallery,
        }
    }

    #[must_use]
    pub const fn state(&self) -> InteractionState {
        self.state
    }

    #[must_use]
    pub const fn in_interaction(&self) -> bool {
        !matches!(self.state, InteractionState::Idle)
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn outstanding_clip(&self) -> Option<ScriptedClip> {
        self.pending.map(|pending| pending.clip)
    }

    #[must_use]
    pub const fn skip_choice_clip(&self) -> bool {
        self.skip_choice_clip
    }

    #[must_use]
    pub const fn gallery(&self) -> &PortfolioGallery {
        &self.gallery
    }

    // Start the sequence for the requested state. Only the transitions in the
    // table are honored; anything else yields no effects.
    pub fn enter_state(&mut self, target: InteractionState) -> Vec<Effect> {
        let command = match target {
            InteractionState::Sitting => InteractionCommand::Sit,
            InteractionState::Resume => InteractionCommand::SelectResume,
            InteractionState::Portfolio => InteractionCommand::SelectPortfolio,
            InteractionState::Idle => InteractionCommand::Stand,
            InteractionState::Choice => match self.state {
                InteractionState::Resume => InteractionCommand::PutDown,
                _ => InteractionCommand::LeavePortfolio,
            },
        };
        self.handle(command)
    }

    pub fn on_key(&mut self, key: Key) -> Vec<Effect> {
        InteractionCommand::from_key(self.state, key).map_or_else(Vec::new, |command| self.handle(command))
    }

    pub fn handle(&mut self, command: InteractionCommand) -> Vec<Effect> {
        if let Some(pending) = self.pending {
            debug!("ignoring {command:?} while {:?} is playing", pending.clip);
            return Vec::new();
        }
        let Some(next) = transition(self.state, command) else {
            debug!("no transition for {command:?} in {:?}", self.state);
            return Vec::new();
        };

        let mut effects = Vec::new();
        match command {
            InteractionCommand::Sit => {
                self.skip_choice_clip = false;
                effects.push(Effect::ClearOverlay);
                effects.push(Effect::SetMovementEnabled(false));
                self.play(&mut effects, ScriptedClip::Sit, Continuation::AfterSit);
            }
            InteractionCommand::SelectResume => {
                effects.push(Effect::ClearOverlay);
                self.play(&mut effects, ScriptedClip::PickupResume, Continuation::FreezeResume);
            }
            InteractionCommand::SelectPortfolio => {
                effects.push(Effect::ClearOverlay);
                self.play(&mut effects, ScriptedClip::ViewPortfolio, Continuation::OpenGallery);
            }
            InteractionCommand::Stand => {
                effects.push(Effect::ClearOverlay);
                self.play(&mut effects, ScriptedClip::StandUp, Continuation::LeaveInteraction);
                // Still seated until the clip is over
                debug!("standing up, {:?} after clip", next);
                return effects;
            }
            InteractionCommand::PutDown => {
                self.skip_choice_clip = true;
                effects.push(Effect::ClearOverlay);
                self.play(&mut effects, ScriptedClip::ResumeDown, Continuation::ReturnToChoice);
            }
            InteractionCommand::Previous => {
                self.gallery.show_previous();
                effects.push(self.gallery_image());
            }
            InteractionCommand::Next => {
                self.gallery.show_next();
                effects.push(self.gallery_image());
            }
            InteractionCommand::OpenLink => {
                effects.push(Effect::OpenLink(self.gallery.current().link.clone()));
            }
            InteractionCommand::LeavePortfolio => {
                effects.push(Effect::ClearOverlay);
                effects.push(Effect::HideGallery);
                self.play(&mut effects, ScriptedClip::AwayPortfolio, Continuation::ReturnToChoice);
            }
        }

        if next != self.state {
            debug!("interaction {:?} -> {next:?}", self.state);
        }
        self.state = next;
        effects
    }

    // Called by the cutscene player. Completions that do not match the
    // outstanding clip are stale and dropped.
    pub fn on_clip_finished(&mut self, clip: ScriptedClip) -> Vec<Effect> {
        let Some(pending) = self.pending else {
            debug!("clip {clip:?} finished with nothing outstanding");
            return Vec::new();
        };
        if pending.clip != clip {
            warn!("clip {clip:?} finished but {:?} is outstanding", pending.clip);
            return Vec::new();
        }
        self.pending = None;

        let mut effects = Vec::new();
        match pending.then {
            Continuation::AfterSit => {
                self.state = InteractionState::Choice;
                if self.skip_choice_clip {
                    self.freeze_choice(&mut effects);
                } else {
                    self.play(&mut effects, ScriptedClip::Choice, Continuation::FreezeChoice);
                }
            }
            Continuation::FreezeChoice | Continuation::ReturnToChoice => self.freeze_choice(&mut effects),
            Continuation::FreezeResume => {
                effects.push(Effect::ClearOverlay);
                effects.push(Effect::Freeze(ScriptedClip::PickupResume));
                effects.push(Effect::ShowOverlay(Overlay::Resume));
            }
            Continuation::OpenGallery => {
                self.gallery.reset();
                effects.push(self.gallery_image());
                effects.push(Effect::ClearOverlay);
                effects.push(Effect::Freeze(ScriptedClip::ViewPortfolio));
                effects.push(Effect::ShowOverlay(Overlay::Portfolio));
            }
            Continuation::LeaveInteraction => {
                effects.push(Effect::ClearOverlay);
                effects.push(Effect::HideVideo);
                effects.push(Effect::SetMovementEnabled(true));
                self.state = InteractionState::Idle;
                debug!("interaction finished");
            }
        }
        effects
    }

    fn play(&mut self, effects: &mut Vec<Effect>, clip: ScriptedClip, then: Continuation) {
        self.pending = Some(PendingClip { clip, then });
        effects.push(Effect::PlayClip(clip));
    }

    // Held on the last frame of the choice clip with the three prompts
    fn freeze_choice(&mut self, effects: &mut Vec<Effect>) {
        self.state = InteractionState::Choice;
        effects.push(Effect::ClearOverlay);
        effects.push(Effect::Freeze(ScriptedClip::Choice));
        effects.push(Effect::ShowOverlay(Overlay::Choice));
    }

    fn gallery_image(&self) -> Effect {
        Effect::ShowGallery {
            image: self.gallery.current().image.clone(),
        }
    }
}
