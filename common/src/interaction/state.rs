use crate::input::Key;

// ============================================================================
// Interaction State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Sitting,
    Choice,
    Resume,
    Portfolio,
}

// ============================================================================
// Scripted Clips
// ============================================================================

/// Full-screen clips. Each one is a directory of numbered frames named after
/// `asset_name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptedClip {
    Sit,
    Choice,
    PickupResume,
    ResumeDown,
    ViewPortfolio,
    AwayPortfolio,
    StandUp,
    Exit,
    Intro,
}

impl ScriptedClip {
    #[cfg(test)]
    pub const ALL: [Self; 9] = [
        Self::Sit,
        Self::Choice,
        Self::PickupResume,
        Self::ResumeDown,
        Self::ViewPortfolio,
        Self::AwayPortfolio,
        Self::StandUp,
        Self::Exit,
        Self::Intro,
    ];

    #[must_use]
    pub const fn asset_name(self) -> &'static str {
        match self {
            Self::Sit => "sit",
            Self::Choice => "choice",
            Self::PickupResume => "pickupresume",
            Self::ResumeDown => "resumedown",
            Self::ViewPortfolio => "viewportfolio",
            Self::AwayPortfolio => "awayportfolio",
            Self::StandUp => "standup",
            Self::Exit => "exitvideo",
            Self::Intro => "preloader",
        }
    }

    // The different clip that can be asked for right after this one finishes
    #[must_use]
    pub const fn follow_up(self) -> Option<Self> {
        match self {
            Self::Sit | Self::ResumeDown | Self::AwayPortfolio => Some(Self::Choice),
            _ => None,
        }
    }
}

// ============================================================================
// Overlays
// ============================================================================

/// Prompt sets drawn over a freeze-frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Choice,
    Resume,
    Portfolio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlaySlot {
    BottomLeft,
    BottomCenter,
    BottomRight,
    TopCenter,
}

impl Overlay {
    // Prompt images and where they sit on screen
    #[must_use]
    pub const fn buttons(self) -> &'static [(&'static str, OverlaySlot)] {
        match self {
            Self::Choice => &[
                ("viewresume.png", OverlaySlot::BottomLeft),
                ("stand.png", OverlaySlot::BottomCenter),
                ("viewportfolio.png", OverlaySlot::BottomRight),
            ],
            Self::Resume => &[("putdownresume.png", OverlaySlot::BottomLeft)],
            Self::Portfolio => &[
                ("previous.png", OverlaySlot::BottomLeft),
                ("exitportfolio.png", OverlaySlot::BottomCenter),
                ("enter.png", OverlaySlot::TopCenter),
                ("next.png", OverlaySlot::BottomRight),
            ],
        }
    }
}

// ============================================================================
// Commands & Transition Table
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionCommand {
    Sit,
    SelectResume,
    SelectPortfolio,
    Stand,
    PutDown,
    Previous,
    Next,
    OpenLink,
    LeavePortfolio,
}

impl InteractionCommand {
    // The same physical key means different things depending on the state.
    // Sitting down is not key-mapped here, it also needs the sit zone.
    #[must_use]
    pub const fn from_key(state: InteractionState, key: Key) -> Option<Self> {
        match (state, key) {
            (InteractionState::Choice, Key::Q) => Some(Self::SelectResume),
            (InteractionState::Choice, Key::E) => Some(Self::SelectPortfolio),
            (InteractionState::Choice, Key::F) => Some(Self::Stand),
            (InteractionState::Resume, Key::Q) => Some(Self::PutDown),
            (InteractionState::Portfolio, Key::A) => Some(Self::Previous),
            (InteractionState::Portfolio, Key::D) => Some(Self::Next),
            (InteractionState::Portfolio, Key::C) => Some(Self::OpenLink),
            (InteractionState::Portfolio, Key::E) => Some(Self::LeavePortfolio),
            _ => None,
        }
    }
}

// State a command leads to once its clip (if any) has finished. `None` means
// the command is not valid in that state.
#[must_use]
pub const fn transition(state: InteractionState, command: InteractionCommand) -> Option<InteractionState> {
    use InteractionCommand as C;
    use InteractionState as S;

    match (state, command) {
        (S::Idle, C::Sit) => Some(S::Sitting),
        (S::Choice, C::SelectResume) => Some(S::Resume),
        (S::Choice, C::SelectPortfolio) => Some(S::Portfolio),
        (S::Choice, C::Stand) => Some(S::Idle),
        (S::Resume, C::PutDown) | (S::Portfolio, C::LeavePortfolio) => Some(S::Choice),
        (S::Portfolio, C::Previous | C::Next | C::OpenLink) => Some(S::Portfolio),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_context_sensitive() {
        assert_eq!(
            InteractionCommand::from_key(InteractionState::Choice, Key::E),
            Some(InteractionCommand::SelectPortfolio)
        );
        assert_eq!(
            InteractionCommand::from_key(InteractionState::Portfolio, Key::E),
            Some(InteractionCommand::LeavePortfolio)
        );
        assert_eq!(
            InteractionCommand::from_key(InteractionState::Resume, Key::Q),
            Some(InteractionCommand::PutDown)
        );
        assert_eq!(InteractionCommand::from_key(InteractionState::Idle, Key::F), None);
        assert_eq!(InteractionCommand::from_key(InteractionState::Sitting, Key::Q), None);
        assert_eq!(InteractionCommand::from_key(InteractionState::Resume, Key::E), None);
    }

    #[test]
    fn every_mapped_key_has_a_transition() {
        let states = [
            InteractionState::Idle,
            InteractionState::Sitting,
            InteractionState::Choice,
            InteractionState::Resume,
            InteractionState::Portfolio,
        ];
        for state in states {
            for key in Key::ALL {
                if let Some(command) = InteractionCommand::from_key(state, key) {
                    assert!(transition(state, command).is_some(), "{state:?} + {key:?}");
                }
            }
        }
    }

    #[test]
    fn sitting_only_from_idle() {
        assert_eq!(
            transition(InteractionState::Idle, InteractionCommand::Sit),
            Some(InteractionState::Sitting)
        );
        assert_eq!(transition(InteractionState::Choice, InteractionCommand::Sit), None);
    }

    #[test]
    fn clip_names_are_unique() {
        let mut names: Vec<_> = ScriptedClip::ALL.iter().map(|clip| clip.asset_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ScriptedClip::ALL.len());
    }
}
