// Fighter animation state machine

/// The animation a fighter is playing. A fighter is always in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Attack,
    TakeHit,
    Die,
}

impl AnimationState {
    pub const ALL: [AnimationState; 4] = [
        AnimationState::Idle,
        AnimationState::Attack,
        AnimationState::TakeHit,
        AnimationState::Die,
    ];

    /// Get the animation name for this state
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Attack => "attack",
            Self::TakeHit => "takeHit",
            Self::Die => "die",
        }
    }

    /// Check if the state is a one-shot that plays to its last frame
    pub fn is_one_shot(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// How a state may be left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    pub state: AnimationState,
    /// Frame the animation starts from when entered
    pub entry_frame: usize,
    /// Whether any request may leave the state before its last frame
    pub interruptible: bool,
    /// Requests that leave the state early even when it is locked
    pub preempted_by: &'static [AnimationState],
    /// Nothing leaves a terminal state
    pub terminal: bool,
}

const RULES: [TransitionRule; 4] = [
    TransitionRule {
        state: AnimationState::Idle,
        entry_frame: 0,
        interruptible: true,
        preempted_by: &[],
        terminal: false,
    },
    TransitionRule {
        state: AnimationState::Attack,
        entry_frame: 0,
        interruptible: false,
        preempted_by: &[AnimationState::TakeHit, AnimationState::Die],
        terminal: false,
    },
    TransitionRule {
        state: AnimationState::TakeHit,
        entry_frame: 0,
        interruptible: false,
        preempted_by: &[AnimationState::TakeHit, AnimationState::Die],
        terminal: false,
    },
    TransitionRule {
        state: AnimationState::Die,
        entry_frame: 0,
        interruptible: false,
        preempted_by: &[],
        terminal: true,
    },
];

/// Get the transition rule of a state
pub fn rule(state: AnimationState) -> &'static TransitionRule {
    match state {
        AnimationState::Idle => &RULES[0],
        AnimationState::Attack => &RULES[1],
        AnimationState::TakeHit => &RULES[2],
        AnimationState::Die => &RULES[3],
    }
}

/// Result of asking the state machine for a state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The state was (re)entered; its animation starts at `entry_frame`
    Entered {
        state: AnimationState,
        entry_frame: usize,
    },
    /// Already in the requested state, nothing to do
    Unchanged,
    /// The current state may not be left yet
    Blocked,
}

/// State machine over the four fighter animations
#[derive(Debug, Default)]
pub struct FighterStateMachine {
    current_state: AnimationState,
    previous_state: AnimationState,
}

impl FighterStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AnimationState {
        self.current_state
    }

    pub fn previous_state(&self) -> AnimationState {
        self.previous_state
    }

    /// Whether the current state is the terminal one
    #[cfg(test)]
    pub fn is_terminal(&self) -> bool {
        rule(self.current_state).terminal
    }

    /// Request `target` while the current animation shows `frame` of
    /// `frames`. Locked one-shots only give way on their last frame unless
    /// the target preempts them; a one-shot requested again on its last
    /// frame (or preempting itself) restarts.
    pub fn request(&mut self, target: AnimationState, frame: usize, frames: usize) -> Transition {
        let current = rule(self.current_state);
        if current.terminal {
            return if target == self.current_state {
                Transition::Unchanged
            } else {
                Transition::Blocked
            };
        }

        let finished = frame + 1 >= frames;
        let preempts = current.preempted_by.contains(&target);

        if !current.interruptible && !finished && !preempts {
            return Transition::Blocked;
        }

        if target == self.current_state && !target.is_one_shot() {
            return Transition::Unchanged;
        }

        self.previous_state = self.current_state;
        self.current_state = target;
        Transition::Entered {
            state: target,
            entry_frame: rule(target).entry_frame,
        }
    }
}
