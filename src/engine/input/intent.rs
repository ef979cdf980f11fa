// Held-key state of one fighter

use super::action::FighterAction;

/// Which movement keys a fighter currently holds. Written by key events
/// between ticks, read once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FighterIntent {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl FighterIntent {
    /// Record a key-down (`pressed`) or key-up of a held action. Returns
    /// false for actions that are not held.
    pub fn set(&mut self, action: FighterAction, pressed: bool) -> bool {
        match action {
            FighterAction::MoveLeft => self.left = pressed,
            FighterAction::MoveRight => self.right = pressed,
            FighterAction::Jump => self.jump = pressed,
            FighterAction::Attack => return false,
        }
        true
    }

    /// Horizontal direction in -1.0..=1.0; opposing keys cancel out
    pub fn horizontal(&self) -> f32 {
        let mut horizontal = 0.0;
        if self.left {
            horizontal -= 1.0;
        }
        if self.right {
            horizontal += 1.0;
        }
        horizontal
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_toggle() {
        let mut intent = FighterIntent::default();
        assert!(intent.set(FighterAction::MoveLeft, true));
        assert_eq!(intent.horizontal(), -1.0);

        intent.set(FighterAction::MoveLeft, false);
        assert_eq!(intent.horizontal(), 0.0);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut intent = FighterIntent::default();
        intent.set(FighterAction::MoveLeft, true);
        intent.set(FighterAction::MoveRight, true);
        assert_eq!(intent.horizontal(), 0.0);
    }

    #[test]
    fn test_attack_is_not_held_state() {
        let mut intent = FighterIntent::default();
        assert!(!intent.set(FighterAction::Attack, true));
        assert_eq!(intent, FighterIntent::default());
    }

    #[test]
    fn test_reset_releases_everything() {
        let mut intent = FighterIntent::default();
        intent.set(FighterAction::Jump, true);
        intent.set(FighterAction::MoveRight, true);
        intent.reset();
        assert_eq!(intent, FighterIntent::default());
    }
}
