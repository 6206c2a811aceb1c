use crate::models::{ImpressionError, Result};

/// Where the one-time claim currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClaimPhase {
    #[default]
    Idle,
    Confirming,
    Submitting,
    Claimed,
}

impl ClaimPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimPhase::Idle => "idle",
            ClaimPhase::Confirming => "confirming",
            ClaimPhase::Submitting => "submitting",
            ClaimPhase::Claimed => "claimed",
        }
    }

    /// Idle -> Confirming. Re-initiating while confirming is harmless.
    pub fn initiate(&mut self) -> Result<()> {
        self.step("initiate", |phase| match phase {
            ClaimPhase::Idle | ClaimPhase::Confirming => Some(ClaimPhase::Confirming),
            _ => None,
        })
    }

    pub fn cancel(&mut self) -> Result<()> {
        self.step("cancel", |phase| match phase {
            ClaimPhase::Confirming => Some(ClaimPhase::Idle),
            _ => None,
        })
    }

    pub fn confirm(&mut self) -> Result<()> {
        self.step("confirm", |phase| match phase {
            ClaimPhase::Confirming => Some(ClaimPhase::Submitting),
            _ => None,
        })
    }

    pub fn complete(&mut self) -> Result<()> {
        self.step("complete", |phase| match phase {
            ClaimPhase::Submitting => Some(ClaimPhase::Claimed),
            _ => None,
        })
    }

    fn step(
        &mut self,
        action: &'static str,
        next: impl FnOnce(ClaimPhase) -> Option<ClaimPhase>,
    ) -> Result<()> {
        match next(*self) {
            Some(phase) => {
                *self = phase;
                Ok(())
            }
            None => Err(ImpressionError::InvalidTransition {
                action,
                phase: self.as_str(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut phase = ClaimPhase::default();
        phase.initiate().unwrap();
        assert_eq!(phase, ClaimPhase::Confirming);
        phase.confirm().unwrap();
        assert_eq!(phase, ClaimPhase::Submitting);
        phase.complete().unwrap();
        assert_eq!(phase, ClaimPhase::Claimed);
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut phase = ClaimPhase::Idle;
        phase.initiate().unwrap();
        phase.cancel().unwrap();
        assert_eq!(phase, ClaimPhase::Idle);
    }

    #[test]
    fn test_claimed_is_terminal() {
        let mut phase = ClaimPhase::Claimed;
        assert!(phase.initiate().is_err());
        assert!(phase.cancel().is_err());
        assert!(phase.confirm().is_err());
        assert!(phase.complete().is_err());
        assert_eq!(phase, ClaimPhase::Claimed);
    }

    #[test]
    fn test_cannot_skip_confirmation() {
        let mut phase = ClaimPhase::Idle;
        let err = phase.confirm().unwrap_err();
        assert_eq!(err.to_string(), "Invalid claim transition: cannot confirm while idle");
        assert_eq!(phase, ClaimPhase::Idle);
    }

    #[test]
    fn test_submitting_cannot_be_cancelled() {
        let mut phase = ClaimPhase::Submitting;
        assert!(phase.cancel().is_err());
        assert_eq!(phase, ClaimPhase::Submitting);
    }
}
