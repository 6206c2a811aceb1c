pub mod eligibility;
pub mod lifecycle;

pub use eligibility::{check_claim, ClaimRejection, ClaimWindow, EligibilityRules, WindowState};
pub use lifecycle::ClaimPhase;
