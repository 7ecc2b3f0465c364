pub mod types;

pub use types::{
    is_eligible, journey_progress, validate_journey, JourneyProgress, ReferralJourneyStep, StepStatus,
    REFERRAL_STEP_COUNT,
};
