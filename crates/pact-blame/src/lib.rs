//! PACT Blame - failure taxonomy and blame resolution (C4, §4.4).

mod judgment;

pub use judgment::{resolve, Determination, Judgment, JudgmentStatus, RequiredNextActor};
