//! PACT Policy - policy evaluation engine (C5, §4.5): the v4 rule-tree
//! interpreter and the legacy v1 staged guard. The two forms are
//! independent evaluators - v1 is typed business rules over phase facts,
//! v4 is a generic condition tree - sharing no leaf evaluator between them.

mod condition;
mod context;
mod evaluate;
mod staged;

pub use condition::evaluate_condition;
pub use context::get_path;
pub use evaluate::{evaluate, PolicyVerdict, ViolatedRule};
pub use staged::{
    evaluate_staged, ExchangeFacts, IdentityFacts, IntentFacts, LockFacts, NegotiationFacts,
    ResolutionFacts, StagedFailure, StagedVerdict, V1Context,
};
