//! Seeded rules: the required-press table and the press/release rule pools.
//!
//! - `predicate`: rule kinds and their evaluation against the bomb
//! - `table`: the 8×8 required-press table
//! - `generator`: deterministic derivation of both from a rule seed

pub mod generator;
pub mod predicate;
pub mod table;

pub use generator::{RuleConstants, RulePair, RuleSet, ACTIVE_RULES, POOL_SIZE};
pub use predicate::{RuleContext, RuleEvaluator, RuleKind};
pub use table::PressTable;
