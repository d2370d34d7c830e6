//! Domain logic - pure business rules independent of git operations

pub mod plan;
pub mod tag;
pub mod version;

pub use plan::{BumpPlan, PlanOptions, Step};
pub use tag::TagPattern;
pub use version::{BumpKind, Version};
