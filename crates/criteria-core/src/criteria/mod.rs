//! Module: criteria
//! Responsibility: typed, fluent builders that turn operator calls on one
//! attribute into expression nodes and fold them through a context.
//! Does not own: the node vocabulary or its checks (see `expr`).
//! Boundary: user-facing and generated-accessor-facing builder layer.

mod collection;
mod comparable;
mod context;
mod criterion;
mod object;
mod optional;
mod string;

#[cfg(test)]
mod tests;

pub use collection::CollectionCriteria;
pub use comparable::{ComparableCriteria, SelfComparable};
pub use context::{CriteriaContext, CriteriaCreator};
pub use criterion::Criterion;
pub use object::ObjectCriteria;
pub use optional::OptionalCriteria;
pub use string::StringCriteria;
