//! ## Crate layout
//! - `core`: literal values, the checked expression tree, and the fluent
//!   criteria builders.
//!
//! The `prelude` module is what record-builder code (hand-written or
//! generated) needs in scope: the builder types, the tree vocabulary, and
//! the value conversion trait.

pub use criteria_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Errors
//

pub use crate::core::error::{CriteriaError as Error, ErrorClass};

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use serde::{Deserialize, Serialize};
}
