//! Actions, their results and rejection reasons.

pub mod error;
pub mod result;
pub mod types;

pub use error::ActionRejection;
pub use result::ActionResult;
pub use types::{Action, ActionKind};
