//! Tree construction errors.
//!
//! Invalid trees are rejected when they are built. Evaluation itself never
//! fails: "nothing to do" is always expressed as [`Status::Failure`](crate::Status).

/// Errors raised while constructing behavior tree nodes.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// A composite was given no children.
    #[error("{node} must have at least one child")]
    EmptyChildren { node: &'static str },

    /// A parallel threshold outside `1..=children`.
    #[error("parallel threshold {threshold} is invalid for {children} children")]
    InvalidThreshold { threshold: usize, children: usize },

    /// A finite repeat count of zero.
    #[error("repeat count must be at least 1")]
    InvalidCount,

    /// A negative or non-finite cooldown duration.
    #[error("cooldown must be a finite, non-negative duration (got {seconds})")]
    InvalidCooldown { seconds: f64 },
}

pub type TreeResult<T> = Result<T, TreeError>;

pub(crate) fn ensure_children<T>(node: &'static str, children: &[T]) -> TreeResult<()> {
    if children.is_empty() {
        Err(TreeError::EmptyChildren { node })
    } else {
        Ok(())
    }
}
