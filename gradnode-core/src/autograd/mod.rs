//! Graph walks and the forward/backward passes.

pub mod backward;
pub mod forward;
pub mod grad_check;
pub mod traversal;

pub use grad_check::{check_grad, GradCheckError};
pub use traversal::Traversal;
