//! Scalar reverse-mode automatic differentiation.
//!
//! A [`Graph`] owns every node of one computation tree in an arena. Operands
//! are built first and handed to operator constructors by [`NodeId`]; each
//! operand records a single [`Outlet`] back to its consumer, which the
//! backward pass and the parameter update use to find the gradient directed
//! at it.
//!
//! ```
//! use gradnode_core::{Graph, optim::{optimize, OptimizeConfig}};
//!
//! let mut graph = Graph::<f32>::new();
//! let a = graph.learnable(5.0);
//! let b = graph.learnable(3.0);
//! let sum = graph.add(a, b).unwrap();
//! let target = graph.fixed(10.0);
//! let loss = graph.loss(sum, target).unwrap();
//!
//! let config = OptimizeConfig::new(50, 0.1).unwrap();
//! let report = optimize(&mut graph, loss, &config).unwrap();
//! assert!(report.final_value().abs() < 0.01);
//! ```

pub mod autograd;
pub mod error;
pub mod graph;
pub mod init;
pub mod optim;
pub mod types;
pub mod utils;

pub use error::GradNodeError;
pub use graph::{Graph, Node, NodeKind, Outlet};
pub use types::{NodeId, Scalar};

// Re-export traits required by public functions/structs
pub use num_traits;
