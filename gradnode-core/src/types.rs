use num_traits::{Float, NumAssignOps};
use std::fmt::{self, Debug, Display};

/// A trait representing the scalar types a computation graph can carry.
///
/// Reserved for floating-point types (`f32`, `f64`); gradients and learning
/// rates share the node value type.
pub trait Scalar: Float + NumAssignOps + Debug + Display + Send + Sync + 'static {}

impl Scalar for f32 {}
impl Scalar for f64 {}

/// Identifier of a node inside one [`Graph`](crate::Graph).
///
/// Ids are handed out by the graph that owns the node, in construction order,
/// and double as the node's arena index. An id from one graph means nothing
/// to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the arena index of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
