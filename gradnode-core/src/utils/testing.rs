use crate::graph::Graph;
use crate::types::{NodeId, Scalar};

/// Checks that a node's current value is within `tolerance` of `expected`.
/// Panics if the value is stale or differs significantly.
pub fn check_value_near<T: Scalar>(graph: &Graph<T>, id: NodeId, expected: T, tolerance: T) {
    let actual = graph
        .value(id)
        .expect("Failed to read node value in check_value_near");
    let diff = (actual - expected).abs();
    if diff > tolerance {
        panic!(
            "Value mismatch at node {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
            id, actual, expected, diff, tolerance
        );
    }
}

/// Checks the gradient directed at `id` the same way.
pub fn check_gradient_near<T: Scalar>(graph: &Graph<T>, id: NodeId, expected: T, tolerance: T) {
    let actual = graph
        .gradient_at(id)
        .expect("Failed to read gradient in check_gradient_near");
    let diff = (actual - expected).abs();
    if diff > tolerance {
        panic!(
            "Gradient mismatch at node {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
            id, actual, expected, diff, tolerance
        );
    }
}
