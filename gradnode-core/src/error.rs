use crate::types::NodeId;
use thiserror::Error;

/// Custom error type for the gradnode engine.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum GradNodeError {
    #[error("Invalid arity for {kind}: expected {expected} inputs, got {actual}")]
    InvalidArity {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Node {node} already feeds slot {slot} of node {consumer}; a node can have only one consumer")]
    OutletAlreadyConnected {
        node: NodeId,
        consumer: NodeId,
        slot: usize,
    },

    #[error("Loss node {node} must stay the root of its graph and cannot be used as an input")]
    LossNotTerminal { node: NodeId },

    #[error("Node {node} does not belong to this graph (graph holds {len} nodes)")]
    NodeNotFound { node: NodeId, len: usize },

    #[error("Stale state on node {node}: the {pass} pass has not run since the last constant change")]
    StaleState { node: NodeId, pass: &'static str },

    #[error("Node {node} is not a constant")]
    NotAConstant { node: NodeId },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
