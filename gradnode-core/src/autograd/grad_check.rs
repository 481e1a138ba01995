use crate::error::GradNodeError;
use crate::graph::{Graph, NodeKind};
use crate::types::{NodeId, Scalar};
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for node {node}: Analytical grad {analytical:?} != Numerical grad {numerical:?}. Difference: {difference:?}")]
    GradientMismatch {
        node: NodeId,
        analytical: f64, // Use f64 for precision
        numerical: f64,
        difference: f64,
    },

    #[error("Numerical gradient is NaN or infinite for node {node}. Details: Objective+: {objective_plus:?}, Objective-: {objective_minus:?}")]
    NumericalGradNaNOrInfinite {
        node: NodeId,
        objective_plus: f64,
        objective_minus: f64,
    },

    #[error("Analytical gradient is NaN or infinite for node {node}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite { node: NodeId, value: f64 },

    #[error("Graph error during gradient check: {0}")]
    GraphError(GradNodeError),
}

impl From<GradNodeError> for GradCheckError {
    fn from(err: GradNodeError) -> Self {
        GradCheckError::GraphError(err)
    }
}

/// Checks the gradient directed at every learnable constant under `root`
/// against a central finite difference.
///
/// The objective being differentiated is the root value, except for a Loss
/// root where it is `-value^2 / 2`: Loss seeds its gradients with its own
/// value, which matches that objective for constants on the result side.
/// Learnable constants on the target side of a Loss therefore fail the check.
///
/// Constants are restored afterwards and the graph is left forwarded and
/// backpropagated from `root`. `root` must be the top of its tree: gradients
/// below a connected node carry its consumer's gradient, which the root
/// value alone does not.
pub fn check_grad<T: Scalar>(
    graph: &mut Graph<T>,
    root: NodeId,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError> {
    let step = T::from(epsilon)
        .filter(|step| step.is_finite() && *step > T::zero())
        .ok_or_else(|| GradNodeError::InvalidConfig(format!("invalid epsilon {}", epsilon)))?;
    let root_node = graph.node(root)?;
    if let Some(consumer) = root_node.outlet().target() {
        return Err(GradNodeError::InvalidConfig(format!(
            "grad check root {} feeds {}",
            root, consumer
        ))
        .into());
    }
    let is_loss = root_node.kind() == NodeKind::Loss;
    let params = graph.learnable_constants(root)?;

    // --- 1. Analytical gradients ---
    graph.forward(root)?;
    graph.backward(root)?;
    let analytical: Vec<f64> = params
        .iter()
        .map(|&id| to_f64(graph.directed_gradient(id)))
        .collect();

    // --- 2. Numerical gradients ---
    let mut outcome = Ok(());
    for (&id, &analytical_grad) in params.iter().zip(analytical.iter()) {
        let original = graph.value(id)?;

        graph.set_value(id, original + step)?;
        let objective_plus = objective(graph, root, is_loss)?;
        graph.set_value(id, original - step)?;
        let objective_minus = objective(graph, root, is_loss)?;
        graph.set_value(id, original)?;

        let numerical_grad = (objective_plus - objective_minus) / (2.0 * epsilon);
        log::debug!(
            "grad check {}: analytical {:?}, numerical {:?}",
            id,
            analytical_grad,
            numerical_grad
        );

        if !analytical_grad.is_finite() {
            outcome = Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                node: id,
                value: analytical_grad,
            });
            break;
        }
        if !numerical_grad.is_finite() {
            outcome = Err(GradCheckError::NumericalGradNaNOrInfinite {
                node: id,
                objective_plus,
                objective_minus,
            });
            break;
        }
        let difference = (analytical_grad - numerical_grad).abs();
        if difference > tolerance * (1.0 + numerical_grad.abs()) {
            outcome = Err(GradCheckError::GradientMismatch {
                node: id,
                analytical: analytical_grad,
                numerical: numerical_grad,
                difference,
            });
            break;
        }
    }

    graph.forward(root)?;
    graph.backward(root)?;
    outcome
}

fn objective<T: Scalar>(graph: &mut Graph<T>, root: NodeId, is_loss: bool) -> Result<f64, GradNodeError> {
    graph.forward(root)?;
    let value = to_f64(graph.value(root)?);
    Ok(if is_loss { -0.5 * value * value } else { value })
}

fn to_f64<T: Scalar>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
