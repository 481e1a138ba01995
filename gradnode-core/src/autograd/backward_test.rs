use crate::error::GradNodeError;
use crate::graph::Graph;
use crate::types::NodeId;
use approx::assert_relative_eq;

struct Fixture {
    graph: Graph<f64>,
    a: NodeId,
    b: NodeId,
    c: NodeId,
    sum: NodeId,
    product: NodeId,
    target: NodeId,
    loss: NodeId,
}

/// `Loss(Multiply(Add(a, b), c), target)` with a=5, b=3, c=2, target=20.
fn fixture() -> Fixture {
    let mut graph = Graph::<f64>::new();
    let a = graph.learnable(5.0);
    let b = graph.learnable(3.0);
    let c = graph.learnable(2.0);
    let sum = graph.add(a, b).unwrap();
    let product = graph.mul(sum, c).unwrap();
    let target = graph.fixed(20.0);
    let loss = graph.loss(product, target).unwrap();
    Fixture {
        graph,
        a,
        b,
        c,
        sum,
        product,
        target,
        loss,
    }
}

#[test]
fn test_loss_seeds_gradients_with_its_value() {
    let mut f = fixture();
    f.graph.forward(f.loss).unwrap();
    f.graph.backward(f.loss).unwrap();

    let loss_value = f.graph.value(f.loss).unwrap();
    assert_relative_eq!(loss_value, 4.0);
    assert_eq!(f.graph.gradients(f.loss).unwrap(), &[loss_value, loss_value]);
}

#[test]
fn test_multiply_follows_product_rule() {
    let mut f = fixture();
    f.graph.forward(f.loss).unwrap();
    f.graph.backward(f.loss).unwrap();

    let incoming = f.graph.gradient_at(f.product).unwrap();
    let sum_value = f.graph.value(f.sum).unwrap();
    let c_value = f.graph.value(f.c).unwrap();
    let gradients = f.graph.gradients(f.product).unwrap();
    assert_relative_eq!(gradients[0], incoming * c_value);
    assert_relative_eq!(gradients[1], incoming * sum_value);
    assert_relative_eq!(gradients[0], 8.0);
    assert_relative_eq!(gradients[1], 32.0);
}

#[test]
fn test_add_passes_gradient_through() {
    let mut f = fixture();
    f.graph.forward(f.loss).unwrap();
    f.graph.backward(f.loss).unwrap();

    let incoming = f.graph.gradient_at(f.sum).unwrap();
    let gradients = f.graph.gradients(f.sum).unwrap();
    assert_eq!(gradients[0], incoming);
    assert_eq!(gradients[1], incoming);
}

#[test]
fn test_gradients_reach_every_leaf_through_outlets() {
    let mut f = fixture();
    f.graph.forward(f.loss).unwrap();
    f.graph.backward(f.loss).unwrap();

    assert_relative_eq!(f.graph.gradient_at(f.a).unwrap(), 8.0);
    assert_relative_eq!(f.graph.gradient_at(f.b).unwrap(), 8.0);
    assert_relative_eq!(f.graph.gradient_at(f.c).unwrap(), 32.0);
    assert_relative_eq!(f.graph.gradient_at(f.target).unwrap(), 4.0);
    assert_relative_eq!(f.graph.gradient_at(f.loss).unwrap(), 1.0);
}

#[test]
fn test_backward_without_forward_fails_fast() {
    let mut f = fixture();
    let err = f.graph.backward(f.loss).unwrap_err();
    assert_eq!(err, GradNodeError::StaleState { node: f.loss, pass: "forward" });
}

#[test]
fn test_backward_after_constant_change_fails_fast() {
    let mut f = fixture();
    f.graph.forward(f.loss).unwrap();
    f.graph.set_value(f.a, 1.0).unwrap();
    assert!(f.graph.backward(f.loss).is_err());
}

#[test]
fn test_gradients_go_stale_after_constant_change() {
    let mut f = fixture();
    f.graph.forward(f.loss).unwrap();
    f.graph.backward(f.loss).unwrap();
    f.graph.set_value(f.c, 3.0).unwrap();

    assert_eq!(
        f.graph.gradients(f.product).unwrap_err(),
        GradNodeError::StaleState { node: f.product, pass: "backward" }
    );
}

#[test]
fn test_multiply_uses_current_forward_values() {
    let mut f = fixture();
    f.graph.forward(f.loss).unwrap();
    f.graph.backward(f.loss).unwrap();

    f.graph.set_value(f.c, 4.0).unwrap();
    f.graph.forward(f.loss).unwrap();
    f.graph.backward(f.loss).unwrap();

    // product = 32, loss = -12
    let gradients = f.graph.gradients(f.product).unwrap();
    assert_relative_eq!(gradients[0], -12.0 * 4.0);
    assert_relative_eq!(gradients[1], -12.0 * 8.0);
}

#[test]
fn test_backward_on_operator_root_seeds_one() {
    let mut graph = Graph::<f32>::new();
    let a = graph.learnable(3.0);
    let b = graph.learnable(4.0);
    let product = graph.mul(a, b).unwrap();

    graph.forward(product).unwrap();
    graph.backward(product).unwrap();
    assert_eq!(graph.gradients(product).unwrap(), &[4.0, 3.0]);
}

#[test]
fn test_backward_on_single_constant() {
    let mut graph = Graph::<f32>::new();
    let a = graph.learnable(3.0);

    graph.forward(a).unwrap();
    graph.backward(a).unwrap();
    assert!(graph.gradients(a).unwrap().is_empty());
    assert_eq!(graph.gradient_at(a).unwrap(), 1.0);
}

#[test]
fn test_subtree_backward_reads_gradient_from_consumer() {
    let mut f = fixture();
    f.graph.forward(f.loss).unwrap();
    f.graph.backward(f.loss).unwrap();
    let before = f.graph.gradient_at(f.a).unwrap();

    // `sum` is connected, so it is seeded from the product, not with one.
    f.graph.backward(f.sum).unwrap();
    assert_relative_eq!(f.graph.gradient_at(f.a).unwrap(), before);
    assert_relative_eq!(f.graph.gradient_at(f.sum).unwrap(), 8.0);
    assert_eq!(f.graph.gradients(f.sum).unwrap(), &[8.0, 8.0]);
}

#[test]
fn test_subtree_backward_requires_consumer_gradients() {
    let mut f = fixture();
    f.graph.forward(f.loss).unwrap();

    let err = f.graph.backward(f.sum).unwrap_err();
    assert_eq!(err, GradNodeError::StaleState { node: f.product, pass: "backward" });
}
