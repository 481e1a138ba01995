use gradnode_core::{Graph, NodeId};
use std::sync::Once;

static INIT: Once = Once::new();

/// Installs a test logger once per test binary; `RUST_LOG` picks the level.
#[allow(dead_code)]
pub fn setup() {
    INIT.call_once(|| {
        // If a logger is already installed, that's okay.
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Handles into `Loss(Multiply(Add(a, b), c), target)`.
#[allow(dead_code)]
pub struct ChainGraph {
    pub graph: Graph<f64>,
    pub a: NodeId,
    pub b: NodeId,
    pub c: NodeId,
    pub sum: NodeId,
    pub product: NodeId,
    pub target: NodeId,
    pub loss: NodeId,
}

#[allow(dead_code)]
pub fn chain_graph(a: f64, b: f64, c: f64, target: f64) -> ChainGraph {
    let mut graph = Graph::<f64>::new();
    let a = graph.learnable(a);
    let b = graph.learnable(b);
    let c = graph.learnable(c);
    let sum = graph.add(a, b).expect("add");
    let product = graph.mul(sum, c).expect("mul");
    let target = graph.fixed(target);
    let loss = graph.loss(product, target).expect("loss");
    ChainGraph {
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
