// Example: fit four learnable constants so that d + c * (a + b) hits a target.
use gradnode_core::optim::{optimize, OptimizeConfig};
use gradnode_core::{GradNodeError, Graph};

fn main() -> Result<(), GradNodeError> {
    env_logger::init();

    // --- Graph ---
    let mut graph = Graph::<f32>::new();
    let a = graph.learnable(5.0);
    let b = graph.learnable(3.0);
    let c = graph.learnable(2.0);
    let sum = graph.add(a, b)?;
    let product = graph.mul(c, sum)?;
    let d = graph.learnable(10.0);
    let total = graph.add(d, product)?;
    let target = graph.fixed(15.0);
    let loss = graph.loss(total, target)?;

    // --- Optimize ---
    let config = OptimizeConfig::<f32>::default();
    println!(
        "Optimizing for {} iterations at rate {}",
        config.iterations(),
        config.rate()
    );
    let report = optimize(&mut graph, loss, &config)?;

    for (iteration, value) in report.history().iter().enumerate() {
        if iteration % 10 == 0 {
            println!("Iteration {:3}: loss = {:.6}", iteration, value);
        }
    }
    println!("Final loss: {:.6}", report.final_value());

    for (name, id) in [("a", a), ("b", b), ("c", c), ("d", d)] {
        println!("{} = {:.4}", name, graph.value(id)?);
    }
    println!("d + c * (a + b) = {:.4}", graph.value(total)?);
    Ok(())
}
