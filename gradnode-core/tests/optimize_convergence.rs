use gradnode_core::autograd::check_grad;
use gradnode_core::init::uniform_;
use gradnode_core::optim::{optimize, OptimizeConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod common;
use common::{chain_graph, setup};

#[test]
fn test_loss_shrinks_for_random_starting_constants() {
    setup();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..20 {
        let mut g = chain_graph(0.0, 0.0, 0.0, 4.0);
        uniform_(&mut g.graph, g.loss, 0.5, 1.5, &mut rng).unwrap();

        let config = OptimizeConfig::new(40, 0.01).unwrap();
        let report = optimize(&mut g.graph, g.loss, &config).unwrap();

        for pair in report.history().windows(2).skip(3) {
            assert!(
                pair[1].abs() < pair[0].abs() || pair[0].abs() < 1e-9,
                "loss did not shrink: {:?}",
                pair
            );
        }
        assert!(report.final_value().abs() < report.history()[0].abs());
    }
}

#[test]
fn test_analytic_gradients_match_finite_differences() {
    setup();
    let mut rng = StdRng::seed_from_u64(7);
    let mut g = chain_graph(0.0, 0.0, 0.0, 3.0);
    uniform_(&mut g.graph, g.loss, -2.0, 2.0, &mut rng).unwrap();

    check_grad(&mut g.graph, g.loss, 1e-5, 1e-6).unwrap();
}

#[test]
fn test_fixed_target_never_moves() {
    setup();
    let mut g = chain_graph(1.0, 1.0, 1.0, 5.0);
    let config = OptimizeConfig::new(25, 0.02).unwrap();
    optimize(&mut g.graph, g.loss, &config).unwrap();
    assert_eq!(g.graph.value(g.target).unwrap(), 5.0);
}
