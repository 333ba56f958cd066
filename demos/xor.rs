use sigmoid_nn::{train_loop, CostFunction, Network, RandomSource, TrainConfig, TrainingDataset};

fn main() -> sigmoid_nn::Result<()> {
    let mut rng = RandomSource::new(2024);
    let mut network = Network::new(&[2, 3, 1], &mut rng)?;

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];
    let mut dataset = TrainingDataset::new(inputs.clone(), expected_outputs, vec![], vec![])?;

    let config = TrainConfig::new(5000, 1, 0.5).with_cost(CostFunction::CrossEntropy);
    let history = train_loop(&mut network, &mut dataset, &mut rng, &config)?;

    for stats in history.iter().step_by(1000) {
        println!("Epoch {}: cost = {:.6}", stats.epoch, stats.train_cost);
    }

    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input, network.predict(input)?[0]);
    }
    Ok(())
}
