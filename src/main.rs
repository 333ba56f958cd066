use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use sigmoid_nn::data::load_mnist;
use sigmoid_nn::{test_accuracy, train_loop, CostFunction, Network, RandomSource, TrainConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Cost {
    Quadratic,
    CrossEntropy,
}

impl From<Cost> for CostFunction {
    fn from(cost: Cost) -> Self {
        match cost {
            Cost::Quadratic => CostFunction::Quadratic,
            Cost::CrossEntropy => CostFunction::CrossEntropy,
        }
    }
}

/// Train a sigmoid network on MNIST with mini-batch SGD
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the four MNIST IDX files
    mnist_dir: PathBuf,

    /// Hidden layer widths; input and output widths come from the data
    #[arg(long, value_delimiter = ',', default_value = "30")]
    hidden: Vec<usize>,

    #[arg(long, default_value_t = 30)]
    epochs: usize,

    #[arg(long, default_value_t = 10)]
    batch_size: usize,

    #[arg(long, default_value_t = 3.0)]
    learning_rate: f64,

    /// L2 regularization strength (0 disables it)
    #[arg(long, default_value_t = 0.0)]
    lambda: f64,

    #[arg(long, value_enum, default_value_t = Cost::Quadratic)]
    cost: Cost,

    /// Generator seed; defaults to the wall clock
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the per-epoch test-set evaluation
    #[arg(long)]
    no_eval: bool,

    /// Print per-epoch statistics as JSON lines on stdout
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .target(env_logger::Target::Stderr)
    .init();

    let mut dataset = load_mnist(&args.mnist_dir)
        .with_context(|| format!("loading MNIST from {}", args.mnist_dir.display()))?;
    log::info!("loading completed: {} training, {} testing examples", dataset.n_train(), dataset.n_test());

    let mut rng = match args.seed {
        Some(seed) => RandomSource::new(seed),
        None => RandomSource::from_time(),
    };

    let mut sizes = vec![dataset.input_size()];
    sizes.extend(&args.hidden);
    sizes.push(dataset.output_size());
    let mut network = Network::new(&sizes, &mut rng).context("creating network")?;
    log::info!("network created: {:?}", network.sizes());

    let initial = test_accuracy(&network, &dataset)?;
    log::info!("initial accuracy: {:.4}", initial);

    let config = TrainConfig::new(args.epochs, args.batch_size, args.learning_rate)
        .with_lambda(args.lambda)
        .with_cost(args.cost.into())
        .with_evaluation(!args.no_eval);
    let history = train_loop(&mut network, &mut dataset, &mut rng, &config).context("training")?;
    log::info!("SGD completed");

    if args.json {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for stats in &history {
            serde_json::to_writer(&mut out, stats)?;
            writeln!(out)?;
        }
    }

    let final_accuracy = test_accuracy(&network, &dataset)?;
    log::info!("final accuracy: {:.4}", final_accuracy);
    Ok(())
}
