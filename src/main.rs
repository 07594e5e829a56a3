//! Обучение сети по файлу примеров и проверка знака введённых чисел.

use anyhow::{ensure, Context, Result};
use clap::Parser;
use lib_backprop_network::{LayerTopology, Network, TrainConfig, TrainingData};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "backprop-net")]
#[command(about = "Trains a feedforward network by back-propagation, then classifies numbers by sign", long_about = None)]
struct Cli {
    /// Training file: layer count, layer sizes, sample count, samples
    #[arg(short, long, default_value = "data/training.txt")]
    data: PathBuf,

    /// Learning rate, 0.0 to 1.0
    #[arg(long, default_value_t = 0.15, value_parser = parse_eta)]
    eta: f64,

    /// Momentum: fraction of the previous weight change, 0.0 or more
    #[arg(long, default_value_t = 0.5, value_parser = parse_alpha)]
    alpha: f64,

    /// Passes over the training samples
    #[arg(short, long, default_value_t = 100)]
    epochs: usize,

    /// Seed for the initial weights (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn parse_eta(s: &str) -> Result<f64, String> {
    let eta: f64 = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if (0.0..=1.0).contains(&eta) {
        Ok(eta)
    } else {
        Err(format!("learning rate must be within 0.0..=1.0, got {}", eta))
    }
}

fn parse_alpha(s: &str) -> Result<f64, String> {
    let alpha: f64 = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if alpha >= 0.0 && alpha.is_finite() {
        Ok(alpha)
    } else {
        Err(format!("momentum must be a finite value >= 0.0, got {}", alpha))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let data = TrainingData::load(&cli.data)
        .with_context(|| format!("failed to load training data from {}", cli.data.display()))?;

    let mut rng: Box<dyn RngCore> = match cli.seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };
    let mut network = Network::random(rng.as_mut(), &data.topology)?;
    let config = TrainConfig::new(cli.eta, cli.alpha);

    train(&mut network, &data, &config, cli.epochs)?;

    ensure!(
        network.inputs_len() == 1,
        "interactive mode needs a network with a single input, this one has {}",
        network.inputs_len()
    );
    let stdin = io::stdin();
    interact(&mut network, stdin.lock(), io::stdout())
}

/// Проход по всем примерам `epochs` раз: forward, затем backward
fn train(network: &mut Network, data: &TrainingData, config: &TrainConfig, epochs: usize) -> Result<()> {
    info!(
        topology = %LayerTopology::describe(&data.topology),
        samples = data.samples.len(),
        epochs,
        eta = config.eta,
        alpha = config.alpha,
        "training"
    );

    for epoch in 1..=epochs {
        for (num, sample) in data.samples.iter().enumerate() {
            network.forward(&sample.inputs)?;
            network.backward(&sample.targets, config)?;
            debug!(
                epoch,
                sample = num,
                inputs = ?sample.inputs,
                results = ?network.results(),
                targets = ?sample.targets,
                "trained on sample"
            );
        }
        if epoch % 10 == 0 || epoch == epochs {
            info!(
                epoch,
                error = network.current_error(),
                recent_average_error = network.recent_average_error(),
                "epoch finished"
            );
        }
    }
    Ok(())
}

/// Одно число на строку, ответ - знак первого выхода сети
fn interact(network: &mut Network, input: impl BufRead, mut output: impl Write) -> Result<()> {
    let mut lines = input.lines();

    loop {
        write!(output, "input number: ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            return Ok(());
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let x: f64 = match line.parse() {
            Ok(x) => x,
            Err(_) => {
                warn!(input = line, "not a number");
                continue;
            }
        };
        let polarity = network.classify(x)?;
        writeln!(output, "{}\n", polarity)?;
    }
}
