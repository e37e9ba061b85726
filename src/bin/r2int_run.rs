use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use r2int::{AutomatonConfig, Session};

/// Run an R2INT world headless and log how it evolves.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file. Defaults are used if it is missing.
    #[arg(short, long, default_value = "r2int.toml")]
    config: PathBuf,

    /// Rule file overriding the configured rule.
    #[arg(short, long)]
    rule: Option<PathBuf>,

    /// Generations to simulate.
    #[arg(short, long, default_value_t = 100)]
    generations: u64,

    /// Log population every this many generations.
    #[arg(long, default_value_t = 10)]
    report_every: u64,

    /// Save the active rules to this file before running.
    #[arg(long)]
    save_rule: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = AutomatonConfig::load_or_default(&args.config);
    if let Some(rule) = args.rule {
        config.rule_file = Some(rule);
    }

    let mut session = Session::from_config(&config).context("failed to set up session")?;
    tracing::info!(rules = ?session.rules(), threads = config.threads, "session ready");

    if let Some(path) = &args.save_rule {
        session
            .save_rules(path)
            .with_context(|| format!("failed to save rules to {}", path.display()))?;
    }

    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let fill = config.random_fill;
    let live = session.random_fill(fill.centered_rect(), &fill, true, &mut rng);
    tracing::info!(live, "seeded random soup");

    let every = args.report_every.max(1);
    for _ in 0..args.generations {
        let report = session.step();
        let world = session.world();
        if world.generation() % every == 0 {
            tracing::info!(
                generation = world.generation(),
                population = world.population(),
                chunks = world.chunk_count(),
                void_state = report.void_state,
                bounds = ?world.bounding_box(),
                "progress"
            );
        }
    }

    let world = session.world();
    tracing::info!(
        generation = world.generation(),
        population = world.population(),
        chunks = world.chunk_count(),
        "done"
    );
    Ok(())
}
