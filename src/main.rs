//! Kinetic Pass demo CLI
//!
//! Drives the generator engine with scripted or continuous movement
//! ticks, standing in for the pointer-movement host. Demonstrates the
//! full lifecycle: authorize, toggle, generate, report.

use clap::Parser;
use kinetic_pass::{
    config::FileConfig,
    engine::GeneratorEngine,
    input::{MockMotion, MotionSource},
    sampling::SystemRandom,
    strength::CrackTimeEstimator,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "kinetic-pass", about = "Motion-driven password generator demo")]
struct Args {
    /// Number of simulated movement ticks.
    #[arg(long)]
    ticks: Option<u64>,

    /// Identity label standing in for the wallet connection.
    #[arg(long, default_value = "0xdemo")]
    identity: String,

    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Assumed attacker guessing rate (overrides config).
    #[arg(long)]
    guesses_per_second: Option<f64>,

    /// Keep generating until interrupted.
    #[arg(long)]
    continuous: bool,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {e}");
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };

    if let Some(rate) = args.guesses_per_second {
        config.engine.guesses_per_second = rate;
    }
    if let Some(ticks) = args.ticks {
        config.demo.tick_count = ticks;
    }
    if args.continuous {
        config.demo.continuous = true;
    }
    if let Err(e) = config.engine.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    info!("Kinetic Pass v{}", kinetic_pass::VERSION);
    info!("This is a demonstration using simulated movement input");

    let estimator = CrackTimeEstimator::new(config.engine.guesses_per_second);
    let mut engine = GeneratorEngine::with_estimator(SystemRandom::new(), estimator);
    let updates = engine.subscribe();

    engine.authorize(args.identity.as_str());
    engine.toggle();

    if config.demo.continuous {
        run_continuous(&mut engine, &config);
    } else {
        info!(ticks = config.demo.tick_count, "Processing movement ticks...");
        let mut motion = MockMotion::with_ticks(config.demo.tick_count);
        while motion.next_movement() {
            engine.on_movement_tick();
        }
    }

    // Drain the subscription the way a rendering layer would.
    let published = updates.try_iter().count();
    info!(published, "state updates published");

    let snapshot = engine.snapshot();
    println!("password:   {}", snapshot.password);
    println!("entropy:    {:.2} bits", snapshot.entropy_bits);
    println!("crack time: {}", snapshot.crack_time);
}

/// Generates until Ctrl-C, treating each interval as one movement event.
fn run_continuous(engine: &mut GeneratorEngine<SystemRandom>, config: &FileConfig) {
    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = Arc::clone(&stop);
    if let Err(e) = ctrlc::set_handler(move || handler_stop.store(true, Ordering::SeqCst)) {
        tracing::warn!("failed to install signal handler: {e}");
    }

    #[cfg(feature = "metrics")]
    let registry = if config.demo.metrics_port != 0 {
        start_metrics_server(config.demo.metrics_port)
    } else {
        None
    };
    #[cfg(not(feature = "metrics"))]
    let _ = config;

    info!("Generating until Ctrl-C...");
    while !stop.load(Ordering::SeqCst) {
        engine.on_movement_tick();

        #[cfg(feature = "metrics")]
        if let Some(ref registry) = registry {
            registry.update(&kinetic_pass::metrics::MetricsSnapshot::from_engine(engine));
        }

        std::thread::sleep(std::time::Duration::from_millis(50));
    }
}

/// Starts the metrics server on a background thread.
#[cfg(feature = "metrics")]
fn start_metrics_server(port: u16) -> Option<Arc<kinetic_pass::metrics::MetricsRegistry>> {
    use kinetic_pass::metrics::{MetricsRegistry, MetricsServer, MetricsServerConfig};

    let registry = match MetricsRegistry::new() {
        Ok(registry) => Arc::new(registry),
        Err(e) => {
            tracing::warn!("metrics disabled: {e}");
            return None;
        }
    };

    let server = MetricsServer::new(MetricsServerConfig::with_port(port), Arc::clone(&registry));
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::warn!("failed to start metrics runtime: {e}");
                return;
            }
        };
        if let Err(e) = runtime.block_on(server.run()) {
            tracing::warn!("metrics server error: {e}");
        }
    });

    Some(registry)
}
