//! Toroidal Life CLI - Run simulations from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use toroidal_life::{
    compute::{Grid, GridStats, InputEvent, Session},
    schema::{Pattern, Seed, SimulationConfig},
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [generations] [--watch]", args[0]);
        eprintln!();
        eprintln!("Run a toroidal Game of Life simulation from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to simulation configuration file");
        eprintln!("  generations  Number of generations to run (default: 100)");
        eprintln!("  --watch      Tick at the configured interval and print every generation");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let generations: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(100);
    let watch = args.iter().any(|a| a == "--watch");

    // Load configuration
    let config = SimulationConfig::from_json_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    });

    // Load or create seed
    let seed_path = config_path.with_extension("seed.json");
    let seed: Seed = if seed_path.exists() {
        let seed_str = fs::read_to_string(&seed_path).unwrap_or_else(|e| {
            eprintln!("Error reading seed file: {}", e);
            std::process::exit(1);
        });
        serde_json::from_str(&seed_str).unwrap_or_else(|e| {
            eprintln!("Error parsing seed: {}", e);
            std::process::exit(1);
        })
    } else {
        Seed::default()
    };

    println!("Toroidal Life Simulation");
    println!("========================");
    println!("Grid: {}x{}", config.width, config.height);
    println!("Tick interval: {}ms", config.tick_interval_ms);
    println!("Parallel: {}", config.parallel);
    println!("Generations: {}", generations);
    println!();

    if watch {
        run_watch(&config, &seed, generations);
    } else {
        run_batch(&config, &seed, generations);
    }
}

/// Run as fast as possible and report progress every 10%.
fn run_batch(config: &SimulationConfig, seed: &Seed, generations: u64) {
    let mut grid = Grid::from_config(config).unwrap_or_else(|e| {
        eprintln!("Error creating grid: {}", e);
        std::process::exit(1);
    });
    if let Err(e) = grid.apply_seed(seed) {
        eprintln!("Error applying seed: {}", e);
        std::process::exit(1);
    }

    print_stats("Initial state", &grid.stats());

    println!("Running simulation...");
    let start = Instant::now();

    for i in 0..generations {
        if config.parallel {
            grid.advance_parallel();
        } else {
            grid.advance();
        }

        // Print progress every 10%
        if (i + 1) % (generations / 10).max(1) == 0 {
            let stats = grid.stats();
            let elapsed = start.elapsed().as_secs_f32();
            println!(
                "  Generation {}/{}: alive={}, {:.1} gen/s",
                i + 1,
                generations,
                stats.alive,
                (i + 1) as f32 / elapsed
            );
        }
    }

    let elapsed = start.elapsed();
    println!();
    print_stats("Final state", &grid.stats());
    println!(
        "Time: {:.2}s ({:.1} gen/s)",
        elapsed.as_secs_f32(),
        generations as f32 / elapsed.as_secs_f32()
    );
    println!();
    print!("{}", grid);
}

/// Drive the grid in real time through a session, printing each generation.
fn run_watch(config: &SimulationConfig, seed: &Seed, generations: u64) {
    let mut session = Session::new(config, Instant::now()).unwrap_or_else(|e| {
        eprintln!("Error creating grid: {}", e);
        std::process::exit(1);
    });
    if let Err(e) = session.grid_mut().apply_seed(seed) {
        eprintln!("Error applying seed: {}", e);
        std::process::exit(1);
    }
    if !session.driver().is_running() {
        session
            .handle(InputEvent::TogglePause, Instant::now())
            .unwrap_or_else(|e| {
                eprintln!("Error starting driver: {}", e);
                std::process::exit(1);
            });
    }

    print!("{}", session.grid());
    while session.grid().generation() < generations {
        if let Some(wait) = session.driver().time_until_next(Instant::now()) {
            thread::sleep(wait);
        }
        if session.tick(Instant::now()) {
            println!();
            println!("Generation {}:", session.grid().generation());
            print!("{}", session.grid());
        }
    }
}

fn print_stats(label: &str, stats: &GridStats) {
    println!("{}:", label);
    println!("  Generation: {}", stats.generation);
    println!("  Alive cells: {}/{}", stats.alive, stats.total);
    println!("  Population: {:.2}%", stats.population_ratio * 100.0);
    println!();
}

fn print_example_config() {
    let config = SimulationConfig {
        width: 32,
        height: 32,
        ..Default::default()
    };
    let seed = Seed::at(
        Pattern::Noise {
            density: 0.25,
            seed: 42,
        },
        (0, 0),
    );

    println!("Example config.json:");
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_default()
    );
    println!();
    println!("Example config.seed.json:");
    println!("{}", serde_json::to_string_pretty(&seed).unwrap_or_default());
}
