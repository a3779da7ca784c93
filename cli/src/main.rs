use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tdp_common::db::core::NetlistDB;
use tdp_common::db::{parser, writer};
use tdp_common::util::config::{AnnealingConfig, Config};
use tdp_common::util::profiler::ScopedTimer;
use tdp_common::util::{check, generator, logger, visualization};
use tdp_placer::PlaceError;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Place,
    Generate {
        #[arg(long, default_value_t = 20)]
        gates: usize,
        #[arg(long, default_value_t = 40)]
        wires: usize,
        #[arg(long, default_value_t = 1)]
        wire_delay: i64,
        #[arg(long, default_value = "inputs/random.txt")]
        output: String,
    },
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let config = if args.config.exists() {
        log::info!("Loading configuration from {:?}", args.config);
        let config_str = std::fs::read_to_string(&args.config)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?
    } else {
        log::warn!(
            "Configuration file {:?} not found. Using internal defaults.",
            args.config
        );
        Config::default()
    };

    let command = args.command.unwrap_or(Commands::Place);

    match command {
        Commands::Generate {
            gates,
            wires,
            wire_delay,
            output,
        } => {
            if let Some(parent) = Path::new(&output).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            generator::generate_random_netlist(&output, gates, wires, wire_delay)?;
            log::info!("Generated: {}", output);
        }
        Commands::Place => {
            if !Path::new(&config.input.netlist_file).exists() {
                return Err(anyhow::anyhow!(
                    "Input netlist missing: {}",
                    config.input.netlist_file
                ));
            }
            prepare_output_dir(&config.input.output_file)?;

            if run_placement(&config).is_err() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn prepare_output_dir(path_str: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(path_str).parent() {
        if !parent.exists() && !parent.as_os_str().is_empty() {
            log::info!("Creating output directory: {:?}", parent);
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Maps netlist size to the cooling schedule, the same way small designs
/// are given a slower, finer anneal and large ones a faster one.
fn tune_schedule(cfg: &mut AnnealingConfig, num_gates: usize, num_wires: usize) {
    if num_gates > 60 || num_wires > 500 {
        cfg.alpha = 0.9;
        cfg.final_temp = 0.01;
    } else if num_gates < 10 || num_wires < 20 {
        cfg.alpha = 0.99;
        cfg.final_temp = 0.001;
    } else if num_gates < 30 || num_wires < 60 {
        cfg.alpha = 0.95;
        cfg.final_temp = 0.01;
    }
    log::info!(
        "Schedule: T0 {:.2}, floor {:.3}, alpha {:.2}, {} moves/step, {} replicas",
        cfg.initial_temp,
        cfg.final_temp,
        cfg.alpha,
        cfg.moves_per_temp,
        cfg.replicas
    );
}

fn run_placement(config: &Config) -> anyhow::Result<()> {
    let _timer = ScopedTimer::new("Placement flow");

    let mut db = NetlistDB::new();
    parser::netlist::parse(&mut db, &config.input.netlist_file).map_err(|e| {
        anyhow::anyhow!(
            "Invalid netlist in '{}': {}",
            config.input.netlist_file,
            e
        )
    })?;

    if db.num_gates() == 0 {
        return Err(anyhow::anyhow!("Netlist declares no gates"));
    }

    let mut schedule = config.annealing.clone();
    if schedule.auto_tune {
        tune_schedule(&mut schedule, db.num_gates(), db.wires.len());
    }

    log::info!("Starting timing-driven placement...");
    let result = match tdp_placer::place(&db, &schedule) {
        Ok(result) => result,
        Err(PlaceError::Cyclic { pretty, .. }) => {
            log::error!("Circuit contains a cyclic path!");
            log::error!("Cycle found: {}", pretty);
            writer::write_cycle(&pretty, &config.input.output_file)?;
            return Err(anyhow::anyhow!("cyclic netlist"));
        }
    };

    log::info!(
        "Best critical path delay: {} ({} nodes on the critical path)",
        result.delay,
        result.critical_path.len()
    );

    check::run_placement_check(&db, &result.positions, result.grid_extent)
        .map_err(|e| anyhow::anyhow!(e))?;

    log::info!("Generating placement visualization");
    visualization::draw_placement(&db, &result.positions, "output/placement.png", 1000);

    writer::write_placement(
        &db,
        &result.positions,
        &result.critical_path,
        result.delay,
        &config.input.output_file,
    )?;

    Ok(())
}
