//! # Tickpath Demo Entry Point
//!
//! Generates a random obstacle grid, asks the pather for a route across it and
//! walks an entity along that route on the fixed-step timer, headless.

use clap::Parser;
use log::{error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tickpath::{
    Cell, DirectSteeringAgent, Entity, GridPassability, GridPathData, GridPather, PatherConfig,
    PatherResult, Point, QuickEntity,
};

/// Command line arguments for the Tickpath demo.
#[derive(Parser, Debug)]
#[command(name = "tickpath")]
#[command(about = "Finds and walks a path across a random grid")]
#[command(version)]
struct Args {
    /// Random seed for obstacle placement
    #[arg(short, long, default_value_t = 12345)]
    seed: u64,

    /// Grid width in cells
    #[arg(long, default_value_t = 20)]
    width: i32,

    /// Grid height in cells
    #[arg(long, default_value_t = 20)]
    height: i32,

    /// Chance of each cell being blocked (0.0 to 1.0)
    #[arg(long, default_value_t = 0.2)]
    density: f64,

    /// Start cell as x,y
    #[arg(long, default_value = "0,0", value_parser = parse_cell)]
    start: Cell,

    /// Target cell as x,y (defaults to the opposite corner)
    #[arg(long, value_parser = parse_cell)]
    target: Option<Cell>,

    /// Entity speed in world units per second
    #[arg(long, default_value_t = 160.0)]
    speed: f64,

    /// Give up walking after this many simulated seconds
    #[arg(long, default_value_t = 60)]
    max_seconds: u64,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_cell(value: &str) -> Result<Cell, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {value:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok(Cell::new(x, y))
}

/// What the demo reports once the walk is over.
#[derive(Debug, Serialize)]
struct Report {
    seed: u64,
    start: Cell,
    target: Cell,
    path: GridPathData,
    ticks: usize,
    arrived: bool,
    final_position: Point,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .init();

    info!("Starting Tickpath demo v{}", tickpath::VERSION);

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> PatherResult<()> {
    let config = match &args.config {
        Some(path) => PatherConfig::from_json_file(path)?,
        None => PatherConfig::default(),
    };
    let target = args
        .target
        .unwrap_or_else(|| Cell::new(args.width - 1, args.height - 1));

    let grid = generate_grid(args, &config, target);
    let mut pather = GridPather::with_config(&config)?;
    pather.set_passability_agent(Some(Box::new(grid.clone())))?;
    pather.set_steering_agent(Some(Box::new(DirectSteeringAgent)))?;
    if let Some(timer) = pather.timer_mut() {
        timer.start();
    }

    let entity = QuickEntity::new(args.start.centre(config.cell_size), args.speed);
    let id = entity.id;
    let target_pos = target.centre(config.cell_size);

    info!("Requesting path from {} to {}", args.start, target);
    pather.try_move_entity_to(&entity, target_pos)?;
    let path = pather.path_data(id);
    info!("Found path with {} waypoints", path.nodes().len());

    let mut entities = HashMap::from([(id, entity)]);
    let frame = Duration::from_millis(16);
    let budget = Duration::from_secs(args.max_seconds);
    let mut elapsed = Duration::ZERO;
    let mut ticks = 0;
    while pather.is_tracking(id) && elapsed < budget {
        ticks += pather.advance(&mut entities, frame);
        elapsed += frame;
    }

    let final_position = entities[&id].centre_pos();
    let report = Report {
        seed: args.seed,
        start: args.start,
        target,
        path,
        ticks,
        arrived: !pather.is_tracking(id),
        final_position,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &grid, args);
    }
    Ok(())
}

fn generate_grid(args: &Args, config: &PatherConfig, target: Cell) -> GridPassability {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut grid = GridPassability::new(args.width, args.height, config.cell_size);
    let density = args.density.clamp(0.0, 1.0);

    for y in 0..args.height {
        for x in 0..args.width {
            let cell = Cell::new(x, y);
            if cell != args.start && cell != target && rng.gen_bool(density) {
                grid.block(cell);
            }
        }
    }
    grid
}

fn print_report(report: &Report, grid: &GridPassability, args: &Args) {
    let on_path: Vec<Cell> = report.path.nodes().iter().map(|node| node.cell).collect();

    for y in 0..args.height {
        let row: String = (0..args.width)
            .map(|x| {
                let cell = Cell::new(x, y);
                if cell == report.start {
                    'S'
                } else if cell == report.target {
                    'T'
                } else if on_path.contains(&cell) {
                    '*'
                } else if grid.is_blocked(cell) {
                    '#'
                } else {
                    '.'
                }
            })
            .collect();
        println!("{row}");
    }

    println!();
    println!("Waypoints: {}", on_path.len());
    println!("Ticks: {}", report.ticks);
    println!(
        "Arrived: {} (final position {})",
        report.arrived, report.final_position
    );
}
