//! Command-line front-end for gridnav
//!
//! Reads an ASCII map, answers one start/goal query and prints the metrics
//! followed by the map with the path drawn as `*`.
//!
//! Usage:
//!   gridnav --map maze.txt --start 0,0 --goal 9,9 --algorithm astar
//!   gridnav --map maze.txt --start 0,0 --goal 9,9 --algorithm rrt --representation navmesh
//!   gridnav --map maze.txt --start 0,0 --goal 9,9 --compare
//!
//! Enable debug logging to see search internals:
//!   RUST_LOG=debug gridnav --map maze.txt --start 0,0 --goal 9,9

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use gridnav::{
    plan_grid, plan_navmesh, Algorithm, Grid, GridNavResult, GridPos, NavMesh, PlannerConfig,
    PlanningResult, Representation,
};

/// Grid and navmesh path planning
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// ASCII map file ('#' or 'X' blocked, '.' free)
    #[arg(short, long)]
    map: PathBuf,

    /// Start cell as "row,col"
    #[arg(short, long, value_parser = parse_pos)]
    start: GridPos,

    /// Goal cell as "row,col"
    #[arg(short, long, value_parser = parse_pos)]
    goal: GridPos,

    /// dijkstra, greedy, astar, jps, theta or rrt
    #[arg(short, long, default_value = "astar")]
    algorithm: String,

    /// grid or navmesh
    #[arg(short, long, default_value = "grid")]
    representation: String,

    /// TOML planner configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run every algorithm and print a summary table instead of one map
    #[arg(long)]
    compare: bool,
}

fn parse_pos(s: &str) -> Result<GridPos, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"row,col\", got \"{}\"", s))?;
    let row = row.trim().parse::<i32>().map_err(|e| format!("bad row: {}", e))?;
    let col = col.trim().parse::<i32>().map_err(|e| format!("bad column: {}", e))?;
    Ok(GridPos::new(row, col))
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> GridNavResult<()> {
    let grid = Grid::from_ascii(&std::fs::read_to_string(&args.map)?)?;
    let config = match &args.config {
        Some(path) => PlannerConfig::load(path)?,
        None => PlannerConfig::default(),
    };
    let representation: Representation = args.representation.parse()?;

    println!(
        "Map: {} ({}x{}, {} obstacles)",
        args.map.display(),
        grid.rows(),
        grid.cols(),
        grid.obstacle_count()
    );

    if args.compare {
        return compare(&grid, args.start, args.goal, representation, &config);
    }

    let algorithm: Algorithm = args.algorithm.parse()?;
    let result = plan_once(&grid, None, args.start, args.goal, algorithm, representation, &config)?.0;

    match result {
        Some(result) => {
            print_metrics(algorithm, &result);
            print!("{}", grid.render(&result.path));
        }
        None => println!("{} ({}): no path found", algorithm, representation),
    }
    Ok(())
}

fn plan_once(
    grid: &Grid,
    navmesh: Option<NavMesh>,
    start: GridPos,
    goal: GridPos,
    algorithm: Algorithm,
    representation: Representation,
    config: &PlannerConfig,
) -> GridNavResult<(Option<PlanningResult>, Option<NavMesh>)> {
    match representation {
        Representation::Grid => Ok((plan_grid(grid, start, goal, algorithm, config)?, navmesh)),
        Representation::NavMesh => {
            let plan = plan_navmesh(grid, navmesh, start, goal, algorithm, config)?;
            Ok((plan.result, Some(plan.navmesh)))
        }
    }
}

fn compare(
    grid: &Grid,
    start: GridPos,
    goal: GridPos,
    representation: Representation,
    config: &PlannerConfig,
) -> GridNavResult<()> {
    println!(
        "{:<10} {:>8} {:>10} {:>10} {:>10}",
        "algorithm", "cells", "cost", "explored", "time(ms)"
    );

    let mut navmesh = None;
    for algorithm in Algorithm::ALL {
        let (result, mesh) = plan_once(grid, navmesh.take(), start, goal, algorithm, representation, config)?;
        navmesh = mesh;
        match result {
            Some(r) => println!(
                "{:<10} {:>8} {:>10.3} {:>10} {:>10.3}",
                algorithm,
                r.len(),
                r.metrics.path_cost,
                r.metrics.nodes_explored,
                r.metrics.computation_time_ms
            ),
            None => println!("{:<10} {:>8}", algorithm, "no path"),
        }
    }
    Ok(())
}

fn print_metrics(algorithm: Algorithm, result: &PlanningResult) {
    println!("Algorithm: {}", algorithm);
    println!("Path cells: {}", result.len());
    println!("Waypoints: {}", result.waypoints.len());
    println!("Path cost: {:.3}", result.metrics.path_cost);
    println!("Nodes explored: {}", result.metrics.nodes_explored);
    println!("Time: {:.3} ms", result.metrics.computation_time_ms);
}
