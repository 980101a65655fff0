use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use junction_sim::junction::{
    load_situation, Config, Intersection, PhaseCompressor, ProgramId, Situation,
};

#[derive(Parser)]
#[command(name = "junction_sim")]
#[command(about = "Derive intersection topology and signal phases from a layout")]
struct Cli {
    /// Layout file (JSON)
    layout: PathBuf,

    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only compress the signal program with this id
    #[arg(long)]
    program: Option<u32>,

    /// Also emit the phase still running when a program ends
    #[arg(long)]
    close_final_phase: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if cli.close_final_phase {
        config.close_final_phase = true;
    }

    let mut situation = load_situation(&cli.layout, &config)?;
    info!("Layout {} loaded", cli.layout.display());

    for intersection in situation.intersections() {
        print_topology(intersection);
    }
    print_routes(&situation);
    compress_programs(&mut situation, &config, cli.program.map(ProgramId))?;
    Ok(())
}

fn print_topology(intersection: &Intersection) {
    println!(
        "=== Intersection {} at {} ({}) ===",
        intersection.id(),
        intersection.coordinates(),
        intersection.directions()
    );
    let edge_of = |index| {
        intersection
            .leg_at(index)
            .map(|leg| leg.outgoing_edge())
            .unwrap_or_else(|| "?".to_string())
    };

    for leg in intersection.legs() {
        let mut line = format!("Leg {} {} [{}]", leg.id(), leg.angle(), leg.directions());
        if let Some(left) = leg.left_most_leg() {
            line.push_str(&format!(" left:{}", edge_of(left)));
        }
        if let Some(right) = leg.right_most_leg() {
            line.push_str(&format!(" right:{}", edge_of(right)));
        }
        if let Some(straight) = leg.straight_leg() {
            line.push_str(&format!(" straight:{}", edge_of(straight)));
        }
        if !leg.self_references().is_empty() {
            line.push_str(&format!(" (self: {:?})", leg.self_references()));
        }
        println!("{}", line);

        for lane in leg.all_lanes() {
            let outputs: Vec<String> = lane.output_legs().iter().map(|&leg| edge_of(leg)).collect();
            println!(
                "  lane {} [{}] -> {}",
                lane.net_id(),
                lane.directions(),
                outputs.join(", ")
            );
        }
    }
}

fn print_routes(situation: &Situation) {
    println!("=== Routes ===");
    for connection in situation.connections() {
        println!(
            "Connection {}: {} <-> {}",
            connection.id, connection.first, connection.second
        );
    }
    let valid = situation.valid_routes();
    for route in &valid {
        println!(
            "Route {} -> {}: {}",
            route.flow.from,
            route.flow.to,
            route.edges.join(" ")
        );
    }
    println!(
        "{} of {} routes are drivable",
        valid.len(),
        situation.routes().len()
    );
}

fn compress_programs(
    situation: &mut Situation,
    config: &Config,
    only: Option<ProgramId>,
) -> Result<()> {
    let renderer = config.renderer();
    let compressor = PhaseCompressor::new(&renderer, config.trailing_phase());

    let targets: Vec<_> = situation
        .intersections()
        .iter()
        .flat_map(|intersection| {
            intersection
                .programs()
                .iter()
                .filter(move |program| only.map_or(true, |id| id == program.id))
                .map(move |program| (intersection.id(), program.id, program.program_id.clone()))
        })
        .collect();

    for (intersection_id, program, name) in targets {
        let compression = situation
            .intersection_mut(intersection_id)?
            .compress_program(program, &compressor)
            .with_context(|| {
                format!(
                    "Failed to compress program {} of intersection {}",
                    name, intersection_id
                )
            })?;

        println!("=== Program {} of intersection {} ===", name, intersection_id);
        for phase in &compression.phases {
            let source = phase
                .source
                .map(|source| format!(" (phase {})", source.id))
                .unwrap_or_default();
            println!(
                "Phase {}: {} ticks {}{}",
                phase.id, phase.duration, phase.state, source
            );
        }
        if let Some(start) = compression.open_phase_start {
            println!("Open phase from tick {}", start);
        }
    }
    Ok(())
}
