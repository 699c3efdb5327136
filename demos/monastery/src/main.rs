//! monastery - one day in the life of a small abbey.
//!
//! Five brothers keep the horarium (services in the quire, lunch in the
//! refectory, bed in the dormitory) and, between obligations, till the farm,
//! build in the cloister yard, and clear the chores the abbey's calendar
//! sets out around each service.
//!
//! ```text
//! cargo run -p monastery                 # default config
//! cargo run -p monastery -- config.json  # SimConfig as JSON
//! RUST_LOG=debug cargo run -p monastery  # job-level logging
//! ```

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use abbey_agent::{AgentStoreBuilder, brother_name};
use abbey_ai::BrotherAi;
use abbey_core::{Point, PropKind, RoomKind, SimConfig, SimRng};
use abbey_job::recipes;
use abbey_output::{CsvWriter, SimOutputObserver};
use abbey_sim::{SimBuilder, WorldCalendar};
use abbey_world::{DijkstraPathfinder, parse_ascii_map};

// ── Constants ─────────────────────────────────────────────────────────────────

const BROTHER_COUNT: usize = 5;
const OUTPUT_DIR:    &str  = "output/monastery";
/// Chores scattered over the abbey half an hour after each service.
const TIDY_UP_CHORES: usize = 6;
/// Refectory tables laid for every service.
const TABLE_SPOTS: [Point; 4] = [
    Point::new(19, 2),
    Point::new(19, 3),
    Point::new(24, 2),
    Point::new(24, 3),
];

// ── Layout ────────────────────────────────────────────────────────────────────

// Q quire, C chapter house, R refectory, D dormitory, L cellarium, F farm.
const ABBEY: &str = "\
##############################
#QQQQQQQQ#CCCCCC#RRRRRRRRRRRR#
#QQQQQQQQ#CCCCCC#RRRRRRRRRRRR#
#QQQQQQQQ+CCCCCC+RRRRRRRRRRRR#
#QQQQQQQQ#CCCCCC#RRRRRRRRRRRR#
####+#########+########+######
#............................#
#..O......O........O.......O.#
#............................#
####+##########+##############
#DDDDDDDDDDDDD#LLLLL#........#
#DDDDDDDDDDDDD+LLLLL+.FFFFFF.#
#DDDDDDDDDDDDD#LLLLL#.FFFFFF.#
##############################
";

fn load_config() -> Result<SimConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
        }
        None => Ok(SimConfig::default()),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = load_config()?;
    info!(
        brothers = BROTHER_COUNT,
        ticks = config.total_ticks,
        start = %config.start_time,
        seed = config.seed,
        "=== monastery ==="
    );

    // 1. Map and rooms.
    let (map, rooms) = parse_ascii_map(ABBEY)?;
    info!(width = map.width(), height = map.height(), rooms = rooms.len(), "abbey laid out");

    // 2. Brothers, spread along the cloister yard.
    let mut rng = SimRng::new(config.seed);
    let builder = (0..BROTHER_COUNT).fold(
        AgentStoreBuilder::new(config.seed).default_effort(config.default_effort),
        |b, i| b.brother(brother_name(&mut rng), Point::new(2 + 5 * i as i32, 6)),
    );
    let (store, rngs) = builder.build();

    // 3. Work for the pool: the farm, a wall across the yard, a pillar.
    let farm: Vec<Point> = rooms
        .room_of_kind(RoomKind::Farm)
        .map(|r| r.tiles().collect())
        .unwrap_or_default();
    let mut jobs = recipes::till_fields(farm);
    jobs.extend((22..27).map(|x| recipes::build_wall(Point::new(x, 8))));
    jobs.push(recipes::place_prop(PropKind::StonePillar, Point::new(14, 7)));

    // 4. Sim.
    let mut sim = SimBuilder::new(config.clone(), store, rngs, map, rooms, BrotherAi, DijkstraPathfinder)
        .horarium()
        .jobs(jobs)
        .calendar(WorldCalendar::daily_office(TABLE_SPOTS.to_vec(), TIDY_UP_CHORES))
        .build()?;

    // 5. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = SimOutputObserver::new(writer, &config);

    // 6. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    info!(elapsed_s = t0.elapsed().as_secs_f64(), "simulation complete");

    if let Some(e) = obs.take_error() {
        warn!(error = %e, "output error");
    }

    // 7. Summary.
    println!("{}", sim.world.map.render());
    println!("Pool: {} jobs left", sim.world.pool.len());
    println!();
    println!("{:<18} {:<10} {:<20} {:<8} {:<8}", "Brother", "Tile", "Job", "Hunger", "Energy");
    println!("{}", "-".repeat(68));
    for agent in sim.agents.agent_ids() {
        let i = agent.index();
        let job = sim.minds[i].current_job().map_or("-", |j| j.name());
        println!(
            "{:<18} {:<10} {:<20} {:<8.1} {:<8.1}",
            sim.agents.name_of(agent),
            sim.agents.position[i].to_string(),
            job,
            sim.agents.needs[i].hunger,
            sim.agents.needs[i].energy,
        );
    }

    Ok(())
}
