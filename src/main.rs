use std::error::Error;

use clap::{Parser, ValueEnum};

use hexworld::ascii::{self, AsciiMode};
use hexworld::config::WorldGenConfig;
use hexworld::export;
use hexworld::hex::AxialCoord;
use hexworld::seeds::WorldSeeds;
use hexworld::world::HexWorld;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Default,
    Archipelago,
    Highlands,
}

impl Preset {
    fn config(self) -> WorldGenConfig {
        match self {
            Preset::Default => WorldGenConfig::default(),
            Preset::Archipelago => WorldGenConfig::archipelago(),
            Preset::Highlands => WorldGenConfig::highlands(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "hexworld")]
#[command(about = "Generate deterministic hex-tile worlds")]
struct Args {
    /// World seed: an integer or any text (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<String>,

    /// Number of hex rings around the origin (overrides the config)
    #[arg(short, long)]
    radius: Option<i32>,

    /// JSON world config (takes precedence over --preset)
    #[arg(short, long)]
    config: Option<String>,

    /// Built-in config preset
    #[arg(short, long, value_enum, default_value = "default")]
    preset: Preset,

    /// Write the effective config to a JSON file
    #[arg(long)]
    write_config: Option<String>,

    /// Print an ASCII map (biome, height, temperature, moisture)
    #[arg(long, num_args = 0..=1, default_missing_value = "biome")]
    ascii: Option<AsciiMode>,

    /// Export the biome map to PNG
    #[arg(long)]
    export_png: Option<String>,

    /// Export the elevation map to PNG
    #[arg(long)]
    export_elevation: Option<String>,

    /// Pixels per world unit for PNG exports
    #[arg(long, default_value = "8.0")]
    png_scale: f64,

    /// Export render records for every tile to JSON
    #[arg(long)]
    export_json: Option<String>,

    /// Find a walking path between two tiles, e.g. "0,0:5,-2"
    #[arg(long, value_parser = parse_route)]
    path: Option<Route>,
}

#[derive(Clone, Copy, Debug)]
struct Route {
    from: AxialCoord,
    to: AxialCoord,
}

fn parse_coord(text: &str) -> Result<AxialCoord, String> {
    let (q, r) = text
        .split_once(',')
        .ok_or_else(|| format!("expected 'q,r', got '{}'", text))?;
    let q = q.trim().parse().map_err(|e| format!("bad q in '{}': {}", text, e))?;
    let r = r.trim().parse().map_err(|e| format!("bad r in '{}': {}", text, e))?;
    Ok(AxialCoord::new(q, r))
}

fn parse_route(text: &str) -> Result<Route, String> {
    let (from, to) = text
        .split_once(':')
        .ok_or_else(|| format!("expected 'q,r:q,r', got '{}'", text))?;
    Ok(Route {
        from: parse_coord(from)?,
        to: parse_coord(to)?,
    })
}

fn seeds_from_arg(seed: Option<&str>) -> WorldSeeds {
    match seed {
        Some(text) => match text.parse::<u32>() {
            Ok(master) => WorldSeeds::from_master(master),
            Err(_) => WorldSeeds::from_text(text),
        },
        None => WorldSeeds::from_master(rand::random()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => WorldGenConfig::from_json_file(path)?,
        None => args.preset.config(),
    };
    if let Some(radius) = args.radius {
        config.layout.layout_radius = radius;
    }
    config.validate()?;

    if let Some(path) = &args.write_config {
        config.to_json_file(path)?;
        println!("Wrote config to {}", path);
    }

    let seeds = seeds_from_arg(args.seed.as_deref());
    println!("Generating world with seed: {}", seeds.master);
    println!("Radius: {} rings, sea level {:.2}", config.layout.layout_radius, config.sea_level);

    let world = HexWorld::generate(&config, seeds);

    println!("{} tiles, {:.1}% water", world.len(), world.water_fraction() * 100.0);
    print!("{}", ascii::biome_summary(&world));

    if let Some(mode) = args.ascii {
        println!();
        println!("=== {} ===", mode.name());
        print!("{}", ascii::render_ascii_map(&world, mode));
        if mode == AsciiMode::Biome {
            print!("{}", ascii::biome_legend());
        }
    }

    if let Some(Route { from, to }) = args.path {
        let nav = world.nav();
        let path = nav.pathfind(from.into(), to.into());
        if path.is_empty() {
            println!("No walkable path from {} to {}", from, to);
        } else {
            let steps: Vec<String> = path.iter().map(|c| AxialCoord::from(*c).to_string()).collect();
            println!("Path {} -> {} ({} steps): {}", from, to, path.len() - 1, steps.join(" "));
        }
        let visible = if world.line_of_sight(from, to) { "clear" } else { "blocked" };
        println!("Line of sight: {}", visible);
    }

    if let Some(path) = &args.export_png {
        export::export_biome_png(&world, path, args.png_scale)?;
        println!("Exported biome map to: {}", path);
    }

    if let Some(path) = &args.export_elevation {
        export::export_elevation_png(&world, path, args.png_scale)?;
        println!("Exported elevation map to: {}", path);
    }

    if let Some(path) = &args.export_json {
        export::export_tiles_json(&world, path)?;
        println!("Exported tiles to: {}", path);
    }

    Ok(())
}
