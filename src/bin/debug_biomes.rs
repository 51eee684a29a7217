//! Debug script to print the biome decision table and a sample world's biomes

use std::error::Error;
use std::fs::File;
use std::io::Write;

use hexworld::ascii::{biome_char, biome_legend, biome_summary, render_ascii};
use hexworld::biome::{classify, BiomeThresholds};
use hexworld::config::WorldGenConfig;
use hexworld::seeds::WorldSeeds;
use hexworld::world::HexWorld;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = WorldGenConfig::default();
    let thresholds = BiomeThresholds::new(config.sea_level);
    let seed = "debug-biomes";

    let mut file = File::create("biome_debug.txt")?;

    writeln!(file, "=== BIOME DECISION TABLE (sea level {:.2}) ===", thresholds.sea_level)?;
    writeln!(
        file,
        "deep <= {:.3}  shallow <= {:.3}  beach <= {:.3}",
        thresholds.deep_water, thresholds.sea_level, thresholds.beach
    )?;
    writeln!(file)?;
    write!(file, "{}", biome_legend())?;
    writeln!(file)?;

    // Rows: elevation from high to low. Columns: slope from flat to steep.
    for lat in [0.0f32, 0.8] {
        writeln!(file, "latitude {:.1}   slope 0.00 -> 0.50", lat)?;
        for hi in (0..=20).rev() {
            let h = hi as f32 / 20.0;
            let row: String = (0..=25)
                .map(|si| biome_char(classify(h, si as f32 / 50.0, Some(lat), &thresholds)))
                .collect();
            writeln!(file, "  h={:.2} {}", h, row)?;
        }
        writeln!(file)?;
    }

    let mut world_config = config.clone();
    world_config.layout.layout_radius = 16;
    let world = HexWorld::generate(&world_config, WorldSeeds::from_text(seed));

    writeln!(file, "=== SAMPLE WORLD seed={} radius={} ===", seed, world.radius())?;
    write!(file, "{}", biome_summary(&world))?;
    writeln!(file)?;
    write!(file, "{}", render_ascii(&world))?;

    println!("Wrote biome debug output to biome_debug.txt");
    Ok(())
}
