//! Print a summary of one level in a map file, optionally re-saving it
//!
//! Run with: cargo run --bin map-info -- Map.sceA --level 0 --resave out.sceA

use std::path::PathBuf;

use clap::Parser;
use serde_json::json;

use marathon_map::{Level, LevelAttributes, MapFlag, Wadfile};

#[derive(Parser)]
#[command(name = "map-info")]
#[command(about = "Inspect and re-save Marathon map files")]
struct Cli {
    file: PathBuf,
    /// Directory index of the level to load
    #[arg(long, default_value_t = 0)]
    level: i16,
    /// List every level in the file instead of loading one
    #[arg(long)]
    list: bool,
    #[arg(long)]
    json: bool,
    /// Add a player start to polygon 0 when the level has none
    #[arg(long)]
    ensure_start: bool,
    /// Write the file back out through load and save
    #[arg(long)]
    resave: Option<PathBuf>,
    /// Editor attributes to attach; written next to the --resave output
    #[arg(long)]
    attributes: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut wad = Wadfile::read_path(&cli.file)?;

    if cli.list {
        for entry in &wad.entries {
            let name = Level::load_entry(entry)
                .map(|level| level.name().to_string())
                .unwrap_or_else(|e| format!("<{e}>"));
            println!("{:4}  {:3} chunks  {}", entry.index, entry.chunks.len(), name);
        }
        return Ok(());
    }

    let entry = wad
        .entry(cli.level)
        .ok_or_else(|| format!("no level {} in {}", cli.level, cli.file.display()))?;
    let mut level = Level::load_entry(entry)?;

    if let Some(path) = &cli.attributes {
        level.attributes = LevelAttributes::from_json(&std::fs::read_to_string(path)?)?;
    }
    if cli.ensure_start && level.ensure_player_start() {
        eprintln!("added player start to polygon 0");
    }

    let flags: Vec<&str> = MapFlag::all()
        .filter(|&f| level.flag(f))
        .map(MapFlag::name)
        .collect();
    let tags: Vec<String> = entry.chunks.tags().map(|t| t.to_string()).collect();
    let concave = level.polygons.iter().filter(|p| p.concave).count();

    if cli.json {
        let summary = json!({
            "index": cli.level,
            "name": level.name(),
            "environment": level.environment(),
            "landscape": level.landscape(),
            "flags": flags,
            "points": level.points.len(),
            "lines": level.lines.len(),
            "polygons": level.polygons.len(),
            "concave_polygons": concave,
            "sides": level.sides.len(),
            "platforms": level.platforms.len(),
            "lights": level.lights.len(),
            "objects": level.objects.len(),
            "player_start": level.has_player_start(),
            "chunks": tags,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Level {}: {}", cli.level, level.name());
        println!("  environment {}  landscape {}", level.environment(), level.landscape());
        println!("  flags: {}", flags.join(", "));
        println!(
            "  {} points, {} lines, {} polygons ({} concave), {} sides",
            level.points.len(),
            level.lines.len(),
            level.polygons.len(),
            concave,
            level.sides.len()
        );
        println!(
            "  {} platforms, {} lights, {} objects, {} media",
            level.platforms.len(),
            level.lights.len(),
            level.objects.len(),
            level.media.len()
        );
        println!("  player start: {}", if level.has_player_start() { "yes" } else { "no" });
        println!("  chunks: {}", tags.join(" "));
    }

    if let Some(out) = &cli.resave {
        let saved = level.save_with_attributes();
        if let Some(entry) = wad.entry_mut(cli.level) {
            entry.chunks = saved.chunks;
        }
        wad.write_path(out)?;
        println!("Saved to {}", out.display());

        if cli.attributes.is_some() {
            let sidecar = out.with_extension("json");
            std::fs::write(&sidecar, saved.attributes.to_json()?)?;
            println!("Attributes saved to {}", sidecar.display());
        }
    }

    Ok(())
}
