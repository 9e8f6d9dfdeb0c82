//! hitscan CLI - cast rays against a JSON scene
//!
//! Loads a scene file of colliders and reports what a ray hits first.

use anyhow::Result;
use clap::{Parser, Subcommand};
use hitscan::{query, Detail, QueryOptions, QueryResult, Ray, ScanMode};
use hitscan_math::{Point3, Vec3};
use log::info;
use std::path::{Path, PathBuf};

mod scene;

use scene::SceneFile;

#[derive(Parser)]
#[command(name = "hitscan")]
#[command(about = "Ray queries against sphere, box, capsule and mesh colliders", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cast a ray and print the closest hit
    Cast {
        /// Scene file (.json)
        #[arg(short, long)]
        scene: PathBuf,
        /// Ray origin as x,y,z
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        origin: Vec3,
        /// Ray direction as x,y,z (need not be normalized)
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        direction: Vec3,
        /// Layer the closest hit must be on
        #[arg(short, long, default_value_t = 0, conflicts_with = "any_layer")]
        layer: i32,
        /// Accept the closest hit on any layer
        #[arg(long)]
        any_layer: bool,
        /// Ignore hits at or beyond this distance
        #[arg(short, long)]
        max_distance: Option<f64>,
        /// Report exit points for rays starting inside a collider
        #[arg(long)]
        hit_from_inside: bool,
        /// Test entries on all cores
        #[arg(long)]
        parallel: bool,
        /// Only print whether something was hit
        #[arg(long)]
        quiet: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Display information about a scene file
    Info {
        /// Scene file (.json)
        #[arg(short, long)]
        scene: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Cast {
            scene,
            origin,
            direction,
            layer,
            any_layer,
            max_distance,
            hit_from_inside,
            parallel,
            quiet,
            json,
        } => {
            let mut options = QueryOptions::new()
                .with_layer(layer)
                .with_hit_from_inside(hit_from_inside);
            if any_layer {
                options = options.any_layer();
            }
            if let Some(d) = max_distance {
                options = options.with_max_distance(d);
            }
            if parallel {
                options = options.with_scan(ScanMode::Parallel);
            }
            if quiet {
                options = options.with_detail(Detail::HitOnly);
            }
            let ray = Ray::new(Point3::from(origin), direction);
            print!("{}", cast(&scene, &ray, &options, json)?);
        }
        Commands::Info { scene } => {
            show_info(&scene)?;
        }
    }

    Ok(())
}

/// Load the scene, run the query and render the result.
fn cast(path: &Path, ray: &Ray, options: &QueryOptions, json: bool) -> Result<String> {
    let scene = SceneFile::load(path)?;
    info!("loaded {} entries from {}", scene.entries.len(), path.display());

    let result = query(&scene, ray, options)?;
    if json {
        Ok(format!("{}\n", serde_json::to_string_pretty(&result)?))
    } else {
        Ok(format_result(&result))
    }
}

fn format_result(result: &QueryResult<String>) -> String {
    let mut out = String::new();
    match (&result.detail, result.hit) {
        (None, true) => out.push_str("hit\n"),
        (None, false) => out.push_str("miss\n"),
        (Some(hit), matched) => {
            if matched {
                out.push_str(&format!("hit: {}\n", hit.object));
            } else {
                out.push_str(&format!("miss (closest is {} on another layer)\n", hit.object));
            }
            out.push_str(&format!("  distance: {:.6}\n", hit.distance));
            out.push_str(&format!(
                "  point:    ({:.6}, {:.6}, {:.6})\n",
                hit.point.x, hit.point.y, hit.point.z
            ));
            out.push_str(&format!(
                "  normal:   ({:.6}, {:.6}, {:.6})\n",
                hit.normal.x, hit.normal.y, hit.normal.z
            ));
        }
    }
    out
}

fn show_info(path: &Path) -> Result<()> {
    let scene = SceneFile::load(path)?;

    println!("hitscan scene: {}", path.display());
    println!("  Entries: {}", scene.entries.len());

    if !scene.entries.is_empty() {
        println!("\nShapes:");
        for (kind, count) in scene.kind_counts() {
            println!("  {}: {}", kind, count);
        }
        println!("\nLayers:");
        for (layer, count) in scene.layer_counts() {
            println!("  {}: {}", layer, count);
        }
    }

    let total_tris: usize = scene
        .entries
        .iter()
        .filter_map(|e| match &e.shape {
            hitscan::Shape::TriangleMesh(collider) => collider.mesh.as_ref(),
            _ => None,
        })
        .map(|m| m.triangle_count())
        .sum();
    if total_tris > 0 {
        println!("\nMesh stats:");
        println!("  Total triangles: {}", total_tris);
    }

    Ok(())
}

/// Parse `x,y,z` into a vector.
fn parse_vec3(s: &str) -> std::result::Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got '{s}'"));
    }
    let mut v = Vec3::zeros();
    for (i, part) in parts.iter().enumerate() {
        v[i] = part
            .parse::<f64>()
            .map_err(|e| format!("invalid component '{part}': {e}"))?;
    }
    Ok(v)
}
