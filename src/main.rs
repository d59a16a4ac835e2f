//! lsys - rewrite an L-system, run the turtle and export the mesh.
//!
//! ```text
//! lsys -x "F--F--F" -r "F:F+F--F+F" -a 60 -i 3 --obj koch.obj
//! lsys -L plants/bush.lsys --config turtle.toml --glb bush.glb
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use bevy_lindenmayer::export::ExportFormat;
use bevy_lindenmayer::{LSystem, TriangleList, Turtle, TurtleConfig};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lsys")]
#[command(about = "Generate 3D plant meshes from Lindenmayer systems")]
struct Cli {
    /// Initial string to generate from
    #[arg(short = 'x', long, allow_hyphen_values = true)]
    axiom: Option<String>,

    /// Number of rewriting iterations (growth is exponential)
    #[arg(short, long)]
    iterations: Option<u32>,

    /// Turtle turn angle in degrees
    #[arg(short, long, allow_negative_numbers = true)]
    angle: Option<f32>,

    /// Turtle move distance
    #[arg(short, long)]
    distance: Option<f32>,

    /// Rewriting rule as `c:successor`, repeatable
    #[arg(short, long = "rule", allow_hyphen_values = true)]
    rules: Vec<String>,

    /// Parameter file to load before applying the other flags
    #[arg(short = 'L', long)]
    load: Option<PathBuf>,

    /// TOML file with turtle tunables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the final parameters to this file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Write the mesh as OBJ
    #[arg(long)]
    obj: Option<PathBuf>,

    /// Write the mesh as binary glTF
    #[arg(long)]
    glb: Option<PathBuf>,

    /// Print the generated string to stdout
    #[arg(long)]
    print: bool,
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .init();
}

fn build_system(cli: &Cli) -> anyhow::Result<LSystem> {
    let mut system = LSystem::new();

    if let Some(path) = &cli.load {
        system
            .load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
    }
    if let Some(axiom) = &cli.axiom {
        system.set_axiom(axiom.clone());
    }
    if let Some(iterations) = cli.iterations {
        system.set_iterations(iterations);
    }
    if let Some(angle) = cli.angle {
        system.set_angle(angle);
    }
    if let Some(distance) = cli.distance {
        system.set_distance(distance);
    }
    for rule in &cli.rules {
        system.add_rule_from_str(rule)?;
    }

    Ok(system)
}

fn write_export(
    format: ExportFormat,
    path: &Path,
    triangles: &TriangleList,
    name: &str,
) -> anyhow::Result<()> {
    if path.extension().and_then(|ext| ext.to_str()) != Some(format.extension()) {
        tracing::warn!(
            "{} does not end in .{}, writing {format} anyway",
            path.display(),
            format.extension()
        );
    }
    std::fs::write(path, format.encode(triangles, name))
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(
        "Wrote {format} ({} triangles) to {}",
        triangles.len(),
        path.display()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => TurtleConfig::load(path)
            .with_context(|| format!("loading turtle config {}", path.display()))?,
        None => TurtleConfig::default(),
    };

    let mut system = build_system(&cli)?;
    let rewrite = system.rewrite();
    if rewrite.truncated {
        tracing::warn!(
            "Generated string was capped at {} symbols after {} full generations",
            rewrite.length,
            rewrite.generations
        );
    }

    if cli.print {
        println!("{}", system.source());
    }

    let mut turtle = Turtle::new(config);
    let mut triangles = TriangleList::new(turtle.config().max_triangles);
    let summary = turtle.draw_system_into(&system, &mut triangles);
    if summary.unmatched_pops > 0 {
        tracing::warn!("{} unmatched `]` ignored", summary.unmatched_pops);
    }

    match triangles.bounds() {
        Some((min, max)) => tracing::info!(
            "{}: {} symbols, {} triangles, bounds {:?}..{:?}",
            system.name(),
            system.source().chars().count(),
            triangles.len(),
            min,
            max
        ),
        None => tracing::info!("{}: no geometry", system.name()),
    }

    if let Some(path) = &cli.save {
        system.save_to_file(path)?;
    }
    let exports = [(ExportFormat::Obj, &cli.obj), (ExportFormat::Glb, &cli.glb)];
    for (format, path) in exports {
        if let Some(path) = path {
            write_export(format, path, &triangles, system.name())?;
        }
    }

    Ok(())
}
