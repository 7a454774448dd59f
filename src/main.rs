//! vertex3d CLI
//!
//! Command-line interface for exporting vertex-animated meshes to the
//! legacy Unreal 3D format and inspecting mesh descriptions.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};

use vertex3d_core::{MeshVert, VertMesh};
use vertex3d_export::logging::{self, TracingConfig};
use vertex3d_export::unreal3d::frame_byte_size;
use vertex3d_export::{export_script, ExportOptions, Unreal3dExporter};

/// vertex3d - legacy Unreal 3D mesh exporter
#[derive(Parser)]
#[command(name = "vertex3d")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Export a mesh to _d.3d / _a.3d (and optionally .uc)
    Export(ExportArgs),

    /// Show information about a mesh description
    Info(InfoArgs),

    /// Print the import script for a mesh to stdout
    Script(ScriptArgs),
}

#[derive(Args)]
struct ExportArgs {
    /// Path to the mesh description (JSON)
    #[arg(short, long)]
    mesh: PathBuf,

    /// Output root directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the .uc import script
    #[arg(long)]
    scripts: bool,

    /// Fail instead of truncating counts that exceed 16 bits
    #[arg(long)]
    strict: bool,

    /// Export options file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct InfoArgs {
    /// Path to the mesh description (JSON)
    #[arg(short, long)]
    mesh: PathBuf,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Args)]
struct ScriptArgs {
    /// Path to the mesh description (JSON)
    #[arg(short, long)]
    mesh: PathBuf,

    /// Extension of the geometry/animation files the script imports
    #[arg(long)]
    binary_extension: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_with_config(TracingConfig::from_verbosity(cli.verbose));

    match cli.command {
        Commands::Export(args) => cmd_export(args),
        Commands::Info(args) => cmd_info(args),
        Commands::Script(args) => cmd_script(args),
    }
}

fn load_mesh(path: &Path) -> Result<VertMesh> {
    info!("Loading mesh: {:?}", path);
    VertMesh::from_json_file(path).with_context(|| format!("Failed to load mesh {:?}", path))
}

fn load_options(args: &ExportArgs) -> Result<ExportOptions> {
    let mut options = match &args.config {
        Some(path) => {
            debug!("Reading export options from {:?}", path);
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open config {:?}", path))?;
            serde_yaml::from_reader(io::BufReader::new(file))
                .with_context(|| format!("Failed to parse config {:?}", path))?
        }
        None => ExportOptions::default(),
    };

    if let Some(output) = &args.output {
        options.output_dir = output.clone();
    }
    options.export_scripts |= args.scripts;
    options.strict_limits |= args.strict;

    Ok(options)
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let options = load_options(&args)?;
    let mesh = load_mesh(&args.mesh)?;

    let exporter = Unreal3dExporter::new(options);
    let summary = exporter
        .export(&mesh)
        .with_context(|| format!("Failed to export {}", mesh.name()))?;

    println!("Export complete:");
    if let Some(script) = &summary.script {
        println!("  Script:    {}", script.display());
    }
    println!("  Geometry:  {}", summary.data.display());
    println!("  Animation: {}", summary.animation.display());
    println!("  Written:   {}", format_size(summary.bytes_written));

    Ok(())
}

/// Counts that do not fit their 16-bit header fields
fn limit_overflows(mesh: &VertMesh) -> Vec<(&'static str, usize)> {
    let limit = u16::MAX as usize;
    [
        ("face count", mesh.face_count()),
        ("wedge count", mesh.wedge_count()),
        ("frame count", mesh.frame_count),
        ("frame size", frame_byte_size(mesh.wedge_count(), MeshVert::SIZE)),
    ]
    .into_iter()
    .filter(|&(_, value)| value > limit)
    .collect()
}

/// Vertex records a well-formed mesh carries, saturating on absurd counts
fn expected_vertex_records(mesh: &VertMesh) -> usize {
    mesh.vertex_count.saturating_mul(mesh.frame_count)
}

fn cmd_info(args: InfoArgs) -> Result<()> {
    let mesh = load_mesh(&args.mesh)?;
    let overflows = limit_overflows(&mesh);
    let expected_verts = expected_vertex_records(&mesh);

    if mesh.verts.len() != expected_verts {
        warn!(
            "Mesh has {} vertex records, expected {} ({} x {} frames)",
            mesh.verts.len(),
            expected_verts,
            mesh.vertex_count,
            mesh.frame_count
        );
    }

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "package": mesh.identity.package,
                "class": mesh.identity.class_name,
                "name": mesh.identity.name,
                "faces": mesh.face_count(),
                "wedges": mesh.wedge_count(),
                "vertices_per_frame": mesh.vertex_count,
                "frames": mesh.frame_count,
                "vertex_records": mesh.verts.len(),
                "sequences": mesh.sequences.iter().map(|s| {
                    serde_json::json!({
                        "name": s.name,
                        "start_frame": s.start_frame,
                        "num_frames": s.num_frames,
                        "rate": s.rate,
                        "notifies": s.notifies.len(),
                    })
                }).collect::<Vec<_>>(),
                "bounds": mesh.frame_bounds(0),
                "overflows": overflows.iter().map(|(field, value)| {
                    serde_json::json!({ "field": field, "value": value })
                }).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            let identity = &mesh.identity;
            println!("Mesh: {}/{}/{}", identity.package, identity.class_name, identity.name);
            println!("  Faces:              {}", mesh.face_count());
            println!("  Wedges:             {}", mesh.wedge_count());
            println!("  Vertices per frame: {}", mesh.vertex_count);
            println!("  Frames:             {}", mesh.frame_count);
            println!("  Notifies:           {}", mesh.total_notifies());

            if let Some(bounds) = mesh.frame_bounds(0) {
                let size = bounds.size();
                println!("  Frame 0 extent:     {} x {} x {}", size.x, size.y, size.z);
            }

            if !mesh.sequences.is_empty() {
                println!("\nSequences:");
                for seq in &mesh.sequences {
                    println!(
                        "  {:<16} frames {:>4}..{:<4} rate {}",
                        seq.name,
                        seq.start_frame,
                        seq.start_frame + seq.num_frames,
                        seq.rate
                    );
                }
            }

            if !overflows.is_empty() {
                println!("\nFormat limits exceeded (values will be truncated to 16 bits):");
                for (field, value) in &overflows {
                    println!("  {:<12} {}", field, value);
                }
            }
        }
    }

    Ok(())
}

fn cmd_script(args: ScriptArgs) -> Result<()> {
    let mesh = load_mesh(&args.mesh)?;
    let extension = args
        .binary_extension
        .unwrap_or_else(|| ExportOptions::default().binary_extension);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    export_script(&mesh, &mut out, &extension).context("Failed to write script")?;
    out.flush()?;
    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
