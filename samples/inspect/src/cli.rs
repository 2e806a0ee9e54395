use std::{num::NonZeroU8, str::FromStr};

use nalgebra::Vector3;
use polymesh::Mode;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Full,
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Full => f.write_str("full"),
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Primitive mode of the generated mesh.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum ModeArg {
    Points,
    Lines,
    LineStrip,
    LineLoop,
    Triangles,
    TriangleStrip,
    TriangleFan,
    Hybrid,
    Patch,
}

impl std::fmt::Display for ModeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use clap::ValueEnum;
        match self.to_possible_value() {
            Some(v) => f.write_str(v.get_name()),
            None => Ok(()),
        }
    }
}

#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(
        short,
        long,
        default_value = "warn,polymesh=info,inspect=info",
        env = "POLYMESH_LOG_FILTER"
    )]
    pub log_filter: String,
    /// Logging output format
    #[arg(long, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
    /// How the generated grid is split into primitives
    #[arg(short, long, default_value_t = ModeArg::Triangles)]
    pub mode: ModeArg,
    /// Number of vertices per patch, for `--mode patch`
    #[arg(long, default_value = "4")]
    pub patch_size: NonZeroU8,
    /// Number of quads along each side of the grid
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..=1024))]
    pub grid: u32,
    /// Number of coarser index streams to generate
    #[arg(long, default_value_t = 2)]
    pub lod_levels: usize,
    /// Scaling applied to the grid
    #[arg(short, long, default_value = "1,1,1", value_parser = parse_vec3::<f32>, value_name = "X,Y,Z")]
    pub scale: Vector3<f32>,
    /// Bound the mesh with a sphere instead of a box
    #[arg(long)]
    pub sphere: bool,
    /// Maximum number of elements to print
    #[arg(long, default_value_t = 16)]
    pub limit: usize,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        match self.mode {
            ModeArg::Points => Mode::Points,
            ModeArg::Lines => Mode::Lines,
            ModeArg::LineStrip => Mode::LineStrip,
            ModeArg::LineLoop => Mode::LineLoop,
            ModeArg::Triangles => Mode::Triangles,
            ModeArg::TriangleStrip => Mode::TriangleStrip,
            ModeArg::TriangleFan => Mode::TriangleFan,
            ModeArg::Hybrid => Mode::Hybrid,
            ModeArg::Patch => Mode::Patch(self.patch_size),
        }
    }
}

fn parse_vec3<R: FromStr>(
    s: &str,
) -> Result<Vector3<R>, Box<dyn std::error::Error + Send + Sync + 'static>>
where
    <R as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let mut split = s.trim().split(',');
    let mut next = || split.next().ok_or("expected 3 comma-separated components");
    let x = R::from_str(next()?)?;
    let y = R::from_str(next()?)?;
    let z = R::from_str(next()?)?;
    Ok(nalgebra::vector![x, y, z])
}

/// Set up pretty log output
pub(crate) fn initialize_tracing(log_filter: &str, log_format: LogFormat) {
    let tsub = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::OffsetTime::new(
            time::UtcOffset::current_local_offset().unwrap_or_else(|e| {
                tracing::warn!("couldn't get local time offset: {:?}", e);
                time::UtcOffset::UTC
            }),
            time::macros::format_description!("[hour]:[minute]:[second]"),
        ))
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_env_filter(log_filter);

    match log_format {
        LogFormat::Compact => tsub.compact().init(),
        LogFormat::Full => tsub.init(),
        LogFormat::Pretty => tsub.pretty().init(),
        LogFormat::Json => tsub.json().init(),
    }
}
