use std::path::PathBuf;

use animator::Viewport;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "fieldsim",
    author,
    version,
    about = "Run canvas field scenes without a browser",
    arg_required_else_help = false
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Scene configuration TOML; bundled presets fill in scenes it does not define.
    #[arg(long, env = "FIELDSIM_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Scene to run; defaults to the configuration's `defaults.scene`.
    #[arg(long, value_name = "NAME")]
    pub scene: Option<String>,

    /// Viewport size (e.g. `1280x720`).
    #[arg(
        long,
        value_name = "WIDTHxHEIGHT",
        value_parser = parse_size,
        default_value = "800x600"
    )]
    pub size: Viewport,

    /// Number of frame callbacks to deliver.
    #[arg(long, value_name = "N", default_value_t = 120)]
    pub frames: u32,

    /// Simulated time between frame callbacks.
    #[arg(long, value_name = "MILLISECONDS", default_value_t = 16.0)]
    pub frame_ms: f64,

    /// Seed for the field's random source; overrides the configuration's seed.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Report a viewport change before the given frame (repeatable, e.g. `30:1024x768`).
    #[arg(long = "resize-at", value_name = "FRAME:WIDTHxHEIGHT", value_parser = parse_resize)]
    pub resize_at: Vec<ResizeAt>,

    /// Print the final state and the last frame's draw calls as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the bundled scene presets.
    Presets,
}

/// Viewport change injected before frame `frame` is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeAt {
    pub frame: u32,
    pub viewport: Viewport,
}

pub fn parse() -> Cli {
    Cli::parse()
}

fn parse_dimensions(value: &str) -> Result<Viewport, String> {
    let trimmed = value.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X', '×'])
        .ok_or_else(|| "expected WxH format, e.g. 1920x1080".to_string())?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width in size '{trimmed}'"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height in size '{trimmed}'"))?;

    Ok(Viewport::new(width, height))
}

pub fn parse_size(value: &str) -> Result<Viewport, String> {
    let viewport = parse_dimensions(value)?;
    if viewport.is_empty() {
        return Err("viewport dimensions must be greater than zero".to_string());
    }
    Ok(viewport)
}

/// Parses `FRAME:WxH`. Zero dimensions are allowed so a run can exercise a
/// collapsed viewport.
pub fn parse_resize(value: &str) -> Result<ResizeAt, String> {
    let (frame, size) = value
        .trim()
        .split_once(':')
        .ok_or_else(|| "expected FRAME:WxH, e.g. 30:1024x768".to_string())?;
    let frame: u32 = frame
        .trim()
        .parse()
        .map_err(|_| format!("invalid frame number '{}'", frame.trim()))?;
    Ok(ResizeAt {
        frame,
        viewport: parse_dimensions(size)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sizes() {
        assert_eq!(parse_size("1280x720"), Ok(Viewport::new(1280, 720)));
        assert_eq!(parse_size(" 640 X 480 "), Ok(Viewport::new(640, 480)));
        assert_eq!(parse_size("800×600"), Ok(Viewport::new(800, 600)));
    }

    #[test]
    fn rejects_bad_sizes() {
        assert!(parse_size("1280").is_err());
        assert!(parse_size("wide x 720").is_err());
        assert!(parse_size("0x720").is_err());
        assert!(parse_size("-5x720").is_err());
    }

    #[test]
    fn parses_resize_events() {
        assert_eq!(
            parse_resize("30:1024x768"),
            Ok(ResizeAt {
                frame: 30,
                viewport: Viewport::new(1024, 768)
            })
        );
        assert_eq!(
            parse_resize("5:0x0").map(|resize| resize.viewport),
            Ok(Viewport::new(0, 0))
        );
        assert!(parse_resize("1024x768").is_err());
        assert!(parse_resize("soon:1024x768").is_err());
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["fieldsim"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.run.size, Viewport::new(800, 600));
        assert_eq!(cli.run.frames, 120);
        assert!(cli.run.resize_at.is_empty());
    }

    #[test]
    fn cli_collects_repeated_resizes() {
        let cli = Cli::try_parse_from([
            "fieldsim",
            "--scene",
            "nexora",
            "--resize-at",
            "10:640x480",
            "--resize-at",
            "20:320x200",
        ])
        .unwrap();
        assert_eq!(cli.run.scene.as_deref(), Some("nexora"));
        assert_eq!(cli.run.resize_at.len(), 2);
        assert_eq!(cli.run.resize_at[1].frame, 20);
    }
}
