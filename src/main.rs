use std::path::PathBuf;
use std::process;

use antikythera::{platform_font_scale, Mechanism, MechanismConfig, RenderConfig, Speed, WindowConfig};
use clap::Parser;
use log::error;

/// Animated front and rear dials of the Antikythera Mechanism.
///
/// Left/right click starts or pauses, middle click resets. Keys: Space
/// start/pause, R reset, 1/2/3 speed, F colours, hold D to describe
/// (logs which colour belongs to which indicator), Q quit.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Initial animation speed
    #[arg(long, value_enum, default_value_t = Speed::Normal)]
    speed: Speed,

    /// Open the window with the animation paused
    #[arg(long)]
    paused: bool,

    /// Start with each indicator in its own colour
    #[arg(long)]
    fancy: bool,

    /// TrueType/OpenType font for the dial labels
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Label size as a fraction of a grid cell's width
    #[arg(long, value_name = "FRACTION")]
    font_scale: Option<f32>,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 350, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = MechanismConfig::builder()
        .window(WindowConfig::builder().width(cli.width).height(cli.height).build())
        .render(
            RenderConfig::builder()
                .font_scale(cli.font_scale.unwrap_or_else(platform_font_scale))
                .build(),
        )
        .speed(cli.speed)
        .start_paused(cli.paused)
        .fancy_colors(cli.fancy)
        .maybe_font_path(cli.font)
        .build();

    if let Err(err) = Mechanism::new(config).show() {
        error!("{err}");
        process::exit(1);
    }
}
