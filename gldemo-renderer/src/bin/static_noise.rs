use std::process::ExitCode;

use clap::Parser;
use gldemo_renderer::{app, cli::NoiseCli, demos::NoiseScene, logging::init_logging};

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // panic hook
    color_eyre::install()?;

    let cli = NoiseCli::parse();
    cli.validate()?;
    init_logging(cli.window.logging());

    let outcome = app::run(&cli.window, NoiseCli::DEFAULT_TITLE, |gl, width, height| {
        NoiseScene::new(gl, width, height, cli.pattern.into(), cli.seed)
    });
    Ok(app::exit_code(outcome))
}
