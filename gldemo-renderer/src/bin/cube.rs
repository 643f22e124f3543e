use std::process::ExitCode;

use clap::Parser;
use gldemo_renderer::{app, cli::CubeCli, demos::CubeScene, logging::init_logging};

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // panic hook
    color_eyre::install()?;

    let cli = CubeCli::parse();
    cli.validate()?;
    init_logging(cli.window.logging());

    let outcome = app::run(&cli.window, CubeCli::DEFAULT_TITLE, |gl, _, _| {
        CubeScene::load(gl, &cli.shader_dir, cli.shader_check, cli.settings())
    });
    Ok(app::exit_code(outcome))
}
