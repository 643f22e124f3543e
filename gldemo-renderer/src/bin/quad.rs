use std::process::ExitCode;

use clap::Parser;
use gldemo_renderer::{
    app, cli::QuadCli, demos::QuadScene, gl::ShaderCheck, logging::init_logging,
};

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // panic hook
    color_eyre::install()?;

    let cli = QuadCli::parse();
    cli.validate()?;
    init_logging(cli.window.logging());

    let outcome = app::run(&cli.window, QuadCli::DEFAULT_TITLE, |gl, _, _| {
        QuadScene::new(gl, ShaderCheck::BothFailed)
    });
    Ok(app::exit_code(outcome))
}
