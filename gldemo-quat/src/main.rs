mod cli;

use clap::Parser;
use colored::Colorize;

use crate::cli::Cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let result = cli.product();

    println!("{} {}", "q1".dimmed(), cli.lhs);
    println!("{} {}", "q2".dimmed(), cli.rhs);
    println!("{} {}", "q1 * q2".bold(), result.to_string().green());

    Ok(())
}
