//! iconsprite - build an SVG icon sprite from the icons an HTML page uses.

#![allow(dead_code)]

mod cli;
mod config;
mod embed;
mod emit;
mod icon;
mod image;
mod logger;
mod pipeline;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, build::build_icons, inject::inject_html};
use config::IconConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = IconConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => build_icons(&config).map(|_| ()),
        Commands::Inject => inject_html(&config).map(|_| ()),
        Commands::All { .. } => {
            build_icons(&config)?;
            inject_html(&config).map(|_| ())
        }
    }
}
