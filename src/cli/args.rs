//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::EmitMode;
use crate::log;

/// Icon sprite builder CLI
#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about,
    long_about = None,
    arg_required_else_help = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: iconsprite.toml)
    #[arg(short = 'C', long, global = true, default_value = "iconsprite.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// Print version
    #[arg(long, action = clap::ArgAction::Version)]
    version: Option<bool>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scan the HTML source and emit the icon sprite and manifest
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Rewrite the HTML source to reference the emitted sprite
    #[command(visible_alias = "i")]
    Inject,

    /// Build, then inject
    #[command(visible_alias = "a")]
    All {
        #[command(flatten)]
        build_args: BuildArgs,
    },
}

/// Shared arguments for Build and All commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Emission mode: s|sprite, i|individual, a|both.
    /// Unrecognized values fall back to sprite mode.
    #[arg(value_name = "MODE")]
    pub mode: Option<String>,
}

impl BuildArgs {
    /// Resolve the positional mode argument, if given.
    pub fn emit_mode(&self) -> Option<EmitMode> {
        let raw = self.mode.as_deref()?;
        Some(EmitMode::parse_lenient(raw).unwrap_or_else(|| {
            log!("warning"; "unknown build mode `{}`, using sprite", raw);
            EmitMode::Sprite
        }))
    }
}

impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_inject(&self) -> bool {
        matches!(self.command, Commands::Inject)
    }

    /// Build arguments for commands that run the build step.
    pub const fn build_args(&self) -> Option<&BuildArgs> {
        match &self.command {
            Commands::Build { build_args } | Commands::All { build_args } => Some(build_args),
            Commands::Inject => None,
        }
    }
}
