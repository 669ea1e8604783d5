use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::application::Session;
use crate::config::{CONFIG_ENV, Settings};
use crate::i18n::Language;

pub mod render;
pub mod shell;

pub use shell::{Flow, Shell, ShellCommand, ShellLine};

/// splitbills - split shared expenses with friends
#[derive(Parser)]
#[command(name = "splitbills")]
#[command(about = "Track shared expenses with friends and see who owes whom")]
#[command(version)]
pub struct Cli {
    /// Settings file (JSON)
    #[arg(short, long, env = CONFIG_ENV, global = true)]
    pub config: Option<PathBuf>,

    /// Display language: en, ar (overrides the settings file)
    #[arg(short, long, global = true)]
    pub lang: Option<Language>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive shell
    Shell,

    /// Apply shell commands from a file, then print every summary
    Replay {
        /// Script file, one shell command per line
        script: PathBuf,
    },

    /// Print the display labels
    Labels,

    /// Write the effective settings to a file
    InitConfig {
        /// Destination settings file
        output: PathBuf,
    },
}

impl Cli {
    /// Settings from the config file, with command line overrides applied.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if let Some(lang) = self.lang {
            settings.language = lang;
        }
        Ok(settings)
    }

    pub fn run(self) -> Result<()> {
        let settings = self.settings()?;
        debug!(?settings, "loaded settings");

        match self.command {
            Commands::Shell => {
                let mut session = Session::new(settings);
                let stdin = io::stdin();
                let prompt = stdin.is_terminal();
                let mut shell = Shell::new(&mut session, io::stdout());
                shell.run_interactive(stdin.lock(), prompt)?;
            }

            Commands::Replay { script } => {
                let file = File::open(&script)
                    .with_context(|| format!("Failed to open script: {}", script.display()))?;

                let mut session = Session::new(settings);
                Shell::new(&mut session, io::stdout())
                    .run_script(BufReader::new(file))
                    .with_context(|| format!("Replay of {} failed", script.display()))?;

                println!();
                render::render_all(&session, &mut io::stdout())?;
            }

            Commands::Labels => {
                render::render_labels(settings.language, &mut io::stdout())?;
            }

            Commands::InitConfig { output } => {
                settings.save(&output)?;
                println!("Settings written: {}", output.display());
            }
        }

        Ok(())
    }
}
