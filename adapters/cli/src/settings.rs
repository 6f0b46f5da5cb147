//! Command-line flags layered over an optional TOML settings file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use maze_chase_core::{GameConfig, DIFFICULTIES, LAB_SIZES, SPEEDS};
use maze_chase_engine::EngineOptions;
use serde::Deserialize;

/// Plays Maze Chase in the terminal, reading moves from standard input.
#[derive(Debug, Parser)]
#[command(name = "maze-chase", version)]
pub(crate) struct Args {
    /// Difficulty name: Baby, Easy, Normal, Hard or Brutal.
    #[arg(long)]
    difficulty: Option<String>,
    /// Maze size name: XS, S, M, L or XL.
    #[arg(long)]
    lab_size: Option<String>,
    /// Speed name: Slow, Normal or Fast.
    #[arg(long)]
    speed: Option<String>,
    /// Seed for maze generation and pursuer movement.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file providing defaults for any of the other options.
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
    /// Exit after printing this many frames.
    #[arg(long)]
    max_frames: Option<u64>,
    /// Print one frame out of every N ticks.
    #[arg(long, value_name = "N")]
    frame_every: Option<u64>,
}

impl Args {
    /// Merges flags, the settings file and catalog defaults into a session.
    pub(crate) fn session(&self) -> Result<Session> {
        let file = match &self.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        file.overridden_by(self).resolve()
    }
}

/// Options accepted in the settings file; every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct Settings {
    difficulty: Option<String>,
    lab_size: Option<String>,
    speed: Option<String>,
    seed: Option<u64>,
    max_frames: Option<u64>,
    frame_every: Option<u64>,
}

impl Settings {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings at {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse settings at {}", path.display()))
    }

    fn overridden_by(self, args: &Args) -> Self {
        Self {
            difficulty: args.difficulty.clone().or(self.difficulty),
            lab_size: args.lab_size.clone().or(self.lab_size),
            speed: args.speed.clone().or(self.speed),
            seed: args.seed.or(self.seed),
            max_frames: args.max_frames.or(self.max_frames),
            frame_every: args.frame_every.or(self.frame_every),
        }
    }

    fn resolve(&self) -> Result<Session> {
        let difficulty = match &self.difficulty {
            Some(name) => DIFFICULTIES.find(name)?,
            None => DIFFICULTIES.default_entry(),
        };
        let lab_size = match &self.lab_size {
            Some(name) => LAB_SIZES.find(name)?,
            None => LAB_SIZES.default_entry(),
        };
        let speed = match &self.speed {
            Some(name) => SPEEDS.find(name)?,
            None => SPEEDS.default_entry(),
        };

        let frame_every = self.frame_every.unwrap_or(1);
        if frame_every == 0 {
            bail!("frame-every must be at least 1");
        }

        Ok(Session {
            options: EngineOptions {
                seed: self.seed,
                config: GameConfig::new(difficulty, lab_size, speed),
            },
            max_frames: self.max_frames,
            frame_every,
        })
    }
}

/// Fully resolved options for one run of the adapter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Session {
    pub(crate) options: EngineOptions,
    pub(crate) max_frames: Option<u64>,
    pub(crate) frame_every: u64,
}
