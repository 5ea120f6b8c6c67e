use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::warn;

use crate::sys::keysym::Modifiers;

/// Command-line surface for host binaries embedding the core.
#[derive(Parser, Debug, Default)]
#[command(name = "gyre", about = "Tiling window manager policy core")]
pub struct Args {
    /// Prefix modifier for keybinds. Comma-combinable:
    /// shift,caps,ctrl,alt,mod2,mod3,logo,mod5.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Path to the configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ModifierName {
    Shift,
    Caps,
    Ctrl,
    Alt,
    Mod2,
    Mod3,
    Logo,
    Mod5,
}

impl ModifierName {
    fn bit(self) -> Modifiers {
        match self {
            ModifierName::Shift => Modifiers::SHIFT,
            ModifierName::Caps => Modifiers::CAPS,
            ModifierName::Ctrl => Modifiers::CTRL,
            ModifierName::Alt => Modifiers::ALT,
            ModifierName::Mod2 => Modifiers::MOD2,
            ModifierName::Mod3 => Modifiers::MOD3,
            ModifierName::Logo => Modifiers::LOGO,
            ModifierName::Mod5 => Modifiers::MOD5,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Modifier set every default keybind hangs off of.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Command spawned by the "spawn terminal" keybind.
    #[serde(default = "default_terminal")]
    pub terminal: String,

    /// Command spawned by the "spawn menu" keybind.
    #[serde(default = "default_menu")]
    pub menu: String,

    /// Window class identifying the single-instance launcher utility.
    #[serde(default = "default_launcher_class")]
    pub launcher_class: String,
}

// Nested under an X11 session the logo key usually belongs to the outer
// desktop, so fall back to alt there.
fn default_prefix() -> String {
    if std::env::var_os("DISPLAY").is_some() { "alt".into() } else { "logo".into() }
}

fn default_terminal() -> String {
    std::env::var("TERMINAL")
        .ok()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "weston-terminal".into())
}

fn default_menu() -> String { "bemenu-run".into() }

fn default_launcher_class() -> String { "bemenu".into() }

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            terminal: default_terminal(),
            menu: default_menu(),
            launcher_class: default_launcher_class(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = toml::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.launcher_class.is_empty() {
            bail!("launcher_class must not be empty");
        }
        if self.terminal.is_empty() {
            bail!("terminal must not be empty");
        }
        Ok(())
    }

    /// Command-line arguments override the file.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(prefix) = &args.prefix {
            self.prefix = prefix.clone();
        }
    }

    pub fn prefix_modifiers(&self) -> Modifiers { parse_prefix(&self.prefix) }
}

/// Parse a comma-combined prefix specification into a modifier set.
/// Unknown tokens are skipped with a warning; an empty result falls back
/// to the platform default rather than failing.
pub fn parse_prefix(spec: &str) -> Modifiers {
    let mut mods = Modifiers::empty();
    for token in spec.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.parse::<ModifierName>() {
            Ok(name) => mods |= name.bit(),
            Err(_) => warn!("unknown prefix modifier '{token}'"),
        }
    }

    if mods.is_empty() {
        mods = default_prefix()
            .parse::<ModifierName>()
            .map(ModifierName::bit)
            .unwrap_or(Modifiers::LOGO);
    }

    mods
}
