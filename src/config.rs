//! Saved CLI defaults.
//!
//! Config files hold the same flags as the command line, whitespace
//! separated, with `#` comments. The global file, the local `.quillpanerc`
//! and the command line are merged in that order.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub json: bool,
    pub output: Option<PathBuf>,
    pub debounce_ms: Option<u64>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: booleans are or-ed, options from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            json: self.json || other.json,
            output: other.output.clone().or_else(|| self.output.clone()),
            debounce_ms: other.debounce_ms.or(self.debounce_ms),
        }
    }
}

/// Platform config directory: `%APPDATA%`, `~/Library/Application Support`,
/// or `$XDG_CONFIG_HOME` falling back to `~/.config`.
fn config_base_dir() -> Option<PathBuf> {
    let env_dir = |key: &str| std::env::var_os(key).map(PathBuf::from);
    if cfg!(target_os = "windows") {
        env_dir("APPDATA")
    } else if cfg!(target_os = "macos") {
        env_dir("HOME").map(|home| home.join("Library").join("Application Support"))
    } else {
        env_dir("XDG_CONFIG_HOME").or_else(|| env_dir("HOME").map(|home| home.join(".config")))
    }
}

/// Per-user defaults file, or the local override when no home is known.
pub fn global_config_path() -> PathBuf {
    config_base_dir().map_or_else(local_override_path, |dir| {
        dir.join("quillpane").join("config")
    })
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".quillpanerc")
}

/// Load flags from `path`; a missing file yields defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens: Vec<String> = content
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(str::split_whitespace)
        .map(String::from)
        .collect();
    Ok(parse_flag_tokens(&tokens))
}

/// # Errors
/// Returns an error if the output path cannot be stored in the flag file
/// (it contains whitespace or `#`), or if the config directory or file
/// cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    if let Some(output) = &flags.output {
        let text = output.to_string_lossy();
        anyhow::ensure!(
            !text.contains(|c: char| c.is_whitespace() || c == '#'),
            "Cannot save --output {}: paths with spaces or '#' are not supported in config files",
            output.display()
        );
    }
    let mut lines = vec!["# quillpane defaults (saved with --save)".to_string()];
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if flags.json {
        lines.push("--json".to_string());
    }
    if let Some(output) = &flags.output {
        lines.push(format!("--output {}", output.display()));
    }
    if let Some(ms) = flags.debounce_ms {
        lines.push(format!("--debounce-ms {ms}"));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// # Errors
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from raw tokens, ignoring everything else.
///
/// Options accept both `--name value` and `--name=value`.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut rest = tokens.iter().map(String::as_str);
    while let Some(token) = rest.next() {
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        match name {
            "--watch" | "-w" => flags.watch = true,
            "--json" => flags.json = true,
            "--output" | "-o" => {
                if let Some(value) = inline.or_else(|| rest.next()) {
                    flags.output = Some(PathBuf::from(value));
                }
            }
            "--debounce-ms" => {
                if let Some(value) = inline.or_else(|| rest.next()) {
                    flags.debounce_ms = value.parse().ok();
                }
            }
            _ => {}
        }
    }
    flags
}
