use crate::organizer::naming::Separator;
use crate::organizer::paths::STAGING_DIR;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Separator between the semantic type and the counter in generated
    /// filenames. Parsing always accepts both; only generation follows this.
    pub separator: Separator,
    /// Tag DAW project files `projekt_bit`/`projekt_nawijka` instead of the
    /// shared `projekt` tag.
    pub distinct_daw_types: bool,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            separator: Separator::Underscore,
            distinct_daw_types: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsConfig {
    /// Album a project lands in when none is named.
    pub default_album: String,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            default_album: "Robocze".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrganizerConfig {
    pub naming: NamingConfig,
    pub projects: ProjectsConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct PartialOrganizerConfig {
    naming: Option<NamingConfig>,
    projects: Option<ProjectsConfig>,
}

fn env_or_bool(var: &str, fallback: bool) -> bool {
    match env::var(var) {
        Ok(v) => match v.trim() {
            "1" | "true" | "TRUE" | "yes" | "on" => true,
            "0" | "false" | "FALSE" | "no" | "off" => false,
            _ => fallback,
        },
        Err(_) => fallback,
    }
}

fn env_or_string(var: &str, fallback: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn env_or_separator(var: &str, fallback: Separator) -> Separator {
    match env::var(var) {
        Ok(v) => match v.trim() {
            "underscore" | "_" => Separator::Underscore,
            "dash" | "-" => Separator::Dash,
            _ => fallback,
        },
        Err(_) => fallback,
    }
}

fn validate(cfg: &OrganizerConfig) -> Result<()> {
    let album = cfg.projects.default_album.trim();
    if album.is_empty() {
        return Err(anyhow!("invalid default album: cannot be empty"));
    }
    if album == STAGING_DIR {
        return Err(anyhow!(
            "invalid default album: \"{STAGING_DIR}\" is the staging folder"
        ));
    }
    Ok(())
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(custom) = env::var("NORF_CONFIG_PATH") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("norf").join("organizer.toml"))
}

fn merge_file_config(base: &mut OrganizerConfig) -> Result<()> {
    let Some(path) = resolve_config_path() else {
        return Ok(());
    };
    if !path.exists() {
        return Ok(());
    }

    let raw = fs::read_to_string(&path)?;
    let parsed: PartialOrganizerConfig = toml::from_str(&raw)
        .map_err(|err| anyhow!("failed to parse config {}: {err}", path.display()))?;
    if let Some(naming) = parsed.naming {
        base.naming = naming;
    }
    if let Some(projects) = parsed.projects {
        base.projects = projects;
    }
    Ok(())
}

/// Defaults, then the TOML file, then `NORF_*` environment overrides.
pub fn load_config() -> Result<OrganizerConfig> {
    let mut cfg = OrganizerConfig::default();
    merge_file_config(&mut cfg)?;

    cfg.naming.separator = env_or_separator("NORF_NAMING_SEPARATOR", cfg.naming.separator);
    cfg.naming.distinct_daw_types =
        env_or_bool("NORF_DISTINCT_DAW_TYPES", cfg.naming.distinct_daw_types);
    cfg.projects.default_album =
        env_or_string("NORF_DEFAULT_ALBUM", &cfg.projects.default_album);

    validate(&cfg)?;
    Ok(cfg)
}
