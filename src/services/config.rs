use crate::catalog::Catalog;
use crate::domain::constants::{BUNDLED_RESOURCE, CONFIG_RELATIVE_PATH};
use crate::domain::models::ConfigFile;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    Bundled,
    File(PathBuf),
}

pub fn config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_RELATIVE_PATH))
}

pub fn load_config() -> anyhow::Result<ConfigFile> {
    let Some(path) = config_path() else {
        return Ok(ConfigFile::default());
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> anyhow::Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let raw = std::fs::read_to_string(path)?;
    let mut config: ConfigFile = toml::from_str(&raw)?;
    if let (Some(source), Some(dir)) = (config.general.source.as_mut(), path.parent()) {
        let p = Path::new(source.as_str());
        if p.is_relative() {
            *source = dir.join(p).to_string_lossy().to_string();
        }
    }
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// `--source` wins over the config file, which wins over the bundled table.
pub fn resolve_source(cli_source: Option<&str>, config: &ConfigFile) -> SourceRef {
    cli_source
        .or(config.general.source.as_deref())
        .map(|s| SourceRef::File(PathBuf::from(s)))
        .unwrap_or(SourceRef::Bundled)
}

pub fn load_catalog(cli_source: Option<&str>, config: &ConfigFile) -> anyhow::Result<Catalog> {
    let strict = config.general.strict;
    match resolve_source(cli_source, config) {
        SourceRef::Bundled => {
            tracing::debug!(strict, "loading bundled resource");
            Ok(Catalog::load(BUNDLED_RESOURCE, strict)?)
        }
        SourceRef::File(path) => {
            tracing::debug!(path = %path.display(), strict, "loading resource file");
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("reading {}: {}", path.display(), e))?;
            Ok(Catalog::load(&raw, strict)?)
        }
    }
}
