use serde::Deserialize;

/// Settings loadable from `owloc.toml`. CLI flags override these;
/// anything unset falls back to built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwlocConfig {
    /// Output language name; the run writes `translations/<lang>.json`.
    pub lang: Option<String>,
    /// Override for the `$schema` URL emitted at the top of the output.
    pub schema_url: Option<String>,
    pub export: Option<ExportCfg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportCfg {
    /// Replace an existing output file without prompting.
    pub force: Option<bool>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{0}")]
    Other(String),
}

/// Search order: CWD/owloc.toml, then $HOME config dir owloc/owloc.toml.
/// Unreadable or unparseable files are ignored rather than fatal.
pub fn load_config() -> Result<OwlocConfig, ConfigError> {
    let mut merged = OwlocConfig::default();
    if let Ok(p) = std::env::current_dir() {
        let path = p.join("owloc.toml");
        if let Ok(s) = std::fs::read_to_string(&path) {
            if let Ok(cfg) = toml::from_str::<OwlocConfig>(&s) {
                merged = merge(merged, cfg);
            }
        }
    }
    if let Some(base) = dirs::config_dir() {
        let path = base.join("owloc").join("owloc.toml");
        if let Ok(s) = std::fs::read_to_string(&path) {
            if let Ok(cfg) = toml::from_str::<OwlocConfig>(&s) {
                merged = merge(merged, cfg);
            }
        }
    }
    Ok(merged)
}

fn merge(mut a: OwlocConfig, b: OwlocConfig) -> OwlocConfig {
    if a.lang.is_none() {
        a.lang = b.lang;
    }
    if a.schema_url.is_none() {
        a.schema_url = b.schema_url;
    }
    a.export = merge_opt(a.export, b.export, merge_export);
    a
}

fn merge_opt<T: Default>(a: Option<T>, b: Option<T>, f: fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (None, Some(b)) => Some(b),
        (Some(a), None) => Some(a),
        (None, None) => None,
    }
}

fn merge_export(mut a: ExportCfg, b: ExportCfg) -> ExportCfg {
    if a.force.is_none() {
        a.force = b.force;
    }
    a
}
