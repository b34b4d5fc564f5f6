use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "enabled_default")]
    pub enable_cron_groups: bool,
}

fn enabled_default() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_cron_groups: true,
        }
    }
}

/// Load configuration from a `.cronidxrc` JSON file located at `root`.
pub fn load_config(root: &Path) -> std::io::Result<Config> {
    let path = root.join(".cronidxrc");
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(path)?;
    let cfg: Config = serde_json::from_str(&text)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    Ok(cfg)
}
