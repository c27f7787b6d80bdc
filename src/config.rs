use confique::Config as _;
use std::sync::OnceLock;

#[derive(confique::Config)]
pub struct Config {
    /// MySQL connection URL for the live schema source.
    #[config(env = "MYVIEW_DATABASE_URL")]
    pub database_url: Option<String>,
    /// Treat `||` as string concatenation, like MySQL's `PIPES_AS_CONCAT` sql mode.
    #[config(env = "MYVIEW_PIPES_AS_CONCAT", default = false)]
    pub pipes_as_concat: bool,
    /// Number of recent completions kept by the suggestion engine.
    #[config(env = "MYVIEW_SUGGESTION_CACHE", default = 16)]
    pub suggestion_cache: u64,
    #[cfg(test)]
    #[config(env = "MYVIEW_CONTAINER_RAMDISKED", default = true)]
    pub container_ramdisked: bool,
    #[cfg(test)]
    #[config(env = "MYVIEW_CONTAINER_LOGS", default = false)]
    pub container_logs: bool,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        Ok(Config::builder().env().load()?)
    }
}

pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        Config::from_env()
            .expect("Failed to load one or more value configuration from the current environment")
    })
}
