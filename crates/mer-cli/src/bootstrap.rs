//! Configuration loading for the CLI.

/// Load the layered Meridian configuration, including `.env` support.
pub fn load_config() -> anyhow::Result<mer_config::MeridianConfig> {
    mer_config::MeridianConfig::load_with_dotenv().map_err(anyhow::Error::from)
}
