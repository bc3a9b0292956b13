use eyre::{Report, eyre};

// Helper functions for creating specific config errors
pub fn config_load_error(source: std::io::Error) -> Report {
    eyre!("config load error: {}", source)
}

pub fn serde_yaml_error(source: serde_yaml::Error) -> Report {
    eyre!("serde yaml error: {}", source)
}
