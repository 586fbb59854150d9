// Gateway module for app - external access goes through these re-exports

mod config;

pub use config::{get_config_dir, init_config, load_config, save_config, Config, UiConfig};
