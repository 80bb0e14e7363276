mod env_helper;
mod local_config;
mod network_config;

pub use env_helper::{load_env_var, load_env_var_or};
pub use local_config::{LocalConfig, DEFAULT_NETWORK};
pub use network_config::{NetworkConfig, NetworksConfig};
