use std::str::FromStr;

use anyhow::{Context, Result};

/// Load an environment variable and parse it to the given type
///
/// # Errors
///
/// Returns an error if the environment variable is not set or is not a valid value for the given type
pub fn load_env_var<T: FromStr>(var_name: &str) -> Result<T> {
    let var = std::env::var(var_name).context(format!("{} is not set", var_name))?;
    var.parse::<T>()
        .map_err(|_| anyhow::anyhow!("{} is not a valid {}", var_name, var))
}

/// Load an optional environment variable, falling back to `default` when it is not set
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed
pub fn load_env_var_or<T: FromStr>(var_name: &str, default: T) -> Result<T> {
    match std::env::var(var_name) {
        Ok(var) => var
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{} is not a valid {}", var_name, var)),
        Err(_) => Ok(default),
    }
}
