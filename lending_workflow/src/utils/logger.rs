use std::path::Path;

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::Layer as FmtLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

const LOGS_DIRECTORY: &str = ".logs";

/// Setup logger configuration for the workflow run
///
/// Progress lines always go to the console. With `log_inside_file` set, each run
/// is also written to daily rotated files under `.logs/`:
/// - `combined.*` with every level
/// - `warn.*` with warnings and errors
/// - `error.*` with errors only, so aborted runs are easy to find
pub fn setup_logger(log_inside_file: bool) -> Result<()> {
    // Set default log level to INFO if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = FmtLayer::new()
        .with_line_number(false)
        .with_target(false)
        .with_thread_ids(false);

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if !log_inside_file {
        registry.try_init().context("Failed to install console logger")?;
        return Ok(());
    }

    registry
        .with(file_layers(Path::new(LOGS_DIRECTORY))?)
        .try_init()
        .context("Failed to install file logger")?;

    Ok(())
}

/// Builds the combined, warn and error file layers writing under `directory`
fn file_layers<S>(directory: &Path) -> Result<Vec<Box<dyn Layer<S> + Send + Sync>>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let appender = |prefix: &str| {
        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(prefix)
            .build(directory)
            .with_context(|| format!("Failed to create {} logs appender", prefix))
    };

    let combined_layer = FmtLayer::new()
        .with_writer(appender("combined")?)
        .with_ansi(false)
        .with_thread_ids(false)
        .boxed();

    let warn_layer = FmtLayer::new()
        .with_writer(appender("warn")?)
        .with_ansi(false)
        .with_thread_ids(false)
        .with_filter(EnvFilter::new("warn"))
        .boxed();

    let error_layer = FmtLayer::new()
        .with_writer(appender("error")?)
        .with_ansi(false)
        .with_thread_ids(false)
        .with_filter(EnvFilter::new("error"))
        .boxed();

    Ok(vec![combined_layer, warn_layer, error_layer])
}

#[cfg(test)]
mod tests {
    use tracing::{error, info, warn};

    use super::*;

    fn read_log(directory: &Path, prefix: &str) -> String {
        std::fs::read_dir(directory)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(prefix))
            })
            .map(|path| std::fs::read_to_string(path).unwrap())
            .collect()
    }

    #[test]
    fn test_file_layers_split_by_level() {
        let directory = tempfile::tempdir().unwrap();
        let subscriber = tracing_subscriber::registry().with(file_layers(directory.path()).unwrap());

        tracing::subscriber::with_default(subscriber, || {
            info!("deposit confirmed");
            warn!("health factor is low");
            error!("borrow reverted");
        });

        let combined = read_log(directory.path(), "combined");
        assert!(combined.contains("deposit confirmed"));
        assert!(combined.contains("health factor is low"));
        assert!(combined.contains("borrow reverted"));

        let warnings = read_log(directory.path(), "warn");
        assert!(!warnings.contains("deposit confirmed"));
        assert!(warnings.contains("health factor is low"));
        assert!(warnings.contains("borrow reverted"));

        let errors = read_log(directory.path(), "error");
        assert!(!errors.contains("deposit confirmed"));
        assert!(!errors.contains("health factor is low"));
        assert!(errors.contains("borrow reverted"));
    }
}
