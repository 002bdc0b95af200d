use crate::app_error::AppError;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

pub fn level_for(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

/// Installs the stderr subscriber. `RUST_LOG` still wins over the `--debug` level.
pub fn init(debug: bool) -> Result<(), AppError> {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(debug).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(debug)
        .with_line_number(debug)
        .try_init()
        .map_err(|e| AppError::Config(format!("Failed to initialise logging: {e}")))
}

pub fn mask_api_key(key: &str) -> String {
    if key.len() <= 8 || !key.is_char_boundary(4) || !key.is_char_boundary(key.len() - 4) {
        return "****".to_string();
    }
    format!("{}...{}", &key[..4], &key[key.len() - 4..])
}
