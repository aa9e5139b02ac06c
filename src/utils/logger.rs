use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 未設定 `RUST_LOG` 時使用的過濾規則
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "shopctl=debug,info"
    } else {
        "shopctl=info"
    }
}

/// Installs the global subscriber for the CLI. Logs go to stderr so that
/// `products list` output on stdout stays pipeable.
pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact();

    if tracing_subscriber::registry().with(filter).with(layer).try_init().is_err() {
        tracing::debug!("Logger already initialized");
    }
}
