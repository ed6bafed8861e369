use tracing_subscriber::EnvFilter;

use plum_minimax::protocol::text_loop::run_stdio_loop;

fn main() -> std::io::Result<()> {
    // Protocol output owns stdout; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    run_stdio_loop()
}
