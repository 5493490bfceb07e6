use log::LevelFilter;
use env_logger::{Builder, Env};
use std::io::Write;
use chrono::Local;

/// Timestamped console logging at Info; `RUST_LOG` overrides the level.
pub fn init() {
    Builder::new()
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .filter_module("html5ever", LevelFilter::Warn)
        .filter_module("selectors", LevelFilter::Warn)
        .parse_env(Env::default())
        .init();

    log::info!("Logger initialized.");
}
