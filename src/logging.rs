use std::time::SystemTime;

use log::LevelFilter;

/// wires `log` up to a fern dispatch writing to stdout.
///
/// The level comes from the `logging.level` config key; an unknown value
/// falls back to `info`.
pub fn init(level: &str) {
    let level = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);
    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // rocket's own launch chatter stays at warn so ours is readable
        .level_for("rocket", LevelFilter::Warn)
        .level_for("_", LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply();
    if let Err(e) = result {
        eprintln!("Failed to initialize logging, continuing without it: {e}");
    }
}
