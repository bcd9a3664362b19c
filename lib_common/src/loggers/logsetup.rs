//! # Logging Setup
//!
//! Installs a `fern` dispatcher behind the `log` facade: timestamped records
//! to stderr plus a per-application log file next to the working directory.
//! Every binary in the workspace calls this once at startup.

use anyhow::Result;

/// Initializes logging for the given application name.
///
/// Log lines go to stderr and to `<app_name>.log`. The default level is
/// `Info`; chatty HTTP internals are capped at `Warn`.
pub fn setup_logging(app_name: &str) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d %H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .level_for("hyper", log::LevelFilter::Warn)
        .level_for("reqwest", log::LevelFilter::Warn)
        .chain(std::io::stderr())
        .chain(fern::log_file(format!("{}.log", app_name))?)
        .apply()?;
    Ok(())
}
