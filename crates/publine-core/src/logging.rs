//! Logging setup: env_logger behind the `log` facade, routed through
//! indicatif on a TTY so log lines don't tear the fetch progress bar.

use std::io::Write;

use indicatif::MultiProgress;
use log::Level;

/// Default filter when `RUST_LOG` is unset. `debug` wins over `quiet`.
pub fn default_filter(quiet: bool, debug: bool) -> &'static str {
    if debug {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    }
}

/// `[LEVEL] message`, level padded to five columns and optionally colored
fn format_line(level: Level, args: &std::fmt::Arguments<'_>, color: bool) -> String {
    if !color {
        return format!("[{level:<5}] {args}");
    }
    let ansi = match level {
        Level::Error => "31",
        Level::Warn => "33",
        Level::Info => "32",
        Level::Debug | Level::Trace => "2",
    };
    format!("[\x1b[{ansi}m{level:<5}\x1b[0m] {args}")
}

/// Filters with env_logger, prints above the progress bars.
struct BarLogger {
    filter: env_logger::Logger,
    multi: MultiProgress,
}

impl log::Log for BarLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.filter.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if self.filter.matches(record) {
            let line = format_line(record.level(), record.args(), true);
            self.multi.suspend(|| eprintln!("{line}"));
        }
    }

    fn flush(&self) {}
}

/// Initialize logging. Pass `multi` on a TTY to route output through the progress bars.
///
/// Fails if a global logger is already installed.
pub fn init_logging(
    quiet: bool,
    debug: bool,
    multi: Option<&MultiProgress>,
) -> Result<(), log::SetLoggerError> {
    let env = env_logger::Env::default().default_filter_or(default_filter(quiet, debug));
    let mut builder = env_logger::Builder::from_env(env);

    let Some(multi) = multi else {
        return builder
            .format(|buf, record| {
                writeln!(buf, "{}", format_line(record.level(), record.args(), false))
            })
            .try_init();
    };

    let filter = builder.build();
    log::set_max_level(filter.filter());
    log::set_boxed_logger(Box::new(BarLogger {
        filter,
        multi: multi.clone(),
    }))
}
