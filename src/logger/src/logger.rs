use std::io::Write;

use env_logger::{Builder, Env, fmt::Color};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use log::{Level, LevelFilter};
use once_cell::sync::OnceCell;

mod error;
pub use error::LoggerError;

static INSTANCE: OnceCell<Logger> = OnceCell::new();

/// Environment variable overriding the command-line verbosity (e.g. `HEREDITY_LOG=inference=trace`)
pub const LOG_ENV_VAR: &str = "HEREDITY_LOG";

/// Template used for every progress bar spawned through `Logger::progress_bar()`
const PROGRESS_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg} (eta: {eta})";

#[derive(Debug)]
pub struct Logger {
    multi_pg: MultiProgress,
}

impl Logger {
    /// Initialize the global logger. Subsequent calls merely update the verbosity level.
    ///
    /// # Errors
    /// - if another global logger was already registered by a third party.
    pub fn init(verbosity: u8) -> Result<(), LoggerError> {
        let mut fresh = false;
        INSTANCE.get_or_try_init(|| {
            fresh = true;
            Self::build(verbosity)
        })?;

        if !fresh {
            Self::set_level(verbosity);
        }
        Ok(())
    }

    fn build(verbosity: u8) -> Result<Self, LoggerError> {
        let env = Env::default().filter(LOG_ENV_VAR);
        let logger = Builder::new()
            .filter_level(Self::u8_to_loglevel(verbosity))
            .format(|buf, record| {
                // ---- Errors carry their source location and are printed intensely.
                let is_error = record.level() == Level::Error;
                let traceback = match is_error {
                    true  => format!("(@ {}:{}) ", record.file().unwrap_or("unknown"), record.line().unwrap_or(0)),
                    false => String::new(),
                };

                let mut arg_style = buf.style();
                arg_style.set_intense(is_error);

                let mut level_style = buf.style();
                let color = match record.level() {
                    Level::Error => Color::Red,
                    Level::Warn  => Color::Yellow,
                    Level::Info  => Color::Green,
                    Level::Debug => Color::Blue,
                    Level::Trace => Color::Cyan
                };
                level_style.set_color(color).set_bold(true);

                writeln!(
                    buf,
                    "[{} {: <5} {}] {traceback}{}",
                    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                    level_style.value(record.level()),
                    record.target(),
                    arg_style.value(record.args())
                )
            })
            .parse_env(env)
            .build();

        // ---- Route log lines through the MultiProgress, so that progress bars are not garbled.
        let multi_pg = MultiProgress::new();
        LogWrapper::new(multi_pg.clone(), logger)
            .try_init()
            .map_err(LoggerError::SetLogger)?;
        Ok(Self{multi_pg})
    }

    fn u8_to_loglevel(verbosity: u8) -> LevelFilter {
        match verbosity {
            0            => LevelFilter::Error,
            1            => LevelFilter::Warn,
            2            => LevelFilter::Info,
            3            => LevelFilter::Debug,
            4..= u8::MAX => LevelFilter::Trace
        }
    }

    pub fn set_level(verbosity: u8) {
        log::set_max_level(Self::u8_to_loglevel(verbosity));
    }

    /// Access the shared `MultiProgress` handle. `None` if the logger was never initialized (e.g. in tests).
    pub fn multi() -> Option<&'static MultiProgress> {
        INSTANCE.get().map(|logger| &logger.multi_pg)
    }

    /// Spawn a new progress bar of length `len`, attached to the global `MultiProgress`.
    /// Returns a hidden progress bar if the logger is uninitialized, or if progress display is unwanted.
    pub fn progress_bar(len: u64, msg: &'static str) -> ProgressBar {
        let Some(multi) = Self::multi() else {
            return ProgressBar::hidden()
        };

        if log::max_level() < LevelFilter::Info {
            return ProgressBar::hidden()
        }

        let style = ProgressStyle::with_template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        multi.add(ProgressBar::new(len).with_style(style).with_message(msg))
    }
}
