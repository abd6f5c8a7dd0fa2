//! Minimal stdout logger for the demo binaries.

pub static LOGGER: Logger = Logger;

/// Installs [`LOGGER`] as the global logger at the given level.
pub fn init(level: log::LevelFilter) {
    log::set_max_level(level);
    log::set_logger(&LOGGER).expect("logger was already installed");
}

pub struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn flush(&self) {}

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        println!(
            "[{}] [{} > {:?}] {}",
            chrono::Local::now().format("%H:%M:%S"),
            record.metadata().target(),
            record.level(),
            record.args()
        );
    }
}
