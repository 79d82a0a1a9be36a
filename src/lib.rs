mod descriptors;
pub use descriptors::*;

mod rules;
pub use rules::*;

mod engine;
pub use engine::*;

mod checker;
pub use checker::*;

mod display;
pub use display::*;

mod screen;
pub use screen::*;

/// Initializes logging at the given level ("trace", "debug", "info", ...).
///
/// Safe to call more than once; only the first call installs a subscriber,
/// so tests can invoke it freely.
pub fn init_logging(level: &str) {
    let level: tracing::Level = level.parse().unwrap_or(tracing::Level::INFO);
    let _ = tracing_subscriber::fmt().with_max_level(level).try_init();
}
