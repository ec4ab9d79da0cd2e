//! Tests for the warning logged when a selector is dropped with a pending draw

use std::sync::{Mutex, Once};

use log::{Level, LevelFilter, Log, Metadata, Record};
use movepool::{Rotation, SelectorConfig, WeightedStepSelector};

/// Keeps every warning so tests can inspect them.
struct CapturingLogger {
    warnings: Mutex<Vec<String>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if record.level() == Level::Warn {
            if let Ok(mut warnings) = self.warnings.lock() {
                warnings.push(record.args().to_string());
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    warnings: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

fn install_logger() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("no other logger in this test binary");
        log::set_max_level(LevelFilter::Warn);
    });
}

/// Warnings mentioning `needle`; tests use distinct moves so they can run in parallel.
fn warnings_mentioning(needle: &str) -> Vec<String> {
    LOGGER
        .warnings
        .lock()
        .expect("logger mutex poisoned")
        .iter()
        .filter(|w| w.contains(needle))
        .cloned()
        .collect()
}

fn pool_with_pending(step: i32, config: SelectorConfig) -> WeightedStepSelector {
    let mut pool = WeightedStepSelector::with_config(config.with_seed(5));
    pool.add_step(step).unwrap();
    pool.draw(Rotation::Deg0).unwrap();
    pool
}

#[test]
fn dropping_unresolved_draw_warns_by_default() {
    install_logger();

    drop(pool_with_pending(3, SelectorConfig::new()));

    let warnings = warnings_mentioning("unconfirmed draw of move 3");
    assert_eq!(warnings.len(), 1, "expected one warning, got {warnings:?}");
}

#[test]
fn dropping_unresolved_draw_is_silent_when_disabled() {
    install_logger();

    drop(pool_with_pending(
        5,
        SelectorConfig::new().with_unresolved_warning(false),
    ));

    assert!(warnings_mentioning("unconfirmed draw of move 5").is_empty());
}

#[test]
fn dropping_resolved_draw_is_silent() {
    install_logger();

    let mut pool = pool_with_pending(7, SelectorConfig::new());
    pool.confirm_good().unwrap();
    drop(pool);

    assert!(warnings_mentioning("unconfirmed draw of move 7").is_empty());
}
