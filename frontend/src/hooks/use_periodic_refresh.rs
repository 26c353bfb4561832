use gloo::timers::callback::Interval;
use yew::prelude::*;

use crate::services::logging::Logger;

/// Configuration for periodic refresh behavior
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeriodicRefreshConfig {
    pub interval_ms: u32,
    pub enabled: bool,
}

impl PeriodicRefreshConfig {
    pub fn every(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            enabled: interval_ms > 0,
        }
    }
}

impl Default for PeriodicRefreshConfig {
    fn default() -> Self {
        Self::every(10_000)
    }
}

/// Hook that emits `on_tick` every `config.interval_ms`.
///
/// Exactly one timer is alive per hook instance. Whenever `restart_key`
/// changes the timer is dropped and started again, so the first tick after a
/// restart is a full interval away. The timer is also dropped on unmount.
#[hook]
pub fn use_periodic_refresh<K>(config: PeriodicRefreshConfig, on_tick: Callback<()>, restart_key: K)
where
    K: PartialEq + 'static,
{
    use_effect_with((config, restart_key), move |(config, _)| {
        let interval = if config.enabled {
            Logger::debug_with_component(
                "periodic-refresh-hook",
                &format!("Starting timer every {}ms", config.interval_ms),
            );
            Some(Interval::new(config.interval_ms, move || on_tick.emit(())))
        } else {
            None
        };

        move || {
            if let Some(interval) = interval {
                interval.cancel();
                Logger::debug_with_component("periodic-refresh-hook", "Timer cancelled");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_config_default() {
        let config = PeriodicRefreshConfig::default();
        assert_eq!(config.interval_ms, 10_000);
        assert!(config.enabled);
    }

    #[wasm_bindgen_test]
    fn test_zero_interval_disables() {
        assert!(!PeriodicRefreshConfig::every(0).enabled);
        assert!(PeriodicRefreshConfig::every(60_000).enabled);
    }
}
