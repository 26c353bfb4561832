use chrono::NaiveDateTime;
use yew::prelude::*;

use super::use_periodic_refresh::{use_periodic_refresh, PeriodicRefreshConfig};
use crate::services::date_utils;

/// Local time, refreshed every `tick_ms` so deadline countdowns and locks stay current
#[hook]
pub fn use_clock(tick_ms: u32) -> NaiveDateTime {
    let now = use_state(date_utils::now);

    let tick = {
        let now = now.clone();
        use_callback((), move |_, _| {
            now.set(date_utils::now());
        })
    };

    use_periodic_refresh(PeriodicRefreshConfig::every(tick_ms), tick, ());

    *now
}
