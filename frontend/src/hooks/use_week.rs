use shared::Week;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::date_utils;

pub struct UseWeekResult {
    pub week: Week,
    pub actions: UseWeekActions,
}

#[derive(Clone, PartialEq)]
pub struct UseWeekActions {
    pub prev_week: Callback<MouseEvent>,
    pub next_week: Callback<MouseEvent>,
}

/// The visible week, anchored on the Monday of the current week at load time
#[hook]
pub fn use_week() -> UseWeekResult {
    let week = use_state(|| Week::containing(date_utils::today()));

    let prev_week = {
        let week = week.clone();
        use_callback(*week, move |_: MouseEvent, current| {
            week.set(current.prev());
        })
    };

    let next_week = {
        let week = week.clone();
        use_callback(*week, move |_: MouseEvent, current| {
            week.set(current.next());
        })
    };

    UseWeekResult {
        week: *week,
        actions: UseWeekActions { prev_week, next_week },
    }
}
