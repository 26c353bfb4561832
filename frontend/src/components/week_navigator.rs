use shared::Week;
use yew::prelude::*;

use crate::hooks::use_week::UseWeekActions;
use crate::services::date_utils;

#[derive(Properties, PartialEq)]
pub struct WeekNavigatorProps {
    pub week: Week,
    pub actions: UseWeekActions,
}

/// "Semaine du 12/10/2026 au 18/10/2026" with previous/next buttons
#[function_component(WeekNavigator)]
pub fn week_navigator(props: &WeekNavigatorProps) -> Html {
    let (start, end) = date_utils::week_bounds_display(&props.week);

    html! {
        <div class="week-navigator d-flex justify-content-between align-items-center mb-3">
            <button type="button" class="btn btn-outline-primary" onclick={props.actions.prev_week.clone()}>
                {"← Semaine précédente"}
            </button>
            <h4 class="week-range">
                {"Semaine du "}<span id="weekStart">{start}</span>{" au "}<span id="weekEnd">{end}</span>
            </h4>
            <button type="button" class="btn btn-outline-primary" onclick={props.actions.next_week.clone()}>
                {"Semaine suivante →"}
            </button>
        </div>
    }
}
