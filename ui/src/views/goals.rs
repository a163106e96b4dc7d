use dioxus::prelude::*;
use jubuddy::funds::{FundsMode, funds_limit, plan_funds_change};
use jubuddy::goals::{
    GoalAction, NewGoalForm, ProgressTier, display_status, history_goals, next_status,
    progress_percentage, validate_new_goal, visible_goals,
};
use jubuddy::models::{Goal, GoalStatus, UpdateGoalStatusPayload, UserId};
use jubuddy::utils::{days_left_str, format_date_long, format_peso, today_local};

use crate::components::{ErrorBanner, Overlay};
use crate::hooks::{use_client, use_request_tracker};
use crate::views::home::days_left_label;

#[derive(Clone, Copy, PartialEq)]
enum GoalTab {
    InProgress,
    History,
}

#[component]
pub fn GoalsView(user_id: UserId) -> Element {
    let client = use_client();
    let tracker = use_request_tracker();

    let mut goals = use_signal(Vec::<Goal>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);
    let mut search = use_signal(String::new);
    let mut tab = use_signal(|| GoalTab::InProgress);
    let mut show_create = use_signal(|| false);
    let mut funds_target = use_signal(|| None::<(Goal, FundsMode)>);

    let fetch = use_callback(move |_: ()| {
        let ticket = tracker.begin();
        let client = client.clone();
        spawn(async move {
            loading.set(true);
            error.set(None);
            let result = client.get_goals(user_id).await;
            let Some(result) = ticket.accept(result) else {
                return;
            };
            match result {
                Ok(list) => goals.set(list),
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    });

    use_effect(move || fetch.call(()));

    let status_client = use_client();
    let change_status = use_callback(move |(goal, action): (Goal, GoalAction)| {
        let status = match next_status(&goal, action) {
            Ok(status) => status,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        let client = status_client.clone();
        spawn(async move {
            let payload = UpdateGoalStatusPayload {
                goal_id: goal.goal_id,
                status,
            };
            match client.update_goal_status(&payload).await {
                Ok(_) => fetch.call(()),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    });

    let today = today_local();
    let all = goals();
    let shown: Vec<Goal> = match tab() {
        GoalTab::InProgress => visible_goals(&all, &search()).into_iter().cloned().collect(),
        GoalTab::History => history_goals(&all).into_iter().cloned().collect(),
    };

    rsx! {
        div { class: "content-header",
            h1 { "GOALS" }
            button { onclick: move |_| show_create.set(true), "NEW GOAL" }
        }

        div { class: "filters",
            div { class: "section-switcher",
                button {
                    class: if tab() == GoalTab::InProgress { "active" } else { "" },
                    onclick: move |_| tab.set(GoalTab::InProgress),
                    "IN PROGRESS"
                }
                button {
                    class: if tab() == GoalTab::History { "active" } else { "" },
                    onclick: move |_| tab.set(GoalTab::History),
                    "HISTORY"
                }
            }
            if tab() == GoalTab::InProgress {
                div { class: "filter-group",
                    label { "SEARCH" }
                    input {
                        r#type: "text",
                        placeholder: "Search goals...",
                        value: "{search}",
                        oninput: move |e| search.set(e.value()),
                    }
                }
            }
        }

        if let Some(message) = error() {
            ErrorBanner { message: message, on_retry: move |_| fetch.call(()) }
        }

        if loading() {
            div { class: "loading", "LOADING..." }
        } else if shown.is_empty() {
            div { class: "empty-state", "NO GOALS" }
        } else {
            div { class: "goal-list",
                for goal in shown {
                    {
                        let status = display_status(&goal, today);
                        let percentage = progress_percentage(&goal);
                        let tier = ProgressTier::from_percentage(percentage);
                        let days = days_left_str(&goal.target_date, today);
                        let in_progress = matches!(goal.status, GoalStatus::Active | GoalStatus::Paused);
                        let for_add = goal.clone();
                        let for_reduce = goal.clone();
                        let for_pause = goal.clone();
                        let for_complete = goal.clone();
                        let for_cancel = goal.clone();
                        rsx! {
                            div { class: "goal-card dashboard-block", key: "{goal.goal_id}",
                                div { class: "flex gap-2 items-center",
                                    h2 { "{goal.name}" }
                                    span { class: "type-tag status-{status}", "{status.as_str().to_uppercase()}" }
                                }
                                p { "{goal.description}" }
                                div { class: "bar-track",
                                    div { class: "bar-fill {tier.css_class()}", style: "width: {percentage}%" }
                                }
                                div { class: "analytics-label",
                                    "{format_peso(goal.actual_value)} of {format_peso(goal.target_value)} · {percentage}%"
                                }
                                div { class: "analytics-label",
                                    "DUE {format_date_long(&goal.target_date)}"
                                    if let Some(days) = days.filter(|_| in_progress) {
                                        " · {days_left_label(days)}"
                                    }
                                }
                                if in_progress {
                                    div { class: "flex gap-2",
                                        if goal.status == GoalStatus::Active {
                                            button {
                                                onclick: move |_| funds_target.set(Some((for_add.clone(), FundsMode::Add))),
                                                "ADD FUNDS"
                                            }
                                        }
                                        button {
                                            disabled: goal.actual_value <= 0.0,
                                            onclick: move |_| funds_target.set(Some((for_reduce.clone(), FundsMode::Reduce))),
                                            "WITHDRAW"
                                        }
                                        button {
                                            onclick: move |_| change_status.call((for_pause.clone(), GoalAction::TogglePause)),
                                            if goal.status == GoalStatus::Paused { "RESUME" } else { "PAUSE" }
                                        }
                                        if goal.status == GoalStatus::Active && goal.actual_value >= goal.target_value {
                                            button {
                                                onclick: move |_| change_status.call((for_complete.clone(), GoalAction::Complete)),
                                                "COMPLETE"
                                            }
                                        }
                                        button {
                                            class: "btn-text",
                                            onclick: move |_| change_status.call((for_cancel.clone(), GoalAction::Cancel)),
                                            "CANCEL GOAL"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        if show_create() {
            CreateGoalOverlay {
                user_id: user_id,
                on_close: move |_| show_create.set(false),
                on_save: move |_: Goal| {
                    show_create.set(false);
                    fetch.call(());
                }
            }
        }

        if let Some((goal, mode)) = funds_target() {
            FundsOverlay {
                goal: goal,
                mode: mode,
                on_close: move |_| funds_target.set(None),
                on_save: move |_: Goal| {
                    funds_target.set(None);
                    fetch.call(());
                }
            }
        }
    }
}

#[component]
fn CreateGoalOverlay(user_id: UserId, on_close: EventHandler<()>, on_save: EventHandler<Goal>) -> Element {
    let client = use_client();
    let mut name = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut target_value = use_signal(String::new);
    let mut target_date = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let handle_submit = move |e: Event<FormData>| {
        e.prevent_default();

        let form = NewGoalForm {
            name: name(),
            description: description(),
            target_value: target_value(),
            target_date: target_date(),
        };
        let payload = match validate_new_goal(&form, user_id, today_local()) {
            Ok(payload) => payload,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };

        saving.set(true);
        error.set(None);
        let client = client.clone();
        spawn(async move {
            match client.create_goal(&payload).await {
                Ok(goal) => on_save.call(goal),
                Err(e) => error.set(Some(e.to_string())),
            }
            saving.set(false);
        });
    };

    rsx! {
        Overlay { title: "NEW GOAL", on_close: on_close, busy: saving(),
            if let Some(message) = error() {
                div { class: "error-message", "{message}" }
            }
            form { onsubmit: handle_submit,
                div { class: "form-group",
                    label { "NAME" }
                    input { r#type: "text", value: "{name}", oninput: move |e| name.set(e.value()) }
                }
                div { class: "form-group",
                    label { "DESCRIPTION" }
                    input { r#type: "text", value: "{description}", oninput: move |e| description.set(e.value()) }
                }
                div { class: "form-group",
                    label { "TARGET AMOUNT" }
                    input {
                        r#type: "number",
                        step: "0.01",
                        min: "0",
                        value: "{target_value}",
                        oninput: move |e| target_value.set(e.value()),
                    }
                }
                div { class: "form-group",
                    label { "TARGET DATE" }
                    input { r#type: "date", value: "{target_date}", oninput: move |e| target_date.set(e.value()) }
                }
                button {
                    class: "primary w-full",
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "SAVING..." } else { "CREATE" }
                }
            }
        }
    }
}

#[component]
fn FundsOverlay(goal: Goal, mode: FundsMode, on_close: EventHandler<()>, on_save: EventHandler<Goal>) -> Element {
    let client = use_client();
    let mut amount = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let limit = funds_limit(goal.actual_value, goal.target_value, mode);
    let (title, hint) = match mode {
        FundsMode::Add => ("ADD FUNDS", format!("Remaining to save: {}", format_peso(limit))),
        FundsMode::Reduce => ("WITHDRAW FUNDS", format!("Currently saved: {}", format_peso(limit))),
    };

    let goal_for_submit = goal.clone();
    let handle_submit = move |e: Event<FormData>| {
        e.prevent_default();

        let change = match plan_funds_change(&goal_for_submit, mode, &amount()) {
            Ok(change) => change,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };

        saving.set(true);
        error.set(None);
        let client = client.clone();
        let goal_id = goal_for_submit.goal_id;
        spawn(async move {
            match client.update_goal_funds(goal_id, &change).await {
                Ok(updated) => on_save.call(updated),
                Err(e) => error.set(Some(e.to_string())),
            }
            saving.set(false);
        });
    };

    rsx! {
        Overlay { title: "{title}", on_close: on_close, busy: saving(),
            if let Some(message) = error() {
                div { class: "error-message", "{message}" }
            }
            p { "{goal.name}" }
            div { class: "analytics-label", "{hint}" }
            form { onsubmit: handle_submit,
                div { class: "form-group",
                    label { "AMOUNT" }
                    input {
                        r#type: "number",
                        step: "0.01",
                        min: "0",
                        value: "{amount}",
                        oninput: move |e| amount.set(e.value()),
                    }
                }
                button {
                    class: "primary w-full",
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "SAVING..." } else { "CONFIRM" }
                }
            }
        }
    }
}
