use dioxus::prelude::*;
use jubuddy::accounts::{resolve_active, total_balance};
use jubuddy::dashboard::{category_label, expense_by_category, latest_expense, share_of_max, summarize};
use jubuddy::goals::pinned_goals;
use jubuddy::models::{Account, Goal, Transaction, UserId};
use jubuddy::utils::{format_date_long, format_peso, today_local};
use jubuddy::{ApiClient, ApiResult};

use crate::components::{ErrorBanner, StatisticsChart};
use crate::hooks::{use_client, use_request_tracker, use_store};

struct HomeData {
    transactions: Vec<Transaction>,
    goals: Vec<Goal>,
    accounts: Vec<Account>,
    active_account: Option<i64>,
}

async fn load_home(client: &ApiClient, user_id: UserId) -> ApiResult<HomeData> {
    Ok(HomeData {
        transactions: client.get_transactions(user_id).await?,
        goals: client.get_goals(user_id).await?,
        accounts: client.get_accounts(user_id).await?,
        active_account: client.get_active_account(user_id).await?,
    })
}

pub fn days_left_label(days: i64) -> String {
    match days {
        d if d < 0 => "OVERDUE".to_string(),
        0 => "DUE TODAY".to_string(),
        1 => "1 DAY LEFT".to_string(),
        n => format!("{} DAYS LEFT", n),
    }
}

#[component]
pub fn HomeView(user_id: UserId) -> Element {
    let client = use_client();
    let tracker = use_request_tracker();
    let mut store = use_store();

    let mut transactions = use_signal(Vec::<Transaction>::new);
    let mut goals = use_signal(Vec::<Goal>::new);
    let mut accounts = use_signal(Vec::<Account>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);

    let fetch = use_callback(move |_: ()| {
        let ticket = tracker.begin();
        let client = client.clone();
        spawn(async move {
            loading.set(true);
            error.set(None);
            let result = load_home(&client, user_id).await;
            let Some(result) = ticket.accept(result) else {
                return;
            };
            match result {
                Ok(data) => {
                    let active = resolve_active(&data.accounts, data.active_account).map(|a| a.account_id);
                    store.write().set_active_account(active);
                    transactions.set(data.transactions);
                    goals.set(data.goals);
                    accounts.set(data.accounts);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    });

    use_effect(move || fetch.call(()));

    if loading() {
        return rsx! { div { class: "loading", "LOADING..." } };
    }

    let today = today_local();
    let tx_list = transactions();
    let goal_list = goals();
    let account_list = accounts();

    let summary = summarize(&tx_list);
    let active_id = store.read().active_account();
    let active = account_list.iter().find(|a| Some(a.account_id) == active_id);
    let latest = latest_expense(&tx_list);
    let categories = expense_by_category(&tx_list);
    let upcoming = pinned_goals(&goal_list, today);

    rsx! {
        div { class: "content-header",
            h1 { "HOME" }
        }

        if let Some(message) = error() {
            ErrorBanner { message: message, on_retry: move |_| fetch.call(()) }
        }

        div { class: "dashboard-grid",
            div { class: "dashboard-block balance-card",
                h2 { "BALANCE" }
                div { class: "analytics-value", "{format_peso(total_balance(&account_list))}" }
                if let Some(account) = active {
                    div { class: "analytics-label",
                        "ACTIVE: {account.account_type.label()} {format_peso(account.balance)}"
                    }
                }
                div { class: "analytics-item",
                    div { class: "analytics-label", "INCOME" }
                    div { class: "analytics-value income", "{format_peso(summary.income)}" }
                }
                div { class: "analytics-item",
                    div { class: "analytics-label", "EXPENSES" }
                    div { class: "analytics-value expense", "{format_peso(summary.expense)}" }
                }
                div { class: "analytics-item",
                    div { class: "analytics-label", "NET" }
                    div { class: "analytics-value", "{format_peso(summary.net())}" }
                }
            }

            div { class: "dashboard-block",
                h2 { "LATEST EXPENSE" }
                match latest {
                    Some(tx) => rsx! {
                        div { class: "analytics-value expense", "{format_peso(tx.amount)}" }
                        div { class: "analytics-label",
                            "{category_label(&tx.category)} · {format_date_long(&tx.date)}"
                        }
                        if !tx.description.is_empty() {
                            div { class: "analytics-label", "{tx.description}" }
                        }
                    },
                    None => rsx! { div { class: "empty-state", "NO EXPENSES YET" } },
                }
            }

            div { class: "dashboard-block",
                h2 { "UPCOMING GOALS" }
                if upcoming.is_empty() {
                    div { class: "empty-state", "NO ACTIVE GOALS" }
                } else {
                    for entry in upcoming.iter() {
                        div { class: "goal-row", key: "{entry.goal.goal_id}",
                            span { class: "name", "{entry.goal.name}" }
                            span { class: "days-left", "{days_left_label(entry.days_left)}" }
                            span { class: "amount",
                                "{format_peso(entry.goal.actual_value)} / {format_peso(entry.goal.target_value)}"
                            }
                        }
                    }
                }
            }

            div { class: "dashboard-block",
                h2 { "EXPENSE BY CATEGORY" }
                if categories.is_empty() {
                    div { class: "empty-state", "NO EXPENSES" }
                } else {
                    div { class: "bar-chart",
                        for row in categories.iter() {
                            div { class: "bar-row", key: "{row.key}",
                                span { class: "bar-label", "{row.label}" }
                                div { class: "bar-track",
                                    div { class: "bar-fill", style: "width: {share_of_max(row.total, &categories)}%" }
                                }
                                span { class: "bar-value", "{format_peso(row.total)}" }
                            }
                        }
                    }
                }
            }
        }

        StatisticsChart { transactions: tx_list.clone() }
    }
}
