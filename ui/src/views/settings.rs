use dioxus::prelude::*;
use dioxus::logger::tracing;
use jubuddy::accounts::{active_after_delete, creatable_types, resolve_active, total_balance};
use jubuddy::models::{
    Account, AccountType, CreateAccountPayload, DeleteAccountPayload, SetActiveAccountPayload, UserId,
};
use jubuddy::utils::format_peso;
use jubuddy::{ApiClient, ApiResult};

use crate::components::ErrorBanner;
use crate::hooks::{use_client, use_request_tracker, use_store};

async fn load_accounts(client: &ApiClient, user_id: UserId) -> ApiResult<(Vec<Account>, Option<i64>)> {
    Ok((
        client.get_accounts(user_id).await?,
        client.get_active_account(user_id).await?,
    ))
}

#[component]
pub fn SettingsView(user_id: UserId, username: String, on_logout: EventHandler<()>) -> Element {
    let client = use_client();
    let tracker = use_request_tracker();
    let mut store = use_store();

    let mut accounts = use_signal(Vec::<Account>::new);
    let mut loading = use_signal(|| true);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut new_type = use_signal(|| None::<AccountType>);

    let fetch = use_callback(move |_: ()| {
        let ticket = tracker.begin();
        let client = client.clone();
        spawn(async move {
            loading.set(true);
            error.set(None);
            let result = load_accounts(&client, user_id).await;
            let Some(result) = ticket.accept(result) else {
                return;
            };
            match result {
                Ok((list, server_active)) => {
                    let active = resolve_active(&list, server_active).map(|a| a.account_id);
                    store.write().set_active_account(active);
                    accounts.set(list);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    });

    use_effect(move || fetch.call(()));

    let activate_client = use_client();
    let activate = use_callback(move |account_id: i64| {
        let client = activate_client.clone();
        busy.set(true);
        spawn(async move {
            let payload = SetActiveAccountPayload { user_id, account_id };
            match client.set_active_account(&payload).await {
                Ok(_) => {
                    store.write().set_active_account(Some(account_id));
                    fetch.call(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            busy.set(false);
        });
    });

    let create_client = use_client();
    let create = use_callback(move |account_type: AccountType| {
        let client = create_client.clone();
        busy.set(true);
        spawn(async move {
            let payload = CreateAccountPayload { user_id, account_type };
            match client.create_account(&payload).await {
                Ok(_) => {
                    new_type.set(None);
                    fetch.call(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            busy.set(false);
        });
    });

    let delete_client = use_client();
    let delete = use_callback(move |account_id: i64| {
        let client = delete_client.clone();
        let next_active = active_after_delete(&accounts.read(), account_id, store.read().active_account());
        busy.set(true);
        spawn(async move {
            if let Err(e) = client.delete_account(&DeleteAccountPayload { account_id }).await {
                error.set(Some(e.to_string()));
                busy.set(false);
                return;
            }
            if let Some(next) = next_active {
                let payload = SetActiveAccountPayload { user_id, account_id: next };
                if let Err(e) = client.set_active_account(&payload).await {
                    tracing::warn!("Active account not moved to {}: {}", next, e);
                }
            }
            busy.set(false);
            fetch.call(());
        });
    });

    let list = accounts();
    let active_id = store.read().active_account();
    let available = creatable_types(&list);

    rsx! {
        div { class: "content-header",
            h1 { "SETTINGS" }
        }

        if let Some(message) = error() {
            ErrorBanner { message: message, on_retry: move |_| fetch.call(()) }
        }

        div { class: "settings-block",
            h2 { "ACCOUNT" }

            div { class: "settings-item",
                span { "USERNAME" }
                span { class: "font-mono", "{username}" }
            }

            div { class: "settings-item",
                span { "SESSION" }
                button { onclick: move |_| on_logout.call(()), "LOGOUT" }
            }
        }

        div { class: "settings-block mt-2",
            h2 { "MONEY ACCOUNTS" }

            if loading() {
                div { class: "loading", "LOADING..." }
            } else if list.is_empty() {
                div { class: "empty-state", "NO ACCOUNTS" }
            } else {
                for account in list.iter() {
                    {
                        let id = account.account_id;
                        let is_active = active_id == Some(id);
                        rsx! {
                            div { class: "settings-item", key: "{id}",
                                span { "{account.account_type.label()}" }
                                span { class: "font-mono", "{format_peso(account.balance)}" }
                                if is_active {
                                    span { class: "type-tag", "ACTIVE" }
                                } else {
                                    button { disabled: busy(), onclick: move |_| activate.call(id), "USE" }
                                }
                                button { class: "btn-text", disabled: busy(), onclick: move |_| delete.call(id), "DELETE" }
                            }
                        }
                    }
                }
                div { class: "settings-item",
                    span { "TOTAL" }
                    span { class: "font-mono", "{format_peso(total_balance(&list))}" }
                }
            }

            if !available.is_empty() {
                div { class: "settings-item",
                    span { "ADD ACCOUNT" }
                    select {
                        onchange: move |e| {
                            new_type.set(AccountType::all().iter().copied().find(|t| t.label() == e.value()));
                        },
                        option { value: "", "SELECT..." }
                        for account_type in available.iter() {
                            option { value: "{account_type.label()}", "{account_type.label()}" }
                        }
                    }
                    button {
                        disabled: busy() || new_type().is_none(),
                        onclick: move |_| {
                            if let Some(account_type) = new_type() {
                                create.call(account_type);
                            }
                        },
                        "CREATE"
                    }
                }
            }
        }
    }
}
