use dioxus::prelude::*;
use dioxus::logger::tracing;
use jubuddy::jar::{active_items, can_delete, can_purchase, history_items, jar_total, priority_items, validate_new_item};
use jubuddy::models::{JarItem, JarItemActionPayload, UserId};
use jubuddy::utils::{format_date_long, format_peso};

use crate::components::{ErrorBanner, Overlay};
use crate::hooks::{use_client, use_request_tracker, use_store};

#[component]
pub fn JarView(user_id: UserId) -> Element {
    let client = use_client();
    let tracker = use_request_tracker();
    let mut store = use_store();

    let mut items = use_signal(Vec::<JarItem>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);
    let mut search = use_signal(String::new);
    let mut show_history = use_signal(|| false);
    let mut show_create = use_signal(|| false);

    let fetch = use_callback(move |_: ()| {
        let ticket = tracker.begin();
        let client = client.clone();
        spawn(async move {
            loading.set(true);
            error.set(None);
            let result = client.get_jar_items(user_id).await;
            let Some(result) = ticket.accept(result) else {
                return;
            };
            match result {
                Ok(mut list) => {
                    store.read().annotate(&mut list);
                    items.set(list);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    });

    use_effect(move || fetch.call(()));

    let toggle_pin = use_callback(move |item_id: i64| {
        let result = store.write().toggle_pin(item_id);
        match result {
            Ok(_) => store.read().annotate(&mut items.write()),
            Err(e) => {
                tracing::warn!("Pin not saved: {}", e);
                error.set(Some(e.to_string()));
            }
        }
    });

    let action_client = use_client();
    let purchase = use_callback(move |item: JarItem| {
        if let Err(e) = can_purchase(&item) {
            error.set(Some(e.to_string()));
            return;
        }
        let client = action_client.clone();
        spawn(async move {
            let payload = JarItemActionPayload { user_id, item_id: item.id };
            match client.purchase_jar_item(&payload).await {
                Ok(_) => fetch.call(()),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    });

    let delete_client = use_client();
    let delete = use_callback(move |item_id: i64| {
        let client = delete_client.clone();
        spawn(async move {
            let payload = JarItemActionPayload { user_id, item_id };
            match client.delete_jar_item(&payload).await {
                Ok(_) => {
                    if let Err(e) = store.write().forget_item(item_id) {
                        tracing::warn!("Pin of deleted item {} not cleared: {}", item_id, e);
                    }
                    fetch.call(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    });

    let all = items();
    let pins = store.read().pins().clone();
    let priority: Vec<JarItem> = priority_items(&all, &pins).into_iter().cloned().collect();
    let priority_total = jar_total(&priority.iter().collect::<Vec<_>>());
    let shown: Vec<JarItem> = if show_history() {
        history_items(&all).into_iter().cloned().collect()
    } else {
        active_items(&all, &search()).into_iter().cloned().collect()
    };

    rsx! {
        div { class: "content-header",
            h1 { "VIRTUAL JAR" }
            button { onclick: move |_| show_create.set(true), "ADD ITEM" }
        }

        if let Some(message) = error() {
            ErrorBanner { message: message, on_retry: move |_| fetch.call(()) }
        }

        div { class: "dashboard-block",
            h2 { "PRIORITY" }
            if priority.is_empty() {
                div { class: "empty-state", "PIN ITEMS TO TRACK THEM HERE" }
            } else {
                for item in priority.iter() {
                    div { class: "jar-row", key: "priority-{item.id}",
                        span { class: "name", "{item.name}" }
                        span { class: "amount", "{format_peso(item.cost)}" }
                    }
                }
                div { class: "analytics-label", "TOTAL {format_peso(priority_total)}" }
            }
        }

        div { class: "filters",
            div { class: "section-switcher",
                button {
                    class: if !show_history() { "active" } else { "" },
                    onclick: move |_| show_history.set(false),
                    "ON HOLD"
                }
                button {
                    class: if show_history() { "active" } else { "" },
                    onclick: move |_| show_history.set(true),
                    "HISTORY"
                }
            }
            if !show_history() {
                div { class: "filter-group",
                    label { "SEARCH" }
                    input {
                        r#type: "text",
                        placeholder: "Search items...",
                        value: "{search}",
                        oninput: move |e| search.set(e.value()),
                    }
                }
            }
        }

        if loading() {
            div { class: "loading", "LOADING..." }
        } else if shown.is_empty() {
            div { class: "empty-state", "NOTHING HERE" }
        } else {
            div { class: "jar-list",
                for item in shown {
                    {
                        let id = item.id;
                        let for_purchase = item.clone();
                        let on_hold = can_purchase(&item).is_ok();
                        rsx! {
                            div { class: "jar-row", key: "{id}",
                                span { class: "name", "{item.name}" }
                                span { class: "amount", "{format_peso(item.cost)}" }
                                if let Some(until) = item.hold_until.as_deref() {
                                    span { class: "date", "HOLD UNTIL {format_date_long(until)}" }
                                }
                                if on_hold {
                                    button {
                                        class: if item.is_pinned { "btn-text active" } else { "btn-text" },
                                        onclick: move |_| toggle_pin.call(id),
                                        if item.is_pinned { "UNPIN" } else { "PIN" }
                                    }
                                    button {
                                        onclick: move |_| purchase.call(for_purchase.clone()),
                                        "PURCHASE"
                                    }
                                } else {
                                    span { class: "type-tag", "{item_status_label(&item)}" }
                                }
                                if can_delete(&item) {
                                    button { class: "btn-text", onclick: move |_| delete.call(id), "DELETE" }
                                }
                            }
                        }
                    }
                }
            }
        }

        if show_create() {
            CreateItemOverlay {
                user_id: user_id,
                on_close: move |_| show_create.set(false),
                on_save: move |_: JarItem| {
                    show_create.set(false);
                    fetch.call(());
                }
            }
        }
    }
}

fn item_status_label(item: &JarItem) -> &'static str {
    use jubuddy::models::JarStatus;
    match item.status {
        JarStatus::Purchased => "PURCHASED",
        JarStatus::Expired => "EXPIRED",
        JarStatus::OnHold if item.is_expired => "EXPIRED",
        JarStatus::OnHold => "ON HOLD",
    }
}

#[component]
fn CreateItemOverlay(user_id: UserId, on_close: EventHandler<()>, on_save: EventHandler<JarItem>) -> Element {
    let client = use_client();
    let mut name = use_signal(String::new);
    let mut cost = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let handle_submit = move |e: Event<FormData>| {
        e.prevent_default();

        let payload = match validate_new_item(&name(), &cost(), user_id) {
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
            match client.create_jar_item(&payload).await {
                Ok(item) => on_save.call(item),
                Err(e) => error.set(Some(e.to_string())),
            }
            saving.set(false);
        });
    };

    rsx! {
        Overlay { title: "ADD TO JAR", on_close: on_close, busy: saving(),
            if let Some(message) = error() {
                div { class: "error-message", "{message}" }
            }
            form { onsubmit: handle_submit,
                div { class: "form-group",
                    label { "ITEM" }
                    input { r#type: "text", value: "{name}", oninput: move |e| name.set(e.value()) }
                }
                div { class: "form-group",
                    label { "COST" }
                    input {
                        r#type: "number",
                        step: "0.01",
                        min: "0",
                        value: "{cost}",
                        oninput: move |e| cost.set(e.value()),
                    }
                }
                button {
                    class: "primary w-full",
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "SAVING..." } else { "ADD" }
                }
            }
        }
    }
}
