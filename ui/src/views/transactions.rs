use dioxus::prelude::*;
use jubuddy::dashboard::{
    HistoryFilter, NewTransactionForm, category_label, filter_history, validate_new_transaction,
};
use jubuddy::models::{Transaction, TransactionKind, UserId};
use jubuddy::utils::{format_date, format_date_long, format_signed_peso, today_local};

use crate::components::{ErrorBanner, Overlay};
use crate::hooks::{use_client, use_request_tracker};

const EXPENSE_CATEGORIES: &[&str] = &["Food", "Transport", "Bills", "Shopping", "Entertainment", "Health", "Other"];
const INCOME_CATEGORIES: &[&str] = &["Salary", "Allowance", "Business", "Gift", "Other"];
const PAYMENT_METHODS: &[&str] = &["Cash", "Credit Card", "Bank Account", "Digital Wallet"];

#[component]
pub fn TransactionsView(user_id: UserId) -> Element {
    let client = use_client();
    let tracker = use_request_tracker();

    let mut transactions = use_signal(Vec::<Transaction>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);
    let mut search = use_signal(String::new);
    let mut filter = use_signal(HistoryFilter::default);
    let mut show_add_overlay = use_signal(|| false);

    let fetch = use_callback(move |_: ()| {
        let ticket = tracker.begin();
        let client = client.clone();
        spawn(async move {
            loading.set(true);
            error.set(None);
            let result = client.get_transactions(user_id).await;
            let Some(result) = ticket.accept(result) else {
                return;
            };
            match result {
                Ok(list) => transactions.set(list),
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    });

    use_effect(move || fetch.call(()));

    let all = transactions();
    let rows = filter_history(&all, &search(), filter());

    rsx! {
        div { class: "content-header",
            h1 { "TRANSACTIONS" }
            button { onclick: move |_| show_add_overlay.set(true), "ADD" }
        }

        div { class: "filters",
            div { class: "filter-group",
                label { "SHOW" }
                div { class: "section-switcher",
                    for choice in HistoryFilter::all() {
                        button {
                            class: if *choice == filter() { "active" } else { "" },
                            onclick: move |_| filter.set(*choice),
                            "{choice.label()}"
                        }
                    }
                }
            }

            div { class: "filter-group",
                label { "SEARCH" }
                input {
                    r#type: "text",
                    placeholder: "Search descriptions...",
                    value: "{search}",
                    oninput: move |e| search.set(e.value()),
                }
            }
        }

        if let Some(message) = error() {
            ErrorBanner { message: message, on_retry: move |_| fetch.call(()) }
        }

        if loading() {
            div { class: "loading", "LOADING..." }
        } else if rows.is_empty() {
            div { class: "empty-state", "NO TRANSACTIONS" }
        } else {
            div { class: "transaction-list",
                for tx in rows.iter() {
                    div { class: "transaction-row", key: "{tx.id}",
                        span { class: "date", "{format_date_long(&tx.date)}" }
                        span { class: "name", "{tx.description}" }
                        span { class: "category", "{category_label(&tx.category)}" }
                        span {
                            class: if tx.is_income() { "amount income" } else { "amount expense" },
                            "{format_signed_peso(tx.amount, tx.kind())}"
                        }
                    }
                }
            }
        }

        if show_add_overlay() {
            AddTransactionOverlay {
                user_id: user_id,
                on_close: move |_| show_add_overlay.set(false),
                on_save: move |_| {
                    show_add_overlay.set(false);
                    fetch.call(());
                }
            }
        }
    }
}

#[component]
fn AddTransactionOverlay(
    user_id: UserId,
    on_close: EventHandler<()>,
    on_save: EventHandler<Transaction>,
) -> Element {
    let client = use_client();
    let mut kind = use_signal(|| TransactionKind::Expense);
    let mut amount = use_signal(String::new);
    let mut category = use_signal(String::new);
    let mut payment_method = use_signal(|| PAYMENT_METHODS[0].to_string());
    let mut date = use_signal(|| format_date(today_local()));
    let mut description = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let categories = match kind() {
        TransactionKind::Income => INCOME_CATEGORIES,
        TransactionKind::Expense => EXPENSE_CATEGORIES,
    };

    let handle_submit = move |e: Event<FormData>| {
        e.prevent_default();

        let form = NewTransactionForm {
            kind: kind(),
            amount: amount(),
            category: category(),
            payment_method: payment_method(),
            date: date(),
            description: description(),
        };
        let payload = match validate_new_transaction(&form, user_id) {
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
            match client.create_transaction(&payload).await {
                Ok(tx) => on_save.call(tx),
                Err(e) => error.set(Some(e.to_string())),
            }
            saving.set(false);
        });
    };

    rsx! {
        Overlay { title: "ADD TRANSACTION", on_close: on_close, busy: saving(),
            if let Some(message) = error() {
                div { class: "error-message", "{message}" }
            }
            form { onsubmit: handle_submit,
                div { class: "form-group",
                    label { "TYPE" }
                    div { class: "section-switcher",
                        for choice in [TransactionKind::Expense, TransactionKind::Income] {
                            button {
                                r#type: "button",
                                class: if choice == kind() { "active" } else { "" },
                                onclick: move |_| {
                                    kind.set(choice);
                                    category.set(String::new());
                                },
                                "{choice.as_str().to_uppercase()}"
                            }
                        }
                    }
                }

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

                div { class: "form-group",
                    label { "CATEGORY" }
                    select {
                        value: "{category}",
                        onchange: move |e| category.set(e.value()),
                        option { value: "", "SELECT..." }
                        for name in categories.iter() {
                            option { value: "{name}", "{name}" }
                        }
                    }
                }

                div { class: "form-group",
                    label {
                        if kind() == TransactionKind::Income { "RECEIVED VIA" } else { "PAID WITH" }
                    }
                    select {
                        value: "{payment_method}",
                        onchange: move |e| payment_method.set(e.value()),
                        for method in PAYMENT_METHODS.iter() {
                            option { value: "{method}", "{method}" }
                        }
                    }
                }

                div { class: "form-group",
                    label { "DATE" }
                    input {
                        r#type: "date",
                        value: "{date}",
                        oninput: move |e| date.set(e.value()),
                    }
                }

                div { class: "form-group",
                    label { "DESCRIPTION" }
                    input {
                        r#type: "text",
                        value: "{description}",
                        oninput: move |e| description.set(e.value()),
                    }
                }

                button {
                    class: "primary w-full",
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "SAVING..." } else { "SAVE" }
                }
            }
        }
    }
}
