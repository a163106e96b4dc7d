use dioxus::prelude::*;
use dioxus::logger::tracing;
use jubuddy::models::LoginPayload;

use crate::hooks::{use_client, use_store};

#[component]
pub fn LoginScreen() -> Element {
    let client = use_client();
    let mut store = use_store();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut loading = use_signal(|| false);

    let handle_submit = move |e: Event<FormData>| {
        e.prevent_default();
        e.stop_propagation();

        let username_val = username().trim().to_string();
        let password_val = password();

        if username_val.is_empty() || password_val.is_empty() {
            error.set(Some("Please fill in all fields".to_string()));
            return;
        }

        loading.set(true);
        error.set(None);

        let client = client.clone();
        spawn(async move {
            let result = client
                .login(&LoginPayload {
                    username: username_val,
                    password: password_val,
                })
                .await;

            loading.set(false);

            match result {
                Ok(user) => {
                    if let Err(e) = store.write().sign_in(user) {
                        tracing::warn!("Session not saved: {}", e);
                        error.set(Some(e.to_string()));
                    }
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    rsx! {
        div { class: "auth-container",
            div { class: "auth-block",
                h1 { "LOGIN" }

                if let Some(err) = error() {
                    div { class: "error-message", "{err}" }
                }

                form {
                    onsubmit: handle_submit,

                    div { class: "form-group",
                        label { "USERNAME" }
                        input {
                            r#type: "text",
                            value: "{username}",
                            oninput: move |e| username.set(e.value()),
                            disabled: loading(),
                        }
                    }

                    div { class: "form-group",
                        label { "PASSWORD" }
                        input {
                            r#type: "password",
                            value: "{password}",
                            oninput: move |e| password.set(e.value()),
                            disabled: loading(),
                        }
                    }

                    button {
                        class: "primary w-full",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "SIGNING IN..." } else { "LOGIN" }
                    }
                }
            }
        }
    }
}
