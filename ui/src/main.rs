mod components;
mod hooks;
mod storage;
mod views;

use dioxus::logger::tracing;
use dioxus::prelude::*;
use jubuddy::constants::{ENV_API_BASE, ENV_STORAGE_PREFIX};
use jubuddy::{ApiClient, AppStore, Config};

use components::{Section, Shell};
use hooks::Store;
use storage::BrowserStorage;
use views::{BuddiesView, GoalsView, HomeView, JarView, LoginScreen, SettingsView, TransactionsView};

fn main() {
    dioxus::launch(App);
}

/// Configuration baked in at build time.
fn build_config() -> Config {
    Config::from_lookup(|key| match key {
        ENV_API_BASE => option_env!("JUBUDDY_API_BASE").map(String::from),
        ENV_STORAGE_PREFIX => option_env!("JUBUDDY_STORAGE_PREFIX").map(String::from),
        _ => None,
    })
    .unwrap_or_else(|e| {
        tracing::warn!("Invalid build configuration, using defaults: {}", e);
        Config::default()
    })
}

#[allow(non_snake_case)]
fn App() -> Element {
    let config = use_hook(build_config);
    use_context_provider({
        let config = config.clone();
        move || ApiClient::new(config)
    });
    let mut store: Store = use_context_provider(move || {
        let mut store = AppStore::open(BrowserStorage::open(), &config);
        store.subscribe(|event| tracing::debug!("Store event: {:?}", event));
        Signal::new(store)
    });
    let mut current_section = use_signal(|| Section::Home);

    let handle_logout = move |_: ()| {
        if let Err(e) = store.write().sign_out() {
            tracing::warn!("Sign out did not clear storage: {}", e);
        }
        current_section.set(Section::Home);
    };

    let handle_section_change = move |section: Section| {
        current_section.set(section);
    };

    // Show the sign-in form until a session exists
    let Some(user) = store.read().session().cloned() else {
        return rsx! {
            LoginScreen {}
        };
    };
    let user_id = user.id;

    rsx! {
        Shell {
            username: user.username.clone(),
            current_section: current_section(),
            on_section_change: handle_section_change,
            on_logout: handle_logout,

            match current_section() {
                Section::Home => rsx! {
                    HomeView { user_id: user_id }
                },
                Section::Transactions => rsx! {
                    TransactionsView { user_id: user_id }
                },
                Section::Goals => rsx! {
                    GoalsView { user_id: user_id }
                },
                Section::VirtualJar => rsx! {
                    JarView { user_id: user_id }
                },
                Section::Buddies => rsx! {
                    BuddiesView { user_id: user_id, username: user.username.clone() }
                },
                Section::Settings => rsx! {
                    SettingsView {
                        user_id: user_id,
                        username: user.username.clone(),
                        on_logout: handle_logout
                    }
                },
            }
        }
    }
}
