use dioxus::prelude::*;
use jubuddy::buddies::initial;

use crate::hooks::use_store;

#[derive(Clone, Copy, PartialEq)]
pub enum Section {
    Home,
    Transactions,
    VirtualJar,
    Goals,
    Buddies,
    Settings,
}

impl Section {
    /// Sections in the header menu. Settings sits with the profile instead.
    const MENU: [Section; 5] = [
        Section::Home,
        Section::Transactions,
        Section::VirtualJar,
        Section::Goals,
        Section::Buddies,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Home => "HOME",
            Section::Transactions => "MY EXPENSES",
            Section::VirtualJar => "VIRTUAL JAR",
            Section::Goals => "GOALS",
            Section::Buddies => "BUDDIES",
            Section::Settings => "SETTINGS",
        }
    }
}

#[component]
fn ActiveAccountBadge(on_open: EventHandler<()>) -> Element {
    let store = use_store();
    let label = match store.read().active_account() {
        Some(id) => format!("ACCOUNT #{id}"),
        None => "NO ACTIVE ACCOUNT".to_string(),
    };

    rsx! {
        button {
            class: "type-tag account-badge",
            title: "Manage money accounts",
            onclick: move |_| on_open.call(()),
            "{label}"
        }
    }
}

#[component]
fn ProfileArea(
    username: String,
    settings_open: bool,
    on_settings: EventHandler<()>,
    on_logout: EventHandler<()>,
) -> Element {
    let avatar = initial(&username);

    rsx! {
        div { class: "user-area",
            ActiveAccountBadge { on_open: on_settings }
            button {
                class: if settings_open { "nav-item active" } else { "nav-item" },
                onclick: move |_| on_settings.call(()),
                "{Section::Settings.label()}"
            }
            div { class: "profile-icon", title: "{username}", "{avatar}" }
            button { class: "btn-text", onclick: move |_| on_logout.call(()), "LOGOUT" }
        }
    }
}

#[component]
pub fn Shell(
    username: String,
    current_section: Section,
    on_section_change: EventHandler<Section>,
    on_logout: EventHandler<()>,
    children: Element,
) -> Element {
    rsx! {
        div { id: "main",
            header { class: "top-strip",
                div { class: "app-name", "JUBUDDY" }
                nav { class: "section-switcher",
                    for section in Section::MENU {
                        button {
                            class: if section == current_section { "nav-item active" } else { "nav-item" },
                            onclick: move |_| on_section_change.call(section),
                            "{section.label()}"
                        }
                    }
                }
                ProfileArea {
                    username: username,
                    settings_open: current_section == Section::Settings,
                    on_settings: move |_| on_section_change.call(Section::Settings),
                    on_logout: on_logout,
                }
            }
            main { class: "content container",
                {children}
            }
        }
    }
}
