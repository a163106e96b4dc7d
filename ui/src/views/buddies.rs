use dioxus::prelude::*;
use jubuddy::buddies::{initial, monthly_net, remove_invitation, search_candidates, validate_invite};
use jubuddy::models::{Buddy, BuddyInvitation, InvitationActionPayload, InviteBuddyPayload, UserId, UserSummary};
use jubuddy::utils::{format_date_long, format_peso};
use jubuddy::{ApiClient, ApiResult};

use crate::components::{ErrorBanner, Overlay};
use crate::hooks::{use_client, use_request_tracker};

async fn load_buddies(client: &ApiClient, user_id: UserId) -> ApiResult<(Vec<Buddy>, Vec<BuddyInvitation>)> {
    Ok((
        client.get_buddies(user_id).await?,
        client.get_invitations(user_id).await?,
    ))
}

#[component]
pub fn BuddiesView(user_id: UserId, username: String) -> Element {
    let client = use_client();
    let tracker = use_request_tracker();

    let mut buddies = use_signal(Vec::<Buddy>::new);
    let mut invitations = use_signal(Vec::<BuddyInvitation>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);
    let mut show_invite = use_signal(|| false);

    let fetch = use_callback(move |_: ()| {
        let ticket = tracker.begin();
        let client = client.clone();
        spawn(async move {
            loading.set(true);
            error.set(None);
            let result = load_buddies(&client, user_id).await;
            let Some(result) = ticket.accept(result) else {
                return;
            };
            match result {
                Ok((list, pending)) => {
                    buddies.set(list);
                    invitations.set(pending);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    });

    use_effect(move || fetch.call(()));

    let respond_client = use_client();
    let respond = use_callback(move |(request_id, accept): (i64, bool)| {
        let client = respond_client.clone();
        spawn(async move {
            let payload = InvitationActionPayload { user_id, request_id };
            let result = if accept {
                client.accept_invitation(&payload).await
            } else {
                client.decline_invitation(&payload).await
            };
            match result {
                Ok(_) => {
                    remove_invitation(&mut invitations.write(), request_id);
                    if accept {
                        fetch.call(());
                    }
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    });

    rsx! {
        div { class: "content-header",
            h1 { "BUDDIES" }
            button { onclick: move |_| show_invite.set(true), "INVITE" }
        }

        if let Some(message) = error() {
            ErrorBanner { message: message, on_retry: move |_| fetch.call(()) }
        }

        if !invitations().is_empty() {
            div { class: "dashboard-block",
                h2 { "INVITATIONS" }
                for invitation in invitations() {
                    {
                        let request_id = invitation.request_id;
                        rsx! {
                            div { class: "invitation-row", key: "{request_id}",
                                span { class: "avatar", "{initial(&invitation.sender_name)}" }
                                span { class: "name", "{invitation.sender_name}" }
                                span { class: "date", "{format_date_long(&invitation.date_sent)}" }
                                button { onclick: move |_| respond.call((request_id, true)), "ACCEPT" }
                                button { class: "btn-text", onclick: move |_| respond.call((request_id, false)), "DECLINE" }
                            }
                        }
                    }
                }
            }
        }

        if loading() {
            div { class: "loading", "LOADING..." }
        } else if buddies().is_empty() {
            div { class: "empty-state", "NO BUDDIES YET" }
        } else {
            div { class: "dashboard-grid",
                for buddy in buddies() {
                    div { class: "dashboard-block buddy-card", key: "{buddy.buddy_id}",
                        div { class: "flex gap-2 items-center",
                            span { class: "avatar", "{initial(&buddy.buddy_name)}" }
                            h2 { "{buddy.buddy_name}" }
                        }
                        div { class: "analytics-label", "BUDDIES SINCE {format_date_long(&buddy.connection_date)}" }
                        div { class: "analytics-item",
                            div { class: "analytics-label", "BALANCE" }
                            div { class: "analytics-value", "{format_peso(buddy.balance)}" }
                        }
                        div { class: "analytics-item",
                            div { class: "analytics-label", "THIS MONTH" }
                            div { class: "analytics-value",
                                "+{format_peso(buddy.monthly_income)} / -{format_peso(buddy.monthly_expense)}"
                            }
                        }
                        div { class: "analytics-item",
                            div { class: "analytics-label", "NET" }
                            div {
                                class: if monthly_net(&buddy) >= 0.0 { "analytics-value income" } else { "analytics-value expense" },
                                "{format_peso(monthly_net(&buddy))}"
                            }
                        }
                    }
                }
            }
        }

        if show_invite() {
            InviteOverlay {
                user_id: user_id,
                username: username.clone(),
                on_close: move |_| show_invite.set(false),
            }
        }
    }
}

#[component]
fn InviteOverlay(user_id: UserId, username: String, on_close: EventHandler<()>) -> Element {
    let client = use_client();
    let tracker = use_request_tracker();
    let mut term = use_signal(String::new);
    let mut results = use_signal(Vec::<UserSummary>::new);
    let mut error = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<String>);
    let mut sending = use_signal(|| false);

    let search_client = client.clone();
    let run_search = use_callback(move |value: String| {
        term.set(value.clone());
        if value.trim().is_empty() {
            tracker.cancel_all();
            results.set(Vec::new());
            return;
        }
        let ticket = tracker.begin();
        let client = search_client.clone();
        spawn(async move {
            let result = client.search_users(user_id, &value).await;
            let Some(result) = ticket.accept(result) else {
                return;
            };
            match result {
                Ok(users) => results.set(users),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    });

    let invite = use_callback(move |candidate: String| {
        let target = match validate_invite(&candidate, &username) {
            Ok(target) => target,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        sending.set(true);
        error.set(None);
        let client = client.clone();
        spawn(async move {
            let payload = InviteBuddyPayload { user_id, username: target.clone() };
            match client.invite_buddy(&payload).await {
                Ok(response) => notice.set(Some(
                    response.message.unwrap_or_else(|| format!("Invitation sent to {}", target)),
                )),
                Err(e) => error.set(Some(e.to_string())),
            }
            sending.set(false);
        });
    });

    let found = results();
    let candidates = search_candidates(&found, &term());

    rsx! {
        Overlay { title: "INVITE A BUDDY", on_close: on_close, busy: sending(),
            if let Some(message) = error() {
                div { class: "error-message", "{message}" }
            }
            if let Some(message) = notice() {
                div { class: "notice", "{message}" }
            }
            div { class: "form-group",
                label { "SEARCH USERS" }
                input {
                    r#type: "text",
                    placeholder: "Name or username",
                    value: "{term}",
                    oninput: move |e| run_search.call(e.value()),
                }
            }
            div { class: "user-results",
                for user in candidates {
                    {
                        let candidate = user.username.clone();
                        rsx! {
                            div { class: "user-row", key: "{user.username}",
                                span { class: "name", "{user.first_name} {user.last_name}" }
                                span { class: "font-mono", "@{user.username}" }
                                button {
                                    disabled: sending(),
                                    onclick: move |_| invite.call(candidate.clone()),
                                    "INVITE"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
