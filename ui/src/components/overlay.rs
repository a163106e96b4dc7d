use dioxus::prelude::*;

/// Modal dialog. Clicking the backdrop or CLOSE dismisses it unless `busy`.
#[component]
pub fn Overlay(
    title: String,
    on_close: EventHandler<()>,
    #[props(default)] busy: bool,
    children: Element,
) -> Element {
    let close = move |_: MouseEvent| {
        if !busy {
            on_close.call(())
        }
    };

    rsx! {
        div { class: "overlay", onclick: close,
            div {
                class: "overlay-content",
                onclick: move |e| e.stop_propagation(),
                div { class: "overlay-header",
                    h2 { "{title}" }
                    button { class: "btn-text", disabled: busy, onclick: close, "CLOSE" }
                }
                {children}
            }
        }
    }
}

/// Inline error banner with a retry action.
#[component]
pub fn ErrorBanner(message: String, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div { class: "error-message flex gap-2 items-center",
            span { "{message}" }
            button { class: "btn-text", onclick: move |_| on_retry.call(()), "RETRY" }
        }
    }
}
