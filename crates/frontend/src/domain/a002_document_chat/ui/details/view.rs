//! Document Chat - View Component

use super::view_model::{entry_dom_id, EntryBody, TranscriptEntry};
use crate::session::AppSession;
use crate::shared::icons::icon;
use crate::shared::processing_gate::Operation;
use contracts::domain::a002_document_chat::aggregate::ChatRole;
use leptos::prelude::*;
use thaw::*;
use uuid::Uuid;

fn scroll_entry_into_view(id: Uuid) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(&entry_dom_id(id)))
    else {
        log::debug!("chat entry {} not in the DOM yet", id);
        return;
    };
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

fn render_entry(entry: TranscriptEntry) -> impl IntoView {
    let dom_id = entry.dom_id();
    let class = format!("chat-message chat-message--{}", entry.role.as_str());
    let (icon_name, author) = match entry.role {
        ChatRole::User => ("user", " Question"),
        ChatRole::Assistant => ("robot", " AI answer"),
    };
    let body = match entry.body {
        EntryBody::Text(text) => view! { <p class="chat-message__text">{text}</p> }.into_any(),
        EntryBody::Html(html) => view! {
            <div class="chat-message__text markdown-body" inner_html=html></div>
        }
        .into_any(),
    };
    view! {
        <div id=dom_id class=class>
            <p class="chat-message__author">{icon(icon_name)}{author}</p>
            {body}
        </div>
    }
}

/// Enter sends, unless it only commits an IME composition.
fn is_send_key(key: &str, is_composing: bool) -> bool {
    key == "Enter" && !is_composing
}

#[component]
#[allow(non_snake_case)]
pub fn ChatPanel(session: AppSession) -> impl IntoView {
    let vm = session.chat();
    let is_sending = Signal::derive(move || session.is_busy(Operation::Question));

    // Bring the newest answer into view once it is in the DOM
    Effect::new(move |_| {
        if let Some(id) = vm.scroll_target.get() {
            request_animation_frame(move || scroll_entry_into_view(id));
        }
    });

    view! {
        <section class="chat-panel">
            <h3 class="chat-panel__title">"Ask about the document"</h3>

            <div id="chat-history" class="chat-panel__history">
                <For
                    each=move || vm.transcript.get()
                    key=|entry| entry.id
                    let:entry
                >
                    {render_entry(entry)}
                </For>
            </div>

            <Flex style="gap: 8px; align-items: center;">
                <div style="flex: 1;">
                    <Input
                        value=vm.question
                        placeholder="Type a question and press Enter"
                        attr:id="question-input"
                        attr:style="width: 100%;"
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if is_send_key(&ev.key(), ev.is_composing())
                                && session.can_begin(Operation::Question)
                            {
                                ev.prevent_default();
                                session.spawn_question();
                            }
                        }
                    />
                </div>

                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=is_sending
                    attr:id="question-button"
                    on_click=move |_| session.spawn_question()
                >
                    {icon("send")}
                    {move || if is_sending.get() { " Sending..." } else { " Ask" }}
                </Button>
            </Flex>
        </section>
    }
}
