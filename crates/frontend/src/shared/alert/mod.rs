//! Transient error banner.
//!
//! A new alert replaces the current one. Every alert gets a ticket; the hide timer
//! started for a ticket only clears the banner if that ticket is still showing.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::icons::icon;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub ticket: u64,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct AlertService {
    current: RwSignal<Option<Alert>>,
    next_ticket: StoredValue<u64>,
}

impl AlertService {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            next_ticket: StoredValue::new(1),
        }
    }

    /// Show `message`, replacing whatever is visible. Returns the new ticket.
    pub fn show(&self, message: impl Into<String>) -> u64 {
        let message = message.into();
        let ticket = self.next_ticket.get_value();
        self.next_ticket.set_value(ticket + 1);
        log::warn!("alert #{}: {}", ticket, message);
        self.current.set(Some(Alert { ticket, message }));
        ticket
    }

    /// Hide the banner if `ticket` is still the one showing.
    pub fn dismiss(&self, ticket: u64) {
        let is_current = self
            .current
            .with_untracked(|a| a.as_ref().map(|a| a.ticket) == Some(ticket));
        if is_current {
            self.current.set(None);
        }
    }

    pub fn current(&self) -> Option<Alert> {
        self.current.get()
    }

    pub fn current_untracked(&self) -> Option<Alert> {
        self.current.get_untracked()
    }
}

impl Default for AlertService {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the banner and schedules its auto-hide.
#[component]
pub fn AlertHost(alerts: AlertService, duration_ms: u32) -> impl IntoView {
    Effect::new(move |_| {
        if let Some(alert) = alerts.current() {
            let ticket = alert.ticket;
            spawn_local(async move {
                TimeoutFuture::new(duration_ms).await;
                alerts.dismiss(ticket);
            });
        }
    });

    view! {
        <Show when=move || alerts.current().is_some()>
            <div id="alert" class="alert" role="alert">
                <MessageBar intent=MessageBarIntent::Error>
                    <div style="display: flex; align-items: center; gap: var(--spacing-sm);">
                        {icon("alert")}
                        <span id="alert-message">
                            {move || alerts.current().map(|a| a.message).unwrap_or_default()}
                        </span>
                    </div>
                </MessageBar>
            </div>
        </Show>
    }
}
