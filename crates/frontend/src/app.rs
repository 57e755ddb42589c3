use crate::config::AppConfig;
use crate::domain::a001_document_analysis::ui::details::{ResultsPanel, UploadPanel};
use crate::domain::a002_document_chat::ui::details::ChatPanel;
use crate::session::{AppSession, HttpAnalysisApi};
use crate::shared::alert::AlertHost;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::load();
    let alert_duration_ms = config.alert_duration_ms;
    let session = AppSession::new(HttpAnalysisApi::new(config.api_base.clone()), config);

    view! {
        <main class="document-assistant">
            <header class="document-assistant__header">
                <h1>"Document Assistant"</h1>
                <p>"Upload a scan, PDF or Word document to extract its text and get an AI analysis."</p>
            </header>

            <AlertHost alerts=session.alerts() duration_ms=alert_duration_ms />
            <UploadPanel session=session />
            <ResultsPanel vm=session.analysis() />
            <ChatPanel session=session />
        </main>
    }
}
