use super::view_model::DocumentAnalysisVm;
use leptos::prelude::*;

/// Extracted text on the left, rendered analysis on the right. Hidden until the first result.
#[component]
#[allow(non_snake_case)]
pub fn ResultsPanel(vm: DocumentAnalysisVm) -> impl IntoView {
    view! {
        <Show when=move || vm.result.with(|r| r.is_some())>
            <section id="results" class="results-panel">
                <div class="results-panel__column">
                    <h3 class="results-panel__title">"Extracted text"</h3>
                    <pre id="original-text" class="results-panel__text">
                        {move || vm.result.with(|r| r.as_ref().map(|r| r.original_text.clone()).unwrap_or_default())}
                    </pre>
                </div>
                <div class="results-panel__column">
                    <h3 class="results-panel__title">"AI analysis"</h3>
                    <div
                        id="ai-analysis"
                        class="markdown-body"
                        inner_html=move || vm.result.with(|r| r.as_ref().map(|r| r.analysis_html.clone()).unwrap_or_default())
                    ></div>
                </div>
            </section>
        </Show>
    }
}
