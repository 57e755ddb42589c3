//! Document Analysis - Upload Panel

use crate::session::AppSession;
use crate::shared::icons::icon;
use crate::shared::processing_gate::Operation;
use contracts::domain::a001_document_analysis::aggregate::accept_attribute;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

#[component]
#[allow(non_snake_case)]
pub fn UploadPanel(session: AppSession) -> impl IntoView {
    let vm = session.analysis();
    let file_input_ref = NodeRef::<leptos::html::Input>::new();
    let is_uploading = Signal::derive(move || session.is_busy(Operation::Upload));

    // Selection cleared (rejected file, finished upload) -> reset the native picker
    Effect::new(move |_| {
        if vm.selected_file_name.get().is_none() {
            if let Some(input) = file_input_ref.get() {
                input.set_value("");
            }
        }
    });

    let handle_file_change = move |ev: web_sys::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        session.select_file(file);
    };

    let handle_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        vm.drag_active.set(false);

        let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) else {
            return;
        };
        let Some(file) = files.get(0) else {
            return;
        };
        if session.select_file(Some(file)) {
            // mirror the drop into the picker so the form state matches
            if let Some(input) = file_input_ref.get() {
                input.set_files(Some(&files));
            }
        }
    };

    let handle_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        session.spawn_upload();
    };

    view! {
        <section class="upload-panel">
            <form id="upload-form" class="upload-panel__form" on:submit=handle_submit>
                <label
                    for="file-input"
                    class=move || {
                        if vm.drag_active.get() {
                            "upload-panel__dropzone upload-panel__dropzone--active"
                        } else {
                            "upload-panel__dropzone"
                        }
                    }
                    on:dragover=move |ev: web_sys::DragEvent| {
                        ev.prevent_default();
                        vm.drag_active.set(true);
                    }
                    on:dragleave=move |_| vm.drag_active.set(false)
                    on:drop=handle_drop
                >
                    {icon("upload")}
                    <span class="upload-panel__hint">
                        {move || match vm.selected_file_name.get() {
                            Some(name) => view! {
                                <span class="upload-panel__filename">
                                    {icon("file")}
                                    " "
                                    <strong>{name}</strong>
                                </span>
                            }.into_any(),
                            None => view! {
                                <span>"Drop a document here or click to choose (PNG, JPG, PDF, DOCX, up to 10MB)"</span>
                            }.into_any(),
                        }}
                    </span>
                    <input
                        node_ref=file_input_ref
                        id="file-input"
                        type="file"
                        accept=accept_attribute()
                        class="hidden"
                        on:change=handle_file_change
                    />
                </label>

                <div class="upload-panel__actions">
                    // submits the form; `handle_submit` is the only upload trigger
                    <Button
                        appearance=ButtonAppearance::Primary
                        button_type=ButtonType::Submit
                        disabled=is_uploading
                        attr:id="upload-button"
                    >
                        {icon("upload")}
                        " Analyze"
                    </Button>

                    <Show when=move || is_uploading.get()>
                        <div id="loading" class="upload-panel__loading">
                            <Spinner size=SpinnerSize::Small />
                            <span>"Extracting text and analysing..."</span>
                        </div>
                    </Show>
                </div>
            </form>
        </section>
    }
}
