use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api::AnalysisApi;
use crate::config::AppConfig;
use crate::domain::a001_document_analysis::ui::details::{AnalysisResult, DocumentAnalysisVm};
use crate::domain::a002_document_chat::ui::details::{DocumentChatVm, TranscriptEntry};
use crate::shared::alert::AlertService;
use crate::shared::markdown::MarkdownRenderer;
use crate::shared::processing_gate::{Operation, ProcessingGate};
use crate::shared::validation::{validate_file, validate_question, SelectedFile, ValidationError};

const UPLOAD_FALLBACK: &str = "An error occurred while uploading the file.";
const QUESTION_FALLBACK: &str = "An error occurred while sending the question.";

/// Mediates between user input, the two endpoints and the view models.
///
/// Every field is an arena handle, so the controller is `Copy` and can be moved
/// into any number of event handlers.
///
/// Operations split in two halves: the synchronous half (gate, validation,
/// optimistic transcript update) runs when called; the request itself is returned
/// as a future. `None` means nothing was started.
pub struct SessionController<A: AnalysisApi> {
    config: StoredValue<AppConfig>,
    renderer: StoredValue<MarkdownRenderer>,
    api: StoredValue<Rc<A>, LocalStorage>,
    selection: StoredValue<Option<A::File>, LocalStorage>,
    gate: ProcessingGate,
    alerts: AlertService,
    analysis: DocumentAnalysisVm,
    chat: DocumentChatVm,
}

impl<A: AnalysisApi> Clone for SessionController<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: AnalysisApi> Copy for SessionController<A> {}

impl<A: AnalysisApi> SessionController<A> {
    pub fn new(api: A, config: AppConfig) -> Self {
        log::debug!(
            "session: lock scope {:?}, upload limit {} bytes",
            config.lock_scope,
            config.max_upload_bytes
        );
        Self {
            renderer: StoredValue::new(MarkdownRenderer::new(config.markdown)),
            gate: ProcessingGate::new(config.lock_scope),
            config: StoredValue::new(config),
            api: StoredValue::new_local(Rc::new(api)),
            selection: StoredValue::new_local(None),
            alerts: AlertService::new(),
            analysis: DocumentAnalysisVm::new(),
            chat: DocumentChatVm::new(),
        }
    }

    pub fn alerts(&self) -> AlertService {
        self.alerts
    }

    pub fn analysis(&self) -> DocumentAnalysisVm {
        self.analysis
    }

    pub fn chat(&self) -> DocumentChatVm {
        self.chat
    }

    /// Reactive: `op` is in flight (drives spinners and disabled buttons).
    pub fn is_busy(&self, op: Operation) -> bool {
        self.gate.is_active(op)
    }

    /// Untracked: whether `op` would be accepted right now.
    pub fn can_begin(&self, op: Operation) -> bool {
        self.gate.can_begin(op)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// The only way to change the selected file. Used by the picker, drag-and-drop
    /// and programmatic selection alike. Returns whether a file is now selected.
    pub fn select_file(&self, file: Option<A::File>) -> bool {
        let Some(file) = file else {
            self.clear_selection();
            return false;
        };

        let max_bytes = self.config.with_value(|c| c.max_upload_bytes);
        if let Err(e) = validate_file(&file, max_bytes) {
            self.alerts.show(e.to_string());
            self.clear_selection();
            return false;
        }

        log::debug!(
            "selected file: name={}, type={}, size={}",
            file.name(),
            file.mime_type(),
            file.size()
        );
        self.analysis.selected_file_name.set(Some(file.name()));
        self.selection.set_value(Some(file));
        true
    }

    pub fn clear_selection(&self) {
        self.selection.set_value(None);
        self.analysis.selected_file_name.set(None);
    }

    pub fn has_selection(&self) -> bool {
        self.selection.with_value(Option::is_some)
    }

    // ------------------------------------------------------------------
    // Upload
    // ------------------------------------------------------------------

    pub fn submit_upload(&self) -> Option<impl Future<Output = ()> + 'static> {
        let Some(guard) = self.gate.try_begin(Operation::Upload) else {
            log::debug!("upload ignored: a request is already in flight");
            return None;
        };

        let Some(file) = self.selection.get_value() else {
            self.alerts.show(ValidationError::NoFile.to_string());
            return None;
        };
        let max_bytes = self.config.with_value(|c| c.max_upload_bytes);
        if let Err(e) = validate_file(&file, max_bytes) {
            self.alerts.show(e.to_string());
            return None;
        }

        log::debug!("uploading {} ({} bytes)", file.name(), file.size());
        let api = self.api.get_value();
        let this = *self;

        Some(async move {
            match api.upload(file).await {
                Ok(reply) => {
                    log::info!(
                        "analysis received: {} chars of text, {} chars of analysis",
                        reply.original_text.len(),
                        reply.ai_analysis.len()
                    );
                    let analysis_html = this.renderer.get_value().render(&reply.ai_analysis);
                    this.analysis.result.set(Some(AnalysisResult {
                        original_text: reply.original_text,
                        analysis_html,
                    }));
                }
                Err(e) => {
                    log::error!("upload failed: {:?}", e);
                    this.alerts.show(e.user_message(UPLOAD_FALLBACK));
                }
            }

            this.clear_selection();
            drop(guard);
        })
    }

    /// Run `submit_upload` on the browser executor.
    pub fn spawn_upload(&self) {
        if let Some(job) = self.submit_upload() {
            spawn_local(job);
        }
    }

    // ------------------------------------------------------------------
    // Questions
    // ------------------------------------------------------------------

    pub fn send_question(&self) -> Option<impl Future<Output = ()> + 'static> {
        let Some(guard) = self.gate.try_begin(Operation::Question) else {
            log::debug!("question ignored: a request is already in flight");
            return None;
        };

        let question = match validate_question(&self.chat.question.get_untracked()) {
            Ok(q) => q,
            Err(e) => {
                self.alerts.show(e.to_string());
                return None;
            }
        };

        self.chat.push(TranscriptEntry::user(question.clone()));
        self.chat.question.set(String::new());

        log::debug!("asking: {} chars", question.len());
        let api = self.api.get_value();
        let this = *self;

        Some(async move {
            match api.ask(question).await {
                Ok(reply) => {
                    let html = this.renderer.get_value().render(&reply.response);
                    let entry = TranscriptEntry::assistant(html);
                    let id = entry.id;
                    this.chat.push(entry);
                    this.chat.scroll_target.set(Some(id));
                }
                Err(e) => {
                    log::error!("question failed: {:?}", e);
                    this.alerts.show(e.user_message(QUESTION_FALLBACK));
                }
            }

            drop(guard);
        })
    }

    /// Run `send_question` on the browser executor.
    pub fn spawn_question(&self) {
        if let Some(job) = self.send_question() {
            spawn_local(job);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_document_chat::ui::details::EntryBody;
    use crate::shared::api_utils::ApiError;
    use crate::shared::processing_gate::LockScope;
    use crate::shared::validation::test_support::FakeFile;
    use async_trait::async_trait;
    use contracts::domain::a001_document_analysis::aggregate::DocumentAnalysis;
    use contracts::domain::a002_document_chat::aggregate::{ChatReply, ChatRole};
    use futures::channel::oneshot;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    const MIB: u64 = 1024 * 1024;

    type UploadReply = Result<DocumentAnalysis, ApiError>;
    type ChatResult = Result<ChatReply, ApiError>;

    #[derive(Default)]
    struct FakeState {
        uploads: RefCell<Vec<String>>,
        questions: RefCell<Vec<String>>,
        upload_replies: RefCell<VecDeque<oneshot::Receiver<UploadReply>>>,
        chat_replies: RefCell<VecDeque<oneshot::Receiver<ChatResult>>>,
    }

    /// Records calls; each call waits for a reply scripted by the test.
    #[derive(Clone, Default)]
    struct FakeApi {
        state: Rc<FakeState>,
    }

    impl FakeApi {
        fn expect_upload(&self) -> oneshot::Sender<UploadReply> {
            let (tx, rx) = oneshot::channel();
            self.state.upload_replies.borrow_mut().push_back(rx);
            tx
        }

        fn expect_question(&self) -> oneshot::Sender<ChatResult> {
            let (tx, rx) = oneshot::channel();
            self.state.chat_replies.borrow_mut().push_back(rx);
            tx
        }

        fn uploads(&self) -> Vec<String> {
            self.state.uploads.borrow().clone()
        }

        fn questions(&self) -> Vec<String> {
            self.state.questions.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl AnalysisApi for FakeApi {
        type File = FakeFile;

        async fn upload(&self, file: FakeFile) -> Result<DocumentAnalysis, ApiError> {
            self.state.uploads.borrow_mut().push(file.name.clone());
            let reply = self.state.upload_replies.borrow_mut().pop_front();
            match reply {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ApiError::Transport("reply dropped".into()))),
                None => Err(ApiError::Transport("no reply scripted".into())),
            }
        }

        async fn ask(&self, message: String) -> Result<ChatReply, ApiError> {
            self.state.questions.borrow_mut().push(message);
            let reply = self.state.chat_replies.borrow_mut().pop_front();
            match reply {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ApiError::Transport("reply dropped".into()))),
                None => Err(ApiError::Transport("no reply scripted".into())),
            }
        }
    }

    // `pool` drops first so pending jobs release their guards while the owner lives
    struct Harness {
        pool: LocalPool,
        api: FakeApi,
        session: SessionController<FakeApi>,
        _owner: Owner,
    }

    impl Harness {
        fn new(scope: LockScope) -> Self {
            let owner = Owner::new();
            owner.set();
            let api = FakeApi::default();
            let config = AppConfig {
                lock_scope: scope,
                ..AppConfig::default()
            };
            let session = SessionController::new(api.clone(), config);
            Self {
                pool: LocalPool::new(),
                api,
                session,
                _owner: owner,
            }
        }

        fn spawn(&mut self, job: Option<impl Future<Output = ()> + 'static>) {
            let job = job.expect("operation should have started");
            self.pool.spawner().spawn_local(job).unwrap();
            self.pool.run_until_stalled();
        }

        fn settle(&mut self) {
            self.pool.run_until_stalled();
        }

        fn alert(&self) -> Option<String> {
            self.session.alerts().current_untracked().map(|a| a.message)
        }

        fn transcript(&self) -> Vec<TranscriptEntry> {
            self.session.chat().transcript.get_untracked()
        }

        fn ask(&self, text: &str) -> Option<impl Future<Output = ()> + 'static> {
            self.session.chat().question.set(text.to_string());
            self.session.send_question()
        }
    }

    fn analysis(text: &str, markdown: &str) -> DocumentAnalysis {
        DocumentAnalysis {
            original_text: text.to_string(),
            ai_analysis: markdown.to_string(),
        }
    }

    #[test]
    fn test_oversized_pick_is_rejected() {
        let h = Harness::new(LockScope::Shared);
        assert!(h.session.select_file(Some(FakeFile::new("scan.pdf", MIB))));

        assert!(!h.session.select_file(Some(FakeFile::new("huge.pdf", 10 * MIB + 1))));
        assert!(!h.session.has_selection());
        assert_eq!(h.session.analysis().selected_file_name.get_untracked(), None);
        assert_eq!(h.alert().as_deref(), Some("File size exceeds 10MB."));
        assert!(h.api.uploads().is_empty());
    }

    #[test]
    fn test_submit_without_file() {
        let h = Harness::new(LockScope::Shared);
        assert!(h.session.submit_upload().is_none());
        assert_eq!(h.alert().as_deref(), Some("Please select a file."));
        assert!(h.api.uploads().is_empty());
        assert!(h.session.can_begin(Operation::Upload));
    }

    #[test]
    fn test_single_upload_blocks_other_submits() {
        let mut h = Harness::new(LockScope::Shared);
        h.session.select_file(Some(FakeFile::new("report.pdf", 2 * MIB)));
        let reply = h.api.expect_upload();

        let job = h.session.submit_upload();
        h.spawn(job);
        assert_eq!(h.api.uploads(), vec!["report.pdf".to_string()]);
        assert!(h.session.is_busy(Operation::Upload));

        // second submit and a question are both no-ops while in flight
        assert!(h.session.submit_upload().is_none());
        assert!(h.ask("anything?").is_none());
        assert!(h.api.questions().is_empty());
        assert!(h.transcript().is_empty());
        assert_eq!(h.api.uploads().len(), 1);

        reply.send(Ok(analysis("A", "**B**"))).unwrap();
        h.settle();
        assert!(!h.session.is_busy(Operation::Upload));
        assert!(h.session.can_begin(Operation::Question));
    }

    #[test]
    fn test_upload_success_shows_results() {
        let mut h = Harness::new(LockScope::Shared);
        h.session.select_file(Some(FakeFile::new("report.pdf", 1024)));
        let reply = h.api.expect_upload();
        let job = h.session.submit_upload();
        h.spawn(job);

        reply.send(Ok(analysis("A", "**B**"))).unwrap();
        h.settle();

        let result = h.session.analysis().result.get_untracked().unwrap();
        assert_eq!(result.original_text, "A");
        assert!(result.analysis_html.contains("<strong>B</strong>"));
        assert!(!h.session.has_selection());
        assert_eq!(h.alert(), None);
    }

    #[test]
    fn test_upload_server_error() {
        let mut h = Harness::new(LockScope::Shared);
        h.session.select_file(Some(FakeFile::new("report.pdf", 1024)));
        let reply = h.api.expect_upload();
        let job = h.session.submit_upload();
        h.spawn(job);

        reply.send(Err(ApiError::Server("bad file".into()))).unwrap();
        h.settle();

        assert_eq!(h.alert().as_deref(), Some("bad file"));
        assert_eq!(h.session.analysis().result.get_untracked(), None);
        assert!(!h.session.is_busy(Operation::Upload));
        assert!(!h.session.has_selection());
    }

    #[test]
    fn test_upload_transport_error_uses_fallback_when_blank() {
        let mut h = Harness::new(LockScope::Shared);
        h.session.select_file(Some(FakeFile::new("report.pdf", 1024)));
        let reply = h.api.expect_upload();
        let job = h.session.submit_upload();
        h.spawn(job);

        reply.send(Err(ApiError::Transport(String::new()))).unwrap();
        h.settle();

        assert_eq!(h.alert().as_deref(), Some(UPLOAD_FALLBACK));
        assert!(h.session.can_begin(Operation::Upload));
    }

    #[test]
    fn test_question_round_trip() {
        let mut h = Harness::new(LockScope::Shared);
        let reply = h.api.expect_question();

        let job = h.ask("  hello ");
        assert_eq!(h.session.chat().question.get_untracked(), "");
        let transcript = h.transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].role, ChatRole::User);
        assert_eq!(transcript[0].body, EntryBody::Text("hello".to_string()));

        h.spawn(job);
        assert_eq!(h.api.questions(), vec!["hello".to_string()]);
        assert!(h.session.is_busy(Operation::Question));

        reply
            .send(Ok(ChatReply {
                response: "hi".to_string(),
            }))
            .unwrap();
        h.settle();

        let transcript = h.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[1].role, ChatRole::Assistant);
        assert!(matches!(&transcript[1].body, EntryBody::Html(html) if html.contains("hi")));
        assert_eq!(
            h.session.chat().scroll_target.get_untracked(),
            Some(transcript[1].id)
        );
        assert!(!h.session.is_busy(Operation::Question));
    }

    #[test]
    fn test_question_is_escaped_not_rendered() {
        let mut h = Harness::new(LockScope::Shared);
        let _reply = h.api.expect_question();
        let job = h.ask("<b>bold?</b>");
        h.spawn(job);
        assert_eq!(
            h.transcript()[0].body,
            EntryBody::Text("<b>bold?</b>".to_string())
        );
    }

    #[test]
    fn test_empty_question() {
        let h = Harness::new(LockScope::Shared);
        h.session.chat().question.set("   ".to_string());
        assert!(h.session.send_question().is_none());
        assert_eq!(h.alert().as_deref(), Some("Please enter a question."));
        assert!(h.api.questions().is_empty());
        assert!(h.session.can_begin(Operation::Question));
    }

    #[test]
    fn test_question_server_error() {
        let mut h = Harness::new(LockScope::Shared);
        let reply = h.api.expect_question();
        let job = h.ask("why?");
        h.spawn(job);

        reply.send(Err(ApiError::Server("bad file".into()))).unwrap();
        h.settle();

        assert_eq!(h.alert().as_deref(), Some("bad file"));
        assert_eq!(h.transcript().len(), 1);
        assert!(!h.session.is_busy(Operation::Question));
    }

    #[test]
    fn test_question_transport_error_uses_fallback_when_blank() {
        let mut h = Harness::new(LockScope::Shared);
        let reply = h.api.expect_question();
        let job = h.ask("why?");
        h.spawn(job);

        reply.send(Err(ApiError::Transport(String::new()))).unwrap();
        h.settle();

        assert_eq!(h.alert().as_deref(), Some(QUESTION_FALLBACK));
        assert_eq!(h.transcript().len(), 1);
        assert!(!h.session.is_busy(Operation::Question));
        assert!(h.session.can_begin(Operation::Upload));
    }

    #[test]
    fn test_question_transport_error_keeps_message() {
        let mut h = Harness::new(LockScope::Shared);
        let reply = h.api.expect_question();
        let job = h.ask("why?");
        h.spawn(job);

        reply
            .send(Err(ApiError::Transport("Request failed with status code 502".into())))
            .unwrap();
        h.settle();

        assert_eq!(
            h.alert().as_deref(),
            Some("Request failed with status code 502")
        );
        assert_eq!(h.transcript().len(), 1);
        assert!(!h.session.is_busy(Operation::Question));
    }

    #[test]
    fn test_per_operation_scope_allows_question_during_upload() {
        let mut h = Harness::new(LockScope::PerOperation);
        h.session.select_file(Some(FakeFile::new("report.pdf", 1024)));
        let upload_reply = h.api.expect_upload();
        let chat_reply = h.api.expect_question();

        let job = h.session.submit_upload();
        h.spawn(job);
        let job = h.ask("still there?");
        h.spawn(job);
        assert_eq!(h.api.questions(), vec!["still there?".to_string()]);

        chat_reply
            .send(Ok(ChatReply {
                response: "yes".to_string(),
            }))
            .unwrap();
        upload_reply.send(Ok(analysis("A", "B"))).unwrap();
        h.settle();

        assert_eq!(h.transcript().len(), 2);
        assert!(h.session.analysis().result.get_untracked().is_some());
    }

    #[test]
    fn test_oversized_replacement_clears_previous_selection() {
        let h = Harness::new(LockScope::Shared);
        h.session.select_file(Some(FakeFile::new("small.png", 10)));
        assert_eq!(
            h.session.analysis().selected_file_name.get_untracked().as_deref(),
            Some("small.png")
        );

        h.session.select_file(Some(FakeFile::new("dropped.pdf", 11 * MIB)));
        assert!(!h.session.has_selection());
        assert!(h.session.submit_upload().is_none());
        assert_eq!(h.alert().as_deref(), Some("Please select a file."));
    }
}
