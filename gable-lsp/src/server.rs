//! Main language server implementation.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use gable_analysis::completion::{resolve_documentation, CompletionCandidate};
use tokio::sync::RwLock;
use tower_lsp::async_trait;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CompletionItem, CompletionOptions, CompletionParams, CompletionResponse, ConfigurationItem,
    Diagnostic, DiagnosticOptions, DiagnosticServerCapabilities, DidChangeConfigurationParams,
    DidChangeTextDocumentParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams,
    DocumentDiagnosticParams, DocumentDiagnosticReport, DocumentDiagnosticReportResult,
    Documentation, FullDocumentDiagnosticReport, Hover, HoverContents, HoverParams,
    HoverProviderCapability, InitializeParams, InitializeResult, InitializedParams,
    InsertTextFormat, MarkupContent, MarkupKind, MessageType,
    RelatedFullDocumentDiagnosticReport, ServerCapabilities, ServerInfo, TextDocumentItem,
    TextDocumentSyncCapability, TextDocumentSyncKind, Url, WorkDoneProgressOptions,
};
use tower_lsp::Client;

use crate::cache::{self, DocumentModelCache};
use crate::modes::ModeRegistry;
use crate::settings::{Settings, SECTION};

/// The client calls the server makes, abstracted so tests can observe them.
#[async_trait]
pub trait LspClient: Send + Sync + 'static {
    async fn publish_diagnostics(&self, uri: Url, diagnostics: Vec<Diagnostic>, version: Option<i32>);
    async fn log_message(&self, typ: MessageType, message: String);
    /// `None` when the client does not answer the configuration request.
    async fn configuration(&self, items: Vec<ConfigurationItem>) -> Option<Vec<serde_json::Value>>;
}

#[async_trait]
impl LspClient for Client {
    async fn publish_diagnostics(&self, uri: Url, diagnostics: Vec<Diagnostic>, version: Option<i32>) {
        Client::publish_diagnostics(self, uri, diagnostics, version).await;
    }

    async fn log_message(&self, typ: MessageType, message: String) {
        Client::log_message(self, typ, message).await;
    }

    async fn configuration(&self, items: Vec<ConfigurationItem>) -> Option<Vec<serde_json::Value>> {
        Client::configuration(self, items).await.ok()
    }
}

/// One immutable document snapshot. Every request works off exactly one of
/// these; diagnostics computed from it are checked against the live version
/// before publishing.
#[derive(Clone)]
struct DocumentSnapshot {
    text: Arc<str>,
    version: i32,
    language_id: String,
}

#[derive(Default)]
struct DocumentStore {
    entries: RwLock<HashMap<Url, DocumentSnapshot>>,
}

impl DocumentStore {
    async fn open(&self, uri: Url, language_id: String, version: i32, text: String) {
        self.entries.write().await.insert(
            uri,
            DocumentSnapshot {
                text: text.into(),
                version,
                language_id,
            },
        );
    }

    /// Replace the text, keeping the language tag from the open.
    async fn change(&self, uri: &Url, version: i32, text: String) {
        let mut entries = self.entries.write().await;
        if let Some(snapshot) = entries.get_mut(uri) {
            snapshot.text = text.into();
            snapshot.version = version;
        }
    }

    async fn get(&self, uri: &Url) -> Option<DocumentSnapshot> {
        self.entries.read().await.get(uri).cloned()
    }

    async fn version(&self, uri: &Url) -> Option<i32> {
        self.entries.read().await.get(uri).map(|s| s.version)
    }

    async fn remove(&self, uri: &Url) {
        self.entries.write().await.remove(uri);
    }

    async fn uris(&self) -> Vec<Url> {
        self.entries.read().await.keys().cloned().collect()
    }
}

pub struct GableLanguageServer<C = Client> {
    client: C,
    documents: DocumentStore,
    modes: ModeRegistry,
    cache: Arc<DocumentModelCache>,
    settings: RwLock<Settings>,
}

impl GableLanguageServer<Client> {
    pub fn new(client: Client) -> Self {
        Self::with_client(client)
    }
}

impl<C: LspClient> GableLanguageServer<C> {
    pub fn with_client(client: C) -> Self {
        Self {
            client,
            documents: DocumentStore::default(),
            modes: ModeRegistry::builtin(),
            cache: Arc::new(DocumentModelCache::new(
                cache::DEFAULT_CAPACITY,
                cache::DEFAULT_MAX_AGE,
            )),
            settings: RwLock::new(Settings::default()),
        }
    }

    async fn line_index(&self, uri: &Url, snapshot: &DocumentSnapshot) -> Arc<gable_analysis::LineIndex> {
        self.cache
            .get_or_compute(uri, snapshot.version, &snapshot.language_id, &snapshot.text)
    }

    /// Compute diagnostics for one snapshot. A panic inside the scan is a
    /// server fault, not a user error: it is logged and yields an empty
    /// list so one malformed document cannot take the service down.
    async fn compute_diagnostics(&self, uri: &Url, snapshot: &DocumentSnapshot) -> Vec<Diagnostic> {
        let settings = self.settings.read().await.clone();
        if !settings.enable_validation {
            return Vec::new();
        }
        let Some(validate) = self.modes.get(&snapshot.language_id).and_then(|m| m.validate) else {
            return Vec::new();
        };
        let index = self.line_index(uri, snapshot).await;
        match catch_unwind(AssertUnwindSafe(|| validate(&index, settings.max_problems))) {
            Ok(diagnostics) => diagnostics,
            Err(_) => {
                tracing::error!(%uri, "validation panicked, suppressing");
                self.client
                    .log_message(
                        MessageType::ERROR,
                        format!("gable-lsp: internal error validating {uri}"),
                    )
                    .await;
                Vec::new()
            }
        }
    }

    /// Validate a snapshot and publish the result, unless a newer version
    /// of the document has superseded it in the meantime.
    async fn publish_for_snapshot(&self, uri: Url, snapshot: DocumentSnapshot) {
        let diagnostics = self.compute_diagnostics(&uri, &snapshot).await;
        match self.documents.version(&uri).await {
            Some(version) if version == snapshot.version => {}
            _ => {
                tracing::debug!(%uri, version = snapshot.version, "stale validation discarded");
                return;
            }
        }
        self.client
            .publish_diagnostics(uri, diagnostics, Some(snapshot.version))
            .await;
    }

    async fn refresh_diagnostics(&self, uri: Url) {
        if let Some(snapshot) = self.documents.get(&uri).await {
            self.publish_for_snapshot(uri, snapshot).await;
        }
    }
}

/// Run a synchronous analysis call behind a panic boundary.
fn guard<T>(request: &str, f: impl FnOnce() -> T) -> Option<T> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::error!(request, "analysis panicked, returning empty result");
            None
        }
    }
}

fn to_completion_item(candidate: CompletionCandidate) -> CompletionItem {
    CompletionItem {
        label: candidate.label,
        kind: Some(candidate.kind),
        detail: candidate.detail,
        insert_text: candidate.insert_text,
        insert_text_format: candidate.is_snippet.then_some(InsertTextFormat::SNIPPET),
        sort_text: candidate.sort_text,
        data: candidate.data.map(serde_json::Value::String),
        ..CompletionItem::default()
    }
}

#[async_trait]
impl<C: LspClient> tower_lsp::LanguageServer for GableLanguageServer<C> {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(options) = params.initialization_options {
            *self.settings.write().await = Settings::from_value(Some(&options));
        }

        let capabilities = ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            completion_provider: Some(CompletionOptions {
                resolve_provider: Some(true),
                trigger_characters: Some(
                    ["\"", "(", "{", "=", " ", "#"]
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                ),
                work_done_progress_options: WorkDoneProgressOptions::default(),
                all_commit_characters: None,
                completion_item: None,
            }),
            hover_provider: Some(HoverProviderCapability::Simple(true)),
            diagnostic_provider: Some(DiagnosticServerCapabilities::Options(DiagnosticOptions {
                identifier: Some("gable".to_string()),
                inter_file_dependencies: false,
                workspace_diagnostics: false,
                work_done_progress_options: WorkDoneProgressOptions::default(),
            })),
            ..ServerCapabilities::default()
        };

        Ok(InitializeResult {
            capabilities,
            server_info: Some(ServerInfo {
                name: "gable-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.cache.start_sweep(cache::DEFAULT_SWEEP_INTERVAL);
    }

    async fn shutdown(&self) -> Result<()> {
        self.cache.dispose();
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let TextDocumentItem {
            uri,
            language_id,
            version,
            text,
        } = params.text_document;
        self.documents
            .open(uri.clone(), language_id, version, text)
            .await;
        self.refresh_diagnostics(uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        // Full sync: the last change carries the complete text.
        if let Some(change) = params.content_changes.into_iter().last() {
            self.documents
                .change(&uri, params.text_document.version, change.text)
                .await;
        }
        self.refresh_diagnostics(uri).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.remove(&uri).await;
        self.cache.remove(&uri);
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let pulled = self
            .client
            .configuration(vec![ConfigurationItem {
                scope_uri: None,
                section: Some(SECTION.to_string()),
            }])
            .await;
        let settings = match pulled {
            Some(values) => Settings::from_value(values.first()),
            // Client without configuration support: take the pushed payload.
            None => Settings::from_value(params.settings.get(SECTION)),
        };
        *self.settings.write().await = settings;

        for uri in self.documents.uris().await {
            self.refresh_diagnostics(uri).await;
        }
    }

    async fn diagnostic(
        &self,
        params: DocumentDiagnosticParams,
    ) -> Result<DocumentDiagnosticReportResult> {
        let uri = params.text_document.uri;
        let items = match self.documents.get(&uri).await {
            Some(snapshot) => self.compute_diagnostics(&uri, &snapshot).await,
            None => Vec::new(),
        };
        Ok(DocumentDiagnosticReportResult::Report(
            DocumentDiagnosticReport::Full(RelatedFullDocumentDiagnosticReport {
                related_documents: None,
                full_document_diagnostic_report: FullDocumentDiagnosticReport {
                    result_id: None,
                    items,
                },
            }),
        ))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        let Some(snapshot) = self.documents.get(&uri).await else {
            return Ok(None);
        };
        let Some(complete) = self.modes.get(&snapshot.language_id).and_then(|m| m.complete) else {
            return Ok(None);
        };
        let index = self.line_index(&uri, &snapshot).await;
        let candidates = guard("completion", || complete(&index, position)).unwrap_or_default();
        Ok(Some(CompletionResponse::Array(
            candidates.into_iter().map(to_completion_item).collect(),
        )))
    }

    async fn completion_resolve(&self, mut item: CompletionItem) -> Result<CompletionItem> {
        if let Some(serde_json::Value::String(tag)) = &item.data {
            if let Some(markdown) = resolve_documentation(tag) {
                item.documentation = Some(Documentation::MarkupContent(MarkupContent {
                    kind: MarkupKind::Markdown,
                    value: markdown,
                }));
            }
        }
        Ok(item)
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        let Some(snapshot) = self.documents.get(&uri).await else {
            return Ok(None);
        };
        let Some(hover) = self.modes.get(&snapshot.language_id).and_then(|m| m.hover) else {
            return Ok(None);
        };
        let index = self.line_index(&uri, &snapshot).await;
        let result = guard("hover", || hover(&index, position)).flatten();
        Ok(result.map(|result| Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value: result.contents,
            }),
            range: Some(result.range),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tower_lsp::lsp_types::{
        CompletionItemKind, DiagnosticSeverity, PartialResultParams, Position,
        TextDocumentContentChangeEvent, TextDocumentIdentifier, TextDocumentPositionParams,
        VersionedTextDocumentIdentifier, WorkDoneProgressParams,
    };
    use tower_lsp::LanguageServer;

    #[derive(Default)]
    struct MockClientState {
        published: Mutex<Vec<(Url, Vec<Diagnostic>, Option<i32>)>>,
        logged: Mutex<Vec<String>>,
        config_response: Mutex<Option<serde_json::Value>>,
    }

    #[derive(Clone, Default)]
    struct MockClient {
        state: Arc<MockClientState>,
    }

    #[async_trait]
    impl LspClient for MockClient {
        async fn publish_diagnostics(
            &self,
            uri: Url,
            diagnostics: Vec<Diagnostic>,
            version: Option<i32>,
        ) {
            self.state
                .published
                .lock()
                .unwrap()
                .push((uri, diagnostics, version));
        }

        async fn log_message(&self, _typ: MessageType, message: String) {
            self.state.logged.lock().unwrap().push(message);
        }

        async fn configuration(
            &self,
            _items: Vec<ConfigurationItem>,
        ) -> Option<Vec<serde_json::Value>> {
            self.state
                .config_response
                .lock()
                .unwrap()
                .clone()
                .map(|value| vec![value])
        }
    }

    fn server() -> (GableLanguageServer<MockClient>, MockClient) {
        let client = MockClient::default();
        (GableLanguageServer::with_client(client.clone()), client)
    }

    fn sample_uri() -> Url {
        Url::parse("file:///config.gable").unwrap()
    }

    async fn open(server: &GableLanguageServer<MockClient>, text: &str, version: i32) {
        server
            .did_open(DidOpenTextDocumentParams {
                text_document: TextDocumentItem {
                    uri: sample_uri(),
                    language_id: "gable".into(),
                    version,
                    text: text.into(),
                },
            })
            .await;
    }

    fn position_params(line: u32, character: u32) -> TextDocumentPositionParams {
        TextDocumentPositionParams {
            text_document: TextDocumentIdentifier { uri: sample_uri() },
            position: Position::new(line, character),
        }
    }

    #[tokio::test]
    async fn did_open_publishes_diagnostics() {
        let (server, client) = server();
        open(&server, "binds {\n", 1).await;

        let published = client.state.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        let (uri, diagnostics, version) = &published[0];
        assert_eq!(uri, &sample_uri());
        assert_eq!(*version, Some(1));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Some(DiagnosticSeverity::WARNING));
    }

    #[tokio::test]
    async fn did_change_takes_the_last_full_text() {
        let (server, client) = server();
        open(&server, "binds {\n", 1).await;
        server
            .did_change(DidChangeTextDocumentParams {
                text_document: VersionedTextDocumentIdentifier {
                    uri: sample_uri(),
                    version: 2,
                },
                content_changes: vec![
                    TextDocumentContentChangeEvent {
                        range: None,
                        range_length: None,
                        text: "still {\n".into(),
                    },
                    TextDocumentContentChangeEvent {
                        range: None,
                        range_length: None,
                        text: "binds {\n}\n".into(),
                    },
                ],
            })
            .await;

        let published = client.state.published.lock().unwrap();
        let (_, diagnostics, version) = published.last().unwrap();
        assert_eq!(*version, Some(2));
        assert!(diagnostics.is_empty());
    }

    #[tokio::test]
    async fn stale_snapshot_is_not_published() {
        let (server, client) = server();
        open(&server, "binds {\n", 1).await;
        client.state.published.lock().unwrap().clear();

        let stale = DocumentSnapshot {
            text: Arc::from("binds {\n"),
            version: 0,
            language_id: "gable".into(),
        };
        server.publish_for_snapshot(sample_uri(), stale).await;

        assert!(client.state.published.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn disabled_validation_publishes_an_empty_list() {
        let (server, client) = server();
        *server.settings.write().await = Settings {
            enable_validation: false,
            max_problems: 100,
        };
        open(&server, "binds {\n", 1).await;

        let published = client.state.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert!(published[0].1.is_empty());
    }

    #[tokio::test]
    async fn max_problems_caps_published_diagnostics() {
        let (server, client) = server();
        *server.settings.write().await = Settings {
            enable_validation: true,
            max_problems: 1,
        };
        open(&server, "a \"\\q\" b \"\\q\" c \"\\q\"\n", 1).await;

        let published = client.state.published.lock().unwrap();
        assert_eq!(published[0].1.len(), 1);
    }

    #[tokio::test]
    async fn unsupported_language_publishes_nothing_to_show() {
        let (server, client) = server();
        server
            .did_open(DidOpenTextDocumentParams {
                text_document: TextDocumentItem {
                    uri: sample_uri(),
                    language_id: "toml".into(),
                    version: 1,
                    text: "broken {\n".into(),
                },
            })
            .await;

        let published = client.state.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert!(published[0].1.is_empty());
    }

    #[tokio::test]
    async fn did_close_clears_diagnostics_and_cache() {
        let (server, client) = server();
        open(&server, "binds {\n", 1).await;
        server
            .did_close(DidCloseTextDocumentParams {
                text_document: TextDocumentIdentifier { uri: sample_uri() },
            })
            .await;

        let published = client.state.published.lock().unwrap();
        let (_, diagnostics, version) = published.last().unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(*version, None);
        assert!(server.cache.is_empty());
    }

    #[tokio::test]
    async fn configuration_change_pulls_and_revalidates() {
        let (server, client) = server();
        open(&server, "a \"\\q\" b \"\\q\"\n", 1).await;
        *client.state.config_response.lock().unwrap() =
            Some(serde_json::json!({"maxProblems": 1}));

        server
            .did_change_configuration(DidChangeConfigurationParams {
                settings: serde_json::Value::Null,
            })
            .await;

        assert_eq!(server.settings.read().await.max_problems, 1);
        let published = client.state.published.lock().unwrap();
        assert_eq!(published.last().unwrap().1.len(), 1);
    }

    #[tokio::test]
    async fn configuration_failure_falls_back_to_defaults() {
        let (server, _client) = server();
        *server.settings.write().await = Settings {
            enable_validation: false,
            max_problems: 5,
        };

        server
            .did_change_configuration(DidChangeConfigurationParams {
                settings: serde_json::Value::Null,
            })
            .await;

        assert_eq!(*server.settings.read().await, Settings::default());
    }

    #[tokio::test]
    async fn completion_converts_candidates() {
        let (server, _client) = server();
        open(&server, "binds {\n  \n}\n", 1).await;

        let response = server
            .completion(CompletionParams {
                text_document_position: position_params(1, 2),
                work_done_progress_params: WorkDoneProgressParams::default(),
                partial_result_params: PartialResultParams::default(),
                context: None,
            })
            .await
            .unwrap()
            .unwrap();

        let CompletionResponse::Array(items) = response else {
            panic!("expected an array response");
        };
        let modifier = items.iter().find(|item| item.label == "Mod+").unwrap();
        assert_eq!(modifier.kind, Some(CompletionItemKind::KEYWORD));
        assert_eq!(modifier.insert_text.as_deref(), Some("Mod+"));
        assert_eq!(modifier.sort_text.as_deref(), Some("0Mod"));
        assert!(matches!(
            modifier.data,
            Some(serde_json::Value::String(ref tag)) if tag == "mod:Mod"
        ));
    }

    #[tokio::test]
    async fn snippet_candidates_carry_the_snippet_format() {
        let (server, _client) = server();
        open(&server, "position=", 1).await;

        let response = server
            .completion(CompletionParams {
                text_document_position: position_params(0, 9),
                work_done_progress_params: WorkDoneProgressParams::default(),
                partial_result_params: PartialResultParams::default(),
                context: None,
            })
            .await
            .unwrap()
            .unwrap();

        let CompletionResponse::Array(items) = response else {
            panic!("expected an array response");
        };
        let snippet = items
            .iter()
            .find(|item| item.kind == Some(CompletionItemKind::SNIPPET))
            .unwrap();
        assert_eq!(snippet.insert_text_format, Some(InsertTextFormat::SNIPPET));
    }

    #[tokio::test]
    async fn completion_resolve_attaches_documentation() {
        let (server, _client) = server();
        let item = CompletionItem {
            label: "input".into(),
            data: Some(serde_json::Value::String("node:input".into())),
            ..CompletionItem::default()
        };

        let resolved = server.completion_resolve(item).await.unwrap();
        let Some(Documentation::MarkupContent(content)) = resolved.documentation else {
            panic!("expected markdown documentation");
        };
        assert!(content.value.contains("Input device"));
    }

    #[tokio::test]
    async fn completion_resolve_without_data_is_a_no_op() {
        let (server, _client) = server();
        let item = CompletionItem {
            label: "whatever".into(),
            ..CompletionItem::default()
        };
        let resolved = server.completion_resolve(item).await.unwrap();
        assert!(resolved.documentation.is_none());
    }

    #[tokio::test]
    async fn hover_wraps_markdown() {
        let (server, _client) = server();
        open(&server, "layout {\n    gaps=16\n}\n", 1).await;

        let hover = server
            .hover(HoverParams {
                text_document_position_params: position_params(1, 6),
                work_done_progress_params: WorkDoneProgressParams::default(),
            })
            .await
            .unwrap()
            .unwrap();

        let HoverContents::Markup(content) = hover.contents else {
            panic!("expected markup contents");
        };
        assert_eq!(content.kind, MarkupKind::Markdown);
        assert!(content.value.contains("`gaps`"));
        assert!(hover.range.is_some());
    }

    #[tokio::test]
    async fn hover_on_missing_document_is_none() {
        let (server, _client) = server();
        let hover = server
            .hover(HoverParams {
                text_document_position_params: position_params(0, 0),
                work_done_progress_params: WorkDoneProgressParams::default(),
            })
            .await
            .unwrap();
        assert!(hover.is_none());
    }

    #[tokio::test]
    async fn pull_diagnostics_returns_a_full_report() {
        let (server, _client) = server();
        open(&server, "name=\"\\q\"\n", 1).await;

        let result = server
            .diagnostic(DocumentDiagnosticParams {
                text_document: TextDocumentIdentifier { uri: sample_uri() },
                identifier: None,
                previous_result_id: None,
                work_done_progress_params: WorkDoneProgressParams::default(),
                partial_result_params: PartialResultParams::default(),
            })
            .await
            .unwrap();

        let DocumentDiagnosticReportResult::Report(DocumentDiagnosticReport::Full(report)) = result
        else {
            panic!("expected a full report");
        };
        let items = report.full_document_diagnostic_report.items;
        assert_eq!(items.len(), 1);
        assert!(items[0].message.contains("Invalid escape"));
    }

    #[tokio::test]
    async fn repeated_completion_requests_reuse_the_cached_model() {
        let (server, _client) = server();
        open(&server, "input {\n  \n}\n", 1).await;

        for _ in 0..2 {
            let response = server
                .completion(CompletionParams {
                    text_document_position: position_params(1, 2),
                    work_done_progress_params: WorkDoneProgressParams::default(),
                    partial_result_params: PartialResultParams::default(),
                    context: None,
                })
                .await
                .unwrap();
            assert!(response.is_some());
        }
        assert_eq!(server.cache.len(), 1);
    }
}
