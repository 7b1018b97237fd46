//! Main language server implementation

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::debounce::Debouncer;
use crate::features::decorations::{build_decorations, Decorations, DecorationsParams};
use crate::features::semantic_tokens::{encode_semantic_tokens, semantic_tokens_legend};
use serde_json::Value;
use sqlmark_config::{
    settings_section, ConfigError, HighlightConfig, Loader, SqlmarkConfig, StyleSheet,
};
use sqlmark_parser::sqlmark::document::SourceDocument;
use sqlmark_parser::Highlights;
use tokio::sync::RwLock;
use tower_lsp::async_trait;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    DidChangeConfigurationParams, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, InitializeParams, InitializeResult, InitializedParams,
    SemanticTokens, SemanticTokensFullOptions, SemanticTokensOptions, SemanticTokensParams,
    SemanticTokensResult, SemanticTokensServerCapabilities, ServerCapabilities, ServerInfo,
    TextDocumentItem, TextDocumentSyncCapability, TextDocumentSyncKind, Url,
    WorkDoneProgressOptions,
};
use tower_lsp::Client;

#[async_trait]
pub trait LspClient: Send + Sync + Clone + 'static {
    async fn publish_decorations(&self, params: DecorationsParams);
}

#[async_trait]
impl LspClient for Client {
    async fn publish_decorations(&self, params: DecorationsParams) {
        self.send_notification::<Decorations>(params).await;
    }
}

pub trait FeatureProvider: Send + Sync + 'static {
    fn highlight(&self, document: &SourceDocument) -> Highlights;
}

#[derive(Default)]
pub struct DefaultFeatureProvider;

impl DefaultFeatureProvider {
    pub fn new() -> Self {
        Self
    }
}

impl FeatureProvider for DefaultFeatureProvider {
    fn highlight(&self, document: &SourceDocument) -> Highlights {
        sqlmark_parser::highlight(document)
    }
}

#[derive(Clone)]
struct DocumentEntry {
    document: Arc<SourceDocument>,
    language_id: String,
    version: Option<i32>,
}

#[derive(Default)]
struct DocumentStore {
    entries: RwLock<HashMap<Url, DocumentEntry>>,
}

impl DocumentStore {
    async fn open(&self, uri: Url, language_id: String, version: i32, text: String) {
        let entry = DocumentEntry {
            document: Arc::new(SourceDocument::new(text)),
            language_id,
            version: Some(version),
        };
        self.entries.write().await.insert(uri, entry);
    }

    /// Replace the text of a document, keeping its language id.
    async fn update(&self, uri: Url, version: i32, text: String) {
        let mut entries = self.entries.write().await;
        let language_id = entries
            .get(&uri)
            .map(|entry| entry.language_id.clone())
            .unwrap_or_default();
        entries.insert(
            uri,
            DocumentEntry {
                document: Arc::new(SourceDocument::new(text)),
                language_id,
                version: Some(version),
            },
        );
    }

    async fn get(&self, uri: &Url) -> Option<DocumentEntry> {
        self.entries.read().await.get(uri).cloned()
    }

    async fn remove(&self, uri: &Url) {
        self.entries.write().await.remove(uri);
    }

    async fn uris(&self) -> Vec<Url> {
        self.entries.read().await.keys().cloned().collect()
    }
}

/// State shared between request handlers and scheduled passes.
struct ServerState<C, P> {
    client: C,
    features: Arc<P>,
    documents: DocumentStore,
    styles: RwLock<Arc<StyleSheet>>,
    settings: RwLock<HighlightConfig>,
}

impl<C, P> ServerState<C, P>
where
    C: LspClient,
    P: FeatureProvider,
{
    async fn highlights_for(&self, entry: &DocumentEntry) -> Highlights {
        if self.settings.read().await.applies_to(&entry.language_id) {
            self.features.highlight(&entry.document)
        } else {
            Highlights::default()
        }
    }

    /// Run one pass over the current text of `uri` and push the result to the client.
    async fn publish(&self, uri: &Url) {
        let Some(entry) = self.documents.get(uri).await else {
            return;
        };
        let highlights = self.highlights_for(&entry).await;
        let styles = self.styles.read().await.clone();
        let params = build_decorations(
            uri.clone(),
            entry.version,
            entry.document.as_ref(),
            &highlights,
            &styles,
        );
        tracing::debug!(%uri, tokens = highlights.tokens().len(), "publishing decorations");
        self.client.publish_decorations(params).await;
    }
}

pub struct SqlmarkLanguageServer<C = Client, P = DefaultFeatureProvider> {
    state: Arc<ServerState<C, P>>,
    debouncer: Debouncer,
    loader: Loader,
}

impl SqlmarkLanguageServer<Client, DefaultFeatureProvider> {
    pub fn new(client: Client) -> Self {
        Self::with_features(client, Arc::new(DefaultFeatureProvider::new()))
    }
}

impl<C, P> SqlmarkLanguageServer<C, P>
where
    C: LspClient,
    P: FeatureProvider,
{
    pub fn with_features(client: C, features: Arc<P>) -> Self {
        Self::from_parts(client, features, Loader::new(), SqlmarkConfig::default())
    }

    /// Use `loader` (for example one carrying a user config file) as the base that editor
    /// settings are layered on.
    pub fn with_loader(
        client: C,
        features: Arc<P>,
        loader: Loader,
    ) -> std::result::Result<Self, ConfigError> {
        let config = loader.clone().build()?;
        Ok(Self::from_parts(client, features, loader, config))
    }

    fn from_parts(client: C, features: Arc<P>, loader: Loader, config: SqlmarkConfig) -> Self {
        let state = ServerState {
            client,
            features,
            documents: DocumentStore::default(),
            styles: RwLock::new(Arc::new(StyleSheet::from_config(&config))),
            settings: RwLock::new(config.highlight),
        };
        Self {
            state: Arc::new(state),
            debouncer: Debouncer::new(),
            loader,
        }
    }

    async fn schedule(&self, uri: Url) {
        let delay = Duration::from_millis(self.state.settings.read().await.debounce_ms);
        let state = Arc::clone(&self.state);
        let job_uri = uri.clone();
        self.debouncer
            .schedule(uri, delay, async move { state.publish(&job_uri).await })
            .await;
    }

    /// Layer `settings` over the base loader and swap in the result. Returns false and keeps the
    /// current configuration when the settings do not deserialize.
    async fn apply_settings(&self, settings: &Value) -> bool {
        let config = match self
            .loader
            .clone()
            .with_settings(settings_section(settings))
            .build()
        {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(%error, "ignoring invalid sqlmark settings");
                return false;
            }
        };
        *self.state.styles.write().await = Arc::new(StyleSheet::from_config(&config));
        *self.state.settings.write().await = config.highlight;
        true
    }
}

#[async_trait]
impl<C, P> tower_lsp::LanguageServer for SqlmarkLanguageServer<C, P>
where
    C: LspClient,
    P: FeatureProvider,
{
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(options) = params.initialization_options.as_ref() {
            self.apply_settings(options).await;
        }

        let capabilities = ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            semantic_tokens_provider: Some(
                SemanticTokensServerCapabilities::SemanticTokensOptions(SemanticTokensOptions {
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                    legend: semantic_tokens_legend(),
                    range: None,
                    full: Some(SemanticTokensFullOptions::Bool(true)),
                }),
            ),
            ..ServerCapabilities::default()
        };

        Ok(InitializeResult {
            capabilities,
            server_info: Some(ServerInfo {
                name: "sqlmark-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {}

    async fn shutdown(&self) -> Result<()> {
        self.debouncer.cancel_all().await;
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let TextDocumentItem {
            uri,
            language_id,
            version,
            text,
        } = params.text_document;
        self.state
            .documents
            .open(uri.clone(), language_id, version, text)
            .await;
        self.schedule(uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        if let Some(change) = params.content_changes.into_iter().last() {
            let uri = params.text_document.uri;
            self.state
                .documents
                .update(uri.clone(), params.text_document.version, change.text)
                .await;
            self.schedule(uri).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.debouncer.cancel(&uri).await;
        self.state.documents.remove(&uri).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        if self.apply_settings(&params.settings).await {
            for uri in self.state.documents.uris().await {
                self.schedule(uri).await;
            }
        }
    }

    async fn semantic_tokens_full(
        &self,
        params: SemanticTokensParams,
    ) -> Result<Option<SemanticTokensResult>> {
        if let Some(entry) = self.state.documents.get(&params.text_document.uri).await {
            let highlights = self.state.highlights_for(&entry).await;
            let data = encode_semantic_tokens(entry.document.as_ref(), highlights.tokens());
            Ok(Some(SemanticTokensResult::Tokens(SemanticTokens {
                result_id: None,
                data,
            })))
        } else {
            Ok(None)
        }
    }
}
