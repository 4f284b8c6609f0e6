use gable_lsp::GableLanguageServer;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // stdout carries the protocol; all logging goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let stdin = stdin();
    let stdout = stdout();
    let (service, socket) = LspService::new(GableLanguageServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
