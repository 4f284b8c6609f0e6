//! Language Server Protocol (LSP) implementation for gable
//!
//!     This crate exposes the gable analysis core to any LSP-compatible
//!     editor (VSCode, Neovim, Emacs, Sublime, etc.) over stdin/stdout.
//!
//! Feature Set
//!
//!     gable is a configuration format, not a programming language, so the
//!     served features are the ones that help while editing a config file:
//!
//!         1. Diagnostics (textDocument/publishDiagnostics and the pull
//!            variant textDocument/diagnostic):
//!             - Unclosed string literals, per line
//!             - Invalid escape sequences inside string literals
//!             - Document-wide brace imbalance
//!
//!         2. Completion (textDocument/completion, completionItem/resolve):
//!             - Section and flag names at line starts and after braces
//!             - Properties scoped to the enclosing block
//!             - Key modifiers, special keys and actions inside binds
//!             - Values tailored to a property's declared kind
//!
//!         3. Hover (textDocument/hover):
//!             - Documentation for sections, flags, properties and literals
//!
//! Architecture
//!
//!     LSP Layer (tower-lsp):
//!         - JSON-RPC transport, handshaking, request routing
//!
//!     Server Layer (this crate):
//!         - Implements the LanguageServer trait
//!         - Tracks one immutable snapshot per open document and drops
//!           stale validation results instead of publishing them
//!         - Dispatches through a language mode registry; settings arrive
//!           via workspace/configuration with built-in fallbacks
//!         - Bounded, age-swept cache of per-document line indexes
//!
//!     Analysis Layer (gable-analysis):
//!         - Pure, synchronous scans over the snapshot text
//!         - All language logic and the dense unit tests
//!
//! Usage
//!
//!     $ gable-lsp
//!     Starts the language server on stdin/stdout for editor integration.

pub mod cache;
pub mod modes;
pub mod server;
pub mod settings;

pub use server::GableLanguageServer;
