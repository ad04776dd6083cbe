//! `ollama-agent` — generator adapter backed by an Ollama server.
//!
//! Implements [`taskplan_core::StepSource`] over Ollama's `/api/generate`
//! endpoint. The adapter is stateless: it builds a prompt, makes a single
//! non-streaming request, and hands the raw response text back to the
//! lifecycle manager for parsing. Failure policy follows the trait contract:
//! draft failures degrade to the fixed placeholder plan, revise failures are
//! surfaced so the caller keeps the stored plan untouched.

pub mod client;
pub mod prompt;

pub use client::OllamaClient;

/// Default Ollama endpoint for a local install.
pub const DEFAULT_HOST: &str = "http://localhost:11434";

/// Default model; small enough to run on a laptop.
pub const DEFAULT_MODEL: &str = "tinyllama";
