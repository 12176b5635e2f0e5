//! Assistant core - WhatsApp-facing real-estate query assistant.
//!
//! An inbound message is interpreted into search parameters (LLM call),
//! candidate listings are fetched through the Firecrawl extract API, a
//! summary report is produced (second LLM call), and the reply is delivered
//! back over the WhatsApp Cloud API.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;
