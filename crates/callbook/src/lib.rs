//! Callbook - Call Transcription Webhook Receiver
//!
//! Accepts call records from a voice-agent platform, normalizes them into a
//! canonical shape, keeps a bounded recent history in memory and serves
//! list, lookup and statistics queries for a dashboard.

pub mod cli;
pub mod server;
