//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate collection loads/saves into note and tag use-cases.
//! - Keep CLI and other callers decoupled from storage details.

pub mod note_service;
