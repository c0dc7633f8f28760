//! helpdesk-triage: automated triage for support tickets.
//!
//! Given a ticket identifier, the service retrieves the ticket from a
//! third-party helpdesk API, looks up the submitting user in an external
//! identity directory, and classifies the ticket's free text into a
//! predefined taxonomy using two pre-trained statistical classifiers per
//! label dimension, arbitrated by confidence.

pub mod api;
pub mod config;
pub mod error;
pub mod integrations;
pub mod ml;
pub mod models;

pub use error::{AppError, Result};
