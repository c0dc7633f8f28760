//! HTTP clients for the external collaborators: the helpdesk API that owns
//! ticket records and the identity directory that owns user profiles.

pub mod directory;
pub mod helpdesk;

pub use directory::DirectoryClient;
pub use helpdesk::{HelpdeskAuth, HelpdeskClient};
