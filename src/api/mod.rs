pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::integrations::{DirectoryClient, HelpdeskClient};
use crate::ml::TicketPredictor;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<TicketPredictor>,
    pub helpdesk: HelpdeskClient,
    pub directory: DirectoryClient,
}

impl AppState {
    pub fn new(
        predictor: Arc<TicketPredictor>,
        helpdesk: HelpdeskClient,
        directory: DirectoryClient,
    ) -> Self {
        Self {
            predictor,
            helpdesk,
            directory,
        }
    }
}
