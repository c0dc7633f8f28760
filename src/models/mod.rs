pub mod ticket;
pub mod user;

pub use ticket::{TicketClassification, TicketDetails, TicketText};
pub use user::UserProfile;
