mod health;
mod link;

pub use health::health_handler;
pub use link::{create_link_handler, export_handler, index_handler, resolve_handler};
