pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod handlers;
pub mod record;
pub mod schema;
pub mod state;

pub use handlers::router;
pub use state::AppState;
