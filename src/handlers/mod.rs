// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod echo;
mod health;
mod metrics;
mod root;
mod status;

// Core handlers
pub use health::health_check;
pub use metrics::metrics_handler;
pub use root::root_handler;

// Handlers that exist to exercise request tracking
pub use echo::echo_handler;
pub use status::status_handler;
