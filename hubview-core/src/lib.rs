pub mod action;
pub mod config;
pub mod event;
pub mod github;
pub mod keyboard;
pub mod query;
pub mod state;

// Re-export commonly used types at crate root
pub use action::Action;
pub use config::Config;
pub use event::AppEvent;
pub use github::{ClientConfig, FetchOutcome, GraphQLProvider, HttpGraphQLClient};
pub use keyboard::KeyEvent;
pub use query::IssuesQueryVariables;
pub use state::{AppState, Mode};
