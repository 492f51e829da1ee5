pub mod app;
pub mod config;
pub mod dom;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod navigation;
pub mod notices;
pub mod page;
pub mod search;
pub mod storage;
pub mod ui;
pub mod state;
pub mod view_counts;

pub use app::router;
pub use config::SiteConfig;
pub use page::Page;
pub use state::AppState;
pub use storage::{load_notices, load_profile};
