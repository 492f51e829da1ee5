use crate::config::SiteConfig;
use crate::page::Page;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub notices_path: PathBuf,
    pub profile_path: PathBuf,
    pub page: Arc<Mutex<Page>>,
}

impl AppState {
    pub fn new(config: &SiteConfig, page: Page) -> Self {
        Self {
            notices_path: config.notices_path(),
            profile_path: config.profile_path.clone(),
            page: Arc::new(Mutex::new(page)),
        }
    }
}
