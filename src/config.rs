use std::{env, path::PathBuf};

pub const NOTICES_FILE: &str = "notices.json";

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub profile_path: PathBuf,
}

impl SiteConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);
        let data_dir = env::var("SITE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        let profile_path = env::var("SITE_PROFILE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/profile.json"));

        Self {
            port,
            data_dir,
            profile_path,
        }
    }

    pub fn notices_path(&self) -> PathBuf {
        self.data_dir.join(NOTICES_FILE)
    }
}
