use crate::errors::{AppError, LoadError};
use crate::models::{Notice, ProfileData};
use std::path::Path;
use tokio::fs;
use tracing::{error, warn};

pub async fn load_notices(path: &Path) -> Result<Vec<Notice>, LoadError> {
    let bytes = fs::read(path).await?;
    let notices: Vec<Notice> = serde_json::from_slice(&bytes)?;

    for notice in notices.iter().filter(|notice| notice.parsed_date().is_none()) {
        warn!(id = %notice.id, date = %notice.date, "notice date is not YYYY-MM-DD");
    }

    Ok(notices)
}

pub async fn load_profile(path: &Path) -> ProfileData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse profile file: {err}");
                ProfileData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => ProfileData::default(),
        Err(err) => {
            error!("failed to read profile file: {err}");
            ProfileData::default()
        }
    }
}

pub async fn persist_profile(path: &Path, data: &ProfileData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
