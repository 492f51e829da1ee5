use crate::models::{NoticeId, ProfileData};
use tracing::warn;

pub const NOTICE_VIEWS: &str = "notice_view";

impl ProfileData {
    pub fn get(&self, namespace: &str, key: &str) -> Option<&str> {
        self.namespaces
            .get(namespace)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    pub fn set(&mut self, namespace: &str, key: &str, value: String) {
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }
}

/// Stored count for a notice; absent or unreadable values count as zero.
pub fn view_count(profile: &ProfileData, id: &NoticeId) -> u64 {
    let Some(raw) = profile.get(NOTICE_VIEWS, id.as_str()) else {
        return 0;
    };
    match raw.trim().parse::<u64>() {
        Ok(count) => count,
        Err(_) => {
            warn!(%id, value = raw, "ignoring unreadable view count");
            0
        }
    }
}

pub fn record_view(profile: &mut ProfileData, id: &NoticeId) -> u64 {
    let count = view_count(profile, id).saturating_add(1);
    profile.set(NOTICE_VIEWS, id.as_str(), count.to_string());
    count
}
