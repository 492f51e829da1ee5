use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Notice identifier. The data file may carry ids as strings or integers;
/// both are normalized to the same string key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawNoticeId", into = "String")]
pub struct NoticeId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNoticeId {
    Number(i64),
    Text(String),
}

impl From<RawNoticeId> for NoticeId {
    fn from(raw: RawNoticeId) -> Self {
        match raw {
            RawNoticeId::Number(value) => Self(value.to_string()),
            RawNoticeId::Text(value) => Self(value),
        }
    }
}

impl From<NoticeId> for String {
    fn from(id: NoticeId) -> Self {
        id.0
    }
}

impl NoticeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub id: NoticeId,
    pub title: String,
    pub author: String,
    pub date: String,
    #[serde(default)]
    pub content: Vec<String>,
}

impl Notice {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    pub fn body(&self) -> String {
        self.content.concat()
    }
}

/// Local per-profile key/value state, grouped by namespace so unrelated
/// keys never collide.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileData {
    #[serde(default)]
    pub namespaces: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub visible: Vec<NoticeId>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NoticeRowResponse {
    pub id: NoticeId,
    pub title: String,
    pub author: String,
    pub date: String,
    pub views: u64,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavLink {
    pub id: NoticeId,
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OpenNoticeResponse {
    pub id: NoticeId,
    pub views: u64,
    pub prev: Option<NavLink>,
    pub next: Option<NavLink>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageResponse {
    pub active_section: Option<String>,
    pub active_notice: Option<NoticeId>,
    pub notice_count: Option<usize>,
    pub query: String,
    pub drawer_open: bool,
}
