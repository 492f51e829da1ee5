use crate::dom::Document;
use crate::models::NoticeId;

pub fn set_query(doc: &mut Document, query: &str) {
    doc.search_query = query.to_string();
}

/// Shows rows whose title contains the current query, ignoring case.
/// An empty query shows every row.
pub fn filter_notices(doc: &mut Document) -> Vec<NoticeId> {
    let keyword = doc.search_query.trim().to_lowercase();
    doc.notice_list
        .iter_mut()
        .filter_map(|row| {
            row.visible = keyword.is_empty() || row.title.to_lowercase().contains(&keyword);
            row.visible.then(|| row.id.clone())
        })
        .collect()
}
