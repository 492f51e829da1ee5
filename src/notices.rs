use crate::dom::{
    Action, DetailElement, Document, IntroItem, ListRow, NavControl, INTRO_NOTICE_LIMIT,
    SECTION_NOTICE_DETAIL,
};
use crate::models::{NavLink, Notice, NoticeId, ProfileData};
use crate::navigation::activate_section;
use crate::view_counts::{record_view, view_count};
use std::sync::Arc;
use tracing::{debug, info};

/// Loaded notice collection. Immutable once built; its order is both the
/// display order and the prev/next adjacency.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    notices: Arc<[Notice]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Opened {
    pub id: NoticeId,
    pub views: u64,
    pub prev: Option<NavLink>,
    pub next: Option<NavLink>,
}

impl NoticeBoard {
    pub fn new(notices: Vec<Notice>) -> Self {
        Self {
            notices: notices.into(),
        }
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn position(&self, id: &NoticeId) -> Option<usize> {
        self.notices.iter().position(|notice| &notice.id == id)
    }

    pub fn render_list(&self, doc: &mut Document, profile: &ProfileData) {
        doc.notice_list = self
            .notices
            .iter()
            .map(|notice| ListRow {
                id: notice.id.clone(),
                date: notice.date.clone(),
                title: notice.title.clone(),
                author: notice.author.clone(),
                views: view_count(profile, &notice.id),
                visible: true,
            })
            .collect();
    }

    pub fn render_details(&self, doc: &mut Document, profile: &ProfileData) {
        doc.notice_details = self
            .notices
            .iter()
            .map(|notice| DetailElement {
                id: notice.id.clone(),
                title: notice.title.clone(),
                author: notice.author.clone(),
                raw_date: notice.date.clone(),
                date_text: String::new(),
                views: view_count(profile, &notice.id),
                content: notice.body(),
                active: false,
            })
            .collect();
    }

    pub fn update_count(&self, doc: &mut Document) {
        doc.notice_count = Some(self.notices.len());
    }

    pub fn render_intro(&self, doc: &mut Document) {
        doc.intro_notices = self
            .notices
            .iter()
            .take(INTRO_NOTICE_LIMIT)
            .map(|notice| IntroItem {
                id: notice.id.clone(),
                title: notice.title.clone(),
            })
            .collect();
    }

    /// Shows the detail for `id`, counts the view and refreshes prev/next.
    /// Returns `None` and touches nothing when no detail element has that id.
    pub fn open_detail(
        &self,
        doc: &mut Document,
        profile: &mut ProfileData,
        id: &NoticeId,
    ) -> Option<Opened> {
        if doc.detail(id).is_none() {
            debug!(%id, "no detail element for notice");
            return None;
        }

        activate_section(doc, SECTION_NOTICE_DETAIL);

        let views = record_view(profile, id);
        for detail in &mut doc.notice_details {
            detail.active = false;
        }
        if let Some(detail) = doc.notice_details.iter_mut().find(|d| &d.id == id) {
            detail.active = true;
            detail.views = views;
            detail.date_text = detail.raw_date.clone();
        }
        if let Some(row) = doc.row_mut(id) {
            row.views = views;
        }

        let (prev, next) = self.update_nav(doc, id);
        info!(%id, views, "opened notice");

        Some(Opened {
            id: id.clone(),
            views,
            prev,
            next,
        })
    }

    fn update_nav(&self, doc: &mut Document, id: &NoticeId) -> (Option<NavLink>, Option<NavLink>) {
        let neighbors = self.position(id).map(|index| {
            let prev = index.checked_sub(1).and_then(|i| self.notices.get(i));
            let next = self.notices.get(index + 1);
            (prev, next)
        });
        let (prev, next) = neighbors.unwrap_or((None, None));

        set_nav(&mut doc.prev, prev);
        set_nav(&mut doc.next, next);

        let link = |notice: &Notice| NavLink {
            id: notice.id.clone(),
            title: notice.title.clone(),
        };
        (prev.map(link), next.map(link))
    }
}

fn set_nav(control: &mut NavControl, neighbor: Option<&Notice>) {
    match neighbor {
        Some(notice) => {
            control.visible = true;
            control.title = notice.title.clone();
            control.action = Some(Action::OpenNotice(notice.id.clone()));
        }
        None => {
            control.visible = false;
            control.action = None;
        }
    }
}
