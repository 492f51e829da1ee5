use crate::dom::{Action, Document, SECTION_NOTICE};
use crate::models::{Notice, NoticeId, PageResponse, ProfileData};
use crate::navigation;
use crate::notices::{NoticeBoard, Opened};
use crate::search;
use tracing::{info, warn};

/// One page session: the document, the loaded notices (if any) and the
/// profile store backing view counts.
#[derive(Debug)]
pub struct Page {
    pub document: Document,
    pub profile: ProfileData,
    board: Option<NoticeBoard>,
}

/// Result of applying an action to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Updated,
    Opened(Opened),
    Filtered(Vec<NoticeId>),
    Ignored,
}

impl Outcome {
    /// Whether the profile store changed and should be written back.
    pub fn touches_profile(&self) -> bool {
        matches!(self, Outcome::Opened(_))
    }
}

impl Page {
    pub fn new(profile: ProfileData) -> Self {
        Self {
            document: Document::shell(),
            profile,
            board: None,
        }
    }

    /// Installs the notice snapshot and renders every region that depends on
    /// it. Only the first load takes effect.
    pub fn load(&mut self, notices: Vec<Notice>) -> bool {
        if self.board.is_some() {
            warn!("notices already loaded; ignoring second load");
            return false;
        }

        let board = NoticeBoard::new(notices);
        board.render_list(&mut self.document, &self.profile);
        board.render_details(&mut self.document, &self.profile);
        board.update_count(&mut self.document);
        board.render_intro(&mut self.document);
        info!(count = board.notices().len(), "notices rendered");

        self.board = Some(board);
        true
    }

    pub fn dispatch(&mut self, action: Action) -> Outcome {
        match action {
            Action::SelectMenu(target) => {
                navigation::select_menu(&mut self.document, &target);
                Outcome::Updated
            }
            Action::OpenNotice(id) => {
                let Some(board) = &self.board else {
                    return Outcome::Ignored;
                };
                match board.open_detail(&mut self.document, &mut self.profile, &id) {
                    Some(opened) => Outcome::Opened(opened),
                    None => Outcome::Ignored,
                }
            }
            Action::ShowNoticeList => {
                navigation::activate_section(&mut self.document, SECTION_NOTICE);
                Outcome::Updated
            }
            Action::Search(query) => Outcome::Filtered(self.search(&query)),
            Action::OpenDrawer => {
                navigation::open_drawer(&mut self.document);
                Outcome::Updated
            }
            Action::CloseDrawer => {
                navigation::close_drawer(&mut self.document);
                Outcome::Updated
            }
            Action::ToggleCallActions => {
                navigation::toggle_call_actions(&mut self.document);
                Outcome::Updated
            }
            Action::ToggleCallTooltip(index) => {
                navigation::toggle_call_tooltip(&mut self.document, index);
                Outcome::Updated
            }
        }
    }

    /// Stores the query and returns the ids of the rows left visible.
    pub fn search(&mut self, query: &str) -> Vec<NoticeId> {
        search::set_query(&mut self.document, query);
        search::filter_notices(&mut self.document)
    }

    pub fn snapshot(&self) -> PageResponse {
        PageResponse {
            active_section: self.document.active_section().map(|s| s.id.clone()),
            active_notice: self.document.active_detail().map(|d| d.id.clone()),
            notice_count: self.document.notice_count,
            query: self.document.search_query.clone(),
            drawer_open: self.document.drawer_open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{SECTION_INTRO, SECTION_NOTICE_DETAIL};
    use crate::view_counts::view_count;

    fn notices() -> Vec<Notice> {
        ["Spring Notice", "Autumn Break", "Winter Notice"]
            .iter()
            .enumerate()
            .map(|(i, title)| Notice {
                id: NoticeId::new((i + 1).to_string()),
                title: title.to_string(),
                author: "Office".into(),
                date: "2025-05-02".into(),
                content: vec![format!("<p>{title}</p>")],
            })
            .collect()
    }

    #[test]
    fn shell_without_data_ignores_opens() {
        let mut page = Page::new(ProfileData::default());
        let outcome = page.dispatch(Action::OpenNotice(NoticeId::new("1")));
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(page.snapshot().active_section.as_deref(), Some(SECTION_INTRO));
        assert!(page.snapshot().notice_count.is_none());
    }

    #[test]
    fn second_load_is_ignored() {
        let mut page = Page::new(ProfileData::default());
        assert!(page.load(notices()));
        assert!(!page.load(notices()[..1].to_vec()));
        assert_eq!(page.document.notice_list.len(), 3);
        assert_eq!(page.document.notice_count, Some(3));
    }

    #[test]
    fn open_then_back_to_list() {
        let mut page = Page::new(ProfileData::default());
        page.load(notices());

        let outcome = page.dispatch(Action::OpenNotice(NoticeId::new("2")));
        assert!(outcome.touches_profile());
        assert_eq!(
            page.snapshot().active_section.as_deref(),
            Some(SECTION_NOTICE_DETAIL)
        );
        assert_eq!(view_count(&page.profile, &NoticeId::new("2")), 1);

        assert_eq!(page.dispatch(Action::ShowNoticeList), Outcome::Updated);
        assert_eq!(page.snapshot().active_section.as_deref(), Some(SECTION_NOTICE));
    }

    #[test]
    fn prev_control_action_reopens_neighbor() {
        let mut page = Page::new(ProfileData::default());
        page.load(notices());
        page.dispatch(Action::OpenNotice(NoticeId::new("2")));

        let action = page.document.prev.action.clone().unwrap();
        page.dispatch(action);
        assert_eq!(page.snapshot().active_notice, Some(NoticeId::new("1")));
        assert_eq!(view_count(&page.profile, &NoticeId::new("1")), 1);
    }

    #[test]
    fn search_action_filters_rows() {
        let mut page = Page::new(ProfileData::default());
        page.load(notices());

        let outcome = page.dispatch(Action::Search("notice".into()));
        assert_eq!(
            outcome,
            Outcome::Filtered(vec![NoticeId::new("1"), NoticeId::new("3")])
        );
        assert!(!outcome.touches_profile());
        assert_eq!(page.snapshot().query, "notice");
    }

    #[test]
    fn search_without_data_leaves_nothing_visible() {
        let mut page = Page::new(ProfileData::default());
        assert!(page.search("notice").is_empty());

        page.load(notices());
        assert_eq!(page.search("WINTER"), vec![NoticeId::new("3")]);
        assert_eq!(page.search("").len(), 3);
    }

    #[test]
    fn reload_keeps_counts_and_rebuilds_document() {
        let mut page = Page::new(ProfileData::default());
        page.load(notices());
        page.dispatch(Action::OpenNotice(NoticeId::new("3")));
        page.dispatch(Action::Search("autumn".into()));

        let mut reloaded = Page::new(page.profile.clone());
        reloaded.load(notices());
        let row = reloaded.document.row(&NoticeId::new("3")).unwrap();
        assert_eq!(row.views, 1);
        assert!(reloaded.document.notice_list.iter().all(|r| r.visible));
        assert!(reloaded.document.active_detail().is_none());
        assert!(reloaded.snapshot().query.is_empty());
    }
}
