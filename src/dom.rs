//! In-memory model of the host page: the regions the behavior layer reads
//! and writes. The shell (sections, menus, controls) exists before any data
//! is loaded; notice rows and detail elements are built from data.

use crate::models::NoticeId;

pub const SECTION_INTRO: &str = "intro";
pub const SECTION_INSTRUCTOR: &str = "instructor";
pub const SECTION_NOTICE: &str = "notice";
pub const SECTION_NOTICE_DETAIL: &str = "noticeDetail";
pub const SECTION_LOCATION: &str = "location";

pub const INTRO_NOTICE_LIMIT: usize = 5;

/// What a click on an element does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectMenu(String),
    OpenNotice(NoticeId),
    ShowNoticeList,
    Search(String),
    OpenDrawer,
    CloseDrawer,
    ToggleCallActions,
    ToggleCallTooltip(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPlacement {
    Header,
    Drawer,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct MenuButton {
    pub label: String,
    pub target: String,
    pub placement: MenuPlacement,
    pub active: bool,
}

impl MenuButton {
    pub fn action(&self) -> Action {
        Action::SelectMenu(self.target.clone())
    }
}

/// Floating call link. The tooltip only shows on wide viewports.
#[derive(Debug, Clone)]
pub struct CallButton {
    pub label: String,
    pub phone: String,
    pub show_tooltip: bool,
}

#[derive(Debug, Clone)]
pub struct ListRow {
    pub id: NoticeId,
    pub date: String,
    pub title: String,
    pub author: String,
    pub views: u64,
    pub visible: bool,
}

impl ListRow {
    pub fn action(&self) -> Action {
        Action::OpenNotice(self.id.clone())
    }
}

#[derive(Debug, Clone)]
pub struct DetailElement {
    pub id: NoticeId,
    pub title: String,
    pub author: String,
    /// Raw value the date placeholder resolves from.
    pub raw_date: String,
    /// Placeholder text; empty until the detail is opened.
    pub date_text: String,
    pub views: u64,
    pub content: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct IntroItem {
    pub id: NoticeId,
    pub title: String,
}

impl IntroItem {
    pub fn action(&self) -> Action {
        Action::OpenNotice(self.id.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct NavControl {
    pub visible: bool,
    pub title: String,
    pub action: Option<Action>,
}

#[derive(Debug, Clone)]
pub struct Document {
    pub sections: Vec<Section>,
    pub menu_buttons: Vec<MenuButton>,
    pub notice_list: Vec<ListRow>,
    pub notice_details: Vec<DetailElement>,
    pub intro_notices: Vec<IntroItem>,
    pub notice_count: Option<usize>,
    pub prev: NavControl,
    pub next: NavControl,
    pub search_query: String,
    pub drawer_open: bool,
    pub overlay_active: bool,
    pub call_actions_open: bool,
    pub call_buttons: Vec<CallButton>,
}

impl Document {
    /// The static page structure as it exists before any data arrives.
    pub fn shell() -> Self {
        let menu = [
            (SECTION_INTRO, "Home"),
            (SECTION_INSTRUCTOR, "Instructors"),
            (SECTION_NOTICE, "Notices"),
            (SECTION_LOCATION, "Location"),
        ];
        let sections = [
            (SECTION_INTRO, "Welcome"),
            (SECTION_INSTRUCTOR, "Instructors"),
            (SECTION_NOTICE, "Notices"),
            (SECTION_NOTICE_DETAIL, "Notice"),
            (SECTION_LOCATION, "Location"),
        ]
        .into_iter()
        .map(|(id, title)| Section {
            id: id.to_string(),
            title: title.to_string(),
            active: id == SECTION_INTRO,
        })
        .collect();

        let menu_buttons = [MenuPlacement::Header, MenuPlacement::Drawer]
            .into_iter()
            .flat_map(|placement| {
                menu.iter().map(move |(target, label)| MenuButton {
                    label: label.to_string(),
                    target: target.to_string(),
                    placement,
                    active: *target == SECTION_INTRO,
                })
            })
            .collect();

        Self {
            sections,
            menu_buttons,
            notice_list: Vec::new(),
            notice_details: Vec::new(),
            intro_notices: Vec::new(),
            notice_count: None,
            prev: NavControl::default(),
            next: NavControl::default(),
            search_query: String::new(),
            drawer_open: false,
            overlay_active: false,
            call_actions_open: false,
            call_buttons: [("Front desk", "02-000-0000"), ("Admissions", "02-000-0001")]
                .into_iter()
                .map(|(label, phone)| CallButton {
                    label: label.to_string(),
                    phone: phone.to_string(),
                    show_tooltip: false,
                })
                .collect(),
        }
    }

    pub fn active_section(&self) -> Option<&Section> {
        self.sections.iter().find(|section| section.active)
    }

    pub fn row(&self, id: &NoticeId) -> Option<&ListRow> {
        self.notice_list.iter().find(|row| &row.id == id)
    }

    pub fn row_mut(&mut self, id: &NoticeId) -> Option<&mut ListRow> {
        self.notice_list.iter_mut().find(|row| &row.id == id)
    }

    pub fn detail(&self, id: &NoticeId) -> Option<&DetailElement> {
        self.notice_details.iter().find(|detail| &detail.id == id)
    }

    pub fn active_detail(&self) -> Option<&DetailElement> {
        self.notice_details.iter().find(|detail| detail.active)
    }
}
