use crate::dom::{
    Action, Document, MenuPlacement, NavControl, Section, SECTION_INTRO, SECTION_NOTICE,
    SECTION_NOTICE_DETAIL,
};
use crate::page::Page;
use std::fmt::Write;

pub fn render_page(page: &Page) -> String {
    let doc = &page.document;
    let count = doc
        .notice_count
        .map(|count| count.to_string())
        .unwrap_or_else(|| "-".to_string());

    INDEX_HTML
        .replace("{{HEADER_MENU}}", &render_menu(doc, MenuPlacement::Header))
        .replace("{{DRAWER_MENU}}", &render_menu(doc, MenuPlacement::Drawer))
        .replace("{{DRAWER_CLASS}}", &active_class("drawer", doc.drawer_open))
        .replace("{{OVERLAY_CLASS}}", &active_class("overlay", doc.overlay_active))
        .replace("{{CALL_CLASS}}", &active_class("call-actions", doc.call_actions_open))
        .replace("{{CALL_BUTTONS}}", &render_call_buttons(doc))
        .replace("{{SECTIONS}}", &render_sections(doc, &count))
}

fn render_menu(doc: &Document, placement: MenuPlacement) -> String {
    let mut out = String::new();
    for button in doc.menu_buttons.iter().filter(|b| b.placement == placement) {
        let _ = write!(
            out,
            r#"<form method="post" action="{path}"><button type="submit" class="{class}" data-target="{target}">{label}</button></form>"#,
            path = escape(&action_path(&button.action())),
            target = escape(&button.target),
            class = active_class("menu-btn", button.active),
            label = escape(&button.label),
        );
    }
    out
}

fn render_sections(doc: &Document, count: &str) -> String {
    let mut out = String::new();
    for section in &doc.sections {
        let body = match section.id.as_str() {
            SECTION_INTRO => render_intro(doc),
            SECTION_NOTICE => render_notice_list(doc, count),
            SECTION_NOTICE_DETAIL => render_notice_detail(doc),
            _ => String::new(),
        };
        let _ = write!(
            out,
            r#"<section id="{id}" class="{class}"><h2>{title}</h2>{body}</section>"#,
            id = escape(&section.id),
            class = section_class(section),
            title = escape(&section.title),
        );
    }
    out
}

fn section_class(section: &Section) -> String {
    active_class("section", section.active)
}

fn render_intro(doc: &Document) -> String {
    let mut out = String::from(r#"<ul class="intro-notice-list">"#);
    for item in &doc.intro_notices {
        let _ = write!(
            out,
            r#"<li><form method="post" action="{path}"><button type="submit" class="link">{title}</button></form></li>"#,
            path = escape(&action_path(&item.action())),
            title = escape(&item.title),
        );
    }
    out.push_str("</ul>");
    let _ = write!(
        out,
        r#"<form method="post" action="{path}"><button type="submit" id="noticeMore">More notices</button></form>"#,
        path = action_path(&Action::ShowNoticeList),
    );
    out
}

fn render_notice_list(doc: &Document, count: &str) -> String {
    let mut out = format!(
        r#"<form class="notice-search" method="post" action="/notices/search"><input id="noticeSearch" name="q" value="{query}" placeholder="Search titles" /><button type="submit" id="noticeSearchBtn">Search</button></form><p class="notice-total">Total <span id="noticeCount">{count}</span></p><ul class="notice-list">"#,
        query = escape(&doc.search_query),
    );
    for row in &doc.notice_list {
        let _ = write!(
            out,
            r#"<li data-id="{id}" data-date="{date}"{hidden}><form method="post" action="{path}"><button type="submit" class="link"><div class="notice-title">{title}</div><div class="notice-meta-row">{author} · {date} · Views <span class="view">{views}</span></div></button></form></li>"#,
            id = escape(row.id.as_str()),
            path = escape(&action_path(&row.action())),
            date = escape(&row.date),
            hidden = if row.visible { "" } else { " hidden" },
            title = escape(&row.title),
            author = escape(&row.author),
            views = row.views,
        );
    }
    out.push_str("</ul>");
    out
}

fn render_notice_detail(doc: &Document) -> String {
    let mut out = String::new();
    for detail in &doc.notice_details {
        let _ = write!(
            out,
            r#"<article class="{class}" data-id="{id}"{hidden}><h3>{title}</h3><div class="notice-meta">{author} · <span data-date="{raw}">{date}</span> · Views <span class="view">{views}</span></div><div class="notice-content">{content}</div></article>"#,
            class = active_class("notice-detail", detail.active),
            id = escape(detail.id.as_str()),
            hidden = if detail.active { "" } else { " hidden" },
            title = escape(&detail.title),
            author = escape(&detail.author),
            raw = escape(&detail.raw_date),
            date = escape(&detail.date_text),
            views = detail.views,
            content = detail.content,
        );
    }
    out.push_str(r#"<nav class="notice-nav">"#);
    out.push_str(&render_nav("notice-prev", "Previous", &doc.prev));
    out.push_str(&render_nav("notice-next", "Next", &doc.next));
    out.push_str("</nav>");
    out.push_str(r#"<form method="post" action="/notices/back"><button type="submit" class="notice-list-back">Back to list</button></form>"#);
    out
}

fn render_nav(class: &str, label: &str, control: &NavControl) -> String {
    match (control.visible, &control.action) {
        (true, Some(action)) => format!(
            r#"<form method="post" action="{path}" class="{class}"><button type="submit"><span class="label">{label}</span> <span class="title">{title}</span></button></form>"#,
            path = escape(&action_path(action)),
            title = escape(&control.title),
        ),
        _ => format!(r#"<div class="{class}" hidden></div>"#),
    }
}

fn render_call_buttons(doc: &Document) -> String {
    let mut out = String::new();
    for (index, button) in doc.call_buttons.iter().enumerate() {
        let _ = write!(
            out,
            r#"<div class="{class}"><a href="tel:{phone}">{label}</a><span class="tooltip">{phone}</span><form method="post" action="{path}"><button type="submit">i</button></form></div>"#,
            class = if button.show_tooltip { "call-btn show-tooltip" } else { "call-btn" },
            phone = escape(&button.phone),
            label = escape(&button.label),
            path = action_path(&Action::ToggleCallTooltip(index)),
        );
    }
    out
}

/// Form target for an action. Path parameters are percent-encoded so any
/// notice id stays a single segment.
pub fn action_path(action: &Action) -> String {
    match action {
        Action::SelectMenu(target) => format!("/sections/{}", urlencoding::encode(target)),
        Action::OpenNotice(id) => format!("/notices/{}/open", urlencoding::encode(id.as_str())),
        Action::ShowNoticeList => "/notices/more".to_string(),
        Action::Search(_) => "/notices/search".to_string(),
        Action::OpenDrawer => "/drawer/open".to_string(),
        Action::CloseDrawer => "/drawer/close".to_string(),
        Action::ToggleCallActions => "/call/toggle".to_string(),
        Action::ToggleCallTooltip(index) => format!("/call/{index}/tooltip"),
    }
}

fn active_class(base: &str, active: bool) -> String {
    if active {
        format!("{base} active")
    } else {
        base.to_string()
    }
}

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Academy</title>
  <style>
    :root {
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: #ffffff;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      background: #f8f3e6;
    }

    header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      padding: 16px 24px;
      background: var(--card);
    }

    nav.menu, .drawer nav {
      display: flex;
      gap: 8px;
    }

    form {
      display: inline;
      margin: 0;
    }

    button {
      border: none;
      background: transparent;
      font: inherit;
      cursor: pointer;
    }

    .menu-btn.active {
      color: var(--accent);
      font-weight: 600;
    }

    .section {
      display: none;
      max-width: 860px;
      margin: 24px auto;
      padding: 24px;
      background: var(--card);
      border-radius: 18px;
    }

    .section.active {
      display: block;
    }

    .notice-list {
      list-style: none;
      padding: 0;
    }

    .notice-list li {
      padding: 12px 0;
      border-bottom: 1px solid rgba(47, 72, 88, 0.1);
    }

    .notice-title {
      font-weight: 600;
    }

    .notice-meta-row, .notice-meta {
      color: #7a746d;
      font-size: 0.9rem;
    }

    .notice-detail {
      display: none;
    }

    .notice-detail.active {
      display: block;
    }

    .notice-nav {
      display: grid;
      gap: 8px;
      margin: 16px 0;
    }

    .notice-prev, .notice-next {
      display: flex;
    }

    .drawer, .overlay {
      display: none;
    }

    .drawer.active {
      display: block;
      position: fixed;
      top: 0;
      right: 0;
      width: 260px;
      height: 100vh;
      padding: 24px;
      background: var(--card);
    }

    .drawer.active nav {
      flex-direction: column;
    }

    .overlay.active {
      display: block;
      position: fixed;
      inset: 0;
      background: rgba(0, 0, 0, 0.3);
    }

    .call-actions {
      display: none;
    }

    .call-actions.active {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    .call-btn .tooltip {
      display: none;
    }

    @media (min-width: 769px) {
      .call-btn.show-tooltip .tooltip {
        display: inline;
      }
    }

    .call-float {
      position: fixed;
      right: 18px;
      bottom: 18px;
    }
  </style>
</head>
<body>
  <header>
    <strong>Academy</strong>
    <nav class="menu">{{HEADER_MENU}}</nav>
    <form method="post" action="/drawer/open"><button type="submit" id="hamburger">Menu</button></form>
  </header>

  <form method="post" action="/drawer/close" class="{{OVERLAY_CLASS}}" id="menuOverlay"><button type="submit">Close</button></form>
  <aside class="{{DRAWER_CLASS}}" id="mobileDrawer">
    <form method="post" action="/drawer/close"><button type="submit" id="drawerClose">Close</button></form>
    <nav>{{DRAWER_MENU}}</nav>
  </aside>

  <main>{{SECTIONS}}</main>

  <div class="call-float">
    <div class="{{CALL_CLASS}}" id="callActions">
      {{CALL_BUTTONS}}
    </div>
    <form method="post" action="/call/toggle"><button type="submit" id="callToggle">Contact</button></form>
  </div>
</body>
</html>
"#;
