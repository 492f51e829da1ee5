use once_cell::sync::Lazy;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct NavLink {
    id: String,
    title: String,
}

#[derive(Debug, Deserialize)]
struct OpenNoticeResponse {
    id: String,
    views: u64,
    prev: Option<NavLink>,
    next: Option<NavLink>,
}

#[derive(Debug, Deserialize)]
struct NoticeRow {
    id: String,
    views: u64,
    visible: bool,
}

#[derive(Debug, Deserialize)]
struct PageResponse {
    active_section: Option<String>,
    active_notice: Option<String>,
    notice_count: Option<usize>,
    query: String,
}

const NOTICES: &str = r#"[
  {"id": 1, "title": "Spring Notice", "author": "Office", "date": "2025-03-02", "content": ["<p>Spring term opens.</p>"]},
  {"id": 2, "title": "Autumn Break", "author": "Office", "date": "2025-09-20", "content": ["<p>No classes.</p>"]},
  {"id": 3, "title": "Winter Notice", "author": "Office", "date": "2025-12-01", "content": ["<p>Heating schedule.</p>"]}
]"#;

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        PID.store(pid as i32, Ordering::SeqCst);
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_dir() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("academy_site_http_{}_{}", std::process::id(), nanos));
    std::fs::create_dir_all(&path).expect("create temp dir");
    path
}

fn seeded_dir() -> PathBuf {
    seeded_dir_with(NOTICES)
}

fn seeded_dir_with(notices: &str) -> PathBuf {
    let dir = unique_dir();
    std::fs::write(dir.join("notices.json"), notices).expect("write notices");
    dir
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/page")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(data_dir: &Path) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_academy_site"))
        .env("PORT", port.to_string())
        .env("SITE_DATA_DIR", data_dir)
        .env("SITE_PROFILE_PATH", data_dir.join("profile.json"))
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn rows(client: &Client, server: &TestServer) -> Vec<NoticeRow> {
    client
        .get(format!("{}/api/notices", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn page(client: &Client, server: &TestServer) -> PageResponse {
    client
        .get(format!("{}/api/page", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_open_notice_counts_view() {
    let _guard = TEST_LOCK.lock().await;
    let server = spawn_server(&seeded_dir()).await;
    let client = Client::new();

    let opened: OpenNoticeResponse = client
        .post(format!("{}/api/notices/2/open", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(opened.id, "2");
    assert_eq!(opened.views, 1);
    let prev = opened.prev.expect("prev link");
    assert_eq!((prev.id.as_str(), prev.title.as_str()), ("1", "Spring Notice"));
    assert_eq!(opened.next.expect("next link").id, "3");

    let listed = rows(&client, &server).await;
    let row = listed.iter().find(|row| row.id == "2").unwrap();
    assert_eq!(row.views, 1);

    let state = page(&client, &server).await;
    assert_eq!(state.active_section.as_deref(), Some("noticeDetail"));
    assert_eq!(state.active_notice.as_deref(), Some("2"));
    assert_eq!(state.notice_count, Some(3));
}

#[tokio::test]
async fn http_unknown_notice_changes_nothing() {
    let _guard = TEST_LOCK.lock().await;
    let server = spawn_server(&seeded_dir()).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/notices/99/open", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert!(rows(&client, &server).await.iter().all(|row| row.views == 0));
    let state = page(&client, &server).await;
    assert_eq!(state.active_section.as_deref(), Some("intro"));
    assert!(state.active_notice.is_none());
}

#[tokio::test]
async fn http_search_form_filters_rows() {
    let _guard = TEST_LOCK.lock().await;
    let server = spawn_server(&seeded_dir()).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/notices/search", server.base_url))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body("q=notice")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"<li data-id="2" data-date="2025-09-20" hidden>"#));

    let visible: Vec<String> = rows(&client, &server)
        .await
        .into_iter()
        .filter(|row| row.visible)
        .map(|row| row.id)
        .collect();
    assert_eq!(visible, vec!["1".to_string(), "3".to_string()]);
    assert_eq!(page(&client, &server).await.query, "notice");

    client
        .post(format!("{}/notices/search", server.base_url))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body("q=")
        .send()
        .await
        .unwrap();
    assert!(rows(&client, &server).await.iter().all(|row| row.visible));
}

#[tokio::test]
async fn http_counts_survive_restart() {
    let _guard = TEST_LOCK.lock().await;
    let dir = seeded_dir();
    let client = Client::new();

    {
        let server = spawn_server(&dir).await;
        for _ in 0..2 {
            let response = client
                .post(format!("{}/notices/1/open", server.base_url))
                .send()
                .await
                .unwrap();
            assert!(response.status().is_success());
        }
    }

    let server = spawn_server(&dir).await;
    let listed = rows(&client, &server).await;
    assert_eq!(listed.iter().find(|row| row.id == "1").unwrap().views, 2);
    let state = page(&client, &server).await;
    assert_eq!(state.active_section.as_deref(), Some("intro"));
    assert!(state.active_notice.is_none());
}

#[tokio::test]
async fn http_missing_data_serves_shell() {
    let _guard = TEST_LOCK.lock().await;
    let server = spawn_server(&unique_dir()).await;
    let client = Client::new();

    let index = client.get(&server.base_url).send().await.unwrap();
    assert!(index.status().is_success());

    let state = page(&client, &server).await;
    assert!(state.notice_count.is_none());
    assert!(rows(&client, &server).await.is_empty());

    let raw = client
        .get(format!("{}/data/notices.json", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(raw.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_rendered_links_open_ids_with_reserved_characters() {
    let _guard = TEST_LOCK.lock().await;
    let server = spawn_server(&seeded_dir_with(
        r#"[
          {"id": "2025/01", "title": "January schedule", "author": "Office", "date": "2025-01-02", "content": []},
          {"id": "a#b", "title": "Room change", "author": "Office", "date": "2025-01-05", "content": []}
        ]"#,
    ))
    .await;
    let client = Client::new();

    let html = client
        .get(&server.base_url)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    for (id, path) in [("2025/01", "/notices/2025%2F01/open"), ("a#b", "/notices/a%23b/open")] {
        assert!(html.contains(&format!(r#"action="{path}""#)), "missing link for {id}");
        let response = client
            .post(format!("{}{path}", server.base_url))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());

        let state = page(&client, &server).await;
        assert_eq!(state.active_notice.as_deref(), Some(id));
    }

    let listed = rows(&client, &server).await;
    assert!(listed.iter().all(|row| row.views == 1));
}
