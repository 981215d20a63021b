mod common;

use common::{client, start_server};

async fn page(http: &reqwest::Client, url: &str) -> String {
    let resp = http.get(url).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    resp.text().await.unwrap()
}

async fn create(http: &reqwest::Client, url: &str, fields: &[(&str, &str)]) -> reqwest::Response {
    http.post(url).form(fields).send().await.unwrap()
}

fn assert_redirects_to_list(resp: &reqwest::Response) {
    assert_eq!(resp.status(), 302);
    assert_eq!(
        resp.headers().get("location").and_then(|v| v.to_str().ok()),
        Some("/todos/")
    );
}

#[tokio::test]
async fn root_redirects_to_list() {
    let server = start_server().await;
    let resp = client().get(server.url("/")).send().await.unwrap();
    assert_redirects_to_list(&resp);
    server.stop().await;
}

#[tokio::test]
async fn list_shows_every_todo() {
    let server = start_server().await;
    let http = client();
    let create_url = server.url("/todos/create/");
    create(&http, &create_url, &[("title", "Test TODO 1")]).await;
    create(&http, &create_url, &[("title", "Test TODO 2")]).await;

    let html = page(&http, &server.url("/todos/")).await;
    assert!(html.contains("Test TODO 1"));
    assert!(html.contains("Test TODO 2"));

    let html = page(&http, &server.url("/todos")).await;
    assert!(html.contains("Test TODO 1"));

    server.stop().await;
}

#[tokio::test]
async fn create_with_all_fields() {
    let server = start_server().await;
    let http = client();
    let resp = create(
        &http,
        &server.url("/todos/create/"),
        &[
            ("title", "New TODO"),
            ("description", "New description"),
            ("due_date", "2025-12-31"),
        ],
    )
    .await;
    assert_redirects_to_list(&resp);

    let html = page(&http, &server.url("/todos/")).await;
    assert!(html.contains("New TODO"));
    assert!(html.contains("New description"));
    assert!(html.contains("due 2025-12-31"));
    assert!(html.contains("class=\"open\" id=\"todo-1\""));

    server.stop().await;
}

#[tokio::test]
async fn create_without_optional_fields() {
    let server = start_server().await;
    let http = client();
    let resp = create(&http, &server.url("/todos/create/"), &[("title", "Simple TODO")]).await;
    assert_redirects_to_list(&resp);

    let html = page(&http, &server.url("/todos/")).await;
    assert!(html.contains("Simple TODO"));
    assert!(!html.contains("class=\"due\""));

    server.stop().await;
}

#[tokio::test]
async fn empty_title_creates_nothing() {
    let server = start_server().await;
    let http = client();
    let resp = create(&http, &server.url("/todos/create/"), &[("title", "")]).await;
    assert_redirects_to_list(&resp);
    let html = page(&http, &server.url("/todos/")).await;
    assert!(html.contains("Nothing to do yet."));
    server.stop().await;
}

#[tokio::test]
async fn rejects_bad_input() {
    let server = start_server().await;
    let http = client();
    let url = server.url("/todos/create/");

    let resp = create(&http, &url, &[("title", "Dated"), ("due_date", "31/12/2025")]).await;
    assert_eq!(resp.status(), 400);

    let long = "x".repeat(201);
    let resp = create(&http, &url, &[("title", long.as_str())]).await;
    assert_eq!(resp.status(), 400);

    let html = page(&http, &server.url("/todos/")).await;
    assert!(html.contains("Nothing to do yet."));

    server.stop().await;
}

#[tokio::test]
async fn update_changes_fields() {
    let server = start_server().await;
    let http = client();
    create(&http, &server.url("/todos/create/"), &[("title", "Original Title")]).await;

    let resp = http
        .post(server.url("/todos/update/1/"))
        .form(&[
            ("title", "Updated Title"),
            ("description", "Updated description"),
            ("due_date", "2025-12-31"),
        ])
        .send()
        .await
        .unwrap();
    assert_redirects_to_list(&resp);

    let html = page(&http, &server.url("/todos/")).await;
    assert!(html.contains("Updated Title"));
    assert!(html.contains("Updated description"));
    assert!(!html.contains("Original Title"));

    server.stop().await;
}

#[tokio::test]
async fn delete_removes_todo() {
    let server = start_server().await;
    let http = client();
    create(&http, &server.url("/todos/create/"), &[("title", "To Be Deleted")]).await;
    assert!(page(&http, &server.url("/todos/")).await.contains("To Be Deleted"));

    let resp = http
        .post(server.url("/todos/delete/1/"))
        .send()
        .await
        .unwrap();
    assert_redirects_to_list(&resp);
    assert!(!page(&http, &server.url("/todos/")).await.contains("To Be Deleted"));

    server.stop().await;
}

#[tokio::test]
async fn toggle_flips_resolved() {
    let server = start_server().await;
    let http = client();
    create(&http, &server.url("/todos/create/"), &[("title", "Test TODO")]).await;

    let resp = http
        .post(server.url("/todos/toggle/1/"))
        .send()
        .await
        .unwrap();
    assert_redirects_to_list(&resp);
    assert!(
        page(&http, &server.url("/todos/"))
            .await
            .contains("class=\"resolved\" id=\"todo-1\"")
    );

    http.post(server.url("/todos/toggle/1/"))
        .send()
        .await
        .unwrap();
    assert!(
        page(&http, &server.url("/todos/"))
            .await
            .contains("class=\"open\" id=\"todo-1\"")
    );

    server.stop().await;
}

#[tokio::test]
async fn newest_first() {
    let server = start_server().await;
    let http = client();
    let url = server.url("/todos/create/");
    create(&http, &url, &[("title", "First TODO")]).await;
    create(&http, &url, &[("title", "Second TODO")]).await;

    let html = page(&http, &server.url("/todos/")).await;
    let first = html.find("First TODO").unwrap();
    let second = html.find("Second TODO").unwrap();
    assert!(second < first);

    server.stop().await;
}

#[tokio::test]
async fn unknown_todo_is_not_found() {
    let server = start_server().await;
    let http = client();
    for path in [
        "/todos/delete/999/",
        "/todos/toggle/999/",
        "/todos/update/999/",
    ] {
        let resp = http
            .post(server.url(path))
            .form(&[("title", "x")])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 404, "{path}");
    }
    server.stop().await;
}
