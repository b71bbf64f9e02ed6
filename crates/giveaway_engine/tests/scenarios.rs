use giveaway_core::{CommentPool, FailureKind, RunEvent};
use giveaway_engine::{
    start_run, Credentials, DispatchSettings, EngineEvent, EngineHandle, RunConfig, RunError,
    SessionError, SiteSettings,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UA: &str = "Mozilla/5.0 (test agent)";
const PROBE_OK: &str = r#"<form><input type="hidden" id="form_key" value="tok-9"></form>"#;
const ENTERABLE: &str =
    r#"<form id="form_enter_giveaway"><a class="rounded view submit_entry">Enter</a></form>"#;
const CONTRIBUTOR_ONLY: &str =
    r#"<form id="form_enter_giveaway"><a class="rounded view">Contributors only</a></form>"#;

fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into(), "text/html; charset=utf-8")
}

fn listing(href: &str) -> String {
    format!(
        r#"<div class="post"><div class="left"><div class="title"><a href="{href}">Game</a></div></div></div>"#
    )
}

fn config(server: &MockServer, titles: &[&str]) -> RunConfig {
    RunConfig {
        site: SiteSettings::with_base_url(server.uri()),
        credentials: Credentials::new("sess", UA),
        dispatch: DispatchSettings::default(),
        titles: titles.iter().map(|t| t.to_string()).collect(),
        comments: CommentPool::new(vec!["Thank you!".to_string()]).unwrap(),
    }
}

async fn mount_probe(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/forum/new"))
        .respond_with(html(PROBE_OK))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_search(server: &MockServer, query: &str, href: &str) {
    Mock::given(method("POST"))
        .and(path("/ajax_gifts.php"))
        .and(body_string(format!("view=open&query={query}")))
        .respond_with(html(listing(href)))
        .expect(1)
        .mount(server)
        .await;
}

/// Giveaway page plus the entry and comment endpoints, each expected once.
async fn mount_enterable(server: &MockServer, giveaway: &str) {
    Mock::given(method("GET"))
        .and(path(giveaway))
        .respond_with(html(ENTERABLE))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(giveaway))
        .and(body_string("enter_giveaway=1&form_key=tok-9"))
        .respond_with(html("entered"))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(giveaway))
        .and(body_string(
            "submit_comment=Submit+Comment&parent_id=0&form_key=tok-9&body=Thank+you%21",
        ))
        .respond_with(html("commented"))
        .expect(1)
        .mount(server)
        .await;
}

async fn drain(config: RunConfig) -> Vec<RunEvent> {
    let mut stream = start_run(config).await.expect("session ok");
    let mut events = Vec::new();
    while let Some(event) = stream.next().await {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn single_enterable_giveaway_is_entered_and_commented() {
    let server = MockServer::start().await;
    mount_probe(&server).await;
    mount_search(&server, "Game+A", "/giveaway/Aa1/game-a/").await;
    mount_enterable(&server, "/giveaway/Aa1/game-a/").await;

    let events = drain(config(&server, &["Game A"])).await;

    assert_eq!(events.len(), 2);
    let RunEvent::Outcome(outcome) = &events[0] else {
        panic!("expected an outcome first: {events:?}");
    };
    assert_eq!(outcome.title, "Game A");
    assert_eq!(
        outcome.url.as_deref(),
        Some(format!("{}/giveaway/Aa1/game-a/", server.uri()).as_str())
    );
    assert_eq!(outcome.comment(), Some("Thank you!"));
    assert_eq!(events[1], RunEvent::Done);
}

#[tokio::test]
async fn contributor_only_giveaway_yields_only_done() {
    let server = MockServer::start().await;
    mount_probe(&server).await;
    mount_search(&server, "Game+B", "/giveaway/Bb2/").await;
    Mock::given(method("GET"))
        .and(path("/giveaway/Bb2/"))
        .respond_with(html(CONTRIBUTOR_ONLY))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/giveaway/Bb2/"))
        .respond_with(html("nope"))
        .expect(0)
        .mount(&server)
        .await;

    let events = drain(config(&server, &["Game B"])).await;

    assert_eq!(events, vec![RunEvent::Done]);
}

#[tokio::test]
async fn failed_search_yields_one_title_outcome() {
    let server = MockServer::start().await;
    mount_probe(&server).await;
    Mock::given(method("POST"))
        .and(path("/ajax_gifts.php"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let events = drain(config(&server, &["Game C"])).await;

    assert_eq!(events.len(), 2);
    let RunEvent::Outcome(outcome) = &events[0] else {
        panic!("expected an outcome first: {events:?}");
    };
    assert_eq!(outcome.title, "Game C");
    assert_eq!(outcome.url, None);
    assert_eq!(outcome.error().map(|e| e.kind), Some(FailureKind::SearchFailed));
    assert_eq!(events[1], RunEvent::Done);
}

#[tokio::test]
async fn two_titles_run_concurrently_then_done() {
    let server = MockServer::start().await;
    mount_probe(&server).await;
    mount_search(&server, "X", "/giveaway/xx/").await;
    mount_search(&server, "Y", "/giveaway/yy/").await;
    mount_enterable(&server, "/giveaway/xx/").await;
    mount_enterable(&server, "/giveaway/yy/").await;

    let events = drain(config(&server, &["X", "Y"])).await;

    assert_eq!(events.len(), 3);
    assert_eq!(events[2], RunEvent::Done);
    let mut titles: Vec<String> = events[..2]
        .iter()
        .map(|event| match event {
            RunEvent::Outcome(outcome) => {
                assert!(outcome.is_success(), "{outcome:?}");
                outcome.title.clone()
            }
            RunEvent::Done => panic!("Done before every outcome"),
        })
        .collect();
    titles.sort();
    assert_eq!(titles, vec!["X".to_string(), "Y".to_string()]);
}

#[tokio::test]
async fn invalid_session_issues_no_searches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forum/new"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/?login"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ajax_gifts.php"))
        .respond_with(html("<div></div>"))
        .expect(0)
        .mount(&server)
        .await;

    let result = start_run(config(&server, &["Game A", "Game B"])).await;

    assert!(matches!(
        result,
        Err(RunError::Session(SessionError::InvalidSession(_)))
    ));
}

#[tokio::test]
async fn missing_token_issues_no_searches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forum/new"))
        .respond_with(html("<html>logged in, but no form</html>"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ajax_gifts.php"))
        .respond_with(html("<div></div>"))
        .expect(0)
        .mount(&server)
        .await;

    let result = start_run(config(&server, &["Game A"])).await;

    assert!(matches!(
        result,
        Err(RunError::Session(SessionError::TokenNotFound))
    ));
}

#[tokio::test]
async fn entry_posted_even_when_comment_is_rejected() {
    let server = MockServer::start().await;
    mount_probe(&server).await;
    mount_search(&server, "Game", "/giveaway/cc/").await;
    Mock::given(method("GET"))
        .and(path("/giveaway/cc/"))
        .respond_with(html(ENTERABLE))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/giveaway/cc/"))
        .and(body_string_contains("enter_giveaway=1"))
        .respond_with(html("entered"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/giveaway/cc/"))
        .and(body_string_contains("submit_comment"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let events = drain(config(&server, &["Game"])).await;

    let RunEvent::Outcome(outcome) = &events[0] else {
        panic!("expected an outcome first: {events:?}");
    };
    assert_eq!(outcome.error().map(|e| e.kind), Some(FailureKind::CommentFailed));
    assert_eq!(events.last(), Some(&RunEvent::Done));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn engine_handle_reports_session_then_outcomes_then_done() {
    let server = MockServer::start().await;
    mount_probe(&server).await;
    mount_search(&server, "Game+A", "/giveaway/Aa1/").await;
    mount_enterable(&server, "/giveaway/Aa1/").await;

    let handle = EngineHandle::start(config(&server, &["Game A"]));
    let events = tokio::task::spawn_blocking(move || {
        let mut events = Vec::new();
        while let Some(event) = handle.recv() {
            events.push(event);
        }
        events
    })
    .await
    .unwrap();

    assert_eq!(events.len(), 3, "{events:?}");
    assert_eq!(events[0], EngineEvent::SessionReady);
    assert!(matches!(&events[1], EngineEvent::Run(RunEvent::Outcome(o)) if o.is_success()));
    assert_eq!(events[2], EngineEvent::Run(RunEvent::Done));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn engine_handle_aborts_on_bad_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forum/new"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/?login"))
        .mount(&server)
        .await;

    let handle = EngineHandle::start(config(&server, &["Game A"]));
    let events = tokio::task::spawn_blocking(move || {
        let mut events = Vec::new();
        while let Some(event) = handle.recv() {
            events.push(event);
        }
        events
    })
    .await
    .unwrap();

    assert_eq!(events.len(), 1, "{events:?}");
    assert!(matches!(
        &events[0],
        EngineEvent::Aborted(RunError::Session(SessionError::InvalidSession(_)))
    ));
}
