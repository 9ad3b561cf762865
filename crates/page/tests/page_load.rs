//! End-to-end page-load behaviour against a scripted gateway.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::FixedOffset;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rstest::rstest;

use portfolio_page::surface::ids;
use portfolio_page::{
    Comment, GatewayError, PageLoad, PageModel, PortfolioGateway, SessionResolver, TextChoice,
    UserProfile,
};

/// Scripted gateway: pops one scripted answer per call and counts calls.
struct ScriptedGateway {
    comments: Mutex<VecDeque<Result<Vec<Comment>, GatewayError>>>,
    users: Mutex<VecDeque<Result<Option<UserProfile>, GatewayError>>>,
    comment_calls: AtomicUsize,
    user_calls: AtomicUsize,
}

impl ScriptedGateway {
    fn new() -> Self {
        Self {
            comments: Mutex::new(VecDeque::new()),
            users: Mutex::new(VecDeque::new()),
            comment_calls: AtomicUsize::new(0),
            user_calls: AtomicUsize::new(0),
        }
    }

    fn push_comments(&self, result: Result<Vec<Comment>, GatewayError>) {
        self.comments.lock().expect("comments lock").push_back(result);
    }

    fn push_user(&self, result: Result<Option<UserProfile>, GatewayError>) {
        self.users.lock().expect("users lock").push_back(result);
    }

    fn user_calls(&self) -> usize {
        self.user_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PortfolioGateway for ScriptedGateway {
    async fn fetch_comments(&self) -> Result<Vec<Comment>, GatewayError> {
        self.comment_calls.fetch_add(1, Ordering::SeqCst);
        self.comments
            .lock()
            .expect("comments lock")
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn fetch_current_user(&self) -> Result<Option<UserProfile>, GatewayError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        // Keep the request in flight long enough for concurrent callers to
        // pile up behind it.
        tokio::time::sleep(Duration::from_millis(5)).await;
        self.users
            .lock()
            .expect("users lock")
            .pop_front()
            .unwrap_or(Ok(None))
    }
}

fn ada() -> UserProfile {
    UserProfile {
        id: "3fa85f64-5717-4562-b3fc-2c963f66afa6".to_owned(),
        display_name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
    }
}

fn comment(n: usize) -> Comment {
    Comment {
        comment_text: format!("comment {n}"),
        author_name: "Ada".to_owned(),
        timestamp_ms: 1_595_239_500_000 + n as i64,
    }
}

fn backend_failure() -> GatewayError {
    // Minting a real reqwest transport error needs a socket; the status
    // variant carries the same "backend unusable" meaning for the runtime.
    GatewayError::Status {
        endpoint: "userInfo",
        status: 502,
    }
}

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).expect("zero offset is valid")
}

#[rstest]
#[tokio::test]
async fn concurrent_first_lookups_share_one_request() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.push_user(Ok(Some(ada())));
    let resolver = SessionResolver::new(gateway.clone());

    let (a, b) = tokio::join!(resolver.current_user(), resolver.current_user());
    let a = a.expect("first lookup");
    let b = b.expect("second lookup");

    assert_eq!(gateway.user_calls(), 1);
    assert_eq!(a.map(|u| u.display_name.as_str()), Some("Ada"));
    assert_eq!(a, b);
}

#[rstest]
#[tokio::test]
async fn resolved_sessions_never_refetch() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.push_user(Ok(None));
    let resolver = SessionResolver::new(gateway.clone());

    for _ in 0..4 {
        let logged_in = resolver.is_logged_in().await.expect("lookup");
        assert!(!logged_in);
    }
    assert_eq!(gateway.user_calls(), 1);
}

#[rstest]
#[tokio::test]
async fn failed_resolution_is_retried_on_the_next_lookup() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.push_user(Err(backend_failure()));
    gateway.push_user(Ok(Some(ada())));
    let resolver = SessionResolver::new(gateway.clone());

    assert!(resolver.current_user().await.is_err());
    let user = resolver.current_user().await.expect("retry succeeds");
    assert_eq!(user.map(|u| u.display_name.as_str()), Some("Ada"));
    assert_eq!(gateway.user_calls(), 2);
}

#[rstest]
#[tokio::test]
async fn logged_out_load_reveals_only_the_logged_out_group() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.push_user(Ok(None));
    gateway.push_comments(Ok(vec![comment(1), comment(2), comment(3)]));

    let load = PageLoad::new(gateway, utc());
    let mut surface = PageModel::new();
    let mut rng = SmallRng::seed_from_u64(1);
    let report = load.run(&mut surface, &mut rng).await;

    assert!(report.is_fully_loaded());
    assert!(!report.logged_in.as_ref().expect("login state"));
    assert!(surface.is_revealed(ids::SHOW_LOGGED_OUT));
    assert!(!surface.is_revealed(ids::SHOW_LOGGED_IN));

    let blocks = surface.comment_blocks(ids::COMMENTS);
    assert_eq!(blocks.len(), 3);
    let bodies: Vec<&str> = blocks.iter().map(|b| b.body.as_str()).collect();
    assert_eq!(bodies, vec!["comment 1", "comment 2", "comment 3"]);

    assert!(surface.region_text(ids::TEXT_CONTAINER).is_some());
    assert!(surface.region_text(ids::LINK_CONTAINER).is_some());
}

#[rstest]
#[tokio::test]
async fn logged_in_load_reveals_only_the_logged_in_group() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.push_user(Ok(Some(ada())));

    let load = PageLoad::new(gateway, utc());
    let mut surface = PageModel::new();
    let mut rng = SmallRng::seed_from_u64(1);
    let report = load.run(&mut surface, &mut rng).await;

    assert!(*report.logged_in.as_ref().expect("login state"));
    assert!(surface.is_revealed(ids::SHOW_LOGGED_IN));
    assert!(!surface.is_revealed(ids::SHOW_LOGGED_OUT));
}

#[rstest]
#[tokio::test]
async fn comment_failure_does_not_stop_the_other_tasks() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.push_user(Ok(Some(ada())));
    gateway.push_comments(Err(GatewayError::Status {
        endpoint: "data",
        status: 500,
    }));

    let load = PageLoad::new(gateway, utc());
    let mut surface = PageModel::new();
    let mut rng = SmallRng::seed_from_u64(1);
    let report = load.run(&mut surface, &mut rng).await;

    assert!(report.comments_rendered.is_err());
    assert!(surface.is_revealed(ids::SHOW_LOGGED_IN));
    assert!(surface.region_text(ids::TEXT_CONTAINER).is_some());
    assert!(surface.region_text(ids::LINK_CONTAINER).is_some());
}

#[rstest]
#[tokio::test]
async fn session_failure_leaves_both_groups_hidden() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.push_user(Err(backend_failure()));
    gateway.push_comments(Ok(vec![comment(1)]));

    let load = PageLoad::new(gateway, utc());
    let mut surface = PageModel::new();
    let mut rng = SmallRng::seed_from_u64(1);
    let report = load.run(&mut surface, &mut rng).await;

    assert!(report.logged_in.is_err());
    assert!(!report.is_fully_loaded());
    assert!(!surface.is_revealed(ids::SHOW_LOGGED_IN));
    assert!(!surface.is_revealed(ids::SHOW_LOGGED_OUT));
    // Comments still rendered.
    assert_eq!(surface.comment_blocks(ids::COMMENTS).len(), 1);
}

#[rstest]
#[tokio::test]
async fn quote_loads_fill_the_text_container_from_the_quote_table() {
    let gateway = Arc::new(ScriptedGateway::new());
    let load = PageLoad::new(gateway, utc()).with_text_choice(TextChoice::Quote);
    let mut surface = PageModel::new();
    let mut rng = SmallRng::seed_from_u64(9);
    let report = load.run(&mut surface, &mut rng).await;

    assert!(report.text.is_ok());
    let text = surface
        .region_text(ids::TEXT_CONTAINER)
        .expect("text written");
    assert!(portfolio_page::QUOTES.contains(&text.as_str()));
}
