#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use bookmarks_api::app;
use bookmarks_api::bookmarks::Bookmarks;
use bookmarks_api::db::Database;
use bookmarks_api::handler::AppState;
use bookmarks_api::model::{Bookmark, NewBookmark};

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// `Value::Null` when the body is empty.
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_token(None).await
    }

    pub async fn with_token(token: Option<&str>) -> Self {
        let db = Database::in_memory().await.expect("in-memory database");
        let state = AppState::new(db, token.map(str::to_owned));
        TestApp {
            router: app(state.clone()),
            state,
        }
    }

    pub async fn seed(&self, bookmarks: Vec<NewBookmark>) -> Vec<Bookmark> {
        let store = Bookmarks::new(self.state.db.connection());
        let mut created = Vec::new();
        for bookmark in bookmarks {
            created.push(store.insert(bookmark).await.expect("seed bookmark"));
        }
        created
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(request("GET", uri, None)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(request("DELETE", uri, None)).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(request("POST", uri, Some(body))).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.send(request("PATCH", uri, Some(body))).await
    }
}

pub fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

pub fn error_body(message: &str) -> Value {
    serde_json::json!({ "error": { "message": message } })
}

pub fn make_bookmarks_array() -> Vec<NewBookmark> {
    vec![
        NewBookmark {
            title: "Youtube".to_string(),
            url: "https://www.youtube.com".to_string(),
            description: "Enjoy the videos and music you love, upload original content, and share it all with friends, family, and the world on YouTube.".to_string(),
            rating: 5,
        },
        NewBookmark {
            title: "Reddit".to_string(),
            url: "https://www.reddit.com".to_string(),
            description: "Reddit is a network of communities based on peoples interests. Find communities youre interested in, and become part of an online community!".to_string(),
            rating: 4,
        },
        NewBookmark {
            title: "Twitter".to_string(),
            url: "https://twitter.com/?lang=en".to_string(),
            description: "From breaking news and entertainment to sports and politics, get the full story with all the live commentary.".to_string(),
            rating: 3,
        },
    ]
}

/// A bookmark carrying stored XSS, and the title and description it must
/// come back as.
pub fn make_malicious_bookmark() -> (NewBookmark, &'static str, &'static str) {
    let malicious = NewBookmark {
        title: r#"Naughty naughty very naughty <script>alert("xss");</script>"#.to_string(),
        url: "https://www.fakeWebsite.com".to_string(),
        description: r#"Bad image <img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);">. But not <strong>all</strong> bad."#.to_string(),
        rating: 5,
    };
    (
        malicious,
        r#"Naughty naughty very naughty &lt;script&gt;alert("xss");&lt;/script&gt;"#,
        r#"Bad image <img src="https://url.to.file.which/does-not.exist">. But not <strong>all</strong> bad."#,
    )
}

pub fn to_json(bookmarks: &[Bookmark]) -> Value {
    serde_json::to_value(bookmarks).expect("serialize bookmarks")
}
