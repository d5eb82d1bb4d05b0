//! Chat and quiz proxy routes
//!
//! Transport-agnostic handlers: they take the incoming request body, talk
//! to the upstream service through [`Upstream`], and produce the response
//! the route should send. Errors never escape; they become 4xx/5xx bodies.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::catalog::InstrumentId;
use crate::error::{Error, Result};

pub const CHAT_PATH: &str = "/api/message";
pub const CHAT_FAILURE: &str = "Failed to process your request. Please try again later.";
pub const QUIZ_FAILURE: &str = "Failed to fetch questions";

const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

/// Raw upstream answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx reply into an error
    pub fn into_success(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::UpstreamStatus(self.status))
        }
    }
}

/// HTTP client used to reach the upstream services
pub trait Upstream {
    fn post_json(&self, path: &str, body: &Value) -> Result<UpstreamReply>;
    fn get(&self, path: &str) -> Result<UpstreamReply>;
}

/// Response a proxy route sends back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: String,
}

impl ProxyResponse {
    fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            headers: vec![("Content-Type", "application/json")],
            body: body.to_string(),
        }
    }

    fn with_cors(mut self) -> Self {
        self.headers.extend(CORS_HEADERS);
        self
    }

    pub fn header(&self, name: &str) -> Option<&'static str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| *v)
    }
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: Option<Value>,
}

/// Pull the required `message` string out of a chat request body
fn parse_chat_request(body: &str) -> Result<Value> {
    let request: ChatRequest =
        serde_json::from_str(body).map_err(|_| Error::MissingField("message"))?;
    match request.message {
        Some(Value::String(message)) if !message.is_empty() => Ok(json!({ "message": message })),
        _ => Err(Error::MissingField("message")),
    }
}

/// `POST /api/message`
pub fn handle_message(body: &str, upstream: &dyn Upstream) -> ProxyResponse {
    let forward = match parse_chat_request(body) {
        Ok(forward) => forward,
        Err(e) => {
            log::debug!("Rejected chat request: {}", e);
            return ProxyResponse::json(400, &json!({ "error": "Message is required" }))
                .with_cors();
        }
    };

    match upstream
        .post_json(CHAT_PATH, &forward)
        .and_then(UpstreamReply::into_success)
    {
        Ok(reply) => ProxyResponse::json(200, &Value::String(reply.body)).with_cors(),
        Err(e) => {
            log::warn!("Chat upstream failed: {}", e);
            ProxyResponse::json(500, &json!({ "error": CHAT_FAILURE })).with_cors()
        }
    }
}

/// `OPTIONS /api/message` preflight
pub fn handle_preflight() -> ProxyResponse {
    ProxyResponse {
        status: 200,
        headers: Vec::new(),
        body: String::new(),
    }
    .with_cors()
}

/// Upstream path for an instrument's quiz questions
pub fn quiz_path(instrument: InstrumentId) -> String {
    format!("/api/terra/{}", instrument.as_str())
}

/// `GET /api/terra/{instrument}`
pub fn handle_quiz(instrument: &str, upstream: &dyn Upstream) -> ProxyResponse {
    let Some(id) = InstrumentId::from_str(instrument) else {
        return ProxyResponse::json(
            404,
            &json!({ "success": false, "error": "Unknown instrument" }),
        );
    };

    let fetched = upstream
        .get(&quiz_path(id))
        .and_then(UpstreamReply::into_success)
        .and_then(|reply| Ok(serde_json::from_str::<Value>(&reply.body)?));

    match fetched {
        Ok(questions) => ProxyResponse::json(200, &questions),
        Err(e) => {
            log::warn!("Quiz upstream failed for {}: {}", id.as_str(), e);
            ProxyResponse::json(
                500,
                &json!({
                    "success": false,
                    "error": QUIZ_FAILURE,
                    "message": e.to_string(),
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Upstream that answers every request with the same reply and records paths
    struct FakeUpstream {
        reply: Result<UpstreamReply>,
        seen: RefCell<Vec<(String, Option<Value>)>>,
    }

    impl FakeUpstream {
        fn ok(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(UpstreamReply {
                    status,
                    body: body.to_string(),
                }),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn down() -> Self {
            Self {
                reply: Err(Error::Upstream("connection refused".to_string())),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn answer(&self) -> Result<UpstreamReply> {
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(e) => Err(Error::Upstream(e.to_string())),
            }
        }
    }

    impl Upstream for FakeUpstream {
        fn post_json(&self, path: &str, body: &Value) -> Result<UpstreamReply> {
            self.seen
                .borrow_mut()
                .push((path.to_string(), Some(body.clone())));
            self.answer()
        }

        fn get(&self, path: &str) -> Result<UpstreamReply> {
            self.seen.borrow_mut().push((path.to_string(), None));
            self.answer()
        }
    }

    fn body_json(response: &ProxyResponse) -> Value {
        serde_json::from_str(&response.body).unwrap()
    }

    #[test]
    fn test_chat_forwards_and_wraps_text() {
        let upstream = FakeUpstream::ok(200, "Terra launched in 1999.");
        let response = handle_message(r#"{ "message": "When did Terra launch?" }"#, &upstream);

        assert_eq!(response.status, 200);
        assert_eq!(response.header("access-control-allow-origin"), Some("*"));
        assert_eq!(body_json(&response), json!("Terra launched in 1999."));

        let seen = upstream.seen.borrow();
        assert_eq!(seen[0].0, CHAT_PATH);
        assert_eq!(seen[0].1, Some(json!({ "message": "When did Terra launch?" })));
    }

    #[test]
    fn test_chat_missing_message_is_400() {
        let upstream = FakeUpstream::ok(200, "unused");
        for body in ["{}", r#"{ "message": 5 }"#, r#"{ "message": "" }"#, "garbage"] {
            let response = handle_message(body, &upstream);
            assert_eq!(response.status, 400, "body: {body}");
            assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
        }
        assert!(upstream.seen.borrow().is_empty());
    }

    #[test]
    fn test_chat_upstream_failure_is_500() {
        for upstream in [FakeUpstream::down(), FakeUpstream::ok(503, "busy")] {
            let response = handle_message(r#"{ "message": "hi" }"#, &upstream);
            assert_eq!(response.status, 500);
            assert_eq!(body_json(&response), json!({ "error": CHAT_FAILURE }));
            assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
        }
    }

    #[test]
    fn test_preflight() {
        let response = handle_preflight();
        assert_eq!(response.status, 200);
        assert!(response.body.is_empty());
        assert_eq!(response.header("Access-Control-Allow-Methods"), Some("POST, OPTIONS"));
    }

    #[test]
    fn test_quiz_passes_json_through() {
        let payload = r#"{"success":true,"questions":[{"question":"Q?","answer":"A"}]}"#;
        let upstream = FakeUpstream::ok(200, payload);
        let response = handle_quiz("aster", &upstream);

        assert_eq!(response.status, 200);
        assert_eq!(
            body_json(&response),
            serde_json::from_str::<Value>(payload).unwrap()
        );
        assert_eq!(upstream.seen.borrow()[0].0, "/api/terra/aster");
    }

    #[test]
    fn test_quiz_failures_are_500() {
        for upstream in [
            FakeUpstream::down(),
            FakeUpstream::ok(404, "{}"),
            FakeUpstream::ok(200, "<html>"),
        ] {
            let response = handle_quiz("modis", &upstream);
            assert_eq!(response.status, 500);
            let body = body_json(&response);
            assert_eq!(body["success"], json!(false));
            assert_eq!(body["error"], json!(QUIZ_FAILURE));
            assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
        }
    }

    #[test]
    fn test_quiz_unknown_instrument() {
        let upstream = FakeUpstream::ok(200, "{}");
        let response = handle_quiz("landsat", &upstream);
        assert_eq!(response.status, 404);
        assert!(upstream.seen.borrow().is_empty());
    }
}
