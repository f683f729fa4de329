use httpmock::prelude::*;
use number_classifier::adapters::http::DEFAULT_ROUTE;
use number_classifier::core::ConfigProvider;
use number_classifier::{RetryPolicy, Server};
use serde_json::json;
use std::time::Duration;
use tokio::sync::oneshot;

struct TestConfig {
    numbers_api: String,
    policy: RetryPolicy,
}

impl TestConfig {
    fn new(numbers_api: String) -> Self {
        Self {
            numbers_api,
            policy: RetryPolicy::default().backoff_factor(Duration::ZERO),
        }
    }
}

impl ConfigProvider for TestConfig {
    fn host(&self) -> &str {
        "127.0.0.1"
    }

    fn port(&self) -> u16 {
        0
    }

    fn route(&self) -> &str {
        DEFAULT_ROUTE
    }

    fn numbers_api_base(&self) -> &str {
        &self.numbers_api
    }

    fn retry_policy(&self) -> RetryPolicy {
        self.policy.clone()
    }
}

struct RunningServer {
    base_url: String,
    _shutdown: oneshot::Sender<()>,
}

impl RunningServer {
    async fn start(numbers_api: String) -> Self {
        let server = Server::bind(&TestConfig::new(numbers_api)).await.unwrap();
        let addr = server.local_addr().unwrap();

        let (shutdown, stopped) = oneshot::channel::<()>();
        tokio::spawn(server.run_until(async {
            let _ = stopped.await;
        }));

        Self {
            base_url: format!("http://{}", addr),
            _shutdown: shutdown,
        }
    }

    fn url(&self, query: &str) -> String {
        format!("{}{}{}", self.base_url, DEFAULT_ROUTE, query)
    }

    async fn get_json(&self, query: &str) -> (u16, serde_json::Value) {
        let response = reqwest::get(self.url(query)).await.unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_classifies_armstrong_number_with_fun_fact() {
    let numbers_api = MockServer::start();
    let fact_mock = numbers_api.mock(|when, then| {
        when.method(GET).path("/153/math");
        then.status(200)
            .header("Content-Type", "text/plain")
            .body("153 is a narcissistic number.");
    });

    let server = RunningServer::start(numbers_api.base_url()).await;
    let (status, body) = server.get_json("?number=153").await;

    fact_mock.assert();
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "number": 153,
            "is_prime": false,
            "is_perfect": false,
            "properties": ["odd", "armstrong"],
            "digit_sum": 9,
            "fun_fact": "153 is a narcissistic number."
        })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_prime_and_perfect_flags() {
    let numbers_api = MockServer::start();
    numbers_api.mock(|when, then| {
        when.method(GET).path("/7/math");
        then.status(200).body("7 is prime.");
    });
    numbers_api.mock(|when, then| {
        when.method(GET).path("/28/math");
        then.status(200).body("28 is perfect.");
    });

    let server = RunningServer::start(numbers_api.base_url()).await;

    let (status, body) = server.get_json("?number=7").await;
    assert_eq!(status, 200);
    assert_eq!(body["is_prime"], true);
    assert_eq!(body["is_perfect"], false);
    assert_eq!(body["properties"], json!(["odd", "armstrong"]));

    let (status, body) = server.get_json("?number=28").await;
    assert_eq!(status, 200);
    assert_eq!(body["is_prime"], false);
    assert_eq!(body["is_perfect"], true);
    assert_eq!(body["properties"], json!(["even"]));
    assert_eq!(body["digit_sum"], 10);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_negative_number_uses_absolute_digits() {
    let numbers_api = MockServer::start();
    numbers_api.mock(|when, then| {
        when.method(GET).path("/-153/math");
        then.status(200).body("-153 is a number.");
    });

    let server = RunningServer::start(numbers_api.base_url()).await;
    let (status, body) = server.get_json("?number=-153").await;

    assert_eq!(status, 200);
    assert_eq!(body["number"], -153);
    assert_eq!(body["properties"], json!(["odd"]));
    assert_eq!(body["digit_sum"], 9);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_parameter() {
    let numbers_api = MockServer::start();
    let fact_mock = numbers_api.mock(|when, then| {
        when.method(GET);
        then.status(200).body("unused");
    });

    let server = RunningServer::start(numbers_api.base_url()).await;

    for query in ["", "?number=", "?other=5"] {
        let (status, body) = server.get_json(query).await;
        assert_eq!(status, 400, "query {:?}", query);
        assert_eq!(body, json!({"error": "Number parameter is required"}));
    }

    fact_mock.assert_hits(0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_alphabetic_input() {
    let numbers_api = MockServer::start();
    let server = RunningServer::start(numbers_api.base_url()).await;

    let (status, body) = server.get_json("?number=abc").await;

    assert_eq!(status, 400);
    assert_eq!(body, json!({"number": "alphabet", "error": true}));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_input_is_echoed() {
    let numbers_api = MockServer::start();
    let server = RunningServer::start(numbers_api.base_url()).await;

    let (status, body) = server.get_json("?number=12a").await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({"number": "12a", "error": true}));

    let (status, body) = server.get_json("?number=99999999999999999999").await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({"number": "99999999999999999999", "error": true}));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_plus_sign_must_be_percent_encoded() {
    let numbers_api = MockServer::start();
    let fact_mock = numbers_api.mock(|when, then| {
        when.method(GET).path("/7/math");
        then.status(200).body("7 is prime.");
    });

    let server = RunningServer::start(numbers_api.base_url()).await;

    // A bare `+` in a query string decodes to a space.
    let (status, body) = server.get_json("?number=+7").await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({"number": " 7", "error": true}));
    fact_mock.assert_hits(0);

    let (status, body) = server.get_json("?number=%2B7").await;
    assert_eq!(status, 200);
    assert_eq!(body["number"], 7);
    fact_mock.assert_hits(1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upstream_failures_return_503() {
    let numbers_api = MockServer::start();
    let fact_mock = numbers_api.mock(|when, then| {
        when.method(GET).path("/42/math");
        then.status(503);
    });

    let server = RunningServer::start(numbers_api.base_url()).await;
    let (status, body) = server.get_json("?number=42").await;

    fact_mock.assert_hits(4);
    assert_eq!(status, 503);
    assert_eq!(
        body,
        json!({"error": "Unable to fetch fun fact from Numbers API"})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upstream_not_found_is_not_retried() {
    let numbers_api = MockServer::start();
    let fact_mock = numbers_api.mock(|when, then| {
        when.method(GET).path("/42/math");
        then.status(404);
    });

    let server = RunningServer::start(numbers_api.base_url()).await;
    let (status, _) = server.get_json("?number=42").await;

    fact_mock.assert_hits(1);
    assert_eq!(status, 503);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_repeated_requests_are_byte_identical() {
    let numbers_api = MockServer::start();
    numbers_api.mock(|when, then| {
        when.method(GET).path("/8128/math");
        then.status(200).body("8128 is the fourth perfect number.");
    });

    let server = RunningServer::start(numbers_api.base_url()).await;

    let first = reqwest::get(server.url("?number=8128"))
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    let second = reqwest::get(server.url("?number=8128"))
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_and_method_routing() {
    let numbers_api = MockServer::start();
    let server = RunningServer::start(numbers_api.base_url()).await;

    let health = reqwest::get(format!("{}/health", server.base_url))
        .await
        .unwrap();
    assert_eq!(health.status().as_u16(), 200);
    let body: serde_json::Value = health.json().await.unwrap();
    assert_eq!(body["status"], "up");

    let post = reqwest::Client::new()
        .post(server.url("?number=1"))
        .send()
        .await
        .unwrap();
    assert_eq!(post.status().as_u16(), 405);
}
