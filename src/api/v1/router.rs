use super::error::*;
use super::handler;
use crate::application_port::SessionAuthority;
use crate::domain_model::Identity;
use crate::server::Server;
use std::sync::Arc;
use warp::{Filter, reject};

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let register = warp::post()
        .and(warp::path("register"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::register);

    let login = warp::post()
        .and(warp::path("login"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::login);

    let logout = warp::post()
        .and(warp::path("logout"))
        .and(warp::path::end())
        .and(session_assertion())
        .and(with(server.session_authority.clone()))
        .and_then(handler::logout);

    let list_videos = warp::get()
        .and(warp::path("videos"))
        .and(warp::path::end())
        .and(with(server.catalog_service.clone()))
        .and_then(handler::list_videos);

    let create_video = warp::post()
        .and(warp::path("videos"))
        .and(warp::path::end())
        .and(with_identity(server.session_authority.clone()))
        .and(warp::body::json())
        .and(with(server.catalog_service.clone()))
        .and_then(handler::create_video);

    let media_credentials = warp::get()
        .and(warp::path("media"))
        .and(warp::path("credentials"))
        .and(warp::path::end())
        .and(with(server.media_service.clone()))
        .and_then(handler::media_credentials);

    register
        .or(login)
        .or(logout)
        .or(list_videos)
        .or(create_video)
        .or(media_credentials)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = std::convert::Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

/// Raw bearer session id from the Authorization header, if any.
fn session_assertion()
-> impl Filter<Extract = (Option<String>,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>("authorization").map(|header: Option<String>| {
        header.and_then(|h| h.strip_prefix("Bearer ").map(str::to_owned))
    })
}

/// Resolve the session assertion into an explicit `Identity` value. A
/// request without a usable session still passes through, as `Anonymous`;
/// the services downstream decide what that identity may do.
fn with_identity(
    session_authority: Arc<dyn SessionAuthority>,
) -> impl Filter<Extract = (Identity,), Error = warp::Rejection> + Clone {
    session_assertion().and_then(move |assertion: Option<String>| {
        let session_authority = session_authority.clone();
        async move {
            session_authority
                .resolve_identity(assertion.as_deref())
                .await
                .map_err(ApiErrorCode::from)
                .map_err(reject::custom)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::Server;
    use crate::settings::{Http, Log, Media, Session, Settings, Storage};
    use serde_json::{Value, json};
    use warp::filters::BoxedFilter;
    use warp::http::StatusCode;

    type Api = BoxedFilter<(warp::reply::Response,)>;

    fn test_settings() -> Settings {
        Settings {
            http: Http {
                cert_path: String::new(),
                key_path: String::new(),
                address: "127.0.0.1:0".to_owned(),
            },
            log: Log {
                filter: "info".to_owned(),
            },
            storage: Storage {
                backend: "memory".to_owned(),
                mysql_dsn: String::new(),
            },
            session: Session {
                backend: "memory".to_owned(),
                redis_dsn: String::new(),
                ttl_secs: 3600,
            },
            media: Media {
                private_key: "test-media-key".to_owned(),
                token_ttl_secs: 60,
            },
        }
    }

    async fn test_api() -> Api {
        let server = Arc::new(Server::try_new(&test_settings()).await.unwrap());
        routes(server)
            .recover(crate::api::v1::recover_error)
            .map(warp::Reply::into_response)
            .boxed()
    }

    fn body_json(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    async fn register(api: &Api, email: &str, password: &str) -> (StatusCode, Value) {
        let resp = warp::test::request()
            .method("POST")
            .path("/register")
            .json(&json!({"email": email, "password": password}))
            .reply(api)
            .await;
        (resp.status(), body_json(resp.body()))
    }

    async fn login(api: &Api, email: &str, password: &str) -> (StatusCode, Value) {
        let resp = warp::test::request()
            .method("POST")
            .path("/login")
            .json(&json!({"email": email, "password": password}))
            .reply(api)
            .await;
        (resp.status(), body_json(resp.body()))
    }

    async fn login_session(api: &Api, email: &str, password: &str) -> String {
        let (status, body) = login(api, email, password).await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["sessionId"].as_str().unwrap().to_owned()
    }

    fn video_payload(title: &str) -> Value {
        json!({
            "title": title,
            "description": "a reel",
            "videoUrl": "https://media.example/v/1.mp4",
            "thumbnailUrl": "https://media.example/t/1.jpg",
        })
    }

    #[tokio::test]
    async fn register_login_contract() {
        let api = test_api().await;

        let (status, body) = register(&api, "a@x.com", "pw1").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["message"], json!("User created successfully"));

        // Duplicate registration, independent of the password.
        let (status, body) = register(&api, "a@x.com", "pw2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], json!("UserExists"));

        let (status, body) = login(&api, "a@x.com", "pw1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["identity"], json!("a@x.com"));
        assert!(
            body["data"]["sessionId"]
                .as_str()
                .is_some_and(|s| !s.is_empty())
        );

        // Wrong password and unknown email come back identical.
        let (wrong_status, wrong_body) = login(&api, "a@x.com", "wrong").await;
        let (unknown_status, unknown_body) = login(&api, "nobody@x.com", "pw1").await;
        assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
        assert_eq!(unknown_status, StatusCode::BAD_REQUEST);
        assert_eq!(wrong_body, unknown_body);
    }

    #[tokio::test]
    async fn register_with_missing_fields_is_rejected() {
        let api = test_api().await;

        let resp = warp::test::request()
            .method("POST")
            .path("/register")
            .json(&json!({"email": "a@x.com"}))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp.body())["error"]["code"],
            json!("MissingCredentials")
        );
    }

    #[tokio::test]
    async fn catalog_is_public_but_create_is_gated() {
        let api = test_api().await;

        let resp = warp::test::request().path("/videos").reply(&api).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp.body())["data"], json!([]));

        // No session: 401 and the catalog stays empty.
        let resp = warp::test::request()
            .method("POST")
            .path("/videos")
            .json(&video_payload("reel"))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // A made-up session id is just as anonymous.
        let resp = warp::test::request()
            .method("POST")
            .path("/videos")
            .header("authorization", "Bearer not-a-session")
            .json(&video_payload("reel"))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = warp::test::request().path("/videos").reply(&api).await;
        assert_eq!(body_json(resp.body())["data"], json!([]));

        register(&api, "a@x.com", "pw1").await;
        let session_id = login_session(&api, "a@x.com", "pw1").await;

        let resp = warp::test::request()
            .method("POST")
            .path("/videos")
            .header("authorization", format!("Bearer {session_id}"))
            .json(&video_payload("first reel"))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp.body());
        assert_eq!(body["data"]["title"], json!("first reel"));
        assert_eq!(body["data"]["transformation"]["width"], json!(1080));
        assert_eq!(body["data"]["transformation"]["height"], json!(1920));
        assert_eq!(body["data"]["transformation"]["quality"], json!(100));
        assert_eq!(body["data"]["controls"], json!(true));

        let resp = warp::test::request()
            .method("POST")
            .path("/videos")
            .header("authorization", format!("Bearer {session_id}"))
            .json(&video_payload("second reel"))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        // Newest first.
        let resp = warp::test::request().path("/videos").reply(&api).await;
        let body = body_json(resp.body());
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"][0]["title"], json!("second reel"));
        assert_eq!(body["data"][1]["title"], json!("first reel"));
    }

    #[tokio::test]
    async fn create_applies_defaulting_and_validation() {
        let api = test_api().await;
        register(&api, "a@x.com", "pw1").await;
        let session_id = login_session(&api, "a@x.com", "pw1").await;
        let auth = format!("Bearer {session_id}");

        // Caller-supplied dimensions are ignored, quality is kept.
        let mut payload = video_payload("reel");
        payload["transformation"] = json!({"width": 640, "height": 480, "quality": 42});
        let resp = warp::test::request()
            .method("POST")
            .path("/videos")
            .header("authorization", auth.as_str())
            .json(&payload)
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp.body());
        assert_eq!(body["data"]["transformation"], json!({"width": 1080, "height": 1920, "quality": 42}));

        for quality in [0, 101] {
            let mut payload = video_payload("reel");
            payload["transformation"] = json!({ "quality": quality });
            let resp = warp::test::request()
                .method("POST")
                .path("/videos")
                .header("authorization", auth.as_str())
                .json(&payload)
                .reply(&api)
                .await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                body_json(resp.body())["error"]["code"],
                json!("InvalidQuality")
            );
        }

        let mut payload = video_payload("reel");
        payload["thumbnailUrl"] = json!("");
        let resp = warp::test::request()
            .method("POST")
            .path("/videos")
            .header("authorization", auth.as_str())
            .json(&payload)
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp.body())["error"]["code"],
            json!("MissingFields")
        );
    }

    #[tokio::test]
    async fn logout_invalidates_the_session() {
        let api = test_api().await;
        register(&api, "a@x.com", "pw1").await;
        let session_id = login_session(&api, "a@x.com", "pw1").await;
        let auth = format!("Bearer {session_id}");

        let resp = warp::test::request()
            .method("POST")
            .path("/logout")
            .header("authorization", auth.as_str())
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = warp::test::request()
            .method("POST")
            .path("/videos")
            .header("authorization", auth.as_str())
            .json(&video_payload("reel"))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn media_credentials_are_issued_publicly() {
        let api = test_api().await;

        let resp = warp::test::request()
            .path("/media/credentials")
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp.body());
        assert!(body["data"]["token"].as_str().is_some_and(|s| !s.is_empty()));
        assert!(body["data"]["expire"].as_i64().is_some());
        assert_eq!(body["data"]["signature"].as_str().unwrap().len(), 64);
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request() {
        let api = test_api().await;

        let resp = warp::test::request()
            .method("POST")
            .path("/register")
            .header("content-type", "application/json")
            .body("{not json")
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp.body())["error"]["code"],
            json!("MalformedBody")
        );
    }
}
