//! End-to-end tests driving the router against an in-memory store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use siddu_core::{id::UserId, store::VerseStore, user::Role};
use siddu_store_sqlite::SqliteStore;
use tokio::task::JoinSet;
use tower::ServiceExt as _;

use crate::{AppState, router, token::TokenService};

struct Harness {
  app:   Router,
  store: Arc<SqliteStore>,
}

async fn harness() -> Harness {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  let state = AppState {
    store:  Arc::clone(&store),
    tokens: Arc::new(TokenService::new(
      b"integration-test-secret",
      chrono::Duration::hours(1),
    )),
  };
  Harness { app: router(state), store }
}

impl Harness {
  async fn call(
    &self,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
      builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
      Some(json) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(json.to_string())
      }
      None => Body::empty(),
    };

    let res = self
      .app
      .clone()
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
      .await
      .unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
  }

  /// Register and log in `name`, returning its token and user id.
  async fn signup(&self, name: &str) -> (String, i64) {
    let (status, user) = self
      .call(
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
          "username": name,
          "email": format!("{name}@example.com"),
          "password": "correct horse",
        })),
      )
      .await;
    assert_eq!(status, StatusCode::CREATED, "register {name}: {user}");

    let (status, body) = self
      .call(
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": format!("{name}@example.com"), "password": "correct horse" })),
      )
      .await;
    assert_eq!(status, StatusCode::OK);
    (
      body["token"].as_str().unwrap().to_owned(),
      user["id"].as_i64().unwrap(),
    )
  }

  async fn create_profile(&self, token: &str, name: &str) -> i64 {
    let (status, profile) = self
      .call(
        "POST",
        "/api/talent/profiles",
        Some(token),
        Some(json!({ "fullName": name, "headline": "Actor" })),
      )
      .await;
    assert_eq!(status, StatusCode::CREATED, "{profile}");
    profile["id"].as_i64().unwrap()
  }

  async fn create_call(&self, token: &str) -> i64 {
    let (status, call) = self
      .call(
        "POST",
        "/api/talent/casting-calls",
        Some(token),
        Some(json!({
          "projectTitle": "Monsoon Nights",
          "projectType": "feature",
          "roles": [{ "roleName": "Lead" }],
        })),
      )
      .await;
    assert_eq!(status, StatusCode::CREATED, "{call}");
    call["id"].as_i64().unwrap()
  }
}

// ─── Accounts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_login_and_me() {
  let h = harness().await;

  let (status, user) = h
    .call(
      "POST",
      "/api/auth/register",
      None,
      Some(json!({
        "username": "alice",
        "email": "Alice@Example.com",
        "password": "correct horse",
      })),
    )
    .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(user["email"], "alice@example.com");
  assert_eq!(user["role"], "user");
  assert!(user.get("passwordHash").is_none());

  let (status, _) = h
    .call(
      "POST",
      "/api/auth/register",
      None,
      Some(json!({
        "username": "alice",
        "email": "other@example.com",
        "password": "correct horse",
      })),
    )
    .await;
  assert_eq!(status, StatusCode::CONFLICT);

  let (status, body) = h
    .call(
      "POST",
      "/api/auth/login",
      None,
      Some(json!({ "email": "alice@example.com", "password": "wrong horse" })),
    )
    .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(body["error"], "invalid email or password");

  let (status, body) = h
    .call(
      "POST",
      "/api/auth/login",
      None,
      Some(json!({ "email": "nobody@example.com", "password": "correct horse" })),
    )
    .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(body["error"], "invalid email or password");

  let (status, body) = h
    .call(
      "POST",
      "/api/auth/login",
      None,
      Some(json!({ "email": "ALICE@example.com", "password": "correct horse" })),
    )
    .await;
  assert_eq!(status, StatusCode::OK);
  let token = body["token"].as_str().unwrap();

  let (status, me) = h.call("GET", "/api/auth/me", Some(token), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(me["username"], "alice");
}

#[tokio::test]
async fn bad_registration_input_is_400() {
  let h = harness().await;

  let (status, body) = h
    .call(
      "POST",
      "/api/auth/register",
      None,
      Some(json!({ "username": "bob", "email": "bob@example.com", "password": "short" })),
    )
    .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("password"));

  let (status, _) = h
    .call(
      "POST",
      "/api/auth/register",
      None,
      Some(json!({ "username": "bob" })),
    )
    .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn protected_routes_need_a_valid_bearer_token() {
  let h = harness().await;
  let body = Some(json!({ "fullName": "Nobody" }));

  let (status, err) = h
    .call("POST", "/api/talent/profiles", None, body.clone())
    .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert!(err["error"].is_string());

  let (status, _) = h
    .call("POST", "/api/talent/profiles", Some("not-a-token"), body.clone())
    .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);

  let foreign = TokenService::new(b"another-secret", chrono::Duration::hours(1))
    .issue(UserId(1))
    .unwrap();
  let (status, _) = h
    .call("POST", "/api/talent/profiles", Some(&foreign), body)
    .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);

  // 401 wins over 404 for a target that does not exist.
  let (status, _) = h
    .call(
      "PUT",
      "/api/talent/profiles/999",
      None,
      Some(json!({ "fullName": "x" })),
    )
    .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ─── Talent profiles ─────────────────────────────────────────────────────────

#[tokio::test]
async fn first_profile_walkthrough() {
  let h = harness().await;

  let (status, _) = h
    .call(
      "POST",
      "/api/auth/register",
      None,
      Some(json!({
        "username": "alice",
        "email": "alice@x.com",
        "password": "password123",
      })),
    )
    .await;
  assert_eq!(status, StatusCode::CREATED);

  let (status, body) = h
    .call(
      "POST",
      "/api/auth/login",
      None,
      Some(json!({ "email": "alice@x.com", "password": "password123" })),
    )
    .await;
  assert_eq!(status, StatusCode::OK);
  let token = body["token"].as_str().unwrap().to_owned();

  let (status, list) = h.call("GET", "/api/talent/profiles", None, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(list, json!([]));

  let (status, profile) = h
    .call(
      "POST",
      "/api/talent/profiles",
      Some(&token),
      Some(json!({ "fullName": "Alice A" })),
    )
    .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(profile["fullName"], "Alice A");

  let (status, body) = h
    .call(
      "POST",
      "/api/talent/profiles",
      Some(&token),
      Some(json!({ "fullName": "Alice B" })),
    )
    .await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert!(body["error"].is_string());

  let (status, list) = h.call("GET", "/api/talent/profiles", None, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(list.as_array().unwrap().len(), 1);
  assert_eq!(list[0]["fullName"], "Alice A");
}

/// Fire `n` copies of one authenticated POST at once and tally the statuses.
async fn concurrently(
  h: &Arc<Harness>,
  n: usize,
  uri: &str,
  token: &str,
  body: Value,
) -> Vec<StatusCode> {
  let mut tasks = JoinSet::new();
  for _ in 0..n {
    let h = Arc::clone(h);
    let uri = uri.to_owned();
    let token = token.to_owned();
    let body = body.clone();
    tasks.spawn(async move { h.call("POST", &uri, Some(&token), Some(body)).await.0 });
  }

  let mut statuses = Vec::with_capacity(n);
  while let Some(status) = tasks.join_next().await {
    statuses.push(status.unwrap());
  }
  statuses
}

fn tally(statuses: &[StatusCode], wanted: StatusCode) -> usize {
  statuses.iter().filter(|s| **s == wanted).count()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_profile_creation_yields_one() {
  let h = Arc::new(harness().await);
  let (alice, _) = h.signup("alice").await;

  let statuses = concurrently(
    &h,
    16,
    "/api/talent/profiles",
    &alice,
    json!({ "fullName": "Alice A" }),
  )
  .await;
  assert_eq!(tally(&statuses, StatusCode::CREATED), 1, "{statuses:?}");
  assert_eq!(tally(&statuses, StatusCode::CONFLICT), 15, "{statuses:?}");

  let (_, list) = h.call("GET", "/api/talent/profiles", None, None).await;
  assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_applications_yield_one() {
  let h = Arc::new(harness().await);
  let (rita, _) = h.signup("rita").await;
  let (alice, _) = h.signup("alice").await;
  let call = h.create_call(&rita).await;
  h.create_profile(&alice, "Alice").await;

  let statuses = concurrently(
    &h,
    16,
    &format!("/api/talent/casting-calls/{call}/apply"),
    &alice,
    json!({ "coverLetter": "Pick me" }),
  )
  .await;
  assert_eq!(tally(&statuses, StatusCode::CREATED), 1, "{statuses:?}");
  assert_eq!(tally(&statuses, StatusCode::CONFLICT), 15, "{statuses:?}");

  let (_, list) = h
    .call(
      "GET",
      &format!("/api/talent/casting-calls/{call}/applications"),
      Some(&rita),
      None,
    )
    .await;
  assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn profile_ownership_gates() {
  let h = harness().await;
  let (alice, _) = h.signup("alice").await;
  let (bob, _) = h.signup("bob").await;

  let profile = h.create_profile(&alice, "Alice").await;
  let (status, _) = h
    .call(
      "POST",
      "/api/talent/profiles",
      Some(&alice),
      Some(json!({ "fullName": "Alice Again" })),
    )
    .await;
  assert_eq!(status, StatusCode::CONFLICT);

  let uri = format!("/api/talent/profiles/{profile}");
  let (status, detail) = h.call("GET", &uri, None, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(detail["fullName"], "Alice");
  assert_eq!(detail["skills"], json!([]));

  let edit = Some(json!({ "fullName": "Alice Liddell" }));
  let (status, _) = h.call("PUT", &uri, Some(&bob), edit.clone()).await;
  assert_eq!(status, StatusCode::FORBIDDEN);

  let (status, _) = h
    .call("PUT", "/api/talent/profiles/999", Some(&bob), edit.clone())
    .await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, _) = h
    .call("PUT", "/api/talent/profiles/abc", Some(&alice), edit.clone())
    .await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, updated) = h.call("PUT", &uri, Some(&alice), edit).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["fullName"], "Alice Liddell");

  let (status, _) = h
    .call("GET", &format!("{uri}/applications"), Some(&bob), None)
    .await;
  assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn child_records_are_scoped_to_their_profile() {
  let h = harness().await;
  let (alice, _) = h.signup("alice").await;
  let (bob, _) = h.signup("bob").await;
  let alice_profile = h.create_profile(&alice, "Alice").await;
  let bob_profile = h.create_profile(&bob, "Bob").await;

  let (status, skill) = h
    .call(
      "POST",
      &format!("/api/talent/profiles/{alice_profile}/skills"),
      Some(&alice),
      Some(json!({ "name": "Kathak", "proficiency": "expert" })),
    )
    .await;
  assert_eq!(status, StatusCode::CREATED);
  let skill_id = skill["id"].as_i64().unwrap();

  // Bob cannot reach the skill through Alice's profile...
  let (status, _) = h
    .call(
      "DELETE",
      &format!("/api/talent/profiles/{alice_profile}/skills/{skill_id}"),
      Some(&bob),
      None,
    )
    .await;
  assert_eq!(status, StatusCode::FORBIDDEN);

  // ...nor through his own.
  let (status, _) = h
    .call(
      "DELETE",
      &format!("/api/talent/profiles/{bob_profile}/skills/{skill_id}"),
      Some(&bob),
      None,
    )
    .await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, body) = h
    .call(
      "DELETE",
      &format!("/api/talent/profiles/{alice_profile}/skills/{skill_id}"),
      Some(&alice),
      None,
    )
    .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["message"], "skill deleted");

  let (status, exp) = h
    .call(
      "POST",
      &format!("/api/talent/profiles/{alice_profile}/experiences"),
      Some(&alice),
      Some(json!({ "title": "Lead", "startDate": "2021-03-01", "endDate": "2021-01-01" })),
    )
    .await;
  assert_eq!(status, StatusCode::BAD_REQUEST, "{exp}");

  let (status, item) = h
    .call(
      "POST",
      &format!("/api/talent/profiles/{alice_profile}/portfolio"),
      Some(&alice),
      Some(json!({ "title": "Showreel", "mediaUrl": "https://cdn.example.com/reel.mp4" })),
    )
    .await;
  assert_eq!(status, StatusCode::CREATED);

  let (_, detail) = h
    .call("GET", &format!("/api/talent/profiles/{alice_profile}"), None, None)
    .await;
  assert_eq!(detail["portfolio"][0]["id"], item["id"]);
}

// ─── Casting ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn application_flow_and_visibility() {
  let h = harness().await;
  let (rita, _) = h.signup("rita").await;
  let (alice, _) = h.signup("alice").await;
  let (mallory, _) = h.signup("mallory").await;
  let call = h.create_call(&rita).await;
  let apply_uri = format!("/api/talent/casting-calls/{call}/apply");
  let letter = Some(json!({ "coverLetter": "I was born for this" }));

  let (status, body) = h.call("POST", &apply_uri, Some(&alice), letter.clone()).await;
  assert_eq!(status, StatusCode::FORBIDDEN);
  assert_eq!(body["error"], "User must have a talent profile to apply.");

  h.create_profile(&alice, "Alice").await;
  let (status, application) = h.call("POST", &apply_uri, Some(&alice), letter.clone()).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(application["status"], "pending");
  let app_id = application["id"].as_i64().unwrap();

  let (status, _) = h.call("POST", &apply_uri, Some(&alice), letter.clone()).await;
  assert_eq!(status, StatusCode::CONFLICT);

  let (status, _) = h
    .call("POST", "/api/talent/casting-calls/4040/apply", Some(&alice), letter)
    .await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let app_uri = format!("/api/talent/applications/{app_id}");
  assert_eq!(h.call("GET", &app_uri, Some(&alice), None).await.0, StatusCode::OK);
  assert_eq!(h.call("GET", &app_uri, Some(&rita), None).await.0, StatusCode::OK);
  assert_eq!(
    h.call("GET", &app_uri, Some(&mallory), None).await.0,
    StatusCode::FORBIDDEN
  );

  let shortlist = Some(json!({ "status": "shortlisted" }));
  let (status, _) = h.call("PUT", &app_uri, Some(&alice), shortlist.clone()).await;
  assert_eq!(status, StatusCode::FORBIDDEN);

  let (status, _) = h
    .call("PUT", &app_uri, Some(&rita), Some(json!({ "status": "famous" })))
    .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, updated) = h.call("PUT", &app_uri, Some(&rita), shortlist).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["status"], "shortlisted");

  let list_uri = format!("/api/talent/casting-calls/{call}/applications");
  let (status, _) = h.call("GET", &list_uri, Some(&alice), None).await;
  assert_eq!(status, StatusCode::FORBIDDEN);
  let (status, list) = h.call("GET", &list_uri, Some(&rita), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn closed_calls_refuse_applications() {
  let h = harness().await;
  let (rita, _) = h.signup("rita").await;
  let (bob, _) = h.signup("bob").await;
  h.create_profile(&bob, "Bob").await;
  let call = h.create_call(&rita).await;
  let call_uri = format!("/api/talent/casting-calls/{call}");

  let (status, _) = h
    .call("PUT", &call_uri, Some(&bob), Some(json!({ "isActive": false })))
    .await;
  assert_eq!(status, StatusCode::FORBIDDEN);

  let (status, closed) = h
    .call("PUT", &call_uri, Some(&rita), Some(json!({ "isActive": false })))
    .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(closed["isActive"], false);
  assert_eq!(closed["projectTitle"], "Monsoon Nights");

  let (status, _) = h
    .call(
      "POST",
      &format!("{call_uri}/apply"),
      Some(&bob),
      Some(json!({})),
    )
    .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, detail) = h.call("GET", &call_uri, None, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(detail["postedBy"]["username"], "rita");
  assert_eq!(detail["roles"][0]["roleName"], "Lead");
}

// ─── Pulses ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn pulse_likes_toggle_and_comments() {
  let h = harness().await;
  let (alice, _) = h.signup("alice").await;
  let (bob, _) = h.signup("bob").await;

  let (status, pulse) = h
    .call("POST", "/api/pulses", Some(&alice), Some(json!({ "content": "Premiere tonight!" })))
    .await;
  assert_eq!(status, StatusCode::CREATED);
  let like_uri = format!("/api/pulses/{}/like", pulse["id"]);

  let (status, body) = h.call("POST", &like_uri, Some(&bob), None).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body, json!({ "liked": true, "likeCount": 1 }));

  let (status, body) = h.call("POST", &like_uri, Some(&bob), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "liked": false, "likeCount": 0 }));

  let (status, _) = h.call("POST", "/api/pulses/777/like", Some(&bob), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let comments_uri = format!("/api/pulses/{}/comments", pulse["id"]);
  let (status, _) = h
    .call("POST", &comments_uri, Some(&bob), Some(json!({ "content": "  " })))
    .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  let (status, comment) = h
    .call("POST", &comments_uri, Some(&bob), Some(json!({ "content": "Congrats" })))
    .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(comment["author"]["username"], "bob");

  let (_, comments) = h.call("GET", &comments_uri, None, None).await;
  assert_eq!(comments[0]["content"], "Congrats");
  assert_eq!(comments[0]["author"]["username"], "bob");

  let (_, feed) = h.call("GET", "/api/pulses", None, None).await;
  assert_eq!(feed[0]["author"]["username"], "alice");
  assert_eq!(feed[0]["commentCount"], 1);
  assert_eq!(feed[0]["likeCount"], 0);
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn catalog_writes_require_admin() {
  let h = harness().await;
  let (user, _) = h.signup("viewer").await;
  let (admin, admin_id) = h.signup("curator").await;
  h.store
    .set_user_role(UserId(admin_id), Role::Admin)
    .await
    .unwrap();

  let movie = Some(json!({ "title": "Kantara", "sidduscore": 8.7, "releaseDate": "2022-09-30" }));
  let (status, _) = h.call("POST", "/api/movies", Some(&user), movie.clone()).await;
  assert_eq!(status, StatusCode::FORBIDDEN);

  let (status, created) = h.call("POST", "/api/movies", Some(&admin), movie).await;
  assert_eq!(status, StatusCode::CREATED);
  let movie_uri = format!("/api/movies/{}", created["id"]);

  let (status, _) = h
    .call("PUT", &movie_uri, Some(&admin), Some(json!({ "title": "Kantara", "sidduscore": 11 })))
    .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, body) = h.call("POST", &format!("{movie_uri}/like"), Some(&user), None).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["likeCount"], 1);

  let (status, award) = h
    .call("POST", "/api/awards", Some(&admin), Some(json!({ "name": "Best Debut", "year": 2024 })))
    .await;
  assert_eq!(status, StatusCode::CREATED);
  let award_uri = format!("/api/awards/{}", award["id"]);
  assert_eq!(
    h.call("DELETE", &award_uri, Some(&user), None).await.0,
    StatusCode::FORBIDDEN
  );
  assert_eq!(h.call("DELETE", &award_uri, Some(&admin), None).await.0, StatusCode::OK);
  assert_eq!(h.call("GET", &award_uri, None, None).await.0, StatusCode::NOT_FOUND);

  let (status, fixture) = h
    .call(
      "POST",
      "/api/cricket/matches",
      Some(&admin),
      Some(json!({ "team1": "India", "team2": "Australia" })),
    )
    .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(fixture["status"], "upcoming");

  let (_, matches) = h.call("GET", "/api/cricket/matches", None, None).await;
  assert_eq!(matches.as_array().unwrap().len(), 1);
}
