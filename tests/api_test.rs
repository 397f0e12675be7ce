use matchday_booking_system::{build_rocket, models::user::Role, utils::jwt::Claims};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header as JwtHeader};
use rocket::http::{ContentType, Header, Status};
use rocket::local::asynchronous::Client;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePool as Pool;
use test_context::{test_context, AsyncTestContext};

mod common {
    pub mod test_utils;
}
use common::test_utils::TestDb;
use ctor::dtor;

const PASSWORD: &str = "Grandstand.7x";

struct ApiContext {
    pool: Pool,
    client: Client,
}

#[dtor]
fn cleanup() {
    if let Err(e) = TestDb::cleanup_database_sync() {
        eprintln!("Failed to cleanup test database: {}", e);
    }
}

#[async_trait]
impl AsyncTestContext for ApiContext {
    async fn setup() -> Self {
        let pool = TestDb::get_instance()
            .await
            .expect("Failed to get test database instance");

        let client = Client::tracked(build_rocket(pool.clone()))
            .await
            .expect("valid rocket instance");

        ApiContext { pool, client }
    }

    async fn teardown(self) {
        let _ = sqlx::query("SELECT 1").execute(&self.pool).await;
    }
}

fn bearer(token: &str) -> Header<'static> {
    Header::new("Authorization", format!("Bearer {}", token))
}

async fn register(client: &Client, username: &str, role: Option<&str>) -> i64 {
    let mut body = json!({
        "username": username,
        "email": format!("{}@matchday.io", username),
        "password": PASSWORD,
    });
    if let Some(role) = role {
        body["role"] = json!(role);
    }

    let response = client
        .post("/api/auth/register")
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let body: Value = response.into_json().await.expect("json body");
    assert_eq!(body["status"], "success");
    body["user_id"].as_i64().expect("user id")
}

async fn login(client: &Client, username: &str) -> String {
    let response = client
        .post("/api/auth/login")
        .header(ContentType::JSON)
        .body(json!({ "username": username, "password": PASSWORD }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let body: Value = response.into_json().await.expect("json body");
    body["token"].as_str().expect("token").to_string()
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_register_login_and_profile(ctx: &ApiContext) {
    let user_id = register(&ctx.client, "api_fan", None).await;
    let token = login(&ctx.client, "api_fan").await;

    let response = ctx
        .client
        .get("/api/profile")
        .header(bearer(&token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let profile: Value = response.into_json().await.expect("json body");
    assert_eq!(profile["id"].as_i64(), Some(user_id));
    assert_eq!(profile["username"], "api_fan");
    assert_eq!(profile["role"], "USER");
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_protected_route_requires_token(ctx: &ApiContext) {
    let response = ctx.client.get("/api/profile").dispatch().await;
    assert_eq!(response.status(), Status::Unauthorized);

    // Guard failures still produce a JSON body, via the catcher
    let body: Value = response.into_json().await.expect("json body");
    assert_eq!(body["status"].as_i64(), Some(401));
    assert_eq!(body["message"], "Authentication required");
    assert_eq!(body["path"], "/api/profile");
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_invalid_tokens_rejected(ctx: &ApiContext) {
    register(&ctx.client, "api_tamper", None).await;
    let token = login(&ctx.client, "api_tamper").await;

    // Flip the first character of the signature segment
    let mut bytes = token.clone().into_bytes();
    let sig_start = token.rfind('.').unwrap() + 1;
    bytes[sig_start] = if bytes[sig_start] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(bytes).unwrap();

    let response = ctx
        .client
        .get("/api/profile")
        .header(bearer(&tampered))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Unauthorized);

    // An expired token signed with the right secret is just as dead
    let claims = Claims {
        sub: "api_tamper".to_string(),
        role: Role::User,
        exp: (Utc::now() - Duration::hours(2)).timestamp() as usize,
    };
    let expired = encode(
        &JwtHeader::default(),
        &claims,
        &EncodingKey::from_secret(b"matchday-test-secret"),
    )
    .expect("token should encode");

    let response = ctx
        .client
        .get("/api/profile")
        .header(bearer(&expired))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Unauthorized);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_role_enforcement(ctx: &ApiContext) {
    register(&ctx.client, "api_plain", None).await;
    let user_token = login(&ctx.client, "api_plain").await;

    let response = ctx
        .client
        .get("/api/admin/stats")
        .header(bearer(&user_token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Forbidden);
    let body: Value = response.into_json().await.expect("json body");
    assert_eq!(body["message"], "Access denied: insufficient role");

    let response = ctx
        .client
        .get("/api/cashier/bookings")
        .header(bearer(&user_token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Forbidden);

    // The right roles get through
    register(&ctx.client, "api_boss", Some("ADMIN")).await;
    let admin_token = login(&ctx.client, "api_boss").await;
    let response = ctx
        .client
        .get("/api/admin/stats")
        .header(bearer(&admin_token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let stats: Value = response.into_json().await.expect("json body");
    assert!(stats["total_users"].as_i64().unwrap() >= 2);

    register(&ctx.client, "api_counter", Some("CASHIER")).await;
    let cashier_token = login(&ctx.client, "api_counter").await;
    let response = ctx
        .client
        .get("/api/cashier/bookings")
        .header(bearer(&cashier_token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    // Cashiers are not admins
    let response = ctx
        .client
        .get("/api/admin/stats")
        .header(bearer(&cashier_token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Forbidden);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_booking_flow_over_api(ctx: &ApiContext) {
    register(&ctx.client, "api_seller", Some("ADMIN")).await;
    let admin_token = login(&ctx.client, "api_seller").await;
    let buyer_id = register(&ctx.client, "api_buyer", None).await;
    let buyer_token = login(&ctx.client, "api_buyer").await;

    // Admin puts an event on sale
    let response = ctx
        .client
        .post("/api/events")
        .header(ContentType::JSON)
        .header(bearer(&admin_token))
        .body(
            json!({
                "title": "API Cup Final",
                "venue": "Interchange Arena",
                "event_date": "2027-05-01T18:00:00",
                "total_seats": 50,
                "price": "125000"
            })
            .to_string(),
        )
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let event: Value = response.into_json().await.expect("json body");
    let event_id = event["id"].as_i64().expect("event id");
    assert_eq!(event["available_seats"].as_i64(), Some(50));

    // Buyer cannot create events
    let response = ctx
        .client
        .post("/api/events")
        .header(ContentType::JSON)
        .header(bearer(&buyer_token))
        .body(
            json!({
                "title": "Pirate Fixture",
                "venue": "Backyard",
                "event_date": "2027-05-01T18:00:00",
                "total_seats": 5,
                "price": "1000"
            })
            .to_string(),
        )
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Forbidden);

    // Buyer books two seats
    let response = ctx
        .client
        .post("/api/bookings")
        .header(ContentType::JSON)
        .header(bearer(&buyer_token))
        .body(json!({ "event_id": event_id, "number_of_tickets": 2 }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let booking: Value = response.into_json().await.expect("json body");
    let booking_id = booking["id"].as_i64().expect("booking id");
    assert!(booking["booking_reference"].as_str().unwrap().starts_with("BK-"));
    assert_eq!(booking["total_amount"], "250000");
    assert_eq!(booking["status"], "CONFIRMED");

    let response = ctx
        .client
        .get(format!("/api/events/{}", event_id))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let event: Value = response.into_json().await.expect("json body");
    assert_eq!(event["available_seats"].as_i64(), Some(48));

    // Only the owner (or an admin) may read a user's booking list
    let response = ctx
        .client
        .get(format!("/api/bookings/user/{}", buyer_id))
        .header(bearer(&admin_token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let response = ctx
        .client
        .get(format!("/api/bookings/user/{}", buyer_id))
        .header(bearer(&buyer_token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let bookings: Value = response.into_json().await.expect("json body");
    assert_eq!(bookings.as_array().unwrap().len(), 1);

    // Cancelling hands the seats back
    let response = ctx
        .client
        .put(format!("/api/bookings/{}/cancel", booking_id))
        .header(bearer(&buyer_token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let cancelled: Value = response.into_json().await.expect("json body");
    assert_eq!(cancelled["status"], "CANCELLED");

    let response = ctx
        .client
        .get(format!("/api/events/{}", event_id))
        .dispatch()
        .await;
    let event: Value = response.into_json().await.expect("json body");
    assert_eq!(event["available_seats"].as_i64(), Some(50));
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_foreign_booking_list_forbidden(ctx: &ApiContext) {
    let owner_id = register(&ctx.client, "api_owner", None).await;
    register(&ctx.client, "api_snoop", None).await;
    let snoop_token = login(&ctx.client, "api_snoop").await;

    let response = ctx
        .client
        .get(format!("/api/bookings/user/{}", owner_id))
        .header(bearer(&snoop_token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Forbidden);
    let body: Value = response.into_json().await.expect("json body");
    assert_eq!(body["error"], "Forbidden: You can only view your own bookings");
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_validation_errors_surface(ctx: &ApiContext) {
    // Username too short
    let response = ctx
        .client
        .post("/api/auth/register")
        .header(ContentType::JSON)
        .body(
            json!({
                "username": "ab",
                "email": "ab@matchday.io",
                "password": PASSWORD,
            })
            .to_string(),
        )
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    let body: Value = response.into_json().await.expect("json body");
    assert!(
        body["error"].as_str().unwrap().contains("username"),
        "got: {}",
        body["error"]
    );

    // Malformed JSON falls through to the default catcher
    let response = ctx
        .client
        .post("/api/auth/register")
        .header(ContentType::JSON)
        .body("{not json")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::UnprocessableEntity);
    let body: Value = response.into_json().await.expect("json body");
    assert_eq!(body["status"].as_i64(), Some(422));
    assert_eq!(body["message"], "Request could not be processed");
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_rate_limit_guards_auth(ctx: &ApiContext) {
    let attempt = |ip: &'static str| {
        let client = &ctx.client;
        async move {
            client
                .post("/api/auth/login")
                .header(ContentType::JSON)
                .header(Header::new("X-Forwarded-For", ip))
                .body(json!({ "username": "rate_ghost", "password": "Wrong.Pass9x" }).to_string())
                .dispatch()
                .await
        }
    };

    for i in 0..10 {
        let response = attempt("198.51.100.9").await;
        assert_eq!(response.status(), Status::Unauthorized, "attempt {} is just a bad login", i + 1);
    }

    let response = attempt("198.51.100.9").await;
    assert_eq!(response.status(), Status::TooManyRequests);
    let body: Value = response.into_json().await.expect("json body");
    assert_eq!(body["status"].as_i64(), Some(429));
    assert_eq!(
        body["message"],
        "Rate limit exceeded. Too many requests, please try again later."
    );

    // Another address still gets the ordinary rejection
    let response = attempt("198.51.100.10").await;
    assert_eq!(response.status(), Status::Unauthorized);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_public_endpoints_need_no_token(ctx: &ApiContext) {
    let response = ctx.client.get("/api/events").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*"),
        "CORS header is attached to API responses"
    );
    let events: Value = response.into_json().await.expect("json body");
    assert!(events.is_array());

    let response = ctx.client.get("/api/leagues").dispatch().await;
    assert_eq!(response.status(), Status::Ok);

    let response = ctx.client.get("/api/events/stats").dispatch().await;
    assert_eq!(response.status(), Status::Ok);

    let response = ctx.client.get("/api/definitely/not/here").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    let body: Value = response.into_json().await.expect("json body");
    assert_eq!(body["status"].as_i64(), Some(404));
    assert_eq!(body["error"], "Not Found");
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_api_docs_served(ctx: &ApiContext) {
    let response = ctx.client.get("/api/openapi.json").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let spec: Value = response.into_json().await.expect("json body");
    assert!(spec["openapi"].as_str().unwrap().starts_with("3.0"));

    let response = ctx.client.get("/swagger/index.html").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
}
