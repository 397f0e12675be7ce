use chrono::Utc;
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::{json, Json, Value};
use rocket::Request;

// Guard failures bypass route handlers, so these catchers keep the error
// bodies JSON like everything else the API returns.

fn error_body(status: Status, message: &str, req: &Request<'_>) -> Json<Value> {
    Json(json!({
        "timestamp": Utc::now().naive_utc(),
        "status": status.code,
        "error": status.reason_lossy(),
        "message": message,
        "path": req.uri().path().to_string(),
    }))
}

#[catch(401)]
pub fn unauthorized(req: &Request<'_>) -> status::Custom<Json<Value>> {
    status::Custom(
        Status::Unauthorized,
        error_body(Status::Unauthorized, "Authentication required", req),
    )
}

#[catch(403)]
pub fn forbidden(req: &Request<'_>) -> status::Custom<Json<Value>> {
    status::Custom(
        Status::Forbidden,
        error_body(Status::Forbidden, "Access denied: insufficient role", req),
    )
}

#[catch(404)]
pub fn not_found(req: &Request<'_>) -> status::Custom<Json<Value>> {
    status::Custom(
        Status::NotFound,
        error_body(Status::NotFound, "Resource not found", req),
    )
}

#[catch(429)]
pub fn too_many_requests(req: &Request<'_>) -> status::Custom<Json<Value>> {
    status::Custom(
        Status::TooManyRequests,
        error_body(
            Status::TooManyRequests,
            "Rate limit exceeded. Too many requests, please try again later.",
            req,
        ),
    )
}

#[catch(default)]
pub fn default_catcher(status: Status, req: &Request<'_>) -> status::Custom<Json<Value>> {
    status::Custom(status, error_body(status, "Request could not be processed", req))
}
