use crate::utils::error::AppError;
use indexmap::IndexMap;
use okapi::openapi3::SchemaObject;
use rocket::http::Status;
use rocket_okapi::gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::{MediaType, RefOr, Response, Responses};
use rocket_okapi::response::OpenApiResponderInner;
use serde_json::json;

// Catalogue of the statuses a handler returning AppError may produce, so the
// generated spec documents the error side of every route.
impl<'r> OpenApiResponderInner for AppError {
    fn responses(_gen: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        let examples = [
            (
                Status::BadRequest,
                AppError::ValidationError("Bad Request".to_string()),
            ),
            (
                Status::Unauthorized,
                AppError::AuthError("Unauthorized".to_string()),
            ),
            (
                Status::Forbidden,
                AppError::Forbidden("Forbidden".to_string()),
            ),
            (
                Status::NotFound,
                AppError::NotFound("Not Found".to_string()),
            ),
            (
                Status::Conflict,
                AppError::Conflict("Conflict".to_string()),
            ),
            (
                Status::UnprocessableEntity,
                AppError::Unprocessable("Unprocessable".to_string()),
            ),
            (
                Status::InternalServerError,
                AppError::DatabaseError("Internal Server Error".to_string()),
            ),
        ];

        let mut responses = Responses::default();
        for (status, example) in examples {
            responses.responses.insert(
                status.code.to_string(),
                RefOr::Object(error_response(status, &example)),
            );
        }
        Ok(responses)
    }
}

fn error_response(status: Status, example: &AppError) -> Response {
    let mut content = IndexMap::new();
    content.insert(
        "application/json".to_string(),
        MediaType {
            schema: Some(SchemaObject::default()),
            example: Some(json!({ "error": example.to_string() })),
            ..Default::default()
        },
    );
    Response {
        description: status.reason_lossy().to_string(),
        content,
        ..Default::default()
    }
}
