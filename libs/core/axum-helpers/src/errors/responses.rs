//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error - the index or an upstream call failed",
    content_type = "application/json",
    example = json!({ "error": "Vector with id 'doc_0' already exists" })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - the payload could not be parsed or validated",
    content_type = "application/json",
    example = json!({ "error": "Invalid JSON body: missing field `embeddings` at line 1 column 22" })
)]
pub struct BadRequestResponse(pub ErrorResponse);
