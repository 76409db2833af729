use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::adapters::http::dtos::ChunkDocumentRequest;
use crate::adapters::http::errors::ApiError;
use crate::adapters::http::session::SessionCookies;
use crate::application::auth::{ActionResult, GetCurrentUserUseCase};
use crate::application::documents::ChunkDocumentUseCase;

/// POST /api/v1/documents/chunk
///
/// Requires a session (`Authorization: Bearer` or the session cookie).
/// Tokenization runs on the blocking pool.
pub async fn chunk_document_handler(
  req: HttpRequest,
  body: web::Json<ChunkDocumentRequest>,
  use_case: web::Data<Arc<ChunkDocumentUseCase>>,
  get_user_use_case: web::Data<Arc<GetCurrentUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let token = SessionCookies::bearer_or_cookie(&req);
  let user = get_user_use_case
    .execute(token.as_ref())
    .await
    .ok_or(ApiError::Unauthenticated)?;

  let ChunkDocumentRequest { text, metadata } = body.into_inner();
  let use_case = use_case.get_ref().clone();

  let chunks = web::block(move || use_case.execute(&text, metadata))
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?
    .map_err(|e| ApiError::Internal(e.to_string()))?;

  tracing::debug!(user_id = %user.id, chunks = chunks.len(), "Chunked document");
  Ok(HttpResponse::Ok().json(ActionResult::with_data(chunks)))
}
