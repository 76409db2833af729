pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod navigation;
pub mod routes;
pub mod session;
pub mod templates;

// Re-export commonly used types
pub use dtos::{ChunkDocumentRequest, CredentialsForm, ErrorResponse};
pub use errors::ApiError;
pub use middleware::{RequestId, RequestIdMiddleware, WebAuthMiddleware};
pub use routes::{
  DocumentRouteDependencies, WebRouteDependencies, configure_auth_api_routes,
  configure_document_api_routes, configure_web_routes,
};
pub use session::{ACCESS_TOKEN_COOKIE, SessionCookies};
pub use templates::TemplateEngine;
