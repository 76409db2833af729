use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{error, middleware::Condition, web};
use std::sync::Arc;

use crate::application::auth::{
  GetCurrentUserUseCase, SignInUseCase, SignOutUseCase, SignUpUseCase,
};
use crate::application::documents::ChunkDocumentUseCase;
use crate::domain::auth::ports::PageCache;
use crate::infrastructure::config::RateLimitConfig;

use super::errors::ApiError;
use super::handlers::{auth, documents, pages, web_auth};
use super::middleware::WebAuthMiddleware;
use super::session::SessionCookies;
use super::templates::TemplateEngine;

/// Everything the page and auth routes need
#[derive(Clone)]
pub struct WebRouteDependencies {
  pub templates: TemplateEngine,
  pub cookies: SessionCookies,
  pub page_cache: Arc<dyn PageCache>,
  pub sign_in_use_case: Arc<SignInUseCase>,
  pub sign_up_use_case: Arc<SignUpUseCase>,
  pub sign_out_use_case: Arc<SignOutUseCase>,
  pub get_user_use_case: Arc<GetCurrentUserUseCase>,
  pub rate_limit: RateLimitConfig,
}

/// Everything the document API needs
#[derive(Clone)]
pub struct DocumentRouteDependencies {
  pub chunk_document_use_case: Arc<ChunkDocumentUseCase>,
  pub get_user_use_case: Arc<GetCurrentUserUseCase>,
  /// Largest accepted request body, in bytes
  pub max_body_bytes: usize,
}

fn json_config() -> web::JsonConfig {
  web::JsonConfig::default()
    .error_handler(|err, _req| error::Error::from(ApiError::Validation(err.to_string())))
}

fn form_config() -> web::FormConfig {
  web::FormConfig::default()
    .error_handler(|err, _req| error::Error::from(ApiError::Validation(err.to_string())))
}

/// Configure web UI routes
///
/// # Routes
///
/// - GET / - Redirect to the dashboard or the login page
/// - GET /login - Sign-in and sign-up forms
/// - GET /dashboard - Dashboard (requires a session)
/// - POST /auth/sign-in, /auth/sign-up, /auth/sign-out - Form submissions (rate limited)
pub fn configure_web_routes(cfg: &mut web::ServiceConfig, deps: WebRouteDependencies) {
  let governor = GovernorConfigBuilder::default()
    .per_second(deps.rate_limit.replenish_seconds.max(1))
    .burst_size(deps.rate_limit.burst_size.max(1))
    .finish()
    .unwrap_or_default();

  cfg
    .app_data(web::Data::new(deps.templates.clone()))
    .app_data(web::Data::new(deps.cookies.clone()))
    .app_data(web::Data::new(deps.get_user_use_case.clone()))
    .app_data(web::Data::new(deps.page_cache.clone()));

  // Public routes
  cfg
    .route("/", web::get().to(pages::root))
    .route("/login", web::get().to(pages::login_page));

  // Auth form submission routes
  cfg.service(
    web::scope("/auth")
      .wrap(Condition::new(
        deps.rate_limit.enabled,
        Governor::new(&governor),
      ))
      .app_data(form_config())
      .app_data(web::Data::new(deps.sign_in_use_case.clone()))
      .app_data(web::Data::new(deps.sign_up_use_case.clone()))
      .app_data(web::Data::new(deps.sign_out_use_case.clone()))
      .route("/sign-in", web::post().to(web_auth::sign_in_submit))
      .route("/sign-up", web::post().to(web_auth::sign_up_submit))
      .route("/sign-out", web::post().to(web_auth::sign_out_submit)),
  );

  // Protected routes
  cfg.service(
    web::resource("/dashboard")
      .wrap(WebAuthMiddleware::new(
        deps.get_user_use_case.clone(),
        deps.cookies.clone(),
      ))
      .route(web::get().to(pages::dashboard_page)),
  );
}

/// Configure the JSON auth API under `/api/v1/auth`
///
/// # Routes
///
/// - POST /sign-in - Sign in, 303 to the dashboard with the session cookie
/// - POST /sign-up - Register, `ActionResult` with the confirmation message
/// - POST /sign-out - Sign out, 303 to the login page clearing the cookie
pub fn configure_auth_api_routes(cfg: &mut web::ServiceConfig, deps: WebRouteDependencies) {
  let governor = GovernorConfigBuilder::default()
    .per_second(deps.rate_limit.replenish_seconds.max(1))
    .burst_size(deps.rate_limit.burst_size.max(1))
    .finish()
    .unwrap_or_default();

  cfg.service(
    web::scope("/api/v1/auth")
      .wrap(Condition::new(
        deps.rate_limit.enabled,
        Governor::new(&governor),
      ))
      .app_data(json_config())
      .app_data(web::Data::new(deps.cookies))
      .app_data(web::Data::new(deps.sign_in_use_case))
      .app_data(web::Data::new(deps.sign_up_use_case))
      .app_data(web::Data::new(deps.sign_out_use_case))
      .route("/sign-in", web::post().to(auth::sign_in_handler))
      .route("/sign-up", web::post().to(auth::sign_up_handler))
      .route("/sign-out", web::post().to(auth::sign_out_handler)),
  );
}

/// Configure the document API under `/api/v1/documents`
///
/// # Routes
///
/// - POST /chunk - Split text into overlapping chunks (requires a session)
pub fn configure_document_api_routes(
  cfg: &mut web::ServiceConfig,
  deps: DocumentRouteDependencies,
) {
  cfg.service(
    web::scope("/api/v1/documents")
      .app_data(json_config().limit(deps.max_body_bytes))
      .app_data(web::Data::new(deps.chunk_document_use_case))
      .app_data(web::Data::new(deps.get_user_use_case))
      .route("/chunk", web::post().to(documents::chunk_document_handler)),
  );
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::auth::test_support::{FakeAuthProvider, RecordingPageCache};
  use crate::domain::documents::{
    ChunkError, DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP, TextChunker, TokenCounter,
  };
  use crate::infrastructure::config::SessionConfig;
  use actix_web::{
    App,
    http::StatusCode,
    test::{self, TestRequest},
  };

  struct WordCounter;

  impl TokenCounter for WordCounter {
    fn count_tokens(&self, text: &str) -> Result<usize, ChunkError> {
      Ok(text.split_whitespace().count())
    }
  }

  fn deps() -> WebRouteDependencies {
    let provider = Arc::new(FakeAuthProvider::default());
    let page_cache: Arc<dyn PageCache> = Arc::new(RecordingPageCache::default());

    WebRouteDependencies {
      templates: TemplateEngine::new().unwrap(),
      cookies: SessionCookies::new(&SessionConfig::default()),
      page_cache: page_cache.clone(),
      sign_in_use_case: Arc::new(SignInUseCase::new(provider.clone(), page_cache.clone())),
      sign_up_use_case: Arc::new(SignUpUseCase::new(provider.clone(), None)),
      sign_out_use_case: Arc::new(SignOutUseCase::new(provider.clone(), page_cache)),
      get_user_use_case: Arc::new(GetCurrentUserUseCase::new(provider)),
      rate_limit: RateLimitConfig {
        enabled: false,
        ..Default::default()
      },
    }
  }

  #[actix_web::test]
  async fn test_malformed_json_is_validation_error() {
    let deps = deps();
    let app = test::init_service(
      App::new().configure(|cfg| configure_auth_api_routes(cfg, deps.clone())),
    )
    .await;

    let req = TestRequest::post()
      .uri("/api/v1/auth/sign-in")
      .insert_header(("content-type", "application/json"))
      .set_payload("{not json")
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
  }

  #[actix_web::test]
  async fn test_oversized_document_is_validation_error() {
    let deps = deps();
    let counter: Arc<dyn TokenCounter> = Arc::new(WordCounter);
    let documents = DocumentRouteDependencies {
      chunk_document_use_case: Arc::new(ChunkDocumentUseCase::new(TextChunker::new(
        counter,
        DEFAULT_CHUNK_SIZE,
        DEFAULT_OVERLAP,
      ))),
      get_user_use_case: deps.get_user_use_case.clone(),
      max_body_bytes: 64,
    };
    let app = test::init_service(
      App::new().configure(|cfg| configure_document_api_routes(cfg, documents.clone())),
    )
    .await;

    let req = TestRequest::post()
      .uri("/api/v1/documents/chunk")
      .insert_header(("authorization", "Bearer access-token"))
      .set_json(serde_json::json!({ "text": "word ".repeat(100) }))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
  }

  #[actix_web::test]
  async fn test_unknown_auth_route_is_not_found() {
    let deps = deps();
    let app =
      test::init_service(App::new().configure(|cfg| configure_web_routes(cfg, deps.clone())))
        .await;

    let req = TestRequest::post().uri("/auth/login").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
