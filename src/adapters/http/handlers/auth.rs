use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use std::sync::Arc;

use crate::adapters::http::dtos::CredentialsForm;
use crate::adapters::http::navigation::navigate;
use crate::adapters::http::session::SessionCookies;
use crate::application::auth::{
  ActionOutcome, ActionResult, SignInUseCase, SignOutUseCase, SignUpUseCase,
};

/// Renders an `ActionResult` as JSON: 200 on success, 400 on failure
pub fn action_response<T: Serialize>(result: &ActionResult<T>) -> HttpResponse {
  if result.is_success() {
    HttpResponse::Ok().json(result)
  } else {
    HttpResponse::BadRequest().json(result)
  }
}

/// Redirects answer `303 See Other`; API clients follow `Location` themselves
fn outcome_response<T: Serialize>(outcome: ActionOutcome<T>, cookies: &SessionCookies) -> HttpResponse {
  match outcome {
    ActionOutcome::Redirect(redirect) => navigate(redirect, cookies, false),
    ActionOutcome::Completed(result) => action_response(&result),
  }
}

/// POST /api/v1/auth/sign-in
pub async fn sign_in_handler(
  body: web::Json<CredentialsForm>,
  use_case: web::Data<Arc<SignInUseCase>>,
  cookies: web::Data<SessionCookies>,
) -> HttpResponse {
  let outcome = use_case.execute(&body.email, &body.password).await;
  outcome_response(outcome, &cookies)
}

/// POST /api/v1/auth/sign-up
pub async fn sign_up_handler(
  body: web::Json<CredentialsForm>,
  use_case: web::Data<Arc<SignUpUseCase>>,
) -> HttpResponse {
  action_response(&use_case.execute(&body.email, &body.password).await)
}

/// POST /api/v1/auth/sign-out
///
/// The token comes from `Authorization: Bearer`, or the session cookie.
pub async fn sign_out_handler(
  req: HttpRequest,
  use_case: web::Data<Arc<SignOutUseCase>>,
  cookies: web::Data<SessionCookies>,
) -> HttpResponse {
  let token = SessionCookies::bearer_or_cookie(&req);
  let outcome = use_case.execute(token.as_ref()).await;
  outcome_response(outcome, &cookies)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::auth::test_support::{
    FakeAuthProvider, RecordingPageCache, rejected,
  };
  use crate::infrastructure::config::SessionConfig;
  use actix_web::{
    App,
    http::{StatusCode, header},
    test::{self, TestRequest},
  };

  macro_rules! api_app {
    ($provider:expr, $page_cache:expr) => {{
      let provider: Arc<FakeAuthProvider> = $provider;
      let page_cache: Arc<RecordingPageCache> = $page_cache;

      test::init_service(
        App::new()
          .app_data(web::Data::new(SessionCookies::new(&SessionConfig::default())))
          .app_data(web::Data::new(Arc::new(SignInUseCase::new(
            provider.clone(),
            page_cache.clone(),
          ))))
          .app_data(web::Data::new(Arc::new(SignUpUseCase::new(
            provider.clone(),
            Some("https://app.example.com/".to_string()),
          ))))
          .app_data(web::Data::new(Arc::new(SignOutUseCase::new(
            provider, page_cache,
          ))))
          .route("/sign-in", web::post().to(sign_in_handler))
          .route("/sign-up", web::post().to(sign_up_handler))
          .route("/sign-out", web::post().to(sign_out_handler)),
      )
      .await
    }};
  }

  #[test]
  fn test_action_response_status() {
    assert_eq!(
      action_response(&ActionResult::<()>::ok()).status(),
      StatusCode::OK
    );
    assert_eq!(
      action_response(&ActionResult::<()>::failure("nope")).status(),
      StatusCode::BAD_REQUEST
    );
  }

  #[actix_web::test]
  async fn test_sign_in_redirects_and_revalidates() {
    let page_cache = Arc::new(RecordingPageCache::default());
    let app = api_app!(Arc::new(FakeAuthProvider::default()), page_cache.clone());

    let req = TestRequest::post()
      .uri("/sign-in")
      .set_json(serde_json::json!({ "email": "user@example.com", "password": "password123" }))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/dashboard");
    assert!(resp.headers().get(header::SET_COOKIE).is_some());
    assert_eq!(page_cache.revalidated(), vec!["/dashboard".to_string()]);
  }

  #[actix_web::test]
  async fn test_sign_in_failure_is_action_result() {
    let provider =
      Arc::new(FakeAuthProvider::default().with_sign_in(Err(rejected("Invalid login credentials"))));
    let app = api_app!(provider, Arc::new(RecordingPageCache::default()));

    let req = TestRequest::post()
      .uri("/sign-in")
      .set_json(serde_json::json!({ "email": "user@example.com", "password": "password123" }))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
      body,
      serde_json::json!({ "success": false, "error": "Invalid login credentials" })
    );
  }

  #[actix_web::test]
  async fn test_sign_up_returns_confirmation() {
    let app = api_app!(
      Arc::new(FakeAuthProvider::default()),
      Arc::new(RecordingPageCache::default())
    );

    let req = TestRequest::post()
      .uri("/sign-up")
      .set_json(serde_json::json!({ "email": "new@example.com", "password": "password123" }))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
      body,
      serde_json::json!({
        "success": true,
        "data": { "message": "Check your email to confirm your account!" }
      })
    );
  }

  #[actix_web::test]
  async fn test_sign_out_with_bearer_token() {
    let page_cache = Arc::new(RecordingPageCache::default());
    let app = api_app!(Arc::new(FakeAuthProvider::default()), page_cache.clone());

    let req = TestRequest::post()
      .uri("/sign-out")
      .insert_header((header::AUTHORIZATION, "Bearer access-token"))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
    assert_eq!(page_cache.revalidated(), vec!["/".to_string()]);
  }

  #[actix_web::test]
  async fn test_sign_out_failure_is_action_result() {
    let provider =
      Arc::new(FakeAuthProvider::default().with_sign_out(Err(rejected("Session not found"))));
    let app = api_app!(provider, Arc::new(RecordingPageCache::default()));

    let resp = test::call_service(&app, TestRequest::post().uri("/sign-out").to_request()).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Session not found");
  }
}
