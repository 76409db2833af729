use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use std::sync::Arc;

use crate::adapters::http::dtos::CredentialsForm;
use crate::adapters::http::errors::ApiError;
use crate::adapters::http::navigation::{is_htmx, navigate};
use crate::adapters::http::session::SessionCookies;
use crate::adapters::http::templates::TemplateEngine;
use crate::application::auth::{ActionOutcome, SignInUseCase, SignOutUseCase, SignUpUseCase};

use super::pages::{LoginFormState, LoginPanel, render_login};

fn form_response(status: StatusCode, html: String) -> HttpResponse {
  HttpResponse::build(status)
    .content_type("text/html")
    .body(html)
}

/// Handle sign-in form submission
pub async fn sign_in_submit(
  req: HttpRequest,
  form: web::Form<CredentialsForm>,
  use_case: web::Data<Arc<SignInUseCase>>,
  templates: web::Data<TemplateEngine>,
  cookies: web::Data<SessionCookies>,
) -> Result<HttpResponse, ApiError> {
  let htmx = is_htmx(&req);

  match use_case.execute(&form.email, &form.password).await {
    ActionOutcome::Redirect(redirect) => Ok(navigate(redirect, &cookies, htmx)),
    ActionOutcome::Completed(result) => {
      let state = LoginFormState {
        sign_in_email: Some(form.email.clone()),
        sign_in_error: result.error().map(str::to_string),
        ..Default::default()
      };
      let status = if result.is_success() {
        StatusCode::OK
      } else {
        StatusCode::BAD_REQUEST
      };

      let html = render_login(&templates, &state, htmx.then_some(LoginPanel::SignIn))?;
      Ok(form_response(status, html))
    }
  }
}

/// Handle sign-up form submission
///
/// Success keeps the user on the page with the confirmation message.
pub async fn sign_up_submit(
  req: HttpRequest,
  form: web::Form<CredentialsForm>,
  use_case: web::Data<Arc<SignUpUseCase>>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, ApiError> {
  let htmx = is_htmx(&req);
  let result = use_case.execute(&form.email, &form.password).await;

  let (status, state) = match result.error() {
    None => (
      StatusCode::OK,
      LoginFormState {
        sign_up_message: result.data().map(|d| d.message.clone()),
        ..Default::default()
      },
    ),
    Some(error) => (
      StatusCode::BAD_REQUEST,
      LoginFormState {
        sign_up_email: Some(form.email.clone()),
        sign_up_error: Some(error.to_string()),
        ..Default::default()
      },
    ),
  };

  let html = render_login(&templates, &state, htmx.then_some(LoginPanel::SignUp))?;
  Ok(form_response(status, html))
}

/// Handle the sign-out form
///
/// Failures are logged by the use case; with nothing to navigate to the
/// response is `204 No Content`.
pub async fn sign_out_submit(
  req: HttpRequest,
  use_case: web::Data<Arc<SignOutUseCase>>,
  cookies: web::Data<SessionCookies>,
) -> HttpResponse {
  let token = SessionCookies::access_token(&req);

  match use_case.execute_form(token.as_ref()).await {
    Some(redirect) => navigate(redirect, &cookies, is_htmx(&req)),
    None => HttpResponse::NoContent().finish(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::adapters::http::session::ACCESS_TOKEN_COOKIE;
  use crate::application::auth::test_support::{
    FakeAuthProvider, ProviderCall, RecordingPageCache, rejected,
  };
  use crate::infrastructure::config::SessionConfig;
  use actix_web::{
    App,
    cookie::Cookie,
    http::header,
    test::{self, TestRequest},
  };

  macro_rules! form_app {
    ($provider:expr, $public_url:expr) => {{
      let provider: Arc<FakeAuthProvider> = $provider;
      let page_cache = Arc::new(RecordingPageCache::default());
      let public_url: Option<&str> = $public_url;

      test::init_service(
        App::new()
          .app_data(web::Data::new(TemplateEngine::new().unwrap()))
          .app_data(web::Data::new(SessionCookies::new(&SessionConfig::default())))
          .app_data(web::Data::new(Arc::new(SignInUseCase::new(
            provider.clone(),
            page_cache.clone(),
          ))))
          .app_data(web::Data::new(Arc::new(SignUpUseCase::new(
            provider.clone(),
            public_url.map(str::to_string),
          ))))
          .app_data(web::Data::new(Arc::new(SignOutUseCase::new(
            provider, page_cache,
          ))))
          .route("/auth/sign-in", web::post().to(sign_in_submit))
          .route("/auth/sign-up", web::post().to(sign_up_submit))
          .route("/auth/sign-out", web::post().to(sign_out_submit)),
      )
      .await
    }};
  }

  fn credentials(email: &str, password: &str) -> [(&'static str, String); 2] {
    [
      ("email", email.to_string()),
      ("password", password.to_string()),
    ]
  }

  #[actix_web::test]
  async fn test_htmx_sign_in_redirects_with_cookie() {
    let app = form_app!(Arc::new(FakeAuthProvider::default()), None);

    let req = TestRequest::post()
      .uri("/auth/sign-in")
      .insert_header(("HX-Request", "true"))
      .set_form(credentials("user@example.com", "password123"))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("HX-Redirect").unwrap(), "/dashboard");
    let cookie = resp.response().cookies().next().expect("session cookie");
    assert_eq!(cookie.name(), ACCESS_TOKEN_COOKIE);
    assert_eq!(cookie.value(), "access-token");
  }

  #[actix_web::test]
  async fn test_plain_sign_in_uses_see_other() {
    let app = form_app!(Arc::new(FakeAuthProvider::default()), None);

    let req = TestRequest::post()
      .uri("/auth/sign-in")
      .set_form(credentials("user@example.com", "password123"))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/dashboard");
  }

  #[actix_web::test]
  async fn test_sign_in_failure_renders_partial() {
    let provider =
      Arc::new(FakeAuthProvider::default().with_sign_in(Err(rejected("Invalid login credentials"))));
    let app = form_app!(provider, None);

    let req = TestRequest::post()
      .uri("/auth/sign-in")
      .insert_header(("HX-Request", "true"))
      .set_form(credentials("user@example.com", "wrong-password"))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.headers().get("HX-Redirect").is_none());
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Invalid login credentials"));
    assert!(!body.contains("<html"));
  }

  #[actix_web::test]
  async fn test_missing_fields_report_validation_message() {
    let provider = Arc::new(FakeAuthProvider::default());
    let app = form_app!(provider.clone(), None);

    let req = TestRequest::post()
      .uri("/auth/sign-in")
      .set_form([("email", "")])
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Email and password are required"));
    assert!(body.contains("<html"));
    assert!(provider.calls().is_empty());
  }

  #[actix_web::test]
  async fn test_sign_up_shows_confirmation() {
    let provider = Arc::new(FakeAuthProvider::default());
    let app = form_app!(provider.clone(), Some("https://app.example.com"));

    let req = TestRequest::post()
      .uri("/auth/sign-up")
      .insert_header(("HX-Request", "true"))
      .set_form(credentials("new@example.com", "password123"))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Check your email to confirm your account!"));
    assert_eq!(
      provider.calls(),
      vec![ProviderCall::SignUp {
        email: "new@example.com".to_string(),
        redirect_to: "https://app.example.com/auth/callback".to_string(),
      }]
    );
  }

  #[actix_web::test]
  async fn test_sign_up_without_public_url_fails() {
    let app = form_app!(Arc::new(FakeAuthProvider::default()), None);

    let req = TestRequest::post()
      .uri("/auth/sign-up")
      .insert_header(("HX-Request", "true"))
      .set_form(credentials("new@example.com", "password123"))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Server configuration error"));
  }

  #[actix_web::test]
  async fn test_sign_out_clears_cookie() {
    let provider = Arc::new(FakeAuthProvider::default());
    let app = form_app!(provider.clone(), None);

    let req = TestRequest::post()
      .uri("/auth/sign-out")
      .cookie(Cookie::new(ACCESS_TOKEN_COOKIE, "access-token"))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
    let cookie = resp.response().cookies().next().expect("cleared cookie");
    assert_eq!(cookie.value(), "");
    assert_eq!(provider.calls(), vec![ProviderCall::SignOut { with_token: true }]);
  }

  #[actix_web::test]
  async fn test_failed_sign_out_answers_no_content() {
    let provider =
      Arc::new(FakeAuthProvider::default().with_sign_out(Err(rejected("Session not found"))));
    let app = form_app!(provider, None);

    let req = TestRequest::post().uri("/auth/sign-out").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
  }
}
