use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use std::sync::Arc;

use crate::adapters::http::errors::ApiError;
use crate::adapters::http::navigation::found;
use crate::adapters::http::session::SessionCookies;
use crate::adapters::http::templates::TemplateEngine;
use crate::application::auth::{DASHBOARD_PATH, GetCurrentUserUseCase, LOGIN_PATH};
use crate::domain::auth::ports::PageCache;

use super::current_user;

/// What the sign-in and sign-up panels show after a submission
#[derive(Debug, Default, Serialize)]
pub struct LoginFormState {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sign_in_email: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sign_in_error: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sign_up_email: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sign_up_error: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sign_up_message: Option<String>,
}

/// Login page panel that a form submission re-renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginPanel {
  SignIn,
  SignUp,
}

impl LoginPanel {
  fn partial(self) -> &'static str {
    match self {
      LoginPanel::SignIn => "partials/sign_in_form.html.tera",
      LoginPanel::SignUp => "partials/sign_up_form.html.tera",
    }
  }
}

/// Renders either the panel partial (htmx swaps it in place) or the whole
/// login page for plain form posts
pub fn render_login(
  templates: &TemplateEngine,
  state: &LoginFormState,
  panel: Option<LoginPanel>,
) -> Result<String, ApiError> {
  let mut context = tera::Context::from_serialize(state)?;
  context.insert("title", "Sign in");

  let template = panel.map_or("pages/login.html.tera", LoginPanel::partial);
  Ok(templates.render(template, &context)?)
}

/// Placeholder figure shown on the dashboard
#[derive(Debug, Serialize)]
struct StatCard {
  title: &'static str,
  value: &'static str,
}

const DASHBOARD_CARDS: [StatCard; 3] = [
  StatCard { title: "Documents", value: "0" },
  StatCard { title: "Chat Sessions", value: "0" },
  StatCard { title: "Total Amount", value: "$0" },
];

/// `GET /`
pub async fn root(
  req: HttpRequest,
  get_user_use_case: web::Data<Arc<GetCurrentUserUseCase>>,
) -> HttpResponse {
  let token = SessionCookies::access_token(&req);

  match get_user_use_case.execute(token.as_ref()).await {
    Some(_) => found(DASHBOARD_PATH),
    None => found(LOGIN_PATH),
  }
}

/// `GET /login`
pub async fn login_page(
  req: HttpRequest,
  templates: web::Data<TemplateEngine>,
  get_user_use_case: web::Data<Arc<GetCurrentUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let token = SessionCookies::access_token(&req);
  if get_user_use_case.execute(token.as_ref()).await.is_some() {
    return Ok(found(DASHBOARD_PATH));
  }

  let html = render_login(&templates, &LoginFormState::default(), None)?;
  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// `GET /dashboard` (authenticated)
pub async fn dashboard_page(
  req: HttpRequest,
  templates: web::Data<TemplateEngine>,
  page_cache: web::Data<Arc<dyn PageCache>>,
) -> Result<HttpResponse, ApiError> {
  let user = current_user(&req)?;

  match page_cache.get(DASHBOARD_PATH, user.id).await {
    Ok(Some(html)) => {
      tracing::debug!(user_id = %user.id, "Serving cached dashboard");
      return Ok(HttpResponse::Ok().content_type("text/html").body(html));
    }
    Ok(None) => {}
    Err(e) => tracing::warn!("Page cache read failed: {}", e),
  }

  let mut context = tera::Context::new();
  context.insert("title", "Dashboard");
  context.insert("user_email", user.display_email());
  context.insert("cards", &DASHBOARD_CARDS);

  let html = templates.render("pages/dashboard.html.tera", &context)?;

  if let Err(e) = page_cache.put(DASHBOARD_PATH, user.id, html.clone()).await {
    tracing::warn!("Page cache write failed: {}", e);
  }

  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}
