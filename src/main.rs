use actix_files as fs;
use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gatehouse::{
  adapters::http::{
    DocumentRouteDependencies, RequestIdMiddleware, SessionCookies, TemplateEngine,
    WebRouteDependencies, configure_auth_api_routes, configure_document_api_routes,
    configure_web_routes,
  },
  application::auth::{GetCurrentUserUseCase, SignInUseCase, SignOutUseCase, SignUpUseCase},
  application::documents::ChunkDocumentUseCase,
  domain::auth::ports::{AuthProvider, PageCache},
  domain::documents::{TextChunker, TokenCounter},
  infrastructure::{
    cache::InMemoryPageCache, config::Config, supabase::SupabaseAuthClient,
    tokenizer::HfTokenCounter,
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gatehouse=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting Gatehouse");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  if config.app.public_url.is_none() {
    tracing::warn!("app.public_url is not set; sign-up will fail until it is configured");
  }

  tracing::info!("Using Supabase Auth at {}", config.supabase.url);
  let auth_provider: Arc<dyn AuthProvider> = Arc::new(
    SupabaseAuthClient::from_config(&config.supabase)
      .context("Failed to create Supabase Auth client")?,
  );
  let page_cache: Arc<dyn PageCache> = Arc::new(InMemoryPageCache::with_capacity(
    config.page_cache.max_entries,
  ));

  // Initialize use cases
  let sign_in_use_case = Arc::new(SignInUseCase::new(
    auth_provider.clone(),
    page_cache.clone(),
  ));
  let sign_up_use_case = Arc::new(SignUpUseCase::new(
    auth_provider.clone(),
    config.app.public_url.clone(),
  ));
  let sign_out_use_case = Arc::new(SignOutUseCase::new(
    auth_provider.clone(),
    page_cache.clone(),
  ));
  let get_user_use_case = Arc::new(GetCurrentUserUseCase::new(auth_provider));

  let document_deps = match &config.chunker.tokenizer_path {
    Some(path) => {
      let counter: Arc<dyn TokenCounter> =
        Arc::new(HfTokenCounter::from_file(path).context("Failed to load tokenizer")?);
      tracing::info!(
        "Document chunking enabled (size={}, overlap={})",
        config.chunker.chunk_size,
        config.chunker.overlap
      );
      Some(DocumentRouteDependencies {
        chunk_document_use_case: Arc::new(ChunkDocumentUseCase::new(TextChunker::new(
          counter,
          config.chunker.chunk_size,
          config.chunker.overlap,
        ))),
        get_user_use_case: get_user_use_case.clone(),
        max_body_bytes: config.chunker.max_body_bytes,
      })
    }
    None => {
      tracing::warn!("chunker.tokenizer_path is not set; the document API is disabled");
      None
    }
  };

  let templates = TemplateEngine::new().context("Failed to load templates")?;
  tracing::info!("Templates loaded");

  let route_deps = WebRouteDependencies {
    templates,
    cookies: SessionCookies::new(&config.session),
    page_cache,
    sign_in_use_case,
    sign_up_use_case,
    sign_out_use_case,
    get_user_use_case,
    rate_limit: config.rate_limit.clone(),
  };

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      .wrap(Logger::default())
      .wrap(RequestIdMiddleware::new())
      .configure(|cfg| configure_web_routes(cfg, route_deps.clone()))
      .configure(|cfg| configure_auth_api_routes(cfg, route_deps.clone()))
      .configure(|cfg| {
        if let Some(deps) = &document_deps {
          configure_document_api_routes(cfg, deps.clone());
        }
      })
      // Static files
      .service(fs::Files::new("/static", "./static"))
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))
  .with_context(|| format!("Failed to bind {}:{}", server_host, server_port))?
  .run()
  .await
  .context("HTTP server terminated with an error")
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
