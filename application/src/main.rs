use std::{
    future::IntoFuture as _,
    io,
    sync::{Arc, OnceLock},
    time,
};

use application::{api, graphql, Args, Config, Service};
use axum::{
    extract::MatchedPath,
    routing::{on, MethodFilter},
    Extension, Router,
};
use axum_client_ip::InsecureClientIp;
use futures::TryFutureExt as _;
use service::{
    domain::user::Credentials,
    infra::{
        cms::directus::session::Status, maps::google::ApiKey, Directus,
        Google, Http,
    },
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    _ = start().await;
}

async fn start() -> Result<(), ()> {
    let Args { config } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        server,
        service,
        cms,
        maps,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let account = match &cms.account {
        Some(acc) => Some(acc.credentials().ok_or_else(|| {
            log::error!("`cms.account` has malformed email or password");
        })?),
        None => None,
    };
    let directus = Directus::new(
        Http::new(cms.url.clone(), cms.timeout).map_err(|e| {
            log::error!("failed to initialize CMS HTTP client: {e}");
        })?,
    );
    if let Some(creds) = &account {
        directus.sign_in(creds).await.map_err(|e| {
            log::error!("failed to sign into CMS at `{}`: {e}", cms.url);
        })?;
        log::info!("signed into CMS at `{}`", cms.url);
    }

    let api_key = ApiKey::secret(maps.api_key).ok_or_else(|| {
        log::error!("`maps.api_key` must be provided");
    })?;
    let google = Google::new(
        Http::new(maps.url, maps.timeout).map_err(|e| {
            log::error!("failed to initialize maps HTTP client: {e}");
        })?,
        api_key,
        maps.region,
    );

    let service = Service::new(service.into(), directus.clone(), google);

    if let Some(creds) = account {
        drop(tokio::spawn(renew_session(directus.clone(), creds)));
    }

    let mut cors = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::OPTIONS,
            http::Method::POST,
        ])
        .allow_headers([
            http::header::AUTHORIZATION,
            http::header::CONTENT_TYPE,
        ]);
    for origin in server.cors.origins {
        cors = cors.allow_origin(
            origin.parse::<http::header::HeaderValue>().map_err(|e| {
                log::error!("`{origin}` is not current CORS origin: {e}");
            })?,
        );
    }

    let app = Router::new()
        .route(
            "/graphql",
            on(MethodFilter::GET.or(MethodFilter::POST), graphql),
        )
        .layer(Extension(Arc::new(api::schema())))
        .layer(Extension(service))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|r: &http::Request<_>| {
                    tracing::info_span!(
                        "HTTP request",
                        http.client_ip = InsecureClientIp::from(
                            r.headers(),
                            r.extensions()
                        )
                            .map(|ip| ip.0.to_string())
                            .ok(),
                        http.flavor = ?r.version(),
                        http.host = r.uri().host(),
                        http.method = r.method().as_str(),
                        http.route = r
                            .extensions()
                            .get::<MatchedPath>()
                            .map(MatchedPath::as_str),
                        http.scheme = r
                            .uri()
                            .scheme()
                            .map(http::uri::Scheme::as_str),
                        http.target = r
                            .uri()
                            .path_and_query()
                            .map(http::uri::PathAndQuery::as_str),
                        http.user_agent = r
                            .headers()
                            .get("User-Agent")
                            .and_then(|h| h.to_str().ok()),
                        http.status_code = tracing::field::Empty,
                    )
                })
                .on_response(
                    |r: &http::Response<_>,
                     dur: time::Duration,
                     span: &tracing::Span| {
                        span.record(
                            "http.status_code",
                            tracing::field::display(r.status().as_u16()),
                        );

                        if r.status().is_server_error()
                            || r.status().is_client_error()
                        {
                            tracing::error!(
                                duration = format!("{}ms", dur.as_millis()),
                            );
                        } else {
                            tracing::info!(
                                duration = format!("{}ms", dur.as_millis()),
                            );
                        }
                    },
                ),
        );

    let listener = TcpListener::bind((server.host.clone(), server.port))
        .await
        .map_err(|e| {
            log::error!(
                "failed to listen on `{}:{}`: {e}",
                server.host,
                server.port,
            );
        })?;

    log::info!("listening on `{}:{}`", server.host, server.port);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            _ = tokio::signal::ctrl_c().await;
            log::info!("shutting down");
        })
        .into_future()
        .map_err(|e| log::error!("webserver failed: {e}"))
        .await;

    if let Err(e) = directus.sign_out().await {
        log::warn!("failed to sign out of CMS: {e}");
    }

    served
}

/// Signs the [`Directus`] client back in whenever its session expires.
async fn renew_session(directus: Directus, credentials: Credentials) {
    let mut status = directus.session().subscribe();
    while status.changed().await.is_ok() {
        if *status.borrow_and_update() != Status::Expired {
            continue;
        }

        log::warn!("CMS session has expired, signing in again");
        match directus.sign_in(&credentials).await {
            Ok(()) => log::info!("signed into CMS again"),
            Err(e) => log::error!("failed to sign into CMS again: {e}"),
        }
    }
}
