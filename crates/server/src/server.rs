use axum::{
    Extension, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use std::sync::Arc;

use crate::{auth, cards, expenses, token, users};
use engine::{Engine, User};

pub struct AuthConfig {
    /// Secret used to sign and verify bearer tokens.
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub auth: Arc<AuthConfig>,
}

impl ServerState {
    pub fn new(engine: Engine, auth: AuthConfig) -> Self {
        Self {
            engine: Arc::new(engine),
            auth: Arc::new(auth),
        }
    }
}

/// Resolve the bearer token to a live account and stash it in the request
/// extensions. Anything short of a verified token and an existing user is a
/// plain 401, including a missing Authorization header.
async fn require_user(
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(TypedHeader(bearer)) = bearer else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    let claims = token::verify(bearer.token(), &state.auth.jwt_secret)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| StatusCode::UNAUTHORIZED)?;

    let user = state
        .engine
        .user_by_id(user_id)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Runs after [`require_user`], so the extension is always present.
async fn require_admin(
    Extension(user): Extension<User>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if !user.is_admin() {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    let admin = Router::new()
        .route("/cards", post(cards::create))
        .route("/cards/{id}", delete(cards::delete))
        .route("/expenses", post(expenses::create))
        .route(
            "/expenses/{id}",
            put(expenses::update).delete(expenses::delete),
        )
        .route("/users", get(users::list))
        .route_layer(middleware::from_fn(require_admin));

    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/cards", get(cards::list))
        .route("/expenses", get(expenses::list))
        .route("/expenses/responsibles", get(expenses::responsibles))
        .route("/expenses/summary", get(expenses::summary))
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    auth: AuthConfig,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState::new(engine, auth);

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    auth: AuthConfig,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, auth, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
