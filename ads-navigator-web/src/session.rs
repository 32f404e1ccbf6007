//! Sessions and the auth gate
//!
//! A session is identified by a cookie and owns one navigation controller.
//! [`AuthGate`] rejects `/api` requests without a known session and hands the
//! session to handlers through request extensions.

use std::collections::HashMap;
use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_service::{Service, Transform, forward_ready};
use actix_web::body::EitherBody;
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::{FromRequest, HttpMessage, HttpRequest, ResponseError, web};
use ads_navigator_core::services::NavigationController;
use futures::future::LocalBoxFuture;
use tokio::sync::RwLock;

use crate::error::ApiError;
use crate::state::AppState;

pub struct Session {
    id: String,
    navigator: NavigationController,
}

impl Session {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn navigator(&self) -> &NavigationController {
        &self.navigator
    }
}

/// Live sessions, keyed by id. Nothing is persisted.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session, generating an id when none is given. An existing
    /// session with the same id is replaced.
    pub async fn create(&self, id: Option<String>) -> Arc<Session> {
        let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let session = Arc::new(Session {
            id: id.clone(),
            navigator: NavigationController::new(),
        });
        self.sessions.write().await.insert(id, session.clone());
        session
    }

    pub async fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.read().await.get(id).cloned()
    }

    pub async fn remove(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.write().await.remove(id)
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// The caller's session, placed in request extensions by [`AuthGate`].
pub struct CurrentSession(pub Arc<Session>);

impl FromRequest for CurrentSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Arc<Session>>()
                .cloned()
                .map(CurrentSession)
                .ok_or_else(|| ApiError::unauthorized().into()),
        )
    }
}

/// Middleware answering `401 { "message": "Unauthorized" }` for requests
/// without a known session cookie.
pub struct AuthGate;

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Transform = AuthGateMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthGateMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let state = req.app_data::<web::Data<AppState>>().cloned();
            let session = match state {
                Some(state) => state.session_for(req.request()).await,
                None => None,
            };

            let Some(session) = session else {
                tracing::debug!(path = req.path(), "Rejecting request without session");
                let response = ApiError::unauthorized().error_response();
                return Ok(req.into_response(response).map_into_right_body());
            };

            req.extensions_mut().insert(session);
            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}
