// Request extractors for the identity forwarded by the authentication proxy
// and for text parameters, wherever in the request they arrive.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::{
    Form, Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header::CONTENT_TYPE, request::Parts},
};
use serde_json::Value;

use crate::shared::core::errors::ApplicationError;
use crate::shared::core::identity::Caller;
use crate::shared::core::params::RawParams;

pub const USER_HEADER: &str = "x-user";
pub const ROLES_HEADER: &str = "x-roles";

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };
        Ok(match header(USER_HEADER) {
            Some(user) => Caller::new(user, header(ROLES_HEADER).map(Caller::parse_roles).unwrap_or_default()),
            None => Caller::guest(),
        })
    }
}

/// Query string first, then a form or JSON body on top. Non-string JSON
/// values are kept as their JSON text.
impl<S> FromRequest<S> for RawParams
where
    S: Send + Sync,
{
    type Rejection = ApplicationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut values: HashMap<String, String> = Query::try_from_uri(req.uri())
            .map(|Query(values)| values)
            .map_err(|rejection| ApplicationError::validation(rejection.body_text()))?;

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if content_type.starts_with("application/json") {
            let Json(body) = Json::<serde_json::Map<String, Value>>::from_request(req, state)
                .await
                .map_err(|rejection| ApplicationError::validation(rejection.body_text()))?;
            values.extend(body.into_iter().filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(text) => Some((key, text)),
                other => Some((key, other.to_string())),
            }));
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(body) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|rejection| ApplicationError::validation(rejection.body_text()))?;
            values.extend(body);
        }

        Ok(RawParams::new(values))
    }
}
