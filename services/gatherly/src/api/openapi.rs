use super::handlers::{auth, health, organizer};
use utoipa::openapi::{InfoBuilder, OpenApiBuilder, Tag};
use utoipa_axum::{router::OpenApiRouter, routes};

/// Generate the full `OpenAPI` document for the service.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Reuse the same router wiring and only return the generated spec.
    let (_router, mut api) = public_router().split_for_parts();
    let (_router, protected_api) = protected_router().split_for_parts();
    api.merge(protected_api);

    let mut auth_tag = Tag::new("auth");
    auth_tag.description = Some("Session issue, refresh, and introspection".to_string());

    let mut organizer_tag = Tag::new("organizer");
    organizer_tag.description = Some("Organizer-scoped endpoints".to_string());

    api.tags = Some(vec![auth_tag, organizer_tag]);
    api
}

/// Routes that do not require a bearer token.
///
/// `routes!` reads `#[utoipa::path]` to bind HTTP method + path and add the
/// route to the `OpenAPI` document. Routes added outside (like `/` and
/// `OPTIONS /health`) are intentionally not documented.
pub(crate) fn public_router() -> OpenApiRouter {
    OpenApiRouter::with_openapi(cargo_openapi())
        .routes(routes!(health::health))
        .routes(routes!(auth::register::register))
        .routes(routes!(auth::login::login))
}

/// Routes that sit behind the bearer validation middleware; the caller
/// applies the middleware layer after `split_for_parts`.
pub(crate) fn protected_router() -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(auth::refresh::refresh))
        .routes(routes!(auth::session::session))
        .routes(routes!(organizer::dashboard))
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    // Use Cargo.toml metadata instead of the utoipa-axum crate info defaults.
    let info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(Some(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    OpenApiBuilder::new().info(info).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_info_from_cargo() {
        let spec = openapi();
        assert_eq!(spec.info.title, env!("CARGO_PKG_NAME"));
        assert_eq!(spec.info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn openapi_tags_and_paths() {
        let spec = openapi();
        let tags = spec.tags.clone().unwrap_or_default();
        assert!(tags.iter().any(|tag| tag.name == "auth"));
        assert!(tags.iter().any(|tag| tag.name == "organizer"));

        for path in [
            "/v1/auth/register",
            "/v1/auth/login",
            "/v1/auth/refresh",
            "/v1/auth/session",
            "/v1/organizer/dashboard",
            "/health",
        ] {
            assert!(
                spec.paths.paths.contains_key(path),
                "missing documented path {path}"
            );
        }
    }
}
