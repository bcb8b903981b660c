//! Extractor that validates the x-version request header against the set of
//! API versions this server exposes.

use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use log::*;
use semver::Version;
use service::config::ApiVersion;

/// Rejects requests whose x-version header is missing, unparsable, or names
/// an unsupported API version.
pub struct CompareApiVersion(pub Version);

impl<S> FromRequestParts<S> for CompareApiVersion
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(ApiVersion::field_name())
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("Missing {} header", ApiVersion::field_name()),
                )
            })?;

        let version = Version::parse(header_value).map_err(|e| {
            debug!("Failed to parse x-version header {header_value}: {e:?}");
            (
                StatusCode::BAD_REQUEST,
                format!("Invalid {} header: {header_value}", ApiVersion::field_name()),
            )
        })?;

        let version_str = version.to_string();
        if !ApiVersion::versions().contains(&version_str.as_str()) {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Unsupported API version: {version_str}"),
            ));
        }

        Ok(CompareApiVersion(version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<CompareApiVersion, (StatusCode, String)> {
        let mut builder = Request::builder().uri("/meetings");
        if let Some(value) = header {
            builder = builder.header(ApiVersion::field_name(), value);
        }
        let request = builder.body(()).unwrap();
        let (mut parts, _) = request.into_parts();
        CompareApiVersion::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_supported_version_is_accepted() {
        let result = extract(Some(ApiVersion::default_version())).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let result = extract(None).await;
        assert_eq!(result.unwrap_err().0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unparsable_version_is_rejected() {
        let result = extract(Some("not-a-version")).await;
        assert_eq!(result.unwrap_err().0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unsupported_version_is_rejected() {
        let result = extract(Some("0.0.9")).await;
        assert_eq!(result.unwrap_err().0, StatusCode::BAD_REQUEST);
    }
}
