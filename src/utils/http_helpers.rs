use axum::body::Body;
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// A general purpose HTTP error type that can be converted into an `IntoResponse`.
pub struct HTTPError {
    status: StatusCode,
    message: String,
}

impl HTTPError {
    /// Creates a new HTTP error with the given status code and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HTTPError {
            status,
            message: message.into(),
        }
    }
}

/// Converts our `HTTPError` into an HTTP response.
impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message }).to_string();
        (
            self.status,
            [("Content-Type", "application/json")],
            body,
        )
            .into_response()
    }
}

/// Builds an empty-bodied redirect with an arbitrary status code.
///
/// axum's `Redirect` has no constructor for 302 Found, which `/auth` answers with.
pub fn redirect_with_status(status: StatusCode, location: &str) -> Result<Response, HTTPError> {
    Response::builder()
        .status(status)
        .header(LOCATION, location)
        .body(Body::empty())
        .map_err(|e| HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// Returns the first value of `name` in a URL query string.
///
/// The query is parsed strictly: a malformed percent-escape or a `;`
/// separator anywhere in it is an error, even outside the wanted key.
pub fn first_query_value(query: &str, name: &str) -> Result<Option<String>, String> {
    if query.contains(';') {
        return Err("invalid semicolon separator in query".to_string());
    }
    if !has_valid_escapes(query) {
        return Err("invalid URL escape in query".to_string());
    }
    Ok(form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned()))
}

/// Every `%` must be followed by two hex digits.
fn has_valid_escapes(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_query_value_takes_first_occurrence() {
        assert_eq!(
            first_query_value("code=a&code=b", "code"),
            Ok(Some("a".to_string()))
        );
        assert_eq!(
            first_query_value("state=x&code=a%2Db+c", "code"),
            Ok(Some("a-b c".to_string()))
        );
        assert_eq!(first_query_value("state=x", "code"), Ok(None));
        assert_eq!(first_query_value("", "code"), Ok(None));
        assert_eq!(first_query_value("code=", "code"), Ok(Some(String::new())));
    }

    #[test]
    fn first_query_value_rejects_malformed_queries() {
        assert!(first_query_value("code=%zz", "code").is_err());
        assert!(first_query_value("code=abc%", "code").is_err());
        assert!(first_query_value("code=abc%4", "code").is_err());
        assert!(first_query_value("state=%g1&code=abc", "code").is_err());
        assert!(first_query_value("code=abc;state=x", "code").is_err());
    }

    #[test]
    fn redirect_sets_status_and_location() {
        let response = redirect_with_status(StatusCode::FOUND, "https://example.com/a?b=c")
            .unwrap_or_else(|_| panic!("redirect should build"));
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "https://example.com/a?b=c"
        );
    }

    #[test]
    fn redirect_rejects_invalid_location() {
        let result = redirect_with_status(StatusCode::FOUND, "bad\nlocation");
        let response = match result {
            Ok(_) => panic!("newline must not be accepted in a header"),
            Err(e) => e.into_response(),
        };
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
