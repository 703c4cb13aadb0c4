//! Request decoration: token and response-format injection.

use crate::auth::types::AccessToken;

use super::request::ApiRequest;

/// Query parameter carrying the bearer credential.
pub const ACCESS_TOKEN_PARAM: &str = "oauth2_access_token";

/// Provider header selecting the response format.
pub const FORMAT_HEADER: &str = "x-li-format";

/// Response format requested on every call.
pub const FORMAT_JSON: &str = "json";

/// Install the access token and the JSON response-format header on an
/// outbound request.
///
/// Decoration is authoritative for exactly the two keys it owns: a
/// caller-supplied `oauth2_access_token` or `x-li-format` value is
/// replaced, everything else in the descriptor is left untouched. Applying
/// the same decoration twice is a no-op.
pub fn decorate(request: &mut ApiRequest, token: &AccessToken) {
    request.query.insert(ACCESS_TOKEN_PARAM.to_string(), token.value.clone());
    request.headers.insert(FORMAT_HEADER.to_string(), FORMAT_JSON.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::request::ApiRequest;

    #[test]
    fn adds_token_and_format() {
        let token = AccessToken::new("tok1");
        let mut request = ApiRequest::get("people/~");

        decorate(&mut request, &token);

        assert_eq!(request.query.get(ACCESS_TOKEN_PARAM).map(String::as_str), Some("tok1"));
        assert_eq!(request.headers.get(FORMAT_HEADER).map(String::as_str), Some(FORMAT_JSON));
    }

    #[test]
    fn owns_its_two_keys_and_nothing_else() {
        let token = AccessToken::new("tok1");
        let mut request = ApiRequest::get("people/~")
            .query_param("count", "10")
            .header(FORMAT_HEADER, "xml")
            .header("x-request-id", "abc");

        decorate(&mut request, &token);

        // decoration wins for the format header it owns
        assert_eq!(request.headers.get(FORMAT_HEADER).map(String::as_str), Some(FORMAT_JSON));
        // caller-supplied entries survive
        assert_eq!(request.query.get("count").map(String::as_str), Some("10"));
        assert_eq!(request.headers.get("x-request-id").map(String::as_str), Some("abc"));
    }

    #[test]
    fn decoration_is_idempotent() {
        let token = AccessToken::new("tok1");
        let mut once = ApiRequest::get("people/~");
        let mut twice = ApiRequest::get("people/~");

        decorate(&mut once, &token);
        decorate(&mut twice, &token);
        decorate(&mut twice, &token);

        assert_eq!(once.query, twice.query);
        assert_eq!(once.headers, twice.headers);
        assert_eq!(twice.query.len(), 1);
        assert_eq!(twice.headers.len(), 1);
    }
}
