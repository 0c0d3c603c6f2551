use std::borrow::Cow;

/// Raw response plus the payload parsed for success statuses.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// `None` when the status was not one of the operation's success statuses.
    pub parsed: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn into_parsed(self) -> Option<T> {
        self.parsed
    }

    /// First header value with a case-insensitive name match.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::ApiResponse;

    #[test]
    fn header_lookup_ignores_case() {
        let response = ApiResponse::<()> {
            status: 204,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Vec::new(),
            parsed: Some(()),
        };
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("x-missing"), None);
        assert_eq!(response.body_text(), "");
        assert_eq!(response.into_parsed(), Some(()));
    }
}
