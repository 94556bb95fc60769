use http::{HeaderMap, HeaderName, HeaderValue};

use crate::{http::HeaderMapExt, RequestMethod};

/// Everything about an outbound request except its URL.
#[derive(Debug, Clone)]
pub struct RequestInit {
    pub method: RequestMethod,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl Default for RequestInit {
    fn default() -> Self {
        Self {
            method: RequestMethod::Get,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl RequestInit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails on an invalid header name or value instead of panicking.
    pub fn with_header<K, V>(mut self, key: K, value: V) -> Result<Self, http::Error>
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        let key = HeaderName::try_from(key).map_err(Into::into)?;
        let value = HeaderValue::try_from(value).map_err(Into::into)?;
        self.headers.insert(key, value);
        Ok(self)
    }

    pub fn with_body<B: Into<Vec<u8>>>(mut self, body: B) -> Self {
        self.body = Some(body.into());
        self
    }
}

impl HeaderMapExt for RequestInit {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn should_insert_header() {
        let name = String::from("X-Header");
        let init = RequestInit::new().with_header(name, "value").unwrap();
        assert_eq!(init.header("x-header").unwrap(), "value");
        assert_eq!(init.method, crate::RequestMethod::Get);
    }

    #[test]
    fn should_reject_invalid_header_name() {
        assert!(RequestInit::new().with_header("Bad Header", "v").is_err());
    }

    #[test]
    fn should_reject_invalid_header_value() {
        assert!(RequestInit::new().with_header("X-Header", "a\nb").is_err());
    }
}
