use std::fmt::Display;

use http::Method;

use crate::Error;

/// The verbs a route can be registered under.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl RequestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }

    /// Whether a request with this method may carry a body.
    pub fn allows_body(&self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl Display for RequestMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}

impl From<RequestMethod> for Method {
    fn from(value: RequestMethod) -> Self {
        match value {
            RequestMethod::Get => Method::GET,
            RequestMethod::Post => Method::POST,
            RequestMethod::Put => Method::PUT,
            RequestMethod::Delete => Method::DELETE,
            RequestMethod::Patch => Method::PATCH,
        }
    }
}

impl TryFrom<&Method> for RequestMethod {
    type Error = Error;

    fn try_from(value: &Method) -> Result<Self, Self::Error> {
        match *value {
            Method::GET => Ok(Self::Get),
            Method::POST => Ok(Self::Post),
            Method::PUT => Ok(Self::Put),
            Method::DELETE => Ok(Self::Delete),
            Method::PATCH => Ok(Self::Patch),
            _ => Err(Error::UnsupportedMethod(value.clone())),
        }
    }
}

impl PartialEq<Method> for RequestMethod {
    fn eq(&self, other: &Method) -> bool {
        self.as_str() == other.as_str()
    }
}
