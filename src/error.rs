use std::fmt::Display;

use crate::RequestMethod;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    MissingLeadingSlash,
    EmptySegment,
    EmptyParamName,
    DuplicateParam(String),
}

impl Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingLeadingSlash => "pattern must start with '/'".fmt(f),
            Self::EmptySegment => "pattern contains an empty segment".fmt(f),
            Self::EmptyParamName => "parameter segment has no name".fmt(f),
            Self::DuplicateParam(name) => write!(f, "parameter ':{name}' is declared twice"),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    InvalidTemplate {
        pattern: String,
        reason: TemplateError,
    },
    MissingParam {
        pattern: String,
        name: String,
    },
    DuplicateRoute {
        method: RequestMethod,
        pattern: String,
    },
    BodyNotAllowed {
        method: RequestMethod,
    },
    UnsupportedMethod(http::Method),
    InvalidUrl(String),
}

impl Error {
    pub fn invalid_template<S: AsRef<str>>(pattern: S, reason: TemplateError) -> Self {
        Self::InvalidTemplate {
            pattern: pattern.as_ref().to_string(),
            reason,
        }
    }

    pub fn missing_param<P: AsRef<str>, N: AsRef<str>>(pattern: P, name: N) -> Self {
        Self::MissingParam {
            pattern: pattern.as_ref().to_string(),
            name: name.as_ref().to_string(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTemplate { pattern, reason } => {
                write!(f, "Invalid template {pattern:?}: {reason}")
            }
            Self::MissingParam { pattern, name } => {
                write!(f, "Missing parameter ':{name}' for template {pattern:?}")
            }
            Self::DuplicateRoute { method, pattern } => {
                write!(f, "Route {method} {pattern:?} is already registered")
            }
            Self::BodyNotAllowed { method } => write!(f, "{method} requests cannot carry a body"),
            Self::UnsupportedMethod(method) => write!(f, "Unsupported method {method}"),
            Self::InvalidUrl(url) => write!(f, "Invalid url {url:?}"),
        }
    }
}

impl std::error::Error for Error {}
