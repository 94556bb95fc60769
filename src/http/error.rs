use std::fmt::Display;

use http::header::{InvalidHeaderName, InvalidHeaderValue};
use tokio::io;

pub fn error<E: Into<WireError>>(data: E) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, data.into())
}

#[derive(Debug)]
pub enum WireError {
    RequestStatusLine(RequestStatusLine),
    ResponseStatusLine(ResponseStatusLine),
    Headers(Headers),
    InvalidContentLength,
    TruncatedBody { expected: usize, read: usize },
}

impl Display for WireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for WireError {}

#[derive(Debug)]
pub enum RequestStatusLine {
    MissingStatusLine,
    MissingMethod,
    MissingPath,
    MissingVersion,
    InvalidMethod,
}

impl From<RequestStatusLine> for WireError {
    fn from(value: RequestStatusLine) -> Self {
        WireError::RequestStatusLine(value)
    }
}

#[derive(Debug)]
pub enum ResponseStatusLine {
    MissingStatusLine,
    MissingStatus,
    MissingVersion,
    InvalidStatus,
}

impl From<ResponseStatusLine> for WireError {
    fn from(value: ResponseStatusLine) -> Self {
        WireError::ResponseStatusLine(value)
    }
}

#[derive(Debug)]
pub enum Headers {
    Unterminated,
    InvalidName(InvalidHeaderName),
    InvalidValue(InvalidHeaderValue),
}

impl From<Headers> for WireError {
    fn from(value: Headers) -> Self {
        WireError::Headers(value)
    }
}
