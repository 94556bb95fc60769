use super::{
    error::{error, ResponseStatusLine},
    headers::HeaderMapExt,
    ReadHeaders, WriteHeaders,
};
use async_trait::async_trait;
use http::{header, HeaderMap, HeaderValue, StatusCode};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug, Clone)]
pub struct Response {
    pub version: String,
    pub status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self {
            version: "HTTP/1.1".to_string(),
            status,
            headers: vec![(header::CONTENT_LENGTH, HeaderValue::from_static("0"))]
                .into_iter()
                .collect(),
            body: Vec::new(),
        }
    }

    /// A `text/plain` response, the usual thing for a handler to return.
    pub fn text<B: Into<String>>(status: StatusCode, body: B) -> Self {
        let mut response = Self::new(status);
        response.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        response.set_body(body.into());
        response
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND)
    }

    pub fn error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Replaces the body and keeps `Content-Length` in sync with it.
    pub fn set_body<B: Into<Vec<u8>>>(&mut self, body: B) {
        self.body = body.into();
        self.headers
            .insert(header::CONTENT_LENGTH, HeaderValue::from(self.body.len()));
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn text_body(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.body)
    }
}

impl HeaderMapExt for Response {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

#[async_trait]
pub trait WriteResponse {
    async fn write_response(&mut self, response: &Response) -> io::Result<()>;
}

#[async_trait]
impl<R> WriteResponse for R
where
    R: AsyncWrite + ?Sized + Unpin + Send,
{
    async fn write_response(&mut self, response: &Response) -> io::Result<()> {
        self.write_all(response.version.as_bytes()).await?;
        self.write_all(b" ").await?;
        self.write_all(response.status.as_str().as_bytes()).await?;
        self.write_all(b" ").await?;
        if let Some(reason) = response.status.canonical_reason() {
            self.write_all(reason.as_bytes()).await?;
        }
        self.write_all(b"\r\n").await?;
        self.write_headers(&response.headers).await?;
        self.write_all(b"\r\n").await?;
        self.write_all(&response.body).await?;
        self.flush().await?;
        Ok(())
    }
}

#[async_trait]
pub trait ReadResponse {
    async fn read_response(&mut self) -> io::Result<Response>;
}

#[async_trait]
impl<R> ReadResponse for R
where
    R: AsyncBufRead + ?Sized + Unpin + Send,
{
    async fn read_response(&mut self) -> io::Result<Response> {
        let mut status_line = String::new();
        if self.read_line(&mut status_line).await? == 0 {
            return Err(error(ResponseStatusLine::MissingStatusLine));
        }
        let (version, status) = {
            let mut parts = status_line.split_whitespace();
            (
                parts
                    .next()
                    .ok_or(error(ResponseStatusLine::MissingVersion))?
                    .to_string(),
                parts
                    .next()
                    .ok_or(error(ResponseStatusLine::MissingStatus))?
                    .to_string(),
            )
        };
        let headers = self.read_headers().await?;
        let body = self.read_body(&headers, true).await?;
        Ok(Response {
            version,
            status: status
                .parse()
                .map_err(|_| error(ResponseStatusLine::InvalidStatus))?,
            headers,
            body,
        })
    }
}
