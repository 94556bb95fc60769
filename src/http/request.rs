use super::{
    error::{error, RequestStatusLine},
    headers::HeaderMapExt,
    ReadHeaders, WriteHeaders,
};
use async_trait::async_trait;
use http::{HeaderMap, Method};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// The request target, query string included.
    pub path: String,
    pub version: String,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Request {
    pub fn new<P: Into<String>>(method: Method, path: P) -> Self {
        Self {
            method,
            path: path.into(),
            version: "HTTP/1.1".to_string(),
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body<B: Into<Vec<u8>>>(mut self, body: B) -> Self {
        self.body = body.into();
        self
    }

    /// The request target without its query string.
    pub fn path_only(&self) -> &str {
        self.path
            .split_once('?')
            .map_or(self.path.as_str(), |(path, _)| path)
    }

    pub fn query(&self) -> Option<&str> {
        self.path.split_once('?').map(|(_, query)| query)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn text_body(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.body)
    }
}

impl HeaderMapExt for Request {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

#[async_trait]
pub trait WriteRequest {
    async fn write_request(&mut self, request: &Request) -> io::Result<()>;
}

#[async_trait]
impl<R> WriteRequest for R
where
    R: AsyncWrite + ?Sized + Unpin + Send,
{
    async fn write_request(&mut self, request: &Request) -> io::Result<()> {
        self.write_all(request.method.as_str().as_bytes()).await?;
        self.write_all(b" ").await?;
        self.write_all(request.path.as_bytes()).await?;
        self.write_all(b" ").await?;
        self.write_all(request.version.as_bytes()).await?;
        self.write_all(b"\r\n").await?;
        self.write_headers(&request.headers).await?;
        self.write_all(b"\r\n").await?;
        self.write_all(&request.body).await?;
        self.flush().await?;
        Ok(())
    }
}

#[async_trait]
pub trait ReadRequest {
    async fn read_request(&mut self) -> io::Result<Request>;
}

#[async_trait]
impl<R> ReadRequest for R
where
    R: AsyncBufRead + ?Sized + Unpin + Send,
{
    async fn read_request(&mut self) -> io::Result<Request> {
        let mut status_line = String::new();
        if self.read_line(&mut status_line).await? == 0 {
            return Err(error(RequestStatusLine::MissingStatusLine));
        }
        let (method, path, version) = {
            let mut parts = status_line.split_whitespace();
            (
                parts
                    .next()
                    .ok_or(error(RequestStatusLine::MissingMethod))?
                    .parse()
                    .map_err(|_| error(RequestStatusLine::InvalidMethod))?,
                parts
                    .next()
                    .ok_or(error(RequestStatusLine::MissingPath))?
                    .to_string(),
                parts
                    .next()
                    .ok_or(error(RequestStatusLine::MissingVersion))?
                    .to_string(),
            )
        };
        let headers = self.read_headers().await?;
        let body = self.read_body(&headers, false).await?;
        Ok(Request {
            method,
            path,
            version,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tokio::io::BufReader;

    use super::*;

    #[test]
    fn should_split_query_from_path() {
        let request = Request::new(Method::GET, "/users/1?sort=asc&page=2");
        assert_eq!(request.path_only(), "/users/1");
        assert_eq!(request.query(), Some("sort=asc&page=2"));
        let request = Request::new(Method::GET, "/users/1");
        assert_eq!(request.path_only(), "/users/1");
        assert_eq!(request.query(), None);
    }

    #[tokio::test]
    async fn should_read_request_with_body() {
        let raw = b"POST /users/1/dogs/2 HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
        let mut reader = BufReader::new(&raw[..]);
        let request = reader.read_request().await.unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/users/1/dogs/2");
        assert_eq!(request.version, "HTTP/1.1");
        assert_eq!(request.header("host").unwrap(), "localhost");
        assert_eq!(request.text_body().unwrap(), "hello");
    }

    #[tokio::test]
    async fn should_write_what_it_reads() {
        let mut request = Request::new(Method::PUT, "/users/1").with_body("data");
        request.insert_header("Content-Length", "4").unwrap();
        let mut buffer = Vec::new();
        buffer.write_request(&request).await.unwrap();
        assert_eq!(
            String::from_utf8(buffer.clone()).unwrap(),
            "PUT /users/1 HTTP/1.1\r\ncontent-length: 4\r\n\r\ndata"
        );
        let parsed = BufReader::new(&buffer[..]).read_request().await.unwrap();
        assert_eq!(parsed.method, Method::PUT);
        assert_eq!(parsed.body(), b"data");
    }

    #[tokio::test]
    async fn should_fail_on_body_shorter_than_content_length() {
        for length in ["100000000000000", "18446744073709551615", "10"] {
            let raw = format!("POST /x HTTP/1.1\r\nContent-Length: {length}\r\n\r\nabc");
            let result = BufReader::new(raw.as_bytes()).read_request().await;
            assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidData);
        }
    }

    #[tokio::test]
    async fn should_fail_on_truncated_headers() {
        let raw = b"GET / HTTP/1.1\r\nHost: localhost\r\n";
        let result = BufReader::new(&raw[..]).read_request().await;
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidData);
    }
}
