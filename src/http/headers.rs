use async_trait::async_trait;
use http::{
    header::{self, InvalidHeaderValue, IntoHeaderName},
    HeaderMap, HeaderName, HeaderValue,
};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::error::{error, Headers, WireError};

pub trait HeaderMapExt {
    fn headers(&self) -> &HeaderMap;

    fn headers_mut(&mut self) -> &mut HeaderMap;

    fn header<K: header::AsHeaderName>(&self, key: K) -> Option<&HeaderValue> {
        self.headers().get(key)
    }

    fn insert_header<K, V>(&mut self, key: K, value: V) -> Result<(), InvalidHeaderValue>
    where
        K: IntoHeaderName,
        V: TryInto<HeaderValue, Error = InvalidHeaderValue>,
    {
        self.headers_mut().insert(key, value.try_into()?);
        Ok(())
    }

    /// `None` when the header is absent or not a valid length.
    fn get_content_length(&self) -> Option<usize> {
        self.header(header::CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse().ok())
    }
}

#[async_trait]
pub trait WriteHeaders {
    async fn write_headers(&mut self, headers: &HeaderMap) -> io::Result<()>;
}

#[async_trait]
impl<R> WriteHeaders for R
where
    R: AsyncWrite + ?Sized + Unpin + Send,
{
    async fn write_headers(&mut self, headers: &HeaderMap) -> io::Result<()> {
        for (key, value) in headers {
            self.write_all(key.as_str().as_bytes()).await?;
            self.write_all(b": ").await?;
            self.write_all(value.as_bytes()).await?;
            self.write_all(b"\r\n").await?;
        }
        Ok(())
    }
}

#[async_trait]
pub trait ReadHeaders {
    async fn read_headers(&mut self) -> io::Result<HeaderMap>;

    /// Reads `Content-Length` bytes, or everything up to EOF when `until_eof`
    /// is set and the length is unknown. The buffer grows with the bytes that
    /// actually arrive, never with the announced length.
    async fn read_body(&mut self, headers: &HeaderMap, until_eof: bool) -> io::Result<Vec<u8>>;
}

#[async_trait]
impl<R> ReadHeaders for R
where
    R: AsyncBufRead + ?Sized + Unpin + Send,
{
    async fn read_headers(&mut self) -> io::Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        loop {
            let mut line = String::new();
            if self.read_line(&mut line).await? == 0 {
                return Err(error(Headers::Unterminated));
            }
            if line == "\r\n" || line == "\n" {
                break;
            }
            if let Some(i) = line.find(':') {
                let (key, value) = line.split_at(i);
                headers.append(
                    HeaderName::from_bytes(key.trim().as_bytes())
                        .map_err(Headers::InvalidName)
                        .map_err(error)?,
                    HeaderValue::from_str(value[1..].trim())
                        .map_err(Headers::InvalidValue)
                        .map_err(error)?,
                );
            }
        }
        Ok(headers)
    }

    async fn read_body(&mut self, headers: &HeaderMap, until_eof: bool) -> io::Result<Vec<u8>> {
        let mut body = Vec::new();
        match headers.get(header::CONTENT_LENGTH) {
            Some(value) => {
                let length = value
                    .to_str()
                    .ok()
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .ok_or_else(|| error(WireError::InvalidContentLength))?;
                let read = (&mut *self).take(length as u64).read_to_end(&mut body).await?;
                if read != length {
                    return Err(error(WireError::TruncatedBody { expected: length, read }));
                }
            }
            None if until_eof => {
                self.read_to_end(&mut body).await?;
            }
            None => {}
        }
        Ok(body)
    }
}
