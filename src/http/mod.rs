pub mod error;
pub mod headers;
pub mod request;
pub mod response;

pub use error::WireError;
pub use headers::{HeaderMapExt, ReadHeaders, WriteHeaders};
pub use request::{ReadRequest, Request, WriteRequest};
pub use response::{ReadResponse, Response, WriteResponse};
