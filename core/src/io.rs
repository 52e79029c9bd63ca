use tokio::io::{AsyncRead, AsyncWrite};

mod document;
mod stream;
pub use {document::*, stream::*};

/// Type alias for [AsyncRead] types that can also be [Unpin]ned.
pub trait AsyncReadUnpin: AsyncRead + Unpin {}
impl<T: AsyncRead + Unpin + ?Sized> AsyncReadUnpin for T {}

/// Type alias for [AsyncWrite] types that can also be [Unpin]ned.
pub trait AsyncWriteUnpin: AsyncWrite + Unpin {}
impl<T: AsyncWrite + Unpin + ?Sized> AsyncWriteUnpin for T {}
