use axum::BoxError;
use axum::body::{Body, Bytes};
use futures::stream::{self, BoxStream, StreamExt};
use serde::Serialize;

/// Render a fallible record stream as a streamed JSON array body.
///
/// The first item is awaited before the body is built, so a store that
/// fails up front yields `Err` while the handler can still pick a status.
/// A later error aborts the body, since the status line has already been
/// sent by then.
pub async fn json_array_body<T, E>(items: BoxStream<'static, Result<T, E>>) -> Result<Body, E>
where
    T: Serialize + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    let (first, rest) = items.into_future().await;
    let first = first.transpose()?;
    let items = stream::iter(first.map(Ok)).chain(rest);

    let open = stream::once(async { Ok::<_, BoxError>(Bytes::from_static(b"[")) });
    let close = stream::once(async { Ok::<_, BoxError>(Bytes::from_static(b"]")) });

    let elements = items.enumerate().map(|(i, item)| -> Result<Bytes, BoxError> {
        let item = item?;
        let mut buf = if i == 0 { Vec::new() } else { vec![b','] };
        serde_json::to_writer(&mut buf, &item)?;
        Ok(Bytes::from(buf))
    });

    Ok(Body::from_stream(open.chain(elements).chain(close)))
}
