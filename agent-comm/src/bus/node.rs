//! Bus node registration and synchronous service calls.

use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::debug;

use crate::error::{BusError, Result};

use super::protocol::{Inbound, Outbound};
use super::service::Service;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A named client node on the middleware bus.
///
/// Registration happens in [`Node::connect`], before any call can be
/// issued. The handle owns the bridge session for its lifetime; dropping
/// it closes the session. Connecting again simply yields an independent
/// handle.
pub struct Node {
    name: String,
    stream: Mutex<WsStream>,
    next_id: AtomicU64,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Node {
    /// Register on the bus by opening a session to the bridge endpoint.
    ///
    /// # Errors
    ///
    /// Fails if the bridge is unreachable or rejects the handshake.
    pub async fn connect(name: impl Into<String>, url: &str) -> Result<Self> {
        let name = name.into();

        let (stream, _) = connect_async(url).await.map_err(|e| BusError::Connect {
            url: url.to_owned(),
            source: e,
        })?;

        debug!(node = %name, %url, "registered on bus");

        Ok(Self {
            name,
            stream: Mutex::new(stream),
            next_id: AtomicU64::new(0),
        })
    }

    /// The node name used to tag outgoing call ids.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Obtain a typed proxy for a named service. No I/O happens here; the
    /// bridge resolves the name when the first call is made.
    #[must_use]
    pub fn service_client<S: Service>(&self, service: impl Into<String>) -> ServiceClient<'_, S> {
        ServiceClient {
            node: self,
            service: service.into(),
            _marker: PhantomData,
        }
    }

    fn next_call_id(&self, service: &str) -> String {
        let seq = self.next_id.fetch_add(1, Ordering::Relaxed);
        call_id(&self.name, service, seq)
    }

    /// Send one `call_service` frame and wait for the matching response.
    ///
    /// The stream lock makes the call single-flight: overlapping calls on
    /// one node serialize, matching the synchronous call semantics of the
    /// bus.
    async fn call_raw(&self, service: &str, args: Value) -> Result<Value> {
        let id = self.next_call_id(service);
        let frame = Outbound::CallService {
            id: id.clone(),
            service: service.to_owned(),
            args,
        };
        let text = serde_json::to_string(&frame)?;

        let mut stream = self.stream.lock().await;
        stream
            .send(Message::text(text))
            .await
            .map_err(BusError::Transport)?;

        debug!(%service, %id, "service call sent");

        while let Some(message) = stream.next().await {
            let message = message.map_err(BusError::Transport)?;
            let payload = match message {
                Message::Text(text) => text,
                Message::Close(_) => return Err(BusError::Closed.into()),
                _ => continue,
            };

            let frame: Inbound = serde_json::from_str(&payload)
                .map_err(|e| BusError::Protocol(format!("malformed frame: {e}")))?;

            match frame {
                Inbound::ServiceResponse {
                    id: Some(response_id),
                    values,
                    result,
                } if response_id == id => {
                    if !result {
                        return Err(BusError::Call {
                            service: service.to_owned(),
                            detail: values.to_string(),
                        }
                        .into());
                    }
                    debug!(%service, "service call completed");
                    return Ok(values);
                }
                // Unrelated frame; keep waiting for our response.
                _ => continue,
            }
        }

        Err(BusError::Closed.into())
    }
}

/// Typed proxy for one named service on a [`Node`].
pub struct ServiceClient<'a, S: Service> {
    node: &'a Node,
    service: String,
    _marker: PhantomData<S>,
}

impl<S: Service> fmt::Debug for ServiceClient<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceClient")
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

impl<S: Service> ServiceClient<'_, S> {
    /// The service name this proxy is bound to.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Issue one synchronous call, blocking until the remote service
    /// responds or the call fails.
    ///
    /// # Errors
    ///
    /// Fails if the session drops, the bridge reports the call failed
    /// (unknown or erroring service), or the response payload does not
    /// match `S::Response`.
    pub async fn call(&self, request: &S::Request) -> Result<S::Response> {
        let args = serde_json::to_value(request)?;
        let values = self.node.call_raw(&self.service, args).await?;

        let response = serde_json::from_value(values)
            .map_err(|e| BusError::Protocol(format!("unexpected response shape: {e}")))?;
        Ok(response)
    }
}

/// Format a call id unique within one node session.
fn call_id(node: &str, service: &str, seq: u64) -> String {
    format!("call_service:{node}:{service}:{seq}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_ids_are_distinct_per_sequence() {
        let first = call_id("test_node", "/forward", 0);
        let second = call_id("test_node", "/forward", 1);
        assert_ne!(first, second);
        assert_eq!(first, "call_service:test_node:/forward:0");
    }
}
