//! Discovery responder: answers SSDP `M-SEARCH` requests.
//!
//! [`DiscoveryResponder::open`] spawns a single task that owns the socket
//! and loops receive → match → send. Receives are never concurrent and no
//! state survives between datagrams: every answer is one of the two
//! pre-rendered [`ResponseTemplates`].
//!
//! The task stops only when [`DiscoveryResponder::close`] is called (or the
//! responder is dropped). Receive errors are logged and the loop continues.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use emuhue_domain::ssdp::{self, ResponseTemplates};

use crate::ports::DatagramSocket;

/// Receive buffer size. Longer datagrams are truncated.
pub const MAX_DATAGRAM_SIZE: usize = 4096;

/// Pause after a receive error before polling the socket again.
const RECEIVE_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Observable lifecycle of a [`DiscoveryResponder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponderState {
    /// Socket bound, task listening.
    Open,
    /// Terminal: task stopped and socket released.
    Closed,
}

enum Lifecycle {
    Open {
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<()>,
    },
    Closed,
}

/// SSDP responder bound to one datagram socket.
pub struct DiscoveryResponder {
    templates: Arc<ResponseTemplates>,
    lifecycle: Lifecycle,
}

impl DiscoveryResponder {
    /// Start answering discovery requests received on `socket`.
    ///
    /// Takes ownership of the socket; it is released by [`close`](Self::close).
    /// Must be called from within a tokio runtime.
    pub fn open<S>(socket: S, templates: ResponseTemplates) -> Self
    where
        S: DatagramSocket + 'static,
    {
        let templates = Arc::new(templates);
        let (shutdown, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(serve(socket, Arc::clone(&templates), shutdown_rx));

        tracing::info!("UPnP responder started");

        Self {
            templates,
            lifecycle: Lifecycle::Open { shutdown, task },
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ResponderState {
        match self.lifecycle {
            Lifecycle::Open { .. } => ResponderState::Open,
            Lifecycle::Closed => ResponderState::Closed,
        }
    }

    /// The responses this responder sends.
    #[must_use]
    pub fn templates(&self) -> &ResponseTemplates {
        &self.templates
    }

    /// Stop the receive task and release the socket.
    ///
    /// Returns once the task has exited, so the socket is closed when this
    /// resolves. Closing an already closed responder does nothing.
    pub async fn close(&mut self) {
        match std::mem::replace(&mut self.lifecycle, Lifecycle::Closed) {
            Lifecycle::Open { shutdown, task } => {
                tracing::info!("UPnP responder shutting down");
                // The task may already be gone if it panicked.
                let _ = shutdown.send(());
                if let Err(err) = task.await {
                    tracing::warn!(%err, "UPnP responder task ended abnormally");
                }
            }
            Lifecycle::Closed => {
                tracing::debug!("UPnP responder already closed");
            }
        }
    }
}

impl Drop for DiscoveryResponder {
    fn drop(&mut self) {
        if let Lifecycle::Open { task, .. } = &self.lifecycle {
            task.abort();
        }
    }
}

async fn serve<S: DatagramSocket>(
    socket: S,
    templates: Arc<ResponseTemplates>,
    mut shutdown: oneshot::Receiver<()>,
) {
    let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];

    loop {
        let received = tokio::select! {
            _ = &mut shutdown => break,
            received = socket.recv_from(&mut buf) => received,
        };

        match received {
            Ok((len, source)) => {
                datagram_received(&socket, &templates, &buf[..len], source).await;
            }
            Err(err) => {
                tracing::error!(%err, "UPnP error received");
                tokio::time::sleep(RECEIVE_ERROR_BACKOFF).await;
            }
        }
    }

    tracing::debug!("UPnP responder task stopped");
}

/// Answer a single datagram.
///
/// Payloads without the `M-SEARCH` marker are dropped silently. Returns
/// whether a response was sent. Send failures are logged, never retried.
pub async fn datagram_received<S: DatagramSocket>(
    socket: &S,
    templates: &ResponseTemplates,
    payload: &[u8],
    source: SocketAddr,
) -> bool {
    let Some(response) = templates.response_for(payload) else {
        return false;
    };

    tracing::debug!(
        %source,
        request = %ssdp::decode_payload(payload),
        "UPnP responder M-SEARCH method received"
    );
    tracing::debug!(
        %source,
        response = %String::from_utf8_lossy(response),
        "UPnP responder responding"
    );

    match socket.send_to(response, source).await {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!(%source, %err, "failed to send UPnP response");
            false
        }
    }
}
