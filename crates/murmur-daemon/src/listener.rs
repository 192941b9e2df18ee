// crates/murmur-daemon/src/listener.rs
//
// TCP gossip listener: one task per inbound connection.
//
// The wire protocol is one UTF-8 JSON record per connection, closed by
// the sender after writing. Malformed payloads are dropped silently (no
// response, no error propagation).

use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};

use murmur_core::{GossipMessage, MurmurError};

use crate::relay;
use crate::shared::NodeShared;

/// Accept peer connections on the given port until the process exits.
pub async fn run_gossip_listener(port: u16, shared: NodeShared) -> Result<(), MurmurError> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("peer listener started on port {}", port);

    loop {
        let (stream, remote) = listener.accept().await?;
        tracing::debug!("accepted peer connection from {}", remote);
        let shared = shared.clone();
        tokio::spawn(async move {
            handle_connection(stream, shared).await;
        });
    }
}

/// Read one wire record, apply it to the engine, then perform the
/// planned relays and any snapshot write outside the engine lock.
async fn handle_connection(mut stream: TcpStream, shared: NodeShared) {
    let mut buf = Vec::new();
    if let Err(e) = stream.read_to_end(&mut buf).await {
        tracing::debug!("connection read failed: {}", e);
        return;
    }

    let msg = match GossipMessage::decode(&buf) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::debug!("dropping malformed payload: {}", e);
            return;
        }
    };

    let receipt = {
        let mut engine = shared.engine.lock().await;
        engine.on_receive(&msg)
    };

    relay::broadcast(receipt.outbound);

    if let Some(snapshot) = receipt.snapshot {
        if let Err(e) = shared.sink.record(&snapshot).await {
            tracing::warn!("failed to persist trust snapshot: {}", e);
        }
    }
}
