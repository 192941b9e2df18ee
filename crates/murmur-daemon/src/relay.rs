// crates/murmur-daemon/src/relay.rs
//
// Relay fan-out: deliver planned outbound copies to peers.
// Fire-and-forget: failures are logged, never block the caller, and
// never affect sibling sends.

use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use murmur_core::{GossipMessage, MurmurError, PeerAddr};
use murmur_gossip::OutboundMessage;

/// Bound on connect + write for a single peer send.
pub const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Deliver each outbound copy on its own task.
pub fn broadcast(outbound: Vec<OutboundMessage>) {
    if outbound.is_empty() {
        return;
    }
    tracing::debug!("relaying to {} peers", outbound.len());

    for out in outbound {
        tokio::spawn(async move {
            if let Err(e) = send_to_peer(&out.to, &out.msg).await {
                tracing::warn!("failed to send to peer {}: {}", out.to, e);
            }
        });
    }
}

/// Open a connection to the peer, write one wire record, and close.
pub async fn send_to_peer(to: &PeerAddr, msg: &GossipMessage) -> Result<(), MurmurError> {
    let payload = msg.encode()?;

    let send = async {
        let mut stream = TcpStream::connect((to.host.as_str(), to.port)).await?;
        stream.write_all(&payload).await?;
        stream.shutdown().await?;
        Ok::<(), std::io::Error>(())
    };

    match tokio::time::timeout(SEND_TIMEOUT, send).await {
        Ok(result) => result.map_err(|e| MurmurError::Network(format!("send to {}: {}", to, e))),
        Err(_) => Err(MurmurError::Network(format!("send to {} timed out", to))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    fn sample(amount: f64) -> GossipMessage {
        GossipMessage {
            sender_id: 0,
            origin_id: 0,
            amount,
            message_id: "round-1".to_string(),
            sender_port: 8000,
            sender_address: "127.0.0.1".to_string(),
        }
    }

    #[tokio::test]
    async fn sends_one_record_per_connection() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let accept = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            stream.read_to_end(&mut buf).await.unwrap();
            buf
        });

        let to = PeerAddr::new("127.0.0.1", addr.port());
        send_to_peer(&to, &sample(100.0)).await.unwrap();

        let received = accept.await.unwrap();
        let decoded = GossipMessage::decode(&received).unwrap();
        assert_eq!(decoded, sample(100.0));
    }

    #[tokio::test]
    async fn unreachable_peer_is_an_error_not_a_panic() {
        // Port 1 is essentially never listening.
        let to = PeerAddr::new("127.0.0.1", 1);
        let result = send_to_peer(&to, &sample(100.0)).await;
        assert!(result.is_err());
    }
}
