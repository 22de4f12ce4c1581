//! TCP connector backed by [`tokio::net`].

use super::NetworkDialer;
use crate::context::Context;
use async_trait::async_trait;
use socket2::{SockRef, TcpKeepalive};
use std::{io, net::SocketAddr, time::Duration};
use tokio::net::TcpStream;

/// Dials TCP connections, resolving host names with the system resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpDialer {
    /// Upper bound on a whole dial, on top of the caller's context.
    pub timeout: Option<Duration>,
    /// Idle time and probe interval for TCP keep-alive; `None` leaves it off.
    pub keep_alive: Option<Duration>,
}

impl Default for TcpDialer {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            keep_alive: Some(Duration::from_secs(15)),
        }
    }
}

impl TcpDialer {
    fn set_keep_alive(&self, stream: &TcpStream) -> io::Result<()> {
        let Some(idle) = self.keep_alive else {
            return Ok(());
        };
        let keepalive = TcpKeepalive::new().with_time(idle);
        #[cfg(any(target_os = "linux", target_os = "macos", windows))]
        let keepalive = keepalive.with_interval(idle);
        SockRef::from(stream).set_tcp_keepalive(&keepalive)
    }
}

async fn connect_any(address: &str, allowed: fn(&SocketAddr) -> bool) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in tokio::net::lookup_host(address).await?.filter(allowed) {
        match TcpStream::connect(addr).await {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                #[cfg(feature = "log")]
                tracing::trace!(%addr, %e, "TCP connect attempt failed");
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no suitable address found for {address}"),
        )
    }))
}

#[async_trait]
impl NetworkDialer for TcpDialer {
    type Connection = TcpStream;
    type Error = io::Error;

    async fn dial_context(
        &self,
        ctx: &Context,
        network: &str,
        address: &str,
    ) -> Result<Self::Connection, Self::Error> {
        let allowed: fn(&SocketAddr) -> bool = match network {
            "tcp" => |_| true,
            "tcp4" => SocketAddr::is_ipv4,
            "tcp6" => SocketAddr::is_ipv6,
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("unsupported network {other:?}"),
                ))
            }
        };

        let ctx = match self.timeout {
            Some(timeout) => ctx.clone().with_timeout(timeout),
            None => ctx.clone(),
        };
        let stream = ctx.run(connect_any(address, allowed)).await??;
        self.set_keep_alive(&stream)?;
        Ok(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn dials_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();

        let stream = TcpDialer::default()
            .dial_context(&Context::background(), "tcp", &address)
            .await
            .unwrap();
        assert_eq!(stream.peer_addr().unwrap(), listener.local_addr().unwrap());
    }

    #[tokio::test]
    async fn family_filter_rejects_mismatch() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();

        let err = TcpDialer::default()
            .dial_context(&Context::background(), "tcp6", &address)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn unsupported_network() {
        let err = TcpDialer::default()
            .dial_context(&Context::background(), "udp", "127.0.0.1:53")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn cancelled_context_aborts_dial() {
        let ctx = Context::background();
        ctx.cancel();
        let err = TcpDialer::default()
            .dial_context(&ctx, "tcp", "127.0.0.1:9")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Interrupted);
    }
}
