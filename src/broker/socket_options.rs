//! Socket options applied to the broker socket before connecting.

use std::{io, time::Duration};

use socket2::{SockRef, TcpKeepalive};
use tokio::net::TcpSocket;

/// Socket options applied before connecting to a broker.
///
/// Unset options keep the operating system defaults.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use brokerlink::SocketOptions;
///
/// let options = SocketOptions::default()
///     .nodelay(true)
///     .keepalive(Some(Duration::from_secs(30)));
/// assert_ne!(options, SocketOptions::default());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SocketOptions {
    nodelay: Option<bool>,
    keepalive: Option<Setting>,
    linger: Option<Setting>,
    send_buffer_size: Option<u32>,
    recv_buffer_size: Option<u32>,
}

/// An option that is either switched off or carries a duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Setting {
    Disabled,
    Duration(Duration),
}

impl From<Option<Duration>> for Setting {
    fn from(value: Option<Duration>) -> Self { value.map_or(Self::Disabled, Self::Duration) }
}

impl Setting {
    const fn to_option(self) -> Option<Duration> {
        match self {
            Self::Disabled => None,
            Self::Duration(value) => Some(value),
        }
    }
}

impl SocketOptions {
    /// Configure `TCP_NODELAY` on the socket.
    #[must_use]
    pub fn nodelay(mut self, enabled: bool) -> Self {
        self.nodelay = Some(enabled);
        self
    }

    /// Configure `SO_KEEPALIVE`; `None` switches keepalive off.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use brokerlink::SocketOptions;
    ///
    /// let on = SocketOptions::default().keepalive(Some(Duration::from_secs(30)));
    /// let off = SocketOptions::default().keepalive(None);
    /// assert_ne!(on, off);
    /// ```
    #[must_use]
    pub fn keepalive(mut self, duration: Option<Duration>) -> Self {
        self.keepalive = Some(duration.into());
        self
    }

    /// Configure `SO_LINGER`; `None` switches lingering off.
    #[must_use]
    pub fn linger(mut self, duration: Option<Duration>) -> Self {
        self.linger = Some(duration.into());
        self
    }

    /// Configure the socket send buffer size.
    #[must_use]
    pub fn send_buffer_size(mut self, size: u32) -> Self {
        self.send_buffer_size = Some(size);
        self
    }

    /// Configure the socket receive buffer size.
    #[must_use]
    pub fn recv_buffer_size(mut self, size: u32) -> Self {
        self.recv_buffer_size = Some(size);
        self
    }

    pub(crate) fn apply(&self, socket: &TcpSocket) -> io::Result<()> {
        if let Some(enabled) = self.nodelay {
            socket.set_nodelay(enabled)?;
        }
        if let Some(keepalive) = self.keepalive {
            Self::apply_keepalive(socket, keepalive)?;
        }
        if let Some(linger) = self.linger {
            SockRef::from(socket).set_linger(linger.to_option())?;
        }
        if let Some(size) = self.send_buffer_size {
            socket.set_send_buffer_size(size)?;
        }
        if let Some(size) = self.recv_buffer_size {
            socket.set_recv_buffer_size(size)?;
        }
        Ok(())
    }

    fn apply_keepalive(socket: &TcpSocket, keepalive: Setting) -> io::Result<()> {
        match keepalive.to_option() {
            Some(duration) => {
                socket.set_keepalive(true)?;
                let params = TcpKeepalive::new().with_time(duration);
                SockRef::from(socket).set_tcp_keepalive(&params)
            }
            None => socket.set_keepalive(false),
        }
    }
}
