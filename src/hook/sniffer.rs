//! Raw-socket reference hook.
//!
//! Opens an `AF_INET`/`SOCK_RAW` socket bound to the TCP protocol, reads one
//! IP datagram per call, and feeds each to a [`PacketHook`]. The kernel
//! delivers full datagrams including the IP header, which is exactly the
//! shape the classifier expects.
//!
//! This adapter observes; it cannot make the kernel discard a segment. It is
//! the registration glue plus an enforcement-free host for the gate, useful
//! for monitoring and for driving the daemon binary. Requires CAP_NET_RAW.

use crate::core::gate::Verdict;
use crate::error::Result;
use crate::hook::PacketHook;
use nix::errno::Errno;
use nix::sys::socket::sockopt::{RcvBuf, ReceiveTimeout};
use nix::sys::socket::{setsockopt, socket, AddressFamily, SockFlag, SockProtocol, SockType};
use nix::sys::time::{TimeVal, TimeValLike};
use nix::unistd::read;
use std::os::fd::{AsRawFd, OwnedFd};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Largest possible IP datagram
const RECV_BUF_LEN: usize = 65535;

/// Poll interval for the stop flag while no traffic arrives
const STOP_POLL_MILLIS: i64 = 200;

/// Blocking raw-socket packet source.
pub struct Sniffer {
    fd: OwnedFd,
    stop: Arc<AtomicBool>,
}

impl Sniffer {
    /// Open the raw socket and arm the hook.
    pub fn open() -> Result<Self> {
        let fd = socket(
            AddressFamily::Inet,
            SockType::Raw,
            SockFlag::empty(),
            SockProtocol::Tcp,
        )?;

        let buf_size: usize = 1024 * 1024 * 2;
        setsockopt(&fd, RcvBuf, &buf_size)?;

        // Short receive timeout so `run` notices the stop flag on idle links
        let timeout = TimeVal::milliseconds(STOP_POLL_MILLIS);
        setsockopt(&fd, ReceiveTimeout, &timeout)?;

        info!("knock gate armed");

        Ok(Self {
            fd,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Flag that stops `run` at the next poll interval
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Read datagrams and feed them to the hook until stopped.
    ///
    /// Verdicts are logged, not enforced; see the module docs.
    pub fn run(&self, hook: &dyn PacketHook) -> Result<()> {
        let mut buf = [0u8; RECV_BUF_LEN];
        let raw_fd = self.fd.as_raw_fd();

        while !self.stop.load(Ordering::Relaxed) {
            match read(raw_fd, &mut buf) {
                Ok(0) => continue,
                Ok(n) => {
                    if hook.process(&buf[..n]) == Verdict::Drop {
                        warn!(len = n, "verdict: drop (not enforced in sniffer mode)");
                    }
                }
                Err(Errno::EINTR) => continue,
                // EWOULDBLOCK aliases EAGAIN on Linux
                Err(Errno::EAGAIN) => {
                    debug!("receive window idle");
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!("knock gate disarmed");
        Ok(())
    }
}
