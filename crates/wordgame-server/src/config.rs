//! Configuration for the game server.
//!
//! The listen mode comes from the command line (`local` selects the
//! Unix socket, anything else the TCP listener, like the original
//! deployment); everything else can be overridden via environment
//! variables:
//!
//! - `WORDGAME_BIND_ADDR`         (default: "0.0.0.0")
//! - `WORDGAME_PORT`              (default: "9999")
//! - `WORDGAME_SOCKET_PATH`       (default: "/tmp/wordgame.sock")
//! - `WORDGAME_SECRET`            (default: "mysecretpw")
//! - `WORDGAME_STATUS_PORT`       (default: "8080")
//! - `WORDGAME_MAX_CLIENTS`       (default: "1024")
//! - `WORDGAME_IDLE_TIMEOUT_SECS` (default: "0", disabled)

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// How the server listens for game clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenMode {
    /// TCP on all interfaces at a fixed port.
    Tcp,

    /// Filesystem-path-addressed Unix-domain socket.
    Unix,
}

impl ListenMode {
    /// Parse the startup argument: `local` selects the Unix socket.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("local") => ListenMode::Unix,
            _ => ListenMode::Tcp,
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP vs Unix-domain socket.
    pub mode: ListenMode,

    /// IP address / interface to bind to (TCP mode).
    pub bind_addr: String,

    /// TCP port to listen on (TCP mode).
    pub port: u16,

    /// Socket file path (Unix mode).
    pub socket_path: PathBuf,

    /// Shared secret clients must submit before anything else.
    pub secret: Vec<u8>,

    /// Port for the read-only HTTP status page.
    pub status_port: u16,

    /// Maximum number of simultaneously connected clients.
    pub max_clients: usize,

    /// Per-connection read/write timeout in seconds; 0 disables.
    pub idle_timeout_secs: u64,
}

impl Config {
    /// Construct a `Config` from environment variables, falling back
    /// to the defaults above.
    pub fn from_env(mode: ListenMode) -> Result<Self, Box<dyn std::error::Error>> {
        let bind_addr = env::var("WORDGAME_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = read_env_or_default("WORDGAME_PORT", 9999u16)?;
        let socket_path = env::var("WORDGAME_SOCKET_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp/wordgame.sock"));
        let secret = env::var("WORDGAME_SECRET")
            .unwrap_or_else(|_| "mysecretpw".to_string())
            .into_bytes();
        let status_port = read_env_or_default("WORDGAME_STATUS_PORT", 8080u16)?;
        let max_clients = read_env_or_default("WORDGAME_MAX_CLIENTS", 1024usize)?;
        let idle_timeout_secs = read_env_or_default("WORDGAME_IDLE_TIMEOUT_SECS", 0u64)?;

        Ok(Config {
            mode,
            bind_addr,
            port,
            socket_path,
            secret,
            status_port,
            max_clients,
            idle_timeout_secs,
        })
    }

    /// Convenience: `addr:port` socket string for TCP mode.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// `None` when the idle timeout is disabled.
    pub fn idle_timeout(&self) -> Option<Duration> {
        if self.idle_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.idle_timeout_secs))
        }
    }
}

fn read_env_or_default<T>(key: &str, default: T) -> Result<T, Box<dyn std::error::Error>>
where
    T: FromStr,
    T::Err: std::error::Error + 'static,
{
    match env::var(key) {
        Ok(val) => Ok(val.parse::<T>()?),
        Err(_) => Ok(default),
    }
}
