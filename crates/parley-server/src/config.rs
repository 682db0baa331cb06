use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

pub struct Config {
    pub addr: SocketAddr,
    /// How long `/ready` reports 503 before the listener actually stops, so
    /// load balancers notice and stop routing traffic here.
    pub shutdown_grace: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("PARLEY_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("PARLEY_PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .context("PARLEY_PORT must be a port number")?;
        let grace_secs: u64 = std::env::var("PARLEY_SHUTDOWN_GRACE_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .context("PARLEY_SHUTDOWN_GRACE_SECS must be a whole number of seconds")?;

        let addr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", host, port))?;

        Ok(Self {
            addr,
            shutdown_grace: Duration::from_secs(grace_secs),
        })
    }
}
