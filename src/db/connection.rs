//! Cached database connection with inline liveness checking.
//!
//! The agent holds exactly one connection, created lazily and reused across
//! calls. Liveness is checked with a `SELECT 1` probe on every acquisition;
//! there is no background health check. A failed probe closes the dead handle
//! and reconnects once within the same call. The handle is owned by a single
//! agent instance and is not designed for concurrent access.

use crate::config::ConnectionConfig;
use crate::types::{AgentError, Result};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};
use std::time::Duration;

/// Connection lifecycle state.
///
/// `Dead` is transient: a handle whose probe failed is closed and reset to
/// `Absent` inside the same `acquire` call, so it never rests in a dead state
/// between calls.
enum ConnectionState {
    /// No connection has been established (or the last one was discarded)
    Absent,
    /// A connection that passed its last liveness probe
    Live(PgConnection),
}

/// Single cached connection handle.
pub struct DbHandle {
    config: ConnectionConfig,
    state: ConnectionState,
    probes: u64,
}

impl DbHandle {
    /// Create a handle in the `Absent` state; no connection is opened yet.
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            state: ConnectionState::Absent,
            probes: 0,
        }
    }

    /// Whether a cached connection is currently held.
    pub fn is_live(&self) -> bool {
        matches!(self.state, ConnectionState::Live(_))
    }

    /// Number of liveness probes issued so far.
    ///
    /// Exactly one probe is issued per acquisition of a live handle.
    pub fn probe_count(&self) -> u64 {
        self.probes
    }

    /// Acquire a usable connection, reusing the cached one when it is alive.
    ///
    /// Transitions: `Absent -> Live` on first successful connect;
    /// `Live -> Live` when the probe succeeds; `Live -> Absent -> Live` when
    /// the probe fails (close, then reconnect once). A failed reconnect leaves
    /// the state `Absent` and surfaces the error for this call.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::ConnectionError` if connecting fails or times out.
    pub async fn acquire(&mut self) -> Result<&mut PgConnection> {
        if let ConnectionState::Live(conn) = &mut self.state {
            self.probes += 1;
            match sqlx::query("SELECT 1").execute(&mut *conn).await {
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "liveness probe failed, discarding connection");
                    if let ConnectionState::Live(dead) =
                        std::mem::replace(&mut self.state, ConnectionState::Absent)
                    {
                        dead.close().await.ok();
                    }
                }
            }
        }

        if let ConnectionState::Absent = self.state {
            let conn = self.connect().await?;
            self.state = ConnectionState::Live(conn);
        }

        match &mut self.state {
            ConnectionState::Live(conn) => Ok(conn),
            ConnectionState::Absent => Err(AgentError::connection(
                "connection unavailable".to_string(),
            )),
        }
    }

    /// Discard the cached connection, returning the handle to `Absent`.
    pub async fn reset(&mut self) {
        if let ConnectionState::Live(conn) =
            std::mem::replace(&mut self.state, ConnectionState::Absent)
        {
            conn.close().await.ok();
        }
    }

    /// Open a fresh connection using the configured parameters.
    async fn connect(&self) -> Result<PgConnection> {
        let (host, port) = self.config.host_port();
        let statement_timeout_ms = (self.config.query_timeout_secs * 1000).to_string();

        let options = PgConnectOptions::new()
            .host(host)
            .port(port)
            .database(&self.config.database)
            .username(&self.config.user)
            .password(&self.config.password)
            .options([("statement_timeout", statement_timeout_ms.as_str())]);

        let login_timeout = Duration::from_secs(self.config.login_timeout_secs);
        match tokio::time::timeout(login_timeout, options.connect()).await {
            Ok(Ok(conn)) => {
                tracing::debug!(
                    server = %self.config.server,
                    database = %self.config.database,
                    "database connection established"
                );
                Ok(conn)
            }
            Ok(Err(e)) => Err(AgentError::connection(format!(
                "Failed to connect to database: {}",
                e
            ))),
            Err(_) => Err(AgentError::connection(format!(
                "Connect timed out after {}s",
                self.config.login_timeout_secs
            ))),
        }
    }
}
