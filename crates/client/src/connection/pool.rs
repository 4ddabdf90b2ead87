use std::collections::{HashMap, VecDeque};

use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::connection::{Connection, Connector};
use crate::protocol::{ConnectionError, ConnectionKey};

/// Idle connections, keyed by `(host, port, use_tls)`.
///
/// A connection is owned either by exactly one in-flight request or by the pool,
/// never both. Each key keeps at most `capacity` idle connections; the lock is
/// only held to pop, push or drain a queue, never across I/O.
pub struct ConnectionPool<C: Connector> {
    connector: C,
    capacity: usize,
    idle: Mutex<HashMap<ConnectionKey, VecDeque<C::Conn>>>,
}

impl<C: Connector> std::fmt::Debug for ConnectionPool<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionPool").field("capacity", &self.capacity).finish_non_exhaustive()
    }
}

impl<C: Connector> ConnectionPool<C> {
    pub fn new(connector: C, capacity: usize) -> Self {
        Self { connector, capacity, idle: Mutex::new(HashMap::new()) }
    }

    /// Takes the oldest idle connection for `key`, or opens a new one.
    ///
    /// Idle connections the peer has closed meanwhile are dropped on the way.
    pub async fn acquire(&self, key: &ConnectionKey) -> Result<C::Conn, ConnectionError> {
        loop {
            let idle = self.idle.lock().await.get_mut(key).and_then(VecDeque::pop_front);
            match idle {
                Some(connection) if connection.is_closing() => {
                    debug!(%key, "drop idle connection closed by peer");
                }
                Some(connection) => {
                    debug!(%key, "reuse idle connection");
                    return Ok(connection);
                }
                None => break,
            }
        }

        debug!(%key, "no idle connection, connecting");
        self.connector.connect(key).await
    }

    /// Parks `connection` for reuse by the next request on `key`.
    ///
    /// A closing connection is dropped. When the queue is already full the released
    /// connection is shut down, keeping the older ones.
    pub async fn release(&self, key: &ConnectionKey, connection: C::Conn) {
        if connection.is_closing() {
            debug!(%key, "drop released connection, it is closing");
            return;
        }

        let rejected = {
            let mut idle = self.idle.lock().await;
            let queue = idle.entry(key.clone()).or_default();
            if queue.len() < self.capacity {
                queue.push_back(connection);
                trace!(%key, idle = queue.len(), "connection returned to pool");
                None
            } else {
                Some(connection)
            }
        };

        if let Some(connection) = rejected {
            debug!(%key, capacity = self.capacity, "pool is full, close released connection");
            shutdown(connection).await;
        }
    }

    /// Shuts down a connection that must not be reused.
    pub async fn discard(&self, connection: C::Conn) {
        shutdown(connection).await;
    }

    /// Shuts down every idle connection. Calling it again is a no-op.
    pub async fn close_all(&self) {
        let drained: Vec<C::Conn> = {
            let mut idle = self.idle.lock().await;
            idle.drain().flat_map(|(_, queue)| queue).collect()
        };

        debug!(count = drained.len(), "close all idle connections");
        for connection in drained {
            shutdown(connection).await;
        }
    }

    pub async fn idle_count(&self, key: &ConnectionKey) -> usize {
        self.idle.lock().await.get(key).map_or(0, VecDeque::len)
    }

    pub async fn total_idle(&self) -> usize {
        self.idle.lock().await.values().map(VecDeque::len).sum()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

async fn shutdown<T: Connection>(mut connection: T) {
    if connection.is_closing() {
        return;
    }

    if let Err(e) = connection.shutdown().await {
        trace!(cause = %e, "shutdown connection failed");
    }
}
