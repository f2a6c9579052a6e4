//! Scoped SQLite transactions.
//!
//! # Invariants
//! - A scope that is dropped without `commit` is rolled back.
//! - `ReadOnly` scopes run with `PRAGMA query_only` enabled and always turn it
//!   back off before the scope ends, on both commit and rollback paths.

use crate::repo::product_repo::RepoResult;
use log::warn;
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Isolation intent of a transaction scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionMode {
    /// Deferred transaction; any write inside fails.
    ReadOnly,
    /// Immediate transaction; the write lock is taken on begin.
    ReadWrite,
}

impl TransactionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadOnly => "read_only",
            Self::ReadWrite => "read_write",
        }
    }
}

/// Unit-of-work handle returned by a repository.
///
/// Dropping the handle without calling [`TransactionScope::commit`] discards
/// every write made since it was opened.
pub trait TransactionScope {
    fn mode(&self) -> TransactionMode;
    fn commit(self) -> RepoResult<()>;
}

/// SQLite implementation of [`TransactionScope`].
pub struct SqliteTransaction<'conn> {
    tx: Option<Transaction<'conn>>,
    mode: TransactionMode,
}

impl<'conn> SqliteTransaction<'conn> {
    /// Opens a scope on a shared connection.
    ///
    /// Statements issued on the same connection while the scope is alive
    /// belong to it. Fails if the connection already has an open transaction.
    pub fn begin(conn: &'conn Connection, mode: TransactionMode) -> RepoResult<Self> {
        let behavior = match mode {
            TransactionMode::ReadOnly => TransactionBehavior::Deferred,
            TransactionMode::ReadWrite => TransactionBehavior::Immediate,
        };
        let tx = Transaction::new_unchecked(conn, behavior)?;
        if mode == TransactionMode::ReadOnly {
            tx.pragma_update(None, "query_only", true)?;
        }

        Ok(Self { tx: Some(tx), mode })
    }
}

impl TransactionScope for SqliteTransaction<'_> {
    fn mode(&self) -> TransactionMode {
        self.mode
    }

    fn commit(mut self) -> RepoResult<()> {
        let Some(tx) = self.tx.take() else {
            return Ok(());
        };
        if self.mode == TransactionMode::ReadOnly {
            tx.pragma_update(None, "query_only", false)?;
        }
        tx.commit()?;
        Ok(())
    }
}

impl Drop for SqliteTransaction<'_> {
    fn drop(&mut self) {
        let Some(tx) = self.tx.take() else {
            return;
        };
        if self.mode == TransactionMode::ReadOnly {
            if let Err(err) = tx.pragma_update(None, "query_only", false) {
                warn!(
                    "event=tx_release module=repo status=error mode={} error={}",
                    self.mode.as_str(),
                    err
                );
            }
        }
        // `Transaction` rolls back on drop.
        drop(tx);
    }
}
