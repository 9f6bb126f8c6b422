//! Transactional write pattern shared by every create / update / delete.
//!
//! Each mutation runs as: begin, attempt the write, commit on success or roll
//! back on failure, then report. The transaction owns its pooled connection and
//! hands it back when it is committed, rolled back or dropped, so every exit
//! path releases it.

use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;

/// Result of a mutation, ready to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MutationOutcome {
    Success {
        id: i32,
        message: String,
    },
    /// Rejected before any write, e.g. the artist already plays that day.
    Conflict {
        message: String,
    },
    NotFound {
        message: String,
    },
    #[serde(rename = "error")]
    Failed {
        message: String,
        /// Diagnostic detail; logged, never shown.
        #[serde(skip)]
        detail: String,
    },
}

impl MutationOutcome {
    pub fn success(id: i32, message: impl Into<String>) -> Self {
        Self::Success {
            id,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Build a failure and log its detail.
    pub fn failed(message: impl Into<String>, detail: impl Display) -> Self {
        let message = message.into();
        let detail = detail.to_string();
        tracing::error!(%detail, "{message}");
        Self::Failed { message, detail }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. }
            | Self::Conflict { message }
            | Self::NotFound { message }
            | Self::Failed { message, .. } => message,
        }
    }

    pub fn id(&self) -> Option<i32> {
        match self {
            Self::Success { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Run `write` inside a fresh transaction, committing if it returns `Ok` and
/// rolling back otherwise.
///
/// A failed commit is reported as an error too; in that case the database has
/// already discarded the transaction.
pub async fn commit_or_rollback<T, E, F>(db: &DatabaseConnection, write: F) -> Result<T, E>
where
    F: for<'c> FnOnce(
            &'c DatabaseTransaction,
        ) -> Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'c>>
        + Send,
    T: Send,
    E: From<DbErr> + Display + Send,
{
    let txn = db.begin().await?;

    match write(&txn).await {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            tracing::warn!(error = %err, "write failed, rolling back");
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}
