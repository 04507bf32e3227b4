use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use sea_orm::{DatabaseTransaction, TransactionTrait};

use super::txn_policy;
use crate::db::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// A shared transaction wrapper that can be injected into request extensions.
///
/// Tests use this to run a whole request inside one transaction they roll
/// back afterwards; `with_txn` then neither commits nor rolls back.
#[derive(Clone)]
pub struct SharedTxn(Arc<DatabaseTransaction>);

impl SharedTxn {
    pub fn new(txn: DatabaseTransaction) -> Self {
        Self(Arc::new(txn))
    }

    /// Get a reference to the underlying database transaction
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }

    /// Number of live handles to this transaction
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Roll the transaction back. Fails if other handles are still alive.
    pub async fn rollback(self) -> Result<(), sea_orm::DbErr> {
        match Arc::try_unwrap(self.0) {
            Ok(txn) => txn.rollback().await,
            Err(_) => Err(sea_orm::DbErr::Custom(
                "Cannot rollback: transaction is still shared".to_string(),
            )),
        }
    }
}

/// Execute a function within a database transaction
///
/// 1) If a SharedTxn is in request extensions → use it (no commit/rollback here)
/// 2) Otherwise → begin txn, run closure, apply policy on Ok / rollback on Err
pub async fn with_txn<R, F>(
    req: Option<&HttpRequest>,
    state: &AppState,
    f: F,
) -> Result<R, AppError>
where
    F: for<'c> FnOnce(
        &'c DatabaseTransaction,
    ) -> Pin<Box<dyn Future<Output = Result<R, AppError>> + 'c>>,
{
    // Extract any SharedTxn out of request extensions *before* awaiting to avoid holding a RefCell borrow.
    let shared_txn: Option<SharedTxn> = if let Some(r) = req {
        r.extensions().get::<SharedTxn>().cloned()
    } else {
        None
    };

    if let Some(shared) = shared_txn {
        return f(shared.transaction()).await;
    }

    // Own the transaction lifecycle
    let txn = require_db(state)?.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => {
            // Apply transaction policy on success
            match txn_policy::current() {
                txn_policy::TxnPolicy::CommitOnOk => {
                    txn.commit().await?;
                    Ok(val)
                }
                txn_policy::TxnPolicy::RollbackOnOk => {
                    txn.rollback().await?;
                    Ok(val)
                }
            }
        }
        Err(err) => {
            // Best-effort rollback; preserve original error
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::TransactionTrait;

    use super::*;
    use crate::test_support::connect_test_db;

    #[tokio::test]
    async fn shared_txn_rollback_discards_writes() {
        let db = connect_test_db().await;

        let shared = SharedTxn::new(db.begin().await.unwrap());
        assert_eq!(shared.strong_count(), 1);

        let handle = shared.clone();
        assert_eq!(shared.strong_count(), 2);
        drop(handle);

        shared.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn rollback_on_ok_policy_discards_successful_writes() {
        // Process-global policy; no other unit test runs with_txn, so this
        // cannot leak into unrelated assertions.
        txn_policy::set_txn_policy(txn_policy::TxnPolicy::RollbackOnOk);

        let state = AppState::new(connect_test_db().await);

        let created = with_txn(None, &state, |txn| {
            Box::pin(async move {
                Ok(crate::repos::players::create_player(txn, "Ghost", "ghost").await?)
            })
        })
        .await
        .unwrap();

        // The operation succeeded, but the policy rolled the write back
        let found = crate::repos::players::find_by_id(require_db(&state).unwrap(), created.id)
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn shared_txn_rollback_fails_while_shared() {
        let db = connect_test_db().await;

        let shared = SharedTxn::new(db.begin().await.unwrap());
        let handle = shared.clone();

        let err = shared.rollback().await.unwrap_err();
        assert!(err.to_string().contains("still shared"));
        drop(handle);
    }
}
