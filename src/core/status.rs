//! Status vocabulary business logic.
//!
//! The vocabulary is read-only to the API; the only write is the idempotent seeding
//! performed at startup from configuration.

use crate::{
    db,
    entities::asset_status,
    errors::{Result, StatusError},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use tracing::{info, instrument};

/// Lists every status, ordered by id.
pub async fn list_statuses(db: &DatabaseConnection) -> Result<Vec<asset_status::Model>> {
    db::statuses::find_all(db).await
}

/// Retrieves one status.
///
/// # Errors
/// Returns `StatusError::NotFound` if no status has this id.
pub async fn get_status(db: &DatabaseConnection, status_id: i64) -> Result<asset_status::Model> {
    db::statuses::find_by_id(db, status_id)
        .await?
        .ok_or_else(|| StatusError::NotFound { id: status_id }.into())
}

/// Retrieves a status by its exact name.
pub async fn get_status_by_name(db: &DatabaseConnection, name: &str) -> Result<asset_status::Model> {
    db::statuses::find_by_name(db, name).await?.ok_or_else(|| {
        StatusError::UnknownName {
            name: name.to_string(),
        }
        .into()
    })
}

/// Inserts every name from `names` that is not in the vocabulary yet.
///
/// Blank names are skipped and existing rows are left untouched, so running this
/// on every startup is safe. Returns the number of statuses inserted.
#[instrument(skip(db, names))]
pub async fn seed_statuses(db: &DatabaseConnection, names: &[String]) -> Result<usize> {
    let txn = db.begin().await?;
    let mut inserted = 0;

    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        if db::statuses::find_by_name(&txn, name).await?.is_some() {
            continue;
        }
        asset_status::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        inserted += 1;
    }

    txn.commit().await?;
    info!(inserted, "Status vocabulary seeded");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_seed_statuses_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let names = vec!["in-use".to_string(), " spare ".to_string(), String::new()];

        assert_eq!(seed_statuses(&db, &names).await?, 2);
        assert_eq!(seed_statuses(&db, &names).await?, 0);

        let statuses = list_statuses(&db).await?;
        let listed: Vec<&str> = statuses.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(listed, vec!["in-use", "spare"]);
        assert_eq!(get_status_by_name(&db, "spare").await?.id, statuses[1].id);
        assert!(get_status_by_name(&db, "lost").await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_status_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = get_status(&db, 42).await;
        assert!(matches!(
            result,
            Err(Error::Status(StatusError::NotFound { id: 42 }))
        ));
        Ok(())
    }
}
