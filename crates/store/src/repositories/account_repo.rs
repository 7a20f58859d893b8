use chrono::Utc;
use relplan_core::error::CoreError;
use relplan_core::model::{Account, CreateAccount, Release, UpdateAccount};
use relplan_core::types::DbId;

use crate::repositories::{next_id, RepoError};
use crate::store::{Store, ACCOUNTS, RELEASES};

/// CRUD for the account collection.
///
/// Names are normalized to uppercase and unique case-insensitively; an
/// account referenced by any release cannot be deleted.
pub struct AccountRepo;

impl AccountRepo {
    pub async fn list(store: &Store) -> Vec<Account> {
        store.load(ACCOUNTS).await
    }

    pub async fn create(store: &Store, input: CreateAccount) -> Result<Account, RepoError> {
        let name = normalized_name(&input.name)?;
        let mut accounts: Vec<Account> = store.load(ACCOUNTS).await;

        if accounts.iter().any(|a| a.name.eq_ignore_ascii_case(&name)) {
            return Err(CoreError::DuplicateName(format!("account '{name}' already exists")).into());
        }

        let account = Account {
            id: next_id(accounts.iter().map(|a| a.id)),
            name,
            region: input.region,
            products: input.products,
            created_at: Utc::now(),
            updated_at: None,
        };
        accounts.push(account.clone());
        store.save(ACCOUNTS, &accounts).await?;

        tracing::info!(id = account.id, name = %account.name, "account created");
        Ok(account)
    }

    pub async fn update(
        store: &Store,
        id: DbId,
        input: UpdateAccount,
    ) -> Result<Account, RepoError> {
        let name = normalized_name(&input.name)?;
        let mut accounts: Vec<Account> = store.load(ACCOUNTS).await;

        let Some(index) = accounts.iter().position(|a| a.id == id) else {
            return Err(CoreError::NotFound {
                entity: "Account",
                id,
            }
            .into());
        };

        if accounts
            .iter()
            .any(|a| a.id != id && a.name.eq_ignore_ascii_case(&name))
        {
            return Err(CoreError::DuplicateName(format!("account '{name}' already exists")).into());
        }

        let account = &mut accounts[index];
        account.name = name;
        account.region = input.region;
        account.products = input.products;
        account.updated_at = Some(Utc::now());
        let updated = account.clone();

        store.save(ACCOUNTS, &accounts).await?;
        tracing::info!(id, name = %updated.name, "account updated");
        Ok(updated)
    }

    pub async fn delete(store: &Store, id: DbId) -> Result<(), RepoError> {
        let mut accounts: Vec<Account> = store.load(ACCOUNTS).await;

        let Some(index) = accounts.iter().position(|a| a.id == id) else {
            return Err(CoreError::NotFound {
                entity: "Account",
                id,
            }
            .into());
        };

        let releases: Vec<Release> = store.load(RELEASES).await;
        if releases
            .iter()
            .any(|r| r.account_name == accounts[index].name)
        {
            return Err(CoreError::InUse(format!(
                "account '{}' is referenced by existing releases",
                accounts[index].name
            ))
            .into());
        }

        let removed = accounts.remove(index);
        store.save(ACCOUNTS, &accounts).await?;
        tracing::info!(id, name = %removed.name, "account deleted");
        Ok(())
    }
}

fn normalized_name(raw: &str) -> Result<String, CoreError> {
    let name = raw.trim().to_uppercase();
    if name.is_empty() {
        return Err(CoreError::Validation(
            "account name must not be empty".to_string(),
        ));
    }
    Ok(name)
}
