use chrono::Utc;
use relplan_core::error::CoreError;
use relplan_core::lifecycle;
use relplan_core::model::{Account, CreateRelease, Release, ReleaseVersion, UpdateRelease};
use relplan_core::types::DbId;

use crate::repositories::{next_id, RepoError};
use crate::store::{Store, ACCOUNTS, RELEASES, RELEASE_VERSIONS};

/// CRUD for the release collection.
///
/// Every write runs the lifecycle rules: referential checks against the
/// account and version collections, completion validation, and
/// recomputation of the derived defect fields.
pub struct ReleaseRepo;

impl ReleaseRepo {
    pub async fn list(store: &Store) -> Vec<Release> {
        store.load(RELEASES).await
    }

    pub async fn create(store: &Store, input: CreateRelease) -> Result<Release, RepoError> {
        check_references(store, &input.account_name, &input.release_version).await?;

        let mut releases: Vec<Release> = store.load(RELEASES).await;
        let now = Utc::now();
        let mut release = Release {
            id: next_id(releases.iter().map(|r| r.id)),
            account_name: input.account_name,
            release_version: input.release_version,
            product: input.product,
            environment: input.environment,
            release_date: input.release_date,
            executor: input.executor,
            status: input.status.unwrap_or_default(),
            notes: input.notes,
            completion_date: input.completion_date,
            time_taken_hours: input.time_taken_hours,
            defects_raised: String::new(),
            defect_details: String::new(),
            completion_notes: input.completion_notes,
            defects: input.defects,
            created_at: now,
            updated_at: now,
        };
        lifecycle::sync_derived_fields(&mut release);
        lifecycle::validate(&release)?;

        releases.push(release.clone());
        store.save(RELEASES, &releases).await?;

        tracing::info!(
            id = release.id,
            account = %release.account_name,
            status = release.status.as_str(),
            "release created"
        );
        Ok(release)
    }

    pub async fn update(
        store: &Store,
        id: DbId,
        input: UpdateRelease,
    ) -> Result<Release, RepoError> {
        check_references(store, &input.account_name, &input.release_version).await?;

        let mut releases: Vec<Release> = store.load(RELEASES).await;
        let Some(index) = releases.iter().position(|r| r.id == id) else {
            return Err(CoreError::NotFound {
                entity: "Release",
                id,
            }
            .into());
        };

        let release = &mut releases[index];
        release.account_name = input.account_name;
        release.release_version = input.release_version;
        release.product = input.product;
        release.environment = input.environment;
        release.release_date = input.release_date;
        release.executor = input.executor;
        release.status = input.status;
        release.notes = input.notes;
        release.completion_date = input.completion_date;
        release.time_taken_hours = input.time_taken_hours;
        release.completion_notes = input.completion_notes;
        release.defects = input.defects;
        release.updated_at = Utc::now();
        lifecycle::sync_derived_fields(release);
        lifecycle::validate(release)?;
        let updated = release.clone();

        store.save(RELEASES, &releases).await?;
        tracing::info!(id, status = updated.status.as_str(), "release updated");
        Ok(updated)
    }

    /// Delete a release. No reference guard: nothing points at a release.
    pub async fn delete(store: &Store, id: DbId) -> Result<(), RepoError> {
        let mut releases: Vec<Release> = store.load(RELEASES).await;

        let Some(index) = releases.iter().position(|r| r.id == id) else {
            return Err(CoreError::NotFound {
                entity: "Release",
                id,
            }
            .into());
        };

        releases.remove(index);
        store.save(RELEASES, &releases).await?;
        tracing::info!(id, "release deleted");
        Ok(())
    }
}

/// Application-layer referential integrity: the account must exist, and a
/// non-empty release version must name an existing version. References are
/// matched verbatim, the same way the delete guards compare them.
async fn check_references(
    store: &Store,
    account_name: &str,
    release_version: &str,
) -> Result<(), CoreError> {
    let accounts: Vec<Account> = store.load(ACCOUNTS).await;
    if !accounts.iter().any(|a| a.name == account_name) {
        return Err(CoreError::Validation(format!(
            "account '{account_name}' does not exist"
        )));
    }

    if !release_version.is_empty() {
        let versions: Vec<ReleaseVersion> = store.load(RELEASE_VERSIONS).await;
        if !versions.iter().any(|v| v.name == release_version) {
            return Err(CoreError::Validation(format!(
                "release version '{release_version}' does not exist"
            )));
        }
    }
    Ok(())
}
