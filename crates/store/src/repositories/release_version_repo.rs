use chrono::Utc;
use relplan_core::error::CoreError;
use relplan_core::model::{
    CreateReleaseVersion, Feature, FeatureInput, Release, ReleaseVersion, UpdateReleaseVersion,
};
use relplan_core::types::DbId;

use crate::repositories::{next_id, RepoError};
use crate::store::{Store, RELEASES, RELEASE_VERSIONS};

/// CRUD for the release version collection.
///
/// Same rules as accounts: uppercase names, case-insensitive uniqueness,
/// delete blocked while a release references the version by name.
pub struct ReleaseVersionRepo;

impl ReleaseVersionRepo {
    pub async fn list(store: &Store) -> Vec<ReleaseVersion> {
        store.load(RELEASE_VERSIONS).await
    }

    pub async fn create(
        store: &Store,
        input: CreateReleaseVersion,
    ) -> Result<ReleaseVersion, RepoError> {
        let name = normalized_name(&input.name)?;
        let mut versions: Vec<ReleaseVersion> = store.load(RELEASE_VERSIONS).await;

        if versions.iter().any(|v| v.name.eq_ignore_ascii_case(&name)) {
            return Err(
                CoreError::DuplicateName(format!("release version '{name}' already exists")).into(),
            );
        }

        let version = ReleaseVersion {
            id: next_id(versions.iter().map(|v| v.id)),
            name,
            description: input.description,
            features: assign_feature_ids(input.features),
            created_at: Utc::now(),
            updated_at: None,
        };
        versions.push(version.clone());
        store.save(RELEASE_VERSIONS, &versions).await?;

        tracing::info!(id = version.id, name = %version.name, "release version created");
        Ok(version)
    }

    pub async fn update(
        store: &Store,
        id: DbId,
        input: UpdateReleaseVersion,
    ) -> Result<ReleaseVersion, RepoError> {
        let name = normalized_name(&input.name)?;
        let mut versions: Vec<ReleaseVersion> = store.load(RELEASE_VERSIONS).await;

        let Some(index) = versions.iter().position(|v| v.id == id) else {
            return Err(CoreError::NotFound {
                entity: "ReleaseVersion",
                id,
            }
            .into());
        };

        if versions
            .iter()
            .any(|v| v.id != id && v.name.eq_ignore_ascii_case(&name))
        {
            return Err(
                CoreError::DuplicateName(format!("release version '{name}' already exists")).into(),
            );
        }

        let version = &mut versions[index];
        version.name = name;
        version.description = input.description;
        version.features = assign_feature_ids(input.features);
        version.updated_at = Some(Utc::now());
        let updated = version.clone();

        store.save(RELEASE_VERSIONS, &versions).await?;
        tracing::info!(id, name = %updated.name, "release version updated");
        Ok(updated)
    }

    pub async fn delete(store: &Store, id: DbId) -> Result<(), RepoError> {
        let mut versions: Vec<ReleaseVersion> = store.load(RELEASE_VERSIONS).await;

        let Some(index) = versions.iter().position(|v| v.id == id) else {
            return Err(CoreError::NotFound {
                entity: "ReleaseVersion",
                id,
            }
            .into());
        };

        let releases: Vec<Release> = store.load(RELEASES).await;
        if releases
            .iter()
            .any(|r| r.release_version == versions[index].name)
        {
            return Err(CoreError::InUse(format!(
                "release version '{}' is referenced by existing releases",
                versions[index].name
            ))
            .into());
        }

        let removed = versions.remove(index);
        store.save(RELEASE_VERSIONS, &versions).await?;
        tracing::info!(id, name = %removed.name, "release version deleted");
        Ok(())
    }
}

fn normalized_name(raw: &str) -> Result<String, CoreError> {
    let name = raw.trim().to_uppercase();
    if name.is_empty() {
        return Err(CoreError::Validation(
            "release version name must not be empty".to_string(),
        ));
    }
    Ok(name)
}

/// Keep client-generated feature ids; assign `now + index` to the rest,
/// matching the client's own timestamp-based scheme.
fn assign_feature_ids(features: Vec<FeatureInput>) -> Vec<Feature> {
    let base = Utc::now().timestamp_millis();
    features
        .into_iter()
        .enumerate()
        .map(|(index, f)| Feature {
            id: f.id.unwrap_or(base + index as DbId),
            name: f.name,
            description: f.description,
        })
        .collect()
}
