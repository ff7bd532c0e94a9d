//! Registration lookup used by login, launch and deep linking.

use async_trait::async_trait;

use cyclops_core::result::AppResult;
use cyclops_database::RegistrationRepository;
use cyclops_entity::registration::LtiRegistration;

/// Source of platform registrations.
#[async_trait]
pub trait RegistrationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find the registration for an issuer. Without a client ID, only an
    /// issuer with exactly one registration resolves.
    async fn find_registration(
        &self,
        iss: &str,
        client_id: Option<&str>,
    ) -> AppResult<Option<LtiRegistration>>;

    /// Find a registration by its row ID.
    async fn find_registration_by_id(&self, id: i64) -> AppResult<Option<LtiRegistration>>;
}

#[async_trait]
impl RegistrationStore for RegistrationRepository {
    async fn find_registration(
        &self,
        iss: &str,
        client_id: Option<&str>,
    ) -> AppResult<Option<LtiRegistration>> {
        match client_id {
            Some(client_id) => self.find_by_issuer(iss, client_id).await,
            None => self.find_unique_by_issuer(iss).await,
        }
    }

    async fn find_registration_by_id(&self, id: i64) -> AppResult<Option<LtiRegistration>> {
        self.find_by_id(id).await
    }
}
