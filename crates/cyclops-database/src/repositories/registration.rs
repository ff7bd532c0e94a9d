//! LTI registration repository implementation.

use sqlx::PgPool;

use cyclops_core::error::{AppError, ErrorKind};
use cyclops_core::result::AppResult;
use cyclops_entity::registration::{LtiRegistration, NewRegistration};

/// Repository for LTI platform registrations.
#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    /// Create a new registration repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the registration for an issuer and client ID.
    pub async fn find_by_issuer(
        &self,
        iss: &str,
        client_id: &str,
    ) -> AppResult<Option<LtiRegistration>> {
        sqlx::query_as::<_, LtiRegistration>(
            "SELECT * FROM lti_registrations WHERE iss = $1 AND client_id = $2",
        )
        .bind(iss)
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find LTI registration", e)
        })
    }

    /// Find the only registration for an issuer, used when the platform
    /// omits `client_id` from the login request.
    ///
    /// Returns `None` when the issuer has zero or several registrations.
    pub async fn find_unique_by_issuer(&self, iss: &str) -> AppResult<Option<LtiRegistration>> {
        let mut rows = sqlx::query_as::<_, LtiRegistration>(
            "SELECT * FROM lti_registrations WHERE iss = $1 ORDER BY id LIMIT 2",
        )
        .bind(iss)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find LTI registration", e)
        })?;

        if rows.len() == 1 { Ok(rows.pop()) } else { Ok(None) }
    }

    /// Find a registration by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<LtiRegistration>> {
        sqlx::query_as::<_, LtiRegistration>("SELECT * FROM lti_registrations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find LTI registration", e)
            })
    }

    /// List all registrations.
    pub async fn find_all(&self) -> AppResult<Vec<LtiRegistration>> {
        sqlx::query_as::<_, LtiRegistration>("SELECT * FROM lti_registrations ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list LTI registrations", e)
            })
    }

    /// Insert a new registration.
    pub async fn create(&self, data: &NewRegistration) -> AppResult<LtiRegistration> {
        sqlx::query_as::<_, LtiRegistration>(
            "INSERT INTO lti_registrations \
             (iss, client_id, auth_login_url, auth_token_url, key_set_url, \
              private_key, public_key, public_jwk, deployment_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(&data.iss)
        .bind(&data.client_id)
        .bind(&data.auth_login_url)
        .bind(&data.auth_token_url)
        .bind(&data.key_set_url)
        .bind(&data.private_key)
        .bind(&data.public_key)
        .bind(&data.public_jwk)
        .bind(&data.deployment_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::with_source(
                ErrorKind::Validation,
                format!(
                    "A registration for issuer '{}' and client '{}' already exists",
                    data.iss, data.client_id
                ),
                e,
            ),
            _ => AppError::with_source(ErrorKind::Database, "Failed to create LTI registration", e),
        })
    }

    /// Delete a registration. Returns `true` if a row was removed.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM lti_registrations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete LTI registration", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
