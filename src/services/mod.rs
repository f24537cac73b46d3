//! Business logic services

pub mod auth;
pub mod catalog;
pub mod loans;

use crate::config::{AuthConfig, LoansConfig};
use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig, loans_config: LoansConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            catalog: catalog::CatalogService::new(repository.clone()),
            loans: loans::LoansService::new(repository, loans_config),
        }
    }
}
