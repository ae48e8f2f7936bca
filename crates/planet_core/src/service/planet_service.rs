//! Planet use-case service.
//!
//! # Responsibility
//! - Provide create/get/list/remove entry points for boundary callers.
//! - Build list filters once and delegate persistence to the repository port.
//!
//! # Invariants
//! - Repository errors propagate unchanged; no translation or suppression.
//! - Read misses are `Ok(None)` or an empty list, never errors.
//! - The service never checks name existence before creating.

use crate::model::planet::{Planet, PlanetId};
use crate::query::filter::{build_filter, MatchMode, PlanetFilter};
use crate::repo::planet_repo::{PlanetRepository, RepoResult};
use log::{debug, info, warn};

/// Use-case service wrapper for planet operations.
pub struct PlanetService<R: PlanetRepository> {
    repo: R,
}

impl<R: PlanetRepository> PlanetService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new planet.
    ///
    /// Validation and uniqueness failures come from the repository as-is.
    pub fn create(&self, planet: &Planet) -> RepoResult<Planet> {
        match self.repo.save(planet) {
            Ok(stored) => {
                info!(
                    "event=planet_create module=service status=ok id={}",
                    stored.id().unwrap_or_default()
                );
                Ok(stored)
            }
            Err(err) => {
                warn!(
                    "event=planet_create module=service status=error error_kind={:?}",
                    err.kind()
                );
                Err(err)
            }
        }
    }

    pub fn get(&self, id: PlanetId) -> RepoResult<Option<Planet>> {
        self.repo.find_by_id(id)
    }

    pub fn get_by_name(&self, name: &str) -> RepoResult<Option<Planet>> {
        self.repo.find_by_name(name)
    }

    /// Lists planets by optional terrain and climate.
    ///
    /// Parameter order here is `(terrain, climate)`; the filter builder takes
    /// `(climate, terrain)`.
    pub fn list(&self, terrain: Option<&str>, climate: Option<&str>) -> RepoResult<Vec<Planet>> {
        self.list_with_mode(terrain, climate, MatchMode::Contains)
    }

    /// Same as [`Self::list`] with an explicit comparison mode.
    pub fn list_with_mode(
        &self,
        terrain: Option<&str>,
        climate: Option<&str>,
        mode: MatchMode,
    ) -> RepoResult<Vec<Planet>> {
        let filter = build_filter(climate, terrain).with_mode(mode);
        self.list_by_filter(&filter)
    }

    /// Lists planets matching a planet-shaped template.
    pub fn list_by_template(&self, template: &Planet) -> RepoResult<Vec<Planet>> {
        self.list_by_filter(&PlanetFilter::from_template(template))
    }

    fn list_by_filter(&self, filter: &PlanetFilter) -> RepoResult<Vec<Planet>> {
        let planets = self.repo.find_by_filter(filter)?;
        debug!(
            "event=planet_list module=service status=ok unconstrained={} count={}",
            filter.is_unconstrained(),
            planets.len()
        );
        Ok(planets)
    }

    /// Hard-deletes a planet by id.
    ///
    /// A missing id is reported as `RepoError::NotFound`, not ignored.
    pub fn remove(&self, id: PlanetId) -> RepoResult<()> {
        self.repo.delete_by_id(id)?;
        info!("event=planet_remove module=service status=ok id={id}");
        Ok(())
    }
}
