//! The set of disciplines a server offers.
//!
//! A [`Discipline`] pairs a catalog with the policy that resolves it. The
//! [`DisciplineRegistry`] is built once at startup and then only read; it
//! hands out a [`ResolutionEngine`] per attempt.

use std::collections::BTreeMap;

use artisan_types::DisciplineId;
use tracing::info;

use crate::catalog::CraftCatalog;
use crate::config::CraftingConfig;
use crate::error::RegistryError;
use crate::policy::CraftSystemPolicy;
use crate::resolution::ResolutionEngine;

/// A catalog and the policy that resolves it.
#[derive(Debug)]
pub struct Discipline {
    catalog: CraftCatalog,
    policy: Box<dyn CraftSystemPolicy>,
}

impl Discipline {
    /// Pair a catalog with a policy. Both must name the same discipline.
    pub fn new(catalog: CraftCatalog, policy: Box<dyn CraftSystemPolicy>) -> Result<Self, RegistryError> {
        let declared = policy.profile().discipline;
        if catalog.discipline() != declared {
            return Err(RegistryError::MismatchedDiscipline {
                catalog: catalog.discipline(),
                policy: declared,
            });
        }
        Ok(Self { catalog, policy })
    }

    /// Which discipline this is.
    pub fn id(&self) -> DisciplineId {
        self.catalog.discipline()
    }

    /// The recipe catalog.
    pub const fn catalog(&self) -> &CraftCatalog {
        &self.catalog
    }

    /// The resolution policy.
    pub fn policy(&self) -> &dyn CraftSystemPolicy {
        self.policy.as_ref()
    }

    /// An engine for this discipline.
    pub fn engine(&self, settings: &CraftingConfig) -> ResolutionEngine<'_> {
        ResolutionEngine::new(&self.catalog, self.policy.as_ref(), settings.clone())
    }
}

/// Every registered discipline, keyed by id.
#[derive(Debug, Default)]
pub struct DisciplineRegistry {
    disciplines: BTreeMap<DisciplineId, Discipline>,
}

impl DisciplineRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a discipline. Each id may be registered once.
    pub fn register(&mut self, discipline: Discipline) -> Result<(), RegistryError> {
        let id = discipline.id();
        if self.disciplines.contains_key(&id) {
            return Err(RegistryError::DuplicateDiscipline(id));
        }
        info!(
            discipline = %id,
            recipes = discipline.catalog().len(),
            "discipline registered"
        );
        self.disciplines.insert(id, discipline);
        Ok(())
    }

    /// Look up a discipline.
    pub fn get(&self, id: DisciplineId) -> Option<&Discipline> {
        self.disciplines.get(&id)
    }

    /// Look up a discipline that must exist.
    pub fn require(&self, id: DisciplineId) -> Result<&Discipline, RegistryError> {
        self.get(id).ok_or(RegistryError::UnknownDiscipline(id))
    }

    /// An engine for a registered discipline.
    pub fn engine(&self, id: DisciplineId, settings: &CraftingConfig) -> Result<ResolutionEngine<'_>, RegistryError> {
        Ok(self.require(id)?.engine(settings))
    }

    /// Registered ids in order.
    pub fn ids(&self) -> impl Iterator<Item = DisciplineId> + '_ {
        self.disciplines.keys().copied()
    }

    /// Registered disciplines in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Discipline> {
        self.disciplines.values()
    }

    /// Number of registered disciplines.
    pub fn len(&self) -> usize {
        self.disciplines.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.disciplines.is_empty()
    }
}
