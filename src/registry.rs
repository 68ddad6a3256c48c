//! Candidate registry for explicit benchmark registration.
//!
//! Candidates are registered once at startup and the registry is read-only
//! afterwards, so it can be shared with every isolation unit through an `Arc`.

use crate::error::RegistryError;
use std::sync::Arc;

/// The callable measured by the driver. Must be pure: same result every call.
pub type Thunk = Arc<dyn Fn() -> i32 + Send + Sync>;

/// A named candidate operation.
#[derive(Clone)]
pub struct Candidate {
    pub name: &'static str,
    /// Group the candidate belongs to (e.g. "locals", "subtracter")
    pub group: &'static str,
    pub description: &'static str,
    thunk: Thunk,
}

impl Candidate {
    pub fn new<F>(name: &'static str, group: &'static str, description: &'static str, f: F) -> Self
    where
        F: Fn() -> i32 + Send + Sync + 'static,
    {
        Self {
            name,
            group,
            description,
            thunk: Arc::new(f),
        }
    }

    /// Run the candidate once.
    #[inline(always)]
    pub fn invoke(&self) -> i32 {
        (self.thunk)()
    }
}

impl std::fmt::Debug for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidate")
            .field("name", &self.name)
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

/// Ordered set of uniquely named candidates.
#[derive(Debug, Default, Clone)]
pub struct CandidateRegistry {
    candidates: Vec<Candidate>,
    /// Set by `build_registry`, cleared by any later registration. Only a
    /// built-in registry matches what a re-executed binary measures.
    builtin: bool,
}

impl CandidateRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
            builtin: false,
        }
    }

    /// True when the registry holds exactly the candidates of
    /// [`build_registry`].
    pub fn is_builtin(&self) -> bool {
        self.builtin
    }

    /// Register a thunk under `name` in the default group.
    pub fn register<F>(&mut self, name: &'static str, thunk: F) -> Result<(), RegistryError>
    where
        F: Fn() -> i32 + Send + Sync + 'static,
    {
        self.add(Candidate::new(name, "default", "", thunk))
    }

    /// Register a fully described candidate. The first registration of a
    /// name wins; later ones are rejected.
    pub fn add(&mut self, candidate: Candidate) -> Result<(), RegistryError> {
        if self.find(candidate.name).is_some() {
            return Err(RegistryError::Duplicate(candidate.name.to_string()));
        }
        self.candidates.push(candidate);
        self.builtin = false;
        Ok(())
    }

    /// Execute the named candidate and return its result.
    pub fn invoke(&self, name: &str) -> Result<i32, RegistryError> {
        self.find(name)
            .map(Candidate::invoke)
            .ok_or_else(|| RegistryError::Unknown(name.to_string()))
    }

    /// Find candidate by name
    pub fn find(&self, name: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.name == name)
    }

    /// All candidates in registration order
    pub fn all(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.candidates.iter().map(|c| c.name).collect()
    }

    /// Candidates whose name contains `pattern`, in registration order.
    pub fn filtered(&self, pattern: &str) -> Vec<&Candidate> {
        self.candidates
            .iter()
            .filter(|c| c.name.contains(pattern))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Invoke every candidate twice and check both calls agree.
    pub fn verify(&self) -> Result<(), RegistryError> {
        for candidate in &self.candidates {
            let first = candidate.invoke();
            let second = candidate.invoke();
            if first != second {
                return Err(RegistryError::Nondeterministic {
                    name: candidate.name.to_string(),
                    first,
                    second,
                });
            }
        }
        Ok(())
    }
}

/// Build the default registry with all candidate groups
pub fn build_registry() -> Result<CandidateRegistry, RegistryError> {
    let mut registry = CandidateRegistry::new();

    let groups: [fn(&mut CandidateRegistry) -> Result<(), RegistryError>; 3] = [
        crate::finality::locals::register,
        crate::finality::params::register,
        crate::finality::subtracter::register,
    ];
    for register in groups {
        register(&mut registry)?;
    }

    registry.builtin = true;
    Ok(registry)
}
