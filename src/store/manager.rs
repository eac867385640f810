//! Project bookkeeping on top of the project store.

use std::rc::Rc;

use serde_json::Value;
use tracing::{info, warn};

use super::{ProjectStore, StoreError, StoreResult};
use crate::project::{
    ObserverId, ObserverRegistry, Project, ProjectObserver, ProjectSnapshot, PropertyName,
    PropertyValue,
};

/// Receives a callback when projects are added to or deleted from a manager.
pub trait ProjectManagerObserver {
    fn project_added(&self, name: &str);
    fn project_deleted(&self, name: &str);
}

/// Writes every changed project property to the store.
#[derive(Debug, Clone)]
pub struct PersistenceObserver {
    store: Rc<ProjectStore>,
}

impl PersistenceObserver {
    pub fn new(store: Rc<ProjectStore>) -> Self {
        Self { store }
    }

    fn save(&self, project: &Project, property: PropertyName) -> StoreResult<()> {
        let key = self.store.keys().property(property, project.name());
        self.store.set(&key, &project.property_json(property)?)
    }
}

impl ProjectObserver for PersistenceObserver {
    fn project_property_changed(&self, project: &Project, property: PropertyName) {
        if let Err(e) = self.save(project, property) {
            warn!(project = %project.name(), %property, error = %e, "failed to persist project property");
        }
    }
}

/// Creates, opens, imports and deletes stored projects.
///
/// Projects handed out by the manager carry a [`PersistenceObserver`], so
/// every later change is written back to the store.
#[derive(Debug)]
pub struct ProjectManager {
    store: Rc<ProjectStore>,
    projects: Vec<String>,
    observers: ObserverRegistry<dyn ProjectManagerObserver>,
}

impl ProjectManager {
    /// Load the project list from `store`.
    pub fn open(store: Rc<ProjectStore>) -> StoreResult<Self> {
        let projects = store
            .get::<Vec<String>>(&store.keys().projects())?
            .unwrap_or_default();
        Ok(Self {
            store,
            projects,
            observers: ObserverRegistry::default(),
        })
    }

    pub fn store(&self) -> &Rc<ProjectStore> {
        &self.store
    }

    // =========================================================================
    // Observers
    // =========================================================================

    pub fn register_observer(&mut self, observer: Rc<dyn ProjectManagerObserver>) -> ObserverId {
        self.observers.register(observer)
    }

    pub fn unregister_observer(&mut self, id: ObserverId) -> bool {
        self.observers.unregister(id)
    }

    /// An observer that persists changes of a project to this manager's store.
    pub fn persistence_observer(&self) -> Rc<dyn ProjectObserver> {
        Rc::new(PersistenceObserver::new(Rc::clone(&self.store)))
    }

    // =========================================================================
    // Project list
    // =========================================================================

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    /// Project names in creation order.
    pub fn project_names(&self) -> &[String] {
        &self.projects
    }

    pub fn project_exists(&self, name: &str) -> bool {
        self.projects.iter().any(|p| p == name)
    }

    fn save_project_list(&self) -> StoreResult<()> {
        self.store.set(&self.store.keys().projects(), &self.projects)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Create and store an empty project.
    pub fn new_project(&mut self, name: &str) -> StoreResult<Project> {
        if self.project_exists(name) {
            return Err(StoreError::ProjectExists(name.to_string()));
        }

        let mut project = Project::new(name);
        self.add_project(&project)?;
        project.register_observer(self.persistence_observer());
        Ok(project)
    }

    /// Add `project` to the project list and store all of its properties.
    pub fn add_project(&mut self, project: &Project) -> StoreResult<()> {
        let name = project.name().to_string();
        if self.project_exists(&name) {
            return Err(StoreError::ProjectExists(name));
        }

        self.projects.push(name.clone());
        self.save_project_list()?;

        for property in PropertyName::ALL {
            let key = self.store.keys().property(property, &name);
            self.store.set(&key, &project.property_json(property)?)?;
        }

        info!(project = %name, "added project");
        for observer in self.observers.targets(None) {
            observer.project_added(&name);
        }
        Ok(())
    }

    /// Load a stored project.
    ///
    /// Properties are loaded in [`PropertyName::ALL`] order, so a stored
    /// project that was left inconsistent is repaired on the way in. The
    /// persistence observer is attached first, so the repairs are stored too.
    /// The listed name is kept; the stored name record is not read.
    pub fn open_project(&self, name: &str) -> StoreResult<Project> {
        if !self.project_exists(name) {
            return Err(StoreError::UnknownProject(name.to_string()));
        }

        let mut project = Project::new(name);
        project.register_observer(self.persistence_observer());

        for property in PropertyName::ALL {
            if property == PropertyName::Name {
                continue;
            }
            let key = self.store.keys().property(property, name);
            let value = self.store.get::<Value>(&key)?.unwrap_or(Value::Null);
            project.set_property(PropertyValue::from_json(property, value)?, None);
        }

        Ok(project)
    }

    /// Remove a project from the list and delete its stored properties.
    ///
    /// Returns false if no such project was listed.
    pub fn delete_project(&mut self, name: &str) -> StoreResult<bool> {
        let Some(index) = self.projects.iter().position(|p| p == name) else {
            return Ok(false);
        };

        self.projects.remove(index);
        self.save_project_list()?;

        for property in PropertyName::ALL {
            self.store.delete(&self.store.keys().property(property, name))?;
        }

        info!(project = %name, "deleted project");
        for observer in self.observers.targets(None) {
            observer.project_deleted(name);
        }
        Ok(true)
    }

    /// Delete every stored project. Returns the number of records removed.
    pub fn delete_all(&mut self) -> StoreResult<usize> {
        let prefix = format!("{}.", self.store.keys().prefix());
        let removed = self.store.delete_prefix(&prefix)?;
        self.projects.clear();
        info!(removed, "deleted all projects");
        Ok(removed)
    }

    // =========================================================================
    // Import / export
    // =========================================================================

    /// The whole project as a JSON document.
    pub fn project_json(&self, project: &Project) -> StoreResult<String> {
        Ok(project.snapshot().to_json_string()?)
    }

    /// Import a project document and store it.
    ///
    /// If the name is taken, `.1`, `.2`, ... is appended until it is unique.
    pub fn load_project_json(&mut self, json: &str) -> StoreResult<Project> {
        let mut snapshot = ProjectSnapshot::from_json_str(json)?;
        snapshot.name = self.unique_name(&snapshot.name);

        let mut project = Project::from_snapshot(snapshot);
        self.add_project(&project)?;
        project.register_observer(self.persistence_observer());
        Ok(project)
    }

    fn unique_name(&self, name: &str) -> String {
        let mut candidate = name.to_string();
        let mut suffix = 1;
        while self.project_exists(&candidate) {
            candidate = format!("{}.{}", name, suffix);
            suffix += 1;
        }
        candidate
    }
}
