//! In-memory repository used by tests and dry runs.

use super::{RepoResult, Repository};
use crate::model::Entity;
use std::cell::RefCell;

/// Vec-backed repository with the same semantics as `XmlRepository`.
#[derive(Debug)]
pub struct InMemoryRepository<E> {
    items: RefCell<Vec<E>>,
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            items: RefCell::new(Vec::new()),
        }
    }
}

impl<E: Entity> InMemoryRepository<E> {
    /// Creates a repository pre-populated with `items`.
    ///
    /// Later duplicates of an id are dropped, matching `save` semantics.
    pub fn with_items(items: Vec<E>) -> Self {
        let repo = Self::new();
        {
            let mut stored = repo.items.borrow_mut();
            for item in items {
                if !stored.iter().any(|existing| existing.id() == item.id()) {
                    stored.push(item);
                }
            }
        }
        repo
    }
}

impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    fn find_all(&self) -> RepoResult<Vec<E>> {
        Ok(self.items.borrow().clone())
    }

    fn find_one(&self, id: &str) -> RepoResult<Option<E>> {
        Ok(self
            .items
            .borrow()
            .iter()
            .find(|item| item.id() == id)
            .cloned())
    }

    fn save(&self, entity: &E) -> RepoResult<Option<E>> {
        let mut items = self.items.borrow_mut();
        if let Some(existing) = items.iter().find(|item| item.id() == entity.id()) {
            return Ok(Some(existing.clone()));
        }
        items.push(entity.clone());
        Ok(None)
    }

    fn update(&self, entity: &E) -> RepoResult<Option<E>> {
        let mut items = self.items.borrow_mut();
        Ok(items
            .iter_mut()
            .find(|item| item.id() == entity.id())
            .map(|slot| std::mem::replace(slot, entity.clone())))
    }

    fn delete(&self, id: &str) -> RepoResult<Option<E>> {
        let mut items = self.items.borrow_mut();
        Ok(items
            .iter()
            .position(|item| item.id() == id)
            .map(|index| items.remove(index)))
    }
}
