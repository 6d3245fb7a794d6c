//! Tag-to-view factories for external tree builders.
//!
//! A markup collaborator builds trees by looking tag names up in a
//! [`Registry`] and attaching the produced views through the ordinary
//! construction API, so a parsed tree and a directly-built tree of equal
//! inputs resolve identical frames. The registry is an explicitly
//! constructed, caller-owned object; there is no process-wide registration.

use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    view::View,
};

/// A factory producing a fresh view configuration for a tag.
pub type Factory = Box<dyn Fn() -> View>;

/// A caller-owned mapping from external tag names to view factories.
#[derive(Default)]
pub struct Registry {
    /// Factories by tag name.
    factories: HashMap<String, Factory>,
}

impl Registry {
    /// Construct an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for a tag. Registering a tag twice is a
    /// structural mistake and fails fast.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        factory: impl Fn() -> View + 'static,
    ) -> Result<()> {
        let tag = tag.into();
        if self.factories.contains_key(&tag) {
            return Err(Error::Invalid(format!("duplicate tag: {tag}")));
        }
        self.factories.insert(tag, Box::new(factory));
        Ok(())
    }

    /// Produce a view for a tag, stamping the tag name onto it. An
    /// unregistered tag is `None`, not an error.
    pub fn create(&self, tag: &str) -> Option<View> {
        let factory = self.factories.get(tag)?;
        let mut view = factory();
        if view.tag.is_none() {
            view.tag = Some(tag.to_string());
        }
        Some(view)
    }

    /// Whether a tag is registered.
    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// The registered tag names, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}
