use std::collections::BTreeMap;
use tracing::debug;

/// Name-keyed lookup of implementations of one capability
///
/// Registries are filled once during startup and only read afterwards.
pub struct Registry<T: ?Sized> {
  capability: &'static str,
  entries: BTreeMap<String, Box<T>>,
}

impl<T: ?Sized> Registry<T> {
  pub fn new(capability: &'static str) -> Self {
    Self { capability, entries: BTreeMap::new() }
  }

  /// Register `entry` under `name`, replacing any previous registration
  pub fn register(&mut self, name: impl Into<String>, entry: Box<T>) {
    let name = name.into();
    debug!(capability = self.capability, name = %name, "registered");
    self.entries.insert(name, entry);
  }

  pub fn get(&self, name: &str) -> Option<&T> {
    self.entries.get(name).map(|entry| entry.as_ref())
  }

  pub fn names(&self) -> Vec<&str> {
    self.entries.keys().map(String::as_str).collect()
  }
}
