// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named productions, looked up by their stable name.

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::production::Production;

/// An explicit catalogue of productions.
///
/// Built once by the caller and passed around by reference; there is no
/// global registration.
#[derive(Debug, Clone, Default)]
pub struct ProductionRegistry {
    productions: Vec<Production>,
    by_name: FxHashMap<String, usize>,
}

impl ProductionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every production of the grammar.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for production in Production::all() {
            registry.register(production);
        }
        registry
    }

    /// Adds a production under its name. Re-registering a name replaces the
    /// earlier entry in place.
    pub fn register(&mut self, production: Production) {
        let name = production.name();
        match self.by_name.get(&name) {
            Some(&index) => self.productions[index] = production,
            None => {
                self.by_name.insert(name, self.productions.len());
                self.productions.push(production);
            }
        }
    }

    /// Returns the production registered under `name`.
    pub fn get(&self, name: &str) -> Result<&Production> {
        self.by_name
            .get(name)
            .and_then(|&index| self.productions.get(index))
            .ok_or_else(|| Error::UnknownProduction(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Productions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Production> + '_ {
        self.productions.iter()
    }

    /// Names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.productions.iter().map(Production::name).collect()
    }

    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::production::EdgeKind;
    use meshgram_hypergraph::HyperTag;

    #[test]
    fn standard_registry_resolves_names() {
        let registry = ProductionRegistry::standard();
        assert_eq!(registry.len(), 14);

        assert_eq!(
            *registry.get("mark-hexagon").unwrap(),
            Production::Mark { element: HyperTag::Hexagon }
        );
        assert_eq!(
            *registry.get("split-shared-edge").unwrap(),
            Production::Split { kind: EdgeKind::Shared }
        );
        assert!(registry.contains("refine-quad"));
    }

    #[test]
    fn unknown_name_is_an_error() {
        let registry = ProductionRegistry::standard();
        match registry.get("P4") {
            Err(Error::UnknownProduction(name)) => assert_eq!(name, "P4"),
            other => panic!("expected UnknownProduction, got {:?}", other),
        }
    }

    #[test]
    fn reregistering_keeps_position() {
        let mut registry = ProductionRegistry::new();
        assert!(registry.is_empty());
        registry.register(Production::Split { kind: EdgeKind::Boundary });
        registry.register(Production::Refine { element: HyperTag::Quad });
        registry.register(Production::Split { kind: EdgeKind::Boundary });

        assert_eq!(registry.names(), vec!["split-boundary-edge", "refine-quad"]);
        assert_eq!(registry.iter().count(), 2);
    }
}
