use crate::types::{TagOracle, VaultFile};
use ftags_protocol::Layer;
use itertools::Itertools;
use std::collections::HashSet;

/// Ancestor tags of a file grouped by breadth-first distance.
///
/// A path appears in at most one layer. Deeper ancestors than [`Layer::Fourth`]
/// are never computed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayeredAncestors {
    pub first: Vec<VaultFile>,
    pub second: Vec<VaultFile>,
    pub third: Vec<VaultFile>,
    pub fourth: Vec<VaultFile>,
}

impl LayeredAncestors {
    pub fn layer(&self, layer: Layer) -> &[VaultFile] {
        match layer {
            Layer::First => &self.first,
            Layer::Second => &self.second,
            Layer::Third => &self.third,
            Layer::Fourth => &self.fourth,
        }
    }

    /// All ancestors, nearest layer first
    pub fn iter(&self) -> impl Iterator<Item = (Layer, &VaultFile)> {
        Layer::ALL
            .into_iter()
            .flat_map(move |layer| self.layer(layer).iter().map(move |file| (layer, file)))
    }

    pub fn len(&self) -> usize {
        self.first.len() + self.second.len() + self.third.len() + self.fourth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }
}

/// Breadth-first walk over the "parent of" relation.
///
/// Files under the inbox path are leaves: they keep their own layer but their
/// parents are never explored.
pub struct AncestorExpander<'a, O: TagOracle + ?Sized> {
    oracle: &'a O,
    inbox: &'a str,
    visited: HashSet<String>,
}

impl<'a, O: TagOracle + ?Sized> AncestorExpander<'a, O> {
    pub fn new(oracle: &'a O, inbox: &'a str) -> Self {
        Self {
            oracle,
            inbox,
            visited: HashSet::new(),
        }
    }

    pub fn expand(mut self, origin: &VaultFile) -> LayeredAncestors {
        let first: Vec<VaultFile> = self
            .oracle
            .direct_parents(origin)
            .into_iter()
            .filter(|file| self.visited.insert(file.path.clone()))
            .collect();
        let second = self.next_layer(&first);
        let third = self.next_layer(&second);
        let fourth = self.next_layer(&third);

        LayeredAncestors {
            first,
            second,
            third,
            fourth,
        }
    }

    /// Parents of `layer`, deduplicated in first-seen order, minus anything
    /// already placed in an earlier layer.
    fn next_layer(&mut self, layer: &[VaultFile]) -> Vec<VaultFile> {
        let oracle = self.oracle;
        let inbox = self.inbox;
        let visited = &mut self.visited;
        layer
            .iter()
            .filter(|file| !file.path.starts_with(inbox))
            .flat_map(|file| oracle.direct_parents(file))
            .unique_by(|file| file.path.clone())
            .filter(|file| visited.insert(file.path.clone()))
            .collect()
    }
}

/// Layered ancestors of `origin`, see [`AncestorExpander`]
pub fn expand_ancestors<O: TagOracle + ?Sized>(
    oracle: &O,
    origin: &VaultFile,
    inbox: &str,
) -> LayeredAncestors {
    AncestorExpander::new(oracle, inbox).expand(origin)
}
