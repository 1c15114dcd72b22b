//! Seed documents for the in-memory backend.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    Architecture, ClassType, ClassTypeCategory, CodingRule, Convention, Layer, Module, TechStack,
};

/// A JSON document listing catalog rows to preload.
///
/// ```json
/// {
///   "architectures": [{ "id": 1, "techStackId": 1, "name": "Hexagonal", "patternType": "HEXAGONAL" }],
///   "layers": [{ "id": 1, "architectureId": 1, "code": "DOM", "name": "Domain" }]
/// }
/// ```
///
/// Missing lists are treated as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogSeed {
    /// Tech stacks.
    pub tech_stacks: Vec<TechStack>,
    /// Architectures.
    pub architectures: Vec<Architecture>,
    /// Layers.
    pub layers: Vec<Layer>,
    /// Modules.
    pub modules: Vec<Module>,
    /// Conventions.
    pub conventions: Vec<Convention>,
    /// Coding rules.
    pub coding_rules: Vec<CodingRule>,
    /// Class type categories.
    pub class_type_categories: Vec<ClassTypeCategory>,
    /// Class types.
    pub class_types: Vec<ClassType>,
}

impl CatalogSeed {
    /// Returns the total number of rows.
    pub fn len(&self) -> usize {
        self.tech_stacks.len()
            + self.architectures.len()
            + self.layers.len()
            + self.modules.len()
            + self.conventions.len()
            + self.coding_rules.len()
            + self.class_type_categories.len()
            + self.class_types.len()
    }

    /// Returns true if the seed holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
