use serde::{Deserialize, Serialize};

use super::value_objects::{MenuItemId, Price};

// ============================================================================
// Menu Item - leaf or composite unit of sale
// ============================================================================
//
// A composite's price is cached once at construction from its children's
// prices. It is never recomputed, so later edits to a child do not reach
// an already-built composite. Descriptions, on the other hand, are always
// walked live through the resolver.
//
// Precondition: no composite may contain itself, directly or transitively.
// This is not checked.
//
// ============================================================================

/// Identity lookup used to follow child and order-line references.
///
/// Returns `None` once the referenced item has left the catalog.
pub trait ItemResolver {
    fn resolve(&self, id: MenuItemId) -> Option<&MenuItem>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum MenuItemKind {
    Base,
    Composite { children: Vec<MenuItemId> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    id: MenuItemId,
    name: String,
    price: Price,
    kind: MenuItemKind,
}

impl MenuItem {
    /// Leaf item with an authoritative price.
    pub fn base(name: impl Into<String>, price: impl Into<Price>) -> Self {
        Self {
            id: MenuItemId::new(),
            name: name.into(),
            price: price.into(),
            kind: MenuItemKind::Base,
        }
    }

    /// Composite item priced at the sum of its children's current prices.
    pub fn composite(name: impl Into<String>, children: &[&MenuItem]) -> Self {
        let price = children.iter().map(|child| child.resolve_price()).sum();

        Self {
            id: MenuItemId::new(),
            name: name.into(),
            price,
            kind: MenuItemKind::Composite {
                children: children.iter().map(|child| child.id).collect(),
            },
        }
    }

    pub fn id(&self) -> MenuItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &MenuItemKind {
        &self.kind
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.kind, MenuItemKind::Composite { .. })
    }

    /// Child references of a composite; empty for a leaf.
    pub fn children(&self) -> &[MenuItemId] {
        match &self.kind {
            MenuItemKind::Base => &[],
            MenuItemKind::Composite { children } => children,
        }
    }

    /// Stored price. Never walks children.
    pub fn resolve_price(&self) -> Price {
        self.price
    }

    pub fn set_price(&mut self, price: impl Into<Price>) {
        self.price = price.into();
    }

    /// Leaf: its own name. Composite: every child's description followed
    /// by `", "`, including after the last one.
    pub fn describe_ingredients<R>(&self, resolver: &R) -> String
    where
        R: ItemResolver + ?Sized,
    {
        match &self.kind {
            MenuItemKind::Base => self.name.clone(),
            MenuItemKind::Composite { children } => {
                let mut ingredients = String::new();
                for child_id in children {
                    match resolver.resolve(*child_id) {
                        Some(child) => {
                            ingredients.push_str(&child.describe_ingredients(resolver));
                            ingredients.push_str(", ");
                        }
                        None => {
                            tracing::debug!(
                                item = %self.name,
                                child_id = %child_id,
                                "Skipping ingredient no longer in catalog"
                            );
                        }
                    }
                }
                ingredients
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
