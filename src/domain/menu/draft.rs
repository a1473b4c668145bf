use super::catalog::Catalog;
use super::errors::CatalogError;
use super::item::MenuItem;
use super::value_objects::Price;

// ============================================================================
// Menu Item Draft - the admin form's name/price/ingredients triple
// ============================================================================

pub const INGREDIENT_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemDraft {
    pub name: String,
    pub price: Price,
    pub ingredients: Vec<String>,
}

impl MenuItemDraft {
    /// Split a `"A, B, C"` ingredient list. Empty segments are dropped.
    pub fn parse(name: impl Into<String>, price: impl Into<Price>, ingredients: &str) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            ingredients: split_names(ingredients),
        }
    }

    /// Zero or one ingredient builds a leaf at the draft price. More builds
    /// a composite from the named catalog items; its price comes from them
    /// and the draft price is ignored.
    pub fn build(&self, catalog: &Catalog) -> Result<MenuItem, CatalogError> {
        if self.ingredients.len() <= 1 {
            return Ok(MenuItem::base(self.name.clone(), self.price));
        }

        let children = self
            .ingredients
            .iter()
            .map(|name| {
                catalog
                    .get_by_name(name)
                    .ok_or_else(|| CatalogError::NotFound(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MenuItem::composite(self.name.clone(), &children))
    }
}

pub(crate) fn split_names(list: &str) -> Vec<String> {
    list.split(INGREDIENT_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
