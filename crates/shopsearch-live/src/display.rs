use serde::Serialize;

use shopsearch_core::config::DisplaySettings;
use shopsearch_core::types::{Product, ProductId};

/// One rendered suggestion row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub id: ProductId,
    pub label: String,
    pub subtitle: String,
}

impl Suggestion {
    pub fn new(id: &ProductId, product: &Product, display: &DisplaySettings) -> Self {
        Self {
            id: id.clone(),
            label: product.display_name().to_string(),
            subtitle: product.subtitle(&display.currency_symbol),
        }
    }
}

/// The product a user picked from the suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub id: ProductId,
}

impl Selection {
    /// Navigation target, e.g. `/product/42`.
    pub fn path(&self, display: &DisplaySettings) -> String {
        format!("{}/{}", display.product_route.trim_end_matches('/'), self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_joins_route_and_id() {
        let selection = Selection { id: ProductId::from(42) };
        assert_eq!(selection.path(&DisplaySettings::default()), "/product/42");
        let display = DisplaySettings { product_route: "/p/".into(), ..DisplaySettings::default() };
        assert_eq!(selection.path(&display), "/p/42");
    }
}
