//! Domain types shared by the catalog index, the query engine and the live catalog.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Stable product identity, used for navigation and as the display key.
///
/// Catalog feeds carry ids as either strings or numbers; both are kept in
/// their textual form so `7` and `"7"` name the same product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `None` for anything that cannot identify a product: null, blank
    /// strings, booleans, arrays and objects.
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

macro_rules! numeric_product_id {
    ($($t:ty),*) => {$(
        impl From<$t> for ProductId {
            fn from(id: $t) -> Self {
                Self(id.to_string())
            }
        }
    )*};
}

numeric_product_id!(i32, i64, u32, u64, usize);

/// The text fields a product is searched on, in index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Title,
    Category,
    Description,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Title, Field::Category, Field::Description];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Title => "title",
            Field::Category => "category",
            Field::Description => "description",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog record as supplied by the surrounding application.
///
/// Decoding is lenient: numeric text fields become strings, anything else
/// that is not a string is treated as absent, and a record that is not a
/// JSON object decodes to an empty product (which the index then skips for
/// lacking an id).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl Product {
    pub fn new(id: impl Into<ProductId>) -> Self {
        Self { id: Some(id.into()), ..Self::default() }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Text of a searchable field; missing fields read as empty.
    pub fn field(&self, field: Field) -> &str {
        let value = match field {
            Field::Name => &self.name,
            Field::Title => &self.title,
            Field::Category => &self.category,
            Field::Description => &self.description,
        };
        value.as_deref().unwrap_or("")
    }

    /// Primary label for a suggestion row: name, then title, then the id.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.title.as_deref().filter(|s| !s.is_empty()))
            .or_else(|| self.id.as_ref().map(ProductId::as_str))
            .unwrap_or("")
    }

    /// Secondary line, e.g. `₹50 • Footwear`. Missing parts are left out.
    pub fn subtitle(&self, currency_symbol: &str) -> String {
        let price = self.price.map(|p| format!("{currency_symbol}{p}"));
        let category = self.category.as_deref().filter(|c| !c.is_empty());
        match (price, category) {
            (Some(p), Some(c)) => format!("{p} • {c}"),
            (Some(p), None) => p,
            (None, Some(c)) => c.to_string(),
            (None, None) => String::new(),
        }
    }
}

impl From<Value> for Product {
    fn from(value: Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };
        let text = |key: &str| map.get(key).and_then(lenient_text);
        Self {
            id: map.get("id").and_then(ProductId::from_json),
            name: text("name"),
            title: text("title"),
            category: text("category"),
            description: text("description"),
            price: map.get("price").and_then(lenient_price),
        }
    }
}

fn lenient_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A single ranked match. `score` is a normalised distance: 0 is an exact
/// match and lower is always better. `ordinal` is the product's position in
/// the indexed catalog and breaks score ties.
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub id: &'a ProductId,
    pub product: &'a Product,
    pub ordinal: usize,
    pub score: f32,
    pub field: Field,
}

/// Best alignment of a query inside one field's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMatch {
    /// Insertions, deletions and substitutions needed.
    pub edits: usize,
    /// Character offset in the field where the alignment starts.
    pub start: usize,
}
