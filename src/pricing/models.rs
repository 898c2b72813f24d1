//! Data model for estimates.
//!
//! Categories and their line items are kept in insertion order so the host
//! UI can render them the way the catalog declares them. Keys are unique
//! within their container; inserting an existing key replaces the entry.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::EstimatorError;

/// Key of the mandatory line in every category.
pub const BASE_ITEM_KEY: &str = "base";

/// Session-wide inputs that scale every line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalFactors {
    /// Percent, weighted per item by `item_subjective_factor`
    #[serde(default)]
    pub subjective_factor: f64,
    /// Percent, weighted per item by `item_size_factor`
    #[serde(default)]
    pub size_factor: f64,
    #[serde(default)]
    pub attendance: f64,
    #[serde(default)]
    pub annual_revenue: f64,
}

impl GlobalFactors {
    pub fn get(&self, field: GlobalField) -> f64 {
        match field {
            GlobalField::SubjectiveFactor => self.subjective_factor,
            GlobalField::SizeFactor => self.size_factor,
            GlobalField::Attendance => self.attendance,
            GlobalField::AnnualRevenue => self.annual_revenue,
        }
    }

    pub fn set(&mut self, field: GlobalField, value: f64) {
        match field {
            GlobalField::SubjectiveFactor => self.subjective_factor = value,
            GlobalField::SizeFactor => self.size_factor = value,
            GlobalField::Attendance => self.attendance = value,
            GlobalField::AnnualRevenue => self.annual_revenue = value,
        }
    }
}

/// Names of the four global factors, as the host UI refers to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GlobalField {
    SubjectiveFactor,
    SizeFactor,
    Attendance,
    AnnualRevenue,
}

impl GlobalField {
    pub const ALL: [GlobalField; 4] = [
        GlobalField::SubjectiveFactor,
        GlobalField::SizeFactor,
        GlobalField::Attendance,
        GlobalField::AnnualRevenue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GlobalField::SubjectiveFactor => "subjectiveFactor",
            GlobalField::SizeFactor => "sizeFactor",
            GlobalField::Attendance => "attendance",
            GlobalField::AnnualRevenue => "annualRevenue",
        }
    }
}

impl fmt::Display for GlobalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GlobalField {
    type Err = EstimatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GlobalField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| EstimatorError::UnknownFactor(s.to_string()))
    }
}

/// A single priceable service component.
///
/// Only `checked` and `quantity` change during a session; the pricing
/// coefficients are fixed by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub checked: bool,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    pub price: f64,
    #[serde(default)]
    pub multiplier: f64,
    #[serde(default)]
    pub item_subjective_factor: f64,
    #[serde(default)]
    pub item_size_factor: f64,
}

fn default_quantity() -> i64 {
    1
}

impl LineItem {
    /// Unchecked line with quantity 1 and all coefficients at 0.
    pub fn priced(price: f64) -> Self {
        Self {
            checked: false,
            quantity: 1,
            price,
            multiplier: 0.0,
            item_subjective_factor: 0.0,
            item_size_factor: 0.0,
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn subjective(mut self, coefficient: f64) -> Self {
        self.item_subjective_factor = coefficient;
        self
    }

    pub fn size(mut self, coefficient: f64) -> Self {
        self.item_size_factor = coefficient;
        self
    }

    /// Unit price including the additive per-item adjustment
    pub fn base_price(&self) -> f64 {
        self.price + self.multiplier
    }
}

/// Keyed line item inside a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub key: String,
    pub item: LineItem,
}

/// Named grouping of line items contributing to one breakdown subtotal.
///
/// Deserializing goes through [`Category::insert`], so a repeated key
/// replaces the earlier entry instead of being counted twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CategoryRepr")]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub items: Vec<CategoryEntry>,
}

#[derive(Deserialize)]
struct CategoryRepr {
    name: String,
    #[serde(default)]
    items: Vec<CategoryEntry>,
}

impl From<CategoryRepr> for Category {
    fn from(repr: CategoryRepr) -> Self {
        let mut category = Category::new(repr.name);
        for entry in repr.items {
            category.insert(entry.key, entry.item);
        }
        category
    }
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Builder form of [`Category::insert`]
    pub fn with_item(mut self, key: impl Into<String>, item: LineItem) -> Self {
        self.insert(key, item);
        self
    }

    /// Insert or replace an item, keeping the original position on replace
    pub fn insert(&mut self, key: impl Into<String>, item: LineItem) {
        let key = key.into();
        match self.items.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.item = item,
            None => self.items.push(CategoryEntry { key, item }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.item)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|entry| entry.key == key)
            .map(|entry| &mut entry.item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LineItem)> {
        self.items
            .iter()
            .map(|entry| (entry.key.as_str(), &entry.item))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Single source of truth for one estimating session.
///
/// Category names stay unique on deserialize: a repeated name replaces the
/// earlier category, as [`EstimateState::insert_category`] does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "EstimateStateRepr")]
pub struct EstimateState {
    #[serde(default)]
    pub factors: GlobalFactors,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EstimateStateRepr {
    #[serde(default)]
    factors: GlobalFactors,
    #[serde(default)]
    categories: Vec<Category>,
}

impl From<EstimateStateRepr> for EstimateState {
    fn from(repr: EstimateStateRepr) -> Self {
        let mut state = EstimateState::new(repr.factors);
        for category in repr.categories {
            state.insert_category(category);
        }
        state
    }
}

impl EstimateState {
    pub fn new(factors: GlobalFactors) -> Self {
        Self {
            factors,
            categories: Vec::new(),
        }
    }

    /// Builder form of [`EstimateState::insert_category`]
    pub fn with_category(mut self, category: Category) -> Self {
        self.insert_category(category);
        self
    }

    /// Insert or replace a category by name
    pub fn insert_category(&mut self, category: Category) {
        match self
            .categories
            .iter_mut()
            .find(|existing| existing.name == category.name)
        {
            Some(existing) => *existing = category,
            None => self.categories.push(category),
        }
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn category_mut(&mut self, name: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.name == name)
    }

    pub fn item(&self, category: &str, key: &str) -> Option<&LineItem> {
        self.category(category).and_then(|c| c.get(key))
    }
}

/// One category's subtotal in a [`Breakdown`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtotal {
    pub category: String,
    pub amount: f64,
}

/// Per-category subtotals, before volume adjustments, in state order.
///
/// Serializes as a map of category name to subtotal, keys in state order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Breakdown(Vec<Subtotal>);

impl Serialize for Breakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|s| (&s.category, s.amount)))
    }
}

impl<'de> Deserialize<'de> for Breakdown {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BreakdownVisitor)
    }
}

struct BreakdownVisitor;

impl<'de> Visitor<'de> for BreakdownVisitor {
    type Value = Breakdown;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of category name to subtotal")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Breakdown, A::Error> {
        let mut subtotals: Vec<Subtotal> = Vec::new();
        while let Some((category, amount)) = map.next_entry::<String, f64>()? {
            match subtotals.iter_mut().find(|s| s.category == category) {
                Some(existing) => existing.amount = amount,
                None => subtotals.push(Subtotal { category, amount }),
            }
        }
        Ok(Breakdown(subtotals))
    }
}

impl Breakdown {
    /// Zeroed subtotal for every category in `state`
    pub fn zeroed(state: &EstimateState) -> Self {
        Self(
            state
                .categories
                .iter()
                .map(|c| Subtotal {
                    category: c.name.clone(),
                    amount: 0.0,
                })
                .collect(),
        )
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.amount)
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut f64> {
        self.0.get_mut(index).map(|s| &mut s.amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|s| (s.category.as_str(), s.amount))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all subtotals in category order
    pub fn subtotal_sum(&self) -> f64 {
        self.0.iter().map(|s| s.amount).sum()
    }
}

/// Result of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub total: f64,
    pub breakdown: Breakdown,
}
