//! # Cart Module
//!
//! The cart aggregation reducer: an ordered list of line items plus two
//! derived aggregates, with every mutation expressed as a pure transition
//! `(&CartState, input) -> CartState`.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions                                     │
//! │                                                                         │
//! │  Operation               Line present            Line absent            │
//! │  ─────────               ────────────            ───────────            │
//! │  add_or_increment(p, n)  qty += max(n, 1)        push(qty = max(n, 1))  │
//! │  decrement_or_remove(id) qty > 1: qty -= 1       no-op                  │
//! │                          qty = 1: remove line                           │
//! │  delete_line(id)         remove line             no-op                  │
//! │  set_quantity(id, n)     qty = max(n, 1)         no-op                  │
//! │  clear()                 ─────────── empty cart ───────────             │
//! │                                                                         │
//! │  After EVERY transition:                                                │
//! │    line_total     = price × quantity        (per line)                  │
//! │    total_quantity = Σ quantity              (full summation)            │
//! │    total_amount   = Σ line_total            (full summation)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Full Summation?
//! Adjusting the totals by deltas (`total -= price` on decrement) drifts as
//! soon as two transitions disagree about a line's price or quantity.
//! Recomputing from `items` makes every state self-correcting: the totals
//! depend only on the lines, never on the history that produced them.
//!
//! ## No Errors
//! Nothing here fails. Quantities below 1 are clamped to 1, negative prices
//! to zero, a missing title becomes [`crate::DEFAULT_ITEM_TITLE`] and an
//! operation aimed at an unknown line id returns the state unchanged.
//! Callers that care whether anything happened compare the states.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::CartProduct;
use crate::DEFAULT_ITEM_TITLE;

/// Clamps a requested quantity to the minimum of one unit.
#[inline]
fn clamp_quantity(quantity: i64) -> i64 {
    quantity.max(1)
}

// =============================================================================
// Line Item
// =============================================================================

/// One distinct product in the cart.
///
/// ## Invariants
/// - `quantity >= 1`
/// - `price >= 0`
/// - `line_total == price × quantity`
///
/// Fields are read through accessors; the only way to change a line is a
/// [`CartState`] transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    id: String,
    title: String,
    price: Money,
    thumbnail: String,
    quantity: i64,
    line_total: Money,
}

impl LineItem {
    /// Builds a line from a catalog product, defaulting optional fields.
    fn from_product(product: &CartProduct, quantity: i64) -> Self {
        let title = product
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_ITEM_TITLE)
            .to_string();

        LineItem {
            id: product.id.clone(),
            title,
            price: product.price.non_negative(),
            thumbnail: product.thumbnail.clone().unwrap_or_default(),
            quantity: 0,
            line_total: Money::zero(),
        }
        .with_quantity(quantity)
    }

    /// Sets the quantity (clamped) and re-derives the line total.
    fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = clamp_quantity(quantity);
        self.line_total = self.price.multiply_quantity(self.quantity);
        self
    }

    /// Re-establishes the line invariants on data that did not come from a
    /// transition (e.g. a deserialized snapshot).
    fn normalized(mut self) -> Self {
        self.price = self.price.non_negative();
        let quantity = self.quantity;
        self.with_quantity(quantity)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Unit price, frozen when the line was first added.
    pub fn price(&self) -> Money {
        self.price
    }

    /// Thumbnail URL, or empty.
    pub fn thumbnail(&self) -> &str {
        &self.thumbnail
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// `price × quantity`.
    pub fn line_total(&self) -> Money {
        self.line_total
    }
}

// =============================================================================
// Cart Action
// =============================================================================

/// A cart transition as data, for hosts that dispatch actions instead of
/// calling the operations directly.
///
/// ## Wire Shape
/// ```json
/// { "type": "addOrIncrement", "product": { "id": "1", "price": 1000 }, "quantity": 2 }
/// { "type": "decrementOrRemove", "id": "1" }
/// { "type": "clear" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum CartAction {
    /// Add a product, or increase its quantity. `None` means one unit.
    AddOrIncrement {
        product: CartProduct,
        quantity: Option<i64>,
    },
    /// Remove one unit, dropping the line at zero.
    DecrementOrRemove { id: String },
    /// Remove the line regardless of quantity.
    DeleteLine { id: String },
    /// Replace a line's quantity.
    SetQuantity { id: String, quantity: i64 },
    /// Empty the cart.
    Clear,
}

// =============================================================================
// Cart State
// =============================================================================

/// The cart: ordered line items and their aggregates.
///
/// ## Invariants
/// - line ids are unique
/// - `total_quantity == Σ items[].quantity`
/// - `total_amount == Σ items[].line_total` (exact, integer cents)
///
/// The aggregates are private and only ever written by the summation in
/// `from_items`. Deserialization goes through the same path, so a snapshot
/// with stale totals, stale line totals or repeated ids comes back
/// consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CartSnapshot")]
pub struct CartState {
    items: Vec<LineItem>,
    total_quantity: i64,
    total_amount: Money,
}

/// Serialized form accepted when deserializing a [`CartState`]. Incoming
/// totals are ignored.
#[derive(Deserialize)]
struct CartSnapshot {
    #[serde(default)]
    items: Vec<LineItem>,
}

impl From<CartSnapshot> for CartState {
    fn from(snapshot: CartSnapshot) -> Self {
        let mut items: Vec<LineItem> = Vec::with_capacity(snapshot.items.len());
        for line in snapshot.items.into_iter().map(LineItem::normalized) {
            match items.iter_mut().find(|existing| existing.id == line.id) {
                Some(existing) => {
                    let merged = existing.quantity.saturating_add(line.quantity);
                    *existing = existing.clone().with_quantity(merged);
                }
                None => items.push(line),
            }
        }
        CartState::from_items(items)
    }
}

impl CartState {
    /// Creates the canonical empty cart.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Builds a state from lines, deriving both aggregates by full summation.
    fn from_items(items: Vec<LineItem>) -> Self {
        let total_quantity = items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.quantity));
        let total_amount = items.iter().map(LineItem::line_total).sum();

        CartState {
            items,
            total_quantity,
            total_amount,
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Adds `quantity` units of `product` (clamped to at least one).
    ///
    /// An existing line keeps its title, thumbnail and unit price; only its
    /// quantity grows. A new line is appended at the end.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{CartProduct, CartState, Money};
    ///
    /// let product = CartProduct::new("1", Money::from_cents(1000));
    /// let cart = CartState::new().add_or_increment(&product, 2);
    ///
    /// assert_eq!(cart.total_quantity(), 2);
    /// assert_eq!(cart.total_amount().cents(), 2000);
    /// ```
    pub fn add_or_increment(&self, product: &CartProduct, quantity: i64) -> CartState {
        let quantity = clamp_quantity(quantity);
        let mut items = self.items.clone();

        match items.iter_mut().find(|item| item.id == product.id) {
            Some(item) => {
                let increased = item.quantity.saturating_add(quantity);
                *item = item.clone().with_quantity(increased);
            }
            None => items.push(LineItem::from_product(product, quantity)),
        }

        CartState::from_items(items)
    }

    /// Removes one unit of line `id`, dropping the line when it was the last.
    pub fn decrement_or_remove(&self, id: &str) -> CartState {
        let Some(index) = self.position(id) else {
            return self.clone();
        };

        let mut items = self.items.clone();
        if items[index].quantity > 1 {
            let decreased = items[index].quantity - 1;
            items[index] = items[index].clone().with_quantity(decreased);
        } else {
            items.remove(index);
        }

        CartState::from_items(items)
    }

    /// Removes line `id` whatever its quantity.
    pub fn delete_line(&self, id: &str) -> CartState {
        if self.position(id).is_none() {
            return self.clone();
        }

        let items = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();

        CartState::from_items(items)
    }

    /// Replaces the quantity of line `id` (clamped to at least one).
    pub fn set_quantity(&self, id: &str, quantity: i64) -> CartState {
        let Some(index) = self.position(id) else {
            return self.clone();
        };

        let mut items = self.items.clone();
        items[index] = items[index].clone().with_quantity(quantity);

        CartState::from_items(items)
    }

    /// Returns the canonical empty cart.
    pub fn clear(&self) -> CartState {
        CartState::new()
    }

    /// Applies a [`CartAction`].
    pub fn reduce(&self, action: &CartAction) -> CartState {
        match action {
            CartAction::AddOrIncrement { product, quantity } => {
                self.add_or_increment(product, quantity.unwrap_or(1))
            }
            CartAction::DecrementOrRemove { id } => self.decrement_or_remove(id),
            CartAction::DeleteLine { id } => self.delete_line(id),
            CartAction::SetQuantity { id, quantity } => self.set_quantity(id, *quantity),
            CartAction::Clear => self.clear(),
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up a line by product id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Σ quantity over all lines.
    pub fn total_quantity(&self) -> i64 {
        self.total_quantity
    }

    /// Σ line total over all lines.
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Aggregates summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub total_amount: Money,
}

impl From<&CartState> for CartTotals {
    fn from(cart: &CartState) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total_amount: cart.total_amount(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price_cents: i64) -> CartProduct {
        CartProduct::new(id, Money::from_cents(price_cents)).with_title(format!("Product {id}"))
    }

    /// Checks every invariant of a cart state from scratch.
    fn assert_consistent(cart: &CartState) {
        let quantity: i64 = cart.items().iter().map(LineItem::quantity).sum();
        let amount: Money = cart.items().iter().map(LineItem::line_total).sum();
        assert_eq!(cart.total_quantity(), quantity);
        assert_eq!(cart.total_amount(), amount);

        for (i, item) in cart.items().iter().enumerate() {
            assert!(item.quantity() >= 1);
            assert!(!item.price().is_negative());
            assert_eq!(item.line_total(), item.price() * item.quantity());
            assert!(
                cart.items()[i + 1..].iter().all(|other| other.id() != item.id()),
                "duplicate line id {}",
                item.id()
            );
        }
    }

    #[test]
    fn test_walkthrough() {
        let p = product("1", 1000);

        let cart = CartState::new().add_or_increment(&p, 2);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.get("1").map(LineItem::quantity), Some(2));
        assert_eq!(cart.get("1").map(LineItem::line_total), Some(Money::from_cents(2000)));
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total_amount().cents(), 2000);

        let cart = cart.add_or_increment(&p, 1);
        assert_eq!(cart.get("1").map(LineItem::quantity), Some(3));
        assert_eq!(cart.get("1").map(LineItem::line_total), Some(Money::from_cents(3000)));
        assert_eq!(cart.total_amount().cents(), 3000);

        let cart = cart.decrement_or_remove("1");
        assert_eq!(cart.get("1").map(LineItem::quantity), Some(2));
        assert_eq!(cart.total_amount().cents(), 2000);

        let cart = cart.delete_line("1");
        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
        assert!(cart.total_amount().is_zero());
    }

    #[test]
    fn test_add_merges_by_id() {
        let p = product("1", 999);

        let in_two_steps = CartState::new().add_or_increment(&p, 2).add_or_increment(&p, 3);
        let in_one_step = CartState::new().add_or_increment(&p, 5);

        assert_eq!(in_two_steps, in_one_step);
        assert_eq!(in_two_steps.item_count(), 1);
        assert_eq!(in_two_steps.total_quantity(), 5);
    }

    #[test]
    fn test_add_clamps_quantity() {
        let p = product("1", 500);

        for requested in [0, -1, -100, i64::MIN] {
            let cart = CartState::new().add_or_increment(&p, requested);
            assert_eq!(cart.total_quantity(), 1);
            assert_eq!(cart.total_amount().cents(), 500);
        }
    }

    #[test]
    fn test_add_keeps_existing_line_price() {
        let cart = CartState::new()
            .add_or_increment(&product("1", 1000), 1)
            .add_or_increment(&product("1", 4000), 1);

        let line = cart.get("1").cloned();
        assert_eq!(line.as_ref().map(LineItem::price), Some(Money::from_cents(1000)));
        assert_eq!(cart.total_amount().cents(), 2000);
    }

    #[test]
    fn test_add_defaults_optional_fields() {
        let bare = CartProduct::new("7", Money::from_cents(250));
        let blank_title = CartProduct::new("8", Money::from_cents(250)).with_title("   ");

        let cart = CartState::new()
            .add_or_increment(&bare, 1)
            .add_or_increment(&blank_title, 1);

        for id in ["7", "8"] {
            let line = cart.get(id).cloned();
            assert_eq!(line.as_ref().map(LineItem::title), Some(DEFAULT_ITEM_TITLE));
            assert_eq!(line.as_ref().map(LineItem::thumbnail), Some(""));
        }
    }

    #[test]
    fn test_negative_price_is_clamped() {
        let cart = CartState::new().add_or_increment(&product("1", -300), 4);

        assert_eq!(cart.total_quantity(), 4);
        assert!(cart.total_amount().is_zero());
        assert_consistent(&cart);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let cart = CartState::new()
            .add_or_increment(&product("b", 100), 1)
            .add_or_increment(&product("a", 100), 1)
            .add_or_increment(&product("c", 100), 1)
            .add_or_increment(&product("b", 100), 1)
            .delete_line("a");

        let ids: Vec<&str> = cart.items().iter().map(LineItem::id).collect();
        assert_eq!(ids, ["b", "c"]);
    }

    #[test]
    fn test_decrement_down_to_removal() {
        let cart = CartState::new()
            .add_or_increment(&product("1", 1299), 4)
            .add_or_increment(&product("2", 899), 1);

        let mut drained = cart.clone();
        for _ in 0..4 {
            drained = drained.decrement_or_remove("1");
            assert_consistent(&drained);
        }

        assert!(!drained.contains("1"));
        assert_eq!(drained.item_count(), 1);
        assert_eq!(drained.total_quantity(), 1);
        assert_eq!(drained.total_amount().cents(), 899);
    }

    #[test]
    fn test_operations_on_missing_id_are_noops() {
        let cart = CartState::new()
            .add_or_increment(&product("1", 1000), 2)
            .add_or_increment(&product("2", 500), 1);

        assert_eq!(cart.decrement_or_remove("missing"), cart);
        assert_eq!(cart.delete_line("missing"), cart);
        assert_eq!(cart.set_quantity("missing", 9), cart);

        let empty = CartState::new();
        assert_eq!(empty.decrement_or_remove("1"), empty);
        assert_eq!(empty.delete_line("1"), empty);
    }

    #[test]
    fn test_delete_ignores_quantity() {
        let cart = CartState::new()
            .add_or_increment(&product("1", 1000), 7)
            .delete_line("1");

        assert!(cart.is_empty());
        assert_eq!(cart, CartState::new());
    }

    #[test]
    fn test_set_quantity() {
        let cart = CartState::new()
            .add_or_increment(&product("1", 1000), 2)
            .add_or_increment(&product("2", 250), 1);

        let raised = cart.set_quantity("1", 5);
        assert_eq!(raised.get("1").map(LineItem::line_total), Some(Money::from_cents(5000)));
        assert_eq!(raised.total_quantity(), 6);
        assert_eq!(raised.total_amount().cents(), 5250);

        let clamped = cart.set_quantity("1", 0);
        assert_eq!(clamped.get("1").map(LineItem::quantity), Some(1));
        assert_eq!(clamped.total_amount().cents(), 1250);
    }

    #[test]
    fn test_clear_always_yields_empty() {
        let full = CartState::new()
            .add_or_increment(&product("1", 1000), 3)
            .add_or_increment(&product("2", 2000), 1);

        for cart in [CartState::new(), full] {
            let cleared = cart.clear();
            assert!(cleared.items().is_empty());
            assert_eq!(cleared.total_quantity(), 0);
            assert!(cleared.total_amount().is_zero());
            assert_eq!(cleared, CartState::default());
        }
    }

    #[test]
    fn test_reduce_matches_direct_calls() {
        let p = product("1", 1999);
        let start = CartState::new().add_or_increment(&product("2", 100), 1);

        let cases = [
            (
                CartAction::AddOrIncrement {
                    product: p.clone(),
                    quantity: None,
                },
                start.add_or_increment(&p, 1),
            ),
            (
                CartAction::AddOrIncrement {
                    product: p.clone(),
                    quantity: Some(3),
                },
                start.add_or_increment(&p, 3),
            ),
            (
                CartAction::DecrementOrRemove { id: "2".into() },
                start.decrement_or_remove("2"),
            ),
            (
                CartAction::DeleteLine { id: "2".into() },
                start.delete_line("2"),
            ),
            (
                CartAction::SetQuantity {
                    id: "2".into(),
                    quantity: 4,
                },
                start.set_quantity("2", 4),
            ),
            (CartAction::Clear, start.clear()),
        ];

        for (action, expected) in cases {
            assert_eq!(start.reduce(&action), expected, "{action:?}");
        }
    }

    /// Drives a long, deterministic mix of transitions over a small id space
    /// and checks the invariants after each one.
    #[test]
    fn test_invariants_hold_for_every_step() {
        let catalog = [
            product("1", 999),
            product("2", 1999),
            product("3", 1499),
            product("4", 1299),
            product("5", 0),
        ];

        let mut seed: u64 = 0x5eed;
        let mut next = move || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) as i64
        };

        let mut cart = CartState::new();
        for _ in 0..2000 {
            let target = &catalog[(next() % catalog.len() as i64) as usize];
            let amount = next() % 7 - 2;
            let action = match next() % 10 {
                0..=3 => CartAction::AddOrIncrement {
                    product: target.clone(),
                    quantity: Some(amount),
                },
                4..=6 => CartAction::DecrementOrRemove {
                    id: target.id.clone(),
                },
                7 => CartAction::SetQuantity {
                    id: target.id.clone(),
                    quantity: amount,
                },
                8 => CartAction::DeleteLine {
                    id: target.id.clone(),
                },
                _ => {
                    if next() % 5 == 0 {
                        CartAction::Clear
                    } else {
                        CartAction::DecrementOrRemove {
                            id: "unknown".into(),
                        }
                    }
                }
            };

            cart = cart.reduce(&action);
            assert_consistent(&cart);
        }
    }

    #[test]
    fn test_action_wire_shape() {
        let json = r#"{"type":"addOrIncrement","product":{"id":"1","title":null,"price":1000,"thumbnail":null},"quantity":2}"#;
        let action: CartAction = serde_json::from_str(json).unwrap();

        let cart = CartState::new().reduce(&action);
        assert_eq!(cart.total_amount().cents(), 2000);

        let clear: CartAction = serde_json::from_str(r#"{"type":"clear"}"#).unwrap();
        assert_eq!(clear, CartAction::Clear);
    }

    #[test]
    fn test_deserialize_recomputes_aggregates() {
        let json = r#"{
            "items": [
                {"id":"1","title":"Mascara","price":999,"thumbnail":"","quantity":2,"lineTotal":1},
                {"id":"2","title":"Palette","price":1999,"thumbnail":"","quantity":0,"lineTotal":0},
                {"id":"1","title":"Mascara","price":999,"thumbnail":"","quantity":1,"lineTotal":999}
            ],
            "totalQuantity": 42,
            "totalAmount": -7
        }"#;

        let cart: CartState = serde_json::from_str(json).unwrap();

        assert_consistent(&cart);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.get("1").map(LineItem::quantity), Some(3));
        assert_eq!(cart.get("2").map(LineItem::quantity), Some(1));
        assert_eq!(cart.total_quantity(), 4);
        assert_eq!(cart.total_amount().cents(), 999 * 3 + 1999);
    }

    #[test]
    fn test_serialize_round_trip() {
        let cart = CartState::new()
            .add_or_increment(&product("1", 999).with_thumbnail("https://img/1.webp"), 2)
            .add_or_increment(&product("2", 1999), 1);

        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.contains("\"totalQuantity\":3"));
        assert!(json.contains("\"lineTotal\":1998"));

        let back: CartState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_totals_summary() {
        let cart = CartState::new()
            .add_or_increment(&product("1", 999), 2)
            .add_or_increment(&product("2", 1999), 1);

        assert_eq!(
            cart.totals(),
            CartTotals {
                item_count: 2,
                total_quantity: 3,
                total_amount: Money::from_cents(3997),
            }
        );
    }
}
