use crate::{
    BrandId, CategoryId, ColorId, OrderId, ProductId, ReviewId, Role, SizeId,
    UserId,
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Most units of a single line a cart will hold.
pub const MAX_CART_QUANTITY: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessMessage {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub id: SizeId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub id: ColorId,
    pub name: String,
    /// CSS color, e.g. `#1f2937`
    pub hex: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub brand_id: BrandId,
    pub brand_name: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: Option<CategoryId>,
    pub image_url: Option<String>,
    pub sizes: Vec<Size>,
    pub colors: Vec<Color>,
    /// Mean of approved review ratings, absent until the first approval.
    pub average_rating: Option<f64>,
}

/// One page of a product listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub page: u32,
    pub total_pages: u32,
}

/// A brand's answers to the sustainability and labour questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthicsQuestionnaire {
    pub brand_id: BrandId,
    pub answers: Vec<EthicsAnswer>,
    pub submitted_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthicsAnswer {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub author: String,
    /// 1 to 5
    pub rating: u8,
    pub title: String,
    pub body: String,
    pub status: ReviewStatus,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub product_id: ProductId,
    pub name: String,
    pub brand_name: String,
    pub price: Decimal,
    pub image_url: Option<String>,
}

impl From<&Product> for WishlistItem {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            brand_name: product.brand_name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wishlist {
    pub items: Vec<WishlistItem>,
}

impl Wishlist {
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|item| item.product_id == product_id)
    }

    /// Adds the item if absent, removes it if present. Returns whether the
    /// product is on the wishlist afterwards.
    pub fn toggle(&mut self, item: WishlistItem) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != item.product_id);
        if self.items.len() == before {
            self.items.push(item);
            true
        } else {
            false
        }
    }
}

/// Identifies a cart line: the same product in another size or color is a
/// separate line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartLineKey {
    pub product_id: ProductId,
    pub size_id: Option<SizeId>,
    pub color_id: Option<ColorId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub line: CartLineKey,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartItem {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn quantity_of(&self, line: &CartLineKey) -> u32 {
        self.items
            .iter()
            .find(|item| item.line == *line)
            .map_or(0, |item| item.quantity)
    }

    /// Adds `item.quantity` units, merging with an existing line.
    pub fn add(&mut self, item: CartItem) {
        match self.items.iter_mut().find(|i| i.line == item.line) {
            Some(existing) => {
                existing.quantity =
                    clamp_quantity(existing.quantity.saturating_add(item.quantity));
            }
            None if item.quantity > 0 => self.items.push(CartItem {
                quantity: clamp_quantity(item.quantity),
                ..item
            }),
            None => {}
        }
    }

    /// Sets a line's quantity; zero removes the line. Unknown lines are
    /// left alone.
    pub fn set_quantity(&mut self, line: &CartLineKey, quantity: u32) {
        if quantity == 0 {
            self.remove(line);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.line == *line) {
            item.quantity = clamp_quantity(quantity);
        }
    }

    pub fn remove(&mut self, line: &CartLineKey) {
        self.items.retain(|item| item.line != *line);
    }
}

pub fn clamp_quantity(quantity: u32) -> u32 {
    quantity.clamp(1, MAX_CART_QUANTITY)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Placed,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn line(product_id: i64, size_id: Option<i64>) -> CartLineKey {
        CartLineKey {
            product_id: ProductId(product_id),
            size_id: size_id.map(SizeId),
            color_id: None,
        }
    }

    fn item(product_id: i64, size_id: Option<i64>, quantity: u32) -> CartItem {
        CartItem {
            line: line(product_id, size_id),
            name: format!("product {product_id}"),
            unit_price: dec!(12.50),
            quantity,
        }
    }

    fn wishlist_item(product_id: i64) -> WishlistItem {
        WishlistItem {
            product_id: ProductId(product_id),
            name: "Linen shirt".to_string(),
            brand_name: "Acme".to_string(),
            price: dec!(49.00),
            image_url: None,
        }
    }

    #[test]
    fn add_merges_same_line() {
        let mut cart = Cart::default();
        cart.add(item(1, Some(2), 1));
        cart.add(item(1, Some(2), 2));
        cart.add(item(1, Some(3), 1));

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.quantity_of(&line(1, Some(2))), 3);
        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.total(), dec!(50.00));
    }

    #[test]
    fn quantities_are_clamped() {
        let mut cart = Cart::default();
        cart.add(item(1, None, 8));
        cart.add(item(1, None, 8));
        assert_eq!(cart.quantity_of(&line(1, None)), MAX_CART_QUANTITY);

        cart.set_quantity(&line(1, None), 99);
        assert_eq!(cart.quantity_of(&line(1, None)), MAX_CART_QUANTITY);

        cart.add(item(2, None, 0));
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn zero_quantity_removes_line() {
        let mut cart = Cart::default();
        cart.add(item(1, None, 2));
        cart.add(item(2, None, 1));

        cart.set_quantity(&line(1, None), 0);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.quantity_of(&line(1, None)), 0);

        // unknown line is a no-op
        cart.set_quantity(&line(9, None), 3);
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn wishlist_toggle() {
        let mut wishlist = Wishlist::default();
        assert!(wishlist.toggle(wishlist_item(1)));
        assert!(wishlist.toggle(wishlist_item(2)));
        assert!(wishlist.contains(ProductId(1)));

        assert!(!wishlist.toggle(wishlist_item(1)));
        assert!(!wishlist.contains(ProductId(1)));
        assert_eq!(wishlist.items.len(), 1);
    }

    #[test]
    fn product_page_decodes() {
        let json = r##"{
            "products": [{
                "id": 7, "brand_id": 42, "brand_name": "Acme",
                "name": "Linen shirt", "description": null, "price": "49.00",
                "category_id": 3, "image_url": null,
                "sizes": [{"id": 1, "label": "M"}],
                "colors": [{"id": 2, "name": "Navy", "hex": "#1e3a8a"}],
                "average_rating": 4.5
            }],
            "page": 1,
            "total_pages": 3
        }"##;
        let page: ProductPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.products[0].brand_id, BrandId(42));
        assert_eq!(page.products[0].price, dec!(49.00));
        assert_eq!(page.total_pages, 3);
    }
}
