//! Cart projection.

use super::{escape_html, text_at, RenderError, UiResource, CART_RESOURCE_URI};
use serde_json::Value;

const TEMPLATE: &str = include_str!("../../assets/cart.html");

pub fn project_cart(cart: &Value) -> Result<UiResource, RenderError> {
    UiResource::raw_html(CART_RESOURCE_URI, cart_html(cart))
}

pub fn cart_html(cart: &Value) -> String {
    let lines: String = cart
        .get("lines")
        .and_then(Value::as_array)
        .map(|lines| lines.iter().map(cart_line).collect())
        .unwrap_or_default();

    TEMPLATE
        .replace("{{lines}}", &lines)
        .replace(
            "{{subtotal}}",
            &escape_html(&text_at(cart, "/cost/subtotal_amount/amount", "0.0")),
        )
        .replace(
            "{{total}}",
            &escape_html(&text_at(cart, "/cost/total_amount/amount", "0.0")),
        )
        .replace(
            "{{checkout_url}}",
            &escape_html(&text_at(cart, "/checkout_url", "")),
        )
}

fn cart_line(line: &Value) -> String {
    let title = escape_html(&text_at(line, "/merchandise/product/title", "Untitled product"));
    let quantity = escape_html(&text_at(line, "/quantity", "0"));
    let amount = escape_html(&text_at(line, "/cost/total_amount/amount", "0.0"));

    format!(
        r#"      <div class="cart-item">
        <div class="cart-item-info">
          <div class="cart-item-title">{title}</div>
          <div class="cart-item-meta">Quantity: {quantity} · ${amount}</div>
        </div>
      </div>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_cart() -> Value {
        json!({
            "id": "gid://shopify/Cart/c1",
            "checkout_url": "https://shop.example/checkout?c=1&x=2",
            "lines": [
                {
                    "quantity": 2,
                    "merchandise": { "product": { "title": "Widget" } },
                    "cost": { "total_amount": { "amount": "39.98", "currency": "USD" } }
                },
                { "quantity": 1 }
            ],
            "cost": {
                "subtotal_amount": { "amount": "39.98" },
                "total_amount": { "amount": "42.00" }
            }
        })
    }

    #[test]
    fn test_lines_and_totals() {
        let html = cart_html(&sample_cart());
        assert_eq!(html.matches("class=\"cart-item\"").count(), 2);
        assert!(html.contains("Widget"));
        assert!(html.contains("Quantity: 2 · $39.98"));
        assert!(html.contains("Quantity: 1 · $0.0"));
        assert!(html.contains("$42.00"));
        assert!(html.contains(r#"data-checkout-url="https://shop.example/checkout?c=1&amp;x=2""#));
    }

    #[test]
    fn test_empty_cart_uses_defaults() {
        let html = cart_html(&json!({}));
        assert!(!html.contains("class=\"cart-item\""));
        assert!(html.contains("<span>$0.0</span>"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_projection_is_deterministic() {
        let cart = sample_cart();
        assert_eq!(project_cart(&cart).unwrap(), project_cart(&cart).unwrap());
    }
}
