//! Product grid projection.

use super::{escape_html, text_at, RenderError, UiResource, PRODUCTS_RESOURCE_URI};
use serde_json::Value;

const TEMPLATE: &str = include_str!("../../assets/products.html");

pub fn project_products(products: &[Value]) -> Result<UiResource, RenderError> {
    UiResource::raw_html(PRODUCTS_RESOURCE_URI, products_html(products))
}

pub fn products_html(products: &[Value]) -> String {
    let cards: String = products.iter().map(product_card).collect();
    TEMPLATE.replace("{{cards}}", &cards)
}

/// One card; price and quick-add target come from the first variant.
fn product_card(product: &Value) -> String {
    let title = escape_html(&text_at(product, "/title", "Untitled product"));
    let image = escape_html(&text_at(product, "/image_url", ""));
    let price = escape_html(&text_at(product, "/variants/0/price", "0.0"));
    let variant_id = escape_html(&text_at(product, "/variants/0/variant_id", ""));

    format!(
        r#"      <div class="compact-product-card">
        <img src="{image}" alt="{title}" class="compact-product-image" />
        <div class="compact-product-info">
          <p class="compact-product-title">{title}</p>
          <p class="compact-product-price">${price}</p>
        </div>
        <button class="compact-quick-add" data-variant-id="{variant_id}" onclick="addToCart(this.dataset.variantId)">
          Quick Add
        </button>
      </div>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cards_for_each_product() {
        let products = vec![
            json!({
                "title": "Widget",
                "image_url": "https://cdn/widget.png",
                "variants": [{ "price": "19.99", "variant_id": "gid://shopify/ProductVariant/1" }]
            }),
            json!({ "title": "Gadget", "variants": [{ "price": 5, "variant_id": "V2" }] }),
        ];
        let html = products_html(&products);
        assert_eq!(html.matches("compact-product-card\"").count(), 2);
        assert!(html.contains("Widget"));
        assert!(html.contains("$19.99"));
        assert!(html.contains(r#"data-variant-id="gid://shopify/ProductVariant/1""#));
        assert!(html.contains("$5"));
        assert!(!html.contains("{{cards}}"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let html = products_html(&[json!({})]);
        assert!(html.contains("Untitled product"));
        assert!(html.contains("$0.0"));
    }

    #[test]
    fn test_titles_are_escaped() {
        let html = products_html(&[json!({ "title": "<script>alert(1)</script>" })]);
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_projection_does_not_touch_input() {
        let products = vec![json!({ "title": "Widget" })];
        let before = products.clone();
        let resource = project_products(&products).unwrap();
        assert_eq!(products, before);
        assert_eq!(resource.uri(), PRODUCTS_RESOURCE_URI);
    }
}
