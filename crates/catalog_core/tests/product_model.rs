use catalog_core::Product;

#[test]
fn product_new_leaves_id_unset() {
    let product = Product::new("Pen", 1000, Some("Blue ink".to_string()), Some(50));

    assert_eq!(product.id(), None);
    assert!(!product.is_persisted());
    assert_eq!(product.name, "Pen");
    assert_eq!(product.price, 1000);
    assert_eq!(product.description.as_deref(), Some("Blue ink"));
    assert_eq!(product.stock_quantity, Some(50));
}

#[test]
fn product_default_is_empty() {
    let product = Product::default();

    assert_eq!(product.id(), None);
    assert!(product.name.is_empty());
    assert_eq!(product.price, 0);
    assert_eq!(product.description, None);
    assert_eq!(product.stock_quantity, None);
}

#[test]
fn overwrite_copies_empty_values_too() {
    let mut product = Product::new("Pen", 1000, Some("Blue ink".to_string()), Some(50));

    product.overwrite_from(&Product::default());

    assert_eq!(product, Product::default());
}

#[test]
fn product_serialization_uses_camel_case_wire_fields() {
    let product = Product::new("Pen", 1000, Some("Blue ink".to_string()), Some(50));

    let json = serde_json::to_value(&product).unwrap();
    assert_eq!(json["id"], serde_json::Value::Null);
    assert_eq!(json["name"], "Pen");
    assert_eq!(json["price"], 1000);
    assert_eq!(json["description"], "Blue ink");
    assert_eq!(json["stockQuantity"], 50);
    assert!(json.get("stock_quantity").is_none());
}

#[test]
fn deserialize_accepts_payload_without_optional_fields() {
    let value = serde_json::json!({
        "name": "Notebook",
        "price": 3500
    });

    let product: Product = serde_json::from_value(value).unwrap();
    assert_eq!(product.id(), None);
    assert_eq!(product.name, "Notebook");
    assert_eq!(product.price, 3500);
    assert_eq!(product.description, None);
    assert_eq!(product.stock_quantity, None);
}

#[test]
fn deserialize_keeps_incoming_id() {
    let value = serde_json::json!({
        "id": 12,
        "name": "Eraser",
        "price": 500,
        "description": null,
        "stockQuantity": -3
    });

    let product: Product = serde_json::from_value(value).unwrap();
    assert_eq!(product.id(), Some(12));
    assert_eq!(product.stock_quantity, Some(-3));
}
