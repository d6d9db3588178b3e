use franchise_core::{Branch, Franchise, Product, TopProduct};
use std::collections::HashSet;

#[test]
fn franchise_new_is_unsaved_and_empty() {
    let franchise = Franchise::new("Burger Hut");

    assert!(franchise.id.is_empty());
    assert!(!franchise.is_persisted());
    assert_eq!(franchise.name, "Burger Hut");
    assert!(franchise.branches.is_empty());
}

#[test]
fn generated_branch_and_product_ids_are_distinct_uuids() {
    let mut ids = HashSet::new();
    for index in 0..50 {
        let branch = Branch::new(format!("branch {index}"));
        let product = Product::new(format!("product {index}"), index);
        assert!(uuid::Uuid::parse_str(&branch.id).is_ok());
        assert!(uuid::Uuid::parse_str(&product.id).is_ok());
        assert!(ids.insert(branch.id));
        assert!(ids.insert(product.id));
    }
}

#[test]
fn validate_reports_every_blank_name_with_its_path() {
    let mut franchise = Franchise::with_id("f-1", " ");
    let mut branch = Branch::with_id("b-1", "");
    branch.products.push(Product::with_id("p-1", "ok", 1));
    branch.products.push(Product::with_id("p-2", "\t", 2));
    franchise.branches.push(branch);

    let err = franchise.validate().unwrap_err();
    let fields = err
        .violations()
        .iter()
        .map(|violation| violation.field.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        fields,
        vec!["name", "branches[0].name", "branches[0].products[1].name"]
    );
    assert_eq!(err.violations()[0].message, "The franchise name is required");
    assert_eq!(err.violations()[1].message, "Branch name is required");
    assert_eq!(err.violations()[2].message, "Product name is required");
}

#[test]
fn remove_product_reports_whether_anything_matched() {
    let mut branch = Branch::with_id("b-1", "Centro");
    branch.products.push(Product::with_id("p-1", "Fries", 5));

    assert!(!branch.remove_product("missing"));
    assert_eq!(branch.product("p-1").map(|p| p.stock), Some(5));
    assert!(branch.remove_product("p-1"));
    assert!(branch.product("p-1").is_none());
    assert!(branch.products.is_empty());
}

#[test]
fn product_lookups_find_by_id_within_a_branch() {
    let mut branch = Branch::with_id("b-1", "Centro");
    branch.products.push(Product::with_id("p-1", "Fries", 5));
    branch.products.push(Product::with_id("p-2", "Soda", 9));

    assert_eq!(branch.product("p-2").map(|p| p.name.as_str()), Some("Soda"));
    assert!(branch.product("p-3").is_none());

    if let Some(product) = branch.product_mut("p-1") {
        product.stock = 12;
    }
    assert_eq!(branch.product("p-1").map(|p| p.stock), Some(12));
}

#[test]
fn top_product_keeps_first_of_equal_maxima() {
    let mut branch = Branch::with_id("b-1", "Centro");
    branch.products.push(Product::with_id("p-30", "small", 30));
    branch.products.push(Product::with_id("p-100a", "first max", 100));
    branch.products.push(Product::with_id("p-100b", "second max", 100));

    let top = branch.top_product().unwrap();
    assert_eq!(top.id, "p-100a");
}

#[test]
fn top_products_skips_branches_without_products() {
    let mut franchise = Franchise::with_id("f-1", "Burger Hut");
    let mut stocked = Branch::with_id("b-a", "Branch A");
    stocked.products.push(Product::with_id("p-1", "Burger", 100));
    franchise.branches.push(stocked);
    franchise.branches.push(Branch::with_id("b-b", "Branch B"));

    assert_eq!(
        franchise.top_products(),
        vec![TopProduct {
            product_id: "p-1".to_string(),
            product_name: "Burger".to_string(),
            stock: 100,
            branch_id: "b-a".to_string(),
            branch_name: "Branch A".to_string(),
        }]
    );
}

#[test]
fn franchise_serialization_uses_nested_document_shape() {
    let mut franchise = Franchise::with_id("f-1", "Burger Hut");
    let mut branch = Branch::with_id("b-1", "Centro");
    branch.products.push(Product::with_id("p-1", "Fries", 7));
    franchise.branches.push(branch);

    let json = serde_json::to_value(&franchise).unwrap();
    assert_eq!(json["id"], "f-1");
    assert_eq!(json["branches"][0]["id"], "b-1");
    assert_eq!(json["branches"][0]["products"][0]["name"], "Fries");
    assert_eq!(json["branches"][0]["products"][0]["stock"], 7);
}

#[test]
fn top_product_serializes_with_camel_case_keys() {
    let top = TopProduct {
        product_id: "p".to_string(),
        product_name: "Fries".to_string(),
        stock: 3,
        branch_id: "b".to_string(),
        branch_name: "Centro".to_string(),
    };

    let json = serde_json::to_value(&top).unwrap();
    assert_eq!(json["productId"], "p");
    assert_eq!(json["productName"], "Fries");
    assert_eq!(json["branchId"], "b");
    assert_eq!(json["branchName"], "Centro");
    assert_eq!(json["stock"], 3);
}

#[test]
fn negative_stock_is_not_decodable_into_a_product() {
    let decoded = serde_json::from_str::<Product>(r#"{"id":"p","name":"x","stock":-1}"#);
    assert!(decoded.is_err());
}
