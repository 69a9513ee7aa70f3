use eltree::Document;

#[test]
fn test_prefixed_namespace_resolution() {
    let mut doc = Document::parse(r#"<root xmlns:n="urn:x"><n:foo/></root>"#).unwrap();
    let root = doc.root().unwrap();
    let foo = doc.select_element(root, "foo").unwrap();

    assert_eq!(doc.namespace_uri(foo), "urn:x");

    // resolution is dynamic: removing the declaration unbinds the prefix
    doc.element_mut(root).unwrap().remove_attr("xmlns:n");
    assert_eq!(doc.namespace_uri(foo), "");
}

#[test]
fn test_default_namespace_resolution() {
    let doc = Document::parse(r#"<root xmlns="urn:d"><child/></root>"#).unwrap();
    let root = doc.root().unwrap();
    let child = doc.first_child(root).unwrap();

    assert_eq!(doc.namespace_uri(root), "urn:d");
    assert_eq!(doc.namespace_uri(child), "urn:d");
}

#[test]
fn test_nested_declaration_overrides() {
    let doc = Document::parse(
        r#"<r xmlns:n="urn:outer"><mid xmlns:n="urn:inner"><n:leaf/></mid><n:leaf/></r>"#,
    )
    .unwrap();
    let r = doc.root().unwrap();
    let mid = doc.select_element(r, "mid").unwrap();
    let inner_leaf = doc.first_child(mid).unwrap();
    let outer_leaf = doc.select_element(r, "leaf").unwrap();

    assert_eq!(doc.namespace_uri(inner_leaf), "urn:inner");
    assert_eq!(doc.namespace_uri(outer_leaf), "urn:outer");
}

#[test]
fn test_unbound_prefix_resolves_to_empty() {
    let doc = Document::parse("<r><n:foo/></r>").unwrap();
    let r = doc.root().unwrap();
    let foo = doc.first_child(r).unwrap();
    assert_eq!(doc.namespace_uri(foo), "");
}

#[test]
fn test_default_namespace_does_not_apply_to_prefixed_element() {
    let doc = Document::parse(r#"<r xmlns="urn:d" xmlns:p="urn:p"><p:x/></r>"#).unwrap();
    let r = doc.root().unwrap();
    let x = doc.first_child(r).unwrap();
    assert_eq!(doc.namespace_uri(x), "urn:p");
}

#[test]
fn test_attribute_namespace() {
    let doc = Document::parse(r#"<r xmlns:n="urn:x" n:a="1" b="2"/>"#).unwrap();
    let r = doc.root().unwrap();

    assert_eq!(doc.attribute_namespace_uri(r, "n:a"), "urn:x");
    // unprefixed attributes are in no namespace, even with a default
    assert_eq!(doc.attribute_namespace_uri(r, "b"), "");
}

#[test]
fn test_added_declaration_binds_descendants() {
    let mut doc = Document::parse("<root><n:foo/></root>").unwrap();
    let root = doc.root().unwrap();
    let foo = doc.first_child(root).unwrap();
    assert_eq!(doc.namespace_uri(foo), "");

    doc.element_mut(root).unwrap().create_attr("xmlns:n", "urn:late");
    assert_eq!(doc.namespace_uri(foo), "urn:late");
}
