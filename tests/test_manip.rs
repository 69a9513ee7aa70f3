use eltree::Document;

#[test]
fn test_add_child_reparents() {
    let mut doc = Document::parse("<r><p1><x/></p1><p2/></r>").unwrap();
    let r = doc.root().unwrap();
    let p1 = doc.select_element(r, "p1").unwrap();
    let p2 = doc.select_element(r, "p2").unwrap();
    let x = doc.first_child(p1).unwrap();

    doc.add_child(p2, x).unwrap();

    assert_eq!(doc.children(p1).count(), 0);
    assert_eq!(doc.parent(x), Some(p2));
    assert_eq!(doc.index(x), Some(0));
    assert_eq!(doc.to_xml_string().unwrap(), "<r><p1/><p2><x/></p2></r>");
}

#[test]
fn test_insert_child_at_reorders_siblings() {
    let mut doc = Document::parse("<p><a/><b/></p>").unwrap();
    let p = doc.root().unwrap();
    let a = doc.child_at(p, 0).unwrap();
    let b = doc.child_at(p, 1).unwrap();

    doc.insert_child_at(p, 0, b).unwrap();

    assert_eq!(doc.index(b), Some(0));
    assert_eq!(doc.index(a), Some(1));
    assert_eq!(doc.parent(a), Some(p));
    assert_eq!(doc.parent(b), Some(p));
    assert_eq!(doc.to_xml_string().unwrap(), "<p><b/><a/></p>");
}

#[test]
fn test_insert_child_at_adjusts_for_forward_move() {
    let mut doc = Document::parse("<p><c0/><c1/><c2/><c3/><c4/><c5/><t/></p>").unwrap();
    let p = doc.root().unwrap();
    let t = doc.child_at(p, 6).unwrap();

    doc.insert_child_at(p, 1, t).unwrap();

    assert_eq!(doc.index(t), Some(1));
    assert_eq!(
        doc.to_xml_string().unwrap(),
        "<p><c0/><t/><c1/><c2/><c3/><c4/><c5/></p>"
    );
}

#[test]
fn test_insert_child_at_backward_move() {
    let mut doc = Document::parse("<p><a/><b/><c/></p>").unwrap();
    let p = doc.root().unwrap();
    let a = doc.child_at(p, 0).unwrap();

    doc.insert_child_at(p, 2, a).unwrap();

    assert_eq!(doc.to_xml_string().unwrap(), "<p><b/><c/><a/></p>");
}

#[test]
fn test_insert_child_at_end_appends() {
    let mut doc = Document::parse("<p><a/></p>").unwrap();
    let p = doc.root().unwrap();
    let b = doc.new_element("b");

    doc.insert_child_at(p, 5, b).unwrap();

    assert_eq!(doc.index(b), Some(1));
    assert_eq!(doc.to_xml_string().unwrap(), "<p><a/><b/></p>");
}

#[test]
fn test_remove_child_at() {
    let mut doc = Document::parse("<p><a/><b>keep</b><c/></p>").unwrap();
    let p = doc.root().unwrap();

    let removed = doc.remove_child_at(p, 1).unwrap();
    assert_eq!(doc.parent(removed), None);
    assert_eq!(doc.index(removed), None);
    // the removed subtree stays intact
    assert_eq!(doc.text_content(removed), "keep");

    let c = doc.child_at(p, 1).unwrap();
    assert_eq!(doc.element(c).unwrap().tag(), "c");
    assert_eq!(doc.index(c), Some(1));

    assert!(doc.remove_child_at(p, 7).is_none());
}

#[test]
fn test_remove_child_requires_matching_parent() {
    let mut doc = Document::parse("<r><p1><x/></p1><p2/></r>").unwrap();
    let r = doc.root().unwrap();
    let p1 = doc.select_element(r, "p1").unwrap();
    let p2 = doc.select_element(r, "p2").unwrap();
    let x = doc.first_child(p1).unwrap();

    assert!(doc.remove_child(p2, x).is_none());
    assert_eq!(doc.parent(x), Some(p1));

    let removed = doc.remove_child(p1, x).unwrap();
    assert_eq!(removed, x);
    assert_eq!(doc.parent(x), None);
}

#[test]
fn test_set_root_replaces_in_place() {
    let mut doc = Document::parse("<!--lead--><a/><!--trail-->").unwrap();
    let old = doc.root().unwrap();
    let new = doc.new_element("b");

    doc.set_root(new).unwrap();

    assert_eq!(doc.root(), Some(new));
    assert_eq!(doc.index(new), Some(1));
    assert_eq!(doc.parent(old), None);
    assert_eq!(doc.to_xml_string().unwrap(), "<!--lead--><b/><!--trail-->");
}

#[test]
fn test_new_with_root() {
    let (mut doc, root) = Document::new_with_root("ns:doc");
    assert_eq!(doc.root(), Some(root));
    assert_eq!(doc.parent(root), Some(doc.container()));
    assert_eq!(doc.index(root), Some(0));

    doc.create_text(root, "body").unwrap();
    assert_eq!(
        doc.to_xml_string().unwrap(),
        "<ns:doc>body</ns:doc>"
    );
}

#[test]
fn test_set_root_appends_when_no_root() {
    let mut doc = Document::new();
    let root = doc.new_element("a");
    doc.set_root(root).unwrap();
    assert_eq!(doc.root(), Some(root));
    assert_eq!(doc.to_xml_string().unwrap(), "<a/>");
}

#[test]
fn test_set_root_rejects_non_element() {
    let mut doc = Document::new();
    let text = doc.new_text("hi");
    assert!(doc.set_root(text).is_err());
}

#[test]
fn test_copy_node_is_deep_and_detached() {
    let mut doc = Document::parse(r#"<r><a k="v"><b>text</b></a></r>"#).unwrap();
    let r = doc.root().unwrap();
    let a = doc.first_child(r).unwrap();

    let dup = doc.copy_node(a);
    assert_eq!(doc.parent(dup), None);
    assert_eq!(doc.node_to_xml_string(dup).unwrap(), r#"<a k="v"><b>text</b></a>"#);

    // no shared mutable state
    doc.element_mut(dup).unwrap().create_attr("k", "changed");
    doc.set_text(dup, "replaced");
    assert_eq!(
        doc.node_to_xml_string(a).unwrap(),
        r#"<a k="v"><b>text</b></a>"#
    );
}

#[test]
fn test_document_copy_is_independent() {
    let doc = Document::parse(r#"<?xml version="1.0"?><r><a/></r>"#).unwrap();
    let mut dup = doc.copy();
    assert_eq!(dup.to_xml_string().unwrap(), doc.to_xml_string().unwrap());

    let r = dup.root().unwrap();
    dup.create_element(r, "b").unwrap();
    assert_ne!(dup.to_xml_string().unwrap(), doc.to_xml_string().unwrap());
}

#[test]
fn test_attach_into_own_subtree_fails() {
    let mut doc = Document::parse("<a><b><c/></b></a>").unwrap();
    let a = doc.root().unwrap();
    let b = doc.first_child(a).unwrap();
    let c = doc.first_child(b).unwrap();

    assert!(doc.add_child(c, a).is_err());
    assert!(doc.add_child(b, b).is_err());
    // tree unchanged
    assert_eq!(doc.to_xml_string().unwrap(), "<a><b><c/></b></a>");
}

#[test]
fn test_add_child_rejects_non_element_parent() {
    let mut doc = Document::parse("<a>text</a>").unwrap();
    let a = doc.root().unwrap();
    let text = doc.first_child(a).unwrap();
    let el = doc.new_element("x");
    assert!(doc.add_child(text, el).is_err());
}

#[test]
fn test_set_text() {
    let mut doc = Document::parse("<a>one<x/>two</a>").unwrap();
    let a = doc.root().unwrap();

    doc.set_text(a, "changed");
    assert_eq!(doc.to_xml_string().unwrap(), "<a>changed<x/>two</a>");

    doc.set_text(a, "");
    assert_eq!(doc.to_xml_string().unwrap(), "<a><x/>two</a>");

    doc.set_text(a, "fresh");
    assert_eq!(doc.to_xml_string().unwrap(), "<a>fresh<x/>two</a>");
}

#[test]
fn test_set_text_merges_run() {
    let mut doc = Document::parse("<a>one<![CDATA[two]]><x/></a>").unwrap();
    let a = doc.root().unwrap();
    doc.set_text(a, "single");
    assert_eq!(doc.to_xml_string().unwrap(), "<a>single<x/></a>");
    assert_eq!(doc.children(a).count(), 2);
}

#[test]
fn test_set_cdata() {
    let mut doc = Document::parse("<a>plain</a>").unwrap();
    let a = doc.root().unwrap();
    doc.set_cdata(a, "with <markup>");
    assert_eq!(
        doc.to_xml_string().unwrap(),
        "<a><![CDATA[with <markup>]]></a>"
    );
}

#[test]
fn test_set_tail() {
    let mut doc = Document::parse("<r><x/>old tail<y/></r>").unwrap();
    let r = doc.root().unwrap();
    let x = doc.select_element(r, "x").unwrap();

    doc.set_tail(x, "new tail");
    assert_eq!(doc.to_xml_string().unwrap(), "<r><x/>new tail<y/></r>");

    doc.set_tail(x, "");
    assert_eq!(doc.to_xml_string().unwrap(), "<r><x/><y/></r>");
}

#[test]
fn test_attribute_updates() {
    let mut doc = Document::parse(r#"<a k="1"/>"#).unwrap();
    let a = doc.root().unwrap();

    doc.element_mut(a).unwrap().create_attr("k", "2");
    doc.element_mut(a).unwrap().create_attr("n", "3");
    assert_eq!(doc.to_xml_string().unwrap(), r#"<a k="2" n="3"/>"#);

    let removed = doc.element_mut(a).unwrap().remove_attr("k").unwrap();
    assert_eq!(removed.value(), "2");
    assert!(doc.element_mut(a).unwrap().remove_attr("k").is_none());
    assert_eq!(doc.to_xml_string().unwrap(), r#"<a n="3"/>"#);
}

#[test]
fn test_sort_attrs() {
    let mut doc = Document::parse(r#"<a z="1" b="2" ns:a="3" a="4"/>"#).unwrap();
    let a = doc.root().unwrap();
    doc.element_mut(a).unwrap().sort_attrs();
    assert_eq!(
        doc.to_xml_string().unwrap(),
        r#"<a a="4" b="2" z="1" ns:a="3"/>"#
    );
}

#[test]
fn test_detach_makes_fragment() {
    let mut doc = Document::parse("<r><a><b/></a></r>").unwrap();
    let r = doc.root().unwrap();
    let a = doc.first_child(r).unwrap();

    doc.detach(a);
    assert_eq!(doc.to_xml_string().unwrap(), "<r/>");
    assert_eq!(doc.node_to_xml_string(a).unwrap(), "<a><b/></a>");
}
