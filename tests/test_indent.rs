use eltree::{Document, NO_INDENT};

#[test]
fn indent_two_spaces() {
    let mut doc = Document::parse("<a><b/><c/></a>").unwrap();
    doc.indent(2);
    assert_eq!(doc.to_xml_string().unwrap(), "<a>\n  <b/>\n  <c/>\n</a>\n");
}

#[test]
fn indent_nested() {
    let mut doc = Document::parse("<a><b><c/></b></a>").unwrap();
    doc.indent(2);
    assert_eq!(
        doc.to_xml_string().unwrap(),
        "<a>\n  <b>\n    <c/>\n  </b>\n</a>\n"
    );
}

#[test]
fn indent_then_strip_is_identity() {
    let xml = "<a><b/><c/></a>";
    let mut doc = Document::parse(xml).unwrap();
    doc.indent(2);
    doc.strip_indent();
    assert_eq!(doc.to_xml_string().unwrap(), xml);
}

#[test]
fn indent_tabs() {
    let mut doc = Document::parse("<a><b/><c/></a>").unwrap();
    doc.indent_tabs();
    assert_eq!(doc.to_xml_string().unwrap(), "<a>\n\t<b/>\n\t<c/>\n</a>\n");
}

#[test]
fn indent_crlf() {
    let mut doc = Document::parse("<a><b/></a>").unwrap();
    doc.write_settings.use_crlf = true;
    doc.indent(2);
    assert_eq!(doc.to_xml_string().unwrap(), "<a>\r\n  <b/>\r\n</a>\r\n");
}

#[test]
fn indent_zero_inserts_bare_newlines() {
    let mut doc = Document::parse("<a><b/></a>").unwrap();
    doc.indent(0);
    assert_eq!(doc.to_xml_string().unwrap(), "<a>\n<b/>\n</a>\n");
}

#[test]
fn negative_indent_leaves_tree_untouched() {
    let xml = "<a>\n   <b/>\n</a>";
    let mut doc = Document::parse(xml).unwrap();
    doc.indent(NO_INDENT);
    assert_eq!(doc.to_xml_string().unwrap(), xml);
}

#[test]
fn indent_is_idempotent() {
    let mut doc = Document::parse("<a><b><c/></b><d/></a>").unwrap();
    doc.indent(2);
    let once = doc.to_xml_string().unwrap();
    doc.indent(2);
    assert_eq!(doc.to_xml_string().unwrap(), once);
}

#[test]
fn indent_replaces_existing_whitespace() {
    let mut doc = Document::parse("<a>\n      <b/>\n</a>").unwrap();
    doc.indent(2);
    assert_eq!(doc.to_xml_string().unwrap(), "<a>\n  <b/>\n</a>\n");
}

#[test]
fn indent_keeps_document_text() {
    let mut doc = Document::parse("<p>hi<b/></p>").unwrap();
    doc.indent(2);
    assert_eq!(doc.to_xml_string().unwrap(), "<p>hi\n  <b/>\n</p>\n");

    doc.strip_indent();
    assert_eq!(doc.to_xml_string().unwrap(), "<p>hi<b/></p>");
}

#[test]
fn indent_text_only_element() {
    let mut doc = Document::parse("<a>text</a>").unwrap();
    doc.indent(2);
    assert_eq!(doc.to_xml_string().unwrap(), "<a>text</a>\n");
}

#[test]
fn indent_document_preamble() {
    let mut doc = Document::parse(r#"<?xml version="1.0"?><a><b/></a>"#).unwrap();
    doc.indent(2);
    assert_eq!(
        doc.to_xml_string().unwrap(),
        "<?xml version=\"1.0\"?>\n<a>\n  <b/>\n</a>\n"
    );
}

#[test]
fn strip_indent_keeps_real_text() {
    let mut doc = Document::parse("<a>  <b>real text</b>\n</a>").unwrap();
    doc.strip_indent();
    assert_eq!(doc.to_xml_string().unwrap(), "<a><b>real text</b></a>");
}
