use eltree::Document;
use proptest::prelude::*;

fn build(tags: &[String], texts: &[String]) -> Document {
    let mut doc = Document::new();
    let root = doc.new_element("doc");
    doc.set_root(root).unwrap();
    for (tag, text) in tags.iter().zip(texts.iter().cycle()) {
        let child = doc.create_element(root, tag).unwrap();
        if !text.is_empty() {
            doc.create_text(child, text).unwrap();
        }
    }
    doc
}

proptest! {
    // Serialization is a fixed point: write, reread, write again and the
    // bytes agree.
    #[test]
    fn serialize_reread_serialize_is_stable(
        tags in proptest::collection::vec("[a-z]{1,8}", 1..6),
        texts in proptest::collection::vec("[a-zA-Z0-9 ]{0,12}", 1..6),
    ) {
        let doc = build(&tags, &texts);
        let first = doc.to_xml_string().unwrap();
        let reread = Document::parse(&first).unwrap();
        prop_assert_eq!(reread.to_xml_string().unwrap(), first);
    }

    // Child positions stay contiguous and parent links stay current no
    // matter where children are inserted.
    #[test]
    fn insertion_keeps_indices_contiguous(
        tags in proptest::collection::vec("[a-z]{1,6}", 1..8),
        positions in proptest::collection::vec(0usize..16, 1..8),
    ) {
        let mut doc = Document::new();
        let root = doc.new_element("doc");
        doc.set_root(root).unwrap();
        for (tag, pos) in tags.iter().zip(positions.iter()) {
            let child = doc.new_element(tag);
            doc.insert_child_at(root, *pos, child).unwrap();
        }
        let children: Vec<_> = doc.children(root).collect();
        prop_assert_eq!(children.len(), tags.len());
        for (i, child) in children.iter().enumerate() {
            prop_assert_eq!(doc.index(*child), Some(i));
            prop_assert_eq!(doc.parent(*child), Some(root));
        }
    }

    // Indenting and stripping returns to the original serialization.
    #[test]
    fn indent_strip_is_identity(
        tags in proptest::collection::vec("[a-z]{1,8}", 1..6),
        spaces in 0isize..6,
    ) {
        let texts = vec!["body".to_string()];
        let mut doc = build(&tags, &texts);
        let before = doc.to_xml_string().unwrap();
        doc.indent(spaces);
        doc.strip_indent();
        prop_assert_eq!(doc.to_xml_string().unwrap(), before);
    }
}
