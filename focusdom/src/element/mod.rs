mod content;
mod node;

pub use content::Content;
pub use node::Element;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Find the first element (in tree order) whose own text equals `text`.
pub fn find_by_text<'a>(root: &'a Element, text: &str) -> Option<&'a Element> {
    if let Content::Text(own) = &root.content {
        if own == text {
            return Some(root);
        }
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_by_text(child, text) {
                return Some(found);
            }
        }
    }

    None
}

/// Check whether `id` is `ancestor` itself or one of its descendants.
pub fn contains(ancestor: &Element, id: &str) -> bool {
    find_element(ancestor, id).is_some()
}

/// Concatenated text of an element and its descendants, space separated.
pub fn text_content(element: &Element) -> String {
    let mut parts = Vec::new();
    collect_text(element, &mut parts);
    parts.join(" ")
}

fn collect_text<'a>(element: &'a Element, parts: &mut Vec<&'a str>) {
    match &element.content {
        Content::Text(text) if !text.is_empty() => parts.push(text),
        Content::Children(children) => {
            for child in children {
                collect_text(child, parts);
            }
        }
        _ => {}
    }
}

/// Visit every element in tree order.
pub fn walk<'a>(root: &'a Element, visit: &mut impl FnMut(&'a Element)) {
    visit(root);
    if let Content::Children(children) = &root.content {
        for child in children {
            walk(child, visit);
        }
    }
}
