//! Small helpers shared by the reader and the annotator.

use deckstyle_core::Error;
use quick_xml::events::BytesStart;

/// Extract the local name from a potentially namespaced XML element name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract the namespace prefix of an element name, if any.
pub(crate) fn prefix(name: &[u8]) -> Option<&[u8]> {
    name.iter().position(|&b| b == b':').map(|pos| &name[..pos])
}

/// Whether the element's local name is `local`.
pub(crate) fn is_element(e: &BytesStart<'_>, local: &[u8]) -> bool {
    local_name(e.name().as_ref()) == local
}

/// Whether an element name is a DrawingML text run (`a:r`).
///
/// Equations nest Office Math runs (`m:r`) inside paragraphs; those are
/// neither read as text nor counted as run ordinals.
pub(crate) fn is_text_run(name: &[u8]) -> bool {
    local_name(name) == b"r" && prefix(name) == Some(b"a")
}

/// Value of the attribute whose full key is `key`.
pub(crate) fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Value of a namespaced relationship reference such as `r:id`.
pub(crate) fn relationship_id(e: &BytesStart<'_>) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| {
            let key = attr.key.as_ref();
            prefix(key).is_some() && local_name(key) == b"id"
        })
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

pub(crate) fn xml_error(context: &str, e: quick_xml::Error) -> Error {
    Error::XmlError(format!("{}: {}", context, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_prefix() {
        assert_eq!(prefix(b"a:rPr"), Some(&b"a"[..]));
        assert_eq!(prefix(b"rPr"), None);
    }

    #[test]
    fn test_is_text_run() {
        assert!(is_text_run(b"a:r"));
        assert!(!is_text_run(b"m:r"));
        assert!(!is_text_run(b"a:rPr"));
        assert!(!is_text_run(b"r"));
    }

    #[test]
    fn test_relationship_id_ignores_plain_id() {
        let mut e = BytesStart::new("p:sldId");
        e.push_attribute(("id", "256"));
        e.push_attribute(("r:id", "rId2"));

        assert_eq!(relationship_id(&e), Some("rId2".to_string()));
        assert_eq!(attribute(&e, b"id"), Some("256".to_string()));
    }
}
