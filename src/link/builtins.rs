//! Link tables shipped with the crate

use crate::config::LinkMap;

const MDN_GLOBALS: &str = "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/";
const MDN_DATA_STRUCTURES: &str = "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Data_structures";
const MDN_API: &str = "https://developer.mozilla.org/en-US/docs/Web/API/";

/// JavaScript global objects documented under MDN's `Global_Objects`
const GLOBAL_OBJECTS: &[&str] = &[
    "Array",
    "ArrayBuffer",
    "BigInt",
    "Boolean",
    "DataView",
    "Date",
    "Error",
    "Float32Array",
    "Float64Array",
    "Function",
    "Int8Array",
    "Int16Array",
    "Int32Array",
    "Iterator",
    "JSON",
    "Map",
    "Math",
    "Number",
    "Object",
    "Promise",
    "Proxy",
    "RangeError",
    "RegExp",
    "Set",
    "String",
    "Symbol",
    "SyntaxError",
    "TypeError",
    "Uint8Array",
    "Uint8ClampedArray",
    "Uint16Array",
    "Uint32Array",
    "WeakMap",
    "WeakSet",
];

/// Lowercase primitive names and their MDN anchors
const PRIMITIVES: &[(&str, &str)] = &[
    ("string", "#String_type"),
    ("number", "#Number_type"),
    ("bool", "#Boolean_type"),
    ("boolean", "#Boolean_type"),
    ("bigint", "#BigInt_type"),
    ("symbol", "#Symbol_type"),
    ("null", "#Null_type"),
    ("undefined", "#Undefined_type"),
    ("any", ""),
    ("this", ""),
];

/// DOM and other Web API interfaces
const BROWSER_TYPES: &[&str] = &[
    "Attr",
    "Blob",
    "CSSStyleDeclaration",
    "ClipboardEvent",
    "CompositionEvent",
    "DOMRect",
    "DataTransfer",
    "Document",
    "DocumentFragment",
    "DragEvent",
    "Element",
    "Event",
    "EventTarget",
    "File",
    "FileList",
    "FocusEvent",
    "HTMLElement",
    "HTMLInputElement",
    "InputEvent",
    "KeyboardEvent",
    "MouseEvent",
    "MutationObserver",
    "MutationRecord",
    "Node",
    "NodeList",
    "Range",
    "Selection",
    "ShadowRoot",
    "Text",
    "TouchEvent",
    "UIEvent",
    "URL",
    "WheelEvent",
    "Window",
];

/// URL for a language built-in type, if it is one
pub fn builtin_link(name: &str) -> Option<String> {
    if GLOBAL_OBJECTS.contains(&name) {
        return Some(format!("{}{}", MDN_GLOBALS, name));
    }
    PRIMITIVES
        .iter()
        .find(|(prim, _)| *prim == name)
        .map(|(_, anchor)| format!("{}{}", MDN_DATA_STRUCTURES, anchor))
}

/// A bundled import table by name
///
/// Only `browser` is shipped.
pub fn bundled_imports(name: &str) -> Option<LinkMap> {
    match name {
        "browser" => Some(browser_imports()),
        _ => None,
    }
}

/// Web API types linked to their MDN pages
pub fn browser_imports() -> LinkMap {
    BROWSER_TYPES
        .iter()
        .map(|ty| (ty.to_string(), format!("{}{}", MDN_API, ty)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_object_link() {
        assert_eq!(
            builtin_link("Promise").as_deref(),
            Some("https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Promise")
        );
    }

    #[test]
    fn test_primitive_link() {
        let link = builtin_link("string").unwrap();
        assert!(link.ends_with("Data_structures#String_type"));
    }

    #[test]
    fn test_unknown_is_none() {
        assert_eq!(builtin_link("Widget"), None);
        assert_eq!(builtin_link("Element"), None);
    }

    #[test]
    fn test_browser_bundle() {
        let table = bundled_imports("browser").unwrap();
        assert_eq!(table["Node"], "https://developer.mozilla.org/en-US/docs/Web/API/Node");
        assert!(bundled_imports("deno").is_none());
    }
}
