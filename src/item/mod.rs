//! Documented items as handed over by the reader
//!
//! Items arrive as loosely-typed JSON objects. The structural keys this crate
//! cares about (`type`, `description`, `properties`, `params`, `returns`,
//! `loc`) are read through accessors on [`TaggedItem`]; everything else is
//! passed to the templates untouched.

mod tags;

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use tags::{organize_tags, organize_tags_with, DEFAULT_TAG_KEY, DEFAULT_TAG_SIGIL};

/// A parsed item before tag normalization
pub type RawItem = Map<String, Value>;

/// Source location of a doc comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loc {
    pub file: PathBuf,
    pub line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// A cited type: parameter type, return type or property type
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeRef {
    #[serde(rename = "type")]
    pub name: String,
    #[serde(default)]
    pub loc: Option<Loc>,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            loc: None,
        }
    }

    pub fn with_loc(mut self, loc: Loc) -> Self {
        self.loc = Some(loc);
        self
    }
}

/// The broad category of an item, derived from its `type` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Function,
    Class,
    Interface,
    /// Any other type name: the item is a value of that type
    Value(String),
}

impl ItemKind {
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "Function" => ItemKind::Function,
            "class" => ItemKind::Class,
            "interface" => ItemKind::Interface,
            other => ItemKind::Value(other.to_string()),
        }
    }
}

/// An item whose `$`-prefixed keys were moved into a tag mapping
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TaggedItem {
    fields: Map<String, Value>,
    #[serde(skip)]
    tag_key: String,
}

impl TaggedItem {
    pub(crate) fn from_parts(fields: Map<String, Value>, tag_key: &str) -> Self {
        Self {
            fields,
            tag_key: tag_key.to_string(),
        }
    }

    /// All keys, including the tag mapping
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn type_name(&self) -> Option<&str> {
        self.fields.get("type").and_then(Value::as_str)
    }

    pub fn kind(&self) -> Option<ItemKind> {
        self.type_name().map(ItemKind::from_type_name)
    }

    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.fields.get("properties").and_then(Value::as_object)
    }

    /// The collected tags, keyed without their sigil
    pub fn tags(&self) -> &Map<String, Value> {
        static EMPTY: std::sync::OnceLock<Map<String, Value>> = std::sync::OnceLock::new();
        self.fields
            .get(&self.tag_key)
            .and_then(Value::as_object)
            .unwrap_or_else(|| EMPTY.get_or_init(Map::new))
    }

    /// Properties whose type is `Function`
    pub fn methods(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.member_iter().filter(|(_, v)| is_function(v))
    }

    /// Properties that are not functions
    pub fn data_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.member_iter().filter(|(_, v)| !is_function(v))
    }

    fn member_iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties()
            .into_iter()
            .flat_map(|props| props.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

fn is_function(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some("Function")
}

/// What the reader hands over: documented items plus the flat name space
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocData {
    pub items: IndexMap<String, RawItem>,
    #[serde(default)]
    pub all: IndexMap<String, Value>,
    #[serde(default, rename = "extraText")]
    pub extra_text: Option<String>,
}

/// Normalized items keyed by fully-qualified name, in reader order
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    items: IndexMap<String, TaggedItem>,
}

impl ItemRegistry {
    /// Normalize every top-level item with the default tag key and sigil
    pub fn from_raw(items: &IndexMap<String, RawItem>) -> Self {
        Self {
            items: items
                .iter()
                .map(|(name, raw)| (name.clone(), organize_tags(raw)))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TaggedItem> {
        self.items.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TaggedItem)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn classes(&self) -> impl Iterator<Item = (&str, &TaggedItem)> {
        self.of_kind(|k| *k == ItemKind::Class)
    }

    pub fn interfaces(&self) -> impl Iterator<Item = (&str, &TaggedItem)> {
        self.of_kind(|k| *k == ItemKind::Interface)
    }

    pub fn functions(&self) -> impl Iterator<Item = (&str, &TaggedItem)> {
        self.of_kind(|k| *k == ItemKind::Function)
    }

    /// Items that are neither classes, interfaces nor functions
    pub fn variables(&self) -> impl Iterator<Item = (&str, &TaggedItem)> {
        self.of_kind(|k| matches!(k, ItemKind::Value(_)))
    }

    fn of_kind<F>(&self, pred: F) -> impl Iterator<Item = (&str, &TaggedItem)>
    where
        F: Fn(&ItemKind) -> bool,
    {
        self.iter()
            .filter(move |(_, item)| item.kind().is_some_and(|k| pred(&k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry(value: Value) -> ItemRegistry {
        let data: DocData = serde_json::from_value(json!({ "items": value })).unwrap();
        ItemRegistry::from_raw(&data.items)
    }

    #[test]
    fn test_kind_from_type_name() {
        assert_eq!(ItemKind::from_type_name("Function"), ItemKind::Function);
        assert_eq!(ItemKind::from_type_name("class"), ItemKind::Class);
        assert_eq!(ItemKind::from_type_name("interface"), ItemKind::Interface);
        assert_eq!(
            ItemKind::from_type_name("number"),
            ItemKind::Value("number".to_string())
        );
    }

    #[test]
    fn test_categorization_views() {
        let reg = registry(json!({
            "Widget": { "type": "class" },
            "Shape": { "type": "interface" },
            "draw": { "type": "Function" },
            "version": { "type": "string" },
            "count": { "type": "number" }
        }));

        let names = |it: Vec<(&str, &TaggedItem)>| it.into_iter().map(|(n, _)| n.to_string()).collect::<Vec<_>>();
        assert_eq!(names(reg.classes().collect()), vec!["Widget"]);
        assert_eq!(names(reg.interfaces().collect()), vec!["Shape"]);
        assert_eq!(names(reg.functions().collect()), vec!["draw"]);
        assert_eq!(names(reg.variables().collect()), vec!["version", "count"]);
    }

    #[test]
    fn test_registry_keeps_reader_order() {
        let reg = registry(json!({ "b": { "type": "x" }, "a": { "type": "y" } }));
        assert_eq!(reg.names().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_methods_and_fields() {
        let reg = registry(json!({
            "Widget": {
                "type": "class",
                "properties": {
                    "render": { "type": "Function" },
                    "size": { "type": "number" }
                }
            }
        }));
        let widget = reg.get("Widget").unwrap();
        assert_eq!(widget.methods().map(|(n, _)| n).collect::<Vec<_>>(), vec!["render"]);
        assert_eq!(widget.data_fields().map(|(n, _)| n).collect::<Vec<_>>(), vec!["size"]);
    }

    #[test]
    fn test_loc_display() {
        let loc = Loc {
            file: PathBuf::from("src/widget.js"),
            line: 12,
            column: Some(4),
        };
        assert_eq!(loc.to_string(), "src/widget.js:12");
    }

    #[test]
    fn test_type_ref_ignores_extra_fields() {
        let ty: TypeRef = serde_json::from_value(json!({
            "type": "Widget",
            "description": "the widget",
            "loc": { "file": "a.js", "line": 3 }
        }))
        .unwrap();
        assert_eq!(ty.name, "Widget");
        assert_eq!(ty.loc.unwrap().line, 3);
    }
}
