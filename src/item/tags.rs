//! Tag extraction for parsed items

use serde_json::{Map, Value};

use super::{RawItem, TaggedItem};

/// Key under which collected tags are stored
pub const DEFAULT_TAG_KEY: &str = "tags";

/// Prefix marking a key as a tag
pub const DEFAULT_TAG_SIGIL: &str = "$";

/// Move every `$`-prefixed key of `item` into a `tags` mapping
///
/// ```
/// use builddocs::item::organize_tags;
/// use serde_json::json;
///
/// let raw = json!({ "type": "Function", "$added": "4.2" });
/// let tagged = organize_tags(raw.as_object().unwrap());
/// assert_eq!(tagged.tags()["added"], json!("4.2"));
/// assert!(tagged.get("$added").is_none());
/// ```
pub fn organize_tags(item: &RawItem) -> TaggedItem {
    organize_tags_with(item, DEFAULT_TAG_KEY, DEFAULT_TAG_SIGIL)
}

/// Like [`organize_tags`] with an explicit tag key and sigil
///
/// The input is only borrowed. Nested `properties` and `params` keep their
/// own tag keys.
pub fn organize_tags_with(item: &RawItem, tag_key: &str, tag_sigil: &str) -> TaggedItem {
    let mut fields = Map::new();
    let mut tags = Map::new();

    for (key, value) in item {
        match key.strip_prefix(tag_sigil) {
            Some(tag) => {
                tags.insert(tag.to_string(), value.clone());
            }
            None => {
                fields.insert(key.clone(), value.clone());
            }
        }
    }

    fields.insert(tag_key.to_string(), Value::Object(tags));
    TaggedItem::from_parts(fields, tag_key)
}
