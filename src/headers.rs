use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::form::HeaderEntry;
use crate::prune::is_empty_value;
use crate::xray::reader::scalar_to_string;

/// A wire header value: Xray accepts a bare string or a list of strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum HeaderValue {
    Single(String),
    Multi(Vec<String>),
}

impl HeaderValue {
    /// A single value stays a bare string on the wire.
    pub fn from_values(mut values: Vec<String>) -> Self {
        if values.len() == 1 {
            Self::Single(values.remove(0))
        } else {
            Self::Multi(values)
        }
    }

    pub fn values(&self) -> &[String] {
        match self {
            Self::Single(v) => std::slice::from_ref(v),
            Self::Multi(vs) => vs,
        }
    }
}

pub type HeaderMap = BTreeMap<String, HeaderValue>;

/// Expands a wire header map into editable rows, one row per value.
///
/// Never returns an empty list: an absent or empty map yields a single blank
/// row so the editor always has a row to type into.
pub fn header_map_to_list(map: Option<&HeaderMap>) -> Vec<HeaderEntry> {
    let rows: Vec<HeaderEntry> = map
        .into_iter()
        .flatten()
        .flat_map(|(name, value)| {
            value.values().iter().map(move |v| HeaderEntry {
                name: name.clone(),
                value: v.clone(),
            })
        })
        .collect();
    if rows.is_empty() {
        vec![HeaderEntry::default()]
    } else {
        rows
    }
}

/// Collapses editable rows into a wire header map.
///
/// Rows with a blank name or value are dropped, rows sharing a name are
/// grouped, and comma-separated values expand into a list. Returns `None`
/// when nothing valid remains so the field can be omitted.
pub fn list_to_header_map(rows: &[HeaderEntry]) -> Option<HeaderMap> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for row in rows {
        let name = row.name.trim();
        let value = row.value.trim();
        if name.is_empty() || value.is_empty() {
            continue;
        }
        let values = value
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        grouped.entry(name.to_string()).or_default().extend(values);
    }

    let map: HeaderMap = grouped
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(name, values)| (name, HeaderValue::from_values(values)))
        .collect();

    (!map.is_empty()).then_some(map)
}

/// Reads a header map leniently: non-string scalars are stringified, blank
/// values are dropped and entries of any other shape are skipped.
pub fn header_map_from_wire(value: Option<&Value>) -> Option<HeaderMap> {
    let obj = value?.as_object()?;
    let map: HeaderMap = obj
        .iter()
        .filter(|(_, v)| !is_empty_value(v))
        .filter_map(|(name, v)| {
            let value = match v {
                Value::Array(items) => {
                    let values: Vec<String> = items
                        .iter()
                        .filter(|item| !is_empty_value(item))
                        .filter_map(scalar_to_string)
                        .collect();
                    if values.is_empty() {
                        return None;
                    }
                    HeaderValue::Multi(values)
                }
                other => HeaderValue::Single(scalar_to_string(other)?),
            };
            Some((name.clone(), value))
        })
        .collect();
    (!map.is_empty()).then_some(map)
}

/// Removes the header whose name matches `name` case-insensitively.
pub fn take_header(map: &mut HeaderMap, name: &str) -> Option<HeaderValue> {
    let key = map.keys().find(|k| k.eq_ignore_ascii_case(name))?.clone();
    map.remove(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn row(name: &str, value: &str) -> HeaderEntry {
        HeaderEntry {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn absent_map_yields_one_blank_row() {
        assert_eq!(header_map_to_list(None), vec![HeaderEntry::default()]);
        assert_eq!(
            header_map_to_list(Some(&HeaderMap::new())),
            vec![HeaderEntry::default()]
        );
    }

    #[test]
    fn arrays_expand_to_one_row_per_value() {
        let mut map = HeaderMap::new();
        map.insert(
            "Accept".to_string(),
            HeaderValue::Multi(vec!["a".to_string(), "b".to_string()]),
        );
        map.insert("Host".to_string(), HeaderValue::Single("h".to_string()));
        assert_eq!(
            header_map_to_list(Some(&map)),
            vec![row("Accept", "a"), row("Accept", "b"), row("Host", "h")]
        );
    }

    #[test]
    fn rows_group_by_name_and_split_commas() {
        let map = list_to_header_map(&[
            row(" X-A ", " 1 "),
            row("X-A", "2"),
            row("X-B", "3, 4"),
            row("X-C", "5"),
            row("", "orphan"),
            row("X-D", "  "),
        ])
        .unwrap();
        assert_eq!(
            serde_json::to_value(&map).unwrap(),
            json!({ "X-A": ["1", "2"], "X-B": ["3", "4"], "X-C": "5" })
        );
    }

    #[test]
    fn no_valid_rows_means_no_map() {
        assert_eq!(list_to_header_map(&[HeaderEntry::default()]), None);
        assert_eq!(list_to_header_map(&[]), None);
    }

    #[test]
    fn map_survives_list_round_trip() {
        let rows = vec![row("X-A", "1"), row("X-A", "2"), row("Host", "example.com")];
        let first = list_to_header_map(&rows).unwrap();
        let second = list_to_header_map(&header_map_to_list(Some(&first))).unwrap();
        assert_eq!(second, first);
    }

    #[test]
    fn wire_reader_stringifies_scalars() {
        let map = header_map_from_wire(Some(&json!({
            "Host": "example.com",
            "X-Num": 7,
            "X-List": ["a", 1],
            "X-Bad": { "nested": true },
        })))
        .unwrap();
        assert_eq!(
            serde_json::to_value(&map).unwrap(),
            json!({ "Host": "example.com", "X-Num": "7", "X-List": ["a", "1"] })
        );
        assert_eq!(header_map_from_wire(Some(&json!("nope"))), None);
        assert_eq!(
            header_map_from_wire(Some(&json!({ "X-Blank": " ", "X-None": [], "X-Nil": null }))),
            None
        );
    }

    #[test]
    fn take_header_is_case_insensitive() {
        let mut map = header_map_from_wire(Some(&json!({ "host": ["a.com", "b.com"] }))).unwrap();
        assert_eq!(
            take_header(&mut map, "Host"),
            Some(HeaderValue::Multi(vec!["a.com".to_string(), "b.com".to_string()]))
        );
        assert!(map.is_empty());
    }
}
