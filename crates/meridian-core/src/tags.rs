// SPDX-License-Identifier: Apache-2.0
//! Tag storage and the classification tables driven by it.
//!
//! Tables are data, not branching: each classification query scans a const
//! slice so the vocabulary can be audited (and extended) in one place. The
//! contents mirror the conventions of the upstream map data model; they are
//! deliberately representative rather than exhaustive.

use std::collections::BTreeMap;

/// String→string tag map. `BTreeMap` so iteration order is deterministic
/// wherever tags become observable (serialization, test assertions).
pub type Tags = BTreeMap<String, String>;

/// Keys that say nothing about what a feature *is*: provenance and editor
/// bookkeeping. Entities whose tags are all uninteresting may be silently
/// cleaned up by delete cascades.
const UNINTERESTING_KEYS: &[&str] = &["attribution", "created_by", "odbl", "source", "source_ref"];

/// Key prefixes with the same bookkeeping status as [`UNINTERESTING_KEYS`].
const UNINTERESTING_PREFIXES: &[&str] = &["source:", "tiger:"];

/// Keys whose presence on a closed way implies an area.
const AREA_KEYS: &[&str] = &[
    "amenity",
    "area:highway",
    "building",
    "building:part",
    "craft",
    "historic",
    "indoor",
    "landuse",
    "leisure",
    "man_made",
    "natural",
    "office",
    "place",
    "shop",
    "tourism",
];

/// Exceptions to [`AREA_KEYS`]: `key=value` pairs that stay linear even on a
/// closed way.
const AREA_EXCEPTIONS: &[(&str, &str)] = &[
    ("natural", "coastline"),
    ("natural", "cliff"),
    ("natural", "ridge"),
    ("natural", "tree_row"),
    ("man_made", "embankment"),
    ("man_made", "pipeline"),
    ("leisure", "slipway"),
    ("leisure", "track"),
];

/// `key=value` pairs that imply one-way traversal without an explicit
/// `oneway` tag.
const IMPLIED_ONEWAY_TAGS: &[(&str, &str)] = &[
    ("junction", "circular"),
    ("junction", "roundabout"),
    ("highway", "motorway"),
    ("waterway", "river"),
    ("waterway", "stream"),
    ("waterway", "tidal_channel"),
];

/// `oneway` values that negate an implied one-way.
const ONEWAY_OFF_VALUES: &[&str] = &["no", "0", "false"];

/// `oneway` values that assert one-way traversal (forward or reverse).
const ONEWAY_ON_VALUES: &[&str] = &["yes", "1", "true", "-1", "reverse"];

/// `key=value` pairs marking features with a meaningful left/right side
/// (cliffs face downhill, walls face outward).
const SIDED_TAGS: &[(&str, &str)] = &[
    ("natural", "cliff"),
    ("natural", "coastline"),
    ("barrier", "city_wall"),
    ("barrier", "guard_rail"),
    ("barrier", "kerb"),
    ("barrier", "retaining_wall"),
];

/// `true` when `key` describes the feature itself rather than provenance.
#[must_use]
pub fn is_interesting_key(key: &str) -> bool {
    !UNINTERESTING_KEYS.contains(&key) && !UNINTERESTING_PREFIXES.iter().any(|p| key.starts_with(p))
}

/// `true` when at least one tag is interesting per [`is_interesting_key`].
#[must_use]
pub fn has_interesting_tags(tags: &Tags) -> bool {
    tags.keys().any(|k| is_interesting_key(k))
}

/// Whether these tags suggest an area when carried by a closed way.
///
/// `area=yes`/`area=no` override the key tables in either direction.
#[must_use]
pub fn suggests_area(tags: &Tags) -> bool {
    match tags.get("area").map(String::as_str) {
        Some("yes") => return true,
        Some("no") => return false,
        _ => {}
    }
    tags.iter().any(|(k, v)| {
        AREA_KEYS.contains(&k.as_str())
            && v != "no"
            && !AREA_EXCEPTIONS.contains(&(k.as_str(), v.as_str()))
    })
}

/// Whether these tags mark a one-way line.
///
/// An explicit `oneway` wins; otherwise the implied-oneway table applies.
#[must_use]
pub fn suggests_one_way(tags: &Tags) -> bool {
    if let Some(v) = tags.get("oneway") {
        if ONEWAY_ON_VALUES.contains(&v.as_str()) {
            return true;
        }
        if ONEWAY_OFF_VALUES.contains(&v.as_str()) {
            return false;
        }
    }
    tags.iter()
        .any(|(k, v)| IMPLIED_ONEWAY_TAGS.contains(&(k.as_str(), v.as_str())))
}

/// Whether these tags mark a sided feature (meaningful left/right).
#[must_use]
pub fn is_sided(tags: &Tags) -> bool {
    tags.iter()
        .any(|(k, v)| SIDED_TAGS.contains(&(k.as_str(), v.as_str())))
}

/// Unions `from` into `into`, first occurrence winning on key conflicts.
pub fn merge_tags(into: &mut Tags, from: &Tags) {
    for (k, v) in from {
        into.entry(k.clone()).or_insert_with(|| v.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn provenance_keys_are_uninteresting() {
        assert!(!has_interesting_tags(&tags(&[
            ("source", "survey"),
            ("tiger:county", "x"),
        ])));
        assert!(has_interesting_tags(&tags(&[
            ("source", "survey"),
            ("highway", "residential"),
        ])));
    }

    #[test]
    fn area_override_beats_tables() {
        assert!(suggests_area(&tags(&[("highway", "service"), ("area", "yes")])));
        assert!(!suggests_area(&tags(&[("building", "yes"), ("area", "no")])));
        assert!(suggests_area(&tags(&[("building", "yes")])));
        assert!(!suggests_area(&tags(&[("natural", "coastline")])));
    }

    #[test]
    fn oneway_explicit_and_implied() {
        assert!(suggests_one_way(&tags(&[("oneway", "-1")])));
        assert!(suggests_one_way(&tags(&[("junction", "roundabout")])));
        assert!(!suggests_one_way(&tags(&[
            ("junction", "roundabout"),
            ("oneway", "no"),
        ])));
        assert!(!suggests_one_way(&tags(&[("highway", "residential")])));
    }

    #[test]
    fn merge_keeps_first_occurrence() {
        let mut acc = tags(&[("name", "first")]);
        merge_tags(&mut acc, &tags(&[("name", "second"), ("ref", "B1")]));
        assert_eq!(acc.get("name").map(String::as_str), Some("first"));
        assert_eq!(acc.get("ref").map(String::as_str), Some("B1"));
    }
}
