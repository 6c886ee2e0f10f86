//! The fixed, ordered class palette shared by drawing, overlay and export.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::ids::ClassId;

/// An opaque 24-bit display color, written as `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let hex = raw
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| format!("color '{raw}' must start with '#'"))?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("color '{raw}' must be #RRGGBB"));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| format!("color '{raw}' is not hex"))
        };
        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One entry of the class list: a label and its overlay color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassEntry {
    pub name: String,
    pub color: Rgb,
}

impl ClassEntry {
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Ordered class list. A [`ClassId`] is an index into it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassList {
    entries: Vec<ClassEntry>,
}

impl ClassList {
    pub fn new(entries: Vec<ClassEntry>) -> Self {
        Self { entries }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `id` indexes an entry of this list.
    #[inline]
    pub fn contains(&self, id: ClassId) -> bool {
        id.index() < self.entries.len()
    }

    pub fn get(&self, id: ClassId) -> Option<&ClassEntry> {
        self.entries.get(id.index())
    }

    /// Returns the class name, or `class_<id>` for ids outside the list.
    pub fn name_or_placeholder(&self, id: ClassId) -> String {
        self.get(id)
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| format!("class_{}", id.index()))
    }

    /// Finds the id of the class with exactly this name.
    pub fn id_of(&self, name: &str) -> Option<ClassId> {
        self.entries
            .iter()
            .position(|entry| entry.name == name)
            .map(ClassId::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &ClassEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (ClassId::new(i), entry))
    }
}

impl Default for ClassList {
    fn default() -> Self {
        const DEFAULTS: [(&str, Rgb); 10] = [
            ("person", Rgb::new(0xFF, 0x6B, 0x6B)),
            ("car", Rgb::new(0x4E, 0xCD, 0xC4)),
            ("dog", Rgb::new(0xFF, 0xE6, 0x6D)),
            ("cat", Rgb::new(0xA8, 0xE6, 0xCF)),
            ("bicycle", Rgb::new(0xDD, 0xA0, 0xDD)),
            ("motorcycle", Rgb::new(0x98, 0xD8, 0xC8)),
            ("bus", Rgb::new(0xF7, 0xDC, 0x6F)),
            ("truck", Rgb::new(0x85, 0xC1, 0xE9)),
            ("bird", Rgb::new(0xF5, 0xB7, 0xB1)),
            ("chair", Rgb::new(0xD7, 0xBD, 0xE2)),
        ];

        Self::new(
            DEFAULTS
                .iter()
                .map(|(name, color)| ClassEntry::new(*name, *color))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_list_has_ten_index_aligned_classes() {
        let classes = ClassList::default();
        assert_eq!(classes.len(), 10);
        assert_eq!(classes.get(ClassId(0)).map(|c| c.name.as_str()), Some("person"));
        assert_eq!(classes.get(ClassId(9)).map(|c| c.name.as_str()), Some("chair"));
        assert_eq!(classes.id_of("bus"), Some(ClassId(6)));
        assert!(!classes.contains(ClassId(10)));
    }

    #[test]
    fn rgb_parses_and_prints_hex() {
        let color: Rgb = "#4ecdc4".parse().expect("parse color");
        assert_eq!(color, Rgb::new(0x4E, 0xCD, 0xC4));
        assert_eq!(color.to_string(), "#4ECDC4");
    }

    #[test]
    fn rgb_rejects_malformed_values() {
        assert!("4ECDC4".parse::<Rgb>().is_err());
        assert!("#4ECDC".parse::<Rgb>().is_err());
        assert!("#GGGGGG".parse::<Rgb>().is_err());
    }

    #[test]
    fn unknown_class_gets_placeholder_name() {
        let classes = ClassList::default();
        assert_eq!(classes.name_or_placeholder(ClassId(12)), "class_12");
    }
}
