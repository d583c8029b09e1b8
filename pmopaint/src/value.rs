//! Valeurs des mappings échangés avec PAINT
//!
//! Un [`PaintMap`] est un mapping ordonné (ordre d'insertion) de clés
//! chaînes vers des [`PaintValue`]. Les scalaires non textuels n'existent
//! que côté requête : le format filaire ne connaît que des chaînes et des
//! tableaux imbriqués, si bien qu'un entier ou un booléen revient toujours
//! sous forme de [`PaintValue::Text`] après un aller-retour.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Mapping ordonné de clés vers des valeurs PAINT
pub type PaintMap = IndexMap<String, PaintValue>;

/// Valeur d'un [`PaintMap`]
#[derive(Debug, Clone, PartialEq)]
pub enum PaintValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Map(PaintMap),
}

impl PaintValue {
    /// Retourne le texte si la valeur est une chaîne
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PaintValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Retourne le mapping si la valeur est un tableau imbriqué
    pub fn as_map(&self) -> Option<&PaintMap> {
        match self {
            PaintValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, PaintValue::Map(_))
    }

    /// Forme textuelle d'un scalaire, telle qu'envoyée sur le fil
    ///
    /// Retourne `None` pour un mapping imbriqué.
    pub fn to_wire_string(&self) -> Option<String> {
        match self {
            PaintValue::Text(s) => Some(s.clone()),
            PaintValue::Integer(i) => Some(i.to_string()),
            PaintValue::Float(f) => Some(f.to_string()),
            PaintValue::Bool(b) => Some(b.to_string()),
            PaintValue::Map(_) => None,
        }
    }
}

impl fmt::Display for PaintValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_wire_string() {
            Some(s) => f.write_str(&s),
            None => write!(f, "{{…}}"),
        }
    }
}

impl Serialize for PaintValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PaintValue::Text(s) => serializer.serialize_str(s),
            PaintValue::Integer(i) => serializer.serialize_i64(*i),
            PaintValue::Float(f) => serializer.serialize_f64(*f),
            PaintValue::Bool(b) => serializer.serialize_bool(*b),
            PaintValue::Map(m) => m.serialize(serializer),
        }
    }
}

impl From<&str> for PaintValue {
    fn from(value: &str) -> Self {
        PaintValue::Text(value.to_string())
    }
}

impl From<String> for PaintValue {
    fn from(value: String) -> Self {
        PaintValue::Text(value)
    }
}

impl From<&String> for PaintValue {
    fn from(value: &String) -> Self {
        PaintValue::Text(value.clone())
    }
}

impl From<i64> for PaintValue {
    fn from(value: i64) -> Self {
        PaintValue::Integer(value)
    }
}

impl From<i32> for PaintValue {
    fn from(value: i32) -> Self {
        PaintValue::Integer(value.into())
    }
}

impl From<u32> for PaintValue {
    fn from(value: u32) -> Self {
        PaintValue::Integer(value.into())
    }
}

impl From<f64> for PaintValue {
    fn from(value: f64) -> Self {
        PaintValue::Float(value)
    }
}

impl From<bool> for PaintValue {
    fn from(value: bool) -> Self {
        PaintValue::Bool(value)
    }
}

impl From<PaintMap> for PaintValue {
    fn from(value: PaintMap) -> Self {
        PaintValue::Map(value)
    }
}

/// Construit un [`PaintMap`] à partir de paires `clé => valeur`
///
/// ```
/// use pmopaint::{paint_map, PaintValue};
///
/// let map = paint_map! {
///     "username" => "alice",
///     "retries" => 3,
///     "options" => paint_map! { "html" => true },
/// };
/// assert_eq!(map["username"], PaintValue::from("alice"));
/// assert!(map["options"].is_map());
/// ```
#[macro_export]
macro_rules! paint_map {
    () => {
        $crate::PaintMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::PaintMap::new();
        $(
            map.insert(::std::string::String::from($key), $crate::PaintValue::from($value));
        )+
        map
    }};
}
