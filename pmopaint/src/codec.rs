//! Conversion entre mappings et tableaux PAINT
//!
//! [`encode`] transforme un [`PaintMap`] en [`WireArray`], [`decode`] fait
//! l'inverse. La distinction entre "absent" (`None`) et "vide" est
//! conservée : un tableau null au premier niveau se décode en `None`, alors
//! qu'un tableau imbriqué null se décode en mapping vide.

use crate::constants::{bean_name, fields};
use crate::error::{PaintError, Result};
use crate::value::{PaintMap, PaintValue};
use crate::wire::{WireArray, WireValue};

/// Encode un mapping en tableau PAINT
///
/// Un mapping absent ou vide donne le null filaire (`None`). Les clés
/// perdent leurs caractères non ASCII ; les scalaires non textuels sont
/// convertis en chaîne, ce qui rend l'aller-retour avec [`decode`] non
/// typé.
pub fn encode(map: Option<&PaintMap>) -> Option<WireArray> {
    let map = map.filter(|m| !m.is_empty())?;

    let mut array = WireArray::new();
    for (key, value) in map {
        let wire_value = match value {
            PaintValue::Map(nested) => WireValue::Arr(encode(Some(nested))),
            scalar => WireValue::Str(scalar.to_wire_string().unwrap_or_default()),
        };
        array.push(ascii_key(key), wire_value);
    }
    Some(array)
}

/// Décode un tableau PAINT en mapping
///
/// `None` en entrée donne `None` ("pas de données"), jamais un mapping vide.
pub fn decode(array: Option<&WireArray>) -> Option<PaintMap> {
    let array = array?;

    let mut map = PaintMap::new();
    for pair in &array.pairs {
        match &pair.value {
            WireValue::Arr(nested) => {
                let nested = decode(nested.as_ref()).unwrap_or_default();
                map.insert(pair.key.clone(), PaintValue::Map(nested));
            }
            WireValue::Str(s) => {
                map.insert(pair.key.clone(), PaintValue::Text(s.clone()));
            }
            WireValue::Unset => {}
        }
    }
    Some(map)
}

/// Extrait un champ d'une réponse décodée
///
/// Avec un type et une classe de bean, retourne
/// `response[field]["<type>_<classe>"]` ; sans aucun des deux, retourne
/// `response[field]`. Ne fournir que l'un des deux est une erreur.
pub fn extract_field<'a>(
    response: &'a PaintMap,
    bean_type: Option<&str>,
    bean_class: Option<&str>,
    field: &str,
) -> Result<&'a PaintValue> {
    let bean = match (bean_type, bean_class) {
        (Some(bean_type), Some(bean_class)) => Some(bean_name(bean_type, bean_class)),
        (None, None) => None,
        _ => {
            return Err(PaintError::InvalidArgument(
                "bean type and bean class must be given together".to_string(),
            ));
        }
    };

    let value = response
        .get(field)
        .ok_or_else(|| PaintError::missing_field(&[field]))?;

    match bean {
        Some(bean) => value
            .as_map()
            .and_then(|m| m.get(&bean))
            .ok_or_else(|| PaintError::missing_field(&[field, &bean])),
        None => Ok(value),
    }
}

/// Raccourci pour [`extract_field`] sur le champ `resultData`
pub fn extract_result_data<'a>(
    response: &'a PaintMap,
    bean_type: Option<&str>,
    bean_class: Option<&str>,
) -> Result<&'a PaintValue> {
    extract_field(response, bean_type, bean_class, fields::RESULT_DATA)
}

fn ascii_key(key: &str) -> String {
    key.chars().filter(char::is_ascii).collect()
}
