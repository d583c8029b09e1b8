//! Parsing des réponses `handleRequest`

use super::{OPERATION, fault::find_fault};
use crate::constants::wire_keys;
use crate::error::{PaintError, Result};
use crate::wire::{WireArray, WirePair, WireValue};
use std::io::BufReader;
use xmltree::{Element, ParserConfig, XMLNode};

/// Parse une enveloppe SOAP et retourne son élément `Body`
pub fn parse_soap_body(xml: &[u8]) -> Result<Element> {
    let reader = BufReader::new(xml);
    // Un <str> ne contenant que des espaces doit garder son texte
    let config = ParserConfig::new().whitespace_to_characters(true);
    let root = Element::parse_with_config(reader, config)?;

    if !root.name.ends_with("Envelope") {
        return Err(PaintError::MalformedResponse(
            "missing SOAP Envelope".to_string(),
        ));
    }

    find_child_with_suffix(&root, "Body")
        .cloned()
        .ok_or_else(|| PaintError::MalformedResponse("missing SOAP Body".to_string()))
}

/// Extrait le tableau retourné par `handleRequest`
///
/// Un SOAP Fault devient [`PaintError::SoapFault`]. Un tableau nil ou
/// absent donne `Ok(None)`.
pub fn parse_handle_response(xml: &[u8]) -> Result<Option<WireArray>> {
    let body = parse_soap_body(xml)?;

    if let Some(fault) = find_fault(&body) {
        return Err(PaintError::SoapFault {
            code: fault.fault_code,
            message: fault.fault_string,
        });
    }

    let response_name = format!("{}Response", OPERATION);
    let response = find_child_with_suffix(&body, &response_name).ok_or_else(|| {
        PaintError::MalformedResponse(format!("missing {} element in SOAP body", response_name))
    })?;

    let returned = response.children.iter().find_map(XMLNode::as_element);
    Ok(returned.and_then(parse_wire_array))
}

/// Convertit un élément XML en tableau PAINT
///
/// Retourne `None` si l'élément porte `xsi:nil`.
pub fn parse_wire_array(elem: &Element) -> Option<WireArray> {
    if is_nil(elem) {
        return None;
    }

    let pairs = elements(elem)
        .filter(|e| e.name == wire_keys::PAIRS)
        .flat_map(|pairs| {
            // Certains serveurs enveloppent les paires dans des <item>
            if find_child_with_suffix(pairs, wire_keys::KEY).is_some() {
                vec![pairs]
            } else {
                elements(pairs).collect()
            }
        })
        .map(parse_pair)
        .collect();

    Some(WireArray { pairs })
}

fn parse_pair(elem: &Element) -> WirePair {
    let key = find_child_with_suffix(elem, wire_keys::KEY)
        .and_then(|k| k.get_text())
        .map(|t| t.to_string())
        .unwrap_or_default();

    let value = match find_child_with_suffix(elem, wire_keys::VALUE) {
        Some(value) if !is_nil(value) => parse_value(value),
        _ => WireValue::Unset,
    };

    WirePair { key, value }
}

fn parse_value(value: &Element) -> WireValue {
    if let Some(arr) = value.get_child(wire_keys::ARRAY) {
        return WireValue::Arr(parse_wire_array(arr));
    }

    match value.get_child(wire_keys::STRING) {
        Some(s) if !is_nil(s) => {
            WireValue::Str(s.get_text().map(|t| t.to_string()).unwrap_or_default())
        }
        _ => WireValue::Unset,
    }
}

fn is_nil(elem: &Element) -> bool {
    elem.attributes
        .iter()
        .any(|(name, value)| (name == "nil" || name.ends_with(":nil")) && (value == "true" || value == "1"))
}

fn elements(parent: &Element) -> impl Iterator<Item = &Element> {
    parent.children.iter().filter_map(XMLNode::as_element)
}

pub(super) fn find_child_with_suffix<'a>(parent: &'a Element, suffix: &str) -> Option<&'a Element> {
    parent.children.iter().find_map(|node| match node {
        XMLNode::Element(elem) if elem.name.ends_with(suffix) => Some(elem),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soap::{DEFAULT_NAMESPACE, build_handle_response};

    const LOGIN_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/"
                   xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <SOAP-ENV:Body>
    <ns1:handleRequestResponse xmlns:ns1="urn:ctrlPaint">
      <return>
        <pairs>
          <key>result</key>
          <value><str>success</str></value>
        </pairs>
        <pairs>
          <key>resultData</key>
          <value>
            <arr>
              <pairs>
                <key>bus_entity_context</key>
                <value>
                  <arr>
                    <pairs><key>beanId</key><value><str>abc123</str></value></pairs>
                  </arr>
                </value>
              </pairs>
            </arr>
          </value>
        </pairs>
        <pairs>
          <key>idData</key>
          <value><arr xsi:nil="true"/></value>
        </pairs>
      </return>
    </ns1:handleRequestResponse>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#;

    #[test]
    fn test_parse_login_response() {
        let array = parse_handle_response(LOGIN_RESPONSE.as_bytes())
            .unwrap()
            .unwrap();

        assert_eq!(array.len(), 3);
        assert_eq!(
            array.get("result"),
            Some(&WireValue::Str("success".to_string()))
        );
        assert_eq!(array.get("idData"), Some(&WireValue::Arr(None)));

        let Some(WireValue::Arr(Some(data))) = array.get("resultData") else {
            panic!("expected resultData array");
        };
        let Some(WireValue::Arr(Some(context))) = data.get("bus_entity_context") else {
            panic!("expected bus_entity_context array");
        };
        assert_eq!(
            context.get("beanId"),
            Some(&WireValue::Str("abc123".to_string()))
        );
    }

    #[test]
    fn test_parse_nil_return() {
        let xml = build_handle_response(DEFAULT_NAMESPACE, None).unwrap();
        assert_eq!(parse_handle_response(xml.as_bytes()).unwrap(), None);
    }

    #[test]
    fn test_parse_item_wrapped_pairs() {
        let xml = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <handleRequestResponse>
      <return>
        <pairs>
          <item><key>a</key><value><str>1</str></value></item>
          <item><key>b</key><value><str>2</str></value></item>
        </pairs>
      </return>
    </handleRequestResponse>
  </s:Body>
</s:Envelope>"#;

        let array = parse_handle_response(xml.as_bytes()).unwrap().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array.pairs[1].key, "b");
    }

    #[test]
    fn test_parse_round_trip_with_builder() {
        let mut inner = WireArray::new();
        inner.push("name", WireValue::Str("weekly".to_string()));
        let mut array = WireArray::new();
        array.push("list", WireValue::Arr(Some(inner)));
        array.push("empty", WireValue::Arr(None));
        array.push("blank", WireValue::Str(String::new()));

        let xml = build_handle_response(DEFAULT_NAMESPACE, Some(&array)).unwrap();
        let parsed = parse_handle_response(xml.as_bytes()).unwrap().unwrap();

        assert_eq!(parsed, array);
    }

    #[test]
    fn test_whitespace_strings_are_kept_verbatim() {
        let mut array = WireArray::new();
        array.push("padded", WireValue::Str("  two spaces  ".to_string()));
        array.push("lines", WireValue::Str("line1\nline2\n".to_string()));
        array.push("spaces_only", WireValue::Str("   ".to_string()));

        let xml = build_handle_response(DEFAULT_NAMESPACE, Some(&array)).unwrap();
        let parsed = parse_handle_response(xml.as_bytes()).unwrap().unwrap();

        assert_eq!(parsed.get("spaces_only"), Some(&WireValue::Str("   ".to_string())));
        assert_eq!(parsed, array);
    }

    #[test]
    fn test_whitespace_between_elements_is_ignored() {
        let xml = "<s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\">\n  <s:Body>\n    <handleRequestResponse>\n      <return>\n        <pairs>\n          <key>a</key>\n          <value> <str> </str> </value>\n        </pairs>\n      </return>\n    </handleRequestResponse>\n  </s:Body>\n</s:Envelope>";

        let array = parse_handle_response(xml.as_bytes()).unwrap().unwrap();
        assert_eq!(array.len(), 1);
        assert_eq!(array.get("a"), Some(&WireValue::Str(" ".to_string())));
    }

    #[test]
    fn test_missing_envelope() {
        let err = parse_handle_response(b"<html><body/></html>").unwrap_err();
        assert!(matches!(err, PaintError::MalformedResponse(_)));
    }

    #[test]
    fn test_missing_response_element() {
        let xml = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body><other/></s:Body>
</s:Envelope>"#;
        let err = parse_handle_response(xml.as_bytes()).unwrap_err();
        assert!(matches!(err, PaintError::MalformedResponse(_)));
    }
}
