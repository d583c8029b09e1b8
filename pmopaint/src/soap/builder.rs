//! Construction des enveloppes `handleRequest`

use super::{OPERATION, SOAP_ENCODING_NS, SOAP_ENVELOPE_NS, XSI_NS};
use crate::constants::wire_keys;
use crate::error::{PaintError, Result};
use crate::wire::{WireArray, WireValue};
use xmltree::{Element, XMLNode};

/// Arguments d'un appel `handleRequest`
#[derive(Debug, Clone, Copy)]
pub struct HandleRequest<'a> {
    /// Contexte de session, `None` pour le login
    pub context: Option<&'a str>,
    /// Nom du bean, `<bean_type>_<bean_class>`
    pub class_name: &'a str,
    /// Processus (ex: "login", "search")
    pub process_name: &'a str,
    pub entity_data: Option<&'a WireArray>,
    pub process_data: Option<&'a WireArray>,
}

pub(super) fn build_soap_envelope_with_body(body_child: Element, encoded: bool) -> Result<String> {
    // Body
    let mut body = Element::new("s:Body");
    body.children.push(XMLNode::Element(body_child));

    // Envelope
    let mut envelope = Element::new("s:Envelope");
    envelope
        .attributes
        .insert("xmlns:s".to_string(), SOAP_ENVELOPE_NS.to_string());
    envelope
        .attributes
        .insert("xmlns:xsi".to_string(), XSI_NS.to_string());
    if encoded {
        envelope
            .attributes
            .insert("s:encodingStyle".to_string(), SOAP_ENCODING_NS.to_string());
    }
    envelope.children.push(XMLNode::Element(body));

    let mut buf = Vec::new();
    let config = xmltree::EmitterConfig::new()
        .write_document_declaration(true)
        .perform_indent(true)
        .indent_string("  ");
    envelope.write_with_config(&mut buf, config)?;

    String::from_utf8(buf).map_err(|e| PaintError::Other(format!("non UTF-8 SOAP body: {}", e)))
}

/// Construit l'enveloppe SOAP d'un appel `handleRequest`
///
/// # Arguments
///
/// * `namespace` - Namespace de l'opération
/// * `encoded` - Ajoute l'attribut `encodingStyle` (endpoints RPC/encoded)
/// * `request` - Arguments de l'appel
pub fn build_handle_request(
    namespace: &str,
    encoded: bool,
    request: &HandleRequest<'_>,
) -> Result<String> {
    let mut call = Element::new(&format!("u:{}", OPERATION));
    call.attributes
        .insert("xmlns:u".to_string(), namespace.to_string());

    let children = [
        text_or_nil("context", request.context),
        text_element("className", request.class_name),
        text_element("processName", request.process_name),
        wire_array_element("entityData", request.entity_data),
        wire_array_element("processData", request.process_data),
    ];
    call.children
        .extend(children.into_iter().map(XMLNode::Element));

    build_soap_envelope_with_body(call, encoded)
}

/// Construit l'enveloppe de réponse d'un appel `handleRequest`
///
/// Le client n'en a pas besoin en fonctionnement normal ; elle sert aux
/// bouchons de service et aux tests.
pub fn build_handle_response(namespace: &str, result: Option<&WireArray>) -> Result<String> {
    let mut response = Element::new(&format!("u:{}Response", OPERATION));
    response
        .attributes
        .insert("xmlns:u".to_string(), namespace.to_string());
    response
        .children
        .push(XMLNode::Element(wire_array_element("return", result)));

    build_soap_envelope_with_body(response, false)
}

/// Élément XML portant un tableau PAINT (ou `xsi:nil` s'il est null)
pub(super) fn wire_array_element(name: &str, array: Option<&WireArray>) -> Element {
    let Some(array) = array else {
        return nil_element(name);
    };

    let mut elem = Element::new(name);
    for pair in &array.pairs {
        let mut value = Element::new(wire_keys::VALUE);
        match &pair.value {
            WireValue::Str(s) => value
                .children
                .push(XMLNode::Element(text_element(wire_keys::STRING, s))),
            WireValue::Arr(nested) => value.children.push(XMLNode::Element(
                wire_array_element(wire_keys::ARRAY, nested.as_ref()),
            )),
            WireValue::Unset => {}
        }

        let mut pair_elem = Element::new(wire_keys::PAIRS);
        pair_elem
            .children
            .push(XMLNode::Element(text_element(wire_keys::KEY, &pair.key)));
        pair_elem.children.push(XMLNode::Element(value));
        elem.children.push(XMLNode::Element(pair_elem));
    }
    elem
}

fn text_element(name: &str, text: &str) -> Element {
    let mut elem = Element::new(name);
    elem.children.push(XMLNode::Text(text.to_string()));
    elem
}

fn text_or_nil(name: &str, text: Option<&str>) -> Element {
    match text {
        Some(text) => text_element(name, text),
        None => nil_element(name),
    }
}

fn nil_element(name: &str) -> Element {
    let mut elem = Element::new(name);
    elem.attributes
        .insert("xsi:nil".to_string(), "true".to_string());
    elem
}
