//! SOAP Faults renvoyés par PAINT

use super::builder::build_soap_envelope_with_body;
use super::parser::find_child_with_suffix;
use crate::error::Result;
use xmltree::{Element, XMLNode};

/// Erreur SOAP (Fault)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    /// Code d'erreur (ex: "SOAP-ENV:Server")
    pub fault_code: String,

    /// Description de l'erreur
    pub fault_string: String,
}

/// Cherche un élément `Fault` dans le corps SOAP
pub fn find_fault(body: &Element) -> Option<SoapFault> {
    let fault = find_child_with_suffix(body, "Fault")?;

    let text_of = |name: &str| {
        find_child_with_suffix(fault, name)
            .and_then(|e| e.get_text())
            .map(|t| t.trim().to_string())
            .unwrap_or_default()
    };

    Some(SoapFault {
        fault_code: text_of("faultcode"),
        fault_string: text_of("faultstring"),
    })
}

/// Construit un SOAP Fault XML
///
/// Sert aux bouchons de service dans les tests.
pub fn build_soap_fault(fault_code: &str, fault_string: &str) -> Result<String> {
    let mut fault = Element::new("s:Fault");

    for (name, text) in [("faultcode", fault_code), ("faultstring", fault_string)] {
        let mut elem = Element::new(name);
        elem.children.push(XMLNode::Text(text.to_string()));
        fault.children.push(XMLNode::Element(elem));
    }

    build_soap_envelope_with_body(fault, false)
}
