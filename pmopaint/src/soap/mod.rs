//! # Module SOAP - enveloppes `handleRequest`
//!
//! PAINT n'expose qu'une seule opération SOAP, `handleRequest`. Ce module
//! construit l'enveloppe de requête et extrait le tableau retourné (ou le
//! SOAP Fault) de l'enveloppe de réponse.
//!
//! ## Format
//!
//! ```xml
//! <s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"
//!             xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
//!   <s:Body>
//!     <u:handleRequest xmlns:u="urn:ctrlPaint">
//!       <context xsi:nil="true"/>
//!       <className>bus_facade_context</className>
//!       <processName>login</processName>
//!       <entityData>
//!         <pairs><key>username</key><value><str>alice</str></value></pairs>
//!       </entityData>
//!       <processData xsi:nil="true"/>
//!     </u:handleRequest>
//!   </s:Body>
//! </s:Envelope>
//! ```
//!
//! La réponse porte un élément `handleRequestResponse` dont le premier
//! enfant est le tableau retourné, au même format que `entityData`.

mod builder;
mod fault;
mod parser;

pub use builder::{HandleRequest, build_handle_request, build_handle_response};
pub use fault::{SoapFault, build_soap_fault, find_fault};
pub use parser::{parse_handle_response, parse_soap_body, parse_wire_array};

/// Nom de l'unique opération du service
pub const OPERATION: &str = "handleRequest";

/// Namespace par défaut de l'opération `handleRequest`
pub const DEFAULT_NAMESPACE: &str = "urn:ctrlPaint";

pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const SOAP_ENCODING_NS: &str = "http://schemas.xmlsoap.org/soap/encoding/";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Valeur de l'en-tête HTTP `SOAPAction`
pub fn soap_action_header(namespace: &str) -> String {
    format!(r#""{}#{}""#, namespace, OPERATION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soap_action_header() {
        assert_eq!(
            soap_action_header(DEFAULT_NAMESPACE),
            "\"urn:ctrlPaint#handleRequest\""
        );
    }
}
