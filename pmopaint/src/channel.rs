//! Canal RPC vers le service PAINT
//!
//! Le client ne dépend que du trait [`RpcChannel`]. [`SoapChannel`] en est
//! l'implémentation SOAP/HTTP bloquante.

use crate::config::PaintConfig;
use crate::constants::Endpoint;
use crate::error::{PaintError, Result};
use crate::soap::{self, HandleRequest, build_handle_request, parse_handle_response};
use crate::wire::WireArray;
use tracing::{debug, warn};
use ureq::Agent;

/// Canal opaque exposant l'unique opération `handleRequest`
pub trait RpcChannel {
    /// Envoie un appel et retourne le tableau de réponse (`None` si null)
    fn handle_request(&self, request: &HandleRequest<'_>) -> Result<Option<WireArray>>;
}

/// Canal SOAP sur HTTP
pub struct SoapChannel {
    agent: Agent,
    service_url: String,
    namespace: String,
    encoded: bool,
}

impl SoapChannel {
    /// Crée un canal vers l'un des endpoints fixes
    pub fn new(endpoint: Endpoint) -> Self {
        Self::with_service_url(endpoint.service_url(), soap::DEFAULT_NAMESPACE, endpoint.is_encoded())
    }

    /// Crée un canal vers une URL de service explicite
    pub fn with_service_url(
        service_url: impl Into<String>,
        namespace: impl Into<String>,
        encoded: bool,
    ) -> Self {
        // Les réponses 4xx/5xx doivent rester lisibles : PAINT y place ses SOAP Faults
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .build();

        Self {
            agent: config.into(),
            service_url: service_url.into(),
            namespace: namespace.into(),
            encoded,
        }
    }

    /// Crée un canal depuis la configuration
    pub fn from_config(config: &PaintConfig) -> Self {
        Self::with_service_url(
            config.service_url(),
            config.namespace.clone(),
            config.endpoint.is_encoded(),
        )
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn is_encoded(&self) -> bool {
        self.encoded
    }
}

impl RpcChannel for SoapChannel {
    fn handle_request(&self, request: &HandleRequest<'_>) -> Result<Option<WireArray>> {
        let body_xml = build_handle_request(&self.namespace, self.encoded, request)?;

        debug!(
            url = %self.service_url,
            class_name = request.class_name,
            process = request.process_name,
            "POST handleRequest"
        );

        let mut response = self
            .agent
            .post(&self.service_url)
            .header("Content-Type", r#"text/xml; charset="utf-8""#)
            .header("SOAPAction", &soap::soap_action_header(&self.namespace))
            .send(body_xml)?;

        let status = response.status();
        let raw_body = response.body_mut().read_to_string()?;

        debug!("Response status: {}", status);

        if status.is_success() {
            return parse_handle_response(raw_body.as_bytes());
        }

        match parse_handle_response(raw_body.as_bytes()) {
            Err(fault @ PaintError::SoapFault { .. }) => {
                warn!("PAINT returned a SOAP fault: {}", fault);
                Err(fault)
            }
            _ => {
                warn!("PAINT HTTP error ({}): {}", status, raw_body);
                Err(PaintError::Http {
                    status: status.as_u16(),
                    body: raw_body,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_from_endpoint() {
        let channel = SoapChannel::new(Endpoint::RpcEncodedBranded);
        assert_eq!(
            channel.service_url(),
            "http://paint.pure360.com/paint.pure360.com/ctrlPaint"
        );
        assert!(channel.is_encoded());
        assert_eq!(channel.namespace(), soap::DEFAULT_NAMESPACE);
    }

    #[test]
    fn test_channel_from_config() {
        let config = PaintConfig::new("alice", "secret")
            .with_service_url("http://localhost:1234/paint");
        let channel = SoapChannel::from_config(&config);
        assert_eq!(channel.service_url(), "http://localhost:1234/paint");
        assert!(!channel.is_encoded());
    }
}
