//! Gestion des erreurs pour le client PAINT

use thiserror::Error;

/// Type Result personnalisé pour pmopaint
pub type Result<T> = std::result::Result<T, PaintError>;

/// Erreurs possibles lors de l'utilisation du client PAINT
///
/// Les échecs métier de l'API (champ `result` différent de `success`) ne
/// sont pas des erreurs : ils sont rendus dans une [`Envelope`](crate::Envelope)
/// ou dans la réponse décodée. Seuls les problèmes locaux et de transport
/// apparaissent ici.
#[derive(Error, Debug)]
pub enum PaintError {
    /// Paramètres de construction invalides (credentials manquants, etc.)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Appel invalide d'une fonction du client
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Champ attendu absent d'une réponse décodée
    #[error("Missing field in response: {0}")]
    MissingField(String),

    /// Erreur de transport HTTP
    #[error("HTTP transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// Statut HTTP inattendu sans SOAP Fault exploitable
    #[error("HTTP status {status}: {body}")]
    Http { status: u16, body: String },

    /// SOAP Fault renvoyé par le service
    #[error("SOAP fault {code}: {message}")]
    SoapFault { code: String, message: String },

    /// Erreur de parsing XML
    #[error("XML parse error: {0}")]
    XmlParse(#[from] xmltree::ParseError),

    /// Erreur d'écriture XML
    #[error("XML write error: {0}")]
    XmlWrite(#[from] xmltree::Error),

    /// Réponse SOAP bien formée mais inattendue
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Erreur de parsing YAML (configuration)
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Erreur d'entrée/sortie
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Erreur générique
    #[error("PAINT error: {0}")]
    Other(String),
}

impl PaintError {
    pub fn missing_field(path: &[&str]) -> Self {
        PaintError::MissingField(path.join("."))
    }

    /// Vérifie si l'erreur vient de la couche transport (HTTP ou SOAP)
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            PaintError::Transport(_) | PaintError::Http { .. } | PaintError::SoapFault { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_path() {
        let err = PaintError::missing_field(&["resultData", "bus_entity_context", "beanId"]);
        assert_eq!(
            err.to_string(),
            "Missing field in response: resultData.bus_entity_context.beanId"
        );
    }

    #[test]
    fn test_is_transport_error() {
        let fault = PaintError::SoapFault {
            code: "SOAP-ENV:Server".to_string(),
            message: "boom".to_string(),
        };
        assert!(fault.is_transport_error());
        assert!(!PaintError::Configuration("x".to_string()).is_transport_error());
    }
}
