//! Enveloppe de résultat `{ok, result, meta?}`

use crate::constants::ErrorCode;
use crate::value::PaintMap;
use serde::Serialize;

/// Résultat uniforme des opérations publiques du client
///
/// En cas de succès `result` porte la donnée utile (ex: le contexte de
/// session) ; en cas d'échec il porte un [`ErrorCode`] et `meta` la réponse
/// brute du service quand elle existe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub ok: bool,
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaintMap>,
}

impl Envelope {
    pub fn ok(result: impl Into<String>) -> Self {
        Self {
            ok: true,
            result: result.into(),
            meta: None,
        }
    }

    pub fn err(code: ErrorCode, meta: Option<PaintMap>) -> Self {
        Self {
            ok: false,
            result: code.as_str().to_string(),
            meta,
        }
    }

    /// Code d'erreur porté par une enveloppe en échec
    pub fn error_code(&self) -> Option<&str> {
        (!self.ok).then_some(self.result.as_str())
    }

    pub fn is_err_code(&self, code: ErrorCode) -> bool {
        !self.ok && self.result == code.as_str()
    }
}
