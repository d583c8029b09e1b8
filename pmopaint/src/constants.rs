//! Constantes de l'API PAINT
//!
//! Endpoints, types et classes de beans, processus, noms de champs et codes
//! d'erreur utilisés par le client.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Endpoints
// ============================================================================

/// Point d'accès WSDL du service PAINT
///
/// Quatre combinaisons existent : style d'encodage (RPC/encoded ou
/// RPC/literal) × marque (PureResponse ou marque blanche).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    RpcEncodedBranded,
    RpcLiteralBranded,
    RpcEncodedUnbranded,
    RpcLiteralUnbranded,
}

impl Endpoint {
    pub const ALL: [Endpoint; 4] = [
        Endpoint::RpcEncodedBranded,
        Endpoint::RpcLiteralBranded,
        Endpoint::RpcEncodedUnbranded,
        Endpoint::RpcLiteralUnbranded,
    ];

    /// URL du document WSDL
    pub fn wsdl_url(&self) -> &'static str {
        match self {
            Endpoint::RpcEncodedBranded => {
                "http://paint.pure360.com/paint.pure360.com/ctrlPaint.wsdl"
            }
            Endpoint::RpcLiteralBranded => {
                "http://paint.pure360.com/paint.pure360.com/ctrlPaintLiteral.wsdl"
            }
            Endpoint::RpcEncodedUnbranded => "http://emailapi.co.uk/emailapi.co.uk/ctrlPaint.wsdl",
            Endpoint::RpcLiteralUnbranded => {
                "http://emailapi.co.uk/emailapi.co.uk/ctrlPaintLiteral.wsdl"
            }
        }
    }

    /// URL du service : l'URL WSDL sans son suffixe `.wsdl`
    pub fn service_url(&self) -> &'static str {
        let wsdl = self.wsdl_url();
        wsdl.strip_suffix(".wsdl").unwrap_or(wsdl)
    }

    /// Vrai pour les endpoints RPC/encoded
    pub fn is_encoded(&self) -> bool {
        matches!(
            self,
            Endpoint::RpcEncodedBranded | Endpoint::RpcEncodedUnbranded
        )
    }

    /// Vrai pour les endpoints à la marque PureResponse
    pub fn is_branded(&self) -> bool {
        matches!(
            self,
            Endpoint::RpcEncodedBranded | Endpoint::RpcLiteralBranded
        )
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Endpoint::RpcLiteralUnbranded
    }
}

// ============================================================================
// Beans
// ============================================================================

/// Type de bean (première moitié du nom de classe PAINT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeanType {
    Entity,
    Facade,
    Search,
}

impl BeanType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BeanType::Entity => "bus_entity",
            BeanType::Facade => "bus_facade",
            BeanType::Search => "bus_search",
        }
    }
}

/// Classe de bean (seconde moitié du nom de classe PAINT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeanClass {
    CampaignDelivery,
    CampaignEmail,
    CampaignList,
    CampaignOneToOne,
    Context,
}

impl BeanClass {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BeanClass::CampaignDelivery => "campaign_delivery",
            BeanClass::CampaignEmail => "campaign_email",
            BeanClass::CampaignList => "campaign_list",
            BeanClass::CampaignOneToOne => "campaign_one2one",
            BeanClass::Context => "context",
        }
    }
}

/// Processus applicable à un bean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeanProcess {
    Search,
    Store,
    Create,
    Authenticate,
    Invalidate,
}

impl BeanProcess {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BeanProcess::Search => "search",
            BeanProcess::Store => "store",
            BeanProcess::Create => "create",
            BeanProcess::Authenticate => "login",
            BeanProcess::Invalidate => "logout",
        }
    }
}

macro_rules! impl_str_constant {
    ($($ty:ty),*) => {
        $(
            impl AsRef<str> for $ty {
                fn as_ref(&self) -> &str {
                    self.as_str()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_str_constant!(BeanType, BeanClass, BeanProcess, ErrorCode);

/// Nom complet d'un bean : `<bean_type>_<bean_class>`
pub fn bean_name(bean_type: &str, bean_class: &str) -> String {
    format!("{}_{}", bean_type, bean_class)
}

// ============================================================================
// Champs, valeurs et exceptions
// ============================================================================

/// Noms des champs échangés avec PAINT
pub mod fields {
    pub const USERNAME: &str = "username";
    pub const PASSWORD: &str = "password";
    pub const MESSAGE_ID: &str = "messageId";
    pub const BEAN_ID: &str = "beanId";
    pub const LIST_IDS: &str = "listIds";
    pub const DELIVERY_DATE: &str = "deliveryDtTm";
    pub const FOUND_DATA: &str = "idData";
    pub const RESULT: &str = "result";
    pub const RESULT_DATA: &str = "resultData";
}

/// Valeurs remarquables du champ `result`
pub mod values {
    pub const SUCCESS: &str = "success";
}

/// Noms d'exceptions renvoyés dans le champ `result`
pub mod exceptions {
    pub const VALIDATION: &str = "bean_exception_validation";
}

/// Noms des éléments du format "paintArray"
pub mod wire_keys {
    pub const VALUE: &str = "value";
    pub const KEY: &str = "key";
    pub const STRING: &str = "str";
    pub const ARRAY: &str = "arr";
    pub const PAIRS: &str = "pairs";
}

// ============================================================================
// Codes d'erreur
// ============================================================================

/// Codes d'erreur renvoyés dans le champ `result` d'une [`Envelope`](crate::Envelope)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "ERROR_GENERIC")]
    Generic,
    #[serde(rename = "ERROR_NOT_AUTHENTICATED")]
    NotAuthenticated,
    #[serde(rename = "ERROR_AUTHENTICATION_PARAMETERS")]
    AuthParams,
    #[serde(rename = "ERROR_AUTHENTICATION_PROCESS")]
    AuthProcess,
    #[serde(rename = "ERROR_LIST_NOT_FOUND")]
    ListNotFound,
    #[serde(rename = "ERROR_LIST_NOT_SAVED")]
    ListNotSaved,
    #[serde(rename = "ERROR_CONTACT_NOT_FOUND")]
    ContactNotFound,
    #[serde(rename = "ERROR_CAMPAIGN_NOT_FOUND")]
    CampaignNotFound,
    #[serde(rename = "ERROR_BEAN_NOT_CREATED")]
    BeanNotCreated,
    #[serde(rename = "ERROR_COULD_NOT_DELIVER")]
    CouldNotDeliver,
    #[serde(rename = "ERROR_NOT_IMPLEMENTED")]
    NotImplemented,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Generic => "ERROR_GENERIC",
            ErrorCode::NotAuthenticated => "ERROR_NOT_AUTHENTICATED",
            ErrorCode::AuthParams => "ERROR_AUTHENTICATION_PARAMETERS",
            ErrorCode::AuthProcess => "ERROR_AUTHENTICATION_PROCESS",
            ErrorCode::ListNotFound => "ERROR_LIST_NOT_FOUND",
            ErrorCode::ListNotSaved => "ERROR_LIST_NOT_SAVED",
            ErrorCode::ContactNotFound => "ERROR_CONTACT_NOT_FOUND",
            ErrorCode::CampaignNotFound => "ERROR_CAMPAIGN_NOT_FOUND",
            ErrorCode::BeanNotCreated => "ERROR_BEAN_NOT_CREATED",
            ErrorCode::CouldNotDeliver => "ERROR_COULD_NOT_DELIVER",
            ErrorCode::NotImplemented => "ERROR_NOT_IMPLEMENTED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        assert_eq!(Endpoint::default(), Endpoint::RpcLiteralUnbranded);
        assert!(!Endpoint::default().is_encoded());
        assert!(!Endpoint::default().is_branded());
    }

    #[test]
    fn test_endpoint_urls() {
        assert_eq!(
            Endpoint::RpcEncodedBranded.wsdl_url(),
            "http://paint.pure360.com/paint.pure360.com/ctrlPaint.wsdl"
        );
        assert_eq!(
            Endpoint::RpcLiteralUnbranded.service_url(),
            "http://emailapi.co.uk/emailapi.co.uk/ctrlPaintLiteral"
        );
        for endpoint in Endpoint::ALL {
            assert!(endpoint.wsdl_url().ends_with(".wsdl"));
        }
    }

    #[test]
    fn test_bean_name() {
        assert_eq!(
            bean_name(BeanType::Facade.as_str(), BeanClass::Context.as_str()),
            "bus_facade_context"
        );
        assert_eq!(BeanProcess::Authenticate.to_string(), "login");
    }

    #[test]
    fn test_error_code_serde_matches_as_str() {
        let json = serde_json::to_string(&ErrorCode::AuthParams).unwrap();
        assert_eq!(json, "\"ERROR_AUTHENTICATION_PARAMETERS\"");
        assert_eq!(ErrorCode::NotAuthenticated.as_str(), "ERROR_NOT_AUTHENTICATED");
    }
}
