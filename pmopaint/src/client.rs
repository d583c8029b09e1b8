//! Client PAINT : gestion de session et requêtes
//!
//! [`PaintClient`] garde les credentials et le contexte de session. Toute
//! requête autre que le login est refusée localement tant qu'aucun contexte
//! n'a été obtenu par [`PaintClient::authenticate`].

use crate::channel::{RpcChannel, SoapChannel};
use crate::codec::{decode, encode, extract_result_data};
use crate::config::PaintConfig;
use crate::constants::{
    BeanClass, BeanProcess, BeanType, Endpoint, ErrorCode, bean_name, exceptions, fields, values,
};
use crate::envelope::Envelope;
use crate::error::{PaintError, Result};
use crate::soap::HandleRequest;
use crate::value::PaintMap;
use crate::paint_map;
use tracing::{debug, info, warn};

/// Issue d'un appel à [`PaintClient::make_request`]
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// Réponse décodée ; `None` signifie "pas de données"
    Response(Option<PaintMap>),
    /// Requête envoyée, réponse non décodée à la demande de l'appelant
    Sent,
    /// Refusée localement : aucun contexte de session
    NotAuthenticated,
}

impl RequestOutcome {
    pub fn response(&self) -> Option<&PaintMap> {
        match self {
            RequestOutcome::Response(response) => response.as_ref(),
            _ => None,
        }
    }

    pub fn into_response(self) -> Option<PaintMap> {
        match self {
            RequestOutcome::Response(response) => response,
            _ => None,
        }
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            RequestOutcome::NotAuthenticated => Some(ErrorCode::NotAuthenticated),
            _ => None,
        }
    }
}

/// Valeur du champ `result` d'une réponse
pub fn result_of(response: &PaintMap) -> Option<&str> {
    response.get(fields::RESULT).and_then(|v| v.as_str())
}

/// Vrai si `result` vaut `success`
pub fn is_success(response: &PaintMap) -> bool {
    result_of(response) == Some(values::SUCCESS)
}

/// Vrai si `result` porte l'exception donnée
pub fn is_exception(response: &PaintMap, exception: &str) -> bool {
    result_of(response) == Some(exception)
}

/// Client de session PAINT
pub struct PaintClient<C: RpcChannel = SoapChannel> {
    channel: C,
    username: String,
    password: String,
    context: Option<String>,
}

impl PaintClient<SoapChannel> {
    /// Crée un client vers l'endpoint par défaut (RPC/literal, marque blanche)
    ///
    /// # Exemple
    ///
    /// ```rust,no_run
    /// use pmopaint::PaintClient;
    ///
    /// let mut client = PaintClient::new("user", "password")?;
    /// let auth = client.authenticate()?;
    /// if auth.ok {
    ///     println!("context: {}", auth.result);
    /// }
    /// client.invalidate();
    /// # Ok::<(), pmopaint::PaintError>(())
    /// ```
    pub fn new(username: &str, password: &str) -> Result<Self> {
        Self::with_endpoint(username, password, Endpoint::default())
    }

    /// Crée un client vers un endpoint donné
    pub fn with_endpoint(username: &str, password: &str, endpoint: Endpoint) -> Result<Self> {
        Self::with_channel(username, password, SoapChannel::new(endpoint))
    }

    /// Crée un client depuis un objet de configuration
    pub fn from_config(config: &PaintConfig) -> Result<Self> {
        Self::with_channel(
            &config.username,
            &config.password,
            SoapChannel::from_config(config),
        )
    }

    /// Crée un client depuis la configuration trouvée sur disque
    pub fn from_default_config() -> Result<Self> {
        let config = PaintConfig::load_config("")?;
        Self::from_config(&config)
    }
}

impl<C: RpcChannel> PaintClient<C> {
    /// Crée un client sur un canal RPC quelconque
    ///
    /// # Errors
    ///
    /// `PaintError::Configuration` si le nom d'utilisateur ou le mot de
    /// passe est vide.
    pub fn with_channel(username: &str, password: &str, channel: C) -> Result<Self> {
        validate_credentials(username, password)?;

        Ok(Self {
            channel,
            username: username.to_string(),
            password: password.to_string(),
            context: None,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Contexte de session courant
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.context.is_some()
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Ouvre une session
    ///
    /// Retourne `{ok: true, result: <contexte>}` en cas de succès,
    /// `ERROR_AUTHENTICATION_PARAMETERS` si le service rejette les
    /// credentials, `ERROR_AUTHENTICATION_PROCESS` pour tout autre échec.
    /// Les erreurs de transport sont propagées.
    pub fn authenticate(&mut self) -> Result<Envelope> {
        info!("Attempting to login to PAINT as {}", self.username);

        let credentials = paint_map! {
            fields::USERNAME => self.username.as_str(),
            fields::PASSWORD => self.password.as_str(),
        };

        let outcome = self.make_request(
            BeanType::Facade,
            BeanClass::Context,
            BeanProcess::Authenticate,
            Some(&credentials),
            None,
            false,
        )?;

        let Some(response) = outcome.into_response() else {
            warn!("PAINT login returned no data");
            return Ok(Envelope::err(ErrorCode::AuthProcess, None));
        };

        if is_success(&response) {
            let context = context_bean_id(&response)?;
            if context.is_empty() {
                warn!("PAINT login succeeded without a session context");
                return Ok(Envelope::err(ErrorCode::AuthProcess, Some(response)));
            }
            let context = context.to_string();
            debug!("Login successful - context: {}", context);
            self.context = Some(context.clone());
            Ok(Envelope::ok(context))
        } else if is_exception(&response, exceptions::VALIDATION) {
            warn!("PAINT rejected the credentials of {}", self.username);
            Ok(Envelope::err(ErrorCode::AuthParams, Some(response)))
        } else {
            warn!(
                "PAINT login failed with result {:?}",
                result_of(&response).unwrap_or_default()
            );
            Ok(Envelope::err(ErrorCode::AuthProcess, Some(response)))
        }
    }

    /// Ferme la session
    ///
    /// L'échec du logout est seulement journalisé ; le contexte est effacé
    /// dans tous les cas.
    pub fn invalidate(&mut self) {
        match self.make_request(
            BeanType::Facade,
            BeanClass::Context,
            BeanProcess::Invalidate,
            None,
            None,
            true,
        ) {
            Ok(RequestOutcome::NotAuthenticated) => debug!("No PAINT session to invalidate"),
            Ok(_) => info!("PAINT session invalidated"),
            Err(e) => warn!("PAINT logout failed: {}", e),
        }
        self.context = None;
    }

    /// Accès direct à `handleRequest`
    ///
    /// Hormis la conversion des mappings, aucune interprétation n'est faite :
    /// le champ `result` de la réponse est laissé à l'appelant.
    ///
    /// # Arguments
    ///
    /// * `bean_type` - Type de bean (ex: [`BeanType::Entity`] ou `"bus_entity"`)
    /// * `bean_class` - Classe de bean (ex: [`BeanClass::CampaignList`])
    /// * `process` - Processus (ex: [`BeanProcess::Search`])
    /// * `entity_data` - Données de l'entité
    /// * `process_data` - Données du processus
    /// * `suppress_response` - N'interprète pas la réponse
    pub fn make_request(
        &self,
        bean_type: impl AsRef<str>,
        bean_class: impl AsRef<str>,
        process: impl AsRef<str>,
        entity_data: Option<&PaintMap>,
        process_data: Option<&PaintMap>,
        suppress_response: bool,
    ) -> Result<RequestOutcome> {
        let process = process.as_ref();

        if self.context.is_none() && process != BeanProcess::Authenticate.as_str() {
            debug!("Refusing {} request: not authenticated", process);
            return Ok(RequestOutcome::NotAuthenticated);
        }

        let class_name = bean_name(bean_type.as_ref(), bean_class.as_ref());
        let entity_data = encode(entity_data);
        let process_data = encode(process_data);

        debug!(
            class_name = %class_name,
            process,
            entity_pairs = entity_data.as_ref().map_or(0, |a| a.len()),
            process_pairs = process_data.as_ref().map_or(0, |a| a.len()),
            "Sending PAINT request"
        );

        let response = self.channel.handle_request(&HandleRequest {
            context: self.context.as_deref(),
            class_name: &class_name,
            process_name: process,
            entity_data: entity_data.as_ref(),
            process_data: process_data.as_ref(),
        })?;

        if suppress_response {
            return Ok(RequestOutcome::Sent);
        }

        Ok(RequestOutcome::Response(decode(response.as_ref())))
    }

    // ============ Processus génériques ============

    /// Recherche des beans d'une classe (`bus_search_<classe>`, `search`)
    pub fn search(
        &self,
        bean_class: impl AsRef<str>,
        criteria: Option<&PaintMap>,
    ) -> Result<RequestOutcome> {
        self.make_request(
            BeanType::Search,
            bean_class,
            BeanProcess::Search,
            criteria,
            None,
            false,
        )
    }

    /// Crée un bean vide d'une classe (`bus_entity_<classe>`, `create`)
    pub fn create(&self, bean_class: impl AsRef<str>) -> Result<RequestOutcome> {
        self.make_request(
            BeanType::Entity,
            bean_class,
            BeanProcess::Create,
            None,
            None,
            false,
        )
    }

    /// Enregistre un bean (`bus_entity_<classe>`, `store`)
    pub fn store(
        &self,
        bean_class: impl AsRef<str>,
        entity_data: &PaintMap,
    ) -> Result<RequestOutcome> {
        self.make_request(
            BeanType::Entity,
            bean_class,
            BeanProcess::Store,
            Some(entity_data),
            None,
            false,
        )
    }

    // ============ Opérations non implémentées ============

    /// Envoie un message à une liste (non implémenté)
    pub fn send_to_list(&self, _list_name: &str, _message_name: &str) -> Envelope {
        not_implemented("send_to_list")
    }

    /// Envoie un message à un contact (non implémenté)
    pub fn send_to_contact(
        &self,
        _email_to: &str,
        _message_name: &str,
        _custom_data: Option<&PaintMap>,
    ) -> Envelope {
        not_implemented("send_to_contact")
    }

    /// Ajoute un contact à une liste (non implémenté)
    pub fn add_contact(&self, _list_name: &str, _contact: &PaintMap) -> Envelope {
        not_implemented("add_contact")
    }

    /// Ajoute des contacts à une liste (non implémenté)
    pub fn add_contacts(&self, _list_name: &str, _contacts: &[PaintMap]) -> Envelope {
        not_implemented("add_contacts")
    }
}

fn validate_credentials(username: &str, password: &str) -> Result<()> {
    if username.is_empty() || password.is_empty() {
        return Err(PaintError::Configuration(
            ErrorCode::AuthParams.as_str().to_string(),
        ));
    }
    Ok(())
}

fn not_implemented(operation: &str) -> Envelope {
    debug!("{} is not implemented", operation);
    Envelope::err(ErrorCode::NotImplemented, None)
}

/// Contexte de session dans une réponse de login réussie
fn context_bean_id(response: &PaintMap) -> Result<&str> {
    let class = BeanClass::Context.as_str();

    // Le bean est normalement `bus_entity_context` ; certaines réponses le
    // nomment `context_context`
    [BeanType::Entity.as_str(), class]
        .into_iter()
        .find_map(|bean_type| extract_result_data(response, Some(bean_type), Some(class)).ok())
        .and_then(|entity| entity.as_map()?.get(fields::BEAN_ID)?.as_str())
        .ok_or_else(|| {
            PaintError::missing_field(&[
                fields::RESULT_DATA,
                &bean_name(BeanType::Entity.as_str(), class),
                fields::BEAN_ID,
            ])
        })
}
