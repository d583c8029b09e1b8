//! # pmopaint - Client PAINT pour PureResponse
//!
//! Cette crate fournit un client Rust bloquant pour PAINT, l'API SOAP de la
//! plateforme d'emailing PureResponse.
//!
//! ## Vue d'ensemble
//!
//! - Ouverture et fermeture de session (`login` / `logout`)
//! - Accès direct à l'opération `handleRequest` pour n'importe quel bean
//! - Conversion entre mappings Rust et tableaux PAINT ("paintArray")
//! - Configuration YAML avec surcharges par variables d'environnement
//!
//! ## Architecture
//!
//! ```text
//! pmopaint/
//! ├── src/
//! │   ├── lib.rs          # Module principal (ce fichier)
//! │   ├── client.rs       # Session et requêtes
//! │   ├── channel.rs      # Trait RpcChannel et canal SOAP/HTTP
//! │   ├── soap/           # Enveloppes handleRequest et SOAP Faults
//! │   ├── codec.rs        # Mapping <-> tableau PAINT
//! │   ├── wire.rs         # Représentation filaire
//! │   ├── value.rs        # Valeurs des mappings
//! │   ├── envelope.rs     # Résultat {ok, result, meta}
//! │   ├── constants.rs    # Endpoints, beans, champs, codes d'erreur
//! │   ├── config.rs       # Configuration
//! │   └── error.rs        # Gestion des erreurs
//! ```
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use pmopaint::{BeanClass, PaintClient, paint_map};
//!
//! fn main() -> pmopaint::Result<()> {
//!     let mut client = PaintClient::new("user", "password")?;
//!
//!     let auth = client.authenticate()?;
//!     if !auth.ok {
//!         eprintln!("login failed: {}", auth.result);
//!         return Ok(());
//!     }
//!
//!     let criteria = paint_map! { "listName" => "weekly" };
//!     let outcome = client.search(BeanClass::CampaignList, Some(&criteria))?;
//!     println!("{:?}", outcome.response());
//!
//!     client.invalidate();
//!     Ok(())
//! }
//! ```
//!
//! ## Valeurs
//!
//! Le format filaire ne connaît que des chaînes et des tableaux imbriqués :
//! un entier ou un booléen envoyé revient sous forme de chaîne.

pub mod channel;
pub mod client;
pub mod codec;
pub mod config;
pub mod constants;
pub mod envelope;
pub mod error;
pub mod soap;
pub mod value;
pub mod wire;

pub use channel::{RpcChannel, SoapChannel};
pub use client::{PaintClient, RequestOutcome, is_exception, is_success, result_of};
pub use codec::{decode, encode, extract_field, extract_result_data};
pub use config::PaintConfig;
pub use constants::{BeanClass, BeanProcess, BeanType, Endpoint, ErrorCode};
pub use envelope::Envelope;
pub use error::{PaintError, Result};
pub use value::{PaintMap, PaintValue};
pub use wire::{WireArray, WirePair, WireValue};
