//! Exemple d'utilisation basique de pmopaint
//!
//! Cet exemple montre comment :
//! - Charger les credentials depuis la configuration (`.pmopaint/config.yaml`
//!   ou variables `PMOPAINT_CONFIG__PAINT__USERNAME` / `__PASSWORD`)
//! - Ouvrir une session PAINT
//! - Chercher une liste de diffusion
//! - Fermer la session

use pmopaint::{BeanClass, PaintClient, PaintConfig, paint_map};

fn main() -> anyhow::Result<()> {
    // Initialiser le logging
    tracing_subscriber::fmt::init();

    println!("=== PMOPaint - Exemple d'utilisation basique ===\n");

    let config = PaintConfig::load_config("")?;
    println!("Endpoint: {}", config.service_url());

    let mut client = PaintClient::from_config(&config)?;

    println!("Connexion à PAINT...");
    let auth = client.authenticate()?;
    if !auth.ok {
        println!("✗ Échec de la connexion : {}", auth.result);
        if let Some(meta) = &auth.meta {
            println!("  Réponse : {}", serde_json::to_string_pretty(meta)?);
        }
        return Ok(());
    }
    println!("✓ Connecté, contexte : {}", auth.result);

    let list_name = std::env::args().nth(1).unwrap_or_else(|| "newsletter".to_string());
    println!("\n--- Recherche de la liste '{}' ---", list_name);

    let criteria = paint_map! { "listName" => list_name.as_str() };
    let outcome = client.search(BeanClass::CampaignList, Some(&criteria))?;
    match outcome.response() {
        Some(response) => println!("{}", serde_json::to_string_pretty(response)?),
        None => println!("Aucune donnée"),
    }

    client.invalidate();
    println!("\n✓ Session fermée");

    Ok(())
}
