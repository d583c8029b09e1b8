//! Représentation filaire "paintArray"
//!
//! Un tableau PAINT est une suite ordonnée de paires clé/valeur ; chaque
//! valeur porte soit une chaîne (`str`), soit un tableau imbriqué (`arr`).
//! Le "null" filaire est représenté par `Option::<WireArray>::None`.

/// Tableau de paires clé/valeur
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireArray {
    pub pairs: Vec<WirePair>,
}

/// Paire clé/valeur d'un [`WireArray`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WirePair {
    pub key: String,
    pub value: WireValue,
}

/// Valeur étiquetée d'une paire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireValue {
    /// Chaîne (`str`)
    Str(String),
    /// Tableau imbriqué (`arr`), éventuellement null
    Arr(Option<WireArray>),
    /// Ni `str` ni `arr` : la paire est ignorée au décodage
    Unset,
}

impl WireArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn push(&mut self, key: impl Into<String>, value: WireValue) {
        self.pairs.push(WirePair {
            key: key.into(),
            value,
        });
    }

    /// Cherche la première paire portant la clé donnée
    pub fn get(&self, key: &str) -> Option<&WireValue> {
        self.pairs.iter().find(|p| p.key == key).map(|p| &p.value)
    }
}
