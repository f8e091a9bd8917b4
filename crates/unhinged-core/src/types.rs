//! Domain types for card submissions.

use std::fmt;
use std::str::FromStr;

/// Request field carrying the card kind discriminator.
pub const FIELD_TIPO_CARTA: &str = "tipo_carta";
/// Request field carrying black-card (prompt) text.
pub const FIELD_CARTA_NEGRA: &str = "carta_negra";
/// Request field carrying white-card (answer) text.
pub const FIELD_CARTA_BLANCA: &str = "carta_blanca";
/// Request field carrying free-form context.
pub const FIELD_CONTEXTO: &str = "contexto";

/// Maximum length of `carta_negra`, in characters.
pub const MAX_CARTA_NEGRA: usize = 500;
/// Maximum length of `carta_blanca`, in characters.
pub const MAX_CARTA_BLANCA: usize = 200;
/// Maximum length of `contexto`, in characters.
pub const MAX_CONTEXTO: usize = 1000;

/// Placeholder stored when a client header is missing.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Which card content a submission carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TipoCarta {
    /// Black card: prompt-style content, `carta_negra` is mandatory.
    Negra,
    /// White card: answer-style content, `carta_blanca` is mandatory.
    Blanca,
    /// Either kind; at least one of the two card fields is mandatory.
    Ambas,
}

impl TipoCarta {
    pub const ALL: [TipoCarta; 3] = [TipoCarta::Negra, TipoCarta::Blanca, TipoCarta::Ambas];

    pub fn as_str(self) -> &'static str {
        match self {
            TipoCarta::Negra => "negra",
            TipoCarta::Blanca => "blanca",
            TipoCarta::Ambas => "ambas",
        }
    }
}

impl fmt::Display for TipoCarta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the three card kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTipoCarta(pub String);

impl fmt::Display for UnknownTipoCarta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tipo_carta: {:?}", self.0)
    }
}

impl std::error::Error for UnknownTipoCarta {}

impl FromStr for TipoCarta {
    type Err = UnknownTipoCarta;

    /// Matching is exact: `"Negra"` or `" negra"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TipoCarta::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTipoCarta(s.to_string()))
    }
}

// ── Submission ─────────────────────────────────────────────────────

/// A card contribution that has passed validation.
///
/// Optional fields hold `None` both when the key was absent and when it was
/// sent empty; the distinction only matters to the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub tipo_carta: TipoCarta,
    pub carta_negra: Option<String>,
    pub carta_blanca: Option<String>,
    pub contexto: Option<String>,
}

/// Best-effort provenance of the submitting client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientMeta {
    pub ip_address: String,
    pub user_agent: String,
}

impl ClientMeta {
    /// Metadata for a client that sent no identifying headers.
    pub fn unknown() -> Self {
        Self {
            ip_address: UNKNOWN_CLIENT.to_string(),
            user_agent: UNKNOWN_CLIENT.to_string(),
        }
    }
}

impl Default for ClientMeta {
    fn default() -> Self {
        Self::unknown()
    }
}
