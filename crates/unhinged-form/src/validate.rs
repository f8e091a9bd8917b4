//! Submission validation.
//!
//! Rules run in a fixed order and never short-circuit, so a caller sees
//! every violation at once:
//!
//! 1. `tipo_carta` is present and one of `negra`, `blanca`, `ambas`.
//! 2. The card content required by that `tipo_carta` is present.
//! 3. `carta_negra`, `carta_blanca` and `contexto` are within their bounds.
//!
//! Empty strings count as "not provided" for the presence rules. Lengths
//! are measured in Unicode scalar values.

use unhinged_core::{
    FIELD_CARTA_BLANCA, FIELD_CARTA_NEGRA, FIELD_CONTEXTO, FIELD_TIPO_CARTA, MAX_CARTA_BLANCA,
    MAX_CARTA_NEGRA, MAX_CONTEXTO, Submission, TipoCarta,
};

use crate::decode::FormFields;

pub const MSG_TIPO_REQUIRED: &str = "tipo_carta is required";
pub const MSG_TIPO_INVALID: &str = "tipo_carta must be 'negra', 'blanca', or 'ambas'";
pub const MSG_NEGRA_REQUIRED: &str = "carta_negra is required when tipo_carta is 'negra'";
pub const MSG_BLANCA_REQUIRED: &str = "carta_blanca is required when tipo_carta is 'blanca'";
pub const MSG_AMBAS_REQUIRED: &str =
    "At least one of carta_negra or carta_blanca is required when tipo_carta is 'ambas'";
pub const MSG_NEGRA_TOO_LONG: &str = "carta_negra must be 500 characters or less";
pub const MSG_BLANCA_TOO_LONG: &str = "carta_blanca must be 200 characters or less";
pub const MSG_CONTEXTO_TOO_LONG: &str = "contexto must be 1000 characters or less";

const LENGTH_RULES: [(&str, usize, &str); 3] = [
    (FIELD_CARTA_NEGRA, MAX_CARTA_NEGRA, MSG_NEGRA_TOO_LONG),
    (FIELD_CARTA_BLANCA, MAX_CARTA_BLANCA, MSG_BLANCA_TOO_LONG),
    (FIELD_CONTEXTO, MAX_CONTEXTO, MSG_CONTEXTO_TOO_LONG),
];

/// Which card texts a submission actually carries.
#[derive(Debug, Clone, Copy)]
struct CardContent {
    negra: bool,
    blanca: bool,
}

/// Content rule owned by each card kind. Returns the violation, if any.
fn content_rule(tipo: TipoCarta, content: CardContent) -> Option<&'static str> {
    match tipo {
        TipoCarta::Negra if !content.negra => Some(MSG_NEGRA_REQUIRED),
        TipoCarta::Blanca if !content.blanca => Some(MSG_BLANCA_REQUIRED),
        TipoCarta::Ambas if !content.negra && !content.blanca => Some(MSG_AMBAS_REQUIRED),
        TipoCarta::Negra | TipoCarta::Blanca | TipoCarta::Ambas => None,
    }
}

/// A field's value, treating the empty string as absent.
fn provided<'a>(fields: &'a FormFields, name: &str) -> Option<&'a str> {
    fields
        .get(name)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}

/// Validate decoded fields, returning every violated rule in order.
///
/// An empty list means the fields form a valid submission.
pub fn validate(fields: &FormFields) -> Vec<String> {
    let mut errors = Vec::new();

    // A missing discriminator is also outside the enum, so both messages apply.
    let tipo = match provided(fields, FIELD_TIPO_CARTA) {
        None => {
            errors.push(MSG_TIPO_REQUIRED.to_string());
            errors.push(MSG_TIPO_INVALID.to_string());
            None
        }
        Some(raw) => match raw.parse::<TipoCarta>() {
            Ok(tipo) => Some(tipo),
            Err(_) => {
                errors.push(MSG_TIPO_INVALID.to_string());
                None
            }
        },
    };

    if let Some(tipo) = tipo {
        let content = CardContent {
            negra: provided(fields, FIELD_CARTA_NEGRA).is_some(),
            blanca: provided(fields, FIELD_CARTA_BLANCA).is_some(),
        };
        if let Some(msg) = content_rule(tipo, content) {
            errors.push(msg.to_string());
        }
    }

    for (field, max, msg) in LENGTH_RULES {
        if provided(fields, field).is_some_and(|v| v.chars().count() > max) {
            errors.push(msg.to_string());
        }
    }

    errors
}

/// Validate and, on success, build the typed submission.
pub fn parse_submission(fields: &FormFields) -> Result<Submission, Vec<String>> {
    let errors = validate(fields);
    if !errors.is_empty() {
        return Err(errors);
    }

    let tipo_carta = provided(fields, FIELD_TIPO_CARTA)
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| vec![MSG_TIPO_INVALID.to_string()])?;
    let owned = |name| provided(fields, name).map(str::to_string);

    Ok(Submission {
        tipo_carta,
        carta_negra: owned(FIELD_CARTA_NEGRA),
        carta_blanca: owned(FIELD_CARTA_BLANCA),
        contexto: owned(FIELD_CONTEXTO),
    })
}
