use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrreryError {
    #[error("Catalog record without identifier column `{0}`")]
    MissingIdentifier(String),

    #[error("Body {body}: required field `{field}` has no value")]
    MissingField { body: String, field: String },

    #[error("Planet {0}: mass and radius are both missing and random fallback is disabled")]
    ImputationExhausted(String),

    #[error("Cannot assemble a system from zero stars and zero planets")]
    EmptySystem,

    #[error("Total stellar mass is zero or not finite while fixing the orbit of planet {0}")]
    ZeroStellarMass(String),

    #[error("Invalid imputation parameter: {0}")]
    InvalidImputationParameter(String),

    #[error("Invalid catalog query: {0}")]
    InvalidQuery(String),

    #[error("Catalog request failed: {0}")]
    CatalogRequest(#[from] ureq::Error),

    #[error("Malformed catalog response: {0}")]
    CatalogResponse(String),

    #[error("JSON decoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV decoding error: {0}")]
    Csv(#[from] csv::Error),
}

impl PartialEq for OrreryError {
    fn eq(&self, other: &Self) -> bool {
        use OrreryError::*;
        match (self, other) {
            (MissingIdentifier(a), MissingIdentifier(b)) => a == b,
            (
                MissingField { body: a, field: fa },
                MissingField { body: b, field: fb },
            ) => a == b && fa == fb,
            (ImputationExhausted(a), ImputationExhausted(b)) => a == b,
            (ZeroStellarMass(a), ZeroStellarMass(b)) => a == b,
            (InvalidImputationParameter(a), InvalidImputationParameter(b)) => a == b,
            (InvalidQuery(a), InvalidQuery(b)) => a == b,
            (CatalogResponse(a), CatalogResponse(b)) => a == b,

            // Wrapped library errors are not comparable: same variant is enough
            (CatalogRequest(_), CatalogRequest(_)) => true,
            (Json(_), Json(_)) => true,
            (Csv(_), Csv(_)) => true,

            (EmptySystem, EmptySystem) => true,

            _ => false,
        }
    }
}
