use thiserror::Error;

/// Failures surfaced by a city search.
///
/// Both kinds end up as a status message in the view; neither is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// The geocoding service returned no match for the query.
    #[error("Cidade não encontrada: {0}")]
    NotFound(String),

    /// Transport failure, non-2xx status, or a body that could not be decoded.
    #[error("Falha de rede: {0}")]
    Network(String),
}

impl WeatherError {
    pub(crate) fn network(detail: impl Into<String>) -> Self {
        WeatherError::Network(detail.into())
    }
}
