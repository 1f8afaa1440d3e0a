//! Request handlers

use super::{ApiError, AppState};
use axum::extract::{Query, RawQuery, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::{error, info, instrument};
use wordwise_core::{NormalizedWord, SavedWord};

#[derive(Debug, Default, Deserialize)]
pub struct WordQuery {
    pub text: Option<String>,
}

/// `GET /word?text=<word>`
#[instrument(skip(state), fields(text = ?query.text))]
pub async fn get_word(
    State(state): State<AppState>,
    Query(query): Query<WordQuery>,
) -> Result<Json<NormalizedWord>, ApiError> {
    let text = query
        .text
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::MissingParameter("text"))?;

    let word = state
        .dictionary
        .lookup(&text)
        .await
        .map_err(|e| ApiError::from_lookup(&e))?;

    info!(
        definitions = word.definitions.len(),
        idioms = word.idioms.len(),
        "Lookup complete"
    );
    Ok(Json(word))
}

/// Parameters of a save request; repeated keys accumulate
#[derive(Debug, Default, PartialEq)]
pub struct SaveParams {
    pub word: Option<String>,
    pub meanings: Vec<String>,
    pub pronunciations: Vec<String>,
}

impl SaveParams {
    pub fn parse(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "word" if params.word.is_none() => params.word = Some(value.into_owned()),
                "meanings" => params.meanings.push(value.into_owned()),
                "pronunciations" => params.pronunciations.push(value.into_owned()),
                _ => {}
            }
        }
        params
    }
}

/// `GET /save?word=<w>&meanings=<m>...&pronunciations=<p>...`
#[instrument(skip_all)]
pub async fn save_word(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<(StatusCode, String), ApiError> {
    let params = SaveParams::parse(query.as_deref().unwrap_or_default());
    let word = params
        .word
        .filter(|w| !w.is_empty())
        .ok_or(ApiError::MissingParameter("word"))?;

    let record = SavedWord::new(word.clone(), params.meanings, params.pronunciations);
    state.store.append(record).await.map_err(|e| {
        error!(error = %e, word = %word, "Failed to save word");
        ApiError::SaveFailed
    })?;

    info!(word = %word, "Word saved");
    Ok((StatusCode::OK, format!("Word '{}' saved successfully", word)))
}

/// `GET /saved-words`
#[instrument(skip_all)]
pub async fn saved_words(State(state): State<AppState>) -> Result<Json<Vec<SavedWord>>, ApiError> {
    let words = state.store.list_all().await.map_err(|e| {
        error!(error = %e, "Failed to read saved words");
        ApiError::ReadSavedFailed
    })?;
    Ok(Json(words))
}
