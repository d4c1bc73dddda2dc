// Spotify helper functions for wikirelated
// Fetches Spotify's own "related artists" recommendation for an artist id

use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::helpers::gateway::ApiGateway;
use crate::helpers::http_client::HttpClientError;

/// Placeholder used when Spotify returns an artist without a name
pub const MISSING_NAME: &str = "MISSING";

// Spotify API error types
#[derive(Error, Debug)]
pub enum SpotifyError {
    #[error("API error: {0}")]
    ApiError(#[from] HttpClientError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Empty response for artist {0}")]
    EmptyResponse(String),
}

pub type Result<T> = std::result::Result<T, SpotifyError>;

#[derive(Debug, Clone, Deserialize)]
struct SpotifyArtist {
    name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RelatedArtistsResponse {
    #[serde(default)]
    artists: Vec<SpotifyArtist>,
}

/// Request the related artists of `artist_id`
pub fn fetch_related_artists(gateway: &ApiGateway, artist_id: &str) -> Result<Vec<String>> {
    let spotify = &gateway.config().spotify;
    let endpoint = format!(
        "{}/artists/{}/related-artists",
        spotify.endpoint.trim_end_matches('/'),
        urlencoding::encode(artist_id)
    );

    let authorization = spotify.access_token.as_ref().map(|token| format!("Bearer {}", token));
    let headers: Vec<(&str, &str)> = authorization
        .iter()
        .map(|value| ("Authorization", value.as_str()))
        .collect();

    let response = gateway
        .get_json_with_headers(&endpoint, &[], false, &format!("Spotify {}", artist_id), &headers)?
        .ok_or_else(|| SpotifyError::EmptyResponse(artist_id.to_string()))?;

    let related: RelatedArtistsResponse = serde_json::from_value(response)?;
    Ok(related
        .artists
        .into_iter()
        .map(|artist| artist.name.unwrap_or_else(|| MISSING_NAME.to_string()))
        .collect())
}

/// Names of Spotify's related artists, or an empty list when there is no id
/// or the request fails
pub fn related_artists(gateway: &ApiGateway, artist_id: Option<&str>) -> Vec<String> {
    let artist_id = match artist_id {
        Some(id) if !id.trim().is_empty() => id,
        _ => return Vec::new(),
    };

    if gateway.config().spotify.access_token.is_none() {
        debug!("No Spotify access token configured, sending unauthenticated request");
    }

    match fetch_related_artists(gateway, artist_id) {
        Ok(names) => names,
        Err(e) => {
            warn!("Could not get related artists for Spotify artist {}: {}", artist_id, e);
            Vec::new()
        }
    }
}
