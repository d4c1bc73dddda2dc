use log::debug;

use crate::data::wiki::Claims;
use crate::helpers::gateway::ApiGateway;
use crate::helpers::wikipedia::{Result, WikiError};

/// Fetch the claims of a Wikidata entity.
///
/// An absent or empty id yields `Ok(None)` without any request, as does an
/// entity the API reports as missing or without claims.
pub fn get_claims(gateway: &ApiGateway, entity_id: Option<&str>) -> Result<Option<Claims>> {
    let entity_id = match entity_id {
        Some(id) if !id.trim().is_empty() => id,
        _ => return Ok(None),
    };

    let params = [
        ("format", "json".to_string()),
        ("action", "wbgetentities".to_string()),
        ("props", "claims".to_string()),
        ("ids", entity_id.to_string()),
    ];
    let endpoint = &gateway.config().wikidata.endpoint;
    let response = match gateway.get_json(endpoint, &params, false, &format!("Wikidata {}", entity_id))? {
        Some(response) => response,
        None => return Ok(None),
    };

    let entity = match response.get("entities").and_then(|e| e.get(entity_id)) {
        Some(entity) if entity.get("missing").is_none() => entity,
        _ => {
            debug!("Wikidata entity {} not found", entity_id);
            return Ok(None);
        }
    };

    match entity.get("claims") {
        Some(claims) if claims.is_object() => serde_json::from_value(claims.clone())
            .map(Some)
            .map_err(|e| WikiError::Malformed(format!("claims of {}: {}", entity_id, e))),
        _ => Ok(None),
    }
}

/// True if `property` has at least one claim
pub fn has_property(claims: &Claims, property: &str) -> bool {
    claims.get(property).map(|values| !values.is_empty()).unwrap_or(false)
}

/// Main value of the first claim for an external-id property such as P1902
pub fn external_id(claims: &Claims, property: &str) -> Option<String> {
    claims
        .get(property)?
        .first()?
        .get("mainsnak")?
        .get("datavalue")?
        .get("value")?
        .as_str()
        .map(|s| s.to_string())
}
