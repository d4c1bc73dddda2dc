use log::debug;

use crate::data::{ArtistCandidate, Claims};
use crate::helpers::gateway::ApiGateway;
use crate::helpers::{wikidata, wikipedia};

/// True if any of `properties` has a claim. Order of `properties` is irrelevant.
pub fn is_artist_claims<S: AsRef<str>>(claims: &Claims, properties: &[S]) -> bool {
    properties
        .iter()
        .any(|property| wikidata::has_property(claims, property.as_ref()))
}

/// Decide whether `title` is a musical artist.
///
/// Looks up the page's Wikidata id, then the entity's claims. A page without a
/// Wikidata link is not an artist and no entity lookup is made. Lookup failures
/// are logged and count as "not an artist".
pub fn classify(gateway: &ApiGateway, title: &str, want_spotify_id: bool) -> ArtistCandidate {
    let page = match wikipedia::get_page(
        gateway,
        title,
        "pageprops",
        &[("ppprop", "wikibase_item".to_string())],
    ) {
        Ok(Some(page)) => page,
        Ok(None) => {
            debug!("No Wikipedia page for {}", title);
            return ArtistCandidate::not_an_artist(title);
        }
        Err(e) => {
            debug!("Wikipedia lookup for {} failed: {}", title, e);
            return ArtistCandidate::not_an_artist(title);
        }
    };

    let wikibase_id = match page.wikibase_item.as_deref() {
        Some(id) => id,
        None => {
            debug!("{} has no Wikidata item", title);
            return ArtistCandidate::not_an_artist(title);
        }
    };

    let claims = match wikidata::get_claims(gateway, Some(wikibase_id)) {
        Ok(Some(claims)) => claims,
        Ok(None) => return ArtistCandidate::not_an_artist(title),
        Err(e) => {
            debug!("Wikidata lookup for {} ({}) failed: {}", title, wikibase_id, e);
            return ArtistCandidate::not_an_artist(title);
        }
    };

    let classifier = &gateway.config().classifier;
    let is_artist = is_artist_claims(&claims, &classifier.artist_properties);
    let spotify_id = if want_spotify_id {
        wikidata::external_id(&claims, &classifier.spotify_property)
    } else {
        None
    };

    debug!("{} ({}): artist={} spotify={:?}", title, wikibase_id, is_artist, spotify_id);
    ArtistCandidate {
        title: title.to_string(),
        is_artist,
        spotify_id,
    }
}
