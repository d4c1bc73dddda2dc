// Common helpers for integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use wikirelated::config::Config;
use wikirelated::helpers::http_client::{HttpClient, HttpClientError, HttpResponse};
use wikirelated::helpers::ApiGateway;

/// Offline stand-in for the public APIs.
///
/// Each request is answered by the first rule whose pattern occurs in the URL;
/// anything unmatched gets a 404. Every URL is recorded.
#[derive(Debug, Clone, Default)]
pub struct FakeWeb {
    rules: Arc<Mutex<Vec<(String, Result<String, u16>)>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeWeb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, pattern: &str, body: Value) -> &Self {
        self.rules.lock().unwrap().push((pattern.to_string(), Ok(body.to_string())));
        self
    }

    pub fn fail(&self, pattern: &str, status: u16) -> &Self {
        self.rules.lock().unwrap().push((pattern.to_string(), Err(status)));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_matching(&self, pattern: &str) -> usize {
        self.requests().iter().filter(|url| url.contains(pattern)).count()
    }

    pub fn gateway(&self) -> ApiGateway {
        ApiGateway::new(Box::new(self.clone()), Config::default())
    }

    pub fn gateway_with(&self, config: Config) -> ApiGateway {
        ApiGateway::new(Box::new(self.clone()), config)
    }

    /// Wikipedia page props for `title` pointing at Wikidata entity `qid`
    pub fn page_props(&self, title: &str, qid: Option<&str>) -> &Self {
        let mut page = json!({ "pageid": 1, "ns": 0, "title": title });
        if let Some(qid) = qid {
            page["pageprops"] = json!({ "wikibase_item": qid });
        }
        self.respond(
            &format!("prop=pageprops&titles={}&", encode_title(title)),
            json!({ "query": { "pages": { "1": page } } }),
        )
    }

    /// Wikidata entity `qid` with one claim per property; P1902 carries `spotify_id`
    pub fn entity(&self, qid: &str, properties: &[&str], spotify_id: Option<&str>) -> &Self {
        let mut claims = serde_json::Map::new();
        for property in properties {
            claims.insert(property.to_string(), json!([{ "mainsnak": { "property": property } }]));
        }
        if let Some(id) = spotify_id {
            claims.insert(
                "P1902".to_string(),
                json!([{ "mainsnak": { "datavalue": { "value": id, "type": "string" } } }]),
            );
        }
        self.respond(
            &format!("ids={}", qid),
            json!({ "entities": { qid: { "id": qid, "claims": claims } } }),
        )
    }

    /// Links and wikitext of `title`
    pub fn links_page(&self, title: &str, links: &[&str], wikitext: &str) -> &Self {
        let links: Vec<Value> = links.iter().map(|l| json!({ "ns": 0, "title": l })).collect();
        self.respond(
            &format!("prop=links|revisions&titles={}&", encode_title(title)),
            json!({ "query": { "pages": { "42": {
                "title": title,
                "links": links,
                "revisions": [{ "contentformat": "text/x-wiki", "*": wikitext }]
            } } } }),
        )
    }

    /// Monthly page views of `title`
    pub fn views(&self, title: &str, months: &[i64]) -> &Self {
        let items: Vec<Value> = months.iter().map(|v| json!({ "views": v })).collect();
        self.respond(&format!("/user/{}/monthly/", encode_title(title)), json!({ "items": items }))
    }

    /// Spotify related artists of `artist_id`
    pub fn related(&self, artist_id: &str, names: &[&str]) -> &Self {
        let artists: Vec<Value> = names.iter().map(|n| json!({ "name": n })).collect();
        self.respond(
            &format!("/artists/{}/related-artists", artist_id),
            json!({ "artists": artists }),
        )
    }
}

pub fn encode_title(title: &str) -> String {
    urlencoding::encode(&title.replace(' ', "_")).into_owned()
}

impl HttpClient for FakeWeb {
    fn get(&self, url: &str, _headers: &[(&str, &str)]) -> Result<HttpResponse, HttpClientError> {
        self.requests.lock().unwrap().push(url.to_string());
        let rules = self.rules.lock().unwrap();
        match rules.iter().find(|(pattern, _)| url.contains(pattern.as_str())) {
            Some((_, Ok(body))) => Ok(HttpResponse { status: 200, body: body.clone() }),
            Some((_, Err(code))) => Err(HttpClientError::Status(*code)),
            None => Err(HttpClientError::Status(404)),
        }
    }

    fn clone_box(&self) -> Box<dyn HttpClient> {
        Box::new(self.clone())
    }
}
