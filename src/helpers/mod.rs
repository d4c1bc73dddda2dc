pub mod http_client;
pub mod gateway;
pub mod wikipedia;
pub mod wikidata;
pub mod associated_acts;
pub mod pageviews;
pub mod spotify;

pub use gateway::ApiGateway;
