pub mod game;
pub mod search_request;
pub mod search_response;

pub use game::{Game, PlayerSuggestions, Suggestion};
pub use search_request::{SearchRequest, DEFAULT_LIMIT, DEFAULT_SAMPLE};
pub use search_response::{ErrorBody, SearchResponse};
