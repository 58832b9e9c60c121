//! Application state wiring all services together.
//!
//! `AppState` holds the concrete service instances used by both CLI and
//! REST API. Services are generic over provider/repository traits, but
//! AppState pins them to the concrete infra implementations. The two
//! externally-gated services are `Option`: a missing credential degrades
//! the feature instead of failing startup.

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;
use waypoint_core::chat::service::ChatService;
use waypoint_core::search::service::SearchService;
use waypoint_core::turn::processor::TurnProcessor;
use waypoint_infra::config::{load_global_config, resolve_data_dir};
use waypoint_infra::llm::gemini::GeminiProvider;
use waypoint_infra::places::GooglePlacesClient;
use waypoint_infra::secret::ServiceCredentials;
use waypoint_infra::session::InMemorySessionRepository;
use waypoint_types::config::GlobalConfig;

/// Concrete type aliases for the service generics pinned to infra
/// implementations.
pub type ConcreteChatService = ChatService<InMemorySessionRepository>;
pub type ConcreteTurnProcessor = TurnProcessor<GeminiProvider>;
pub type ConcreteSearchService = SearchService<GooglePlacesClient>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    /// Present only when the inference credential is configured.
    pub turn_processor: Option<Arc<ConcreteTurnProcessor>>,
    /// Present only when the places credential is configured.
    pub search_service: Option<Arc<ConcreteSearchService>>,
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: load config, resolve credentials,
    /// wire services.
    ///
    /// Missing credentials are logged and degrade the corresponding
    /// feature; they never abort startup.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = load_global_config(&data_dir).await;
        let credentials = ServiceCredentials::from_env();

        if !credentials.turns_available() {
            tracing::warn!(
                "No inference API key configured ({}); chat turns disabled",
                waypoint_infra::secret::env::GENAI_KEY_VAR
            );
        }
        if !credentials.search_available() {
            tracing::warn!(
                "No places API key configured ({}); place search disabled",
                waypoint_infra::secret::env::PLACES_KEY_VAR
            );
        }

        Ok(Self::wire(
            config,
            data_dir,
            credentials.genai_api_key,
            credentials.places_api_key,
        ))
    }

    /// Wire services from explicit credentials.
    pub fn wire(
        config: GlobalConfig,
        data_dir: PathBuf,
        genai_api_key: Option<SecretString>,
        places_api_key: Option<SecretString>,
    ) -> Self {
        let chat_service = Arc::new(ChatService::new(
            InMemorySessionRepository::new(),
            config.greeting.clone(),
        ));

        let turn_processor = genai_api_key
            .map(|key| Arc::new(TurnProcessor::new(GeminiProvider::new(key), &config)));

        let search_service = places_api_key.map(|key| {
            Arc::new(SearchService::new(
                GooglePlacesClient::new(key),
                config.max_results,
            ))
        });

        Self {
            chat_service,
            turn_processor,
            search_service,
            config,
            data_dir,
        }
    }
}
