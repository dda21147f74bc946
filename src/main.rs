use std::sync::Arc;

use tokio::net::TcpListener;

use docqa::application::ports::FileLoader;
use docqa::application::services::{SessionRegistry, SubmissionLimits, SubmissionService};
use docqa::domain::GenerationParams;
use docqa::infrastructure::llm::CohereClient;
use docqa::infrastructure::observability::{TracingConfig, init_tracing};
use docqa::infrastructure::text_processing::CompositeFileLoader;
use docqa::presentation::{
    ApiCredential, AppState, ConfigurationError, Environment, Settings, create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(ConfigurationError::InvalidEnvironment)?;
    let settings = Settings::load(environment)?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        settings.logging.enable_json,
        &settings.logging.level,
    ));

    let api_key = ApiCredential::from_env(&settings.llm.api_key_env).inspect_err(|e| {
        tracing::error!(error = %e, "Refusing to start without a completion service credential");
    })?;

    let file_loader: Arc<dyn FileLoader> = Arc::new(CompositeFileLoader::for_supported_types(
        settings.extraction.pdf_timeout(),
    ));
    let llm_client = Arc::new(CohereClient::new(
        &settings.llm.base_url,
        api_key.expose(),
        &settings.llm.model,
        settings.llm.timeout(),
    )?);

    let submission_service = Arc::new(SubmissionService::new(
        file_loader,
        llm_client,
        SubmissionLimits {
            max_context_bytes: settings.context.max_total_bytes,
            max_tokens_limit: settings.generation.max_tokens_limit,
        },
    ));

    let state = AppState {
        submission_service,
        sessions: Arc::new(SessionRegistry::new()),
        generation_defaults: GenerationParams {
            temperature: settings.generation.default_temperature,
            max_tokens: settings.generation.default_max_tokens,
        },
        max_upload_bytes: settings.server.max_upload_bytes,
    };

    let router = create_router(state);

    let listener =
        TcpListener::bind((settings.server.host.as_str(), settings.server.port)).await?;
    let addr = listener.local_addr()?;
    tracing::info!(
        %addr,
        model = %settings.llm.model,
        max_context_bytes = settings.context.max_total_bytes,
        "Listening"
    );

    axum::serve(listener, router).await?;

    Ok(())
}
