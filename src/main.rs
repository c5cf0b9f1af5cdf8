use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
};
use scriptforge::models::{GenerateRequest, GenerateResponse};
use scriptforge::services::llm::GenClient;
use scriptforge::services::parser::ResponseParser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Clone)]
struct AppState {
    gen_client: Arc<GenClient>,
    parser: Arc<ResponseParser>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let app_state = AppState {
        gen_client: Arc::new(GenClient::new()?),
        parser: Arc::new(ResponseParser::new()),
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .route("/health", get(health_check))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::AllowMethods::any())
                .allow_headers(tower_http::cors::AllowHeaders::any()),
        );

    let listener = TcpListener::bind("0.0.0.0:3000").await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index() -> Html<String> {
    let html_content = r#"
    <!DOCTYPE html>
    <html>
    <head>
        <title>Scriptforge</title>
        <meta charset="utf-8">
        <style>
            body { font-family: Arial, sans-serif; margin: 40px; }
            .info-box { background-color: #f0f8ff; padding: 20px; border-radius: 8px; margin: 20px 0; }
            .endpoint { background-color: #f5f5f5; padding: 10px; margin: 10px 0; border-radius: 4px; font-family: monospace; }
        </style>
    </head>
    <body>
        <h1>Scriptforge</h1>

        <div class="info-box">
            <h2>Service Information</h2>
            <p>Submit a topic and get back a structured short-form video production package:
               hook variants, a storyboard, hashtags and a master prompt.</p>
            <p>Completions in Russian and English are both supported.</p>
        </div>

        <h2>Available Endpoints:</h2>
        <div class="endpoint">GET / - This information page</div>
        <div class="endpoint">GET /health - Health check</div>
        <div class="endpoint">POST /generate - JSON body: { "user_id": "...", "prompt": "..." }</div>
    </body>
    </html>
    "#
    .to_string();

    Html(html_content)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, StatusCode> {
    let completion = state
        .gen_client
        .generate(&request.user_id, &request.prompt)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "generation endpoint call failed");
            StatusCode::BAD_GATEWAY
        })?;

    let result = state.parser.parse(&completion);

    Ok(Json(GenerateResponse {
        success: true,
        generation_id: uuid::Uuid::new_v4().to_string(),
        result,
    }))
}
