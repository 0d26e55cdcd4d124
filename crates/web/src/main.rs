use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod state;

use config::Config;
use middleware::auth::ApiKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::assignments::handlers::assign_evaluators,
        features::assignments::handlers::list_assignments,
        features::assignments::handlers::get_workload,
        features::evaluations::handlers::submit_evaluation,
        features::evaluations::handlers::get_assignments,
        features::evaluations::handlers::get_evaluations,
        features::evaluations::handlers::get_progress,
        features::evaluations::handlers::recompute_average,
        features::submissions::handlers::save_submission,
        features::submissions::handlers::get_submission,
        features::submissions::handlers::get_scores,
        features::leaderboard::handlers::publish_results,
        features::leaderboard::handlers::get_leaderboard,
        features::leaderboard::handlers::get_evaluation_status,
        features::leaderboard::handlers::get_criteria,
    ),
    components(
        schemas(
            storage::dto::assignment::AssignEvaluatorsRequest,
            storage::dto::assignment::ManualAssignmentInput,
            storage::dto::assignment::AssignmentResponse,
            storage::dto::assignment::AssignmentStatistics,
            storage::dto::assignment::AutoAssignOutcome,
            storage::dto::assignment::WorkloadReport,
            storage::dto::assignment::EvaluatorWorkload,
            storage::dto::assignment::ManualAssignBatchOutcome,
            storage::dto::assignment::ManualAssignItemResult,
            storage::dto::assignment::ManualAssignItemError,
            storage::dto::assignment::BatchSummary,
            storage::dto::evaluation::SubmitEvaluationRequest,
            storage::dto::evaluation::EvaluationOutcome,
            storage::dto::evaluation::SubmissionStatus,
            storage::dto::evaluation::EvaluatorAssignments,
            storage::dto::evaluation::AssignedTeam,
            storage::dto::evaluation::EvaluatorEvaluations,
            storage::dto::evaluation::EvaluationSummary,
            storage::dto::evaluation::EvaluatorProgress,
            storage::dto::evaluation::RecomputeOutcome,
            storage::dto::submission::SaveSubmissionRequest,
            storage::dto::submission::SubmissionResponse,
            storage::dto::submission::TeamScores,
            storage::dto::submission::TeamEvaluationView,
            storage::dto::submission::CriterionBreakdown,
            storage::dto::submission::EvaluatorComment,
            storage::dto::completion::EvaluationStatus,
            storage::dto::completion::AssignmentDetail,
            storage::dto::criteria::CriteriaCatalogue,
            storage::dto::criteria::CriterionInfo,
            storage::dto::leaderboard::PublishResultsRequest,
            storage::dto::leaderboard::PublishOutcome,
            storage::dto::leaderboard::LeaderboardView,
            storage::models::Criterion,
            storage::models::CriterionScore,
            storage::models::CriterionScores,
            storage::models::LeaderboardEntry,
        )
    ),
    tags(
        (name = "assignments", description = "Admin evaluator-assignment endpoints"),
        (name = "evaluations", description = "Evaluator worklist and scoring endpoints"),
        (name = "submissions", description = "Team submission endpoints"),
        (name = "leaderboard", description = "Completion tracking and published results"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting competition evaluation API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    let state = AppState {
        db,
        api_keys: api_keys.clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let admin_routes = Router::new()
        .merge(features::assignments::routes::routes())
        .merge(features::evaluations::routes::admin_routes())
        .merge(features::leaderboard::routes::admin_routes())
        .route_layer(axum::middleware::from_fn_with_state(
            api_keys,
            middleware::auth::require_api_key,
        ));

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/admin", admin_routes)
        .nest("/api/teams", features::submissions::routes::routes())
        .nest("/api/evaluators", features::evaluations::routes::routes())
        .nest("/api", features::leaderboard::routes::routes())
        .layer(cors)
        .with_state(state);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    axum::serve(listener, app).await?;

    Ok(())
}
