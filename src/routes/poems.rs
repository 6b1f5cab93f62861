use actix_web::{web, HttpResponse, Responder};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use validator::Validate;
use crate::core::{random_seed, scan_line, Corpus, GenerationError, PoemGenerator};
use crate::models::{
    CorporaResponse, ErrorResponse, FormsResponse, GeneratePoemRequest, HealthResponse, PoemForm,
    PoemResponse, RandomPoemQuery, ScanRequest, StressPattern,
};
use crate::services::Library;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub library: Library,
    pub generator: PoemGenerator,
}

/// Configure all poem-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/forms", web::get().to(list_forms))
        .route("/corpora", web::get().to(list_corpora))
        .route("/poems", web::post().to(generate_poem))
        .route("/poems/random", web::get().to(random_poem))
        .route("/scan", web::post().to(scan));
}

fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let library = &state.library;
    let ready = !library.corpora.is_empty() && !library.forms.is_empty();

    HttpResponse::Ok().json(HealthResponse {
        status: if ready { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        dictionary_words: library.dictionary.len(),
        corpora: library.corpora.len(),
        forms: library.forms.len(),
    })
}

/// GET /api/v1/forms
async fn list_forms(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(FormsResponse {
        forms: state.library.forms.forms().to_vec(),
    })
}

/// GET /api/v1/corpora
async fn list_corpora(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(CorporaResponse {
        corpora: state.library.corpora.summaries(),
    })
}

/// Generate a poem
///
/// POST /api/v1/poems
///
/// Request body:
/// ```json
/// {
///   "form": "Sonnet",
///   "corpus": "moby_dick",
///   "seed": 42
/// }
/// ```
async fn generate_poem(
    state: web::Data<AppState>,
    req: web::Json<GeneratePoemRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for generate_poem request: {:?}", errors);
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    let Some(form) = state.library.forms.get(&req.form).cloned() else {
        return error_response(
            actix_web::http::StatusCode::NOT_FOUND,
            "Unknown poem form",
            format!(
                "'{}' is not one of: {}",
                req.form,
                state.library.forms.names().join(", ")
            ),
        );
    };

    let Some(corpus) = state.library.corpora.get(&req.corpus) else {
        return error_response(
            actix_web::http::StatusCode::NOT_FOUND,
            "Unknown corpus",
            format!(
                "'{}' is not one of: {}",
                req.corpus,
                state.library.corpora.names().join(", ")
            ),
        );
    };

    let seed = req.seed.unwrap_or_else(random_seed);
    run_generation(state.generator, corpus, form, seed).await
}

/// Generate a poem from a random form and corpus
///
/// GET /api/v1/poems/random?seed={seed}
///
/// The seed drives both the choice of form and corpus and the poem itself.
async fn random_poem(
    state: web::Data<AppState>,
    query: web::Query<RandomPoemQuery>,
) -> impl Responder {
    let seed = query.seed.unwrap_or_else(random_seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let form = state.library.forms.forms().choose(&mut rng).cloned();
    let names = state.library.corpora.names();
    let corpus = names
        .choose(&mut rng)
        .and_then(|name| state.library.corpora.get(name));

    match (form, corpus) {
        (Some(form), Some(corpus)) => run_generation(state.generator, corpus, form, seed).await,
        _ => error_response(
            actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
            "No poem forms or corpora loaded",
            "the service has nothing to generate from".to_string(),
        ),
    }
}

/// Run the search on the blocking thread pool; it is CPU bound and may backtrack heavily
async fn run_generation(
    generator: PoemGenerator,
    corpus: Arc<Corpus>,
    form: PoemForm,
    seed: u64,
) -> HttpResponse {
    tracing::info!("Generating {} from {} (seed {})", form.name, corpus.name(), seed);

    let result = web::block(move || generator.generate(&corpus, &form, seed)).await;

    match result {
        Ok(Ok(poem)) => {
            tracing::info!("Generated {} lines of {} from {}", poem.lines.len(), poem.form, poem.corpus);
            HttpResponse::Ok().json(PoemResponse::from(poem))
        }
        Ok(Err(e)) => {
            tracing::warn!("Poem generation failed (seed {}): {}", seed, e);
            let error = match e {
                GenerationError::NoRhymeClass { .. } => "Corpus too small for form",
                _ => "Generation failed",
            };
            error_response(actix_web::http::StatusCode::UNPROCESSABLE_ENTITY, error, e.to_string())
        }
        Err(e) => {
            tracing::error!("Generation task failed: {}", e);
            error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Generation task failed",
                e.to_string(),
            )
        }
    }
}

/// Scan a line of verse
///
/// POST /api/v1/scan
///
/// Request body:
/// ```json
/// {
///   "text": "Shall I compare thee to a summer's day",
///   "meter": "0101010101"
/// }
/// ```
async fn scan(
    state: web::Data<AppState>,
    req: web::Json<ScanRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    let meter = match req.meter.as_deref().map(StressPattern::parse).transpose() {
        Ok(meter) => meter,
        Err(e) => {
            return error_response(
                actix_web::http::StatusCode::BAD_REQUEST,
                "Invalid meter",
                e.to_string(),
            );
        }
    };

    let scansion = scan_line(&state.library.dictionary, &req.text, meter.as_ref());
    tracing::debug!(
        "Scanned {} words, {} unknown",
        scansion.words.len(),
        scansion.unknown_words.len()
    );

    HttpResponse::Ok().json(scansion)
}
