//! dictform preview server - renders dictionaries and relation pages over HTTP
//!
//! Pages are rendered on request from the dictionary directory, so edits to the
//! YAML files show up on reload.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Form, Json, Router,
};
use dictform::components::{GridView, MessageBox, MessageIcon};
use dictform::config::{Settings, DEFAULT_CONFIG_FILE};
use dictform::dictionary::{DictionaryStore, FileDictionaryStore, FormElement, Values};
use dictform::html::{HtmlBuilder, HtmlElement, HtmlTag};
use dictform::panel::DataPanel;
use dictform::records::{JsonRecordProvider, RecordProvider};
use dictform::relation::{RedirectParameters, RelationType};
use dictform::service::{dictionary_list_element, ElementService};
use dictform::PageState;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";

struct AppState {
    settings: Settings,
    store: FileDictionaryStore,
    records: JsonRecordProvider,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load(DEFAULT_CONFIG_FILE)?;
    settings.install_translator()?;

    let state = Arc::new(AppState {
        store: FileDictionaryStore::open(&settings.dictionaries_dir)?,
        records: JsonRecordProvider::open(&settings.records_dir)?,
        settings,
    });
    let addr = state.settings.bind_address();

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/dictionaries", get(list_dictionaries))
        .route("/dictionaries/:name", get(render_dictionary))
        .route("/redirect", get(redirect_index).post(redirect_save))
        .layer(CorsLayer::permissive())
        .with_state(state.clone());

    tracing::info!("dictform server listening on {}", addr);
    tracing::info!("Serving dictionaries from {}", state.settings.dictionaries_dir.display());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Health check endpoint (liveness)
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "dictform-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Grid of the stored dictionaries
async fn list_dictionaries(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let service = ElementService::new(state.store.clone());
    let list = dictionary_list_element();
    let grid = GridView::new(&list, service.dictionary_list_values()?);
    Ok(page("Dictionaries", grid.html_element()?))
}

#[derive(Debug, Deserialize)]
struct RenderQuery {
    state: Option<String>,
}

/// Panel of a dictionary in the requested state, or its grid for `list`
async fn render_dictionary(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(query): Query<RenderQuery>,
) -> Result<Html<String>, AppError> {
    let page_state = match query.state.as_deref() {
        Some(s) => PageState::parse(s)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown page state '{}'", s)))?,
        None => PageState::Insert,
    };
    let dictionary = state.store.get(&name)?;
    tracing::debug!(name = %name, state = %page_state, "rendering dictionary");

    let body = if page_state == PageState::List {
        grid(&state, &dictionary, &Values::new())?
    } else {
        let mut panel = DataPanel::new(&dictionary, page_state);
        panel.app_path = state.settings.app_path.clone();
        panel.values = panel.values_with_defaults()?;
        panel.html_element()?
    };
    Ok(page(title_of(&dictionary), body))
}

#[derive(Debug, Deserialize)]
struct RedirectQuery {
    #[serde(default)]
    parameters: String,
}

/// Page opened by a relation link
async fn redirect_index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RedirectQuery>,
) -> Result<Html<String>, AppError> {
    let parameters = RedirectParameters::decode(&query.parameters)?;
    let dictionary = state.store.get(&parameters.dictionary_name)?;

    let body = match parameters.relation_type {
        RelationType::List => grid(&state, &dictionary, &parameters.relation_values)?,
        RelationType::View | RelationType::Update => {
            let mut panel = DataPanel::new(&dictionary, parameters.relation_type.page_state());
            panel.app_path = state.settings.app_path.clone();
            if !panel.load_values_from_pk(&state.records, &parameters.relation_values)? {
                return Err(AppError::NotFound(format!(
                    "No {} record matches the relation values",
                    dictionary.name
                )));
            }
            relation_form(&query.parameters, parameters.relation_type, panel.html_element()?)
        }
    };
    Ok(page(title_of(&dictionary), body))
}

/// Save the record posted from an update relation page
async fn redirect_save(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RedirectQuery>,
    Form(posted): Form<Values>,
) -> Result<Html<String>, AppError> {
    let parameters = RedirectParameters::decode(&query.parameters)?;
    if parameters.relation_type != RelationType::Update {
        return Err(AppError::BadRequest("Only update pages can be saved".to_string()));
    }
    let dictionary = state.store.get(&parameters.dictionary_name)?;

    let mut panel = DataPanel::new(&dictionary, PageState::Update);
    panel.app_path = state.settings.app_path.clone();
    let saved = panel
        .save(&state.records, &posted, &parameters.relation_values)?
        .is_empty();

    let mut body = relation_form(&query.parameters, RelationType::Update, panel.html_element()?);
    if saved {
        let message = MessageBox::new(&dictform::translate::key("Record saved"), MessageIcon::Success);
        body = body.append_element(message.html_element());
    }
    Ok(page(title_of(&dictionary), body))
}

fn grid(state: &AppState, dictionary: &FormElement, filter: &Values) -> Result<HtmlElement, AppError> {
    let mut grid = GridView::new(dictionary, state.records.find(dictionary, filter)?);
    grid.app_path = state.settings.app_path.clone();
    Ok(grid.html_element()?)
}

/// Wraps a relation panel in a form posting back to the redirect, with a save
/// button when the relation allows editing
fn relation_form(parameters: &str, relation_type: RelationType, panel: HtmlElement) -> HtmlElement {
    HtmlElement::new(HtmlTag::Form)
        .with_attribute("method", "post")
        .with_attribute("action", format!("/redirect?parameters={}", parameters))
        .append_element(panel)
        .append_element_if(relation_type.shows_toolbar(), HtmlTag::Div, |toolbar| {
            toolbar.with_css_class("row").append_element_with(HtmlTag::Div, |col| {
                col.with_css_class("col-sm-12").append_element_with(HtmlTag::Button, |button| {
                    button
                        .with_attribute("type", "submit")
                        .with_css_class("btn btn-primary")
                        .append_element_with(HtmlTag::Span, |s| s.with_css_class("fa fa-check"))
                        .append_text(format!("&nbsp;{}", dictform::translate::key("Save")))
                })
            })
        })
}

fn title_of(dictionary: &FormElement) -> &str {
    dictionary.title.as_deref().unwrap_or(&dictionary.name)
}

fn page(title: &str, body: HtmlElement) -> Html<String> {
    let title = html_escape::encode_text(title).to_string();

    let mut builder = HtmlBuilder::new();
    builder.append_text("<!DOCTYPE html>");
    builder.start_element_from(
        HtmlElement::new(HtmlTag::Html)
            .append_element_with(HtmlTag::Head, |head| {
                head.append_element_with(HtmlTag::Meta, |m| m.with_attribute("charset", "utf-8"))
                    .append_element_with(HtmlTag::Title, |t| t.append_text(title.as_str()))
                    .append_element_with(HtmlTag::Link, |l| {
                        l.with_attribute("rel", "stylesheet").with_attribute("href", BOOTSTRAP_CSS)
                    })
            })
            .append_element_with(HtmlTag::Body, |body_tag| {
                body_tag.append_element_with(HtmlTag::Div, |container| {
                    container
                        .with_css_class("container mt-3")
                        .append_element_with(HtmlTag::H2, |h| h.append_text(title.as_str()))
                        .append_element(body)
                })
            }),
    );
    Html(builder.render_html())
}

// Error handling

#[derive(Debug)]
enum AppError {
    NotFound(String),
    BadRequest(String),
    InternalError(String),
}

impl From<dictform::Error> for AppError {
    fn from(e: dictform::Error) -> Self {
        match e {
            dictform::Error::DictionaryNotFound(_) => AppError::NotFound(e.to_string()),
            dictform::Error::InvalidParameters(_) => AppError::BadRequest(e.to_string()),
            other => AppError::InternalError(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InternalError(msg) => {
                tracing::error!("{}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(serde_json::json!({
            "error": message
        }))).into_response()
    }
}
