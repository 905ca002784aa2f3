use crate::config::cli::LocalStorage;
use crate::config::web::WebConfig;
use crate::config::ApiConfig;
use crate::core::export::COLUMNS;
use crate::core::pipeline::SearchPipeline;
use crate::core::places::PlacesClient;
use crate::domain::model::{Area, ListingRecord, Specialty};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::{FinderError, Result};
use axum::extract::{Form, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<ApiConfig>,
    pub options: Arc<WebConfig>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", post(search))
        .route("/download", get(download))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub area: String,
    pub specialty: String,
    pub max_results: usize,
}

/// One form submission as the pipeline sees it. Always enriches with
/// details: the web table shows phone and website columns.
struct WebSearchRequest {
    areas: Vec<Area>,
    specialties: Vec<Specialty>,
    max_results: usize,
    file_name: String,
}

impl ConfigProvider for WebSearchRequest {
    fn areas(&self) -> &[Area] {
        &self.areas
    }

    fn specialties(&self) -> &[Specialty] {
        &self.specialties
    }

    fn max_results(&self) -> usize {
        self.max_results
    }

    fn fetch_details(&self) -> bool {
        true
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }
}

async fn index() -> Html<String> {
    Html(render_page(&render_form()))
}

async fn search(State(state): State<AppState>, Form(form): Form<SearchForm>) -> Response {
    match run_search(&state, &form).await {
        Ok(records) => Html(render_page(&render_results(&records))).into_response(),
        Err(e) => {
            tracing::warn!("Search failed: {}", e);
            let status = match &e {
                FinderError::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                FinderError::Http(_) | FinderError::ApiStatus { .. } => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let body = render_page(&render_error(&e.user_friendly_message()));
            (status, Html(body)).into_response()
        }
    }
}

async fn run_search(state: &AppState, form: &SearchForm) -> Result<Vec<ListingRecord>> {
    let area: Area = form.area.parse()?;
    let specialties = if form.specialty.eq_ignore_ascii_case("any") {
        Vec::new()
    } else {
        vec![form.specialty.parse::<Specialty>()?]
    };
    let max_results = form.max_results.clamp(1, state.options.max_results_cap);

    let request = WebSearchRequest {
        areas: vec![area],
        specialties,
        max_results,
        file_name: state.options.file_name.clone(),
    };

    let storage = LocalStorage::new(state.options.output_path.clone());
    let client = PlacesClient::new(&state.api)?;
    let pipeline = SearchPipeline::new(storage, request, client);

    // Driven stage by stage instead of through the engine: the page needs
    // the normalized records, not just the output path.
    let raw = pipeline.extract().await?;
    let result = pipeline.transform(raw).await?;
    let records = result.records.clone();
    pipeline.load(result).await?;

    Ok(records)
}

async fn download(State(state): State<AppState>) -> Response {
    let storage = LocalStorage::new(state.options.output_path.clone());
    match storage.read_file(&state.options.file_name).await {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, XLSX_MIME.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", state.options.file_name),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(_) => {
            let body = render_page(&render_error("No spreadsheet has been generated yet"));
            (StatusCode::NOT_FOUND, Html(body)).into_response()
        }
    }
}

fn render_page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Search Doctors and Clinics in Pune</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2em; }}\n\
         table {{ border-collapse: collapse; }}\n\
         th, td {{ border: 1px solid #ccc; padding: 4px 8px; }}\n\
         .error {{ color: #b00; border: 1px solid #b00; padding: 1em; }}\n\
         </style>\n</head>\n<body>\n\
         <h1>Search Doctors and Clinics in Pune</h1>\n{}\n</body>\n</html>",
        body
    )
}

pub fn render_form() -> String {
    let mut area_options = String::new();
    for area in Area::ALL {
        area_options.push_str(&format!(
            "<option value=\"{}\">{}</option>",
            area.slug(),
            area.label()
        ));
    }

    let mut specialty_options = String::from("<option value=\"any\">Any</option>");
    for specialty in Specialty::ALL {
        specialty_options.push_str(&format!(
            "<option value=\"{}\">{}</option>",
            specialty.query_term(),
            specialty.title()
        ));
    }

    format!(
        "<form action=\"/search\" method=\"post\">\n\
         <label>Area <select name=\"area\">{}</select></label>\n\
         <label>Specialty <select name=\"specialty\">{}</select></label>\n\
         <label>Results per search <input type=\"number\" name=\"max_results\" \
         value=\"15\" min=\"1\" max=\"50\"></label>\n\
         <button type=\"submit\">Find Doctors</button>\n</form>",
        area_options, specialty_options
    )
}

fn render_results(records: &[ListingRecord]) -> String {
    let mut html = format!(
        "<p>Done. {} rows.</p>\n<p><a href=\"/download\">Download Excel</a></p>\n<table>\n<tr>",
        records.len()
    );
    for column in COLUMNS {
        html.push_str(&format!("<th>{}</th>", column));
    }
    html.push_str("</tr>\n");

    for record in records {
        html.push_str("<tr>");
        for value in [
            record.name.as_str(),
            record.address.as_str(),
            record.phone.as_str(),
            record.website.as_str(),
        ] {
            html.push_str(&format!("<td>{}</td>", escape_html(value)));
        }
        html.push_str(&format!(
            "<td>{}</td><td>{}</td><td>{}</td>",
            record.rating.map(|r| r.to_string()).unwrap_or_default(),
            record
                .review_count
                .map(|c| c.to_string())
                .unwrap_or_default(),
            escape_html(&record.specialty)
        ));
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
    html.push_str(&render_form());
    html
}

fn render_error(message: &str) -> String {
    format!(
        "<div class=\"error\">{}</div>\n{}",
        escape_html(message),
        render_form()
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
