//! Citation Routes
//!
//! Endpoints:
//! - POST /api/v1/citations/manual - Parse manually color-tagged text
//! - POST /api/v1/citations/layout - Extract from a PDF.js page dump
//! - POST /api/v1/citations/pdf - Extract from an uploaded PDF (multipart)
//!
//! Every run resets the previous export and answers with a [`RunOutput`].

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use crate::abnt::ReferenceFields;
use crate::citation::CitationIndex;
use crate::document::{DumpedPage, PageDump};
use crate::error::Result;
use crate::pdf::PdfDocument;
use crate::pipeline::{extract_document, extract_manual, ExtractError, RunOutput};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualRequest {
    pub text: String,
    #[serde(default)]
    pub reference: ReferenceFields,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    #[serde(default)]
    pub pages: Vec<DumpedPage>,
    #[serde(default)]
    pub reference: ReferenceFields,
    /// OCR language for this run
    pub language: Option<String>,
}

/// Create the citations router
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/manual", post(extract_from_text))
        .route("/layout", post(extract_from_layout))
        .route("/pdf", post(extract_from_pdf))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// Format the run and keep its export for download
async fn finish_run(state: &AppState, index: CitationIndex, fields: &ReferenceFields) -> RunOutput {
    let mut session = state.session().write().await;
    let output = RunOutput::new(index, fields, session.labels());
    session.record_export(output.export.clone());
    output
}

/// POST /api/v1/citations/manual
async fn extract_from_text(
    State(state): State<AppState>,
    Json(request): Json<ManualRequest>,
) -> Result<Json<RunOutput>> {
    let index = extract_manual(&request.text)?;

    state.session().write().await.begin_run();
    Ok(Json(finish_run(&state, index, &request.reference).await))
}

/// POST /api/v1/citations/layout
async fn extract_from_layout(
    State(state): State<AppState>,
    Json(request): Json<LayoutRequest>,
) -> Result<Json<RunOutput>> {
    if request.pages.is_empty() {
        return Err(ExtractError::SourceUnavailable.into());
    }

    state.session().write().await.begin_run();

    let dump = PageDump::new(request.pages);
    let config = state.config().pipeline_config(request.language);
    let index = extract_document(&dump, state.ocr(), &config).await?;

    Ok(Json(finish_run(&state, index, &request.reference).await))
}

/// POST /api/v1/citations/pdf
///
/// Multipart fields: `file` (PDF bytes), optional `reference` (JSON object),
/// optional `language`.
async fn extract_from_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RunOutput>> {
    let mut file: Option<Vec<u8>> = None;
    let mut fields = ReferenceFields::default();
    let mut language = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" | "pdf" => {
                let filename = field.file_name().map(|s| s.to_string());
                let data = field.bytes().await?;
                tracing::debug!("Read {} bytes of file data ({:?})", data.len(), filename);
                if !data.is_empty() {
                    file = Some(data.to_vec());
                }
            }
            "reference" => {
                let text = field.text().await?;
                if !text.trim().is_empty() {
                    fields = serde_json::from_str(&text)?;
                }
            }
            "language" => language = Some(field.text().await?),
            other => tracing::debug!("Ignoring multipart field '{}'", other),
        }
    }

    let data = file.ok_or(ExtractError::SourceUnavailable)?;

    state.session().write().await.begin_run();

    let doc = PdfDocument::load(data).await.map_err(ExtractError::from)?;
    let config = state.config().pipeline_config(language);
    let index = extract_document(&doc, state.ocr(), &config).await?;

    Ok(Json(finish_run(&state, index, &fields).await))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::json;

    use super::super::test_support::*;
    use crate::abnt::EMPTY_RESULT_MESSAGE;
    use crate::pdf::build_pdf;
    use crate::routes::router;
    use crate::state::test_state;

    fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let boundary = "fichamento-test-boundary";
        let mut body = Vec::new();
        for (name, filename, data) in parts {
            body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
            match filename {
                Some(filename) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: application/pdf\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                ),
            }
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

        Request::builder()
            .method(Method::POST)
            .uri("/api/v1/citations/pdf")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_manual_run() {
        let request = json_request(
            Method::POST,
            "/api/v1/citations/manual",
            json!({
                "text": "[verde|p=3]conceito chave[/end]",
                "reference": {"surname": "Silva", "title": "Obra", "year": "2020"}
            }),
        );

        let (status, body) = send(router(test_state()), request).await;
        assert_eq!(status, StatusCode::OK);

        let json = json_body(&body);
        assert_eq!(
            json["citations"]["green"],
            json!([{"page": 3, "text": "conceito chave"}])
        );
        assert_eq!(json["totalQuotes"], 1);
        assert_eq!(json["reference"], "SILVA. *Obra*. 2020.");
        assert!(json["message"].is_null());
    }

    #[tokio::test]
    async fn test_blank_manual_text_is_rejected() {
        let request = json_request(Method::POST, "/api/v1/citations/manual", json!({"text": "   "}));
        let (status, body) = send(router(test_state()), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json_body(&body)["error"], "empty_input");
    }

    #[tokio::test]
    async fn test_layout_run() {
        let request = json_request(
            Method::POST,
            "/api/v1/citations/layout",
            json!({
                "pages": [{
                    "items": [
                        {"str": "A highlighted line of text", "transform": [12, 0, 0, 12, 72, 700], "width": 180},
                        {"str": "and an ordinary line that keeps the text layer long enough", "transform": [12, 0, 0, 12, 72, 650]}
                    ],
                    "annotations": [{
                        "annotationType": 9,
                        "color": [120, 200, 100],
                        "quadPoints": [72, 712, 252, 712, 72, 700, 252, 700]
                    }]
                }]
            }),
        );

        let (status, body) = send(router(test_state()), request).await;
        assert_eq!(status, StatusCode::OK);

        let json = json_body(&body);
        assert_eq!(
            json["citations"]["green"],
            json!([{"page": 1, "text": "A highlighted line of text"}])
        );
    }

    #[tokio::test]
    async fn test_layout_without_pages_is_source_unavailable() {
        let request = json_request(Method::POST, "/api/v1/citations/layout", json!({}));
        let (status, body) = send(router(test_state()), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json_body(&body)["error"], "source_unavailable");
    }

    #[tokio::test]
    async fn test_pdf_upload() {
        let pdf = build_pdf(&[(
            vec![("Texto destacado em amarelo", 700), ("Linha comum sem destaque alguem", 650)],
            vec![([1.0, 1.0, 0.0], [72.0, 240.0, 700.0, 712.0])],
        )]);
        let request = multipart_request(&[
            ("file", Some("artigo.pdf"), pdf.as_slice()),
            ("reference", None, &br#"{"surname": "Lima", "year": "2019"}"#[..]),
        ]);

        let (status, body) = send(router(test_state()), request).await;
        assert_eq!(status, StatusCode::OK);

        let json = json_body(&body);
        assert_eq!(
            json["citations"]["yellow"],
            json!([{"page": 1, "text": "Texto destacado em amarelo"}])
        );
        assert!(json["export"]
            .as_str()
            .unwrap()
            .contains("Texto destacado em amarelo (LIMA, 2019, p. 1)."));
    }

    #[tokio::test]
    async fn test_pdf_without_highlights_reports_empty_result() {
        let pdf = build_pdf(&[(
            vec![("Uma pagina com texto suficiente para nao ser digitalizada", 700)],
            vec![],
        )]);
        let request = multipart_request(&[("file", Some("vazio.pdf"), pdf.as_slice())]);

        let (status, body) = send(router(test_state()), request).await;
        assert_eq!(status, StatusCode::OK);

        let json = json_body(&body);
        assert_eq!(json["totalQuotes"], 0);
        assert_eq!(json["message"], EMPTY_RESULT_MESSAGE);
    }

    #[tokio::test]
    async fn test_upload_without_file() {
        let request = multipart_request(&[("language", None, &b"eng"[..])]);
        let (status, body) = send(router(test_state()), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json_body(&body)["error"], "source_unavailable");
    }

    #[tokio::test]
    async fn test_corrupted_upload() {
        let request = multipart_request(&[("file", Some("broken.pdf"), &b"not a pdf at all"[..])]);
        let (status, body) = send(router(test_state()), request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(&body)["error"], "unreadable_document");
    }
}
