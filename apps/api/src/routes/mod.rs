pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::evaluation::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Upload form
        .route(
            "/",
            get(handlers::handle_index).post(handlers::handle_form_submit),
        )
        // JSON API
        .route("/api/v1/evaluations", post(handlers::handle_evaluate))
        .fallback(not_found)
        // Resume uploads are not size-capped
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::controller::tests::{MockModel, MockRasterizer};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "screener-test-boundary";
    const PDF: &[u8] = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\n%%EOF\n";

    struct Part<'a> {
        name: &'a str,
        file_name: Option<&'a str>,
        data: &'a [u8],
    }

    fn text(name: &'static str, value: &'static str) -> Part<'static> {
        Part {
            name,
            file_name: None,
            data: value.as_bytes(),
        }
    }

    fn resume(data: &'static [u8]) -> Part<'static> {
        Part {
            name: "resume",
            file_name: Some("resume.pdf"),
            data,
        }
    }

    fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part.file_name {
                Some(file_name) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{file_name}\"\r\nContent-Type: application/pdf\r\n\r\n",
                        part.name
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                        .as_bytes(),
                ),
            }
            body.extend_from_slice(part.data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn post(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    fn app(rasterizer: Arc<MockRasterizer>, model: Arc<MockModel>) -> Router {
        build_router(AppState {
            rasterizer,
            model,
        })
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_index_serves_form() {
        let app = app(
            Arc::new(MockRasterizer::ok()),
            Arc::new(MockModel::replying("unused")),
        );
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Application Tracking System with Gemini Pro Vision"));
        assert!(html.contains("value=\"evaluate\""));
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(
            Arc::new(MockRasterizer::ok()),
            Arc::new(MockModel::replying("unused")),
        );
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "resume-screener");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let app = app(
            Arc::new(MockRasterizer::ok()),
            Arc::new(MockModel::replying("unused")),
        );
        let response = app
            .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_api_percentage_match() {
        let rasterizer = Arc::new(MockRasterizer::ok());
        let model = Arc::new(MockModel::replying("82%\nMissing: Terraform"));
        let response = app(rasterizer.clone(), model.clone())
            .oneshot(post(
                "/api/v1/evaluations",
                &[
                    text("job_description", "Senior Go backend engineer, 5 years, Kubernetes"),
                    resume(PDF),
                    text("action", "match"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["action"], "match");
        assert_eq!(json["heading"], "ATS Percentage Match:");
        assert_eq!(json["response"], "82%\nMissing: Terraform");
        assert_eq!(rasterizer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_api_empty_file_part_counts_as_missing_document() {
        let rasterizer = Arc::new(MockRasterizer::ok());
        let model = Arc::new(MockModel::replying("unused"));
        let response = app(rasterizer.clone(), model.clone())
            .oneshot(post(
                "/api/v1/evaluations",
                &[
                    text("job_description", "Rust engineer"),
                    resume(b""),
                    text("action", "evaluate"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["status"], "warning");
        assert_eq!(json["message"], "Please upload a resume PDF file.");
        assert_eq!(rasterizer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_api_rasterization_failure_skips_model() {
        let rasterizer = Arc::new(MockRasterizer::failing());
        let model = Arc::new(MockModel::replying("unused"));
        let response = app(rasterizer.clone(), model.clone())
            .oneshot(post(
                "/api/v1/evaluations",
                &[
                    text("job_description", "Rust engineer"),
                    resume(PDF),
                    text("action", "improve"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["status"], "error");
        assert!(json["message"]
            .as_str()
            .unwrap()
            .starts_with("Error converting PDF."));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_api_model_failure_is_bad_gateway() {
        let model = Arc::new(MockModel::failing(403));
        let response = app(Arc::new(MockRasterizer::ok()), model.clone())
            .oneshot(post(
                "/api/v1/evaluations",
                &[
                    text("job_description", "Rust engineer"),
                    resume(PDF),
                    text("action", "evaluate"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["status"], "error");
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_api_without_action_is_rejected() {
        let response = app(
            Arc::new(MockRasterizer::ok()),
            Arc::new(MockModel::replying("unused")),
        )
        .oneshot(post(
            "/api/v1/evaluations",
            &[text("job_description", "Rust engineer"), resume(PDF)],
        ))
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_form_submit_renders_warning_and_keeps_upload_notice() {
        let model = Arc::new(MockModel::replying("unused"));
        let response = app(Arc::new(MockRasterizer::ok()), model.clone())
            .oneshot(post(
                "/",
                &[
                    text("job_description", ""),
                    resume(PDF),
                    text("action", "evaluate"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Resume Uploaded Successfully!"));
        assert!(html.contains("Please paste a Job Description before submitting."));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_form_submit_renders_result_under_heading() {
        let response = app(
            Arc::new(MockRasterizer::ok()),
            Arc::new(MockModel::replying("Strong Go background; light on Kubernetes.")),
        )
        .oneshot(post(
            "/",
            &[
                text("job_description", "Senior Go backend engineer"),
                resume(PDF),
                text("action", "evaluate"),
            ],
        ))
        .await
        .unwrap();

        let html = body_string(response).await;
        assert!(html.contains("<h2>The HR Review is:</h2>"));
        assert!(html.contains("Strong Go background; light on Kubernetes."));
        assert!(html.contains(">Senior Go backend engineer</textarea>"));
    }
}
