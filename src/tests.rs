#[cfg(test)]
mod integration_tests {
    use crate::cli::commands::render;
    use crate::schemas::{ErrorResponse, HealthResponse};
    use crate::test_utils::test_utils::{
        ProviderReply, load_history, setup_test_app, setup_test_app_with_url, spawn_provider,
        test_settings, unreachable_provider,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use common::{ApiResponse, Color, HeatmapGrid};
    use serde_json::json;
    use std::time::Duration;

    fn week_samples() -> serde_json::Value {
        json!([
            {"hour": 9, "day": 1, "value": 5},
            {"hour": 9, "day": 2, "value": 45},
            {"hour": 10, "day": 6, "value": 75},
            {"hour": 10, "day": 8, "value": 99}
        ])
    }

    fn decode_png(bytes: &[u8]) -> image::RgbImage {
        image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
            .expect("Response is not a PNG")
            .to_rgb8()
    }

    /// Number of pixels that are not white inside `x` by `y`.
    fn ink(image: &image::RgbImage, x: std::ops::Range<u32>, y: std::ops::Range<u32>) -> usize {
        y.flat_map(|py| x.clone().map(move |px| (px, py)))
            .filter(|&(px, py)| image.get_pixel(px, py).0 != [255, 255, 255])
            .count()
    }

    async fn expect_error(reply: ProviderReply, status: StatusCode, code: &str) {
        let app = setup_test_app(reply).await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/oktyabrskiy").await;

        response.assert_status(status);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, code);
    }

    #[tokio::test]
    async fn test_index_page() {
        let app = setup_test_app(ProviderReply::Status(StatusCode::NOT_FOUND)).await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/").await;

        response.assert_status(StatusCode::OK);
        assert!(response.text().contains("href='/oktyabrskiy'"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app(ProviderReply::Status(StatusCode::NOT_FOUND)).await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.renderer, "pixel");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_heatmap_png() {
        let app = setup_test_app(ProviderReply::Json(load_history(week_samples()))).await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/oktyabrskiy").await;

        response.assert_status(StatusCode::OK);
        assert_eq!(
            response.header("content-type").to_str().unwrap(),
            "image/png"
        );

        // Two hour rows; the day 8 sample adds nothing
        let image = decode_png(response.as_bytes().as_ref());
        assert_eq!(image.dimensions(), (680, 50 + 2 * 30 + 20));

        // Monday 9:00 holds 5, Tuesday 9:00 holds 45, Saturday 10:00 holds 75
        let cell = |row: u32, column: u32| image.get_pixel(100 + column * 80 + 40, 50 + row * 30 + 15).0;
        assert_eq!(cell(0, 0), Color::rgb(0xFF, 0xE9, 0xD3).to_array());
        assert_eq!(cell(0, 1), Color::rgb(0xE8, 0xB7, 0xA2).to_array());
        assert_eq!(cell(1, 5), Color::rgb(0xCA, 0x45, 0x32).to_array());
        assert_eq!(cell(1, 0), Color::WHITE.to_array());
    }

    #[tokio::test]
    async fn test_default_heatmap_has_title_and_labels() {
        let app = setup_test_app(ProviderReply::Json(load_history(week_samples()))).await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/oktyabrskiy").await;

        response.assert_status(StatusCode::OK);
        let image = decode_png(response.as_bytes().as_ref());

        assert!(ink(&image, 0..680, 0..24) > 0, "title missing");
        for column in 0..7 {
            let left = 100 + column * 80;
            assert!(ink(&image, left..left + 80, 28..50) > 0, "no day label over column {}", column);
        }
        for row in 0..2 {
            let top = 50 + row * 30;
            assert!(ink(&image, 0..100, top..top + 30) > 0, "no hour label on row {}", row);
        }
    }

    #[tokio::test]
    async fn test_heatmap_with_chart_renderer() {
        let app = setup_test_app(ProviderReply::Json(load_history(week_samples()))).await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/oktyabrskiy")
            .add_query_param("renderer", "chart")
            .await;

        response.assert_status(StatusCode::OK);
        let image = decode_png(response.as_bytes().as_ref());
        assert_eq!(image.dimensions(), (1000, 600));
    }

    #[tokio::test]
    async fn test_unknown_renderer_is_rejected() {
        let app = setup_test_app(ProviderReply::Json(load_history(week_samples()))).await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/oktyabrskiy")
            .add_query_param("renderer", "seaborn")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_load_history_is_not_found() {
        expect_error(
            ProviderReply::Json(load_history(json!([]))),
            StatusCode::NOT_FOUND,
            "NO_LOAD_DATA",
        )
        .await;
    }

    #[tokio::test]
    async fn test_null_load_history_is_not_found() {
        expect_error(
            ProviderReply::Json(load_history(serde_json::Value::Null)),
            StatusCode::NOT_FOUND,
            "NO_LOAD_DATA",
        )
        .await;
    }

    #[tokio::test]
    async fn test_only_unrecognized_days_is_not_found() {
        expect_error(
            ProviderReply::Json(load_history(json!([
                {"hour": 9, "day": 0, "value": 5},
                {"hour": 10, "day": 8, "value": 50}
            ]))),
            StatusCode::NOT_FOUND,
            "NO_LOAD_DATA",
        )
        .await;
    }

    #[tokio::test]
    async fn test_missing_load_history_is_internal_error() {
        expect_error(
            ProviderReply::Json(json!({"data": {"name": "Test branch"}})),
            StatusCode::INTERNAL_SERVER_ERROR,
            "INVALID_UPSTREAM_DATA",
        )
        .await;
    }

    #[tokio::test]
    async fn test_non_json_body_is_internal_error() {
        expect_error(
            ProviderReply::Body("<html>maintenance</html>"),
            StatusCode::INTERNAL_SERVER_ERROR,
            "INVALID_UPSTREAM_DATA",
        )
        .await;
    }

    #[tokio::test]
    async fn test_provider_error_status_is_bad_gateway() {
        expect_error(
            ProviderReply::Status(StatusCode::SERVICE_UNAVAILABLE),
            StatusCode::BAD_GATEWAY,
            "UPSTREAM_ERROR",
        )
        .await;
    }

    #[tokio::test]
    async fn test_provider_not_found_is_bad_gateway() {
        expect_error(
            ProviderReply::Status(StatusCode::NOT_FOUND),
            StatusCode::BAD_GATEWAY,
            "UPSTREAM_ERROR",
        )
        .await;
    }

    #[tokio::test]
    async fn test_provider_timeout_is_bad_gateway() {
        expect_error(
            ProviderReply::Delayed(Duration::from_secs(3), load_history(week_samples())),
            StatusCode::BAD_GATEWAY,
            "UPSTREAM_ERROR",
        )
        .await;
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_bad_gateway() {
        let app = setup_test_app_with_url(&unreachable_provider().await);
        let server = TestServer::new(app).unwrap();

        let response = server.get("/oktyabrskiy").await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "UPSTREAM_ERROR");
    }

    #[tokio::test]
    async fn test_branch_grid_json() {
        let app = setup_test_app(ProviderReply::Json(load_history(week_samples()))).await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/branches/oktyabrskiy/grid").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<HeatmapGrid> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Load grid retrieved successfully");

        let grid = body.data;
        assert_eq!(grid.columns, vec!["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"]);
        assert_eq!(grid.rows.len(), 2);

        assert_eq!(grid.rows[0].hour, 9);
        assert_eq!(grid.rows[0].label, "9:00-10:00");
        assert_eq!(grid.rows[0].values, vec![5.0, 45.0, 0.0, 0.0, 0.0, 0.0, 0.0]);

        assert_eq!(grid.rows[1].label, "10:00-11:00");
        assert_eq!(grid.rows[1].values, vec![0.0, 0.0, 0.0, 0.0, 0.0, 75.0, 0.0]);
        assert_eq!(grid.rows[1].colors[5], Color::rgb(0xCA, 0x45, 0x32));
        assert_eq!(grid.rows[1].colors[6], Color::WHITE);
    }

    #[tokio::test]
    async fn test_branch_grid_empty_is_not_found() {
        let app = setup_test_app(ProviderReply::Json(load_history(json!([])))).await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/branches/oktyabrskiy/grid").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_overlong_slug_is_rejected() {
        let app = setup_test_app(ProviderReply::Json(load_history(week_samples()))).await;
        let server = TestServer::new(app).unwrap();

        let slug = "a".repeat(200);
        let response = server.get(&format!("/{}", slug)).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let app = setup_test_app(ProviderReply::Status(StatusCode::NOT_FOUND)).await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status(StatusCode::OK);
        let document: serde_json::Value = response.json();
        assert!(document["paths"]["/{slug}"].is_object());
        assert!(document["paths"]["/api/v1/branches/{slug}/grid"].is_object());
    }

    #[tokio::test]
    async fn test_render_command_writes_png() {
        let provider_url =
            spawn_provider(ProviderReply::Json(load_history(week_samples()))).await;
        let output = std::env::temp_dir().join(format!("loadmap-{}.png", std::process::id()));

        render("oktyabrskiy", &output, &test_settings(&provider_url))
            .await
            .expect("render command failed");

        let bytes = std::fs::read(&output).expect("output file missing");
        std::fs::remove_file(&output).ok();
        assert_eq!(decode_png(&bytes).dimensions(), (680, 110));
    }

    #[tokio::test]
    async fn test_render_command_reports_empty_history() {
        let provider_url = spawn_provider(ProviderReply::Json(load_history(json!([])))).await;
        let output = std::env::temp_dir().join(format!("loadmap-empty-{}.png", std::process::id()));

        let result = render("oktyabrskiy", &output, &test_settings(&provider_url)).await;

        assert!(result.is_err());
        assert!(!output.exists());
    }
}
