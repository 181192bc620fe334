use axum::response::Html;

/// Landing page pointing at an example branch
#[utoipa::path(
    get,
    path = "/",
    tag = "heatmap",
    responses(
        (status = 200, description = "Informational HTML page", content_type = "text/html")
    )
)]
pub async fn index() -> Html<&'static str> {
    Html(
        "<h2>Пример: <a href='/oktyabrskiy'>/oktyabrskiy</a> — график загруженности филиала</h2>",
    )
}
