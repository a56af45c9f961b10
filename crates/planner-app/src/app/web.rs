use salvo::Router;
use salvo::serve_static::StaticDir;

/// ## Summary
/// Serves the frontend from `dir`, with `index.html` for directory requests.
#[must_use]
pub fn routes(dir: &str) -> Router {
    tracing::debug!(dir, "Serving static files");

    Router::with_path("{**path}").get(
        StaticDir::new([dir.to_string()])
            .defaults("index.html")
            .auto_list(false),
    )
}
