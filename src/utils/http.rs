use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lets a service worker served from any path claim the whole origin.
pub const SERVICE_WORKER_ALLOWED: HeaderName = HeaderName::from_static("service-worker-allowed");

pub fn service_worker_scope() -> HeaderValue {
    HeaderValue::from_static("/")
}

/// Point `GET /` at `/index.html`. Anything else, including `/?query`,
/// passes through untouched.
pub async fn rewrite_root(mut req: Request) -> Request {
    let is_root = req
        .uri()
        .path_and_query()
        .is_some_and(|target| target.as_str() == "/");

    if req.method() == Method::GET && is_root {
        *req.uri_mut() = Uri::from_static("/index.html");
    }
    req
}

/// Map a request path onto `root`. Returns `None` for anything that would
/// leave the root or does not decode.
pub fn resolve_under(root: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(request_path).ok()?;
    let mut path = root.to_path_buf();

    for segment in decoded.split('/').filter(|s| !s.is_empty() && *s != ".") {
        if segment == ".." || segment.contains('\\') {
            return None;
        }
        path.push(segment);
    }
    Some(path)
}

/// HTML index of a directory under `root`, or 404 when the request does not
/// name one. Only reached once the static files have missed.
pub async fn list_directory(root: &Path, uri: &Uri) -> Response {
    let request_path = uri.path();
    let Some(dir) = resolve_under(root, request_path) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let is_dir = tokio::fs::metadata(&dir)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);
    if !request_path.ends_with('/') || !is_dir {
        return StatusCode::NOT_FOUND.into_response();
    }

    match read_entries(&dir).await {
        Ok(entries) => {
            debug!("Listing {}", dir.display());
            Html(render_listing(request_path, &entries)).into_response()
        }
        Err(e) => {
            debug!("Cannot list {}: {}", dir.display(), e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Entry names, directories suffixed with `/`, sorted case-insensitively.
async fn read_entries(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut reader = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await?.is_dir() {
            name.push('/');
        }
        entries.push(name);
    }

    entries.sort_by_key(|name| name.to_lowercase());
    Ok(entries)
}

fn render_listing(request_path: &str, entries: &[String]) -> String {
    let display_path = urlencoding::decode(request_path)
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| request_path.to_string());
    let title = format!("Directory listing for {}", escape_html(&display_path));

    let items: String = entries
        .iter()
        .map(|name| {
            format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                urlencoding::encode(name).replace("%2F", "/"),
                escape_html(name)
            )
        })
        .collect();

    format!(
        "<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n{items}</ul>\n<hr>\n</body>\n</html>\n"
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use std::fs;
    use tempfile::TempDir;

    fn request(method: Method, uri: &str) -> Request {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn get_root_becomes_index_html() {
        let req = rewrite_root(request(Method::GET, "/")).await;
        assert_eq!(req.uri(), "/index.html");
    }

    #[tokio::test]
    async fn root_with_query_is_left_alone() {
        let req = rewrite_root(request(Method::GET, "/?x=1")).await;
        assert_eq!(req.uri(), "/?x=1");
    }

    #[tokio::test]
    async fn head_root_is_left_alone() {
        let req = rewrite_root(request(Method::HEAD, "/")).await;
        assert_eq!(req.uri(), "/");
    }

    #[tokio::test]
    async fn other_paths_are_left_alone() {
        let req = rewrite_root(request(Method::GET, "/manifest.json")).await;
        assert_eq!(req.uri(), "/manifest.json");
    }

    #[test]
    fn resolve_under_rejects_parent_segments() {
        let root = Path::new("/srv/site");
        assert_eq!(
            resolve_under(root, "/blog/my%20post/"),
            Some(PathBuf::from("/srv/site/blog/my post"))
        );
        assert_eq!(resolve_under(root, "/blog/../../etc/"), None);
        assert_eq!(resolve_under(root, "/%2e%2e/etc/"), None);
    }

    #[tokio::test]
    async fn listing_links_every_entry() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("blog/drafts")).unwrap();
        fs::write(temp.path().join("blog/Zebra.html"), "z").unwrap();
        fs::write(temp.path().join("blog/a <b>.html"), "a").unwrap();

        let uri = Uri::from_static("/blog/");
        let response = list_directory(temp.path(), &uri).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("<title>Directory listing for /blog/</title>"));
        assert!(html.contains("<a href=\"drafts/\">drafts/</a>"));
        assert!(html.contains("<a href=\"a%20%3Cb%3E.html\">a &lt;b&gt;.html</a>"));
        let a = html.find("a &lt;b&gt;").unwrap();
        let drafts = html.find(">drafts/<").unwrap();
        let zebra = html.find(">Zebra.html<").unwrap();
        assert!(a < drafts && drafts < zebra);
    }

    #[tokio::test]
    async fn listing_missing_directory_is_not_found() {
        let temp = TempDir::new().unwrap();
        let response = list_directory(temp.path(), &Uri::from_static("/nope/")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn listing_a_file_path_is_not_found() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("sw.js"), "").unwrap();
        let response = list_directory(temp.path(), &Uri::from_static("/sw.js")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
