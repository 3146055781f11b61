use pwa_devtools::server;
use std::fs;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

async fn start(root: &TempDir) -> (String, oneshot::Sender<()>, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = oneshot::channel::<()>();
    let root = root.path().to_path_buf();

    let handle = tokio::spawn(async move {
        server::serve(listener, &root, async move {
            let _ = rx.await;
        })
        .await
        .unwrap();
    });

    (base, tx, handle)
}

#[tokio::test]
async fn test_root_and_index_share_a_body() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("index.html"), "<h1>quit smoking</h1>").unwrap();
    let (base, shutdown, handle) = start(&temp_dir).await;

    let root = reqwest::get(format!("{}/", base)).await.unwrap();
    assert_eq!(root.status(), 200);
    assert_eq!(root.headers()["service-worker-allowed"], "/");
    let root_body = root.text().await.unwrap();

    let index = reqwest::get(format!("{}/index.html", base)).await.unwrap();
    assert_eq!(index.headers()["service-worker-allowed"], "/");
    assert_eq!(index.text().await.unwrap(), root_body);

    shutdown.send(()).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_not_found_keeps_server_alive() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("sw.js"), "self.addEventListener('fetch', () => {});").unwrap();
    let (base, shutdown, handle) = start(&temp_dir).await;

    let missing = reqwest::get(format!("{}/nope.html", base)).await.unwrap();
    assert_eq!(missing.status(), 404);
    assert_eq!(missing.headers()["service-worker-allowed"], "/");

    let sw = reqwest::get(format!("{}/sw.js", base)).await.unwrap();
    assert_eq!(sw.status(), 200);
    assert!(sw.text().await.unwrap().contains("addEventListener"));

    shutdown.send(()).unwrap();
    handle.await.unwrap();
}
