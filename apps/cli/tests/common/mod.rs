use axum::Router;
use tokio::net::TcpListener;

/// Binds the mock backend on a loopback port and returns the base URL to
/// point an `ApiClient` at.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock backend");
    });
    format!("http://{addr}")
}
