use std::{net::SocketAddr, sync::Arc, time::Duration};

use reqwest::{
    header::{HeaderMap, HeaderValue},
    redirect::Policy,
    Client,
};
use salvo::{listener::TcpListener, Server};
use tokio::net::TcpStream;
use url::Url;
use user_crud::{
    domain::service::UserService,
    infra::{router, service::user::InMemoryUserService, view::TemplateRenderer},
};

#[allow(dead_code)]
pub async fn spawn_app() -> Url {
    spawn_with(Arc::new(InMemoryUserService::new())).await
}

/// Serves the user routes over `service` on a port picked by the OS.
pub async fn spawn_with(service: Arc<dyn UserService>) -> Url {
    let views = Arc::new(TemplateRenderer::new().expect("Expect embedded templates to compile"));

    let listener =
        TcpListener::try_bind("127.0.0.1:0").expect("Expect to bind a local test port");
    let address = listener.local_addr();
    tokio::spawn(Server::new(listener).serve(router::app(service, views)));
    wait_until_listening(address).await;

    Url::parse(&format!("http://{address}")).unwrap()
}

async fn wait_until_listening(address: SocketAddr) {
    for _ in 0..100 {
        if TcpStream::connect(address).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("test server on {address} never accepted connections");
}

pub fn create_client() -> Client {
    let mut headers = HeaderMap::new();
    headers.append("accept", HeaderValue::from_static("text/html"));

    let connect_timeout = 1000 * 5; // 5 sec
    let timeout = 1000 * 10; // 10 sec

    reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(connect_timeout))
        .timeout(Duration::from_millis(timeout))
        .redirect(Policy::none())
        .default_headers(headers)
        .gzip(true)
        .build()
        .expect("Expect to create a http client")
}
