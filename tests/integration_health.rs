mod common;

use reqwest::Client;

use counters::server::CountersServer;

use common::seeded_repository;

#[tokio::test]
async fn test_health_integration() {
    let mut server = CountersServer::new(seeded_repository());

    // Bind before spawning so the port is known and free of races.
    let addr = server.try_bind("127.0.0.1", 0).await.expect("Failed to bind");
    let handle = server.handle();
    let task = tokio::spawn(server.run());

    let client = Client::new();
    let resp = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);

    let body = resp.text().await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "counters");

    drop(client);
    handle.shutdown();
    let result = tokio::time::timeout(std::time::Duration::from_secs(5), task)
        .await
        .expect("server stops after shutdown")
        .expect("server task");
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_counters_over_http() {
    let mut server = CountersServer::new(seeded_repository());
    let addr = server.try_bind("127.0.0.1", 0).await.expect("Failed to bind");
    let handle = server.handle();
    tokio::spawn(server.run());

    let client = Client::new();
    let resp = client
        .post(format!("http://{}/api/v1/counters/1/increment", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let counter: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(counter["count"], 4);

    let resp = client
        .get(format!("http://{}/api/v1/counters?q=coffee", addr))
        .send()
        .await
        .unwrap();
    let list: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(list[0]["count"], 4);

    handle.shutdown();
}

#[tokio::test]
async fn test_run_without_bind_fails() {
    let server = CountersServer::new(seeded_repository());
    assert!(matches!(
        server.run().await,
        Err(counters::server::ServerError::NotBound)
    ));
}

#[tokio::test]
async fn test_bind_rejects_invalid_host() {
    let mut server = CountersServer::new(seeded_repository());
    assert!(matches!(
        server.try_bind("not a host", 0).await,
        Err(counters::server::ServerError::InvalidAddress { .. })
    ));
}
