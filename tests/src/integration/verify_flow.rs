//! # Verification Flow Tests
//!
//! Happy-path flows over a live gateway on an ephemeral port: session
//! issuance, repeat verification, challenge round-trip, client metadata
//! capture, and the health probe. Every test drives the real router over
//! HTTP and asserts both the response and the resulting store state.

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    use crate::support::{
        TestGateway, TestWallet, EXPECTED_DOMAIN, PROOF_TIMESTAMP, SESSION_TTL_SECS,
    };

    #[tokio::test]
    async fn test_valid_proof_returns_authorization() {
        let gateway = TestGateway::spawn().await;
        let wallet = TestWallet::generate();

        let before = Utc::now();
        let response = gateway.verify(&wallet.connect_request(EXPECTED_DOMAIN)).await;
        assert_eq!(response.status(), 200);

        let body: serde_json::Value = response.json().await.unwrap();
        let token = body["sessionToken"].as_str().unwrap();
        assert_eq!(token.len(), 43);
        assert!(body["connectionId"]
            .as_str()
            .unwrap()
            .parse::<Uuid>()
            .is_ok());

        let expires_at: DateTime<Utc> = body["expiresAt"].as_str().unwrap().parse().unwrap();
        let ttl = (expires_at - before).num_seconds();
        let window = SESSION_TTL_SECS as i64;
        assert!((window - 5..=window + 5).contains(&ttl), "ttl was {ttl}");

        assert_eq!(gateway.store.connection_count(), 1);
        assert_eq!(gateway.store.session_count(), 1);
    }

    #[tokio::test]
    async fn test_repeat_verification_reuses_connection() {
        let gateway = TestGateway::spawn().await;
        let wallet = TestWallet::generate();

        let first: serde_json::Value = gateway
            .verify(&wallet.connect_request(EXPECTED_DOMAIN))
            .await
            .json()
            .await
            .unwrap();
        let second: serde_json::Value = gateway
            .verify(&wallet.connect_request(EXPECTED_DOMAIN))
            .await
            .json()
            .await
            .unwrap();

        assert_eq!(first["connectionId"], second["connectionId"]);
        assert_ne!(first["sessionToken"], second["sessionToken"]);
        assert_eq!(gateway.store.connection_count(), 1);
        assert_eq!(gateway.store.session_count(), 2);
    }

    #[tokio::test]
    async fn test_forwarded_client_meta_recorded() {
        let gateway = TestGateway::spawn().await;
        let wallet = TestWallet::generate();

        let response = gateway
            .http
            .post(format!("{}/ton-connect/verify", gateway.base_url))
            .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
            .header("user-agent", "wallet/2.3")
            .json(&wallet.connect_request(EXPECTED_DOMAIN))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let session = gateway.store.last_session().unwrap();
        assert_eq!(session.ip.as_deref(), Some("203.0.113.9"));
        assert_eq!(session.user_agent.as_deref(), Some("wallet/2.3"));
    }

    #[tokio::test]
    async fn test_issued_payload_round_trips_through_verification() {
        let gateway = TestGateway::spawn().await;
        let wallet = TestWallet::generate();

        let challenge: serde_json::Value = gateway
            .http
            .post(format!("{}/ton-connect/payload", gateway.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        // The verifier treats the payload as opaque bytes, so a proof
        // signed over the decoded challenge must verify.
        let payload = URL_SAFE_NO_PAD
            .decode(challenge["payload"].as_str().unwrap())
            .unwrap();
        assert_eq!(payload.len(), 16);

        let body = wallet.connect_request_with(EXPECTED_DOMAIN, &payload, PROOF_TIMESTAMP);
        assert_eq!(gateway.verify(&body).await.status(), 200);
    }

    #[tokio::test]
    async fn test_health_probe() {
        let gateway = TestGateway::spawn().await;

        let body: serde_json::Value = gateway
            .http
            .get(format!("{}/health", gateway.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "connect-gateway");
    }
}
