//! # Abuse and Rejection Tests
//!
//! Hostile and malformed traffic against a live gateway: foreign-domain
//! proofs, forged and truncated signatures, structural gaps, bad JSON,
//! and wrong HTTP verbs. Every rejection path must leave the store
//! untouched, and cryptographic failures must collapse to one generic
//! message that leaks nothing about which check failed.

#[cfg(test)]
mod tests {
    use crate::support::{TestGateway, TestWallet, EXPECTED_DOMAIN, PROOF_TIMESTAMP};

    /// The one message every proof failure renders as.
    const GENERIC_REJECTION: &str = "ton-proof verification failed";

    async fn error_message(response: reqwest::Response) -> String {
        let body: serde_json::Value = response.json().await.unwrap();
        body["error"].as_str().unwrap().to_owned()
    }

    #[tokio::test]
    async fn test_foreign_domain_rejected_naming_both_domains() {
        let gateway = TestGateway::spawn().await;
        let wallet = TestWallet::generate();

        // A proof legitimately signed for another site.
        let response = gateway.verify(&wallet.connect_request("evil.com")).await;
        assert_eq!(response.status(), 400);

        let message = error_message(response).await;
        assert!(message.contains(EXPECTED_DOMAIN), "message was: {message}");
        assert!(message.contains("evil.com"), "message was: {message}");

        assert_eq!(gateway.store.upsert_calls(), 0);
        assert_eq!(gateway.store.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_forged_signature_collapses_to_generic_message() {
        let gateway = TestGateway::spawn().await;
        let wallet = TestWallet::generate();

        // Claim a different wallet's key than the one that signed.
        let mut body = wallet.connect_request(EXPECTED_DOMAIN);
        body["publicKey"] =
            serde_json::json!(TestWallet::generate().public_key_hex());

        let response = gateway.verify(&body).await;
        assert_eq!(response.status(), 400);
        assert_eq!(error_message(response).await, GENERIC_REJECTION);
        assert_eq!(gateway.store.upsert_calls(), 0);
    }

    #[tokio::test]
    async fn test_truncated_signature_collapses_to_generic_message() {
        let gateway = TestGateway::spawn().await;
        let wallet = TestWallet::generate();

        let mut body = wallet.connect_request(EXPECTED_DOMAIN);
        let signature = body["proof"]["signature"].as_str().unwrap();
        body["proof"]["signature"] = serde_json::json!(&signature[..20]);

        let response = gateway.verify(&body).await;
        assert_eq!(response.status(), 400);
        assert_eq!(error_message(response).await, GENERIC_REJECTION);
    }

    #[tokio::test]
    async fn test_malformed_address_collapses_to_generic_message() {
        let gateway = TestGateway::spawn().await;
        let wallet = TestWallet::generate();

        let mut body = wallet.connect_request(EXPECTED_DOMAIN);
        body["address"] = serde_json::json!("not-an-address");

        let response = gateway.verify(&body).await;
        assert_eq!(response.status(), 400);
        assert_eq!(error_message(response).await, GENERIC_REJECTION);
        assert_eq!(gateway.store.upsert_calls(), 0);
    }

    #[tokio::test]
    async fn test_length_prefix_mismatch_collapses_to_generic_message() {
        let gateway = TestGateway::spawn().await;
        let wallet = TestWallet::generate();

        let mut body = wallet.connect_request(EXPECTED_DOMAIN);
        body["proof"]["domain"]["lengthBytes"] = serde_json::json!(7);

        let response = gateway.verify(&body).await;
        assert_eq!(response.status(), 400);
        assert_eq!(error_message(response).await, GENERIC_REJECTION);
    }

    #[tokio::test]
    async fn test_missing_field_named_in_error() {
        let gateway = TestGateway::spawn().await;
        let wallet = TestWallet::generate();

        let mut body = wallet.connect_request(EXPECTED_DOMAIN);
        body.as_object_mut().unwrap().remove("publicKey");

        let response = gateway.verify(&body).await;
        assert_eq!(response.status(), 400);
        let message = error_message(response).await;
        assert!(message.contains("publicKey"), "message was: {message}");
    }

    #[tokio::test]
    async fn test_missing_nested_field_named_in_error() {
        let gateway = TestGateway::spawn().await;
        let wallet = TestWallet::generate();

        let mut body = wallet.connect_request(EXPECTED_DOMAIN);
        body["proof"]
            .as_object_mut()
            .unwrap()
            .remove("signature");

        let response = gateway.verify(&body).await;
        assert_eq!(response.status(), 400);
        let message = error_message(response).await;
        assert!(message.contains("proof.signature"), "message was: {message}");
    }

    #[tokio::test]
    async fn test_unparseable_json_rejected() {
        let gateway = TestGateway::spawn().await;

        let response = gateway
            .http
            .post(format!("{}/ton-connect/verify", gateway.base_url))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        let message = error_message(response).await;
        assert!(message.starts_with("invalid JSON body"), "message was: {message}");
    }

    #[tokio::test]
    async fn test_wrong_verb_gets_json_405() {
        let gateway = TestGateway::spawn().await;

        let response = gateway
            .http
            .get(format!("{}/ton-connect/verify", gateway.base_url))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 405);
        assert_eq!(error_message(response).await, "Method not allowed");
    }

    #[tokio::test]
    async fn test_replayed_proof_for_other_gateway_domain_rejected() {
        // A proof captured from our gateway must not verify on a gateway
        // serving a different manifest host.
        let other = TestGateway::spawn_with_domain("other.app").await;
        let wallet = TestWallet::generate();

        let response = other.verify(&wallet.connect_request(EXPECTED_DOMAIN)).await;
        assert_eq!(response.status(), 400);

        let message = error_message(response).await;
        assert!(message.contains("other.app"), "message was: {message}");
        assert_eq!(other.store.upsert_calls(), 0);
    }

    #[tokio::test]
    async fn test_tampered_payload_invalidates_signature() {
        let gateway = TestGateway::spawn().await;
        let wallet = TestWallet::generate();

        let signed = wallet.connect_request_with(
            EXPECTED_DOMAIN,
            b"original-challenge",
            PROOF_TIMESTAMP,
        );
        let tampered = wallet.connect_request_with(
            EXPECTED_DOMAIN,
            b"swapped-challenge!",
            PROOF_TIMESTAMP,
        );

        // Splice the tampered payload under the original signature.
        let mut body = signed;
        body["proof"]["payload"] = tampered["proof"]["payload"].clone();

        let response = gateway.verify(&body).await;
        assert_eq!(response.status(), 400);
        assert_eq!(error_message(response).await, GENERIC_REJECTION);
    }
}
