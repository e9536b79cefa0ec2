use std::str::FromStr;
use std::sync::Arc;

use mockito::Matcher;
use rust_decimal::Decimal;
use tapyze_core::StatementFilter;
use tapyze_core::time::DEFAULT_ZONE;
use tapyze_wallet::{
    ClientContext, RecipientType, RefreshOutcome, StatementsModel, StaticToken, TransferRequest,
    WalletClient, WalletError,
};

const FEED: &str = r#"{
    "status": "success",
    "data": {
        "transactions": [
            {"_id": "t1", "type": "CREDIT", "amount": 1000, "description": "Wallet top-up", "createdAt": "2025-04-15T10:00:00.000Z"},
            {"_id": "t2", "type": "DEBIT", "amount": 300, "description": "Transfer to John", "createdAt": "2025-04-14T08:00:00.000Z"},
            {"_id": "t3", "type": "DEBIT", "amount": 200, "description": "ATM withdraw", "createdAt": "2025-03-30T18:00:00.000Z"}
        ],
        "pagination": {"currentPage": 1, "totalPages": 1, "totalTransactions": 3, "limit": 100}
    }
}"#;

fn client(url: String, token: &str) -> WalletClient {
    let ctx = ClientContext::new(url, Arc::new(StaticToken::new(token)));
    WalletClient::new(ctx).unwrap()
}

#[tokio::test]
async fn test_balance_sends_bearer_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/wallet/balance")
        .match_header("authorization", "Bearer tok-123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"success","data":{"balance":2580.75,"currency":"NPR"}}"#)
        .create_async()
        .await;

    let balance = client(server.url(), "tok-123").balance().await.unwrap();
    assert_eq!(balance.balance, Decimal::from_str("2580.75").unwrap());
    assert_eq!(balance.currency, "NPR");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_history_page_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/wallet/transactions")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
        ]))
        .with_status(200)
        .with_body(FEED)
        .create_async()
        .await;

    let page = client(server.url(), "tok").transactions(2, 10).await.unwrap();
    assert_eq!(page.transactions.len(), 3);
    assert!(!page.has_more());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_error_carries_backend_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/wallet/balance")
        .with_status(401)
        .with_body(r#"{"status":"fail","message":"Token expired"}"#)
        .create_async()
        .await;

    let err = client(server.url(), "tok").balance().await.unwrap_err();
    match err {
        WalletError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Token expired");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_http_error_without_json_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/wallet/balance")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let err = client(server.url(), "tok").balance().await.unwrap_err();
    assert!(matches!(err, WalletError::Api { status: 502, .. }));
}

#[tokio::test]
async fn test_missing_token_fails_before_request() {
    let server = mockito::Server::new_async().await;
    let err = client(server.url(), "").balance().await.unwrap_err();
    assert!(matches!(err, WalletError::MissingToken));
}

#[tokio::test]
async fn test_transfer_posts_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/wallet/transfer")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "recipientId": "m-9",
            "recipientType": "BUSINESS",
            "amount": 45.5,
            "description": "Coffee beans"
        })))
        .with_status(200)
        .with_body(r#"{"status":"success","message":"Transfer successful","data":{"senderBalance":954.5}}"#)
        .create_async()
        .await;

    let receipt = client(server.url(), "tok")
        .transfer(&TransferRequest {
            recipient_id: "m-9".to_string(),
            recipient_type: RecipientType::Business,
            amount: Decimal::from_str("45.50").unwrap(),
            description: "Coffee beans".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(receipt.sender_balance, Decimal::from_str("954.5").unwrap());
    assert!(receipt.transaction.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_top_up_rejects_zero_locally() {
    let server = mockito::Server::new_async().await;
    let err = client(server.url(), "tok").top_up(Decimal::ZERO).await.unwrap_err();
    assert!(matches!(err, WalletError::InvalidAmount(_)));
}

#[tokio::test]
async fn test_refresh_then_failed_refresh_keeps_statement() {
    let mut server = mockito::Server::new_async().await;
    let ok = server
        .mock("GET", "/wallet/transactions")
        .match_query(Matcher::UrlEncoded("limit".into(), "100".into()))
        .with_status(200)
        .with_body(FEED)
        .expect(1)
        .create_async()
        .await;

    let wallet = client(server.url(), "tok");
    let mut model = StatementsModel::new(DEFAULT_ZONE);
    let out = model.refresh(&wallet, 100).await.unwrap();
    assert_eq!(out, RefreshOutcome::Updated { count: 3 });
    ok.assert_async().await;
    ok.remove_async().await;

    server
        .mock("GET", "/wallet/transactions")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body(r#"{"status":"error","message":"Database unavailable"}"#)
        .create_async()
        .await;

    let out = model.refresh(&wallet, 100).await.unwrap();
    assert!(matches!(out, RefreshOutcome::Retained { .. }));

    let view = model.view(&StatementFilter::all()).unwrap();
    assert_eq!(view.groups.len(), 2);
    assert_eq!(view.totals.income, Decimal::new(1000, 0));
    assert_eq!(view.totals.expenses, Decimal::new(500, 0));
    assert_eq!(view.totals.points, 500);
}
