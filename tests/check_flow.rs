use mockito::Server;

use rlsprobe::checker::Checker;
use rlsprobe::config::Credentials;
use rlsprobe::models::{CheckError, CheckOutcome, SecureReason, TableCheck, Verdict};
use rlsprobe::reporter::JsonExporter;

fn anon_credentials(base_url: &str) -> Credentials {
    Credentials {
        base_url: base_url.trim_end_matches('/').to_string(),
        anon_key: "anon-test-key".to_string(),
    }
}

fn default_tables() -> Vec<TableCheck> {
    vec![
        TableCheck::primary("profiles"),
        TableCheck::secondary("meals"),
    ]
}

#[tokio::test]
async fn empty_result_set_is_secure() {
    let mut server = Server::new_async().await;

    let profiles = server
        .mock("GET", "/rest/v1/profiles")
        .match_header("apikey", "anon-test-key")
        .match_header("authorization", "Bearer anon-test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;
    let meals = server
        .mock("GET", "/rest/v1/meals")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let checker = Checker::new(anon_credentials(&server.url()), 5, true);
    let (results, summary) = checker.run(default_tables()).await;

    profiles.assert_async().await;
    meals.assert_async().await;

    assert_eq!(results.len(), 2);
    assert_eq!(
        results[0].outcome,
        CheckOutcome::Secure {
            reason: SecureReason::EmptyResultSet
        }
    );
    assert_eq!(summary.primary, Verdict::Secure);
    assert!(summary.database_secure());
}

#[tokio::test]
async fn leaked_rows_are_reported_as_vulnerable() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/rest/v1/profiles")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": 1, "email": "leak@example.com", "full_name": "Leaked User"}]"#)
        .create_async()
        .await;
    server
        .mock("GET", "/rest/v1/meals")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let checker = Checker::new(anon_credentials(&server.url()), 5, true);
    let (results, summary) = checker.run(default_tables()).await;

    match &results[0].outcome {
        CheckOutcome::Vulnerable {
            rows,
            sensitive_fields,
        } => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0]["email"], "leak@example.com");
            assert!(sensitive_fields.contains(&"email".to_string()));
        }
        other => panic!("expected Vulnerable, got {:?}", other),
    }
    assert_eq!(summary.primary, Verdict::Vulnerable);
    assert!(!summary.database_secure());
}

#[tokio::test]
async fn denial_is_secure_regardless_of_body() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/rest/v1/profiles")
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "permission denied for table profiles"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/rest/v1/meals")
        .with_status(401)
        .with_body(r#"{"message": "JWT required"}"#)
        .create_async()
        .await;

    let checker = Checker::new(anon_credentials(&server.url()), 5, true);
    let (results, summary) = checker.run(default_tables()).await;

    assert_eq!(
        results[0].outcome,
        CheckOutcome::Secure {
            reason: SecureReason::AccessDenied { status: 403 }
        }
    );
    assert_eq!(
        results[1].outcome,
        CheckOutcome::Secure {
            reason: SecureReason::AccessDenied { status: 401 }
        }
    );
    assert!(summary.database_secure());
}

#[tokio::test]
async fn unexpected_status_is_unknown() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/rest/v1/profiles")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;
    server
        .mock("GET", "/rest/v1/meals")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let checker = Checker::new(anon_credentials(&server.url()), 5, true);
    let (results, summary) = checker.run(default_tables()).await;

    match &results[0].outcome {
        CheckOutcome::Unknown {
            error: CheckError::UnexpectedStatus { status, body },
        } => {
            assert_eq!(*status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected UnexpectedStatus, got {:?}", other),
    }
    assert_eq!(summary.primary, Verdict::Unknown);
    assert!(!summary.database_secure());
}

#[tokio::test]
async fn transport_failure_does_not_stop_the_run() {
    // Nothing listens here; both requests fail at the transport layer and the
    // engine must still probe the second table.
    let checker = Checker::new(anon_credentials("http://127.0.0.1:9"), 1, true);
    let (results, summary) = checker.run(default_tables()).await;

    assert_eq!(results.len(), 2);
    for result in &results {
        assert!(result.response.is_error());
        assert!(matches!(
            result.outcome,
            CheckOutcome::Unknown {
                error: CheckError::Transport(_)
            }
        ));
    }
    assert_eq!(summary.unknown_count, 2);
    assert!(!summary.database_secure());
}

#[tokio::test]
async fn summary_reflects_only_the_primary_table() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/rest/v1/profiles")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;
    server
        .mock("GET", "/rest/v1/meals")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": 7, "name": "lunch", "calories": 640}]"#)
        .create_async()
        .await;

    let checker = Checker::new(anon_credentials(&server.url()), 5, true);
    let (results, summary) = checker.run(default_tables()).await;

    assert!(results[1].outcome.is_vulnerable());
    assert_eq!(summary.secure_count, 1);
    assert_eq!(summary.vulnerable_count, 1);
    // The exposed secondary table never flips the aggregate verdict.
    assert_eq!(summary.primary, Verdict::Secure);
    assert!(summary.database_secure());
}

#[tokio::test]
async fn extra_secondary_tables_are_probed() {
    let mut server = Server::new_async().await;

    for table in ["profiles", "meals", "chat_messages"] {
        server
            .mock("GET", format!("/rest/v1/{}", table).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;
    }

    let mut tables = default_tables();
    tables.push(TableCheck::secondary("chat_messages"));

    let checker = Checker::new(anon_credentials(&server.url()), 5, true);
    let (results, summary) = checker.run(tables).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[2].table.name, "chat_messages");
    assert!(!results[2].is_primary());
    assert_eq!(summary.secure_count, 3);
}

#[tokio::test]
async fn json_export_round_trips() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/rest/v1/profiles")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": 1, "email": "leak@example.com"}]"#)
        .create_async()
        .await;
    server
        .mock("GET", "/rest/v1/meals")
        .with_status(403)
        .with_body("{}")
        .create_async()
        .await;

    let checker = Checker::new(anon_credentials(&server.url()), 5, true);
    let (results, summary) = checker.run(default_tables()).await;

    let path = std::env::temp_dir().join(format!("rlsprobe_export_{}.json", std::process::id()));
    let path = path.to_str().expect("temp path is valid UTF-8");

    JsonExporter::export(&results, &summary, path).unwrap();
    let (loaded_results, loaded_summary) = JsonExporter::load(path).unwrap();
    std::fs::remove_file(path).ok();

    assert_eq!(loaded_results.len(), results.len());
    assert_eq!(loaded_results[0].table.name, "profiles");
    assert_eq!(loaded_results[0].outcome, results[0].outcome);
    assert_eq!(loaded_summary.primary, Verdict::Vulnerable);
}
