//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    export::{export_report, export_spreadsheet},
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, get_create_transaction_page, get_suggestion_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_create_transaction_page),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(endpoints::SUGGESTION_API, get(get_suggestion_endpoint))
        .route(endpoints::EXPORT_SPREADSHEET, get(export_spreadsheet))
        .route(endpoints::EXPORT_REPORT, get(export_report))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use tempfile::TempDir;

    use crate::{AppState, endpoints, ledger::LedgerStore, routing::build_router};

    fn get_test_server(dir: &TempDir) -> TestServer {
        let state = AppState::new(LedgerStore::new(dir.path().join("ledger.csv")), "Etc/UTC");

        TestServer::try_new(build_router(state)).expect("could not create test server")
    }

    #[tokio::test]
    async fn new_transaction_shows_on_dashboard() {
        let dir = TempDir::new().unwrap();
        let server = get_test_server(&dir);

        server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[
                ("amount", "42.5"),
                ("date", "2025-02-10"),
                ("description", "Uber to work"),
                ("category", "Transporte"),
            ])
            .await
            .assert_status(StatusCode::SEE_OTHER);

        let response = server
            .get(endpoints::DASHBOARD_VIEW)
            .add_query_param("start", "2025-02-01")
            .add_query_param("end", "2025-02-28")
            .await;

        response.assert_status_ok();
        let text = response.text();
        assert!(text.contains("Uber to work"));
        assert!(text.contains("R$42.50"));
    }

    #[tokio::test]
    async fn suggestion_uses_stored_descriptions() {
        let dir = TempDir::new().unwrap();
        let server = get_test_server(&dir);

        for (description, category) in [
            ("uber ride home", "Transporte"),
            ("uber to airport", "Transporte"),
            ("pizza dinner", "Alimentação"),
        ] {
            server
                .post(endpoints::TRANSACTIONS_API)
                .form(&[
                    ("amount", "10"),
                    ("date", "2025-02-10"),
                    ("description", description),
                    ("category", category),
                ])
                .await
                .assert_status(StatusCode::SEE_OTHER);
        }

        let response = server
            .get(endpoints::SUGGESTION_API)
            .add_query_param("description", "uber")
            .await;

        response.assert_status_ok();
        assert!(response.text().contains(r#"value="Transporte" selected"#));
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let dir = TempDir::new().unwrap();
        let server = get_test_server(&dir);

        server
            .get("/does/not/exist")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
