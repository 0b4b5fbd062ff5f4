//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    admin::{get_admin_page, post_admin_password},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    manager::{create_transaction_endpoint, get_manager_page, get_transaction_types},
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::MANAGER_VIEW, get(get_manager_page))
        .route(endpoints::ADMIN_VIEW, get(get_admin_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(
            endpoints::TRANSACTION_TYPES_API,
            get(get_transaction_types),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(endpoints::ADMIN_API, post(post_admin_password))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the manager page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::MANAGER_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::{
        build_router, endpoints,
        test_utils::{TEST_ADMIN_PASSWORD, test_state},
    };

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (state, _dir) = test_state();
        let server = TestServer::try_new(build_router(state)).expect("Could not create test server.");

        let response = server.get("/definitely/not/here").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn root_redirects_through_router() {
        let (state, _dir) = test_state();
        let server = TestServer::try_new(build_router(state)).expect("Could not create test server.");

        let response = server.get(endpoints::ROOT).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), endpoints::MANAGER_VIEW);
    }

    #[tokio::test]
    async fn pages_are_served() {
        let (state, _dir) = test_state();
        let server = TestServer::try_new(build_router(state)).expect("Could not create test server.");

        for endpoint in [endpoints::MANAGER_VIEW, endpoints::ADMIN_VIEW] {
            server.get(endpoint).await.assert_status_ok();
        }
        server
            .get(endpoints::INTERNAL_ERROR_VIEW)
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn recorded_transaction_shows_on_dashboard() {
        let (state, _dir) = test_state();
        let server = TestServer::try_new(build_router(state)).expect("Could not create test server.");

        server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[
                ("category", "Airtel Money"),
                ("type_", "Dépôt"),
                ("amount", "500"),
                ("description", "test"),
            ])
            .await
            .assert_status_ok();
        server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[
                ("category", "Airtel Money"),
                ("type_", "Dépôt"),
                ("amount", "0"),
                ("description", "rejected"),
            ])
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let response = server
            .post(endpoints::ADMIN_API)
            .form(&[("password", TEST_ADMIN_PASSWORD)])
            .await;

        response.assert_status_ok();
        let text = response.text();
        assert!(text.contains("500.00 FCFA"));
        assert!(!text.contains("rejected"));
    }

    #[tokio::test]
    async fn wrong_admin_password_is_rejected() {
        let (state, _dir) = test_state();
        let server = TestServer::try_new(build_router(state)).expect("Could not create test server.");

        let response = server
            .post(endpoints::ADMIN_API)
            .form(&[("password", "wrong")])
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert!(response.text().contains("Mot de passe incorrect!"));
    }
}
