//! Admin shared-secret middleware.

use salvo::prelude::*;
use subtle::ConstantTimeEq;

use crate::extensions::*;

/// Header carrying the admin shared secret.
pub(crate) const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.state_or_500() {
        Ok(state) => state,
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    let supplied = req
        .headers()
        .get(ADMIN_SECRET_HEADER)
        .map(|value| value.as_bytes())
        .unwrap_or_default();

    if !secrets_match(state.admin_secret.as_bytes(), supplied) {
        res.render(StatusError::unauthorized().brief("Missing or invalid admin secret"));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

/// An empty configured secret never matches.
fn secrets_match(expected: &[u8], supplied: &[u8]) -> bool {
    !expected.is_empty()
        && expected.len() == supplied.len()
        && bool::from(expected.ct_eq(supplied))
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::{TEST_ADMIN_SECRET, state};

    use super::*;

    #[salvo::handler]
    async fn secret_area(res: &mut Response) {
        res.render("admin");
    }

    fn make_service() -> Service {
        let router = Router::new()
            .hoop(inject(state()))
            .hoop(handler)
            .push(Router::new().get(secret_area));

        Service::new(router)
    }

    #[tokio::test]
    async fn test_missing_secret_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_secret_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com")
            .add_header(ADMIN_SECRET_HEADER, "not-the-secret", true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_matching_secret_passes_through() -> TestResult {
        let mut res = TestClient::get("http://example.com")
            .add_header(ADMIN_SECRET_HEADER, TEST_ADMIN_SECRET, true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "admin");

        Ok(())
    }

    #[test]
    fn empty_configured_secret_never_matches() {
        assert!(!secrets_match(b"", b""));
        assert!(!secrets_match(b"secret", b"secre"));
        assert!(secrets_match(b"secret", b"secret"));
    }
}
