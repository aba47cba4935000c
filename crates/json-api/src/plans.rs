//! Plan Catalog Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tollgate::catalog::{self, Plan, PlanKind};

/// Catalog plan
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlanResponse {
    /// Plan identifier, as used in offer applicability
    pub id: String,

    /// Tier label
    pub tier: String,

    /// `subscription` or `one_time`
    pub kind: String,

    /// Cadences the plan may be bought with
    pub cadences: Vec<String>,

    /// Whether the plan is a consultation
    pub consultation: bool,
}

impl From<&Plan> for PlanResponse {
    fn from(plan: &Plan) -> Self {
        PlanResponse {
            id: plan.id.to_string(),
            tier: plan.tier.to_string(),
            kind: match plan.kind {
                PlanKind::Subscription => "subscription",
                PlanKind::OneTime => "one_time",
            }
            .to_string(),
            cadences: plan.cadences.iter().map(ToString::to_string).collect(),
            consultation: plan.consultation,
        }
    }
}

/// List Plans Handler
///
/// Returns the static plan catalog.
#[endpoint(tags("plans"), summary = "List Plans")]
pub(crate) async fn handler() -> Json<Vec<PlanResponse>> {
    Json(catalog::plans().iter().map(PlanResponse::from).collect())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn test_plans_lists_the_catalog() -> TestResult {
        let router = Router::new().push(Router::with_path("plans").get(handler));

        let plans: Vec<PlanResponse> = TestClient::get("http://example.com/plans")
            .send(&Service::new(router))
            .await
            .take_json()
            .await?;

        let consultation = plans
            .iter()
            .find(|plan| plan.id == "ENT_CONSULTATION")
            .ok_or("missing consultation plan")?;

        assert_eq!(plans.len(), catalog::plans().len());
        assert!(consultation.consultation);
        assert_eq!(consultation.cadences, vec!["one_time".to_string()]);

        Ok(())
    }
}
