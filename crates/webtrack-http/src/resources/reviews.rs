//! Performance review, goal and skill endpoints.

use serde::Serialize;
use tracing::instrument;

use webtrack_core::Result;

use crate::gateway::Gateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewType {
    MidYear,
    YearEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    Draft,
    Submitted,
    Reviewed,
    Acknowledged,
}

/// Filters for listing reviews.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ReviewFilters {
    pub user: Option<u64>,
    pub reviewer: Option<u64>,
    pub status: Option<ReviewStatus>,
    pub review_type: Option<ReviewType>,
}

/// A goal attached to a new review.
#[derive(Debug, Clone, Serialize)]
pub struct GoalInput {
    pub description: String,
    pub category: String,
    pub weight: f64,
}

/// A new performance review.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewInput {
    pub user: u64,
    pub reviewer: u64,
    pub review_period: String,
    pub review_type: ReviewType,
    pub goals: Vec<GoalInput>,
}

/// Changes to a goal; used both standalone and nested in [`ReviewUpdate`].
#[derive(Debug, Default, Clone, Serialize)]
pub struct GoalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// A partial update to a review.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ReviewUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReviewStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<GoalUpdate>>,
}

#[derive(Debug, Serialize)]
struct DepartmentFilter<'a> {
    department: Option<&'a str>,
    period: Option<&'a str>,
}

/// Client for `/reviews/`.
#[derive(Debug, Clone)]
pub struct Reviews {
    gateway: Gateway,
}

impl Reviews {
    pub(crate) fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filters: &ReviewFilters) -> Result<serde_json::Value> {
        self.gateway.get_json_with("/reviews/", filters).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<serde_json::Value> {
        self.gateway.get_json(&format!("/reviews/{}/", id)).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, input: &ReviewInput) -> Result<serde_json::Value> {
        self.gateway.post_json("/reviews/", input).await
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: u64, update: &ReviewUpdate) -> Result<serde_json::Value> {
        self.gateway
            .patch_json(&format!("/reviews/{}/", id), update)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.gateway.delete(&format!("/reviews/{}/", id)).await
    }

    #[instrument(skip(self))]
    pub async fn submit(&self, id: u64) -> Result<serde_json::Value> {
        self.gateway
            .post_empty(&format!("/reviews/{}/submit/", id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn acknowledge(&self, id: u64) -> Result<serde_json::Value> {
        self.gateway
            .post_empty(&format!("/reviews/{}/acknowledge/", id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn goals(&self, review: u64) -> Result<serde_json::Value> {
        self.gateway
            .get_json(&format!("/reviews/{}/goals/", review))
            .await
    }

    #[instrument(skip(self))]
    pub async fn update_goal(
        &self,
        review: u64,
        goal: u64,
        update: &GoalUpdate,
    ) -> Result<serde_json::Value> {
        self.gateway
            .patch_json(&format!("/reviews/{}/goals/{}/", review, goal), update)
            .await
    }

    #[instrument(skip(self))]
    pub async fn analytics(
        &self,
        department: Option<&str>,
        period: Option<&str>,
    ) -> Result<serde_json::Value> {
        self.gateway
            .get_json_with(
                "/reviews/analytics/",
                &DepartmentFilter { department, period },
            )
            .await
    }
}

/// A skill to create or rename.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SkillInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
struct MatrixFilter<'a> {
    department: Option<&'a str>,
}

/// Client for `/skills/`.
#[derive(Debug, Clone)]
pub struct Skills {
    gateway: Gateway,
}

impl Skills {
    pub(crate) fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<serde_json::Value> {
        self.gateway.get_json("/skills/").await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, input: &SkillInput) -> Result<serde_json::Value> {
        self.gateway.post_json("/skills/", input).await
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: u64, input: &SkillInput) -> Result<serde_json::Value> {
        self.gateway
            .patch_json(&format!("/skills/{}/", id), input)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.gateway.delete(&format!("/skills/{}/", id)).await
    }

    #[instrument(skip(self))]
    pub async fn matrix(&self, department: Option<&str>) -> Result<serde_json::Value> {
        self.gateway
            .get_json_with("/skills/matrix/", &MatrixFilter { department })
            .await
    }
}
