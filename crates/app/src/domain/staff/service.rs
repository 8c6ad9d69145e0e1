//! Staff service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    api::{Access, ApiClient, ApiError, ApiRequest, ValidationError},
    domain::staff::models::{NewStaff, StaffId, StaffMember, StaffUpdate},
};

const LIST_KEYS: &[&str] = &["staff", "users"];
const ITEM_KEYS: &[&str] = &["staff", "user"];

#[derive(Debug, Clone)]
pub struct HttpStaffService {
    client: ApiClient,
}

impl HttpStaffService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StaffService for HttpStaffService {
    async fn list_staff(&self) -> Result<Vec<StaffMember>, ApiError> {
        self.client
            .list(ApiRequest::get("/staff"), Access::Authenticated, LIST_KEYS)
            .await
    }

    async fn register_staff(&self, staff: NewStaff) -> Result<StaffMember, ApiError> {
        staff.validate()?;

        let registered: StaffMember = self
            .client
            .item(
                ApiRequest::post("/staff/register").json(staff.to_json()),
                Access::Authenticated,
                ITEM_KEYS,
            )
            .await?;

        info!(staff = %registered.id, role = %registered.role, "staff registered");

        Ok(registered)
    }

    async fn update_staff(
        &self,
        staff: StaffId,
        update: StaffUpdate,
    ) -> Result<StaffMember, ApiError> {
        if update.is_empty() {
            return Err(ValidationError::Required("at least one field to change").into());
        }

        self.client
            .item(
                ApiRequest::put(format!("/staff/{staff}")).json(update.to_json()),
                Access::Authenticated,
                ITEM_KEYS,
            )
            .await
    }

    async fn delete_staff(&self, staff: StaffId) -> Result<(), ApiError> {
        self.client
            .call(
                ApiRequest::delete(format!("/staff/{staff}")),
                Access::Authenticated,
            )
            .await?;

        info!(%staff, "staff removed");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait StaffService: Send + Sync {
    async fn list_staff(&self) -> Result<Vec<StaffMember>, ApiError>;

    async fn register_staff(&self, staff: NewStaff) -> Result<StaffMember, ApiError>;

    async fn update_staff(
        &self,
        staff: StaffId,
        update: StaffUpdate,
    ) -> Result<StaffMember, ApiError>;

    async fn delete_staff(&self, staff: StaffId) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        api::{
            ApiResponse,
            test_support::{answering, client},
            transport::{Method, MockTransport},
        },
        session::test_support::{signed_in, signed_out},
    };

    use super::*;

    #[tokio::test]
    async fn staff_lists_need_a_session() -> TestResult {
        let mut transport = MockTransport::new();
        transport.expect_send().never();

        let result = HttpStaffService::new(client(transport, signed_out()))
            .list_staff()
            .await;

        assert!(matches!(result, Err(ApiError::AuthenticationRequired)));

        Ok(())
    }

    #[tokio::test]
    async fn staff_are_listed() -> TestResult {
        let body = json!({
            "staff": [
                { "id": 1, "name": "Sari", "email": "sari@bengkel.test", "role": "kasir" },
                { "id": "2", "name": "Joko", "email": "joko@bengkel.test" },
            ]
        });

        let staff = HttpStaffService::new(client(answering(200, body), signed_in()))
            .list_staff()
            .await?;

        assert_eq!(staff.len(), 2);
        assert_eq!(staff.get(1).map(|member| member.role.as_str()), Some("staff"));

        Ok(())
    }

    #[tokio::test]
    async fn empty_updates_are_not_sent() -> TestResult {
        let mut transport = MockTransport::new();
        transport.expect_send().never();

        let result = HttpStaffService::new(client(transport, signed_in()))
            .update_staff(StaffId::new(1), StaffUpdate::default())
            .await;

        assert!(matches!(result, Err(ApiError::Validation(_))));

        Ok(())
    }

    #[tokio::test]
    async fn deleting_hits_the_member() -> TestResult {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .once()
            .withf(|request| request.method == Method::Delete && request.path == "/staff/4")
            .return_once(|_| Ok(ApiResponse::new(204, serde_json::Value::Null)));

        HttpStaffService::new(client(transport, signed_in()))
            .delete_staff(StaffId::new(4))
            .await?;

        Ok(())
    }
}
