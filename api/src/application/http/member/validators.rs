use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberValidator {
    #[validate(length(min = 1, max = 255, message = "username is required"))]
    pub username: String,

    #[validate(range(min = 0, message = "age must not be negative"))]
    pub age: i32,

    #[serde(default)]
    pub team_name: Option<String>,
}
