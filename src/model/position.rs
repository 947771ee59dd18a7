use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Position {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "Software Engineer")]
    pub name: String,
}
