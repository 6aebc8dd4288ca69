use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Category;

/// Request payload for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[schema(example = "Scale")]
    #[validate(length(
        min = 1,
        max = 10,
        message = "Name must be between 1 and 10 characters"
    ))]
    pub nome: String,
}

impl CreateCategoryRequest {
    /// Builds the row to insert, with a freshly generated id
    pub fn into_category(self) -> Category {
        Category {
            id: Uuid::new_v4(),
            nome: self.nome,
        }
    }
}

/// Category as referenced by name from an athlete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryRef {
    #[schema(example = "Scale")]
    #[validate(length(
        min = 1,
        max = 10,
        message = "Name must be between 1 and 10 characters"
    ))]
    pub nome: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub nome: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            nome: category.nome,
        }
    }
}
