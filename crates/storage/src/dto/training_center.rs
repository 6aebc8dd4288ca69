use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::TrainingCenter;

/// Request payload for creating a training center
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTrainingCenterRequest {
    #[schema(example = "CT King")]
    #[validate(length(
        min = 1,
        max = 20,
        message = "Name must be between 1 and 20 characters"
    ))]
    pub nome: String,

    #[schema(example = "Rua X, Q02")]
    #[validate(length(
        min = 1,
        max = 60,
        message = "Address must be between 1 and 60 characters"
    ))]
    pub endereco: String,

    #[schema(example = "11999990000")]
    #[validate(length(max = 20))]
    pub telefone: Option<String>,

    #[schema(example = "Marcos")]
    #[validate(length(
        min = 1,
        max = 30,
        message = "Owner must be between 1 and 30 characters"
    ))]
    pub proprietario: String,
}

impl CreateTrainingCenterRequest {
    /// Builds the row to insert, with a freshly generated id
    pub fn into_training_center(self) -> TrainingCenter {
        TrainingCenter {
            id: Uuid::new_v4(),
            nome: self.nome,
            endereco: self.endereco,
            telefone: self.telefone,
            proprietario: self.proprietario,
        }
    }
}

/// Training center as referenced by name from an athlete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct TrainingCenterRef {
    #[schema(example = "CT King")]
    #[validate(length(
        min = 1,
        max = 20,
        message = "Name must be between 1 and 20 characters"
    ))]
    pub nome: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrainingCenterResponse {
    pub id: Uuid,
    pub nome: String,
    pub endereco: String,
    pub telefone: Option<String>,
    pub proprietario: String,
}

impl From<TrainingCenter> for TrainingCenterResponse {
    fn from(center: TrainingCenter) -> Self {
        Self {
            id: center.id,
            nome: center.nome,
            endereco: center.endereco,
            telefone: center.telefone,
            proprietario: center.proprietario,
        }
    }
}
