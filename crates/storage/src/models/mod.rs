mod athlete;
mod category;
mod training_center;

pub use athlete::{Athlete, AthleteProjection, AthleteRecord};
pub use category::Category;
pub use training_center::TrainingCenter;
