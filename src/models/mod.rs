pub mod config;
pub mod food;
pub mod goal;
pub mod observation;

pub use food::{CatalogItem, FoodEntry, Macros, MealType};
pub use goal::Goal;
pub use observation::{Observation, ObservationSeries};
