pub mod gbm;
pub mod model;

pub use gbm::Gbm;
pub use model::PriceModel;
