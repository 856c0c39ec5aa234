pub use allocation::{DistributionMethod, Goals, PlanInput, SavingsRecord, allocate};
pub use error::EngineError;
pub use store::Store;
pub use users::{Accounts, UserRecord};

mod allocation;
mod error;
mod store;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
