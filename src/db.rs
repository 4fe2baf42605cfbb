pub mod control_repo;
pub use control_repo::ControlRepository;
pub mod payment_repo;
pub use payment_repo::PaymentRepository;
pub mod project_repo;
pub use project_repo::ProjectRepository;
pub mod seed;
pub mod sequence;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
pub mod vendor_repo;
pub use vendor_repo::VendorRepository;

use serde::Serialize;
use serde_json::Value;

use crate::common::error::AppError;

// Serializa uma coleção para o formato bruto do Store. Falha aqui é bug de
// programação (tipos do crate sempre serializam), então vira erro interno.
pub(crate) fn to_value<T: Serialize>(value: &T) -> Result<Value, AppError> {
    serde_json::to_value(value).map_err(|err| AppError::InternalError(anyhow::Error::new(err)))
}
