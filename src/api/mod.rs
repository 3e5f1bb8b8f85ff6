mod chain;
mod error;
mod health;
pub mod models;

use actix_web::web::{self, ServiceConfig};

pub use error::ApiError;
pub use models::AppState;

/// Chains can be long; raise the default 32 KiB JSON body limit.
const JSON_LIMIT_BYTES: usize = 4 * 1024 * 1024;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT_BYTES)
            .error_handler(|err, _req| ApiError::Decode(err.to_string()).into()),
    )
    .service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(chain::get_chain)
            .service(chain::validate_chain)
            .service(chain::append_block)
            .service(chain::replace_chain),
    )
    .service(chain::get_blockchain)
    .service(chain::write_block);
}
