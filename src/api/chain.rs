use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, info};

use super::error::ApiError;
use super::models::{AppState, ChainResponse, ReplaceResponse, ValidateResponse, WriteRequest};
use crate::blockchain::Block;

/// Get the full blockchain as a plain array, oldest block first.
#[get("/")]
pub async fn get_blockchain(state: web::Data<AppState>) -> impl Responder {
    let blocks = state.ledger.chain().read();
    debug!("GET / - {} blocks", blocks.len());
    HttpResponse::Ok().json(blocks)
}

/// Mine a block carrying the submitted BPM and append it.
/// Mining runs on the blocking pool; the chain lock is only held to append.
#[post("/")]
pub async fn write_block(
    state: web::Data<AppState>,
    body: web::Json<WriteRequest>,
) -> Result<HttpResponse, ApiError> {
    let payload = body.into_inner().payload;
    debug!("POST / - payload={payload}");

    let block = web::block(move || state.ledger.submit(payload))
        .await
        .map_err(|e| ApiError::Blocking(e.to_string()))??;

    Ok(HttpResponse::Created().json(block))
}

/// Chain plus summary.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let chain = state.ledger.chain();
    let blocks = chain.read();
    HttpResponse::Ok().json(ChainResponse {
        length: blocks.len(),
        difficulty: chain.difficulty(),
        chain: blocks,
    })
}

/// Validate the whole chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let chain = state.ledger.chain();
    HttpResponse::Ok().json(ValidateResponse {
        valid: chain.is_valid_chain(),
        length: chain.len(),
        difficulty: chain.difficulty(),
    })
}

/// Append a block mined elsewhere. Rejected if it does not extend the tip.
#[post("/blocks/")]
pub async fn append_block(
    state: web::Data<AppState>,
    body: web::Json<Block>,
) -> Result<HttpResponse, ApiError> {
    let block = state.ledger.append_block(body.into_inner())?;
    Ok(HttpResponse::Created().json(block))
}

/// Longest-chain replacement.
#[post("/chain/replace/")]
pub async fn replace_chain(
    state: web::Data<AppState>,
    body: web::Json<Vec<Block>>,
) -> impl Responder {
    let (replaced, length) = state.ledger.chain().replace_reporting_len(body.into_inner());
    if replaced {
        info!("POST /chain/replace/ - chain is now {length} blocks");
    }
    HttpResponse::Ok().json(ReplaceResponse { replaced, length })
}
