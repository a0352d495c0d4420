#![doc = include_str!("../README.md")]

mod client;
mod error;
mod messages;
mod types;

pub use client::KnowledgeClient;
pub use error::ClientError;
pub use messages::{
    CreateByTextRequest, DocumentPage, DocumentResponse, ProcessRule, UpdateByTextRequest,
};
pub use types::*;
