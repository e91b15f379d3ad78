//! Token and remote variable models

pub mod category;
pub mod remote;
pub mod store;
pub mod token;
pub mod warning;

pub use category::{TokenCategory, TokenLayer};
pub use remote::{
    ActionKind, BatchResponse, CollectionAction, ModeValueAction, RemoteCollection, RemoteColor,
    RemoteVariable, ResolvedType, VariableAction, VariableValue, VariablesBatch,
    VariablesResponse,
};
pub use store::{CategoryTokens, TokenStore};
pub use token::{Scalar, Token, TokenNode, TokenPath, TokenTree, TokenType, TokenValue};
pub use warning::TransformWarning;
