use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EdgeError {
    #[error("invalid control selector '{0}', expected near-source or near-target")]
    InvalidSelector(String),
    #[error("edge has no derived control points yet")]
    NotInitialized,
    #[error("unknown node id {0}")]
    UnknownNode(u32),
    #[error("unknown edge id {0}")]
    UnknownEdge(u32),
    #[error("edge {0} is not a bezier edge")]
    NotBezier(u32),
    #[error("edge endpoints cannot be the same node")]
    SameNode,
    #[error("parameter '{0}' must be finite")]
    NonFinite(&'static str),
    #[error("{0} lies outside the supported coordinate range")]
    OutOfBounds(&'static str),
    #[error("too many {kind}, limit is {limit}")]
    CapacityExceeded { kind: &'static str, limit: usize },
    #[error("edge text is {0} bytes, limit is {max}", max = crate::geometry::limits::MAX_TEXT_LEN)]
    TextTooLong(usize),
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("theme json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bezier offset must be finite and non-negative, got {0}")]
    InvalidOffset(f32),
}

#[derive(Debug, Error)]
pub enum DocError {
    #[error("document json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported document version {0}")]
    UnsupportedVersion(u32),
    #[error("too many {kind}: {count}")]
    TooLarge { kind: &'static str, count: usize },
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u32 },
    #[error("{kind} {id} has out-of-range geometry")]
    OutOfBounds { kind: &'static str, id: u32 },
    #[error("edge {edge} references missing node {node}")]
    DanglingEdge { edge: u32, node: u32 },
    #[error("edge {0} connects a node to itself")]
    SelfLoop(u32),
    #[error("bezier edge {edge} has {len} points, expected 0 or 4")]
    BadPoints { edge: u32, len: usize },
    #[error("invalid theme: {0}")]
    Theme(#[from] ThemeError),
}
