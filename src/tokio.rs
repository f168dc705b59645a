use std::sync::LazyLock;
use tokio::runtime::Runtime;

// Runtime used to drive existence checks from synchronous callers
pub static TOKIO_RUNTIME: LazyLock<Runtime> =
    LazyLock::new(|| Runtime::new().expect("Failed to create Tokio runtime"));
