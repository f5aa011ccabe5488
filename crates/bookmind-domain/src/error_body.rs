//! JSON body returned by every failing API call.

use serde::{Deserialize, Serialize};

/// `{ "error": "<message>", "code": "<CODE>" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}
