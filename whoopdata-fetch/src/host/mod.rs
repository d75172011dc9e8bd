//! Host APIs for whoopdata.
//!
//! - [`http`] - HTTP transport seam and its reqwest implementation

pub mod http;

// Re-export key types
pub use http::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};
