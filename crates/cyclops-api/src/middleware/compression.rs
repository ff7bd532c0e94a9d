//! Response compression layer.

use tower_http::compression::CompressionLayer;

/// Gzip compression for pages and the configuration JSON.
pub fn build_compression_layer() -> CompressionLayer {
    CompressionLayer::new().gzip(true)
}
