use std::sync::LazyLock;

/// Version of the software as recorded in the package manifest.
pub static VERSION: LazyLock<String> =
    LazyLock::new(|| format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")));
