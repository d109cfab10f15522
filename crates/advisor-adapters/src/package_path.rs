//! Package version extraction from module paths.

use once_cell::sync::Lazy;
use regex::Regex;

/// pnpm content-addressed store paths encode `name@version[_peerinfo]`.
///
/// Examples:
/// - `../../node_modules/.pnpm/react-dom@18.3.1_react@18.3.1/node_modules/react-dom/...`
/// - `../../node_modules/.pnpm/scheduler@0.23.2/node_modules/scheduler/...`
/// - `../../node_modules/.pnpm/@babel+core@7.23.0_@babel+types@7.23.0/node_modules/@babel/core/...`
static PNPM_STORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"node_modules/\.pnpm/((?:@[^+]+\+[^@]+)|[^@]+)@([^/_]+)").unwrap());

/// Conventional nested node_modules paths; scoped names are captured whole.
///
/// Examples:
/// - `./node_modules/react/index.js`
/// - `./node_modules/@babel/core/lib/index.js`
static NODE_MODULES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"node_modules/(@[^/]+/[^/]+|[^/]+)").unwrap());

/// Extracts a package version hint from a module path.
///
/// The pnpm store pattern is tried first and yields the semantic version
/// with any underscore-delimited peer-dependency suffix stripped. The
/// plain node_modules pattern is a weaker fallback that only recovers the
/// package name segment. Returns `None` when neither pattern matches;
/// callers fall back to `"unknown"`.
pub fn extract_package_version(path: &str) -> Option<String> {
    if let Some(caps) = PNPM_STORE.captures(path) {
        let version = caps.get(2)?.as_str();
        // Remove any peer dep info
        let version = version.split('_').next().unwrap_or(version);
        return Some(version.to_string());
    }

    NODE_MODULES
        .captures(path)
        .map(|caps| caps[1].to_string())
}
