/// Domain-aware logging macros.
///
/// Each macro injects a `domain` field so call sites stay short. Domains used
/// in this crate: `synth` (record construction and orchestration), `conf`
/// (resolution of configuration against the catalog) and `sys` (run lifecycle).
///
/// ```ignore
/// pf_info!(sys, records = 1000, seed = 42, "generation complete");
/// pf_debug!(synth, kpi = code, "duplicate probe fell back to random");
/// ```

#[doc(hidden)]
macro_rules! pf_log {
    ($level:ident, $domain:ident, $($field:tt)*) => {
        tracing::$level!(domain = stringify!($domain), $($field)*)
    };
}

/// Log at WARN level with an automatic `domain` field.
macro_rules! pf_warn {
    ($domain:ident, $($rest:tt)*) => {
        pf_log!(warn, $domain, $($rest)*)
    };
}

/// Log at INFO level with an automatic `domain` field.
macro_rules! pf_info {
    ($domain:ident, $($rest:tt)*) => {
        pf_log!(info, $domain, $($rest)*)
    };
}

/// Log at DEBUG level with an automatic `domain` field.
macro_rules! pf_debug {
    ($domain:ident, $($rest:tt)*) => {
        pf_log!(debug, $domain, $($rest)*)
    };
}
