/// Domain-aware logging macros for the generator binary.
///
/// Domains: `sys` (process lifecycle), `conf` (configuration resolution) and
/// `res` (files written).
///
/// ```ignore
/// pf_info!(res, path = %path.display(), rows = 1000, "wrote dataset");
/// ```

#[doc(hidden)]
macro_rules! pf_log {
    ($level:ident, $domain:ident, $($field:tt)*) => {
        tracing::$level!(domain = stringify!($domain), $($field)*)
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
