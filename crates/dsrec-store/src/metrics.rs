//! Operation event hooks.
//!
//! Without the `tracing` feature these compile to nothing. Subscribers are
//! installed by the binary layer.

use dsrec_core::ident::DatasetName;

#[cfg(feature = "tracing")]
pub fn emit_op(op: &'static str, dataset: &DatasetName, key_values: &[(&str, String)]) {
    let span = tracing::debug_span!("dsrec", op, dataset = %dataset);
    let _enter = span.enter();
    for (k, v) in key_values {
        tracing::debug!(%k, %v, "op");
    }
    if key_values.is_empty() {
        tracing::debug!("op");
    }
}

#[cfg(not(feature = "tracing"))]
pub fn emit_op(_op: &'static str, _dataset: &DatasetName, _key_values: &[(&str, String)]) { /* no-op */
}
