// ECL - ecl-core
// Module: Internal macros
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Internal macros shared by the engines.

/// Emits a structured event when the `tracing` feature is enabled.
///
/// Fields come first, the message last:
/// `trace_event!(debug, "rehash", from = old, to = new);`
macro_rules! trace_event {
    ($level:ident, $message:literal $(, $field:ident = $value:expr)* $(,)?) => {{
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($field = $value,)* $message);
        #[cfg(not(feature = "tracing"))]
        {
            // No-op when tracing is disabled
            $(let _ = &$value;)*
        }
    }};
}

/// Opens a span from one of the [`crate::tracing`] helpers and keeps it
/// entered until the end of the enclosing block.
macro_rules! enter_span {
    ($span:expr) => {
        #[cfg(feature = "tracing")]
        let _guard = $span.entered();
    };
}

pub(crate) use enter_span;
pub(crate) use trace_event;
