pub use dispatchx_internal::*;
